// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 专业解析
//!
//! 准考证号格式为 `YY CC D E BB RR`：入学年份、学院代码、学位、入学方式、
//! 专业代码与流水号。专业名称由第 7、8 位的专业代码决定。

const BRANCH_CODE_RANGE: std::ops::Range<usize> = 6..8;

const BRANCHES: &[(&str, &str)] = &[
    ("01", "Civil Engineering"),
    ("02", "Electrical and Electronics Engineering"),
    ("03", "Mechanical Engineering"),
    ("04", "Electronics and Communication Engineering"),
    ("05", "Computer Science and Engineering"),
    ("06", "Electronics and Computer Engineering"),
    ("08", "Chemical Engineering"),
    ("10", "Electronics and Instrumentation Engineering"),
    ("12", "Information Technology"),
    ("19", "Electronics and Computer Engineering"),
    ("21", "Aeronautical Engineering"),
    ("24", "Automobile Engineering"),
    ("25", "Mining Engineering"),
    ("27", "Petroleum Engineering"),
    ("32", "Computer Science and Business Systems"),
    ("33", "Computer Science and Engineering (Cyber Security)"),
    ("62", "Computer Science and Engineering (Cyber Security)"),
    ("66", "Computer Science and Engineering (AI & ML)"),
    ("67", "Computer Science and Engineering (Data Science)"),
    ("69", "Computer Science and Engineering (IoT)"),
    ("72", "Artificial Intelligence and Data Science"),
    ("73", "Artificial Intelligence and Machine Learning"),
];

/// 根据准考证号解析专业名称
///
/// 准考证号过短或专业代码未知时返回 `None`
pub fn branch_name(hall_ticket: &str) -> Option<&'static str> {
    let code = hall_ticket.trim().get(BRANCH_CODE_RANGE)?;
    BRANCHES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}
