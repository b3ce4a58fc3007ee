// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::fetch::FetchTask;
use crate::domain::models::transcript::ResultVariant;
use once_cell::sync::Lazy;

/// 内置考试代码表（学期 → 该学期各轮考试的门户代码）
const BUILTIN_EXAM_CODES: &[(&str, &[&str])] = &[
    (
        "1-1",
        &["1323", "1358", "1404", "1430", "1467", "1504", "1572", "1615", "1658", "1700", "1732", "1764", "1804"],
    ),
    (
        "1-2",
        &["1356", "1363", "1381", "1435", "1448", "1481", "1503", "1570", "1620", "1622", "1656", "1705", "1730", "1769", "1806"],
    ),
    (
        "2-1",
        &["1391", "1425", "1449", "1496", "1560", "1610", "1628", "1667", "1671", "1707", "1728", "1772", "1800"],
    ),
    (
        "2-2",
        &["1437", "1447", "1476", "1501", "1565", "1605", "1627", "1663", "1711", "1715", "1725", "1776", "1811"],
    ),
    (
        "3-1",
        &["1454", "1491", "1550", "1590", "1626", "1639", "1645", "1655", "1686", "1697", "1722", "1784", "1815"],
    ),
    (
        "3-2",
        &["1502", "1555", "1595", "1625", "1638", "1649", "1654", "1682", "1690", "1696", "1719", "1788", "1819"],
    ),
    (
        "4-1",
        &["1545", "1585", "1624", "1640", "1644", "1653", "1678", "1695", "1717", "1780", "1822"],
    ),
    (
        "4-2",
        &["1580", "1600", "1623", "1672", "1673", "1677", "1691", "1698", "1713", "1716", "1790", "1826"],
    ),
];

static BUILTIN: Lazy<ExamCodeRegistry> = Lazy::new(|| {
    ExamCodeRegistry::new(
        BUILTIN_EXAM_CODES
            .iter()
            .map(|(semester, codes)| (semester.to_string(), codes.iter().map(|c| c.to_string()).collect())),
    )
});

/// 考试代码注册表
///
/// 学期标签到考试代码集合的静态映射，按声明顺序迭代，
/// 保证任务生成顺序（进而解析顺序）是确定的。
#[derive(Debug, Clone, Default)]
pub struct ExamCodeRegistry {
    entries: Vec<(String, Vec<String>)>,
}

impl ExamCodeRegistry {
    pub fn new(entries: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// 内置的全学期注册表
    pub fn builtin() -> &'static ExamCodeRegistry {
        &BUILTIN
    }

    pub fn semesters(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(semester, codes)| (semester.as_str(), codes.as_slice()))
    }

    /// 生成完整的抓取任务集合：学期 × 考试代码 × 成绩类型
    pub fn tasks(&self) -> Vec<FetchTask> {
        let mut tasks = Vec::new();
        for (semester, codes) in self.semesters() {
            for code in codes {
                for variant in ResultVariant::ALL {
                    tasks.push(FetchTask::new(semester, code.as_str(), variant));
                }
            }
        }
        tasks
    }

    /// 任务总数
    pub fn task_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, codes)| codes.len() * ResultVariant::ALL.len())
            .sum()
    }
}
