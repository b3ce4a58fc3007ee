// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::transcript::ResultVariant;
use std::fmt;

/// 抓取任务
///
/// 并发抓取的最小单元：学期 × 考试代码 × 成绩类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTask {
    pub semester: String,
    pub exam_code: String,
    pub variant: ResultVariant,
}

impl FetchTask {
    pub fn new(semester: impl Into<String>, exam_code: impl Into<String>, variant: ResultVariant) -> Self {
        Self {
            semester: semester.into(),
            exam_code: exam_code.into(),
            variant,
        }
    }

    /// 构建门户请求地址
    pub fn url(&self, base_url: &str, hall_ticket: &str) -> String {
        format!(
            "{}?&examCode={}{}{}",
            base_url,
            self.exam_code,
            self.variant.query_template(),
            hall_ticket
        )
    }
}

impl fmt::Display for FetchTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.semester, self.exam_code, self.variant)
    }
}

/// 抓取失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentReason {
    /// 非200响应
    Status(u16),
    /// 请求超时
    Timeout,
    /// 连接失败
    Connect,
    /// 其他意外错误
    Unexpected,
}

impl AbsentReason {
    /// 指标标签
    pub fn label(&self) -> &'static str {
        match self {
            AbsentReason::Status(_) => "status",
            AbsentReason::Timeout => "timeout",
            AbsentReason::Connect => "connect",
            AbsentReason::Unexpected => "error",
        }
    }
}

/// 抓取结果
///
/// 成功（HTTP 200）时携带页面内容，其他任何情况均为缺失
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Html { task: FetchTask, payload: String },
    Absent { task: FetchTask, reason: AbsentReason },
}

impl FetchOutcome {
    pub fn task(&self) -> &FetchTask {
        match self {
            FetchOutcome::Html { task, .. } | FetchOutcome::Absent { task, .. } => task,
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, FetchOutcome::Html { .. })
    }
}
