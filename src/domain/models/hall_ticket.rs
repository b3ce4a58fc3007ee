// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 准考证号格式错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HallTicketError {
    #[error("hall ticket number cannot be empty")]
    Empty,
    #[error("hall ticket number contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// 准考证号
///
/// 经过去除首尾空白并转换为大写后的学生考试标识，
/// 作为整个抓取流程的不可变输入以及结果存储的主键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HallTicketNumber(String);

impl HallTicketNumber {
    /// 规范化并校验准考证号
    pub fn parse(raw: &str) -> Result<Self, HallTicketError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(HallTicketError::Empty);
        }
        // The value is appended verbatim to the portal query string.
        if let Some(c) = normalized.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(HallTicketError::InvalidCharacter(c));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HallTicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HallTicketNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
