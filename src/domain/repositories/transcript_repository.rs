// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::transcript::NormalizedResult;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 存储内容无法编解码
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 成绩结果仓库特质
///
/// 以规范化准考证号为主键的持久化存储
#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// 根据准考证号查找结果
    async fn get(&self, hall_ticket: &str) -> Result<Option<NormalizedResult>, RepositoryError>;
    /// 保存结果，已存在时覆盖
    async fn put(&self, hall_ticket: &str, result: &NormalizedResult) -> Result<(), RepositoryError>;
}
