// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::transcript::NormalizedResult;
use async_trait::async_trait;
use std::time::Duration;

/// 成绩结果缓存特质
///
/// 缓存故障（连接、序列化）不得影响调用方：读取失败视为未命中，写入失败静默忽略
#[async_trait]
pub trait TranscriptCache: Send + Sync {
    /// 读取缓存
    async fn get(&self, key: &str) -> Option<NormalizedResult>;
    /// 写入缓存并设置过期时间
    async fn set(&self, key: &str, value: &NormalizedResult, ttl: Duration);
}
