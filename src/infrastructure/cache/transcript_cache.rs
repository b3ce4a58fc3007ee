// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::RedisSettings;
use crate::domain::models::transcript::NormalizedResult;
use crate::domain::repositories::transcript_cache::TranscriptCache;
use crate::infrastructure::cache::redis_client::RedisClient;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// 基于Redis的成绩缓存
///
/// 启动时探测一次Redis；不可用时缓存被禁用，所有读取都未命中。
/// 运行期间的任何错误都降级为未命中或忽略写入。
#[derive(Clone)]
pub struct RedisTranscriptCache {
    client: Option<RedisClient>,
}

impl RedisTranscriptCache {
    /// 连接Redis并探测可用性
    pub async fn connect(settings: &RedisSettings) -> Self {
        let client = match RedisClient::new(&settings.url) {
            Ok(client) => client,
            Err(e) => {
                warn!("Invalid Redis URL, response cache disabled: {}", e);
                return Self::disabled();
            }
        };

        let probe = tokio::time::timeout(
            Duration::from_millis(settings.connect_timeout_ms),
            client.ping(),
        )
        .await;

        match probe {
            Ok(Ok(())) => {
                info!("Redis response cache enabled");
                Self {
                    client: Some(client),
                }
            }
            Ok(Err(e)) => {
                warn!("Redis unavailable, response cache disabled: {}", e);
                Self::disabled()
            }
            Err(_) => {
                warn!("Redis ping timed out, response cache disabled");
                Self::disabled()
            }
        }
    }

    /// 创建一个始终未命中的缓存
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl TranscriptCache for RedisTranscriptCache {
    async fn get(&self, key: &str) -> Option<NormalizedResult> {
        let client = self.client.as_ref()?;
        let raw = match client.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, "Cache read failed: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "Discarding undecodable cache entry: {}", e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &NormalizedResult, ttl: Duration) {
        let Some(client) = self.client.as_ref() else {
            return;
        };
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, "Cache encode failed: {}", e);
                return;
            }
        };
        if let Err(e) = client.set(key, &raw, ttl.as_secs().max(1)).await {
            warn!(key, "Cache write failed: {}", e);
        }
    }
}
