// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::hall_ticket::{HallTicketError, HallTicketNumber};
use crate::domain::models::transcript::NormalizedResult;
use crate::domain::repositories::transcript_cache::TranscriptCache;
use crate::domain::repositories::transcript_repository::{RepositoryError, TranscriptRepository};
use crate::domain::services::scrape_pipeline::TranscriptSource;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// 成绩查询服务错误
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 准考证号格式错误
    #[error("Invalid hall ticket number: {0}")]
    InvalidHallTicket(#[from] HallTicketError),
    /// 没有找到成绩
    #[error("Result not found or blocked by the results portal")]
    NotFound,
    /// 抓取过程出现意外错误
    #[error("Scraper failed: {0:#}")]
    Scrape(anyhow::Error),
    /// 持久化存储错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 结果来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    Cache,
    Db,
    Scraper,
}

impl LookupSource {
    fn label(&self) -> &'static str {
        match self {
            LookupSource::Cache => "cache",
            LookupSource::Db => "db",
            LookupSource::Scraper => "scraper",
        }
    }
}

/// 成绩查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    /// 结果是否来自缓存或存储
    pub cached: bool,
    pub source: LookupSource,
    pub data: NormalizedResult,
}

impl LookupResult {
    fn new(source: LookupSource, data: NormalizedResult) -> Self {
        metrics::counter!("transcript_lookup_total", "source" => source.label()).increment(1);
        Self {
            cached: source != LookupSource::Scraper,
            source,
            data,
        }
    }
}

/// 成绩查询服务
///
/// 查询顺序：缓存 → 持久化存储（命中时回填缓存）→ 实时抓取（成功时持久化并写入缓存）
pub struct TranscriptService {
    cache: Arc<dyn TranscriptCache>,
    repository: Arc<dyn TranscriptRepository>,
    source: Arc<dyn TranscriptSource>,
    cache_ttl: Duration,
}

impl TranscriptService {
    pub fn new(
        cache: Arc<dyn TranscriptCache>,
        repository: Arc<dyn TranscriptRepository>,
        source: Arc<dyn TranscriptSource>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            repository,
            source,
            cache_ttl,
        }
    }

    /// 查询一个准考证号的成绩
    ///
    /// # 参数
    ///
    /// * `raw_hall_ticket` - 原始准考证号，查询前会被规范化
    ///
    /// # 返回值
    ///
    /// * `Ok(LookupResult)` - 查询结果及其来源
    /// * `Err(ServiceError::NotFound)` - 抓取没有产生任何成绩
    /// * `Err(ServiceError)` - 其他错误
    pub async fn lookup(&self, raw_hall_ticket: &str) -> Result<LookupResult, ServiceError> {
        let hall_ticket = HallTicketNumber::parse(raw_hall_ticket)?;
        let key = hall_ticket.as_str();

        if let Some(cached) = self.cache.get(key).await {
            info!(hall_ticket = %hall_ticket, "Serving result from cache");
            return Ok(LookupResult::new(LookupSource::Cache, cached));
        }

        if let Some(stored) = self.repository.get(key).await? {
            info!(hall_ticket = %hall_ticket, "Serving result from store");
            self.cache.set(key, &stored, self.cache_ttl).await;
            return Ok(LookupResult::new(LookupSource::Db, stored));
        }

        let transcript = self
            .source
            .scrape_transcript(&hall_ticket)
            .await
            .map_err(|e| {
                error!(hall_ticket = %hall_ticket, "Scraper crashed: {:#}", e);
                ServiceError::Scrape(e)
            })?;

        let Some(transcript) = transcript else {
            metrics::counter!("transcript_lookup_total", "source" => "not_found").increment(1);
            return Err(ServiceError::NotFound);
        };

        let normalized = NormalizedResult::from_transcript(key, transcript);
        self.repository.put(key, &normalized).await?;
        self.cache.set(key, &normalized, self.cache_ttl).await;

        info!(
            hall_ticket = %hall_ticket,
            semesters = normalized.semesters.len(),
            "Scraped and stored result"
        );
        Ok(LookupResult::new(LookupSource::Scraper, normalized))
    }
}

#[cfg(test)]
#[path = "transcript_service_test.rs"]
mod tests;
