// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::exam_codes::ExamCodeRegistry;
use crate::domain::models::fetch::FetchOutcome;
use crate::domain::models::hall_ticket::HallTicketNumber;
use crate::domain::models::transcript::{SemesterBlock, StudentIdentity, Transcript};
use crate::domain::services::table_parser::{self, ParseOutcome};
use crate::engines::dispatcher::FetchDispatcher;
use crate::infrastructure::college_directory::CollegeDirectory;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// 单次抓取的状态
///
/// 持有身份槽与按顺序累积的学期块，只在抓取阶段结束后被顺序解析过程修改
#[derive(Debug, Default)]
pub struct ScrapeRun {
    identity: Option<Arc<StudentIdentity>>,
    blocks: Vec<SemesterBlock>,
}

impl ScrapeRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&Arc<StudentIdentity>> {
        self.identity.as_ref()
    }

    /// 设置身份，已设置时保持原值
    pub fn set_identity(&mut self, identity: StudentIdentity) -> Arc<StudentIdentity> {
        self.identity
            .get_or_insert_with(|| Arc::new(identity))
            .clone()
    }

    pub fn append(&mut self, block: SemesterBlock) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[SemesterBlock] {
        &self.blocks
    }

    /// 汇总为成绩单，没有任何学期块时返回 `None`
    pub fn into_transcript(self) -> Option<Transcript> {
        Transcript::from_blocks(self.blocks)
    }
}

/// 顺序解析全部抓取结果并汇总
///
/// 解析严格按结果顺序逐个进行，不做合并、去重或排序
pub fn aggregate(outcomes: Vec<FetchOutcome>, directory: &CollegeDirectory) -> Option<Transcript> {
    let mut run = ScrapeRun::new();
    for outcome in outcomes {
        let FetchOutcome::Html { task, payload } = outcome else {
            continue;
        };
        let parsed = table_parser::parse_payload(&mut run, &task, &payload, directory);
        debug!(task = %task, outcome = ?parsed, "Payload parsed");
        if let ParseOutcome::Orphaned { subjects } = parsed {
            debug!(task = %task, subjects, "Discarded subjects without identity");
        }
    }
    run.into_transcript()
}

/// 成绩单来源
///
/// 路由层通过该特质触发抓取；`Ok(None)` 表示没有找到任何成绩
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn scrape_transcript(&self, hall_ticket: &HallTicketNumber) -> Result<Option<Transcript>>;
}

/// 成绩单抓取器
///
/// 先由调度器并发抓取全部组合，全部结束后再顺序解析与汇总
pub struct TranscriptScraper {
    dispatcher: FetchDispatcher,
    directory: Arc<CollegeDirectory>,
    registry: Arc<ExamCodeRegistry>,
}

impl TranscriptScraper {
    pub fn new(
        dispatcher: FetchDispatcher,
        directory: Arc<CollegeDirectory>,
        registry: Arc<ExamCodeRegistry>,
    ) -> Self {
        Self {
            dispatcher,
            directory,
            registry,
        }
    }

    /// 抓取一个学生的成绩单
    ///
    /// 单个任务失败不会导致错误；所有任务都失败或没有页面产生科目时返回 `None`
    pub async fn scrape(&self, hall_ticket: &HallTicketNumber) -> Option<Transcript> {
        let outcomes = self.dispatcher.dispatch(hall_ticket, &self.registry).await;
        let transcript = aggregate(outcomes, &self.directory);

        match &transcript {
            Some(t) => info!(hall_ticket = %hall_ticket, blocks = t.blocks().len(), "Transcript assembled"),
            None => info!(hall_ticket = %hall_ticket, "No results found"),
        }
        transcript
    }
}

#[async_trait]
impl TranscriptSource for TranscriptScraper {
    async fn scrape_transcript(&self, hall_ticket: &HallTicketNumber) -> Result<Option<Transcript>> {
        Ok(self.scrape(hall_ticket).await)
    }
}

#[cfg(test)]
#[path = "scrape_pipeline_test.rs"]
mod tests;
