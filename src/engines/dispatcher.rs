// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::exam_codes::ExamCodeRegistry;
use crate::domain::models::fetch::{AbsentReason, FetchOutcome, FetchTask};
use crate::domain::models::hall_ticket::HallTicketNumber;
use crate::engines::traits::PortalClient;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// 默认并发上限
pub const DEFAULT_CONCURRENCY: usize = 40;

/// 抓取调度器
///
/// 为一个准考证号生成全部抓取任务，在并发闸门的限制下一次性全部发出，
/// 等待所有任务结束后按任务提交顺序返回结果。单个任务的失败只会
/// 变成缺失结果，不会影响其他任务，也不会重试。
pub struct FetchDispatcher {
    client: Arc<dyn PortalClient>,
    base_url: String,
    concurrency: usize,
}

impl FetchDispatcher {
    /// 创建调度器
    ///
    /// # 参数
    ///
    /// * `client` - 共享连接池的门户客户端
    /// * `base_url` - 门户结果接口地址
    /// * `concurrency` - 同时进行中的请求上限（至少为1）
    pub fn new(client: Arc<dyn PortalClient>, base_url: impl Into<String>, concurrency: usize) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// 执行全部抓取任务
    ///
    /// 返回的结果列表与 `registry.tasks()` 一一对应且顺序一致
    pub async fn dispatch(
        &self,
        hall_ticket: &HallTicketNumber,
        registry: &ExamCodeRegistry,
    ) -> Vec<FetchOutcome> {
        let tasks = registry.tasks();
        let gate = Semaphore::new(self.concurrency);

        info!(
            hall_ticket = %hall_ticket,
            tasks = tasks.len(),
            concurrency = self.concurrency,
            client = self.client.name(),
            "Dispatching portal fetches"
        );

        let outcomes = join_all(
            tasks
                .into_iter()
                .map(|task| self.fetch_one(&gate, task, hall_ticket)),
        )
        .await;

        let hits = outcomes.iter().filter(|o| o.is_html()).count();
        info!(
            hall_ticket = %hall_ticket,
            hits,
            total = outcomes.len(),
            "Portal fetches settled"
        );
        outcomes
    }

    async fn fetch_one(
        &self,
        gate: &Semaphore,
        task: FetchTask,
        hall_ticket: &HallTicketNumber,
    ) -> FetchOutcome {
        let url = task.url(&self.base_url, hall_ticket.as_str());

        let response = {
            let _permit = match gate.acquire().await {
                Ok(permit) => permit,
                Err(e) => {
                    warn!(task = %task, "Fetch gate closed: {}", e);
                    return absent(task, AbsentReason::Unexpected);
                }
            };
            self.client.get(&url).await
            // permit dropped here, before the outcome is classified
        };

        match response {
            Ok(response) if response.status_code == 200 => {
                metrics::counter!("portal_fetch_total", "outcome" => "html").increment(1);
                FetchOutcome::Html {
                    task,
                    payload: response.body,
                }
            }
            Ok(response) => {
                debug!(task = %task, status = response.status_code, "Portal returned non-200");
                absent(task, AbsentReason::Status(response.status_code))
            }
            Err(e) => {
                let reason = e.absent_reason();
                if reason == AbsentReason::Unexpected {
                    warn!(task = %task, "Unexpected portal fetch failure: {}", e);
                } else {
                    debug!(task = %task, "Portal fetch failed: {}", e);
                }
                absent(task, reason)
            }
        }
    }
}

fn absent(task: FetchTask, reason: AbsentReason) -> FetchOutcome {
    metrics::counter!("portal_fetch_total", "outcome" => reason.label()).increment(1);
    FetchOutcome::Absent { task, reason }
}

#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;
