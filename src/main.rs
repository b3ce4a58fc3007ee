// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use resultrs::config::settings::Settings;
use resultrs::domain::exam_codes::ExamCodeRegistry;
use resultrs::domain::services::scrape_pipeline::TranscriptScraper;
use resultrs::domain::services::transcript_service::TranscriptService;
use resultrs::engines::dispatcher::FetchDispatcher;
use resultrs::engines::reqwest_engine::ReqwestPortalClient;
use resultrs::infrastructure::cache::transcript_cache::RedisTranscriptCache;
use resultrs::infrastructure::college_directory::CollegeDirectory;
use resultrs::infrastructure::database::connection;
use resultrs::infrastructure::repositories::transcript_repo_impl::TranscriptRepositoryImpl;
use resultrs::presentation::routes;
use resultrs::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting resultrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    resultrs::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Durable store
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    let repository = Arc::new(TranscriptRepositoryImpl::new(db));
    info!("Database connection established");

    // 4. Response cache (degrades to always-miss when Redis is down)
    let cache = Arc::new(RedisTranscriptCache::connect(&settings.redis).await);

    // 5. Scraper
    if settings.portal.accept_invalid_certs {
        info!("TLS certificate validation is disabled for portal requests");
    }
    let client = Arc::new(ReqwestPortalClient::new(&settings.portal)?);
    let dispatcher = FetchDispatcher::new(
        client,
        settings.portal.base_url.clone(),
        settings.portal.concurrency,
    );
    let directory = CollegeDirectory::shared(&settings.college_directory).await;
    let scraper = Arc::new(TranscriptScraper::new(
        dispatcher,
        directory,
        Arc::new(ExamCodeRegistry::builtin().clone()),
    ));

    let service = Arc::new(TranscriptService::new(
        cache,
        repository,
        scraper,
        Duration::from_secs(settings.redis.ttl_seconds),
    ));

    // 6. Start HTTP server
    let app = routes::routes(service);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
