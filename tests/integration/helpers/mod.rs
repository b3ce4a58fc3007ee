// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use axum_test::TestServer;
use resultrs::config::settings::{DatabaseSettings, PortalSettings};
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
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// 模拟门户中存在成绩的准考证号
pub const KNOWN_HTNO: &str = "20J41A0501";

/// 模拟门户唯一返回成绩页的考试代码（常规成绩）
pub const SERVED_EXAM_CODE: &str = "1391";

/// 测试名录中的学院代码
pub const COLLEGE_CODE: &str = "J4";
pub const COLLEGE_NAME: &str = "JNTUH College of Engineering";

/// 渲染一个门户成绩页
pub fn results_page(htno: &str) -> String {
    format!(
        "<html><body>\
         <table>\
           <tr><td><b>Hall Ticket No</b></td><td>{htno}</td><td><b>Name</b></td><td>A STUDENT</td></tr>\
           <tr><td><b>Father Name</b></td><td>A FATHER</td><td><b>College Code</b></td><td>{COLLEGE_CODE}</td></tr>\
         </table>\
         <table>\
           <tr><th><b>SUBJECT CODE</b></th><th><b>SUBJECT NAME</b></th><th><b>INTERNAL</b></th>\
               <th><b>EXTERNAL</b></th><th><b>TOTAL</b></th><th><b>GRADE</b></th><th><b>CREDITS(C)</b></th></tr>\
           <tr><td>CS301</td><td>Data Structures</td><td>25</td><td>60</td><td>85</td><td>A+</td><td>3</td></tr>\
           <tr><td>CS302</td><td>Discrete Maths</td><td>20</td><td>40</td><td>60</td><td>B</td><td>3</td></tr>\
         </table>\
         </body></html>"
    )
}

/// 进程内的模拟成绩门户
pub struct StubPortal {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
}

impl StubPortal {
    /// 在随机端口启动模拟门户
    ///
    /// 仅对 `SERVED_EXAM_CODE` 的常规成绩请求且准考证号为 `KNOWN_HTNO` 时返回成绩页，
    /// 其余请求返回404
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let app = Router::new().route(
            "/resultAction",
            get(move |RawQuery(query): RawQuery| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let query = query.unwrap_or_default();
                    let served = query.contains(&format!("examCode={}&", SERVED_EXAM_CODE))
                        && query.contains("type=intgrade")
                        && query.ends_with(&format!("htno={}", KNOWN_HTNO));
                    if served {
                        Html(results_page(KNOWN_HTNO)).into_response()
                    } else {
                        (StatusCode::NOT_FOUND, "no result").into_response()
                    }
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/resultAction", addr),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// 测试用考试代码表：两个学期，共 3 个考试代码
pub fn test_registry() -> ExamCodeRegistry {
    ExamCodeRegistry::new(vec![
        (
            "1-1".to_string(),
            vec![SERVED_EXAM_CODE.to_string(), "1392".to_string()],
        ),
        ("2-1".to_string(), vec!["1400".to_string()]),
    ])
}

pub fn test_directory() -> CollegeDirectory {
    let mut colleges = BTreeMap::new();
    colleges.insert(COLLEGE_CODE.to_string(), COLLEGE_NAME.to_string());
    CollegeDirectory::new(colleges)
}

/// 基于真实reqwest客户端构建抓取器
pub fn build_scraper(portal: &StubPortal) -> TranscriptScraper {
    let settings = PortalSettings {
        base_url: portal.base_url.clone(),
        concurrency: 4,
        timeout_secs: 5,
        ..PortalSettings::default()
    };
    let client = Arc::new(ReqwestPortalClient::new(&settings).unwrap());
    let dispatcher = FetchDispatcher::new(client, settings.base_url.clone(), settings.concurrency);
    TranscriptScraper::new(dispatcher, Arc::new(test_directory()), Arc::new(test_registry()))
}

/// 内存SQLite数据库（已应用迁移）
///
/// 连接池限制为 1，保证所有查询落在同一个内存库上
pub async fn memory_database() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
    };
    Arc::new(connection::create_pool(&settings).await.unwrap())
}

pub struct TestApp {
    pub server: TestServer,
    pub portal: StubPortal,
    pub repository: Arc<TranscriptRepositoryImpl>,
}

/// 组装完整路由：模拟门户 + 禁用的缓存 + 内存存储
pub async fn create_router() -> (Router, StubPortal, Arc<TranscriptRepositoryImpl>) {
    let portal = StubPortal::start().await;
    let repository = Arc::new(TranscriptRepositoryImpl::new(memory_database().await));
    let service = Arc::new(TranscriptService::new(
        Arc::new(RedisTranscriptCache::disabled()),
        repository.clone(),
        Arc::new(build_scraper(&portal)),
        Duration::from_secs(60),
    ));

    (routes::routes(service), portal, repository)
}

pub async fn create_test_app() -> TestApp {
    let (router, portal, repository) = create_router().await;
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        portal,
        repository,
    }
}
