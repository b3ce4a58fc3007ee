// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::transcript_service::TranscriptService;
use crate::presentation::handlers::result_handler;
use axum::{routing::get, Extension, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `service` - 成绩查询服务
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(service: Arc<TranscriptService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/result/{htno}", get(result_handler::get_result))
        .layer(Extension(service))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// 服务状态
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
