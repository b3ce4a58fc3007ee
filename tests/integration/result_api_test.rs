// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, COLLEGE_NAME, KNOWN_HTNO};
use axum::http::StatusCode;
use resultrs::domain::repositories::transcript_repository::TranscriptRepository;
use serde_json::Value;

/// 服务状态与健康检查端点
#[tokio::test]
async fn test_status_endpoints() {
    let app = create_test_app().await;

    let root = app.server.get("/").await;
    root.assert_status_ok();
    assert_eq!(root.json::<Value>()["status"], "ok");

    let health = app.server.get("/health").await;
    health.assert_status_ok();
    health.assert_text("OK");

    let version = app.server.get("/v1/version").await;
    version.assert_status_ok();
    version.assert_text(env!("CARGO_PKG_VERSION"));
}

/// 第一次查询走抓取并持久化，第二次直接命中存储
#[tokio::test]
async fn test_result_is_scraped_then_served_from_store() {
    let app = create_test_app().await;

    let first = app.server.get(&format!("/result/{}", KNOWN_HTNO.to_lowercase())).await;
    first.assert_status_ok();
    let body: Value = first.json();
    assert_eq!(body["cached"], false);
    assert_eq!(body["source"], "scraper");

    let data = &body["data"];
    assert_eq!(data["hallTicket"], KNOWN_HTNO);
    assert_eq!(data["name"], "A STUDENT");
    assert_eq!(data["fatherName"], "A FATHER");
    assert_eq!(data["college"], COLLEGE_NAME);
    assert_eq!(data["branch"], "Computer Science and Engineering");

    let semesters = data["semesters"].as_array().unwrap();
    assert_eq!(semesters.len(), 1);
    assert_eq!(semesters[0]["semester"], "1-1");
    let subjects = semesters[0]["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0]["subjectCode"], "CS301");
    assert_eq!(subjects[0]["examCode"], "1391");
    assert_eq!(subjects[0]["attempt"], "regular");
    assert_eq!(subjects[0]["total"], "85");

    // 3 exam codes x 2 variants
    assert_eq!(app.portal.hits(), 6);
    assert!(app.repository.get(KNOWN_HTNO).await.unwrap().is_some());

    let second = app.server.get(&format!("/result/{}", KNOWN_HTNO)).await;
    second.assert_status_ok();
    let body: Value = second.json();
    assert_eq!(body["cached"], true);
    assert_eq!(body["source"], "db");
    assert_eq!(body["data"]["hallTicket"], KNOWN_HTNO);
    assert_eq!(app.portal.hits(), 6);
}

/// 门户没有任何成绩时返回404
#[tokio::test]
async fn test_unknown_hall_ticket_returns_not_found() {
    let app = create_test_app().await;

    let response = app.server.get("/result/99X99X9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("not found"));
    assert!(app.repository.get("99X99X9999").await.unwrap().is_none());
}

/// 非法准考证号在抓取前被拒绝
#[tokio::test]
async fn test_malformed_hall_ticket_returns_bad_request() {
    let app = create_test_app().await;

    let response = app.server.get("/result/20J4-0501").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["detail"].is_string());
    assert_eq!(app.portal.hits(), 0);
}

/// 跨域请求允许任意来源
#[tokio::test]
async fn test_cors_allows_any_origin() {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::util::ServiceExt;

    let (router, _portal, _repository) = super::helpers::create_router().await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
