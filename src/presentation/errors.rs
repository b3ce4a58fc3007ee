// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::services::transcript_service::ServiceError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        match self.0.downcast_ref::<ServiceError>() {
            Some(ServiceError::NotFound) => (StatusCode::NOT_FOUND, ServiceError::NotFound.to_string()),
            Some(err @ ServiceError::InvalidHallTicket(_)) => (StatusCode::BAD_REQUEST, err.to_string()),
            // Internal failures never leak details to the caller.
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Scraper crashed. Check backend logs.".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.0);
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
