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

use crate::domain::models::fetch::AbsentReason;
use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 连接失败
    #[error("Connection failed: {0}")]
    Connect(String),
    /// 门户地址无效
    #[error("Invalid portal URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 将错误归类为缺失原因
    ///
    /// 超时与连接错误属于预期内的失败，其余归为意外错误
    pub fn absent_reason(&self) -> AbsentReason {
        match self {
            EngineError::RequestFailed(e) if e.is_timeout() => AbsentReason::Timeout,
            EngineError::RequestFailed(e) if e.is_connect() => AbsentReason::Connect,
            EngineError::RequestFailed(e) => match e.status() {
                Some(status) => AbsentReason::Status(status.as_u16()),
                None => AbsentReason::Unexpected,
            },
            EngineError::Timeout => AbsentReason::Timeout,
            EngineError::Connect(_) => AbsentReason::Connect,
            EngineError::InvalidUrl(_) | EngineError::Other(_) => AbsentReason::Unexpected,
        }
    }
}

/// 门户响应
#[derive(Debug, Clone)]
pub struct PortalResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub body: String,
}

/// 成绩门户客户端特质
///
/// 发起一次 GET 请求并完整读取响应体，不做重试
#[async_trait]
pub trait PortalClient: Send + Sync {
    /// 获取指定地址的页面
    async fn get(&self, url: &str) -> Result<PortalResponse, EngineError>;

    /// 客户端名称
    fn name(&self) -> &'static str;
}
