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

use crate::config::settings::PortalSettings;
use crate::engines::traits::{EngineError, PortalClient, PortalResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;
use url::Url;

/// 门户抓取引擎
///
/// 基于reqwest实现，所有请求共享同一个连接池
pub struct ReqwestPortalClient {
    client: reqwest::Client,
}

impl ReqwestPortalClient {
    /// 根据门户配置创建客户端
    ///
    /// # 参数
    ///
    /// * `settings` - 门户配置（超时、连接池上限、TLS策略、User-Agent）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestPortalClient)` - 客户端实例
    /// * `Err(EngineError::InvalidUrl)` - 门户地址无法解析
    /// * `Err(EngineError)` - 构建失败
    pub fn new(settings: &PortalSettings) -> Result<Self, EngineError> {
        Url::parse(&settings.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .timeout(settings.timeout())
            .pool_max_idle_per_host(settings.concurrency)
            .pool_idle_timeout(Duration::from_secs(90));

        // The upstream portal serves a non-standard certificate.
        if settings.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PortalClient for ReqwestPortalClient {
    /// 执行HTTP GET
    ///
    /// 任何状态码都作为 `Ok` 返回，由调用方决定是否视为成功
    async fn get(&self, url: &str) -> Result<PortalResponse, EngineError> {
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        Ok(PortalResponse { status_code, body })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
