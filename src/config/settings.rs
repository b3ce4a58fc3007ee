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

use config::{Config, ConfigError, Environment, File};
use crate::engines::dispatcher::DEFAULT_CONCURRENCY;
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、数据库、Redis、成绩门户、学院名录和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// Redis配置
    pub redis: RedisSettings,
    /// 成绩门户配置
    pub portal: PortalSettings,
    /// 学院名录配置
    pub college_directory: CollegeDirectorySettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// Redis配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL
    pub url: String,
    /// 缓存过期时间（秒）
    pub ttl_seconds: u64,
    /// 启动探测超时（毫秒）
    pub connect_timeout_ms: u64,
}

/// 成绩门户配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct PortalSettings {
    /// 门户结果接口地址
    pub base_url: String,
    /// 最大并发请求数，同时作为连接池上限
    pub concurrency: usize,
    /// 单个请求超时时间（秒）
    pub timeout_secs: u64,
    /// 是否跳过TLS证书校验
    pub accept_invalid_certs: bool,
    /// 请求使用的User-Agent
    pub user_agent: String,
}

impl PortalSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 学院名录配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CollegeDirectorySettings {
    /// 学院名册表格导出文件路径
    pub roster_path: String,
    /// 名录磁盘缓存路径（JSON）
    pub cache_path: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用Prometheus导出
    pub enabled: bool,
    /// 导出器监听地址
    pub address: String,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            base_url: "http://results.jntuh.ac.in/resultAction".to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: 10,
            accept_invalid_certs: true,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 以及
    /// `RESULTRS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let portal = PortalSettings::default();
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Default DB pool settings
            .set_default("database.url", "sqlite://results.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default cache settings (12 hours)
            .set_default("redis.url", "redis://127.0.0.1:6379/0")?
            .set_default("redis.ttl_seconds", 60 * 60 * 12)?
            .set_default("redis.connect_timeout_ms", 1000)?
            // Default upstream portal settings
            .set_default("portal.base_url", portal.base_url)?
            .set_default("portal.concurrency", portal.concurrency as u64)?
            .set_default("portal.timeout_secs", portal.timeout_secs)?
            .set_default("portal.accept_invalid_certs", portal.accept_invalid_certs)?
            .set_default("portal.user_agent", portal.user_agent)?
            .set_default(
                "college_directory.roster_path",
                "data/btech_mba_centers_reviewed.txt",
            )?
            .set_default("college_directory.cache_path", "data/college_cache.json")?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.address", "0.0.0.0:9000")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("RESULTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
