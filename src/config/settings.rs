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

use crate::domain::services::crawl_service::CrawlerOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含守护进程监听地址和爬取器配置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 爬取器配置
    pub crawler: CrawlerSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 爬取器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/<APP_ENVIRONMENT>` 和
    /// `XPCRAWL__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Self::environment());

        builder.build()?.try_deserialize()
    }

    /// 仅包含默认值的配置构建器
    pub fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 12345)?
            .set_default("crawler.timeout_secs", 10)
    }

    /// 环境变量配置源
    pub fn environment() -> Environment {
        Environment::with_prefix("XPCRAWL")
            .separator("__")
            .try_parsing(true)
    }

    /// 服务器监听地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 爬取器运行时配置
    pub fn crawler_options(&self) -> CrawlerOptions {
        CrawlerOptions::from(&self.crawler)
    }
}

impl From<&CrawlerSettings> for CrawlerOptions {
    fn from(settings: &CrawlerSettings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}
