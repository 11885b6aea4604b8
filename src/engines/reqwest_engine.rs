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

use crate::engines::traits::{BoxError, Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use futures::TryStreamExt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 默认 User-Agent，请求规格中显式设置的 User-Agent 优先
const USER_AGENT: &str = concat!("xpcrawl/", env!("CARGO_PKG_VERSION"));

/// 抓取引擎
///
/// 基于reqwest实现的HTTP传输，所有请求共享同一个带超时的客户端
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// 创建传输执行器
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次请求的超时时间，包含读取响应体
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// 使用已有的客户端
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    /// 执行HTTP请求
    ///
    /// 非2xx状态码不视为错误，页面仍交给后续阶段处理。
    async fn perform(&self, request: reqwest::Request) -> Result<TransportResponse, TransportError> {
        let method = request.method().clone();
        let url = request.url().to_string();

        let start = Instant::now();
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} {} returned status {}", method, url, status);
        }
        debug!(
            "{} {} -> {} in {}ms",
            method,
            url,
            status.as_u16(),
            start.elapsed().as_millis()
        );

        let body = response.bytes_stream().map_err(|e| Box::new(e) as BoxError);

        Ok(TransportResponse {
            status_code: status.as_u16(),
            body: Box::pin(body),
        })
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
