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

use crate::domain::models::{Job, JobResult};
use crate::engines::html_parser::XPathPageParser;
use crate::engines::reqwest_engine::ReqwestTransport;
use crate::engines::request_builder::HttpRequestBuilder;
use crate::engines::traits::{
    BodyReadError, BodyStream, PageParser, ParseError, RequestBuilder, RequestError, Transport,
    TransportError,
};
use async_trait::async_trait;
use futures::StreamExt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, instrument, warn};

/// 默认请求超时时间
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 爬取管道错误
///
/// 每个变体对应管道中失败的阶段，错误信息以阶段名为前缀
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 请求规格无法构成合法请求
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] RequestError),
    /// 网络交换失败
    #[error("doing request: {0}")]
    Transport(#[source] TransportError),
    /// 响应体读取失败
    #[error("draining response body: {0}")]
    BodyRead(#[source] BodyReadError),
    /// 页面无法解析
    #[error("parsing retrieved page: {0}")]
    Parse(#[source] ParseError),
    /// HTTP客户端初始化失败
    #[error("building http client: {0}")]
    ClientInit(#[source] TransportError),
    /// 后台任务在产生结果前终止
    #[error("crawl task ended before producing a result")]
    Cancelled,
}

/// 爬取器运行时配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerOptions {
    /// 单次请求的超时时间
    pub timeout: Duration,
}

impl Default for CrawlerOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// 爬取器特质
#[async_trait]
pub trait Crawler: Send + Sync {
    /// 执行作业并等待结果
    async fn crawl(&self, job: Job) -> Result<JobResult, CrawlError>;

    /// 在独立的后台任务中执行作业
    ///
    /// 必须在 tokio 运行时内调用
    fn crawl_async(&self, job: Job) -> PendingCrawl;
}

/// 等待中的后台爬取
///
/// 包装 oneshot 接收端，可直接 `.await` 得到与同步调用相同的结果
pub struct PendingCrawl {
    receiver: oneshot::Receiver<Result<JobResult, CrawlError>>,
}

impl PendingCrawl {
    /// 由 oneshot 接收端创建
    #[must_use]
    pub fn new(receiver: oneshot::Receiver<Result<JobResult, CrawlError>>) -> Self {
        Self { receiver }
    }
}

impl Future for PendingCrawl {
    type Output = Result<JobResult, CrawlError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(CrawlError::Cancelled)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// 爬取服务
///
/// 按 构建请求 → 执行请求 → 读取响应体 → 解析页面并执行规则 的顺序运行单个作业。
/// 任一阶段失败都会立即终止，不产生部分结果；规则级错误则记录在结果内部。
#[derive(Clone)]
pub struct CrawlService {
    /// 请求构建器
    request_builder: Arc<dyn RequestBuilder>,
    /// 传输执行器
    transport: Arc<dyn Transport>,
    /// 页面解析器
    parser: Arc<dyn PageParser>,
}

impl CrawlService {
    /// 使用默认组件创建爬取服务
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlService)` - 爬取服务
    /// * `Err(CrawlError)` - HTTP客户端初始化失败
    pub fn new(options: CrawlerOptions) -> Result<Self, CrawlError> {
        let transport = ReqwestTransport::new(options.timeout).map_err(CrawlError::ClientInit)?;
        Ok(Self::with_components(
            Arc::new(HttpRequestBuilder),
            Arc::new(transport),
            Arc::new(XPathPageParser),
        ))
    }

    /// 使用自定义组件创建爬取服务
    pub fn with_components(
        request_builder: Arc<dyn RequestBuilder>,
        transport: Arc<dyn Transport>,
        parser: Arc<dyn PageParser>,
    ) -> Self {
        Self {
            request_builder,
            transport,
            parser,
        }
    }

    #[instrument(skip(self, job), fields(url = %job.request.url, rules = job.rules.len()))]
    async fn run(&self, job: &Job) -> Result<JobResult, CrawlError> {
        let request = self
            .request_builder
            .build(&job.request)
            .map_err(CrawlError::InvalidRequest)?;
        debug!("Request built");

        let response = self
            .transport
            .perform(request)
            .await
            .map_err(CrawlError::Transport)?;
        debug!("Request executed, status: {}", response.status_code);

        let body = drain_body(response.body)
            .await
            .map_err(CrawlError::BodyRead)?;
        debug!("Response body drained, {} bytes", body.len());

        let output = self
            .parser
            .parse(&body, &job.rules)
            .map_err(CrawlError::Parse)?;
        debug!("Rules evaluated, {} outputs", output.len());

        Ok(output)
    }
}

#[async_trait]
impl Crawler for CrawlService {
    async fn crawl(&self, job: Job) -> Result<JobResult, CrawlError> {
        let result = self.run(&job).await;
        if let Err(e) = &result {
            warn!("Crawl failed: {}", e);
        }
        result
    }

    fn crawl_async(&self, job: Job) -> PendingCrawl {
        let (tx, rx) = oneshot::channel();
        let service = self.clone();

        tokio::spawn(async move {
            let result = service.crawl(job).await;
            if tx.send(result).is_err() {
                debug!("Crawl result dropped, receiver is gone");
            }
        });

        PendingCrawl::new(rx)
    }
}

/// 完整读取响应体
///
/// 响应体流在此函数内被消费，无论成功与否都会在返回时释放。
async fn drain_body(mut body: BodyStream) -> Result<Vec<u8>, BodyReadError> {
    let mut buf = Vec::new();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(BodyReadError)?;
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
