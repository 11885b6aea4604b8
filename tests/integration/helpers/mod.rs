// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use xpcrawl::{CrawlError, Crawler, Job, JobResult, PendingCrawl};

/// 测试页面
pub const PRODUCT_PAGE: &str = r#"<html>
    <head><title>Widget Store</title></head>
    <body>
        <h1 class="name">Super Widget</h1>
        <span class="price">Price: 42 EUR</span>
        <ul class="tags">
            <li>blue</li>
            <li>small</li>
            <li>cheap</li>
        </ul>
    </body>
</html>"#;

/// 启动本地测试站点，返回根URL
pub async fn start_page_server() -> String {
    let app = Router::new()
        .route("/product", get(|| async { axum::response::Html(PRODUCT_PAGE) }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// 返回一个当前没有监听者的本地地址
pub async fn unused_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// 返回固定结果的爬取器
pub struct StubCrawler {
    outcome: Arc<dyn Fn(&Job) -> Result<JobResult, CrawlError> + Send + Sync>,
}

impl StubCrawler {
    pub fn new(outcome: impl Fn(&Job) -> Result<JobResult, CrawlError> + Send + Sync + 'static) -> Self {
        Self {
            outcome: Arc::new(outcome),
        }
    }
}

#[async_trait]
impl Crawler for StubCrawler {
    async fn crawl(&self, job: Job) -> Result<JobResult, CrawlError> {
        (self.outcome)(&job)
    }

    fn crawl_async(&self, job: Job) -> PendingCrawl {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send((self.outcome)(&job));
        PendingCrawl::new(rx)
    }
}

/// 构建 JSON 请求
pub fn json_request(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// 读取响应体为字符串
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
