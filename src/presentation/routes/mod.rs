// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::crawl_service::Crawler;
use crate::presentation::handlers::crawl_handler;
use axum::{
    routing::{any, get},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// 作业可以提交到任意未占用的路径，`/health` 和 `/v1/version` 除外
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(crawler: Arc<dyn Crawler>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/", any(crawl_handler::handle_work))
        .fallback(crawl_handler::handle_work)
        .layer(Extension(crawler))
        .layer(TraceLayer::new_for_http())
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
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
