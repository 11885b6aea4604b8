// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理守护进程的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含作业模型和爬取管道
pub mod domain;

/// 引擎模块
///
/// 请求构建、HTTP传输和HTML解析的默认实现
pub mod engines;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

pub use domain::models::{Filter, Job, JobResult, RequestSpec, Rule, RuleOutput};
pub use domain::services::crawl_service::{
    CrawlError, CrawlService, Crawler, CrawlerOptions, PendingCrawl,
};
