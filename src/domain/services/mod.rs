// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 爬取服务（crawl_service）：编排请求、读取、解析三个阶段，提供同步与后台两种执行方式
/// - 规则服务（rule_service）：在解析后的文档上执行 XPath 规则
/// - 过滤服务（filter_service）：对提取值依次执行正则替换
///
/// 管道级错误终止整个作业；规则级错误只记录在对应规则的输出中。
pub mod crawl_service;
pub mod filter_service;
pub mod rule_service;
