// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了爬取作业的数据结构：
/// - 作业（Job）：一次请求加一组命名提取规则
/// - 规则（Rule）与过滤器（Filter）：XPath 查询及其正则过滤链
/// - 结果（JobResult）：规则名到规则输出的映射
///
/// 字段名与网络边界上的 JSON 字段名保持一致。
pub mod job;

pub use job::{Filter, Job, JobResult, RequestSpec, Rule, RuleOutput};
