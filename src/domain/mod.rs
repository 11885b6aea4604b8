// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：作业、规则、过滤器与结果
/// - 服务（services）：爬取管道、规则执行与过滤链
pub mod models;
pub mod services;
