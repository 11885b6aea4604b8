// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理守护进程的配置设置，包括监听地址和请求超时
pub mod settings;
