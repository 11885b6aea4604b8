// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::services::crawl_service::CrawlError;

/// 应用错误类型
///
/// 管道级错误以纯文本返回，规则级错误始终作为结果数据返回，不会出现在这里。
#[derive(Debug)]
pub enum AppError {
    /// 请求体不是合法的作业
    InvalidJob,
    /// 作业执行失败
    Crawl(CrawlError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidJob => (StatusCode::BAD_REQUEST, "invalid job spec").into_response(),
            AppError::Crawl(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("error executing job: {}", e),
            )
                .into_response(),
        }
    }
}

impl From<CrawlError> for AppError {
    fn from(err: CrawlError) -> Self {
        AppError::Crawl(err)
    }
}
