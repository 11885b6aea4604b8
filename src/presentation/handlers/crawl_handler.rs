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

use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    domain::{models::Job, services::crawl_service::Crawler},
    presentation::errors::AppError,
};

/// 执行爬取作业
///
/// 请求体为 JSON 格式的作业，成功时返回 JSON 格式的结果
pub async fn handle_work(
    Extension(crawler): Extension<Arc<dyn Crawler>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let job: Job = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejecting job spec: {}", e);
        AppError::InvalidJob
    })?;

    info!(
        "Executing job: {} {} with {} rules",
        job.request.method,
        job.request.url,
        job.rules.len()
    );
    let result = crawler.crawl(job).await?;

    Ok((StatusCode::OK, Json(result)).into_response())
}
