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

use crate::domain::models::{JobResult, RequestSpec, Rule};
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// 动态错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 响应体字节流
///
/// 流被丢弃时底层连接随之释放
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;

/// 请求构建错误
#[derive(Error, Debug)]
pub enum RequestError {
    /// 非法的HTTP方法
    #[error("invalid method {0:?}")]
    InvalidMethod(String),
    /// 非法的URL
    #[error("parse {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// 非法的请求头名称
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),
    /// 非法的请求头值
    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 传输错误
#[derive(Error, Debug)]
pub enum TransportError {
    /// 请求失败
    #[error("{0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// 判断是否为超时
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::RequestFailed(e) if e.is_timeout())
    }
}

/// 响应体读取错误
#[derive(Error, Debug)]
#[error("{0}")]
pub struct BodyReadError(#[source] pub BoxError);

/// 页面解析错误
#[derive(Error, Debug)]
pub enum ParseError {
    /// 响应体无法按检测到的字符集解码
    #[error("decoding body as {encoding}: malformed byte sequence")]
    Encoding { encoding: &'static str },
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 传输层响应
pub struct TransportResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应体
    pub body: BodyStream,
}

impl TransportResponse {
    /// 由完整的字节内容构造响应
    pub fn from_bytes(status_code: u16, body: impl Into<Bytes>) -> Self {
        let chunk: Result<Bytes, BoxError> = Ok(body.into());
        Self {
            status_code,
            body: Box::pin(futures::stream::iter(vec![chunk])),
        }
    }
}

/// 请求构建器特质
pub trait RequestBuilder: Send + Sync {
    /// 根据请求规格构建传输层请求
    fn build(&self, spec: &RequestSpec) -> Result<reqwest::Request, RequestError>;
}

/// 传输执行器特质
#[async_trait]
pub trait Transport: Send + Sync {
    /// 执行请求，返回状态码和尚未读取的响应体
    async fn perform(&self, request: reqwest::Request) -> Result<TransportResponse, TransportError>;
}

/// 页面解析器特质
pub trait PageParser: Send + Sync {
    /// 解析页面并执行全部规则
    fn parse(&self, body: &[u8], rules: &[Rule]) -> Result<JobResult, ParseError>;
}
