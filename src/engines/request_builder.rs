// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::RequestSpec;
use crate::engines::traits::{RequestBuilder, RequestError};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Body, Method, Url};

/// HTTP请求构建器
///
/// 方法、URL、请求头和请求体全部来自请求规格。空方法按 GET 处理，
/// 任何无法构成合法HTTP请求的字段都会导致构建失败。
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpRequestBuilder;

impl RequestBuilder for HttpRequestBuilder {
    fn build(&self, spec: &RequestSpec) -> Result<reqwest::Request, RequestError> {
        let method = parse_method(&spec.method)?;
        let url = Url::parse(&spec.url).map_err(|source| RequestError::InvalidUrl {
            url: spec.url.clone(),
            source,
        })?;

        let mut request = reqwest::Request::new(method, url);

        let headers = request.headers_mut();
        for (k, v) in &spec.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|_| RequestError::InvalidHeaderName(k.clone()))?;
            let value =
                HeaderValue::from_str(v).map_err(|_| RequestError::InvalidHeaderValue(k.clone()))?;
            headers.append(name, value);
        }

        if !spec.body.is_empty() {
            *request.body_mut() = Some(Body::from(spec.body.clone()));
        }

        Ok(request)
    }
}

fn parse_method(method: &str) -> Result<Method, RequestError> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.as_bytes()).map_err(|_| RequestError::InvalidMethod(method.to_string()))
}
