// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::{JobResult, Rule};
use crate::domain::services::rule_service::RuleService;
use crate::engines::traits::{PageParser, ParseError};
use crate::utils::text_encoding::{decode_body, TextEncodingError};
use sxd_document::dom::Document;
use sxd_document::Package;
use tracing::debug;

/// 已解析的HTML文档
///
/// 解析器对不规范的HTML采用浏览器兼容的容错策略，
/// 元素名不带命名空间，可直接用 `/html/body/p` 这类表达式查询。
pub struct HtmlDocument {
    package: Package,
}

impl HtmlDocument {
    /// 解析原始字节
    ///
    /// # 返回值
    ///
    /// * `Ok(HtmlDocument)` - 解析后的文档，空输入得到只含骨架的文档
    /// * `Err(ParseError)` - 字节无法解码为文本
    pub fn parse(body: &[u8]) -> Result<Self, ParseError> {
        let text = decode_body(body).map_err(|e| match e {
            TextEncodingError::Malformed(encoding) => ParseError::Encoding { encoding },
        })?;

        debug!("解析HTML文档，长度: {} 字节", text.len());
        Ok(Self {
            package: sxd_html::parse_html(&text),
        })
    }

    /// 获取可查询的文档视图
    pub fn as_document(&self) -> Document<'_> {
        self.package.as_document()
    }
}

/// XPath 页面解析器
///
/// 默认的页面解析实现：先解析文档，再执行规则集。
#[derive(Debug, Default, Clone, Copy)]
pub struct XPathPageParser;

impl PageParser for XPathPageParser {
    fn parse(&self, body: &[u8], rules: &[Rule]) -> Result<JobResult, ParseError> {
        let page = HtmlDocument::parse(body)?;
        Ok(RuleService::evaluate_rules(&page.as_document(), rules))
    }
}
