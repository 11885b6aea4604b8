// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::{JobResult, Rule, RuleOutput};
use crate::domain::services::filter_service::FilterChain;
use sxd_document::dom::Document;
use sxd_xpath::{Context, Factory, Value, XPath};
use tracing::debug;

/// 规则服务
///
/// 在已解析的文档上执行 XPath 规则，并把过滤链应用到每个匹配值。
/// 规则级错误只写入对应规则的输出，不会中断其它规则。
pub struct RuleService;

impl RuleService {
    /// 对文档执行全部规则
    ///
    /// 每条规则独立执行；重名规则后者覆盖前者。
    pub fn evaluate_rules(document: &Document<'_>, rules: &[Rule]) -> JobResult {
        let mut output = JobResult::new();
        for rule in rules {
            output.insert(rule.name.clone(), Self::evaluate_rule(document, rule));
        }
        output
    }

    /// 对文档执行单条规则
    ///
    /// # 错误优先级
    ///
    /// * XPath 无法编译：`error` 为编译诊断，`values` 为空
    /// * 没有任何匹配：`error` 为 `no match for xpath <expr>`
    /// * 过滤链失败：该匹配的原始值仍被保留，`error` 记录最后一次过滤错误
    pub fn evaluate_rule(document: &Document<'_>, rule: &Rule) -> RuleOutput {
        let mut out = RuleOutput::default();

        let xpath = match compile_xpath(&rule.xpath) {
            Ok(xpath) => xpath,
            Err(message) => {
                debug!(rule = %rule.name, "{}", message);
                out.error = message;
                return out;
            }
        };

        let context = Context::new();
        let matches = match xpath.evaluate(&context, document.root()) {
            Ok(value) => matched_strings(value),
            Err(e) => {
                out.error = format!("evaluating xpath {:?}: {}", rule.xpath, e);
                debug!(rule = %rule.name, "{}", out.error);
                return out;
            }
        };

        if matches.is_empty() {
            out.error = format!("no match for xpath {}", rule.xpath);
            return out;
        }

        let chain = FilterChain::compile(&rule.filters);
        for raw in matches {
            match chain.apply(&raw) {
                Ok(filtered) => out.values.push(filtered),
                Err(e) => {
                    out.error = e.to_string();
                    out.values.push(raw);
                }
            }
        }

        out
    }
}

fn compile_xpath(expr: &str) -> Result<XPath, String> {
    match Factory::new().build(expr) {
        Ok(Some(xpath)) => Ok(xpath),
        Ok(None) => Err(format!("compiling xpath {:?}: empty expression", expr)),
        Err(e) => {
            let kind = e.to_string();
            match describe_compile_error(&kind) {
                Some(detail) => Err(format!("compiling xpath {:?}: {} ({})", expr, detail, kind)),
                None => Err(format!("compiling xpath {:?}: {}", expr, kind)),
            }
        }
    }
}

/// sxd-xpath 编译错误变体名对应的可读说明
fn describe_compile_error(kind: &str) -> Option<&'static str> {
    let detail = match kind {
        "RanOutOfInput" => "unexpected end of expression",
        "EmptyPredicate" => "empty predicate",
        "ExtraUnparsedTokens" => "unexpected trailing input",
        "RightHandSideExpressionMissing" => "operator is missing its right-hand operand",
        "ArgumentMissing" => "function argument missing",
        "TrailingSlash" => "expression ends with a slash",
        "UnexpectedToken" => "unexpected token",
        "MissingLocalName" => "name is missing its local part",
        "MismatchedQuoteCharacters" => "unterminated string literal",
        "UnableToCreateToken" => "unrecognized character",
        _ => return None,
    };
    Some(detail)
}

/// 把 XPath 结果转换为字符串列表
///
/// 节点集按文档顺序取每个节点的字符串值；标量结果视为一个匹配。
fn matched_strings(value: Value<'_>) -> Vec<String> {
    match value {
        Value::Nodeset(nodes) => nodes
            .document_order()
            .into_iter()
            .map(|node| node.string_value())
            .collect(),
        scalar => vec![scalar.string()],
    }
}
