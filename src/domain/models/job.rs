// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 爬取作业
///
/// 一个作业由一次HTTP请求和若干提取规则组成，
/// 是提交给爬取管道的最小工作单元，构造后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// 要发出的HTTP请求
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: RequestSpec,
    /// 按顺序排列的提取规则
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
}

/// 请求规格
///
/// 完整描述一次出站请求，除传输层默认值外不做任何补全
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// 目标URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// HTTP方法，空字符串等同于 GET
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    /// 请求头
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    /// 请求体
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

/// 提取规则
///
/// `name` 在同一作业内唯一，作为结果映射的键
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// 规则名称
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// XPath 表达式
    #[serde(default, deserialize_with = "null_as_default")]
    pub xpath: String,
    /// 依次应用到每个匹配值上的过滤器
    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: Vec<Filter>,
}

/// 正则过滤器
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// 正则表达式
    #[serde(default, deserialize_with = "null_as_default")]
    pub find: String,
    /// 替换模板，支持 `$1`、`${name}` 形式的分组引用
    #[serde(default, deserialize_with = "null_as_default")]
    pub replace: String,
}

/// 单条规则的输出
///
/// `error` 为空表示没有错误。`values` 即使没有匹配也是空数组而不是缺失。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutput {
    pub error: String,
    pub values: Vec<String>,
}

impl RuleOutput {
    /// 是否带有规则级错误
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// 作业结果，按规则名索引
///
/// 使用有序映射，保证同一作业对同一页面的序列化结果逐字节一致。
pub type JobResult = BTreeMap<String, RuleOutput>;

/// 把显式的 `null` 解码为默认值，与缺失字段同等对待
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Job {
    /// 创建新的作业
    pub fn new(request: RequestSpec, rules: Vec<Rule>) -> Self {
        Self { request, rules }
    }
}

impl RequestSpec {
    /// 以 GET 方法请求指定URL
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            ..Default::default()
        }
    }
}

impl Rule {
    /// 创建没有过滤器的规则
    pub fn new(name: impl Into<String>, xpath: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xpath: xpath.into(),
            filters: Vec::new(),
        }
    }

    /// 追加一个过滤器
    pub fn with_filter(mut self, find: impl Into<String>, replace: impl Into<String>) -> Self {
        self.filters.push(Filter {
            find: find.into(),
            replace: replace.into(),
        });
        self
    }
}
