// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::Filter;
use regex::Regex;
use thiserror::Error;

/// 过滤器编译错误
///
/// 携带正则引擎的原始诊断信息，以及出错前已经累积的过滤结果。
#[derive(Error, Debug, Clone)]
#[error("{source}")]
pub struct FilterError {
    /// 出错的过滤器在链中的位置
    pub index: usize,
    /// 执行到出错过滤器之前（不含）的结果
    pub partial: String,
    #[source]
    pub source: regex::Error,
}

/// 编译后的过滤链
///
/// 过滤器按顺序编译，遇到第一个无法编译的表达式即停止；
/// 之后的过滤器不会被编译也不会被执行。
#[derive(Debug)]
pub struct FilterChain {
    steps: Vec<(Regex, String)>,
    failure: Option<(usize, regex::Error)>,
}

impl FilterChain {
    /// 编译过滤链
    pub fn compile(filters: &[Filter]) -> Self {
        let mut steps = Vec::with_capacity(filters.len());
        let mut failure = None;

        for (index, filter) in filters.iter().enumerate() {
            match Regex::new(&filter.find) {
                Ok(expr) => steps.push((expr, filter.replace.clone())),
                Err(e) => {
                    failure = Some((index, e));
                    break;
                }
            }
        }

        Self { steps, failure }
    }

    /// 对单个值依次执行全部过滤器
    ///
    /// 每个过滤器对上一个过滤器的输出做全局替换。
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 全部过滤器执行后的结果
    /// * `Err(FilterError)` - 某个过滤器无法编译，`partial` 为此前的累积结果
    pub fn apply(&self, raw: &str) -> Result<String, FilterError> {
        let mut res = raw.to_string();
        for (expr, replace) in &self.steps {
            res = expr.replace_all(&res, replace.as_str()).into_owned();
        }

        match &self.failure {
            Some((index, e)) => Err(FilterError {
                index: *index,
                partial: res,
                source: e.clone(),
            }),
            None => Ok(res),
        }
    }

    /// 过滤链是否为空
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.failure.is_none()
    }
}

/// 编译并执行过滤链
pub fn run_filters(raw: &str, filters: &[Filter]) -> Result<String, FilterError> {
    FilterChain::compile(filters).apply(raw)
}
