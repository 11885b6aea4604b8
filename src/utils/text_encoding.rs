// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use thiserror::Error;
use tracing::debug;

/// 文本编码处理错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextEncodingError {
    #[error("decoding body as {0}: malformed byte sequence")]
    Malformed(&'static str),
}

/// 把响应体字节解码为UTF-8文本
///
/// 优先按BOM或合法UTF-8处理，否则通过字符集检测决定编码。
///
/// # 返回值
///
/// * `Ok(String)` - 解码后的文本
/// * `Err(TextEncodingError)` - 按检测到的编码解码时出现非法字节序列
pub fn decode_body(input: &[u8]) -> Result<String, TextEncodingError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(input) {
        debug!("检测到BOM，编码: {}", encoding.name());
        return decode_with(encoding, &input[bom_len..]);
    }

    if let Ok(utf8_str) = std::str::from_utf8(input) {
        return Ok(utf8_str.to_string());
    }

    let encoding = detect_encoding(input);
    debug!("UTF-8解析失败，检测到编码: {}", encoding.name());
    decode_with(encoding, input)
}

/// 检测字节序列的编码
pub fn detect_encoding(input: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(input, true);
    detector.guess(None, true)
}

fn decode_with(encoding: &'static Encoding, input: &[u8]) -> Result<String, TextEncodingError> {
    if encoding == UTF_8 {
        return std::str::from_utf8(input)
            .map(str::to_string)
            .map_err(|_| TextEncodingError::Malformed(UTF_8.name()));
    }

    let (decoded, had_errors) = encoding.decode_without_bom_handling(input);
    if had_errors {
        return Err(TextEncodingError::Malformed(encoding.name()));
    }
    Ok(decoded.into_owned())
}
