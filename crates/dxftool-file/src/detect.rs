//! 编码与版本检测
//!
//! 两个检测器都只看文件头部的一小段采样，检测失败时返回调用方给的默认值，
//! 从不向上报错。

use encoding_rs::Encoding;
use tracing::{debug, warn};

use dxftool_core::finder::SchemaFinder;
use dxftool_core::schema::SchemaName;

use crate::codepage::encoding_for_code_page;

/// 处理路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DxfPath {
    /// 逐行扫描文本
    LegacyText,
    /// 交给 DXF 对象模型
    ModernObjectModel,
}

impl DxfPath {
    /// `version <= ceiling` 走旧版文本路径
    pub fn for_version(version: i32, ceiling: i32) -> Self {
        if version > ceiling {
            DxfPath::ModernObjectModel
        } else {
            DxfPath::LegacyText
        }
    }
}

/// 取指定模式的第一个匹配
fn first_match<S: AsRef<str>>(
    finder: &SchemaFinder<'_>,
    schema: SchemaName,
    lines: &[S],
) -> Option<String> {
    match finder.matches(schema, None, lines) {
        Ok(found) => found.into_iter().next(),
        Err(e) => {
            warn!("Schema {} lookup failed: {}", schema, e);
            None
        }
    }
}

/// 从头部采样中检测文本编码
pub fn get_encoding<S: AsRef<str>>(
    finder: &SchemaFinder<'_>,
    lines: &[S],
    default: &'static Encoding,
) -> &'static Encoding {
    let encoding = first_match(finder, SchemaName::CodePage, lines)
        .and_then(|token| token.split('_').nth(1).and_then(|n| n.parse::<u16>().ok()))
        .and_then(encoding_for_code_page);

    match encoding {
        Some(encoding) => {
            debug!("Detected encoding {}", encoding.name());
            encoding
        }
        None => {
            debug!("No code page detected, using {}", default.name());
            default
        }
    }
}

/// 从头部采样中检测 DXF 版本号（`AC1009` → 1009）
pub fn get_version<S: AsRef<str>>(finder: &SchemaFinder<'_>, lines: &[S], default: i32) -> i32 {
    let version = first_match(finder, SchemaName::CadVersion, lines)
        .and_then(|token| token.get(2..).and_then(|digits| digits.parse::<i32>().ok()));

    match version {
        Some(version) => {
            debug!("Detected DXF version {}", version);
            version
        }
        None => {
            debug!("No DXF version detected, using {}", default);
            default
        }
    }
}
