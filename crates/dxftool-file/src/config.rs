//! 解析器配置
//!
//! 可以从 JSON 文件加载，缺省的键使用默认值：
//!
//! ```json
//! {
//!   "header_lines": 20,
//!   "default_encoding": "utf-8",
//!   "legacy_version_ceiling": 1015,
//!   "modern_path": "export",
//!   "layout": "rows"
//! }
//! ```

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::FileError;

/// 头部采样行数
pub const DEFAULT_HEADER_LINES: usize = 20;

/// 旧版文本路径的最高版本（AC1015 = AutoCAD 2000）
pub const LEGACY_VERSION_CEILING: i32 = 1015;

/// 新版 DXF 的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModernPathMode {
    /// 通过 DXF 对象模型提取高程点并导出
    #[default]
    Export,
    /// 只加载文档并记录文本实体数量，不写输出
    Skip,
}

/// 输出文件布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportLayout {
    /// 每个坐标值一行
    #[default]
    Lines,
    /// 每条记录一行，值以 `;` 分隔
    Rows,
}

impl ExportLayout {
    /// 字段分隔符
    pub const ROW_SEPARATOR: &'static str = ";";

    /// 把分组的值展开为输出行
    pub fn render<I>(&self, records: I) -> Vec<String>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        match self {
            ExportLayout::Lines => records.into_iter().flatten().collect(),
            ExportLayout::Rows => records
                .into_iter()
                .map(|values| values.join(Self::ROW_SEPARATOR))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub header_lines: usize,
    /// WHATWG 编码标签
    pub default_encoding: String,
    pub legacy_version_ceiling: i32,
    pub modern_path: ModernPathMode,
    pub layout: ExportLayout,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_lines: DEFAULT_HEADER_LINES,
            default_encoding: "utf-8".to_string(),
            legacy_version_ceiling: LEGACY_VERSION_CEILING,
            modern_path: ModernPathMode::default(),
            layout: ExportLayout::default(),
        }
    }
}

impl ParserConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let text = fs::read_to_string(path)?;
        let config: ParserConfig = serde_json::from_str(&text)?;
        config.encoding()?;
        Ok(config)
    }

    /// 解析默认编码标签
    pub fn encoding(&self) -> Result<&'static Encoding, FileError> {
        Encoding::for_label(self.default_encoding.trim().as_bytes()).ok_or_else(|| {
            FileError::InvalidConfig(format!("unknown encoding label: {}", self.default_encoding))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.header_lines, 20);
        assert_eq!(config.legacy_version_ceiling, 1015);
        assert_eq!(config.encoding().unwrap(), encoding_rs::UTF_8);
    }

    #[test]
    fn test_partial_json() {
        let config: ParserConfig =
            serde_json::from_str(r#"{ "layout": "rows", "default_encoding": "windows-1250" }"#)
                .unwrap();
        assert_eq!(config.layout, ExportLayout::Rows);
        assert_eq!(config.header_lines, DEFAULT_HEADER_LINES);
        assert_eq!(config.modern_path, ModernPathMode::Export);
        assert_eq!(config.encoding().unwrap(), encoding_rs::WINDOWS_1250);
    }

    #[test]
    fn test_unknown_encoding_label() {
        let config = ParserConfig {
            default_encoding: "klingon".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.encoding(), Err(FileError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_rejects_bad_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dxftool.json");
        fs::write(&path, r#"{ "default_encoding": "nope" }"#).unwrap();
        assert!(matches!(ParserConfig::load(&path), Err(FileError::InvalidConfig(_))));
    }

    #[test]
    fn test_render_layouts() {
        let records = vec![
            vec!["1".to_string(), "2".to_string(), "3".to_string()],
            vec!["4".to_string(), "5".to_string(), "6".to_string()],
        ];
        assert_eq!(
            ExportLayout::Lines.render(records.clone()),
            vec!["1", "2", "3", "4", "5", "6"]
        );
        assert_eq!(ExportLayout::Rows.render(records), vec!["1;2;3", "4;5;6"]);
    }
}
