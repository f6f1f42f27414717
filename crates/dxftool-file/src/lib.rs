//! DxfTool 文件处理
//!
//! 支持：
//! - 从 DXF 头部检测代码页和版本
//! - 旧版 DXF（AC1015 及以下）逐行扫描导出高程点坐标
//! - 新版 DXF 通过 `dxf` crate 的对象模型导出

pub mod codepage;
pub mod config;
pub mod detect;
pub mod dxf_io;
pub mod error;
pub mod parser;
pub mod text_io;

pub use config::{ExportLayout, ModernPathMode, ParserConfig};
pub use detect::{get_encoding, get_version, DxfPath};
pub use dxf_io::{DxfCrateReader, ObjectModel, ObjectModelReader};
pub use error::FileError;
pub use parser::{DxfParser, Inspection, DEFAULT_HIGH_POINT_NAME};
