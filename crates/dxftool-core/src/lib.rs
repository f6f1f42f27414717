//! DxfTool 核心
//!
//! 在 DXF 原始文本中按"模式"(Schema) 查找已知结构：
//! - `CodePage`: 代码页标记（如 `ANSI_1250`）
//! - `CadVersion`: 版本标记（如 `AC1009`）
//! - `HighPointAutoCad2000`: 高程点记录的坐标行
//!
//! # 示例
//!
//! ```rust
//! use dxftool_core::prelude::*;
//!
//! let lines = ["  9", "$ACADVER", "  1", "AC1009"];
//! let finder = SchemaFinder::default();
//! let found = finder.matches(SchemaName::CadVersion, None, &lines).unwrap();
//! assert_eq!(found, vec!["AC1009".to_string()]);
//! ```

pub mod error;
pub mod finder;
pub mod pair;
pub mod schema;

pub use error::SchemaError;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::error::SchemaError;
    pub use crate::finder::{Constraints, RecordMatch, SchemaFinder};
    pub use crate::pair::{records, DxfPair, DxfRecord, PairScanner};
    pub use crate::schema::{Field, FieldRule, Layout, Schema, SchemaName, SchemaRegistry};
}
