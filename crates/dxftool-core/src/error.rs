//! 模式查找错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Schema {schema} has no field named {field}")]
    UnknownField { schema: String, field: String },
}
