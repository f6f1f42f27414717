//! 模式查找器
//!
//! 给定模式、可选的字段约束和输入行，返回所有匹配的输出行。
//!
//! - 行模式（`CodePage`、`CadVersion`）：逐行检查，输出匹配标记的行
//! - 实体模式（`HighPointAutoCad2000`）：按组码 0 切分记录，同一条记录内
//!   所有约束字段都相等时，输出该记录的坐标值行
//!
//! 实体模式只看实体段：表段、块定义内的实体和多段线头都不参与匹配。
//!
//! 结果保持文档顺序，不去重。无法识别的行直接跳过。

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::SchemaError;
use crate::pair::{records, DxfRecord};
use crate::schema::{Field, FieldRule, Layout, Schema, SchemaName, SchemaRegistry};

/// 字段约束：字段名 → 期望值（区分大小写的精确匹配）
pub type Constraints = BTreeMap<String, String>;

/// 一条匹配的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMatch {
    /// 记录起始行号
    pub line: usize,
    /// 记录输出的值（已去首尾空白），按文档顺序
    pub values: Vec<String>,
}

/// 模式查找器
#[derive(Debug, Clone, Copy)]
pub struct SchemaFinder<'r> {
    registry: &'r SchemaRegistry,
}

impl Default for SchemaFinder<'static> {
    fn default() -> Self {
        Self::new(SchemaRegistry::builtin())
    }
}

impl<'r> SchemaFinder<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// 查找匹配行
    ///
    /// 返回的每一行都已去除首尾空白。
    pub fn matches<S: AsRef<str>>(
        &self,
        schema: SchemaName,
        constraints: Option<&Constraints>,
        lines: &[S],
    ) -> Result<Vec<String>, SchemaError> {
        let found = self.find_records(schema, constraints, lines)?;
        Ok(found.into_iter().flat_map(|m| m.values).collect())
    }

    /// 按名称字符串查找匹配行，未知名称返回 `SchemaNotFound`
    pub fn matches_named<S: AsRef<str>>(
        &self,
        schema: &str,
        constraints: Option<&Constraints>,
        lines: &[S],
    ) -> Result<Vec<String>, SchemaError> {
        self.matches(schema.parse()?, constraints, lines)
    }

    /// 查找匹配记录，保留记录分组
    pub fn find_records<S: AsRef<str>>(
        &self,
        schema: SchemaName,
        constraints: Option<&Constraints>,
        lines: &[S],
    ) -> Result<Vec<RecordMatch>, SchemaError> {
        let schema = self.registry.get(schema);
        let bound = bind_constraints(schema, constraints)?;

        let found: Vec<RecordMatch> = match &schema.layout {
            Layout::Line { token } => lines
                .iter()
                .enumerate()
                .filter_map(|(line, raw)| {
                    let text = raw.as_ref().trim();
                    if !token.is_match(text) {
                        return None;
                    }
                    bound
                        .iter()
                        .all(|(_, expected)| text == *expected)
                        .then(|| RecordMatch {
                            line,
                            values: vec![text.to_string()],
                        })
                })
                .collect(),
            Layout::Entity {
                section,
                exclude,
                emit,
            } => records(lines)
                .iter()
                .filter(|record| {
                    !record.in_block && record.section.map_or(true, |name| name == *section)
                })
                .filter(|record| !exclude.iter().any(|kind| *kind == record.kind))
                .filter(|record| {
                    bound
                        .iter()
                        .all(|(field, expected)| field_value(record, field) == Some(*expected))
                })
                .filter_map(|record| {
                    let values: Vec<String> = record
                        .pairs
                        .iter()
                        .filter(|p| emit.contains(&p.code))
                        .map(|p| p.text().to_string())
                        .collect();
                    (!values.is_empty()).then_some(RecordMatch {
                        line: record.line,
                        values,
                    })
                })
                .collect(),
        };

        debug!(
            "Schema {} matched {} record(s) in {} line(s)",
            schema.name,
            found.len(),
            lines.len()
        );

        Ok(found)
    }
}

/// 把约束解析到模式字段上，未知字段是配置错误
fn bind_constraints<'c>(
    schema: &Schema,
    constraints: Option<&'c Constraints>,
) -> Result<Vec<(Field, &'c str)>, SchemaError> {
    let Some(constraints) = constraints else {
        return Ok(Vec::new());
    };

    constraints
        .iter()
        .map(|(name, expected)| {
            schema
                .field(name)
                .map(|field| (*field, expected.as_str()))
                .ok_or_else(|| SchemaError::UnknownField {
                    schema: schema.name.to_string(),
                    field: name.clone(),
                })
        })
        .collect()
}

fn field_value<'a>(record: &DxfRecord<'a>, field: &Field) -> Option<&'a str> {
    match field.rule {
        FieldRule::GroupCode(code) => record.first(code),
        // 实体模式不定义整行字段
        FieldRule::WholeLine => None,
    }
}
