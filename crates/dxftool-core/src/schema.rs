//! 模式注册表
//!
//! 模式集合是封闭的：[`SchemaName`] 枚举列出全部已知模式，注册表在首次
//! 访问时构建一次，之后只读。按字符串查找未知模式会返回
//! [`SchemaError::SchemaNotFound`]，而不是空结果。

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SchemaError;

/// 行模式中唯一字段的名称
pub const TOKEN_FIELD: &str = "TOKEN";

/// 高程点记录的标题字段（图层名，组码 8）
pub const TITLE_FIELD: &str = "TITLE";

/// 高程点记录的块名字段（组码 2）
pub const BLOCK_FIELD: &str = "BLOCK";

/// 已知模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaName {
    CodePage,
    CadVersion,
    HighPointAutoCad2000,
}

impl SchemaName {
    pub const ALL: [SchemaName; 3] = [
        SchemaName::CodePage,
        SchemaName::CadVersion,
        SchemaName::HighPointAutoCad2000,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaName::CodePage => "CodePage",
            SchemaName::CadVersion => "CadVersion",
            SchemaName::HighPointAutoCad2000 => "HighPointAutoCad2000",
        }
    }

    fn index(self) -> usize {
        match self {
            SchemaName::CodePage => 0,
            SchemaName::CadVersion => 1,
            SchemaName::HighPointAutoCad2000 => 2,
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SchemaError::SchemaNotFound(s.to_string()))
    }
}

/// 字段识别规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// 整行（去除首尾空白）就是字段值
    WholeLine,
    /// 记录中第一个该组码之后的值行
    GroupCode(i32),
}

/// 字段定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub rule: FieldRule,
}

/// 记录的划分方式
#[derive(Debug, Clone)]
pub enum Layout {
    /// 逐行识别，每一行匹配标记正则即为一条记录，输出该行本身
    Line { token: Regex },
    /// 由组码 0 分隔的实体记录，输出 `emit` 中组码的值行。
    /// 只匹配 `section` 段内（或没有段结构的输入中）块定义之外的记录。
    Entity {
        section: &'static str,
        /// 不参与匹配的结构性记录类型
        exclude: &'static [&'static str],
        emit: &'static [i32],
    },
}

/// 模式定义
#[derive(Debug, Clone)]
pub struct Schema {
    pub name: SchemaName,
    pub layout: Layout,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const TOKEN_FIELDS: &[Field] = &[Field {
    name: TOKEN_FIELD,
    rule: FieldRule::WholeLine,
}];

const HIGH_POINT_FIELDS: &[Field] = &[
    Field {
        name: TITLE_FIELD,
        rule: FieldRule::GroupCode(8),
    },
    Field {
        name: BLOCK_FIELD,
        rule: FieldRule::GroupCode(2),
    },
];

/// 实体段
const ENTITY_SECTION: &str = "ENTITIES";

/// 段、表、块定义等结构性记录，依附于插入块的属性，
/// 以及坐标只是占位值的多段线头（顶点在后续 VERTEX 记录中）
const STRUCTURAL_KINDS: &[&str] = &[
    "SECTION", "ENDSEC", "TABLE", "ENDTAB", "BLOCK", "ENDBLK", "ATTRIB", "SEQEND", "POLYLINE",
    "EOF",
];

/// X, Y, Z
const COORDINATE_CODES: &[i32] = &[10, 20, 30];

/// 模式注册表
#[derive(Debug)]
pub struct SchemaRegistry {
    /// 按 `SchemaName::index` 排列
    schemas: [Schema; 3],
}

static BUILTIN: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::new);

impl SchemaRegistry {
    fn new() -> Self {
        let code_page = Schema {
            name: SchemaName::CodePage,
            layout: Layout::Line {
                token: Regex::new(r"^ANSI_\d+$").expect("static regex must compile"),
            },
            fields: TOKEN_FIELDS,
        };

        let cad_version = Schema {
            name: SchemaName::CadVersion,
            layout: Layout::Line {
                token: Regex::new(r"^AC\d{4}$").expect("static regex must compile"),
            },
            fields: TOKEN_FIELDS,
        };

        let high_point = Schema {
            name: SchemaName::HighPointAutoCad2000,
            layout: Layout::Entity {
                section: ENTITY_SECTION,
                exclude: STRUCTURAL_KINDS,
                emit: COORDINATE_CODES,
            },
            fields: HIGH_POINT_FIELDS,
        };

        Self {
            schemas: [code_page, cad_version, high_point],
        }
    }

    /// 内置注册表（进程内唯一）
    pub fn builtin() -> &'static SchemaRegistry {
        &BUILTIN
    }

    pub fn get(&self, name: SchemaName) -> &Schema {
        &self.schemas[name.index()]
    }

    /// 按名称字符串查找
    pub fn lookup(&self, name: &str) -> Result<&Schema, SchemaError> {
        Ok(self.get(name.parse()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }
}
