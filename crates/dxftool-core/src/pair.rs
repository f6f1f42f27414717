//! DXF 组码-值对
//!
//! DXF 文本中每个数据项由两行组成：
//! - 第一行：组码（数字）
//! - 第二行：值
//!
//! ```text
//!   0
//! INSERT          ← 组码 0 开始一个新实体
//!   8
//! punkt wysokościowy   ← 图层名
//!  10
//! 5571234.12      ← X
//!  20
//! 6543210.55      ← Y
//!  30
//! 123.40          ← Z
//! ```
//!
//! 常用组码：
//! - 0: 实体类型
//! - 2: 名称（块名）
//! - 8: 图层名
//! - 10, 20, 30: X, Y, Z 坐标
//!
//! 旧版 DXF 文本并不总是规整的，这里的扫描器遇到无法解析的组码行时
//! 只跳过一行重新对齐，而不是报错。

/// 合法组码范围
const GROUP_CODE_MIN: i32 = -5;
const GROUP_CODE_MAX: i32 = 1071;

/// DXF 组码-值对（借用原始行）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DxfPair<'a> {
    pub code: i32,
    /// 值行原文（未去空白）
    pub value: &'a str,
    /// 组码行在输入中的行号（从 0 开始）
    pub line: usize,
}

impl<'a> DxfPair<'a> {
    pub fn new(code: i32, value: &'a str, line: usize) -> Self {
        Self { code, value, line }
    }

    /// 去除首尾空白后的值
    pub fn text(&self) -> &'a str {
        self.value.trim()
    }
}

/// 宽松的组码-值对扫描器
pub struct PairScanner<'a, S> {
    lines: &'a [S],
    position: usize,
}

impl<'a, S: AsRef<str>> PairScanner<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self { lines, position: 0 }
    }

    fn group_code(line: &str) -> Option<i32> {
        line.trim()
            .parse::<i32>()
            .ok()
            .filter(|code| (GROUP_CODE_MIN..=GROUP_CODE_MAX).contains(code))
    }
}

impl<'a, S: AsRef<str>> Iterator for PairScanner<'a, S> {
    type Item = DxfPair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.lines;
        while self.position + 1 < lines.len() {
            let line = self.position;
            match Self::group_code(lines[line].as_ref()) {
                Some(code) => {
                    self.position += 2;
                    return Some(DxfPair::new(code, lines[line + 1].as_ref(), line));
                }
                // 组码行损坏，跳过一行重新对齐
                None => self.position += 1,
            }
        }
        self.position = lines.len();
        None
    }
}

/// 由组码 0 分隔的一条实体记录
#[derive(Debug, Clone, PartialEq)]
pub struct DxfRecord<'a> {
    /// 组码 0 的值（实体类型，如 `INSERT`、`POINT`）
    pub kind: &'a str,
    /// 组码 0 所在行号
    pub line: usize,
    /// 所在段名（`ENTITIES`、`BLOCKS` 等），段外为 `None`
    pub section: Option<&'a str>,
    /// 是否位于 `BLOCK` 与 `ENDBLK` 之间（含这两条记录本身）
    pub in_block: bool,
    /// 组码 0 之后、下一个组码 0 之前的所有对
    pub pairs: Vec<DxfPair<'a>>,
}

impl<'a> DxfRecord<'a> {
    /// 第一个指定组码的值（已去空白）
    pub fn first(&self, code: i32) -> Option<&'a str> {
        self.pairs.iter().find(|p| p.code == code).map(|p| p.text())
    }
}

/// 将输入行切分为实体记录
///
/// 第一个组码 0 之前的对被忽略。段名取自 `SECTION` 记录的组码 2，
/// 到 `ENDSEC` 为止；块定义从 `BLOCK` 到 `ENDBLK` 为止。
pub fn records<S: AsRef<str>>(lines: &[S]) -> Vec<DxfRecord<'_>> {
    let mut result: Vec<DxfRecord<'_>> = Vec::new();
    let mut section = None;
    let mut in_block = false;

    for pair in PairScanner::new(lines) {
        if pair.code != 0 {
            if let Some(record) = result.last_mut() {
                record.pairs.push(pair);
            }
            continue;
        }

        // 段名在 SECTION 记录的对里，到下一个组码 0 时才完整
        if let Some(last) = result.last() {
            match last.kind {
                "SECTION" => section = last.first(2),
                "ENDSEC" => {
                    section = None;
                    in_block = false;
                }
                _ => {}
            }
        }

        let kind = pair.text();
        if kind == "BLOCK" {
            in_block = true;
        }
        result.push(DxfRecord {
            kind,
            line: pair.line,
            section,
            in_block,
            pairs: Vec::new(),
        });
        if kind == "ENDBLK" {
            in_block = false;
        }
    }

    result
}
