//! 测试用 DXF 文本生成器

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// 组码-值对写入器
pub struct DxfWriter {
    output: Vec<String>,
}

impl DxfWriter {
    pub fn new() -> Self {
        Self { output: Vec::new() }
    }

    /// 写入组码-值对
    pub fn write_pair(&mut self, code: i32, value: impl std::fmt::Display) {
        self.output.push(format!("{:>3}", code));
        self.output.push(value.to_string());
    }

    /// 写入旧版头段（版本和代码页）
    pub fn header(&mut self, version: &str, code_page: &str) {
        self.begin_section("HEADER");
        self.write_pair(9, "$ACADVER");
        self.write_pair(1, version);
        self.write_pair(9, "$DWGCODEPAGE");
        self.write_pair(3, code_page);
        self.end_section();
    }

    pub fn begin_section(&mut self, name: &str) {
        self.write_pair(0, "SECTION");
        self.write_pair(2, name);
    }

    pub fn end_section(&mut self) {
        self.write_pair(0, "ENDSEC");
    }

    /// 写入带坐标的实体
    pub fn entity(&mut self, kind: &str, layer: &str, x: &str, y: &str, z: &str) {
        self.write_pair(0, kind);
        self.write_pair(8, layer);
        self.write_pair(10, x);
        self.write_pair(20, y);
        self.write_pair(30, z);
    }

    pub fn finish(mut self) -> String {
        self.write_pair(0, "EOF");
        let mut text = self.output.join("\r\n");
        text.push_str("\r\n");
        text
    }

    /// 用指定编码保存
    pub fn save(self, path: &Path, encoding: &'static encoding_rs::Encoding) {
        let text = self.finish();
        let (bytes, _, _) = encoding.encode(&text);
        fs::write(path, &bytes).unwrap();
    }
}

const HIGH_POINT: &str = "punkt wysokościowy";

/// 一个 R12 文件：图层表、高程点块定义，实体段中两个高程点
/// （一个 POINT，一个带属性的 INSERT），以及其他图层的线和多段线
pub fn legacy_drawing(code_page: &str) -> DxfWriter {
    let mut writer = DxfWriter::new();
    writer.header("AC1009", code_page);

    writer.begin_section("TABLES");
    writer.write_pair(0, "TABLE");
    writer.write_pair(2, "LAYER");
    writer.write_pair(70, 2);
    for layer in [HIGH_POINT, "drogi"] {
        writer.write_pair(0, "LAYER");
        writer.write_pair(2, layer);
        writer.write_pair(70, 0);
        writer.write_pair(62, 7);
        writer.write_pair(6, "CONTINUOUS");
    }
    writer.write_pair(0, "ENDTAB");
    writer.end_section();

    // 块内坐标是块的局部坐标，不能导出
    writer.begin_section("BLOCKS");
    writer.write_pair(0, "BLOCK");
    writer.write_pair(8, HIGH_POINT);
    writer.write_pair(2, "PKT");
    writer.write_pair(70, 2);
    writer.write_pair(10, "0.0");
    writer.write_pair(20, "0.0");
    writer.write_pair(30, "0.0");
    writer.entity("POINT", HIGH_POINT, "0.0", "0.0", "0.0");
    writer.entity("ATTDEF", HIGH_POINT, "0.5", "0.5", "0.0");
    writer.write_pair(1, "");
    writer.write_pair(2, "H");
    writer.write_pair(3, "Wysokość");
    writer.write_pair(0, "ENDBLK");
    writer.write_pair(8, HIGH_POINT);
    writer.end_section();

    writer.begin_section("ENTITIES");
    writer.entity("POINT", HIGH_POINT, "5571234.12", "6543210.55", "123.40");
    writer.entity("LINE", "drogi", "1.0", "2.0", "0.0");
    writer.write_pair(0, "POLYLINE");
    writer.write_pair(8, "drogi");
    writer.write_pair(66, 1);
    writer.write_pair(10, "0.0");
    writer.write_pair(20, "0.0");
    writer.write_pair(30, "0.0");
    writer.entity("VERTEX", "drogi", "10.0", "20.0", "0.0");
    writer.entity("VERTEX", "drogi", "11.0", "21.0", "0.0");
    writer.write_pair(0, "SEQEND");
    writer.write_pair(8, "drogi");
    writer.write_pair(0, "INSERT");
    writer.write_pair(8, HIGH_POINT);
    writer.write_pair(66, 1);
    writer.write_pair(2, "PKT");
    writer.write_pair(10, "5571300.00");
    writer.write_pair(20, "6543300.00");
    writer.write_pair(30, "125.10");
    writer.entity("ATTRIB", HIGH_POINT, "5571300.50", "6543300.50", "125.10");
    writer.write_pair(1, "125.10");
    writer.write_pair(2, "H");
    writer.write_pair(0, "SEQEND");
    writer.write_pair(8, HIGH_POINT);
    writer.end_section();
    writer
}
