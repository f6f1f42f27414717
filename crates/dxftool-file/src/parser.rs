//! 高程点导出
//!
//! 每次调用独立完成一个文件：
//! 1. 用默认编码读取头部采样
//! 2. 检测编码和版本，决定处理路径（只判断一次）
//! 3. 旧版文本：用检测到的编码重读全文，按 `TITLE` 查找高程点坐标并写出
//! 4. 新版：交给 DXF 对象模型

use std::path::Path;

use encoding_rs::Encoding;
use serde::Serialize;
use tracing::{debug, info, warn};

use dxftool_core::finder::{Constraints, SchemaFinder};
use dxftool_core::schema::{SchemaName, TITLE_FIELD};

use crate::config::{ModernPathMode, ParserConfig};
use crate::detect::{self, DxfPath};
use crate::dxf_io::{DrawingPoint, DxfCrateReader, ObjectModel, ObjectModelReader};
use crate::error::FileError;
use crate::text_io;

/// 默认的高程点名称
pub const DEFAULT_HIGH_POINT_NAME: &str = "punkt wysokościowy";

/// 文件检测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Inspection {
    /// WHATWG 编码名
    pub encoding: &'static str,
    pub version: i32,
    pub path: DxfPath,
}

/// DXF 高程点解析器
pub struct DxfParser<R = DxfCrateReader> {
    finder: SchemaFinder<'static>,
    config: ParserConfig,
    default_encoding: &'static Encoding,
    object_model: R,
}

impl DxfParser {
    pub fn new(config: ParserConfig) -> Result<Self, FileError> {
        Self::with_reader(config, DxfCrateReader)
    }
}

impl<R: ObjectModelReader> DxfParser<R> {
    /// 使用自定义的对象模型读取器
    pub fn with_reader(config: ParserConfig, object_model: R) -> Result<Self, FileError> {
        let default_encoding = config.encoding()?;
        Ok(Self {
            finder: SchemaFinder::default(),
            config,
            default_encoding,
            object_model,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn get_encoding<S: AsRef<str>>(&self, lines: &[S], default: &'static Encoding) -> &'static Encoding {
        detect::get_encoding(&self.finder, lines, default)
    }

    pub fn get_version<S: AsRef<str>>(&self, lines: &[S], default: i32) -> i32 {
        detect::get_version(&self.finder, lines, default)
    }

    /// 在已读入的行中查找高程点，按配置的布局返回输出行
    pub fn parse_lines<S: AsRef<str>>(&self, target: &str, lines: &[S]) -> Result<Vec<String>, FileError> {
        self.render_matches(SchemaName::HighPointAutoCad2000, Some(&title(target)), lines)
    }

    /// 按模式名导出旧版文本中的匹配行，返回写出的行数
    ///
    /// 未知模式名在读取文件之前报错，未知约束字段在写出之前报错，两者都不改动 `output`。
    pub fn export_schema(
        &self,
        schema: &str,
        constraints: Option<&Constraints>,
        input: &Path,
        output: &Path,
    ) -> Result<usize, FileError> {
        let schema: SchemaName = schema.parse()?;
        let (encoding, _) = self.detect(input)?;
        self.export_text(schema, constraints, input, output, encoding)
    }

    /// 只检测编码、版本和处理路径
    pub fn inspect(&self, input: &Path) -> Result<Inspection, FileError> {
        let (encoding, version) = self.detect(input)?;
        Ok(Inspection {
            encoding: encoding.name(),
            version,
            path: DxfPath::for_version(version, self.config.legacy_version_ceiling),
        })
    }

    /// 导出 `input` 中名为 `target` 的高程点到 `output`，返回写出的行数
    pub fn parse(&self, target: &str, input: &Path, output: &Path) -> Result<usize, FileError> {
        let (encoding, version) = self.detect(input)?;

        match DxfPath::for_version(version, self.config.legacy_version_ceiling) {
            DxfPath::LegacyText => self.parse_legacy(target, input, output, encoding),
            DxfPath::ModernObjectModel => self.parse_object_model(target, input, output),
        }
    }

    fn detect(&self, input: &Path) -> Result<(&'static Encoding, i32), FileError> {
        let header = text_io::read_header(input, self.config.header_lines, self.default_encoding)?;
        let encoding = self.get_encoding(&header, self.default_encoding);
        let version = self.get_version(&header, 0);
        debug!(
            "{}: encoding {}, version {}",
            input.display(),
            encoding.name(),
            version
        );
        Ok((encoding, version))
    }

    fn parse_legacy(
        &self,
        target: &str,
        input: &Path,
        output: &Path,
        encoding: &'static Encoding,
    ) -> Result<usize, FileError> {
        let constraints = title(target);
        self.export_text(
            SchemaName::HighPointAutoCad2000,
            Some(&constraints),
            input,
            output,
            encoding,
        )
    }

    fn render_matches<S: AsRef<str>>(
        &self,
        schema: SchemaName,
        constraints: Option<&Constraints>,
        lines: &[S],
    ) -> Result<Vec<String>, FileError> {
        let found = self.finder.find_records(schema, constraints, lines)?;
        Ok(self.config.layout.render(found.into_iter().map(|m| m.values)))
    }

    fn export_text(
        &self,
        schema: SchemaName,
        constraints: Option<&Constraints>,
        input: &Path,
        output: &Path,
        encoding: &'static Encoding,
    ) -> Result<usize, FileError> {
        let lines = text_io::read_lines(input, encoding)?;
        let output_lines = self.render_matches(schema, constraints, &lines)?;
        text_io::write_lines(output, &output_lines)?;

        info!(
            "Exported {} line(s) from {} to {}",
            output_lines.len(),
            input.display(),
            output.display()
        );
        Ok(output_lines.len())
    }

    fn parse_object_model(&self, target: &str, input: &Path, output: &Path) -> Result<usize, FileError> {
        let drawing = match self.object_model.load(input, target)? {
            ObjectModel::Loaded(drawing) => drawing,
            ObjectModel::Unsupported(version) => {
                warn!(
                    "{}: version {} is not supported by the object model, nothing exported",
                    input.display(),
                    version
                );
                return Ok(0);
            }
        };

        if self.config.modern_path == ModernPathMode::Skip {
            debug!(
                "{}: {} text entities, export skipped",
                input.display(),
                drawing.text_count
            );
            return Ok(0);
        }

        let output_lines = self
            .config
            .layout
            .render(drawing.points.iter().map(DrawingPoint::values));
        text_io::write_lines(output, &output_lines)?;

        info!(
            "Exported {} line(s) from {} ({}) to {}",
            output_lines.len(),
            input.display(),
            drawing.version,
            output.display()
        );
        Ok(output_lines.len())
    }
}

fn title(target: &str) -> Constraints {
    Constraints::from([(TITLE_FIELD.to_string(), target.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportLayout;
    use crate::dxf_io::LoadedDrawing;
    use std::fs;

    struct StubReader(ObjectModel);

    impl ObjectModelReader for StubReader {
        fn load(&self, _path: &Path, _layer: &str) -> Result<ObjectModel, FileError> {
            Ok(self.0.clone())
        }
    }

    const MODERN_HEADER: &str = "  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1018\n  0\nENDSEC\n  0\nEOF\n";

    fn loaded() -> ObjectModel {
        ObjectModel::Loaded(LoadedDrawing {
            version: "R2004".to_string(),
            text_count: 3,
            points: vec![
                DrawingPoint { x: 1.0, y: 2.0, z: 3.5 },
                DrawingPoint { x: 4.0, y: 5.0, z: 6.5 },
            ],
        })
    }

    #[test]
    fn test_parse_lines_rows() {
        let config = ParserConfig {
            layout: ExportLayout::Rows,
            ..Default::default()
        };
        let parser = DxfParser::new(config).unwrap();
        let lines = ["  0", "POINT", "  8", "H", " 10", "1", " 20", "2", " 30", "3"];
        assert_eq!(parser.parse_lines("H", &lines).unwrap(), vec!["1;2;3"]);
    }

    #[test]
    fn test_object_model_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.dxf");
        let output = dir.path().join("out.csv");
        fs::write(&input, MODERN_HEADER).unwrap();

        let parser = DxfParser::with_reader(ParserConfig::default(), StubReader(loaded())).unwrap();
        assert_eq!(parser.parse("H", &input, &output).unwrap(), 6);
        assert_eq!(fs::read_to_string(&output).unwrap(), "1\n2\n3.5\n4\n5\n6.5\n");
    }

    #[test]
    fn test_object_model_skip_mode() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.dxf");
        let output = dir.path().join("out.csv");
        fs::write(&input, MODERN_HEADER).unwrap();

        let config = ParserConfig {
            modern_path: ModernPathMode::Skip,
            ..Default::default()
        };
        let parser = DxfParser::with_reader(config, StubReader(loaded())).unwrap();
        assert_eq!(parser.parse("H", &input, &output).unwrap(), 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_object_model_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.dxf");
        let output = dir.path().join("out.csv");
        fs::write(&input, MODERN_HEADER).unwrap();

        let reader = StubReader(ObjectModel::Unsupported("R14".to_string()));
        let parser = DxfParser::with_reader(ParserConfig::default(), reader).unwrap();
        assert_eq!(parser.parse("H", &input, &output).unwrap(), 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_inspect() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.dxf");
        fs::write(&input, MODERN_HEADER).unwrap();

        let parser = DxfParser::new(ParserConfig::default()).unwrap();
        let inspection = parser.inspect(&input).unwrap();
        assert_eq!(inspection.version, 1018);
        assert_eq!(inspection.encoding, "UTF-8");
        assert_eq!(inspection.path, DxfPath::ModernObjectModel);
    }

    #[test]
    fn test_ceiling_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.dxf");
        fs::write(&input, MODERN_HEADER).unwrap();

        let config = ParserConfig {
            legacy_version_ceiling: 1018,
            ..Default::default()
        };
        let parser = DxfParser::new(config).unwrap();
        assert_eq!(parser.inspect(&input).unwrap().path, DxfPath::LegacyText);
    }
}
