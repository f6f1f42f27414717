//! 基于 DXF 对象模型的读取
//!
//! AutoCAD 2000 及以上版本交给 `dxf` crate 完整解析，按图层收集高程点位置。
//! 更老的版本对象模型不支持，返回 [`ObjectModel::Unsupported`]。

use std::path::Path;

use dxf::entities::{Entity, EntityType};
use dxf::enums::AcadVersion;

use crate::error::FileError;

/// 对象模型中的一个点位
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl DrawingPoint {
    fn from_dxf(point: &dxf::Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }

    /// X, Y, Z 的文本形式
    pub fn values(&self) -> Vec<String> {
        vec![self.x.to_string(), self.y.to_string(), self.z.to_string()]
    }
}

/// 已加载的图纸摘要
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedDrawing {
    /// 文件头中的版本（如 `R2010`）
    pub version: String,
    /// TEXT/MTEXT 实体数量
    pub text_count: usize,
    /// 目标图层上的点位，按实体顺序
    pub points: Vec<DrawingPoint>,
}

/// 对象模型读取结果
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectModel {
    /// 文件版本低于对象模型支持的下限
    Unsupported(String),
    Loaded(LoadedDrawing),
}

/// DXF 对象模型读取能力
pub trait ObjectModelReader: Send + Sync {
    /// 加载文件并收集 `layer` 图层上的点位
    fn load(&self, path: &Path, layer: &str) -> Result<ObjectModel, FileError>;
}

/// 使用 `dxf` crate 的实现
#[derive(Debug, Clone, Copy, Default)]
pub struct DxfCrateReader;

impl ObjectModelReader for DxfCrateReader {
    fn load(&self, path: &Path, layer: &str) -> Result<ObjectModel, FileError> {
        let drawing = dxf::Drawing::load_file(path).map_err(|e| FileError::Dxf(e.to_string()))?;

        let version = drawing.header.version;
        if version < AcadVersion::R2000 {
            return Ok(ObjectModel::Unsupported(format!("{:?}", version)));
        }

        let mut loaded = LoadedDrawing {
            version: format!("{:?}", version),
            ..Default::default()
        };

        for entity in drawing.entities() {
            if matches!(entity.specific, EntityType::Text(_) | EntityType::MText(_)) {
                loaded.text_count += 1;
            }
            if entity.common.layer != layer {
                continue;
            }
            if let Some(point) = entity_location(entity) {
                loaded.points.push(point);
            }
        }

        Ok(ObjectModel::Loaded(loaded))
    }
}

/// 实体的定位点
fn entity_location(entity: &Entity) -> Option<DrawingPoint> {
    let point = match &entity.specific {
        EntityType::ModelPoint(point) => &point.location,
        EntityType::Insert(insert) => &insert.location,
        EntityType::Text(text) => &text.location,
        EntityType::MText(mtext) => &mtext.insertion_point,
        EntityType::Circle(circle) => &circle.center,
        _ => return None,
    };
    Some(DrawingPoint::from_dxf(point))
}
