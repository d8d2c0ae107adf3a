//! Serialization and deserialization for drawing files.
//!
//! Shapes are flattened into [`ShapeData`] records, wrapped in a versioned
//! [`DrawingFile`] and written as JSON through a [`ByteChannel`]. Loading
//! rebuilds each record into a base shape wrapped in stroke and fill
//! decorators. Records that cannot be rebuilt are skipped and reported in
//! the [`LoadReport`] rather than aborting the whole load.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sketchkit_core::{PersistenceError, Rgba, ShapeError};
use tracing::{debug, info, warn};

use crate::decorator::{PaintTarget, StyledShape};
use crate::geometry::{format_flat_coords, parse_flat_coords, points_from_flat};
use crate::model::{
    DesignEllipse, DesignLine, DesignPolygon, DesignRectangle, DesignText, DesignerShape,
    EstimatedTextMeasure, Shape, ShapeType, TextMeasure,
};

/// Drawing file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete drawing file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingFile {
    pub version: String,
    pub metadata: DrawingMetadata,
    pub shapes: Vec<ShapeData>,
}

/// Drawing metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

/// Serialized shape record.
///
/// Geometry is `x, y, width, height`:
/// - rectangle, ellipse, polygon: bounding box
/// - line: start point and signed delta to the end point
/// - text: anchor and measured extent
///
/// `text` carries the label for text records and the comma-joined flat
/// vertex list for polygon records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    pub shape_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    pub stroke: [f64; 4],
    pub fill: [f64; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl ShapeData {
    /// Flattens a shape. Paint is read live from the render node; a missing
    /// stroke is recorded as black and a missing fill as transparent.
    pub fn from_shape(shape: &StyledShape) -> Self {
        let stroke = shape.paint(PaintTarget::Stroke).unwrap_or(Rgba::BLACK);
        let fill = shape.paint(PaintTarget::Fill).unwrap_or(Rgba::TRANSPARENT);
        let base = shape.base();

        let mut record = ShapeData {
            shape_type: base.shape_type().tag().to_string(),
            x: base.x(),
            y: base.y(),
            width: base.width(),
            height: base.height(),
            rotation: base.rotation(),
            stroke: stroke.to_array(),
            fill: fill.to_array(),
            text: None,
            font_size: None,
        };

        match base {
            Shape::Line(line) => {
                let (start, end) = (line.start(), line.end());
                record.x = start.x;
                record.y = start.y;
                record.width = end.x - start.x;
                record.height = end.y - start.y;
            }
            Shape::Text(text) => {
                record.text = Some(text.text().to_string());
                record.font_size = Some(text.font_size());
            }
            Shape::Polygon(poly) => {
                record.text = Some(format_flat_coords(poly.points()));
            }
            Shape::Rectangle(_) | Shape::Ellipse(_) => {}
        }
        record
    }

    /// Rebuilds the shape with the default text measure.
    pub fn to_shape(&self) -> Result<StyledShape, PersistenceError> {
        self.to_shape_with(Arc::new(EstimatedTextMeasure::default()))
    }

    /// Rebuilds the base shape, applies rotation, and wraps it in a stroke
    /// decorator and then a fill decorator.
    pub fn to_shape_with(
        &self,
        measure: Arc<dyn TextMeasure>,
    ) -> Result<StyledShape, PersistenceError> {
        let shape_type: ShapeType =
            self.shape_type
                .parse()
                .map_err(|tag| PersistenceError::UnsupportedShapeType { tag })?;

        let values = [self.x, self.y, self.width, self.height, self.rotation];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ShapeError::InvalidGeometry {
                reason: format!("non-finite geometry in {} record", shape_type),
            }
            .into());
        }

        check_color("stroke", &self.stroke)?;
        check_color("fill", &self.fill)?;

        let mut base = match shape_type {
            ShapeType::Line => Shape::Line(DesignLine::new(
                self.x,
                self.y,
                self.x + self.width,
                self.y + self.height,
            )),
            ShapeType::Rectangle => {
                Shape::Rectangle(DesignRectangle::new(self.x, self.y, self.width, self.height))
            }
            ShapeType::Ellipse => {
                Shape::Ellipse(DesignEllipse::from_bounds(self.x, self.y, self.width, self.height))
            }
            ShapeType::Text => {
                let font_size = self.font_size.unwrap_or(crate::DEFAULT_FONT_SIZE);
                if !(font_size.is_finite() && font_size > 0.0) {
                    return Err(ShapeError::InvalidGeometry {
                        reason: format!("font size {} is not usable", font_size),
                    }
                    .into());
                }
                Shape::Text(DesignText::with_measure(
                    self.x,
                    self.y,
                    self.text.clone().unwrap_or_default(),
                    font_size,
                    measure,
                ))
            }
            ShapeType::Polygon => Shape::Polygon(self.polygon()?),
        };
        base.set_rotation(self.rotation);

        Ok(StyledShape::decorate(
            base,
            Rgba::from_array(self.stroke),
            Rgba::from_array(self.fill),
        ))
    }

    fn polygon(&self) -> Result<DesignPolygon, PersistenceError> {
        let payload = self
            .text
            .as_deref()
            .ok_or_else(|| PersistenceError::MalformedPolygonData {
                reason: "missing vertex list".to_string(),
            })?;
        let coords =
            parse_flat_coords(payload).ok_or_else(|| PersistenceError::MalformedPolygonData {
                reason: format!("non-numeric vertex list '{}'", payload),
            })?;
        if coords.len() % 2 != 0 {
            return Err(PersistenceError::MalformedPolygonData {
                reason: format!("odd coordinate count {}", coords.len()),
            });
        }
        if coords.len() < 4 {
            return Err(PersistenceError::MalformedPolygonData {
                reason: format!("need at least 2 vertices, found {}", coords.len() / 2),
            });
        }
        Ok(DesignPolygon::from_points(points_from_flat(&coords)))
    }

    /// True when both records carry identical geometry, payload and paint.
    fn same_shape(&self, other: &ShapeData) -> bool {
        self.shape_type == other.shape_type
            && self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
            && self.rotation == other.rotation
            && self.stroke == other.stroke
            && self.fill == other.fill
            && self.text == other.text
            && self.font_size == other.font_size
    }
}

fn check_color(channel: &str, values: &[f64; 4]) -> Result<(), PersistenceError> {
    match values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
        Some(v) => Err(PersistenceError::InvalidColor {
            reason: format!("{} component {} is outside 0..=1", channel, v),
        }),
        None => Ok(()),
    }
}

/// A record that could not be rebuilt.
#[derive(Debug)]
pub struct LoadIssue {
    /// Position of the record in the file.
    pub index: usize,
    pub shape_type: String,
    pub error: PersistenceError,
}

/// Result of rebuilding a drawing: the shapes that succeeded, in file
/// order, and the records that were skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub shapes: Vec<StyledShape>,
    pub errors: Vec<LoadIssue>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Per-type shape counts for a drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileSummary {
    pub name: String,
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
}

impl std::fmt::Display for FileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} shape(s)", self.name, self.total)?;
        for (tag, count) in &self.by_type {
            write!(f, ", {} {}", count, tag)?;
        }
        Ok(())
    }
}

impl DrawingFile {
    /// Create a new empty drawing file
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DrawingMetadata {
                name: name.to_string(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            shapes: Vec::new(),
        }
    }

    /// Builds a drawing from live shapes in z-order, writing each distinct
    /// shape once.
    pub fn from_shapes<'a>(name: &str, shapes: impl IntoIterator<Item = &'a StyledShape>) -> Self {
        let mut file = Self::new(name);
        for shape in shapes {
            let record = ShapeData::from_shape(shape);
            if file.shapes.iter().any(|r| r.same_shape(&record)) {
                warn!("Skipping duplicate {} at ({}, {})", record.shape_type, record.x, record.y);
                continue;
            }
            file.shapes.push(record);
        }
        file
    }

    /// Serializes to pretty-printed JSON, stamping the modification time.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, PersistenceError> {
        self.metadata.modified = Utc::now();
        serde_json::to_vec_pretty(self).map_err(|e| PersistenceError::MalformedPayload {
            reason: e.to_string(),
        })
    }

    /// Parses a drawing, rejecting incompatible major versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let file: DrawingFile =
            serde_json::from_slice(bytes).map_err(|e| PersistenceError::MalformedPayload {
                reason: e.to_string(),
            })?;

        let major = file.version.split('.').next().unwrap_or_default();
        let supported = FILE_FORMAT_VERSION.split('.').next().unwrap_or_default();
        if major != supported {
            return Err(PersistenceError::UnsupportedVersion {
                version: file.version,
            });
        }
        Ok(file)
    }

    /// Rebuilds every record with the default text measure.
    pub fn rebuild(&self) -> LoadReport {
        self.rebuild_with(Arc::new(EstimatedTextMeasure::default()))
    }

    /// Rebuilds every record, skipping and reporting the ones that fail.
    pub fn rebuild_with(&self, measure: Arc<dyn TextMeasure>) -> LoadReport {
        let mut report = LoadReport::default();
        for (index, record) in self.shapes.iter().enumerate() {
            match record.to_shape_with(Arc::clone(&measure)) {
                Ok(shape) => report.shapes.push(shape),
                Err(error) => {
                    warn!("Skipping record {} ({}): {}", index, record.shape_type, error);
                    report.errors.push(LoadIssue {
                        index,
                        shape_type: record.shape_type.clone(),
                        error,
                    });
                }
            }
        }
        report
    }

    pub fn summarize(&self) -> FileSummary {
        let mut by_type = BTreeMap::new();
        for record in &self.shapes {
            *by_type.entry(record.shape_type.clone()).or_insert(0) += 1;
        }
        FileSummary {
            name: self.metadata.name.clone(),
            total: self.shapes.len(),
            by_type,
        }
    }
}

/// Blocking byte persistence.
pub trait ByteChannel {
    fn write(&mut self, bytes: &[u8], destination: &Path) -> Result<(), PersistenceError>;
    fn read(&mut self, source: &Path) -> Result<Vec<u8>, PersistenceError>;
}

/// Byte channel over the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileChannel;

impl ByteChannel for FileChannel {
    fn write(&mut self, bytes: &[u8], destination: &Path) -> Result<(), PersistenceError> {
        std::fs::write(destination, bytes)?;
        Ok(())
    }

    fn read(&mut self, source: &Path) -> Result<Vec<u8>, PersistenceError> {
        Ok(std::fs::read(source)?)
    }
}

/// In-memory byte channel keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }
}

impl ByteChannel for MemoryChannel {
    fn write(&mut self, bytes: &[u8], destination: &Path) -> Result<(), PersistenceError> {
        self.files.insert(destination.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn read(&mut self, source: &Path) -> Result<Vec<u8>, PersistenceError> {
        self.files.get(source).cloned().ok_or_else(|| {
            PersistenceError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", source.display()),
            ))
        })
    }
}

/// Writes `shapes` as a drawing named `name`. Returns the number of records written.
pub fn save_shapes<'a>(
    channel: &mut dyn ByteChannel,
    destination: &Path,
    name: &str,
    shapes: impl IntoIterator<Item = &'a StyledShape>,
) -> Result<usize, PersistenceError> {
    let mut file = DrawingFile::from_shapes(name, shapes);
    let bytes = file.to_bytes()?;
    channel.write(&bytes, destination)?;
    info!("Saved {} shape(s) to {}", file.shapes.len(), destination.display());
    Ok(file.shapes.len())
}

/// Reads and rebuilds a drawing. The file itself must parse; individual
/// records that fail are reported in the returned [`LoadReport`].
pub fn load_shapes(
    channel: &mut dyn ByteChannel,
    source: &Path,
    measure: Arc<dyn TextMeasure>,
) -> Result<(DrawingFile, LoadReport), PersistenceError> {
    let bytes = channel.read(source)?;
    let file = DrawingFile::from_bytes(&bytes)?;
    let report = file.rebuild_with(measure);
    debug!(
        "Loaded {} of {} shape(s) from {}",
        report.shapes.len(),
        file.shapes.len(),
        source.display()
    );
    Ok((file, report))
}
