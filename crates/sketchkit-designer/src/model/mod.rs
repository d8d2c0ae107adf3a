use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sketchkit_core::ShapeError;

use crate::geometry::Bounds;
use crate::render_node::{NodeId, RenderNode};

mod ellipse;
mod factory;
mod line;
mod polygon;
mod rectangle;
mod text;

pub use ellipse::DesignEllipse;
pub use factory::{DrawingTool, ShapeFactory};
pub use line::DesignLine;
pub use polygon::DesignPolygon;
pub use rectangle::DesignRectangle;
pub use text::{DesignText, EstimatedTextMeasure, TextExtent, TextMeasure};

/// Hit tolerance used by [`DesignerShape::contains`].
pub const DEFAULT_HIT_TOLERANCE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Capability interface shared by every shape variant and by the style
/// decorators that wrap them.
///
/// Position accessors report canonical geometry. Transforms held on the
/// render node (rotation, mirror scale) do not change `x`/`y`/`width`/`height`.
pub trait DesignerShape {
    fn node(&self) -> &RenderNode;
    fn node_mut(&mut self) -> &mut RenderNode;

    /// Interactive resize while the shape is being created.
    fn on_drag(&mut self, x: f64, y: f64);

    /// End of the creation gesture.
    fn on_release(&mut self) {}

    fn contains_with_tolerance(&self, x: f64, y: f64, tolerance: f64) -> bool;

    fn contains(&self, x: f64, y: f64) -> bool {
        self.contains_with_tolerance(x, y, DEFAULT_HIT_TOLERANCE)
    }

    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Moves the shape so that `x()` becomes `x`. Never resizes.
    fn set_x(&mut self, x: f64);

    /// Moves the shape so that `y()` becomes `y`. Never resizes.
    fn set_y(&mut self, y: f64);

    fn rotation(&self) -> f64 {
        self.node().rotation()
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.node_mut().set_rotation(degrees);
    }

    fn id(&self) -> NodeId {
        self.node().id()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let (x, y) = (self.x(), self.y());
        self.set_x(x + dx);
        self.set_y(y + dy);
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.x(), self.y(), self.width(), self.height())
    }

    fn center(&self) -> Point {
        self.bounds().center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Line,
    Rectangle,
    Ellipse,
    Text,
    Polygon,
}

impl ShapeType {
    pub const ALL: [ShapeType; 5] = [
        ShapeType::Line,
        ShapeType::Rectangle,
        ShapeType::Ellipse,
        ShapeType::Text,
        ShapeType::Polygon,
    ];

    /// Tag used in persisted records.
    pub fn tag(&self) -> &'static str {
        match self {
            ShapeType::Line => "line",
            ShapeType::Rectangle => "rectangle",
            ShapeType::Ellipse => "ellipse",
            ShapeType::Text => "text",
            ShapeType::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for ShapeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeType::ALL
            .into_iter()
            .find(|t| t.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Snapshot of a shape's canonical geometry, used by resize commands to
/// capture and restore exact state.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Text { x: f64, y: f64, font_size: f64 },
    Polygon { points: Vec<Point> },
}

impl ShapeGeometry {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeGeometry::Line { .. } => ShapeType::Line,
            ShapeGeometry::Rectangle { .. } => ShapeType::Rectangle,
            ShapeGeometry::Ellipse { .. } => ShapeType::Ellipse,
            ShapeGeometry::Text { .. } => ShapeType::Text,
            ShapeGeometry::Polygon { .. } => ShapeType::Polygon,
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> ShapeGeometry {
        match self {
            ShapeGeometry::Line { x1, y1, x2, y2 } => ShapeGeometry::Line {
                x1: x1 + dx,
                y1: y1 + dy,
                x2: x2 + dx,
                y2: y2 + dy,
            },
            ShapeGeometry::Rectangle { x, y, width, height } => ShapeGeometry::Rectangle {
                x: x + dx,
                y: y + dy,
                width: *width,
                height: *height,
            },
            ShapeGeometry::Ellipse { cx, cy, rx, ry } => ShapeGeometry::Ellipse {
                cx: cx + dx,
                cy: cy + dy,
                rx: *rx,
                ry: *ry,
            },
            ShapeGeometry::Text { x, y, font_size } => ShapeGeometry::Text {
                x: x + dx,
                y: y + dy,
                font_size: *font_size,
            },
            ShapeGeometry::Polygon { points } => ShapeGeometry::Polygon {
                points: points.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect(),
            },
        }
    }

    /// Uniformly scales the geometry about its own center. Text scales its
    /// font size and keeps its anchor.
    pub fn scaled(&self, factor: f64) -> ShapeGeometry {
        match self {
            ShapeGeometry::Line { x1, y1, x2, y2 } => {
                let (cx, cy) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
                ShapeGeometry::Line {
                    x1: cx + (x1 - cx) * factor,
                    y1: cy + (y1 - cy) * factor,
                    x2: cx + (x2 - cx) * factor,
                    y2: cy + (y2 - cy) * factor,
                }
            }
            ShapeGeometry::Rectangle { x, y, width, height } => {
                let (w, h) = (width * factor, height * factor);
                ShapeGeometry::Rectangle {
                    x: x + (width - w) / 2.0,
                    y: y + (height - h) / 2.0,
                    width: w,
                    height: h,
                }
            }
            ShapeGeometry::Ellipse { cx, cy, rx, ry } => ShapeGeometry::Ellipse {
                cx: *cx,
                cy: *cy,
                rx: rx * factor,
                ry: ry * factor,
            },
            ShapeGeometry::Text { x, y, font_size } => ShapeGeometry::Text {
                x: *x,
                y: *y,
                font_size: font_size * factor,
            },
            ShapeGeometry::Polygon { points } => {
                let c = crate::geometry::centroid(points);
                ShapeGeometry::Polygon {
                    points: points
                        .iter()
                        .map(|p| Point::new(c.x + (p.x - c.x) * factor, c.y + (p.y - c.y) * factor))
                        .collect(),
                }
            }
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            ShapeGeometry::Line { x1, y1, x2, y2 } => [x1, y1, x2, y2].iter().all(|v| v.is_finite()),
            ShapeGeometry::Rectangle { x, y, width, height } => {
                [x, y, width, height].iter().all(|v| v.is_finite())
            }
            ShapeGeometry::Ellipse { cx, cy, rx, ry } => [cx, cy, rx, ry].iter().all(|v| v.is_finite()),
            ShapeGeometry::Text { x, y, font_size } => [x, y, font_size].iter().all(|v| v.is_finite()),
            ShapeGeometry::Polygon { points } => points.iter().all(Point::is_finite),
        }
    }
}

pub(crate) fn mismatch(expected: ShapeType, found: &ShapeGeometry) -> ShapeError {
    ShapeError::GeometryMismatch {
        expected: expected.to_string(),
        found: found.shape_type().to_string(),
    }
}

pub(crate) fn clone_failure(reason: impl Into<String>) -> ShapeError {
    ShapeError::CloneFailure {
        reason: reason.into(),
    }
}

#[derive(Debug)]
pub enum Shape {
    Line(DesignLine),
    Rectangle(DesignRectangle),
    Ellipse(DesignEllipse),
    Text(DesignText),
    Polygon(DesignPolygon),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Line(_) => ShapeType::Line,
            Shape::Rectangle(_) => ShapeType::Rectangle,
            Shape::Ellipse(_) => ShapeType::Ellipse,
            Shape::Text(_) => ShapeType::Text,
            Shape::Polygon(_) => ShapeType::Polygon,
        }
    }

    /// Deep copy with a fresh render node.
    pub fn try_clone(&self) -> Result<Shape, ShapeError> {
        Ok(match self {
            Shape::Line(s) => Shape::Line(s.try_clone()?),
            Shape::Rectangle(s) => Shape::Rectangle(s.try_clone()?),
            Shape::Ellipse(s) => Shape::Ellipse(s.try_clone()?),
            Shape::Text(s) => Shape::Text(s.try_clone()?),
            Shape::Polygon(s) => Shape::Polygon(s.try_clone()?),
        })
    }

    pub fn geometry(&self) -> ShapeGeometry {
        match self {
            Shape::Line(s) => s.geometry(),
            Shape::Rectangle(s) => s.geometry(),
            Shape::Ellipse(s) => s.geometry(),
            Shape::Text(s) => s.geometry(),
            Shape::Polygon(s) => s.geometry(),
        }
    }

    pub fn set_geometry(&mut self, geometry: &ShapeGeometry) -> Result<(), ShapeError> {
        if !geometry.is_finite() {
            return Err(ShapeError::InvalidGeometry {
                reason: format!("non-finite {} geometry", geometry.shape_type()),
            });
        }
        match self {
            Shape::Line(s) => s.set_geometry(geometry),
            Shape::Rectangle(s) => s.set_geometry(geometry),
            Shape::Ellipse(s) => s.set_geometry(geometry),
            Shape::Text(s) => s.set_geometry(geometry),
            Shape::Polygon(s) => s.set_geometry(geometry),
        }
    }

    /// True when the shape has no visible extent and should not be committed.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Shape::Line(s) => s.width() == 0.0 && s.height() == 0.0,
            Shape::Rectangle(s) => s.width() == 0.0 || s.height() == 0.0,
            Shape::Ellipse(s) => s.width() == 0.0 || s.height() == 0.0,
            Shape::Text(s) => s.text().is_empty(),
            Shape::Polygon(s) => !s.can_close(),
        }
    }

    pub fn as_polygon(&self) -> Option<&DesignPolygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&DesignText> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $s:ident => $body:expr) => {
        match $self {
            Shape::Line($s) => $body,
            Shape::Rectangle($s) => $body,
            Shape::Ellipse($s) => $body,
            Shape::Text($s) => $body,
            Shape::Polygon($s) => $body,
        }
    };
}

impl DesignerShape for Shape {
    fn node(&self) -> &RenderNode {
        dispatch!(self, s => s.node())
    }

    fn node_mut(&mut self) -> &mut RenderNode {
        dispatch!(self, s => s.node_mut())
    }

    fn on_drag(&mut self, x: f64, y: f64) {
        dispatch!(self, s => s.on_drag(x, y))
    }

    fn on_release(&mut self) {
        dispatch!(self, s => s.on_release())
    }

    fn contains_with_tolerance(&self, x: f64, y: f64, tolerance: f64) -> bool {
        dispatch!(self, s => s.contains_with_tolerance(x, y, tolerance))
    }

    fn x(&self) -> f64 {
        dispatch!(self, s => s.x())
    }

    fn y(&self) -> f64 {
        dispatch!(self, s => s.y())
    }

    fn width(&self) -> f64 {
        dispatch!(self, s => s.width())
    }

    fn height(&self) -> f64 {
        dispatch!(self, s => s.height())
    }

    fn set_x(&mut self, x: f64) {
        dispatch!(self, s => s.set_x(x))
    }

    fn set_y(&mut self, y: f64) {
        dispatch!(self, s => s.set_y(y))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        dispatch!(self, s => s.translate(dx, dy))
    }
}
