//! Render node handles.
//!
//! Every shape exclusively owns one [`RenderNode`]. The node carries the
//! visual state an external renderer needs (paint, transform, highlight)
//! and provides the native hit-test mapping from canvas space into the
//! shape's untransformed frame.

use std::fmt;

use serde::{Deserialize, Serialize};
use sketchkit_core::Rgba;
use uuid::Uuid;

use crate::model::Point;

/// Identity of a render node, and therefore of the shape that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scale factors smaller than this are treated as collapsed in [`RenderNode::to_local`].
const MIN_SCALE: f64 = 1e-12;

/// Visual state of one shape.
///
/// Transform components are applied about a pivot supplied by the owning
/// shape (its geometric center): scale first, then rotation, then
/// translation. Not `Clone`: a copy must go through [`RenderNode::duplicate`]
/// so that it receives a fresh identity.
#[derive(Debug)]
pub struct RenderNode {
    id: NodeId,
    stroke: Option<Rgba>,
    fill: Option<Rgba>,
    stroke_width: f64,
    dash_array: Vec<f64>,
    /// Rotation in degrees.
    rotation: f64,
    scale_x: f64,
    scale_y: f64,
    translate_x: f64,
    translate_y: f64,
    highlighted: bool,
}

impl RenderNode {
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            stroke: None,
            fill: None,
            stroke_width: 1.0,
            dash_array: Vec::new(),
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            highlighted: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn stroke(&self) -> Option<Rgba> {
        self.stroke
    }

    pub fn set_stroke(&mut self, color: Option<Rgba>) {
        self.stroke = color;
    }

    pub fn fill(&self) -> Option<Rgba> {
        self.fill
    }

    pub fn set_fill(&mut self, color: Option<Rgba>) {
        self.fill = color;
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width.max(0.0);
    }

    pub fn dash_array(&self) -> &[f64] {
        &self.dash_array
    }

    pub fn set_dash_array(&mut self, dashes: Vec<f64>) {
        self.dash_array = dashes;
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.scale_x = sx;
        self.scale_y = sy;
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.translate_x, self.translate_y)
    }

    pub fn set_translation(&mut self, tx: f64, ty: f64) {
        self.translate_x = tx;
        self.translate_y = ty;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Selection indicator read by the renderer.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn has_transform(&self) -> bool {
        self.rotation != 0.0
            || self.scale_x != 1.0
            || self.scale_y != 1.0
            || self.translate_x != 0.0
            || self.translate_y != 0.0
    }

    /// Maps a canvas point into the shape's untransformed frame.
    ///
    /// Inverts translation, then rotation, then scale, all about `pivot`.
    pub fn to_local(&self, x: f64, y: f64, pivot: Point) -> Point {
        if !self.has_transform() {
            return Point::new(x, y);
        }

        let mut dx = x - self.translate_x - pivot.x;
        let mut dy = y - self.translate_y - pivot.y;

        if self.rotation != 0.0 {
            let (sin, cos) = (-self.rotation.to_radians()).sin_cos();
            let rx = dx * cos - dy * sin;
            let ry = dx * sin + dy * cos;
            dx = rx;
            dy = ry;
        }

        dx = if self.scale_x.abs() < MIN_SCALE { 0.0 } else { dx / self.scale_x };
        dy = if self.scale_y.abs() < MIN_SCALE { 0.0 } else { dy / self.scale_y };

        Point::new(pivot.x + dx, pivot.y + dy)
    }

    /// Maps a point in the shape's untransformed frame onto the canvas.
    pub fn to_canvas(&self, x: f64, y: f64, pivot: Point) -> Point {
        if !self.has_transform() {
            return Point::new(x, y);
        }

        let mut dx = (x - pivot.x) * self.scale_x;
        let mut dy = (y - pivot.y) * self.scale_y;

        if self.rotation != 0.0 {
            let (sin, cos) = self.rotation.to_radians().sin_cos();
            let rx = dx * cos - dy * sin;
            let ry = dx * sin + dy * cos;
            dx = rx;
            dy = ry;
        }

        Point::new(
            pivot.x + dx + self.translate_x,
            pivot.y + dy + self.translate_y,
        )
    }

    /// A new node with fresh identity carrying the same paint, rotation and
    /// scale. Translation is reset and the highlight is not copied.
    pub fn duplicate(&self) -> RenderNode {
        RenderNode {
            id: NodeId::new(),
            stroke: self.stroke,
            fill: self.fill,
            stroke_width: self.stroke_width,
            dash_array: self.dash_array.clone(),
            rotation: self.rotation,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            translate_x: 0.0,
            translate_y: 0.0,
            highlighted: false,
        }
    }
}

impl Default for RenderNode {
    fn default() -> Self {
        Self::new()
    }
}
