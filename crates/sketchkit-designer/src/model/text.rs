use std::fmt;
use std::sync::Arc;

use sketchkit_core::{Rgba, ShapeError};

use super::{clone_failure, mismatch, DesignerShape, Point, ShapeGeometry, ShapeType};
use crate::render_node::RenderNode;

/// Laid-out size of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Text layout collaborator. The renderer normally provides one backed by
/// real font metrics.
pub trait TextMeasure: fmt::Debug + Send + Sync {
    fn measure(&self, text: &str, font_size: f64) -> TextExtent;
}

/// Metric-free estimate: fixed advance per character and fixed line height.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedTextMeasure {
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for EstimatedTextMeasure {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasure for EstimatedTextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> TextExtent {
        if text.is_empty() {
            return TextExtent {
                width: 0.0,
                height: 0.0,
            };
        }
        let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = text.lines().count().max(1);
        TextExtent {
            width: longest as f64 * font_size * self.advance_ratio,
            height: lines as f64 * font_size * self.line_height_ratio,
        }
    }
}

/// A text label anchored at the top-left of its layout box.
///
/// The text color is the node's fill paint.
#[derive(Debug)]
pub struct DesignText {
    anchor: Point,
    text: String,
    font_size: f64,
    measure: Arc<dyn TextMeasure>,
    node: RenderNode,
}

impl DesignText {
    pub fn new(x: f64, y: f64, text: impl Into<String>, font_size: f64) -> Self {
        Self::with_measure(x, y, text, font_size, Arc::new(EstimatedTextMeasure::default()))
    }

    pub fn with_measure(
        x: f64,
        y: f64,
        text: impl Into<String>,
        font_size: f64,
        measure: Arc<dyn TextMeasure>,
    ) -> Self {
        let mut node = RenderNode::new();
        node.set_fill(Some(Rgba::BLACK));
        Self {
            anchor: Point::new(x, y),
            text: text.into(),
            font_size,
            measure,
            node,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    pub fn color(&self) -> Option<Rgba> {
        self.node.fill()
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.node.set_fill(Some(color));
    }

    fn extent(&self) -> TextExtent {
        self.measure.measure(&self.text, self.font_size)
    }

    pub fn try_clone(&self) -> Result<Self, ShapeError> {
        if !self.anchor.is_finite() {
            return Err(clone_failure("text anchor is not finite"));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(clone_failure(format!(
                "text font size {} is not usable",
                self.font_size
            )));
        }
        Ok(Self {
            anchor: self.anchor,
            text: self.text.clone(),
            font_size: self.font_size,
            measure: Arc::clone(&self.measure),
            node: self.node.duplicate(),
        })
    }

    pub fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Text {
            x: self.anchor.x,
            y: self.anchor.y,
            font_size: self.font_size,
        }
    }

    pub fn set_geometry(&mut self, geometry: &ShapeGeometry) -> Result<(), ShapeError> {
        match geometry {
            ShapeGeometry::Text { x, y, font_size } => {
                self.anchor = Point::new(*x, *y);
                self.font_size = *font_size;
                Ok(())
            }
            other => Err(mismatch(ShapeType::Text, other)),
        }
    }
}

impl DesignerShape for DesignText {
    fn node(&self) -> &RenderNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut RenderNode {
        &mut self.node
    }

    // Text is placed with a click; there is no drag sizing.
    fn on_drag(&mut self, _x: f64, _y: f64) {}

    fn contains_with_tolerance(&self, x: f64, y: f64, _tolerance: f64) -> bool {
        let p = self.node.to_local(x, y, self.center());
        self.bounds().contains(p.x, p.y)
    }

    fn x(&self) -> f64 {
        self.anchor.x
    }

    fn y(&self) -> f64 {
        self.anchor.y
    }

    fn width(&self) -> f64 {
        self.extent().width
    }

    fn height(&self) -> f64 {
        self.extent().height
    }

    fn set_x(&mut self, x: f64) {
        self.anchor.x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.anchor.y = y;
    }
}
