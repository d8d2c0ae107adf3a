use std::sync::Arc;

use super::{
    DesignEllipse, DesignLine, DesignPolygon, DesignRectangle, DesignText, EstimatedTextMeasure,
    Shape, TextMeasure,
};

/// Active creation tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingTool {
    #[default]
    Select,
    Line,
    Rectangle,
    Ellipse,
    Text,
    Polygon,
}

impl DrawingTool {
    /// Maps a toolbar index to a tool; unknown indices select.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => DrawingTool::Line,
            2 => DrawingTool::Rectangle,
            3 => DrawingTool::Ellipse,
            4 => DrawingTool::Text,
            5 => DrawingTool::Polygon,
            _ => DrawingTool::Select,
        }
    }

    /// Tools whose shape is sized by a press-drag-release gesture.
    pub fn is_drag_tool(&self) -> bool {
        matches!(
            self,
            DrawingTool::Line | DrawingTool::Rectangle | DrawingTool::Ellipse
        )
    }
}

/// Creates base shapes at the pointer-down location.
#[derive(Debug, Clone)]
pub struct ShapeFactory {
    pub default_text: String,
    pub default_font_size: f64,
    measure: Arc<dyn TextMeasure>,
}

impl ShapeFactory {
    pub fn new(default_text: impl Into<String>, default_font_size: f64) -> Self {
        Self {
            default_text: default_text.into(),
            default_font_size,
            measure: Arc::new(EstimatedTextMeasure::default()),
        }
    }

    pub fn with_measure(mut self, measure: Arc<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn measure(&self) -> Arc<dyn TextMeasure> {
        Arc::clone(&self.measure)
    }

    /// A new zero-size shape for `tool` at `(x, y)`. `Select` creates nothing.
    pub fn create(&self, tool: DrawingTool, x: f64, y: f64) -> Option<Shape> {
        let shape = match tool {
            DrawingTool::Select => return None,
            DrawingTool::Line => Shape::Line(DesignLine::start_at(x, y)),
            DrawingTool::Rectangle => Shape::Rectangle(DesignRectangle::start_at(x, y)),
            DrawingTool::Ellipse => Shape::Ellipse(DesignEllipse::start_at(x, y)),
            DrawingTool::Text => Shape::Text(self.text(x, y, self.default_text.clone())),
            DrawingTool::Polygon => {
                let mut poly = DesignPolygon::new();
                poly.add_point(x, y);
                Shape::Polygon(poly)
            }
        };
        Some(shape)
    }

    pub fn text(&self, x: f64, y: f64, text: impl Into<String>) -> DesignText {
        DesignText::with_measure(x, y, text, self.default_font_size, self.measure())
    }
}

impl Default for ShapeFactory {
    fn default() -> Self {
        Self::new("Text", crate::DEFAULT_FONT_SIZE)
    }
}
