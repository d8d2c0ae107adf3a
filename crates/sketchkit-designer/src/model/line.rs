use sketchkit_core::ShapeError;

use super::{clone_failure, mismatch, DesignerShape, Point, ShapeGeometry, ShapeType};
use crate::geometry::is_near_segment;
use crate::render_node::RenderNode;

/// A straight segment between two endpoints.
#[derive(Debug)]
pub struct DesignLine {
    start: Point,
    end: Point,
    node: RenderNode,
}

impl DesignLine {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
            node: RenderNode::new(),
        }
    }

    /// Zero-length line anchored at the press point of a creation drag.
    pub fn start_at(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn set_endpoints(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn try_clone(&self) -> Result<Self, ShapeError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(clone_failure("line endpoint is not finite"));
        }
        Ok(Self {
            start: self.start,
            end: self.end,
            node: self.node.duplicate(),
        })
    }

    pub fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Line {
            x1: self.start.x,
            y1: self.start.y,
            x2: self.end.x,
            y2: self.end.y,
        }
    }

    pub fn set_geometry(&mut self, geometry: &ShapeGeometry) -> Result<(), ShapeError> {
        match geometry {
            ShapeGeometry::Line { x1, y1, x2, y2 } => {
                self.start = Point::new(*x1, *y1);
                self.end = Point::new(*x2, *y2);
                Ok(())
            }
            other => Err(mismatch(ShapeType::Line, other)),
        }
    }
}

impl DesignerShape for DesignLine {
    fn node(&self) -> &RenderNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut RenderNode {
        &mut self.node
    }

    fn on_drag(&mut self, x: f64, y: f64) {
        self.end = Point::new(x, y);
    }

    fn contains_with_tolerance(&self, x: f64, y: f64, tolerance: f64) -> bool {
        let p = self.node.to_local(x, y, self.center());
        is_near_segment(
            p.x,
            p.y,
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            tolerance,
        )
    }

    fn x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    fn y(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    fn width(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }

    fn height(&self) -> f64 {
        (self.end.y - self.start.y).abs()
    }

    fn set_x(&mut self, x: f64) {
        let dx = x - self.x();
        self.start.x += dx;
        self.end.x += dx;
    }

    fn set_y(&mut self, y: f64) {
        let dy = y - self.y();
        self.start.y += dy;
        self.end.y += dy;
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.start.x += dx;
        self.start.y += dy;
        self.end.x += dx;
        self.end.y += dy;
    }
}
