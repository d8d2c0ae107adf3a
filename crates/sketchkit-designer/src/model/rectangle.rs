use sketchkit_core::ShapeError;

use super::{clone_failure, mismatch, DesignerShape, Point, ShapeGeometry, ShapeType};
use crate::render_node::RenderNode;

#[derive(Debug)]
pub struct DesignRectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    /// Press point of the creation drag; the corner opposite the pointer.
    anchor: Point,
    node: RenderNode,
}

impl DesignRectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.abs(),
            height: height.abs(),
            anchor: Point::new(x, y),
            node: RenderNode::new(),
        }
    }

    pub fn start_at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    pub fn try_clone(&self) -> Result<Self, ShapeError> {
        let values = [self.x, self.y, self.width, self.height];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(clone_failure("rectangle geometry is not finite"));
        }
        Ok(Self {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            anchor: Point::new(self.x, self.y),
            node: self.node.duplicate(),
        })
    }

    pub fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Rectangle {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn set_geometry(&mut self, geometry: &ShapeGeometry) -> Result<(), ShapeError> {
        match geometry {
            ShapeGeometry::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                self.x = *x;
                self.y = *y;
                self.width = width.abs();
                self.height = height.abs();
                Ok(())
            }
            other => Err(mismatch(ShapeType::Rectangle, other)),
        }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.abs();
        self.height = height.abs();
    }
}

impl DesignerShape for DesignRectangle {
    fn node(&self) -> &RenderNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut RenderNode {
        &mut self.node
    }

    fn on_drag(&mut self, x: f64, y: f64) {
        self.x = self.anchor.x.min(x);
        self.y = self.anchor.y.min(y);
        self.width = (x - self.anchor.x).abs();
        self.height = (y - self.anchor.y).abs();
    }

    fn contains_with_tolerance(&self, x: f64, y: f64, _tolerance: f64) -> bool {
        let p = self.node.to_local(x, y, self.center());
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_x(&mut self, x: f64) {
        self.anchor.x += x - self.x;
        self.x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.anchor.y += y - self.y;
        self.y = y;
    }
}
