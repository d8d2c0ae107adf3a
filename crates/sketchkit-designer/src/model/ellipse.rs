use sketchkit_core::ShapeError;

use super::{clone_failure, mismatch, DesignerShape, Point, ShapeGeometry, ShapeType};
use crate::render_node::RenderNode;

#[derive(Debug)]
pub struct DesignEllipse {
    center: Point,
    rx: f64,
    ry: f64,
    anchor: Point,
    node: RenderNode,
}

impl DesignEllipse {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self {
            center: Point::new(cx, cy),
            rx: rx.abs(),
            ry: ry.abs(),
            anchor: Point::new(cx - rx.abs(), cy - ry.abs()),
            node: RenderNode::new(),
        }
    }

    /// Ellipse inscribed in the given bounding rectangle.
    pub fn from_bounds(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (rx, ry) = (width.abs() / 2.0, height.abs() / 2.0);
        Self::new(x + rx, y + ry, rx, ry)
    }

    pub fn start_at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    pub fn radii(&self) -> (f64, f64) {
        (self.rx, self.ry)
    }

    pub fn ellipse_center(&self) -> Point {
        self.center
    }

    pub fn try_clone(&self) -> Result<Self, ShapeError> {
        if !self.center.is_finite() || !self.rx.is_finite() || !self.ry.is_finite() {
            return Err(clone_failure("ellipse geometry is not finite"));
        }
        Ok(Self {
            center: self.center,
            rx: self.rx,
            ry: self.ry,
            anchor: Point::new(self.center.x - self.rx, self.center.y - self.ry),
            node: self.node.duplicate(),
        })
    }

    pub fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Ellipse {
            cx: self.center.x,
            cy: self.center.y,
            rx: self.rx,
            ry: self.ry,
        }
    }

    pub fn set_geometry(&mut self, geometry: &ShapeGeometry) -> Result<(), ShapeError> {
        match geometry {
            ShapeGeometry::Ellipse { cx, cy, rx, ry } => {
                self.center = Point::new(*cx, *cy);
                self.rx = rx.abs();
                self.ry = ry.abs();
                Ok(())
            }
            other => Err(mismatch(ShapeType::Ellipse, other)),
        }
    }
}

impl DesignerShape for DesignEllipse {
    fn node(&self) -> &RenderNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut RenderNode {
        &mut self.node
    }

    fn on_drag(&mut self, x: f64, y: f64) {
        self.center = Point::new((self.anchor.x + x) / 2.0, (self.anchor.y + y) / 2.0);
        self.rx = (x - self.anchor.x).abs() / 2.0;
        self.ry = (y - self.anchor.y).abs() / 2.0;
    }

    fn contains_with_tolerance(&self, x: f64, y: f64, _tolerance: f64) -> bool {
        if self.rx == 0.0 || self.ry == 0.0 {
            return false;
        }
        let p = self.node.to_local(x, y, self.center);
        let nx = (p.x - self.center.x) / self.rx;
        let ny = (p.y - self.center.y) / self.ry;
        nx * nx + ny * ny <= 1.0
    }

    fn x(&self) -> f64 {
        self.center.x - self.rx
    }

    fn y(&self) -> f64 {
        self.center.y - self.ry
    }

    fn width(&self) -> f64 {
        self.rx * 2.0
    }

    fn height(&self) -> f64 {
        self.ry * 2.0
    }

    fn set_x(&mut self, x: f64) {
        let dx = x - self.x();
        self.center.x += dx;
        self.anchor.x += dx;
    }

    fn set_y(&mut self, y: f64) {
        let dy = y - self.y();
        self.center.y += dy;
        self.anchor.y += dy;
    }
}
