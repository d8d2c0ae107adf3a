use sketchkit_core::ShapeError;

use super::{clone_failure, mismatch, DesignerShape, Point, ShapeGeometry, ShapeType};
use crate::geometry::{self, Bounds};
use crate::render_node::RenderNode;

/// Free-form polygon built one vertex at a time.
///
/// The vertex ring is implicitly closed for measurement and hit testing;
/// `closed` only records that the creation gesture has finished.
#[derive(Debug)]
pub struct DesignPolygon {
    points: Vec<Point>,
    closed: bool,
    node: RenderNode,
}

impl DesignPolygon {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            closed: false,
            node: RenderNode::new(),
        }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
            node: RenderNode::new(),
        }
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.points.push(Point::new(x, y));
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Closing gesture detection: is `(x, y)` within `tolerance` of the first vertex?
    pub fn is_near_start(&self, x: f64, y: f64, tolerance: f64) -> bool {
        self.start()
            .is_some_and(|s| s.distance_to(&Point::new(x, y)) <= tolerance)
    }

    pub fn can_close(&self) -> bool {
        self.points.len() >= 2
    }

    /// Finishes the creation gesture. Returns `false` when there are too few vertices.
    pub fn close(&mut self) -> bool {
        if self.can_close() {
            self.closed = true;
        }
        self.closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Flat `x0, y0, x1, y1, ...` coordinate list.
    pub fn to_flat(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Scales every vertex about the bounding-box centroid.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        let c = self.centroid();
        for p in &mut self.points {
            p.x = c.x + (p.x - c.x) * sx;
            p.y = c.y + (p.y - c.y) * sy;
        }
    }

    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.points)
    }

    pub fn perimeter(&self) -> f64 {
        geometry::polygon_perimeter(&self.points)
    }

    pub fn is_convex(&self) -> bool {
        geometry::is_convex(&self.points)
    }

    pub fn bounding_box(&self) -> Bounds {
        geometry::bounding_box(&self.points)
    }

    pub fn centroid(&self) -> Point {
        geometry::centroid(&self.points)
    }

    pub fn is_near_border(&self, x: f64, y: f64, tolerance: f64) -> bool {
        geometry::is_near_polygon_border(Point::new(x, y), &self.points, tolerance)
    }

    pub fn try_clone(&self) -> Result<Self, ShapeError> {
        if self.points.is_empty() {
            return Err(clone_failure("polygon has no vertices"));
        }
        if !self.points.iter().all(Point::is_finite) {
            return Err(clone_failure("polygon vertex is not finite"));
        }
        Ok(Self {
            points: self.points.clone(),
            closed: self.closed,
            node: self.node.duplicate(),
        })
    }

    pub fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Polygon {
            points: self.points.clone(),
        }
    }

    pub fn set_geometry(&mut self, geometry: &ShapeGeometry) -> Result<(), ShapeError> {
        match geometry {
            ShapeGeometry::Polygon { points } => {
                self.points = points.clone();
                Ok(())
            }
            other => Err(mismatch(ShapeType::Polygon, other)),
        }
    }
}

impl Default for DesignPolygon {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignerShape for DesignPolygon {
    fn node(&self) -> &RenderNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut RenderNode {
        &mut self.node
    }

    /// Moves the most recent vertex, giving rubber-band feedback while placing it.
    fn on_drag(&mut self, x: f64, y: f64) {
        if let Some(last) = self.points.last_mut() {
            *last = Point::new(x, y);
        }
    }

    /// Layered hit test: transformed even-odd test, then raw ray casting,
    /// then border tolerance, then the bounding box.
    fn contains_with_tolerance(&self, x: f64, y: f64, tolerance: f64) -> bool {
        if self.points.is_empty() {
            return false;
        }
        let local = self.node.to_local(x, y, self.centroid());
        if geometry::is_point_in_polygon(local, &self.points) {
            return true;
        }
        let raw = Point::new(x, y);
        if geometry::is_point_in_polygon(raw, &self.points) {
            return true;
        }
        if geometry::is_near_polygon_border(raw, &self.points, tolerance) {
            return true;
        }
        self.bounding_box().contains(x, y)
    }

    fn x(&self) -> f64 {
        self.bounding_box().min_x
    }

    fn y(&self) -> f64 {
        self.bounding_box().min_y
    }

    fn width(&self) -> f64 {
        self.bounding_box().width()
    }

    fn height(&self) -> f64 {
        self.bounding_box().height()
    }

    fn set_x(&mut self, x: f64) {
        let dx = x - self.x();
        self.translate(dx, 0.0);
    }

    fn set_y(&mut self, y: f64) {
        let dy = y - self.y();
        self.translate(0.0, dy);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }

    fn bounds(&self) -> Bounds {
        self.bounding_box()
    }

    fn center(&self) -> Point {
        self.centroid()
    }
}
