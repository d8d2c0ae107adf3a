//! Stroke and fill style decorators.
//!
//! A [`StyledShape`] is an owned chain of style layers around exactly one
//! base [`Shape`]. Each decorator owns the next inner layer through a `Box`,
//! so chains can neither cycle nor share a base. Geometry operations pass
//! straight through to the base; the decorators only push paint onto the
//! shared render node.

use sketchkit_core::{Rgba, ShapeError};

use crate::geometry::Bounds;
use crate::model::{DesignerShape, Point, Shape, ShapeGeometry, ShapeType};
use crate::render_node::{NodeId, RenderNode};

/// Which paint channel a style layer or a recolor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintTarget {
    Stroke,
    Fill,
}

impl PaintTarget {
    /// Current color on the node for this channel.
    pub fn read(&self, node: &RenderNode) -> Option<Rgba> {
        match self {
            PaintTarget::Stroke => node.stroke(),
            PaintTarget::Fill => node.fill(),
        }
    }

    pub fn write(&self, node: &mut RenderNode, color: Option<Rgba>) {
        match self {
            PaintTarget::Stroke => node.set_stroke(color),
            PaintTarget::Fill => node.set_fill(color),
        }
    }
}

/// Applies a stroke color to the wrapped shape's node.
#[derive(Debug)]
pub struct StrokeDecorator {
    inner: Box<StyledShape>,
    color: Rgba,
}

impl StrokeDecorator {
    pub fn new(inner: StyledShape, color: Rgba) -> Self {
        let mut decorator = Self {
            inner: Box::new(inner),
            color,
        };
        decorator.apply();
        decorator
    }

    /// Color recorded when the decorator was built or last set.
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Color currently on the render node, which may have been changed
    /// without going through this decorator.
    pub fn live_color(&self) -> Rgba {
        self.inner.node().stroke().unwrap_or(self.color)
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
        self.apply();
    }

    /// Re-applies the recorded color to the node.
    pub fn apply(&mut self) {
        self.inner.node_mut().set_stroke(Some(self.color));
    }

    pub fn inner(&self) -> &StyledShape {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut StyledShape {
        &mut self.inner
    }

    pub fn into_inner(self) -> StyledShape {
        *self.inner
    }
}

/// Applies a fill color to the wrapped shape's node.
#[derive(Debug)]
pub struct FillDecorator {
    inner: Box<StyledShape>,
    color: Rgba,
}

impl FillDecorator {
    pub fn new(inner: StyledShape, color: Rgba) -> Self {
        let mut decorator = Self {
            inner: Box::new(inner),
            color,
        };
        decorator.apply();
        decorator
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn live_color(&self) -> Rgba {
        self.inner.node().fill().unwrap_or(self.color)
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
        self.apply();
    }

    pub fn apply(&mut self) {
        self.inner.node_mut().set_fill(Some(self.color));
    }

    pub fn inner(&self) -> &StyledShape {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut StyledShape {
        &mut self.inner
    }

    pub fn into_inner(self) -> StyledShape {
        *self.inner
    }
}

/// A base shape wrapped in zero or more style layers.
#[derive(Debug)]
pub enum StyledShape {
    Base(Shape),
    Stroke(StrokeDecorator),
    Fill(FillDecorator),
}

impl From<Shape> for StyledShape {
    fn from(shape: Shape) -> Self {
        StyledShape::Base(shape)
    }
}

impl StyledShape {
    /// Canonical chain: the base wrapped in a stroke layer, wrapped in a fill layer.
    pub fn decorate(base: Shape, stroke: Rgba, fill: Rgba) -> Self {
        let stroked = StyledShape::Stroke(StrokeDecorator::new(StyledShape::Base(base), stroke));
        StyledShape::Fill(FillDecorator::new(stroked, fill))
    }

    /// Walks the chain down to the base shape.
    pub fn base(&self) -> &Shape {
        let mut current = self;
        loop {
            match current {
                StyledShape::Base(shape) => return shape,
                StyledShape::Stroke(d) => current = d.inner(),
                StyledShape::Fill(d) => current = d.inner(),
            }
        }
    }

    pub fn base_mut(&mut self) -> &mut Shape {
        match self {
            StyledShape::Base(shape) => shape,
            StyledShape::Stroke(d) => d.inner_mut().base_mut(),
            StyledShape::Fill(d) => d.inner_mut().base_mut(),
        }
    }

    /// Strips every style layer, leaving the base shape. Paint already
    /// applied stays on the node.
    pub fn into_base(self) -> Shape {
        match self {
            StyledShape::Base(shape) => shape,
            StyledShape::Stroke(d) => d.into_inner().into_base(),
            StyledShape::Fill(d) => d.into_inner().into_base(),
        }
    }

    /// Number of style layers around the base.
    pub fn depth(&self) -> usize {
        match self {
            StyledShape::Base(_) => 0,
            StyledShape::Stroke(d) => 1 + d.inner().depth(),
            StyledShape::Fill(d) => 1 + d.inner().depth(),
        }
    }

    /// Outermost stroke layer, if any.
    pub fn stroke_decorator_mut(&mut self) -> Option<&mut StrokeDecorator> {
        match self {
            StyledShape::Base(_) => None,
            StyledShape::Stroke(d) => Some(d),
            StyledShape::Fill(d) => d.inner_mut().stroke_decorator_mut(),
        }
    }

    /// Outermost fill layer, if any.
    pub fn fill_decorator_mut(&mut self) -> Option<&mut FillDecorator> {
        match self {
            StyledShape::Base(_) => None,
            StyledShape::Stroke(d) => d.inner_mut().fill_decorator_mut(),
            StyledShape::Fill(d) => Some(d),
        }
    }

    /// Sets a paint channel, going through the matching decorator when the
    /// chain has one so its recorded color stays in step with the node.
    pub fn set_paint(&mut self, target: PaintTarget, color: Option<Rgba>) {
        match (target, color) {
            (PaintTarget::Stroke, Some(c)) => {
                if let Some(d) = self.stroke_decorator_mut() {
                    d.set_color(c);
                    return;
                }
            }
            (PaintTarget::Fill, Some(c)) => {
                if let Some(d) = self.fill_decorator_mut() {
                    d.set_color(c);
                    return;
                }
            }
            _ => {}
        }
        target.write(self.node_mut(), color);
    }

    pub fn paint(&self, target: PaintTarget) -> Option<Rgba> {
        target.read(self.node())
    }

    /// Deep copy of the whole chain.
    ///
    /// The inner chain is cloned first; each layer is then rebuilt from the
    /// color live on the source node rather than the recorded field.
    pub fn try_clone(&self) -> Result<StyledShape, ShapeError> {
        Ok(match self {
            StyledShape::Base(shape) => StyledShape::Base(shape.try_clone()?),
            StyledShape::Stroke(d) => {
                let inner = d.inner().try_clone()?;
                StyledShape::Stroke(StrokeDecorator::new(inner, d.live_color()))
            }
            StyledShape::Fill(d) => {
                let inner = d.inner().try_clone()?;
                StyledShape::Fill(FillDecorator::new(inner, d.live_color()))
            }
        })
    }

    pub fn shape_type(&self) -> ShapeType {
        self.base().shape_type()
    }

    pub fn geometry(&self) -> ShapeGeometry {
        self.base().geometry()
    }

    pub fn set_geometry(&mut self, geometry: &ShapeGeometry) -> Result<(), ShapeError> {
        self.base_mut().set_geometry(geometry)
    }
}

impl DesignerShape for StyledShape {
    fn node(&self) -> &RenderNode {
        self.base().node()
    }

    fn node_mut(&mut self) -> &mut RenderNode {
        self.base_mut().node_mut()
    }

    fn on_drag(&mut self, x: f64, y: f64) {
        self.base_mut().on_drag(x, y);
    }

    fn on_release(&mut self) {
        self.base_mut().on_release();
    }

    fn contains_with_tolerance(&self, x: f64, y: f64, tolerance: f64) -> bool {
        self.base().contains_with_tolerance(x, y, tolerance)
    }

    fn x(&self) -> f64 {
        self.base().x()
    }

    fn y(&self) -> f64 {
        self.base().y()
    }

    fn width(&self) -> f64 {
        self.base().width()
    }

    fn height(&self) -> f64 {
        self.base().height()
    }

    fn set_x(&mut self, x: f64) {
        self.base_mut().set_x(x);
    }

    fn set_y(&mut self, y: f64) {
        self.base_mut().set_y(y);
    }

    fn id(&self) -> NodeId {
        self.base().id()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.base_mut().translate(dx, dy);
    }

    fn bounds(&self) -> Bounds {
        self.base().bounds()
    }

    fn center(&self) -> Point {
        self.base().center()
    }
}
