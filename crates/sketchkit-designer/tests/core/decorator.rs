use sketchkit_core::Rgba;
use sketchkit_designer::decorator::{FillDecorator, PaintTarget, StrokeDecorator, StyledShape};
use sketchkit_designer::model::{DesignEllipse, DesignRectangle, DesignerShape, Shape};

fn styled_rect() -> StyledShape {
    StyledShape::decorate(
        Shape::Rectangle(DesignRectangle::new(0.0, 0.0, 10.0, 10.0)),
        Rgba::BLUE,
        Rgba::GREEN,
    )
}

#[test]
fn test_decorators_apply_paint_to_node() {
    let shape = styled_rect();
    assert_eq!(shape.depth(), 2);
    assert_eq!(shape.node().stroke(), Some(Rgba::BLUE));
    assert_eq!(shape.node().fill(), Some(Rgba::GREEN));
    assert!(matches!(shape, StyledShape::Fill(_)));
}

#[test]
fn test_unwrapping_reaches_the_base() {
    let base = Shape::Ellipse(DesignEllipse::new(0.0, 0.0, 5.0, 5.0));
    let id = base.id();
    let inner = StyledShape::Stroke(StrokeDecorator::new(StyledShape::from(base), Rgba::RED));
    let wrapped = StyledShape::Fill(FillDecorator::new(inner, Rgba::WHITE));
    let nested = StyledShape::Stroke(StrokeDecorator::new(wrapped, Rgba::BLACK));

    assert_eq!(nested.depth(), 3);
    assert_eq!(nested.base().id(), id);
    // the outermost stroke layer wins
    assert_eq!(nested.node().stroke(), Some(Rgba::BLACK));

    let base = nested.into_base();
    assert_eq!(base.id(), id);
    assert_eq!(base.node().fill(), Some(Rgba::WHITE));
}

#[test]
fn test_set_paint_goes_through_decorator() {
    let mut shape = styled_rect();
    shape.set_paint(PaintTarget::Stroke, Some(Rgba::RED));

    assert_eq!(shape.paint(PaintTarget::Stroke), Some(Rgba::RED));
    let stroke = shape.stroke_decorator_mut().unwrap();
    assert_eq!(stroke.color(), Rgba::RED);
}

#[test]
fn test_set_paint_without_decorator_writes_node() {
    let mut shape = StyledShape::from(Shape::Rectangle(DesignRectangle::new(0.0, 0.0, 1.0, 1.0)));
    assert_eq!(shape.paint(PaintTarget::Fill), None);
    shape.set_paint(PaintTarget::Fill, Some(Rgba::RED));
    assert_eq!(shape.paint(PaintTarget::Fill), Some(Rgba::RED));
    shape.set_paint(PaintTarget::Fill, None);
    assert_eq!(shape.paint(PaintTarget::Fill), None);
}

#[test]
fn test_clone_uses_live_node_color() {
    let mut shape = styled_rect();
    // paint changed on the node directly, bypassing the decorator
    shape.node_mut().set_fill(Some(Rgba::RED));

    let mut copy = shape.try_clone().unwrap();
    assert_ne!(copy.id(), shape.id());
    assert_eq!(copy.depth(), 2);
    assert_eq!(copy.node().fill(), Some(Rgba::RED));
    assert_eq!(copy.node().stroke(), Some(Rgba::BLUE));
    assert_eq!(copy.fill_decorator_mut().map(|d| d.color()), Some(Rgba::RED));

    // the source decorator still records its construction color
    assert_eq!(shape.fill_decorator_mut().map(|d| d.color()), Some(Rgba::GREEN));
}

#[test]
fn test_styled_shape_forwards_geometry() {
    let mut shape = styled_rect();
    shape.translate(5.0, 7.0);
    assert_eq!((shape.x(), shape.y()), (5.0, 7.0));
    assert_eq!(shape.base().x(), 5.0);
    assert!(shape.contains(10.0, 10.0));
    assert!(!shape.contains(30.0, 30.0));
}
