use sketchkit_core::{Rgba, ShapeError};
use sketchkit_designer::model::{
    DesignEllipse, DesignLine, DesignPolygon, DesignRectangle, DesignText, DesignerShape,
    DrawingTool, Point, Shape, ShapeFactory, ShapeGeometry, ShapeType,
};
use sketchkit_designer::{PaintTarget, StyledShape};

#[test]
fn test_line_hit_within_tolerance() {
    let line = DesignLine::new(0.0, 0.0, 100.0, 0.0);
    assert!(line.contains(50.0, 3.0));
    assert!(!line.contains(50.0, 10.0));
    assert!(line.contains_with_tolerance(50.0, 10.0, 12.0));
}

#[test]
fn test_rectangle_hit_respects_rotation() {
    let mut rect = DesignRectangle::new(0.0, 0.0, 100.0, 20.0);
    assert!(rect.contains(90.0, 10.0));
    assert!(!rect.contains(50.0, 45.0));

    rect.set_rotation(90.0);
    // rotated about (50, 10) the long axis is now vertical
    assert!(rect.contains(50.0, 45.0));
    assert!(!rect.contains(90.0, 10.0));
    // canonical geometry is unchanged by the transform
    assert_eq!((rect.x(), rect.y(), rect.width(), rect.height()), (0.0, 0.0, 100.0, 20.0));
}

#[test]
fn test_ellipse_hit() {
    let ellipse = DesignEllipse::new(50.0, 50.0, 20.0, 10.0);
    assert!(ellipse.contains(65.0, 50.0));
    assert!(!ellipse.contains(50.0, 65.0));
    assert_eq!((ellipse.x(), ellipse.y()), (30.0, 40.0));
    assert_eq!((ellipse.width(), ellipse.height()), (40.0, 20.0));

    let flat = DesignEllipse::new(0.0, 0.0, 0.0, 10.0);
    assert!(!flat.contains(0.0, 0.0));
}

#[test]
fn test_text_layout_box() {
    let text = DesignText::new(10.0, 20.0, "Hello", 10.0);
    assert_eq!(text.x(), 10.0);
    assert_eq!(text.y(), 20.0);
    assert!((text.width() - 30.0).abs() < 1e-9);
    assert!((text.height() - 12.0).abs() < 1e-9);
    assert!(text.contains(25.0, 25.0));
    assert!(!text.contains(45.0, 25.0));
}

#[test]
fn test_polygon_triangle() {
    let poly = DesignPolygon::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ]);
    assert_eq!(poly.area(), 50.0);
    assert!(poly.is_convex());
    assert!(poly.is_closed());
    assert!(poly.contains(2.0, 2.0));
    assert!(!poly.contains(30.0, 30.0));
    assert_eq!((poly.x(), poly.y(), poly.width(), poly.height()), (0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_polygon_close_requires_two_vertices() {
    let mut poly = DesignPolygon::new();
    poly.add_point(0.0, 0.0);
    assert!(!poly.can_close());
    assert!(!poly.close());

    poly.add_point(10.0, 0.0);
    assert!(poly.is_near_start(3.0, 4.0, 5.0));
    assert!(!poly.is_near_start(6.0, 8.0, 5.0));
    assert!(poly.close());
}

#[test]
fn test_set_position_moves_without_resizing() {
    let mut line = Shape::Line(DesignLine::new(10.0, 10.0, 0.0, 30.0));
    line.set_x(100.0);
    line.set_y(200.0);
    assert_eq!((line.x(), line.y()), (100.0, 200.0));
    assert_eq!((line.width(), line.height()), (10.0, 20.0));

    let mut poly = Shape::Polygon(DesignPolygon::from_points(vec![
        Point::new(5.0, 5.0),
        Point::new(15.0, 5.0),
        Point::new(15.0, 25.0),
    ]));
    poly.translate(-5.0, -5.0);
    assert_eq!((poly.x(), poly.y(), poly.width(), poly.height()), (0.0, 0.0, 10.0, 20.0));
}

#[test]
fn test_try_clone_gets_fresh_node() {
    let mut rect = Shape::Rectangle(DesignRectangle::new(1.0, 2.0, 3.0, 4.0));
    rect.set_rotation(30.0);
    rect.node_mut().set_translation(5.0, 5.0);
    rect.node_mut().set_highlighted(true);

    let copy = rect.try_clone().unwrap();
    assert_ne!(copy.id(), rect.id());
    assert_eq!(copy.geometry(), rect.geometry());
    assert_eq!(copy.rotation(), 30.0);
    assert_eq!(copy.node().translation(), (0.0, 0.0));
    assert!(!copy.node().is_highlighted());
}

#[test]
fn test_clone_is_independent_of_source() {
    let bases = vec![
        Shape::Line(DesignLine::new(1.0, 2.0, 30.0, 40.0)),
        Shape::Rectangle(DesignRectangle::new(5.0, 6.0, 20.0, 10.0)),
        Shape::Ellipse(DesignEllipse::new(50.0, 50.0, 8.0, 4.0)),
        Shape::Text(DesignText::new(3.0, 4.0, "Label", 14.0)),
        Shape::Polygon(DesignPolygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ])),
    ];

    for mut base in bases {
        base.set_rotation(15.0);
        let source = StyledShape::decorate(base, Rgba::BLUE, Rgba::GREEN);
        let geometry = source.geometry();
        let text = source.base().as_text().map(|t| t.text().to_string());

        let mut copy = source.try_clone().unwrap();
        assert_eq!(copy.geometry(), geometry);
        assert_eq!(copy.rotation(), 15.0);
        assert_eq!(copy.paint(PaintTarget::Stroke), Some(Rgba::BLUE));
        assert_eq!(copy.paint(PaintTarget::Fill), Some(Rgba::GREEN));

        copy.translate(100.0, -40.0);
        match copy.base_mut() {
            Shape::Polygon(poly) => poly.set_points(vec![Point::new(9.0, 9.0), Point::new(1.0, 1.0)]),
            Shape::Text(t) => t.set_text("Changed"),
            _ => {}
        }
        copy.set_paint(PaintTarget::Stroke, Some(Rgba::RED));
        copy.set_paint(PaintTarget::Fill, Some(Rgba::BLACK));
        copy.set_rotation(90.0);

        assert_eq!(source.geometry(), geometry, "{}", source.shape_type());
        assert_eq!(source.base().as_text().map(|t| t.text().to_string()), text);
        assert_eq!(source.rotation(), 15.0);
        assert_eq!(source.paint(PaintTarget::Stroke), Some(Rgba::BLUE));
        assert_eq!(source.paint(PaintTarget::Fill), Some(Rgba::GREEN));
    }
}

#[test]
fn test_try_clone_rejects_malformed_state() {
    let empty = Shape::Polygon(DesignPolygon::new());
    assert!(matches!(
        empty.try_clone(),
        Err(ShapeError::CloneFailure { .. })
    ));

    let broken = Shape::Line(DesignLine::new(0.0, f64::NAN, 1.0, 1.0));
    assert!(broken.try_clone().is_err());
}

#[test]
fn test_set_geometry_checks_variant() {
    let mut rect = Shape::Rectangle(DesignRectangle::new(0.0, 0.0, 1.0, 1.0));
    let err = rect
        .set_geometry(&ShapeGeometry::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        })
        .unwrap_err();
    assert_eq!(
        err,
        ShapeError::GeometryMismatch {
            expected: "rectangle".to_string(),
            found: "line".to_string(),
        }
    );

    let nan = ShapeGeometry::Rectangle {
        x: f64::NAN,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };
    assert!(matches!(
        rect.set_geometry(&nan),
        Err(ShapeError::InvalidGeometry { .. })
    ));
}

#[test]
fn test_scaled_geometry_keeps_center() {
    let geometry = ShapeGeometry::Rectangle {
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 20.0,
    };
    assert_eq!(
        geometry.scaled(2.0),
        ShapeGeometry::Rectangle {
            x: -5.0,
            y: -10.0,
            width: 20.0,
            height: 40.0,
        }
    );

    let text = ShapeGeometry::Text {
        x: 3.0,
        y: 4.0,
        font_size: 12.0,
    };
    assert_eq!(
        text.scaled(1.5),
        ShapeGeometry::Text {
            x: 3.0,
            y: 4.0,
            font_size: 18.0,
        }
    );
}

#[test]
fn test_shape_type_tags() {
    assert_eq!("RECTANGLE".parse::<ShapeType>(), Ok(ShapeType::Rectangle));
    assert_eq!("polygon".parse::<ShapeType>(), Ok(ShapeType::Polygon));
    assert!("hexagon".parse::<ShapeType>().is_err());
    assert_eq!(ShapeType::Ellipse.to_string(), "ellipse");
}

#[test]
fn test_degenerate_shapes() {
    assert!(Shape::Rectangle(DesignRectangle::start_at(5.0, 5.0)).is_degenerate());
    assert!(Shape::Line(DesignLine::start_at(5.0, 5.0)).is_degenerate());
    // a vertical line has zero width but is still visible
    assert!(!Shape::Line(DesignLine::new(5.0, 5.0, 5.0, 50.0)).is_degenerate());
    assert!(Shape::Text(DesignText::new(0.0, 0.0, "", 12.0)).is_degenerate());
}

#[test]
fn test_factory_creates_by_tool() {
    let factory = ShapeFactory::default();
    assert!(factory.create(DrawingTool::Select, 0.0, 0.0).is_none());

    let shape = factory.create(DrawingTool::Ellipse, 4.0, 6.0).unwrap();
    assert_eq!(shape.shape_type(), ShapeType::Ellipse);
    assert_eq!((shape.x(), shape.y()), (4.0, 6.0));

    let text = factory.create(DrawingTool::Text, 0.0, 0.0).unwrap();
    assert_eq!(text.as_text().map(|t| t.text()), Some("Text"));

    assert_eq!(DrawingTool::from_index(5), DrawingTool::Polygon);
    assert_eq!(DrawingTool::from_index(42), DrawingTool::Select);
}
