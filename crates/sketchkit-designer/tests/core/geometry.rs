use proptest::prelude::*;
use sketchkit_designer::geometry::{
    bounding_box, centroid, distance_to_segment, is_convex, is_near_polygon_border,
    is_near_segment, is_point_in_polygon, parse_flat_coords, polygon_area, polygon_perimeter,
    Bounds,
};
use sketchkit_designer::model::Point;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn l_shape() -> Vec<Point> {
    pts(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 4.0),
        (4.0, 4.0),
        (4.0, 10.0),
        (0.0, 10.0),
    ])
}

#[test]
fn test_right_triangle_measurements() {
    let tri = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
    assert_eq!(polygon_area(&tri), 50.0);
    assert!(is_convex(&tri));
    let expected = 20.0 + 200.0_f64.sqrt();
    assert!((polygon_perimeter(&tri) - expected).abs() < 1e-9);
    assert_eq!(centroid(&tri), Point::new(5.0, 5.0));
}

#[test]
fn test_concave_polygon() {
    let l = l_shape();
    assert!(!is_convex(&l));
    assert_eq!(polygon_area(&l), 64.0);
    assert!(is_point_in_polygon(Point::new(2.0, 8.0), &l));
    assert!(is_point_in_polygon(Point::new(8.0, 2.0), &l));
    assert!(!is_point_in_polygon(Point::new(7.0, 7.0), &l));
}

#[test]
fn test_point_in_polygon_degenerate_inputs() {
    assert!(!is_point_in_polygon(Point::new(0.0, 0.0), &[]));
    assert!(!is_point_in_polygon(
        Point::new(0.0, 0.0),
        &pts(&[(0.0, 0.0)])
    ));
    assert_eq!(polygon_area(&pts(&[(0.0, 0.0), (5.0, 5.0)])), 0.0);
}

#[test]
fn test_edge_point_is_stable() {
    let square = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let on_edge = Point::new(0.0, 5.0);
    let first = is_point_in_polygon(on_edge, &square);
    for _ in 0..10 {
        assert_eq!(is_point_in_polygon(on_edge, &square), first);
    }
}

#[test]
fn test_collinear_vertices_stay_convex() {
    let square = pts(&[
        (0.0, 0.0),
        (5.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
    ]);
    assert!(is_convex(&square));
}

#[test]
fn test_segment_distance() {
    assert_eq!(distance_to_segment(5.0, 3.0, 0.0, 0.0, 10.0, 0.0), 3.0);
    // beyond the end the nearest point is the endpoint
    assert_eq!(distance_to_segment(13.0, 4.0, 0.0, 0.0, 10.0, 0.0), 5.0);
    // zero-length segment degrades to point distance
    assert_eq!(distance_to_segment(3.0, 4.0, 0.0, 0.0, 0.0, 0.0), 5.0);

    assert!(is_near_segment(5.0, 3.0, 0.0, 0.0, 10.0, 0.0, 5.0));
    assert!(!is_near_segment(5.0, 3.0, 0.0, 0.0, 10.0, 0.0, 2.0));
}

#[test]
fn test_border_proximity_includes_closing_edge() {
    let tri = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
    // (-1, 5) is next to the closing edge from (0,10) back to (0,0)
    assert!(is_near_polygon_border(Point::new(-1.0, 5.0), &tri, 2.0));
    assert!(!is_near_polygon_border(Point::new(-5.0, 5.0), &tri, 2.0));
}

#[test]
fn test_bounding_box() {
    let b = bounding_box(&l_shape());
    assert_eq!(b, Bounds::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(bounding_box(&[]), Bounds::default());

    let joined = Bounds::from_rect(0.0, 0.0, 5.0, 5.0).union(&Bounds::from_rect(10.0, -2.0, 2.0, 2.0));
    assert_eq!(joined, Bounds::new(0.0, -2.0, 12.0, 5.0));
    assert_eq!(joined.center(), Point::new(6.0, 1.5));
}

#[test]
fn test_parse_flat_coords() {
    assert_eq!(parse_flat_coords("1, 2,3 ,4"), Some(vec![1.0, 2.0, 3.0, 4.0]));
    assert_eq!(parse_flat_coords(""), Some(vec![]));
    assert_eq!(parse_flat_coords("1,a"), None);
    assert_eq!(parse_flat_coords("1,,2"), None);
    assert_eq!(parse_flat_coords("1,NaN"), None);
}

fn ring() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 3..12)
        .prop_map(|v| v.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

proptest! {
    #[test]
    fn prop_area_ignores_winding(poly in ring()) {
        let mut reversed = poly.clone();
        reversed.reverse();
        let (a, b) = (polygon_area(&poly), polygon_area(&reversed));
        prop_assert!((a - b).abs() <= 1e-9 * (1.0 + a));
    }

    #[test]
    fn prop_convexity_ignores_winding(poly in ring()) {
        let mut reversed = poly.clone();
        reversed.reverse();
        prop_assert_eq!(is_convex(&poly), is_convex(&reversed));
    }

    #[test]
    fn prop_area_translation_invariant(poly in ring(), dx in -500.0..500.0f64, dy in -500.0..500.0f64) {
        let moved: Vec<Point> = poly.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect();
        let (a, b) = (polygon_area(&poly), polygon_area(&moved));
        prop_assert!((a - b).abs() <= 1e-6 * (1.0 + a));
    }

    #[test]
    fn prop_area_is_non_negative(poly in ring()) {
        prop_assert!(polygon_area(&poly) >= 0.0);
    }
}
