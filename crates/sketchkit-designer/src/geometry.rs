//! Geometry kernel for hit testing and polygon measurement.
//!
//! Every function here is pure and total: degenerate input (too few
//! vertices, zero-length segments) yields a well-defined answer instead of
//! an error. Area and convexity do not depend on winding direction.

use serde::{Deserialize, Serialize};

use crate::model::Point;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// Bounds of a rectangle given by its top-left corner and size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Smallest bounds enclosing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn expanded(&self, margin: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// Euclidean distance from `(px, py)` to the segment `(x1, y1)-(x2, y2)`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to the nearest endpoint. A zero-length segment degrades to a
/// point distance.
pub fn distance_to_segment(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return ((px - x1).powi(2) + (py - y1).powi(2)).sqrt();
    }

    let t = (((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0);
    let proj_x = x1 + t * dx;
    let proj_y = y1 + t * dy;
    ((px - proj_x).powi(2) + (py - proj_y).powi(2)).sqrt()
}

/// True iff `(px, py)` lies within `tolerance` of the segment.
pub fn is_near_segment(
    px: f64,
    py: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    tolerance: f64,
) -> bool {
    distance_to_segment(px, py, x1, y1, x2, y2) <= tolerance
}

/// Iterates the closed edge list of a vertex ring (last vertex joins the first).
fn edges(vertices: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Even-odd ray casting.
///
/// A horizontal ray is cast from the point towards +x and edge crossings are
/// counted. Edges use the half-open rule `(yi > y) != (yj > y)`, so a point on
/// a boundary gets the same answer on every call. Fewer than two vertices
/// never contain anything.
pub fn is_point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 2 {
        return false;
    }

    let mut inside = false;
    for (a, b) in edges(vertices) {
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// True iff the point is within `tolerance` of any edge of the closed ring.
pub fn is_near_polygon_border(point: Point, vertices: &[Point], tolerance: f64) -> bool {
    if vertices.len() < 2 {
        return false;
    }
    edges(vertices).any(|(a, b)| is_near_segment(point.x, point.y, a.x, a.y, b.x, b.y, tolerance))
}

/// Shoelace area, always non-negative.
pub fn polygon_area(vertices: &[Point]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let twice: f64 = edges(vertices).map(|(a, b)| a.x * b.y - b.x * a.y).sum();
    twice.abs() / 2.0
}

/// Sum of edge lengths, including the closing edge.
pub fn polygon_perimeter(vertices: &[Point]) -> f64 {
    if vertices.len() < 2 {
        return 0.0;
    }
    edges(vertices).map(|(a, b)| a.distance_to(&b)).sum()
}

/// Convexity by cross-product sign consistency over consecutive triples.
///
/// Collinear triples (zero cross product) do not break convexity. Fewer than
/// three vertices is trivially convex.
pub fn is_convex(vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return true;
    }

    let mut sign = 0.0_f64;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

/// Min/max extents. Empty input yields the zero box.
pub fn bounding_box(vertices: &[Point]) -> Bounds {
    let Some(first) = vertices.first() else {
        return Bounds::default();
    };

    vertices.iter().skip(1).fold(
        Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        },
        |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        },
    )
}

/// Midpoint of the bounding box.
pub fn centroid(vertices: &[Point]) -> Point {
    bounding_box(vertices).center()
}

/// Parses a comma separated list of numbers.
///
/// Returns `None` if any entry is not a finite number. Whitespace around
/// entries is ignored and an empty string parses to an empty list.
pub fn parse_flat_coords(s: &str) -> Option<Vec<f64>> {
    if s.trim().is_empty() {
        return Some(Vec::new());
    }
    s.split(',')
        .map(|part| part.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

/// Joins vertices as `x0,y0,x1,y1,...`.
pub fn format_flat_coords(vertices: &[Point]) -> String {
    vertices
        .iter()
        .flat_map(|p| [p.x, p.y])
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Pairs a flat coordinate list into points. Odd trailing values are ignored.
pub fn points_from_flat(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}
