//! Piecewise-linear approximations of segments and subpaths.

use crate::geom::{Box2D, LineSegment};
use crate::math::{point, Point};

/// The linear approximation of a single segment.
///
/// Always contains at least two points: the point the segment was entered at and
/// the segment's end point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub(crate) fn from_points(points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 2);
        Polyline { points }
    }

    /// The point the segment was entered at.
    #[inline]
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// The segment's end point.
    #[inline]
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a polyline has at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<Point> {
        self.points.iter()
    }

    /// Iterates over the line segments between consecutive points.
    pub fn line_segments(&self) -> impl Iterator<Item = LineSegment<f32>> + '_ {
        self.points
            .windows(2)
            .map(|pair| LineSegment {
                from: pair[0],
                to: pair[1],
            })
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl<'l> IntoIterator for &'l Polyline {
    type Item = &'l Point;
    type IntoIter = std::slice::Iter<'l, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// The piecewise-linear loop approximating a whole subpath.
///
/// The points are meant to be read as a closed loop: the last point connects back
/// to the first one, without the first point being repeated at the end (unless the
/// subpath itself ends where it starts).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub(crate) fn from_points(points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty());
        Polygon { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a polygon approximation contains at least the start point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the loop encloses no area because it has fewer than three points.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<Point> {
        self.points.iter()
    }

    /// Iterates over the edges of the loop, including the implicit edge from the
    /// last point back to the first one.
    ///
    /// The implicit edge is skipped when it has zero length.
    pub fn edges(&self) -> Edges {
        Edges {
            points: &self.points,
            idx: 0,
        }
    }

    /// Returns the smallest rectangle containing every point.
    pub fn bounding_box(&self) -> Box2D<f32> {
        let mut min = point(f32::MAX, f32::MAX);
        let mut max = point(f32::MIN, f32::MIN);
        for p in &self.points {
            min = min.min(*p);
            max = max.max(*p);
        }

        Box2D { min, max }
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl std::ops::Index<usize> for Polygon {
    type Output = Point;
    fn index(&self, idx: usize) -> &Point {
        &self.points[idx]
    }
}

impl<'l> IntoIterator for &'l Polygon {
    type Item = &'l Point;
    type IntoIter = std::slice::Iter<'l, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// An iterator over the edges of a [`Polygon`].
#[derive(Clone)]
pub struct Edges<'l> {
    points: &'l [Point],
    idx: usize,
}

impl<'l> Iterator for Edges<'l> {
    type Item = LineSegment<f32>;

    fn next(&mut self) -> Option<LineSegment<f32>> {
        let n = self.points.len();
        while self.idx < n {
            let from = self.points[self.idx];
            let to = self.points[(self.idx + 1) % n];
            let is_closing_edge = self.idx + 1 == n;
            self.idx += 1;

            if is_closing_edge && from == to {
                continue;
            }

            return Some(LineSegment { from, to });
        }

        None
    }
}

#[test]
fn polyline_accessors() {
    let polyline = Polyline::from_points(vec![
        point(0.0, 0.0),
        point(1.0, 1.0),
        point(2.0, 0.0),
    ]);

    assert_eq!(polyline.first(), point(0.0, 0.0));
    assert_eq!(polyline.last(), point(2.0, 0.0));
    assert_eq!(polyline.len(), 3);

    let segments: Vec<LineSegment<f32>> = polyline.line_segments().collect();
    assert_eq!(
        segments,
        vec![
            LineSegment {
                from: point(0.0, 0.0),
                to: point(1.0, 1.0),
            },
            LineSegment {
                from: point(1.0, 1.0),
                to: point(2.0, 0.0),
            },
        ]
    );
}

#[test]
fn polygon_edges_include_the_implicit_closing_edge() {
    let polygon = Polygon::from_points(vec![
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ]);

    let edges: Vec<LineSegment<f32>> = polygon.edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(
        edges[3],
        LineSegment {
            from: point(0.0, 10.0),
            to: point(0.0, 0.0),
        }
    );
    assert!(!polygon.is_degenerate());
}

#[test]
fn polygon_edges_skip_zero_length_closing_edge() {
    let polygon = Polygon::from_points(vec![
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(0.0, 0.0),
    ]);

    let edges: Vec<LineSegment<f32>> = polygon.edges().collect();
    assert_eq!(
        edges,
        vec![
            LineSegment {
                from: point(0.0, 0.0),
                to: point(10.0, 0.0),
            },
            LineSegment {
                from: point(10.0, 0.0),
                to: point(0.0, 0.0),
            },
        ]
    );
}

#[test]
fn single_point_polygon() {
    let polygon = Polygon::from_points(vec![point(5.0, 5.0)]);

    assert_eq!(polygon.edges().count(), 0);
    assert!(polygon.is_degenerate());
    assert_eq!(polygon[0], point(5.0, 5.0));

    let bounds = polygon.bounding_box();
    assert_eq!(bounds.min, point(5.0, 5.0));
    assert_eq!(bounds.max, point(5.0, 5.0));
}

#[test]
fn polygon_bounding_box() {
    let polygon = Polygon::from_points(vec![
        point(-1.0, 3.0),
        point(4.0, -2.0),
        point(2.0, 7.0),
    ]);

    let bounds = polygon.bounding_box();
    assert_eq!(bounds.min, point(-1.0, -2.0));
    assert_eq!(bounds.max, point(4.0, 7.0));
}
