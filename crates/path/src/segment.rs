//! The segments a subpath is made of.

use crate::geom::{ArcFlags, CubicBezierSegment, LineSegment, QuadraticBezierSegment, SvgArc};
use crate::math::{Angle, Point, Vector};
use crate::polyline::Polyline;

/// One segment of a subpath.
///
/// A segment only knows where it ends: the point it starts from is the end of the
/// previous segment (or the subpath's start point), so the same segment value can be
/// flattened from any entry point.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathSegment {
    Line {
        to: Point,
    },
    Quadratic {
        ctrl: Point,
        to: Point,
    },
    Cubic {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    /// An elliptic arc in the SVG endpoint parametrization.
    Arc {
        radii: Vector,
        x_rotation: Angle,
        flags: ArcFlags,
        to: Point,
    },
}

/// The concrete geometry of a segment once its entry point is known.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SegmentGeometry {
    Line(LineSegment<f32>),
    Quadratic(QuadraticBezierSegment<f32>),
    Cubic(CubicBezierSegment<f32>),
    Arc(SvgArc<f32>),
}

impl PathSegment {
    #[inline]
    pub fn line(to: Point) -> Self {
        PathSegment::Line { to }
    }

    #[inline]
    pub fn quadratic(ctrl: Point, to: Point) -> Self {
        PathSegment::Quadratic { ctrl, to }
    }

    #[inline]
    pub fn cubic(ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        PathSegment::Cubic { ctrl1, ctrl2, to }
    }

    #[inline]
    pub fn arc(radii: Vector, x_rotation: Angle, flags: ArcFlags, to: Point) -> Self {
        PathSegment::Arc {
            radii,
            x_rotation,
            flags,
            to,
        }
    }

    /// The point this segment ends at.
    #[inline]
    pub fn end_point(&self) -> Point {
        match *self {
            PathSegment::Line { to }
            | PathSegment::Quadratic { to, .. }
            | PathSegment::Cubic { to, .. }
            | PathSegment::Arc { to, .. } => to,
        }
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, PathSegment::Line { .. })
    }

    /// Whether every coordinate and parameter of the segment is a finite number.
    pub fn is_finite(&self) -> bool {
        fn finite(p: Point) -> bool {
            p.x.is_finite() && p.y.is_finite()
        }

        match *self {
            PathSegment::Line { to } => finite(to),
            PathSegment::Quadratic { ctrl, to } => finite(ctrl) && finite(to),
            PathSegment::Cubic { ctrl1, ctrl2, to } => {
                finite(ctrl1) && finite(ctrl2) && finite(to)
            }
            PathSegment::Arc {
                radii,
                x_rotation,
                to,
                ..
            } => {
                radii.x.is_finite()
                    && radii.y.is_finite()
                    && x_rotation.radians.is_finite()
                    && finite(to)
            }
        }
    }

    /// Resolves the segment into concrete geometry starting at `from`.
    pub fn to_geometry(&self, from: Point) -> SegmentGeometry {
        match *self {
            PathSegment::Line { to } => SegmentGeometry::Line(LineSegment { from, to }),
            PathSegment::Quadratic { ctrl, to } => {
                SegmentGeometry::Quadratic(QuadraticBezierSegment { from, ctrl, to })
            }
            PathSegment::Cubic { ctrl1, ctrl2, to } => SegmentGeometry::Cubic(CubicBezierSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            }),
            PathSegment::Arc {
                radii,
                x_rotation,
                flags,
                to,
            } => SegmentGeometry::Arc(SvgArc {
                from,
                to,
                radii,
                x_rotation,
                flags,
            }),
        }
    }

    /// Approximates the segment with a sequence of points when entered at `entry`.
    ///
    /// The first point is `entry` and the last point is `self.end_point()`, for any
    /// entry point. Lines produce exactly these two points; curves add intermediate
    /// points so that the approximation stays within `tolerance` of the curve.
    pub fn flatten(&self, entry: Point, tolerance: f32) -> Polyline {
        let mut points = vec![entry];

        {
            let mut push = |segment: &LineSegment<f32>| points.push(segment.to);
            match self.to_geometry(entry) {
                SegmentGeometry::Line(_) => {}
                SegmentGeometry::Quadratic(curve) => curve.for_each_flattened(tolerance, &mut push),
                SegmentGeometry::Cubic(curve) => curve.for_each_flattened(tolerance, &mut push),
                SegmentGeometry::Arc(curve) => curve.for_each_flattened(tolerance, &mut push),
            }
        }

        // The curve's own end point is replaced with the exact one.
        if points.len() > 1 {
            points.pop();
        }
        points.push(self.end_point());

        Polyline::from_points(points)
    }
}

impl SegmentGeometry {
    pub fn from(&self) -> Point {
        match self {
            SegmentGeometry::Line(s) => s.from,
            SegmentGeometry::Quadratic(s) => s.from,
            SegmentGeometry::Cubic(s) => s.from,
            SegmentGeometry::Arc(s) => s.from,
        }
    }

    pub fn to(&self) -> Point {
        match self {
            SegmentGeometry::Line(s) => s.to,
            SegmentGeometry::Quadratic(s) => s.to,
            SegmentGeometry::Cubic(s) => s.to,
            SegmentGeometry::Arc(s) => s.to,
        }
    }

    /// Sample the geometry at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        match self {
            SegmentGeometry::Line(s) => s.sample(t),
            SegmentGeometry::Quadratic(s) => s.sample(t),
            SegmentGeometry::Cubic(s) => s.sample(t),
            SegmentGeometry::Arc(s) => s.sample(t),
        }
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[test]
fn line_flattens_to_two_points() {
    let segment = PathSegment::line(point(10.0, 0.0));
    let polyline = segment.flatten(point(3.0, 4.0), 0.1);

    assert_eq!(polyline.points(), &[point(3.0, 4.0), point(10.0, 0.0)]);
}

#[test]
fn flattened_endpoints_follow_the_entry_point() {
    let segments = [
        PathSegment::line(point(10.0, 0.0)),
        PathSegment::quadratic(point(5.0, 20.0), point(10.0, 0.0)),
        PathSegment::cubic(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)),
        PathSegment::arc(
            vector(8.0, 8.0),
            Angle::radians(0.0),
            ArcFlags::default(),
            point(10.0, 0.0),
        ),
    ];
    let entries = [point(0.0, 0.0), point(-3.5, 7.25), point(10.0, 0.0)];

    for segment in &segments {
        for &entry in &entries {
            let polyline = segment.flatten(entry, 0.05);
            assert_eq!(polyline.first(), entry);
            assert_eq!(polyline.last(), segment.end_point());
            assert!(polyline.len() >= 2);
        }
    }
}

#[test]
fn curve_approximations_stay_close_to_the_curve() {
    let segment = PathSegment::cubic(point(0.0, 100.0), point(100.0, 100.0), point(100.0, 0.0));
    let entry = point(0.0, 0.0);
    let tolerance = 0.1;

    let polyline = segment.flatten(entry, tolerance);
    assert!(polyline.len() > 4);

    // Every point of the approximation is on the curve.
    let geometry = segment.to_geometry(entry);
    if let SegmentGeometry::Cubic(curve) = geometry {
        for p in polyline.iter() {
            let mut best = f32::MAX;
            for i in 0..=10000 {
                let t = i as f32 / 10000.0;
                best = best.min((curve.sample(t) - *p).length());
            }
            assert!(best < tolerance, "{:?} is {} away from the curve", p, best);
        }
    } else {
        panic!("unexpected geometry {:?}", geometry);
    }
}

#[test]
fn finer_tolerance_adds_points() {
    let segment = PathSegment::quadratic(point(50.0, 100.0), point(100.0, 0.0));
    let coarse = segment.flatten(point(0.0, 0.0), 1.0);
    let fine = segment.flatten(point(0.0, 0.0), 0.01);

    assert!(fine.len() > coarse.len());
}

#[test]
fn degenerate_arc_flattens_as_a_line() {
    let segment = PathSegment::arc(
        vector(0.0, 0.0),
        Angle::radians(0.0),
        ArcFlags::default(),
        point(4.0, 2.0),
    );

    let polyline = segment.flatten(point(0.0, 0.0), 0.1);
    assert_eq!(polyline.points(), &[point(0.0, 0.0), point(4.0, 2.0)]);
}

#[test]
fn finiteness() {
    assert!(PathSegment::line(point(1.0, 2.0)).is_finite());
    assert!(!PathSegment::line(point(f32::NAN, 2.0)).is_finite());
    assert!(!PathSegment::quadratic(point(f32::INFINITY, 0.0), point(1.0, 2.0)).is_finite());
    assert!(!PathSegment::arc(
        vector(1.0, 1.0),
        Angle::radians(f32::NAN),
        ArcFlags::default(),
        point(1.0, 2.0),
    )
    .is_finite());
}

#[test]
fn geometry_resolution() {
    let segment = PathSegment::quadratic(point(1.0, 1.0), point(2.0, 0.0));
    let geometry = segment.to_geometry(point(0.0, 0.0));

    assert_eq!(geometry.from(), point(0.0, 0.0));
    assert_eq!(geometry.to(), point(2.0, 0.0));
    assert_eq!(geometry.sample(0.5), point(1.0, 0.5));
}

#[cfg(test)]
fn max_distance_to_arc(polyline: &Polyline, center: Point, radius: f32) -> f32 {
    let mut max: f32 = 0.0;
    for edge in polyline.line_segments() {
        for &p in &[edge.from, edge.from.lerp(edge.to, 0.5)] {
            max = max.max((radius - (p - center).length()).abs());
        }
    }
    max
}

#[test]
fn smallest_tolerance_flattens_every_kind_of_segment() {
    let tolerance = crate::FlattenOptions::MIN_TOLERANCE;
    let segments = [
        PathSegment::line(point(100.0, 0.0)),
        PathSegment::quadratic(point(50.0, 100.0), point(100.0, 0.0)),
        PathSegment::cubic(point(0.0, 100.0), point(100.0, 100.0), point(100.0, 0.0)),
        PathSegment::arc(
            vector(50.0, 50.0),
            Angle::radians(0.0),
            ArcFlags::default(),
            point(100.0, 0.0),
        ),
    ];

    for segment in &segments {
        let polyline = segment.flatten(point(0.0, 0.0), tolerance);
        assert_eq!(polyline.first(), point(0.0, 0.0));
        assert_eq!(polyline.last(), point(100.0, 0.0));
        if !segment.is_line() {
            assert!(polyline.len() > 10, "{:?}: {} points", segment, polyline.len());
        }
    }
}

#[test]
fn large_arc_stays_within_tolerance() {
    // Half circle of radius 1000 centered on (1000, 0).
    let segment = PathSegment::arc(
        vector(1000.0, 1000.0),
        Angle::radians(0.0),
        ArcFlags {
            large_arc: false,
            sweep: true,
        },
        point(2000.0, 0.0),
    );

    for &tolerance in &[1.0, 0.1, 0.01] {
        let polyline = segment.flatten(point(0.0, 0.0), tolerance);
        let error = max_distance_to_arc(&polyline, point(1000.0, 0.0), 1000.0);
        // f32 positions around 1000 are only accurate to about 1e-4.
        assert!(error <= tolerance + 1e-3, "{} > {}", error, tolerance);
    }
}

#[test]
fn huge_arc_refines_with_the_tolerance() {
    let segment = PathSegment::arc(
        vector(1.0e6, 1.0e6),
        Angle::radians(0.0),
        ArcFlags {
            large_arc: false,
            sweep: true,
        },
        point(2.0e6, 0.0),
    );

    let coarse = segment.flatten(point(0.0, 0.0), 0.1);
    let fine = segment.flatten(point(0.0, 0.0), 0.01);

    assert!(coarse.len() > 1000, "{} points", coarse.len());
    assert!(fine.len() > coarse.len());
}
