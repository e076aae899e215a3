//! Incremental construction of subpaths.
//!
//! ## Examples
//!
//! ```
//! use fillconv_path::{Subpath, geom::ArcFlags};
//! use fillconv_path::math::{point, vector, Angle};
//!
//! let subpath = Subpath::builder(point(0.0, 0.0))
//!     .line_to(point(1.0, 0.0))
//!     .quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0))
//!     .cubic_bezier_to(point(2.0, 2.0), point(1.0, 2.0), point(0.0, 2.0))
//!     .arc_to(vector(1.0, 1.0), Angle::radians(0.0), ArcFlags::default(), point(0.0, 0.0))
//!     .close()
//!     .unwrap();
//!
//! assert!(subpath.is_closed());
//! assert!(subpath.segments_are_geometrically_closed());
//! ```

use crate::error::SubpathError;
use crate::geom::ArcFlags;
use crate::math::{Angle, Point, Vector};
use crate::options::FlattenOptions;
use crate::segment::PathSegment;
use crate::subpath::Subpath;

/// Builds a [`Subpath`] one segment at a time.
#[derive(Clone, Debug)]
pub struct SubpathBuilder {
    start_point: Point,
    current_position: Point,
    segments: Vec<PathSegment>,
    options: FlattenOptions,
}

impl SubpathBuilder {
    pub fn new(start_point: Point) -> Self {
        SubpathBuilder {
            start_point,
            current_position: start_point,
            segments: Vec::new(),
            options: FlattenOptions::DEFAULT,
        }
    }

    /// Sets the options the subpath is flattened with.
    pub fn with_options(mut self, options: FlattenOptions) -> Self {
        self.options = options;
        self
    }

    /// The end point of the last added segment, or the start point.
    #[inline]
    pub fn current_position(&self) -> Point {
        self.current_position
    }

    pub fn line_to(self, to: Point) -> Self {
        self.segment(PathSegment::line(to))
    }

    pub fn quadratic_bezier_to(self, ctrl: Point, to: Point) -> Self {
        self.segment(PathSegment::quadratic(ctrl, to))
    }

    pub fn cubic_bezier_to(self, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        self.segment(PathSegment::cubic(ctrl1, ctrl2, to))
    }

    /// Adds an elliptic arc in the SVG endpoint parametrization.
    pub fn arc_to(self, radii: Vector, x_rotation: Angle, flags: ArcFlags, to: Point) -> Self {
        self.segment(PathSegment::arc(radii, x_rotation, flags, to))
    }

    /// Adds an arbitrary segment.
    pub fn segment(mut self, segment: PathSegment) -> Self {
        self.current_position = segment.end_point();
        self.segments.push(segment);
        self
    }

    /// Builds an open subpath.
    pub fn build(self) -> Result<Subpath, SubpathError> {
        self.finish(false)
    }

    /// Builds a subpath declared closed.
    pub fn close(self) -> Result<Subpath, SubpathError> {
        self.finish(true)
    }

    fn finish(self, is_closed: bool) -> Result<Subpath, SubpathError> {
        Subpath::with_options(self.start_point, self.segments, is_closed, self.options)
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn builder_tracks_current_position() {
    let builder = SubpathBuilder::new(point(1.0, 1.0));
    assert_eq!(builder.current_position(), point(1.0, 1.0));

    let builder = builder.line_to(point(5.0, 1.0));
    assert_eq!(builder.current_position(), point(5.0, 1.0));

    let builder = builder.quadratic_bezier_to(point(6.0, 2.0), point(5.0, 3.0));
    assert_eq!(builder.current_position(), point(5.0, 3.0));
}

#[test]
fn build_and_close() {
    let open = Subpath::builder(point(0.0, 0.0))
        .line_to(point(3.0, 0.0))
        .line_to(point(3.0, 3.0))
        .build()
        .unwrap();

    assert!(!open.is_closed());
    assert_eq!(open.segments().len(), 2);
    assert_eq!(
        open.closing_segment(),
        Some(&PathSegment::line(point(0.0, 0.0)))
    );

    let closed = Subpath::builder(point(0.0, 0.0))
        .line_to(point(3.0, 0.0))
        .line_to(point(3.0, 3.0))
        .close()
        .unwrap();

    assert!(closed.is_closed());
    assert_eq!(closed.segments(), open.segments());
}

#[test]
fn builder_options() {
    let subpath = Subpath::builder(point(0.0, 0.0))
        .with_options(FlattenOptions::tolerance(0.5))
        .line_to(point(1.0, 0.0))
        .build()
        .unwrap();
    assert_eq!(subpath.options().tolerance, 0.5);

    let err = Subpath::builder(point(0.0, 0.0))
        .with_options(FlattenOptions::tolerance(0.0))
        .build()
        .unwrap_err();
    assert!(err.is_invalid_argument());
}
