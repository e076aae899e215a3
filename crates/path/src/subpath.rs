//! A single contiguous chain of segments and its linear approximations.

use crate::builder::SubpathBuilder;
use crate::error::SubpathError;
use crate::math::Point;
use crate::options::FlattenOptions;
use crate::polyline::{Polygon, Polyline};
use crate::segment::PathSegment;

use once_cell::sync::OnceCell;

use std::iter::Chain;
use std::{option, slice};

/// Iterator over the segments of a subpath followed by its closing segment, if any.
pub type ClosedSegments<'l> = Chain<slice::Iter<'l, PathSegment>, option::Iter<'l, PathSegment>>;

/// An ordered chain of segments between a start point and an end point.
///
/// A subpath that does not end where it starts is treated, for area and
/// containment purposes, as if a straight closing segment joined its end point
/// back to its start point. That closing segment is never added to `segments()`,
/// it is only exposed through [`Subpath::closing_segment`] and
/// [`Subpath::closed_segments`].
///
/// The linear approximations are built lazily, at most once per subpath, the
/// first time they are requested. A subpath is `Send + Sync` and can be shared
/// between threads; concurrent first requests build the approximation once and
/// only ever observe the complete result.
///
/// # Example
///
/// ```
/// use fillconv_path::Subpath;
/// use fillconv_path::math::point;
///
/// let subpath = Subpath::builder(point(0.0, 0.0))
///     .line_to(point(10.0, 0.0))
///     .line_to(point(10.0, 10.0))
///     .build()
///     .unwrap();
///
/// assert!(!subpath.segments_are_geometrically_closed());
/// assert_eq!(
///     subpath.polygon_approximation().points(),
///     &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Subpath {
    start_point: Point,
    segments: Vec<PathSegment>,
    is_closed: bool,
    closing_segment: Option<PathSegment>,
    options: FlattenOptions,
    flattening: OnceCell<Flattening>,
    polygon: OnceCell<Polygon>,
}

/// The linear approximation of every segment of a subpath, in traversal order.
#[derive(Clone, Debug, PartialEq)]
pub struct Flattening {
    polylines: Vec<Polyline>,
    closing: Option<Polyline>,
}

impl Flattening {
    /// One polyline per segment, at the segment's index.
    #[inline]
    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    /// The approximation of the closing segment, if the subpath has one.
    #[inline]
    pub fn closing(&self) -> Option<&Polyline> {
        self.closing.as_ref()
    }
}

impl Subpath {
    /// Creates a subpath with the default flattening options.
    pub fn new<Segments>(
        start_point: Point,
        segments: Segments,
        is_closed: bool,
    ) -> Result<Self, SubpathError>
    where
        Segments: IntoIterator<Item = PathSegment>,
    {
        Self::with_options(start_point, segments, is_closed, FlattenOptions::DEFAULT)
    }

    /// Creates a subpath with explicit flattening options.
    ///
    /// Fails if the start point, one of the segments or the tolerance is not made of
    /// finite numbers, or if the tolerance is not valid (see [`FlattenOptions::is_valid`]).
    pub fn with_options<Segments>(
        start_point: Point,
        segments: Segments,
        is_closed: bool,
        options: FlattenOptions,
    ) -> Result<Self, SubpathError>
    where
        Segments: IntoIterator<Item = PathSegment>,
    {
        let segments: Vec<PathSegment> = segments.into_iter().collect();

        if let Err(e) = validate(start_point, &segments, &options) {
            log::debug!("Rejected subpath: {}", e);
            return Err(e);
        }

        let closing_segment = match segments.last() {
            Some(last) if last.end_point() != start_point => Some(PathSegment::line(start_point)),
            _ => None,
        };

        Ok(Subpath {
            start_point,
            segments,
            is_closed,
            closing_segment,
            options,
            flattening: OnceCell::new(),
            polygon: OnceCell::new(),
        })
    }

    /// Creates a subpath from a sequence in which segments may be absent.
    ///
    /// Absent segments are never skipped: the first one makes construction fail
    /// with [`SubpathError::MissingSegment`].
    pub fn from_optional_segments<Segments>(
        start_point: Point,
        segments: Segments,
        is_closed: bool,
    ) -> Result<Self, SubpathError>
    where
        Segments: IntoIterator<Item = Option<PathSegment>>,
    {
        let mut collected = Vec::new();
        for (index, segment) in segments.into_iter().enumerate() {
            match segment {
                Some(segment) => collected.push(segment),
                None => {
                    let e = SubpathError::MissingSegment { index };
                    log::debug!("Rejected subpath: {}", e);
                    return Err(e);
                }
            }
        }

        Self::new(start_point, collected, is_closed)
    }

    /// Starts building a subpath at the given position.
    pub fn builder(start_point: Point) -> SubpathBuilder {
        SubpathBuilder::new(start_point)
    }

    #[inline]
    pub fn start_point(&self) -> Point {
        self.start_point
    }

    /// The end point of the last segment.
    ///
    /// Fails with [`SubpathError::EmptyChainAccess`] if the subpath has no segments.
    pub fn end_point(&self) -> Result<Point, SubpathError> {
        self.segments
            .last()
            .map(PathSegment::end_point)
            .ok_or(SubpathError::EmptyChainAccess)
    }

    /// Whether the subpath was declared closed.
    ///
    /// This is independent from [`Subpath::segments_are_geometrically_closed`].
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    /// The straight segment from the end point back to the start point.
    ///
    /// `None` if the subpath is empty or already ends at its start point.
    #[inline]
    pub fn closing_segment(&self) -> Option<&PathSegment> {
        self.closing_segment.as_ref()
    }

    /// Whether the chain of segments ends where it starts.
    #[inline]
    pub fn segments_are_geometrically_closed(&self) -> bool {
        self.closing_segment.is_none()
    }

    /// Iterates over the segments followed by the closing segment, if any.
    ///
    /// The chain of segments yielded by this iterator always ends at the start point.
    pub fn closed_segments(&self) -> ClosedSegments {
        self.segments.iter().chain(self.closing_segment.iter())
    }

    /// Whether the linear approximations have been built.
    #[inline]
    pub fn is_flattened(&self) -> bool {
        self.flattening.get().is_some()
    }

    /// Builds the linear approximation of every segment, if not done already.
    ///
    /// Each segment is flattened once, in order, using the end point of the
    /// previous segment as its entry point. The closing segment is flattened last.
    pub fn ensure_flattened(&self) -> &Flattening {
        self.flattening.get_or_init(|| self.flatten())
    }

    /// The approximation of the segment at `index`, building the approximations if needed.
    pub fn segment_polyline(&self, index: usize) -> Option<&Polyline> {
        self.ensure_flattened().polylines.get(index)
    }

    /// The approximation of the closing segment, building the approximations if needed.
    pub fn closing_polyline(&self) -> Option<&Polyline> {
        self.ensure_flattened().closing()
    }

    /// The piecewise-linear loop approximating the subpath.
    ///
    /// Made of the start point followed by every point of each segment's
    /// approximation except its first one (which repeats the previous point).
    /// The closing segment does not contribute any point: consumers read the
    /// result as a loop.
    pub fn polygon_approximation(&self) -> &Polygon {
        self.polygon.get_or_init(|| {
            let flattening = self.ensure_flattened();

            let len = 1 + flattening
                .polylines
                .iter()
                .map(|polyline| polyline.len() - 1)
                .sum::<usize>();

            let mut points = Vec::with_capacity(len);
            points.push(self.start_point);
            for polyline in &flattening.polylines {
                points.extend_from_slice(&polyline.points()[1..]);
            }

            Polygon::from_points(points)
        })
    }

    fn flatten(&self) -> Flattening {
        let tolerance = self.options.tolerance;

        let mut polylines = Vec::with_capacity(self.segments.len());
        let mut current = self.start_point;
        for (index, segment) in self.segments.iter().enumerate() {
            let polyline = segment.flatten(current, tolerance);
            log::trace!(
                "segment {}: {:?} from {:?} -> {} points",
                index,
                segment,
                current,
                polyline.len()
            );
            current = segment.end_point();
            polylines.push(polyline);
        }

        let closing = self
            .closing_segment
            .map(|segment| segment.flatten(current, tolerance));

        log::debug!(
            "Flattened subpath with {} segments into {} points (tolerance {})",
            self.segments.len(),
            polylines.iter().map(Polyline::len).sum::<usize>(),
            tolerance
        );

        Flattening { polylines, closing }
    }
}

fn validate(
    start_point: Point,
    segments: &[PathSegment],
    options: &FlattenOptions,
) -> Result<(), SubpathError> {
    if !options.is_valid() {
        return Err(SubpathError::InvalidTolerance {
            tolerance: options.tolerance,
        });
    }

    if !(start_point.x.is_finite() && start_point.y.is_finite()) {
        return Err(SubpathError::NonFiniteStartPoint {
            x: start_point.x,
            y: start_point.y,
        });
    }

    if let Some(index) = segments.iter().position(|segment| !segment.is_finite()) {
        return Err(SubpathError::NonFiniteSegment { index });
    }

    Ok(())
}

#[cfg(test)]
use crate::error::ErrorKind;
#[cfg(test)]
use crate::geom::ArcFlags;
#[cfg(test)]
use crate::math::{point, vector, Angle};

#[cfg(test)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
fn open_square() -> Subpath {
    Subpath::new(
        point(0.0, 0.0),
        vec![
            PathSegment::line(point(10.0, 0.0)),
            PathSegment::line(point(10.0, 10.0)),
            PathSegment::line(point(0.0, 10.0)),
        ],
        false,
    )
    .unwrap()
}

#[test]
fn open_subpath_gets_a_closing_segment() {
    init_logger();

    let subpath = open_square();

    assert_eq!(subpath.end_point(), Ok(point(0.0, 10.0)));
    assert_eq!(
        subpath.closing_segment(),
        Some(&PathSegment::line(point(0.0, 0.0)))
    );
    assert!(!subpath.segments_are_geometrically_closed());
    assert!(!subpath.is_closed());

    let closed: Vec<&PathSegment> = subpath.closed_segments().collect();
    assert_eq!(closed.len(), 4);
    assert_eq!(closed[3].end_point(), subpath.start_point());

    // The visible segments are not affected.
    assert_eq!(subpath.segments().len(), 3);

    assert_eq!(
        subpath.polygon_approximation().points(),
        &[
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
        ]
    );

    let closing = subpath.closing_polyline().unwrap();
    assert_eq!(closing.points(), &[point(0.0, 10.0), point(0.0, 0.0)]);
}

#[test]
fn geometrically_closed_subpath() {
    init_logger();

    let subpath = Subpath::new(
        point(0.0, 0.0),
        vec![
            PathSegment::line(point(10.0, 0.0)),
            PathSegment::line(point(0.0, 0.0)),
        ],
        true,
    )
    .unwrap();

    assert!(subpath.is_closed());
    assert!(subpath.segments_are_geometrically_closed());
    assert_eq!(subpath.closing_segment(), None);
    assert!(subpath.closed_segments().eq(subpath.segments().iter()));
    assert_eq!(
        subpath.polygon_approximation().points(),
        &[point(0.0, 0.0), point(10.0, 0.0), point(0.0, 0.0)]
    );
    assert_eq!(subpath.closing_polyline(), None);
}

#[test]
fn empty_subpath() {
    init_logger();

    let subpath = Subpath::new(point(5.0, 5.0), Vec::new(), false).unwrap();

    assert!(subpath.segments_are_geometrically_closed());
    assert_eq!(subpath.closed_segments().count(), 0);
    assert_eq!(subpath.polygon_approximation().points(), &[point(5.0, 5.0)]);

    let err = subpath.end_point().unwrap_err();
    assert_eq!(err, SubpathError::EmptyChainAccess);
    assert_eq!(err.kind(), ErrorKind::EmptyChainAccess);
}

#[test]
fn declared_closed_flag_is_independent_from_geometry() {
    let subpath = Subpath::new(
        point(0.0, 0.0),
        vec![PathSegment::line(point(1.0, 0.0))],
        true,
    )
    .unwrap();

    assert!(subpath.is_closed());
    assert!(!subpath.segments_are_geometrically_closed());
}

#[test]
fn missing_segments_are_rejected() {
    init_logger();

    let line = Some(PathSegment::line(point(1.0, 1.0)));
    let cases = [
        (vec![None, line, line], 0),
        (vec![line, None, line], 1),
        (vec![line, line, None], 2),
    ];

    for (segments, expected_index) in cases.iter().cloned() {
        let err = Subpath::from_optional_segments(point(0.0, 0.0), segments, false).unwrap_err();
        assert_eq!(
            err,
            SubpathError::MissingSegment {
                index: expected_index
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    let subpath =
        Subpath::from_optional_segments(point(0.0, 0.0), vec![line, line], false).unwrap();
    assert_eq!(subpath.segments().len(), 2);
}

#[test]
fn invalid_arguments_are_rejected() {
    init_logger();

    let err = Subpath::new(point(f32::NAN, 0.0), Vec::new(), false).unwrap_err();
    assert!(err.is_invalid_argument());

    let err = Subpath::new(
        point(0.0, 0.0),
        vec![
            PathSegment::line(point(1.0, 0.0)),
            PathSegment::line(point(f32::INFINITY, 0.0)),
        ],
        false,
    )
    .unwrap_err();
    assert_eq!(err, SubpathError::NonFiniteSegment { index: 1 });

    for &tolerance in &[0.0, -0.5, f32::NAN, f32::INFINITY] {
        let err = Subpath::with_options(
            point(0.0, 0.0),
            Vec::new(),
            false,
            FlattenOptions::tolerance(tolerance),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn tolerance_below_the_minimum_is_rejected() {
    init_logger();

    let cubic = vec![PathSegment::cubic(
        point(0.0, 100.0),
        point(100.0, 100.0),
        point(100.0, 0.0),
    )];

    let err = Subpath::with_options(
        point(0.0, 0.0),
        cubic.clone(),
        false,
        FlattenOptions::tolerance(1e-9),
    )
    .unwrap_err();
    assert_eq!(err, SubpathError::InvalidTolerance { tolerance: 1e-9 });

    let subpath = Subpath::with_options(
        point(0.0, 0.0),
        cubic,
        false,
        FlattenOptions::tolerance(FlattenOptions::MIN_TOLERANCE),
    )
    .unwrap();
    let polyline = subpath.segment_polyline(0).unwrap();
    assert_eq!(polyline.last(), point(100.0, 0.0));
    assert!(polyline.len() > 10);
}

#[test]
fn flattening_is_built_once() {
    init_logger();

    let subpath = open_square();
    assert!(!subpath.is_flattened());

    let first: *const Flattening = subpath.ensure_flattened();
    assert!(subpath.is_flattened());
    let second: *const Flattening = subpath.ensure_flattened();
    assert!(std::ptr::eq(first, second));

    let polygon = subpath.polygon_approximation().clone();
    assert_eq!(subpath.polygon_approximation(), &polygon);
    assert!(std::ptr::eq(
        subpath.polygon_approximation(),
        subpath.polygon_approximation()
    ));
}

#[test]
fn closed_segments_do_not_flatten() {
    let subpath = open_square();
    assert_eq!(subpath.closed_segments().count(), 4);
    assert!(!subpath.is_flattened());
}

#[test]
fn curves_are_flattened_from_their_actual_entry_point() {
    init_logger();

    let subpath = Subpath::with_options(
        point(0.0, 0.0),
        vec![
            PathSegment::line(point(10.0, 0.0)),
            PathSegment::quadratic(point(20.0, 0.0), point(20.0, 10.0)),
            PathSegment::cubic(point(20.0, 20.0), point(10.0, 20.0), point(0.0, 20.0)),
            PathSegment::arc(
                vector(10.0, 10.0),
                Angle::radians(0.0),
                ArcFlags {
                    large_arc: false,
                    sweep: true,
                },
                point(0.0, 5.0),
            ),
        ],
        false,
        FlattenOptions::tolerance(0.01),
    )
    .unwrap();

    let flattening = subpath.ensure_flattened();
    let mut entry = subpath.start_point();
    for (segment, polyline) in subpath.segments().iter().zip(flattening.polylines()) {
        assert_eq!(polyline.first(), entry);
        assert_eq!(polyline.last(), segment.end_point());
        entry = segment.end_point();
    }

    for polyline in &flattening.polylines()[1..] {
        assert!(polyline.len() > 2);
    }

    let expected_len = 1 + flattening
        .polylines()
        .iter()
        .map(|polyline| polyline.len() - 1)
        .sum::<usize>();
    let polygon = subpath.polygon_approximation();
    assert_eq!(polygon.len(), expected_len);
    assert_eq!(polygon[0], subpath.start_point());
    assert_eq!(polygon[polygon.len() - 1], point(0.0, 5.0));

    assert_eq!(
        flattening.closing().unwrap().points(),
        &[point(0.0, 5.0), point(0.0, 0.0)]
    );
}

#[test]
fn coarser_tolerance_gives_fewer_points() {
    let segments = vec![PathSegment::quadratic(point(50.0, 100.0), point(100.0, 0.0))];

    let fine = Subpath::with_options(
        point(0.0, 0.0),
        segments.clone(),
        false,
        FlattenOptions::tolerance(0.01),
    )
    .unwrap();
    let coarse = Subpath::with_options(
        point(0.0, 0.0),
        segments,
        false,
        FlattenOptions::tolerance(1.0),
    )
    .unwrap();

    assert!(fine.polygon_approximation().len() > coarse.polygon_approximation().len());
}

#[test]
fn concurrent_first_access() {
    init_logger();

    let subpath = Subpath::new(
        point(0.0, 0.0),
        vec![
            PathSegment::cubic(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)),
            PathSegment::quadratic(point(5.0, -5.0), point(2.0, 0.0)),
        ],
        false,
    )
    .unwrap();

    let shared = &subpath;
    let addresses: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    let polygon = shared.polygon_approximation();
                    polygon as *const Polygon as usize
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for address in &addresses {
        assert_eq!(*address, addresses[0]);
    }
    assert_eq!(
        subpath.polygon_approximation() as *const Polygon as usize,
        addresses[0]
    );
}

#[test]
fn subpath_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Subpath>();
}
