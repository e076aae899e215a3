//! Elliptic arcs in the SVG endpoint parametrization, resolved and flattened.

use crate::{point, vector, Angle, LineSegment, Point, Scalar, Vector};

use num_traits::{Float, NumCast};

/// Upper bound on the number of line segments a single arc is flattened into.
pub const MAX_FLATTENING_STEPS: u32 = 1 << 20;

/// An elliptic arc curve segment using the SVG's end-point notation.
///
/// The center of the ellipse is not stored, it is resolved from both end points,
/// the radii and the flags when converting to an [`Arc`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SvgArc<S> {
    pub from: Point<S>,
    pub to: Point<S>,
    pub radii: Vector<S>,
    pub x_rotation: Angle<S>,
    pub flags: ArcFlags,
}

/// An elliptic arc curve segment using the center parametrization.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc<S> {
    pub center: Point<S>,
    pub radii: Vector<S>,
    pub start_angle: Angle<S>,
    pub sweep_angle: Angle<S>,
    pub x_rotation: Angle<S>,
}

/// Flag parameters for arcs as described by the SVG specification.
///
/// Four arcs (two ellipses, each with two sweeps) usually connect both end points
/// with the given radii. The flags select one of them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcFlags {
    /// Pick one of the two arcs sweeping 180 degrees or more.
    pub large_arc: bool,
    /// Draw the arc in the positive-angle direction.
    pub sweep: bool,
}

impl<S: Scalar> Arc<S> {
    /// Resolve the center parametrization of an SVG arc (F.6.5).
    ///
    /// Radii that are too small to connect both end points are scaled up uniformly
    /// (F.6.6). The arc must not be a straight line, see [`SvgArc::is_straight_line`].
    pub fn from_svg_arc(arc: &SvgArc<S>) -> Arc<S> {
        debug_assert!(!arc.is_straight_line());

        let mut rx = arc.radii.x.abs();
        let mut ry = arc.radii.y.abs();

        let (sin_phi, cos_phi) = sin_cos(arc.x_rotation.radians);
        let half_diff = (arc.from - arc.to) * S::HALF;
        let mid = arc.from.lerp(arc.to, S::HALF);

        // End point difference in the ellipse's own frame.
        let p = vector(
            cos_phi * half_diff.x + sin_phi * half_diff.y,
            cos_phi * half_diff.y - sin_phi * half_diff.x,
        );

        let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
        if lambda > S::ONE {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rx_py = rx * p.y;
        let ry_px = ry * p.x;
        let denominator = rx_py * rx_py + ry_px * ry_px;
        let numerator = rx * rx * ry * ry - denominator;
        let mut coefficient = S::max(numerator / denominator, S::ZERO).sqrt();
        if arc.flags.large_arc == arc.flags.sweep {
            coefficient = -coefficient;
        }

        let c = vector(coefficient * rx_py / ry, -coefficient * ry_px / rx);
        let center = mid + vector(
            cos_phi * c.x - sin_phi * c.y,
            sin_phi * c.x + cos_phi * c.y,
        );

        let start = vector((p.x - c.x) / rx, (p.y - c.y) / ry);
        let end = vector((-p.x - c.x) / rx, (-p.y - c.y) / ry);

        let mut sweep = signed_angle(start, end);
        if arc.flags.sweep && sweep < S::ZERO {
            sweep += S::TWO * S::PI();
        } else if !arc.flags.sweep && sweep > S::ZERO {
            sweep -= S::TWO * S::PI();
        }

        Arc {
            center,
            radii: vector(rx, ry),
            start_angle: Angle::radians(signed_angle(vector(S::ONE, S::ZERO), start)),
            sweep_angle: Angle::radians(sweep),
            x_rotation: arc.x_rotation,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let angle = self.start_angle.radians + self.sweep_angle.radians * t;
        let (sin_a, cos_a) = sin_cos(angle);
        let (sin_r, cos_r) = sin_cos(self.x_rotation.radians);
        let x = self.radii.x * cos_a;
        let y = self.radii.y * sin_a;

        self.center + vector(x * cos_r - y * sin_r, x * sin_r + y * cos_r)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.sample(S::ZERO)
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.sample(S::ONE)
    }

    /// Number of line segments needed to approximate this arc within `tolerance`.
    ///
    /// The arc is subdivided uniformly in angle, taking the largest radius as the
    /// radius of curvature everywhere. The result is between 1 and
    /// [`MAX_FLATTENING_STEPS`].
    pub fn flattening_step_count(&self, tolerance: S) -> u32 {
        let sweep = self.sweep_angle.radians.abs();
        if sweep <= S::EPSILON {
            return 1;
        }

        // A chord spanning `step` radians is at most r * (1 - cos(step / 2)) away
        // from the arc. Solving for step with 1 - cos(a) = 2 * sin²(a / 2) keeps
        // precision when the tolerance is tiny relative to the radius.
        let r = S::max(self.radii.x.abs(), self.radii.y.abs());
        let ratio = S::min(tolerance / r, S::TWO);
        let max_step = S::FOUR * (ratio * S::HALF).sqrt().asin();

        let count = (sweep / max_step).ceil();
        let max: S = cast(MAX_FLATTENING_STEPS);
        if !(count < max) {
            return MAX_FLATTENING_STEPS;
        }

        count.to_u32().unwrap_or(MAX_FLATTENING_STEPS).max(1)
    }

    /// Approximates the arc with a sequence of line segments.
    ///
    /// The `tolerance` parameter defines the maximum distance between the curve and
    /// its approximation.
    pub fn for_each_flattened<F>(&self, tolerance: S, callback: &mut F)
    where
        F: FnMut(&LineSegment<S>),
    {
        self.for_each_flattened_between(self.from(), self.to(), tolerance, callback);
    }

    // Uniform angular steps, with the first and last points replaced by `from` and `to`.
    fn for_each_flattened_between<F>(
        &self,
        from: Point<S>,
        to: Point<S>,
        tolerance: S,
        callback: &mut F,
    ) where
        F: FnMut(&LineSegment<S>),
    {
        let count = self.flattening_step_count(tolerance);
        let step = S::ONE / cast::<S>(count);

        let mut prev = from;
        for i in 1..count {
            let next = self.sample(step * cast::<S>(i));
            callback(&LineSegment { from: prev, to: next });
            prev = next;
        }

        callback(&LineSegment { from: prev, to });
    }
}

impl<S: Scalar> SvgArc<S> {
    /// Whether this arc degenerates into a line segment.
    ///
    /// Arcs with a zero radius are straight lines and arcs whose end points are
    /// identical are omitted.
    pub fn is_straight_line(&self) -> bool {
        self.radii.x.abs() <= S::EPSILON
            || self.radii.y.abs() <= S::EPSILON
            || self.from == self.to
    }

    /// Convert to the center parametrization.
    ///
    /// Returns `None` if the arc degenerates into a straight line.
    pub fn to_arc(&self) -> Option<Arc<S>> {
        if self.is_straight_line() {
            return None;
        }

        Some(Arc::from_svg_arc(self))
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        match self.to_arc() {
            Some(arc) => arc.sample(t),
            None => self.from.lerp(self.to, t),
        }
    }

    /// Approximates the arc with a sequence of line segments.
    ///
    /// The first segment starts exactly at `from` and the last one ends exactly at `to`.
    pub fn for_each_flattened<F>(&self, tolerance: S, callback: &mut F)
    where
        F: FnMut(&LineSegment<S>),
    {
        match self.to_arc() {
            Some(arc) => arc.for_each_flattened_between(self.from, self.to, tolerance, callback),
            None => callback(&LineSegment {
                from: self.from,
                to: self.to,
            }),
        }
    }
}

#[inline]
fn sin_cos<S: Scalar>(angle: S) -> (S, S) {
    (Float::sin(angle), Float::cos(angle))
}

#[inline]
fn cast<S: Scalar>(v: u32) -> S {
    <S as NumCast>::from(v).unwrap_or(S::ONE)
}

// Signed angle from `a` to `b`, in ]-PI, PI].
#[inline]
fn signed_angle<S: Scalar>(a: Vector<S>, b: Vector<S>) -> S {
    a.cross(b).atan2(a.dot(b))
}

#[cfg(test)]
fn assert_on_circle(arc: &SvgArc<f64>, center: Point<f64>, radius: f64, tolerance: f64) {
    let mut prev = arc.from;
    let mut count = 0;
    arc.for_each_flattened(tolerance, &mut |segment| {
        assert_eq!(segment.from, prev);
        prev = segment.to;
        count += 1;

        assert!(((segment.to - center).length() - radius).abs() < 1e-6);
        let mid = segment.from.lerp(segment.to, 0.5);
        assert!(radius - (mid - center).length() <= tolerance + 1e-9);
    });

    assert_eq!(prev, arc.to);
    assert!(count > 1);
}

#[test]
fn half_circle() {
    let arc = SvgArc {
        from: point(10.0f64, 0.0),
        to: point(-10.0, 0.0),
        radii: vector(10.0, 10.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    };

    let resolved = arc.to_arc().unwrap();
    assert!((resolved.center - point(0.0, 0.0)).length() < 1e-9);
    assert!((resolved.sweep_angle.radians.abs() - core::f64::consts::PI).abs() < 1e-9);
    assert!((resolved.from() - arc.from).length() < 1e-9);
    assert!((resolved.to() - arc.to).length() < 1e-9);

    assert_on_circle(&arc, point(0.0, 0.0), 10.0, 0.1);
    assert_on_circle(&arc, point(0.0, 0.0), 10.0, 0.001);
}

#[test]
fn sweep_flag_selects_direction() {
    let positive = SvgArc {
        from: point(10.0f64, 0.0),
        to: point(0.0, 10.0),
        radii: vector(10.0, 10.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    };
    let negative = SvgArc {
        flags: ArcFlags {
            large_arc: true,
            sweep: false,
        },
        ..positive
    };

    let a = positive.to_arc().unwrap();
    let b = negative.to_arc().unwrap();
    assert!(a.sweep_angle.radians > 0.0);
    assert!(b.sweep_angle.radians < 0.0);

    // Same circle, opposite ways around.
    assert!((a.center - point(0.0, 0.0)).length() < 1e-9);
    assert!((b.center - point(0.0, 0.0)).length() < 1e-9);
    let turn = a.sweep_angle.radians - b.sweep_angle.radians;
    assert!((turn - 2.0 * core::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn radii_too_small_are_scaled_up() {
    let arc = SvgArc {
        from: point(0.0f64, 0.0),
        to: point(10.0, 0.0),
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags::default(),
    };

    let resolved = arc.to_arc().unwrap();
    assert!((resolved.radii.x - 5.0).abs() < 1e-9);
    assert!((resolved.radii.y - 5.0).abs() < 1e-9);
    assert!((resolved.center - point(5.0, 0.0)).length() < 1e-9);

    assert_on_circle(&arc, point(5.0, 0.0), 5.0, 0.01);
}

#[test]
fn degenerate_arcs_are_lines() {
    let zero_radius = SvgArc {
        from: point(0.0f32, 0.0),
        to: point(10.0, 0.0),
        radii: vector(0.0, 4.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags::default(),
    };
    assert!(zero_radius.is_straight_line());
    assert!(zero_radius.to_arc().is_none());

    let mut segments = 0;
    zero_radius.for_each_flattened(0.1, &mut |segment| {
        assert_eq!(segment.from, point(0.0, 0.0));
        assert_eq!(segment.to, point(10.0, 0.0));
        segments += 1;
    });
    assert_eq!(segments, 1);

    let same_endpoints = SvgArc {
        to: point(0.0, 0.0),
        radii: vector(4.0, 4.0),
        ..zero_radius
    };
    assert!(same_endpoints.is_straight_line());
}

#[test]
fn step_count_with_large_radius() {
    // Half circle of radius 1e6 in f32, where 1 - tolerance / r rounds to 1.
    let arc = Arc {
        center: point(1.0e6f32, 0.0),
        radii: vector(1.0e6, 1.0e6),
        start_angle: Angle::radians(core::f32::consts::PI),
        sweep_angle: Angle::radians(-core::f32::consts::PI),
        x_rotation: Angle::radians(0.0),
    };

    let mut previous = 0;
    for &tolerance in &[1.0f32, 0.1, 0.01, 0.001] {
        let count = arc.flattening_step_count(tolerance);
        assert!(count > previous, "{} steps at tolerance {}", count, tolerance);
        previous = count;

        // Distance between each chord and the arc, computed in f64.
        let half_step = core::f64::consts::PI / count as f64 * 0.5;
        let sagitta = 1.0e6 * (1.0 - half_step.cos());
        assert!(sagitta <= tolerance as f64 * 1.01, "{} > {}", sagitta, tolerance);
    }
}

#[test]
fn step_count_is_bounded() {
    let arc = Arc {
        center: point(0.0f32, 0.0),
        radii: vector(1.0e30, 1.0e30),
        start_angle: Angle::radians(0.0),
        sweep_angle: Angle::radians(3.0),
        x_rotation: Angle::radians(0.0),
    };
    assert_eq!(arc.flattening_step_count(1.0e-4), MAX_FLATTENING_STEPS);

    let tiny = Arc {
        radii: vector(1.0e-3, 1.0e-3),
        ..arc
    };
    assert_eq!(tiny.flattening_step_count(1.0), 1);

    let empty = Arc {
        sweep_angle: Angle::radians(0.0),
        ..arc
    };
    assert_eq!(empty.flattening_step_count(0.1), 1);
}
