#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![no_std]

//! Curve geometry for subpath segments.
//!
//! Lines, quadratic and cubic bézier curves come from `lyon_geom` and are reexported
//! here, along with its `euclid` aliases. This crate adds the elliptic arcs of the
//! SVG endpoint parametrization, whose center is only known once the point the arc
//! starts from is.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//! The tolerance is the maximum distance between the curve and its approximation.
//! Every flattening routine used here ends exactly on the curve's `to` point, so
//! consecutive curves chain without gaps.
//!
//! This crate is reexported in `fillconv`.

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use lyon_geom;
pub use lyon_geom::euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod arc;

#[doc(inline)]
pub use crate::arc::{Arc, ArcFlags, SvgArc};

pub use lyon_geom::{
    point, vector, Angle, Box2D, CubicBezierSegment, LineSegment, Point, QuadraticBezierSegment,
    Scalar, Vector,
};
