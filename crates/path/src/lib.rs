#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Subpaths, their implicit closure and their linear approximations.
//!
//! A [`Subpath`] is a start point followed by an ordered chain of [`PathSegment`]s.
//! From it this crate derives:
//!
//! - a guaranteed-closed chain of segments (see [`Subpath::closed_segments`]),
//! - a piecewise-linear approximation of each segment and of the whole subpath
//!   (see [`Subpath::polygon_approximation`]), suitable for winding-number and
//!   containment queries.
//!
//! This crate is reexported in `fillconv`.
//!
//! # Examples
//!
//! ```
//! # extern crate fillconv_path;
//! # fn main() {
//! use fillconv_path::{Subpath, PathSegment};
//! use fillconv_path::math::point;
//!
//! let subpath = Subpath::new(
//!     point(0.0, 0.0),
//!     vec![
//!         PathSegment::line(point(10.0, 0.0)),
//!         PathSegment::quadratic(point(10.0, 10.0), point(0.0, 10.0)),
//!     ],
//!     false,
//! ).unwrap();
//!
//! // The subpath does not end where it starts, a closing segment is synthesized.
//! assert_eq!(subpath.closing_segment(), Some(&PathSegment::line(point(0.0, 0.0))));
//!
//! for edge in subpath.polygon_approximation().edges() {
//!     println!("{:?}", edge);
//! }
//! # }
//! ```
//!

pub use fillconv_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod error;
mod options;
pub mod polyline;
pub mod segment;
pub mod subpath;

#[doc(inline)]
pub use crate::builder::SubpathBuilder;
pub use crate::error::{ErrorKind, SubpathError};
pub use crate::geom::ArcFlags;
pub use crate::options::FlattenOptions;
#[doc(inline)]
pub use crate::polyline::{Polygon, Polyline};
#[doc(inline)]
pub use crate::segment::PathSegment;
#[doc(inline)]
pub use crate::subpath::{Flattening, Subpath};

pub mod math {
    //! f32 version of the fillconv_geom types used everywhere.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Box2D<f32>```.
    pub type Box2D = euclid::default::Box2D<f32>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }
}
