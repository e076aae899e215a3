#![deny(bare_trait_objects)]

//! Subpath closure and polygon approximation for 2D vector paths.
//!
//! # Crates
//!
//! This meta-crate (`fillconv`) reexports the following sub-crates for convenience:
//!
//! * **fillconv_geom** - elliptic arcs and their flattening, along with the line
//!   segments and bézier curves of `lyon_geom`.
//! * **fillconv_path** - Subpaths, their implicit closing segment and their
//!   polyline/polygon approximations.
//!
//! Each `fillconv_<name>` crate is reexported as a `<name>` module in `fillconv`. For example:
//!
//! ```ignore
//! extern crate fillconv_path;
//! use fillconv_path::Subpath;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate fillconv;
//! use fillconv::path::Subpath;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Approximating an open subpath
//!
//! A subpath that does not end where it starts behaves, for containment purposes,
//! as if a straight segment joined its end back to its start. The polygon
//! approximation is meant to be read as a loop:
//!
//! ```
//! use fillconv::math::point;
//! use fillconv::path::Subpath;
//!
//! let subpath = Subpath::builder(point(0.0, 0.0))
//!     .line_to(point(10.0, 0.0))
//!     .cubic_bezier_to(point(15.0, 5.0), point(15.0, 10.0), point(10.0, 10.0))
//!     .line_to(point(0.0, 10.0))
//!     .build()
//!     .unwrap();
//!
//! // The visible segments are untouched, the closing segment is exposed separately.
//! assert_eq!(subpath.segments().len(), 3);
//! assert_eq!(subpath.closed_segments().count(), 4);
//!
//! let polygon = subpath.polygon_approximation();
//! assert_eq!(polygon[0], point(0.0, 0.0));
//! assert_eq!(polygon[polygon.len() - 1], point(0.0, 10.0));
//!
//! // Edges include the implicit one from the last point back to the first.
//! let last_edge = polygon.edges().last().unwrap();
//! assert_eq!(last_edge.to, point(0.0, 0.0));
//! ```

pub extern crate fillconv_geom;
pub extern crate fillconv_path;

pub use fillconv_geom as geom;
pub use fillconv_path as path;

pub use path::math;
