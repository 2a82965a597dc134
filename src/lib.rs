//! Ear-clipping triangulation of simple polygons with holes.
//!
//! Holes are merged into the outer ring through bridge edges
//! ([`triangulation::BridgeHoles`]), the ring is cut into triangles by
//! smallest-angle ear clipping, and sliver triangles are then repaired by
//! diagonal swaps until no swap raises the minimum angle.
//!
//! ```
//! use earmesh::geometry::Polygon;
//! use earmesh::math::Point2;
//! use earmesh::triangulation::Triangulate;
//!
//! let outer = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ];
//! let bridged = Polygon::new(outer).into_ring()?;
//! let result = Triangulate::new(&bridged.ring).execute()?;
//! assert_eq!(result.len(), 2);
//! # Ok::<(), earmesh::EarmeshError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod query;
pub mod triangulation;

pub use error::{EarmeshError, Result};
pub use geometry::Polygon;
pub use triangulation::{Triangulate, Triangulation, TriangulationParams};
