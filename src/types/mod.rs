//! Strongly-typed domain types for safer APIs.
//!
//! This module provides newtypes and structured types to make the
//! generator APIs self-documenting and prevent parameter mix-ups.
//!
//! # Design Philosophy
//!
//! - **Newtypes prevent mix-ups**: a `PointId` cannot be passed where an
//!   `ElementId` is expected
//! - **Validated construction**: `Resolution3D::resolve` turns optional
//!   parameters into a checked resolution or a `ConfigurationError`
//! - **Zero-cost abstractions**: index newtypes are `#[repr(transparent)]`
//!
//! # Example
//!
//! ```
//! use structmesh::types::{Axis, Periodicity, Resolution3D};
//!
//! let res = Resolution3D::resolve(8, None, None).unwrap();
//! assert_eq!(res.total_points(), 729);
//!
//! let periodic = Periodicity::none().with_x();
//! assert!(periodic.is_periodic(Axis::X));
//! ```

mod indices;
mod periodicity;
mod resolution;
mod sides;

pub use indices::{ElementId, PointId, RegionIndex};
pub use periodicity::Periodicity;
pub use resolution::{Resolution1D, Resolution2D, Resolution3D};
pub use sides::{Axis, Side};
