//! Structured mesh generation.
//!
//! A generator walks a logical grid of `n₁ × … × n_d` cells over the unit
//! interval, square or cube:
//!
//! 1. [`GridIndexer`] fixes the point numbering and strides
//! 2. [`CoordinateMapper`] maps every grid point to physical coordinates
//! 3. [`elements`] assembles volume elements, [`boundary`] the facets of
//!    each logical side and [`periodic`] the point identifications
//! 4. Everything is collected in a [`MeshPlan`] and committed to a
//!    [`MeshSink`](crate::mesh::MeshSink)
//!
//! # Example
//!
//! ```
//! use structmesh::generation::make_structured_3d_mesh;
//! use structmesh::types::Periodicity;
//!
//! let mesh = make_structured_3d_mesh(false, 2, None, None, Periodicity::none(), None, true)
//!     .unwrap();
//! assert_eq!(mesh.n_points(), 27);
//! assert_eq!(mesh.n_elements(), 48);
//! ```

pub mod boundary;
pub mod elements;
mod generator;
mod indexer;
mod mapping;
pub mod periodic;
mod plan;

pub use boundary::{BOX_REGIONS, BoundaryRegion, LINE_REGIONS, PLANE_REGIONS, RegionFacets};
pub use elements::{Connectivity, HEX_TO_TETS, QUAD_TO_TRIANGLES};
pub use generator::{
    Structured1D, Structured2D, Structured3D, make_1d_mesh, make_hex_mesh, make_quad_mesh,
    make_structured_2d_mesh, make_structured_3d_mesh,
};
pub use indexer::{FaceSweep, GridIndexer, SweepDirection};
pub use mapping::CoordinateMapper;
pub use periodic::PeriodicPairs;
pub use plan::MeshPlan;
