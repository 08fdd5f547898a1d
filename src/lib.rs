//! # structmesh
//!
//! Structured mesh generation for finite element solvers.
//!
//! This crate builds meshes of the unit interval, square and cube from a
//! logical grid of cells:
//! - 1D segments, 2D quadrilaterals or triangles, 3D hexahedra or
//!   tetrahedra
//! - Named boundary regions with outward-wound facets
//! - Periodic point identifications per axis
//! - Optional coordinate mappings for curved or stretched domains
//! - Output through the [`MeshSink`] trait, with an in-memory
//!   [`StructuredMesh`] and Gmsh export by default
//!
//! ## Example
//!
//! ```
//! use structmesh::generation::Structured3D;
//! use structmesh::types::RegionIndex;
//!
//! let mesh = Structured3D::with_resolution(2, 3, 4).tetrahedra().generate().unwrap();
//! assert_eq!(mesh.n_elements(), 6 * 24);
//! assert_eq!(mesh.boundary_name(RegionIndex::new(3)), Some("back"));
//! assert!((mesh.total_measure() - 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod generation;
pub mod mesh;
pub mod types;

// Re-export main types for convenience
pub use error::{ConfigurationError, MappingError, MappingFailure, MeshError, MeshResult};
pub use generation::{
    CoordinateMapper, GridIndexer, MeshPlan, Structured1D, Structured2D, Structured3D,
    make_1d_mesh, make_hex_mesh, make_quad_mesh, make_structured_2d_mesh,
    make_structured_3d_mesh,
};
pub use mesh::{
    BuilderError, ElementShape, IdentificationKind, MeshBuffer, MeshSink, StructuredMesh,
};
pub use types::{
    Axis, ElementId, Periodicity, PointId, RegionIndex, Resolution1D, Resolution2D, Resolution3D,
    Side,
};
