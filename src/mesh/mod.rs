//! Mesh representation.
//!
//! Provides the mesh side of structured generation:
//! - Entity types (elements, facets, identifications, face descriptors)
//! - The [`MeshSink`] builder interface generators write into
//! - [`MeshBuffer`], the in-memory sink producing a [`StructuredMesh`]
//! - Signed measures for orientation and partition checks
//! - Gmsh mesh file I/O

mod buffer;
mod entities;
pub mod gmsh;
pub mod measures;
mod sink;
mod structured;

pub use buffer::{BuilderError, MeshBuffer};
pub use entities::{
    BoundaryFacet, Cuboid, ElementShape, FaceDescriptor, IdentificationKind,
    PeriodicIdentification, VolumeElement,
};
pub use gmsh::{GmshError, read_gmsh_mesh, write_gmsh_mesh};
pub use sink::MeshSink;
pub use structured::StructuredMesh;
