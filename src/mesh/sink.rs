//! The builder interface generators write meshes into.
//!
//! A [`MeshSink`] receives entities in a fixed order: optional geometry,
//! points, periodic identifications, face descriptors, volume elements,
//! boundary facets, boundary names. It is then compacted and finalized
//! into its output mesh. Generators never read back from the sink.
//!
//! [`MeshBuffer`](super::MeshBuffer) is the in-memory implementation
//! shipped with this crate; a solver backend implements the trait to
//! receive meshes directly.

use super::entities::{Cuboid, FaceDescriptor, IdentificationKind};
use crate::types::{ElementId, PointId, RegionIndex};

/// Mesh storage that structured generators populate.
pub trait MeshSink {
    /// Finished mesh handle returned by [`MeshSink::finalize`].
    type Output;

    /// Error raised when the sink rejects an operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Attach an exact box geometry bounding the domain.
    ///
    /// Called at most once, before any point is added, and only for 3D
    /// meshes built in cuboid mode.
    fn attach_bounding_box(&mut self, cuboid: Cuboid) -> Result<(), Self::Error>;

    /// Register a point and return its handle.
    fn add_point(&mut self, coord: [f64; 3]) -> Result<PointId, Self::Error>;

    /// Register a volume element.
    fn add_volume_element(
        &mut self,
        region: RegionIndex,
        points: &[PointId],
        curved: bool,
    ) -> Result<ElementId, Self::Error>;

    /// Register a boundary facet (1, 2, 3 or 4 points by mesh dimension).
    fn add_boundary_facet(
        &mut self,
        region: RegionIndex,
        points: &[PointId],
    ) -> Result<(), Self::Error>;

    /// Register surface metadata for a 3D boundary region.
    fn add_face_descriptor(&mut self, descriptor: FaceDescriptor) -> Result<(), Self::Error>;

    /// Declare two points equivalent under identification number `ident`.
    fn add_periodic_identification(
        &mut self,
        master: PointId,
        slave: PointId,
        ident: u32,
        kind: IdentificationKind,
    ) -> Result<(), Self::Error>;

    /// Name a boundary region.
    fn set_boundary_name(&mut self, region: RegionIndex, name: &str) -> Result<(), Self::Error>;

    /// Drop unused entities and finalize numbering.
    fn compact(&mut self) -> Result<(), Self::Error>;

    /// Consume the sink and return the finished mesh.
    fn finalize(self) -> Result<Self::Output, Self::Error>;
}
