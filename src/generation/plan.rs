//! In-memory mesh plan and its commit to a sink.
//!
//! A plan holds everything a generator computed: mapped coordinates,
//! element and facet connectivity, periodic pairs and region names. Only
//! [`MeshPlan::commit`] touches the sink, so a failure while planning
//! (mapping errors in particular) never leaves a partial mesh behind.

use super::boundary::RegionFacets;
use super::elements::Connectivity;
use super::periodic::PeriodicPairs;
use crate::error::{MeshError, MeshResult};
use crate::mesh::{Cuboid, FaceDescriptor, IdentificationKind, MeshSink};
use crate::types::{PointId, RegionIndex};

/// A fully computed structured mesh, not yet written to a sink.
#[derive(Clone, Debug)]
pub struct MeshPlan {
    /// Mesh dimension
    pub dim: usize,
    /// Box geometry to attach before the points
    pub geometry: Option<Cuboid>,
    /// Mapped coordinates indexed by grid point number
    pub coords: Vec<[f64; 3]>,
    /// Volume elements over grid point numbers
    pub elements: Connectivity,
    /// Curved flag applied to every element
    pub curved: bool,
    /// Boundary facets grouped by region, in region order
    pub boundary: Vec<RegionFacets>,
    /// Periodic pairs grouped by identification number
    pub periodic: Vec<PeriodicPairs>,
}

impl MeshPlan {
    /// Number of planned points.
    pub fn n_points(&self) -> usize {
        self.coords.len()
    }

    /// Number of planned volume elements.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of planned boundary facets.
    pub fn n_facets(&self) -> usize {
        self.boundary.iter().map(|r| r.facets.len()).sum()
    }

    /// Number of planned periodic identifications.
    pub fn n_identifications(&self) -> usize {
        self.periodic.iter().map(|p| p.pairs.len()).sum()
    }

    /// Write the plan into `sink` and finalize it.
    ///
    /// Order: geometry, points, identifications, face descriptors (3D),
    /// volume elements, boundary facets, names, compaction.
    pub fn commit<S: MeshSink>(self, mut sink: S) -> MeshResult<S::Output> {
        if let Some(cuboid) = self.geometry {
            sink.attach_bounding_box(cuboid).map_err(MeshError::builder)?;
        }

        let ids = self
            .coords
            .iter()
            .map(|&c| sink.add_point(c))
            .collect::<Result<Vec<PointId>, _>>()
            .map_err(MeshError::builder)?;
        let remap = |points: &[usize]| -> Vec<PointId> { points.iter().map(|&p| ids[p]).collect() };

        for group in &self.periodic {
            for &(master, slave) in &group.pairs {
                sink.add_periodic_identification(
                    ids[master],
                    ids[slave],
                    group.ident,
                    IdentificationKind::Periodic,
                )
                .map_err(MeshError::builder)?;
            }
        }

        if self.dim == 3 {
            for r in &self.boundary {
                sink.add_face_descriptor(FaceDescriptor::boundary(r.region.index))
                    .map_err(MeshError::builder)?;
            }
        }

        for cell in self.elements.iter() {
            sink.add_volume_element(RegionIndex::DOMAIN, &remap(cell), self.curved)
                .map_err(MeshError::builder)?;
        }

        for r in &self.boundary {
            for facet in r.facets.iter() {
                sink.add_boundary_facet(r.region.index, &remap(facet))
                    .map_err(MeshError::builder)?;
            }
        }

        for r in &self.boundary {
            sink.set_boundary_name(r.region.index, r.region.name)
                .map_err(MeshError::builder)?;
        }

        tracing::debug!(
            n_points = ids.len(),
            n_elements = self.elements.len(),
            n_facets = self.n_facets(),
            n_identifications = self.n_identifications(),
            "committed mesh plan"
        );

        sink.compact().map_err(MeshError::builder)?;
        sink.finalize().map_err(MeshError::builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::boundary::line_facets;
    use crate::generation::elements::segments;
    use crate::generation::indexer::GridIndexer;
    use crate::mesh::{BuilderError, MeshBuffer};
    use crate::types::Axis;

    fn line_plan() -> MeshPlan {
        let grid = GridIndexer::line(2);
        MeshPlan {
            dim: 1,
            geometry: None,
            coords: vec![[0.0, 0.0, 0.0], [0.5, 0.0, 0.0], [1.0, 0.0, 0.0]],
            elements: segments(&grid),
            curved: false,
            boundary: line_facets(&grid),
            periodic: vec![PeriodicPairs {
                ident: 1,
                axis: Axis::X,
                pairs: vec![(2, 0)],
            }],
        }
    }

    #[test]
    fn test_commit_into_buffer() {
        let plan = line_plan();
        assert_eq!(plan.n_facets(), 2);
        assert_eq!(plan.n_identifications(), 1);

        let mesh = plan.commit(MeshBuffer::new(1)).unwrap();
        assert_eq!(mesh.n_points(), 3);
        assert_eq!(mesh.n_elements(), 2);
        assert_eq!(mesh.n_facets(), 2);
        assert_eq!(mesh.boundary_name(RegionIndex::new(1)), Some("left"));
        assert_eq!(mesh.identifications[0].master, PointId::new(2));
        assert_eq!(mesh.identifications[0].slave, PointId::new(0));
    }

    #[test]
    fn test_sink_error_propagates() {
        // A 2D buffer rejects segment elements
        let err = line_plan().commit(MeshBuffer::new(2)).unwrap_err();
        assert!(matches!(err, MeshError::Builder(_)));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<BuilderError>().is_some());
    }
}
