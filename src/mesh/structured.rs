//! Finished mesh produced by [`MeshBuffer`](super::MeshBuffer).
//!
//! The mesh stores:
//! - Point coordinates (always 3 components, unused ones are 0)
//! - Volume elements with shape, corner points and curved flag
//! - Boundary facets tagged by region, wound outward
//! - Face descriptors (3D only), periodic identifications and region names
//!
//! Nothing is mutated after finalization.

use std::collections::BTreeMap;

use super::entities::{BoundaryFacet, Cuboid, FaceDescriptor, PeriodicIdentification, VolumeElement};
use super::measures;
use crate::types::{PointId, RegionIndex};

/// A finalized mesh.
#[derive(Clone, Debug)]
pub struct StructuredMesh {
    /// Spatial dimension (1, 2 or 3)
    pub dim: usize,

    /// Point coordinates indexed by [`PointId`]
    pub points: Vec<[f64; 3]>,

    /// Volume elements in registration order
    pub elements: Vec<VolumeElement>,

    /// Boundary facets in registration order
    pub facets: Vec<BoundaryFacet>,

    /// Surface descriptors (3D only)
    pub face_descriptors: Vec<FaceDescriptor>,

    /// Periodic point identifications
    pub identifications: Vec<PeriodicIdentification>,

    /// Boundary region names
    pub boundary_names: BTreeMap<RegionIndex, String>,

    /// Exact bounding geometry, if one was attached
    pub geometry: Option<Cuboid>,
}

impl StructuredMesh {
    /// Number of points.
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Number of volume elements.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of boundary facets.
    pub fn n_facets(&self) -> usize {
        self.facets.len()
    }

    /// Coordinates of a point.
    #[inline]
    pub fn coord(&self, p: PointId) -> [f64; 3] {
        self.points[p]
    }

    /// Coordinates of the corners of element `k`.
    pub fn element_coords(&self, k: usize) -> Vec<[f64; 3]> {
        self.elements[k].points.iter().map(|&p| self.coord(p)).collect()
    }

    /// Coordinates of the corners of facet `f`.
    pub fn facet_coords(&self, f: usize) -> Vec<[f64; 3]> {
        self.facets[f].points.iter().map(|&p| self.coord(p)).collect()
    }

    /// Signed measure (length, area or volume) of element `k`.
    pub fn element_measure(&self, k: usize) -> f64 {
        measures::measure(self.elements[k].shape, &self.element_coords(k))
    }

    /// Sum of unsigned element measures.
    pub fn total_measure(&self) -> f64 {
        (0..self.n_elements())
            .map(|k| self.element_measure(k).abs())
            .sum()
    }

    /// Boundary facets of one region.
    pub fn facets_in_region(&self, region: RegionIndex) -> impl Iterator<Item = &BoundaryFacet> {
        self.facets.iter().filter(move |f| f.region == region)
    }

    /// Distinct boundary regions in ascending order.
    pub fn boundary_regions(&self) -> Vec<RegionIndex> {
        let mut regions: Vec<_> = self.facets.iter().map(|f| f.region).collect();
        regions.sort();
        regions.dedup();
        regions
    }

    /// Name of a boundary region.
    pub fn boundary_name(&self, region: RegionIndex) -> Option<&str> {
        self.boundary_names.get(&region).map(String::as_str)
    }

    /// Region carrying the given name.
    pub fn region_by_name(&self, name: &str) -> Option<RegionIndex> {
        self.boundary_names
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(&r, _)| r)
    }

    /// Identifications grouped by identification number.
    pub fn identification_groups(&self) -> BTreeMap<u32, Vec<PeriodicIdentification>> {
        let mut groups: BTreeMap<u32, Vec<PeriodicIdentification>> = BTreeMap::new();
        for id in &self.identifications {
            groups.entry(id.ident).or_default().push(*id);
        }
        groups
    }

    /// Whether any periodic identification is present.
    pub fn is_periodic(&self) -> bool {
        !self.identifications.is_empty()
    }

    /// Whether any element is flagged curved.
    pub fn has_curved_elements(&self) -> bool {
        self.elements.iter().any(|e| e.curved)
    }
}
