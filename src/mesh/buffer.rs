//! In-memory mesh sink.
//!
//! [`MeshBuffer`] validates every registration, stores entities in plain
//! vectors and finalizes into a [`StructuredMesh`]. It is the default sink
//! of the generators and doubles as a recording test double.
//!
//! # Example
//!
//! ```
//! use structmesh::mesh::{MeshBuffer, MeshSink};
//! use structmesh::types::RegionIndex;
//!
//! let mut buf = MeshBuffer::new(1);
//! let a = buf.add_point([0.0, 0.0, 0.0]).unwrap();
//! let b = buf.add_point([1.0, 0.0, 0.0]).unwrap();
//! buf.add_volume_element(RegionIndex::DOMAIN, &[a, b], false).unwrap();
//! let mesh = buf.finalize().unwrap();
//! assert_eq!(mesh.n_elements(), 1);
//! ```

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use super::entities::{
    BoundaryFacet, Cuboid, ElementShape, FaceDescriptor, IdentificationKind,
    PeriodicIdentification, VolumeElement,
};
use super::sink::MeshSink;
use super::structured::StructuredMesh;
use crate::types::{ElementId, PointId, RegionIndex};

/// Operations rejected by [`MeshBuffer`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuilderError {
    /// A point handle that this buffer never issued.
    #[error("unknown point {0}")]
    UnknownPoint(PointId),

    /// Wrong number of points for the mesh dimension.
    #[error("{entity} with {arity} points is not valid in a {dim}D mesh")]
    Arity {
        entity: &'static str,
        arity: usize,
        dim: usize,
    },

    /// Region 0 is reserved.
    #[error("region index must be positive")]
    ZeroRegion,

    /// Identification number 0 is reserved.
    #[error("identification number must be positive")]
    ZeroIdentification,

    /// The same pair was registered twice under one number.
    #[error("duplicate identification {master} -> {slave} under number {ident}")]
    DuplicateIdentification {
        master: PointId,
        slave: PointId,
        ident: u32,
    },

    /// A point was identified with itself.
    #[error("point {0} cannot be identified with itself")]
    SelfIdentification(PointId),

    /// 3D facets need their face descriptor first.
    #[error("facet of region {0} added before its face descriptor")]
    MissingFaceDescriptor(RegionIndex),

    /// Geometry attached to a non-3D mesh or after points were added.
    #[error("bounding box must be attached to an empty 3D mesh")]
    MisplacedGeometry,

    /// A coordinate with NaN or infinite components.
    #[error("point coordinate {0:?} is not finite")]
    NonFiniteCoordinate([f64; 3]),
}

/// In-memory implementation of [`MeshSink`].
#[derive(Clone, Debug)]
pub struct MeshBuffer {
    dim: usize,
    geometry: Option<Cuboid>,
    points: Vec<[f64; 3]>,
    elements: Vec<VolumeElement>,
    facets: Vec<BoundaryFacet>,
    face_descriptors: Vec<FaceDescriptor>,
    identifications: Vec<PeriodicIdentification>,
    identification_keys: HashSet<(PointId, PointId, u32)>,
    boundary_names: BTreeMap<RegionIndex, String>,
}

impl MeshBuffer {
    /// Create an empty buffer for a mesh of dimension `dim`.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is not 1, 2 or 3.
    pub fn new(dim: usize) -> Self {
        assert!((1..=3).contains(&dim), "Invalid mesh dimension {}", dim);
        Self {
            dim,
            geometry: None,
            points: Vec::new(),
            elements: Vec::new(),
            facets: Vec::new(),
            face_descriptors: Vec::new(),
            identifications: Vec::new(),
            identification_keys: HashSet::new(),
            boundary_names: BTreeMap::new(),
        }
    }

    /// Create an empty buffer with room for `n_points` points.
    pub fn with_capacity(dim: usize, n_points: usize) -> Self {
        let mut buf = Self::new(dim);
        buf.points.reserve_exact(n_points);
        buf
    }

    /// Mesh dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of points registered so far.
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Number of volume elements registered so far.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of boundary facets registered so far.
    pub fn n_facets(&self) -> usize {
        self.facets.len()
    }

    fn check_points(&self, points: &[PointId]) -> Result<(), BuilderError> {
        match points.iter().find(|p| p.get() >= self.points.len()) {
            Some(&p) => Err(BuilderError::UnknownPoint(p)),
            None => Ok(()),
        }
    }

    fn check_region(region: RegionIndex) -> Result<(), BuilderError> {
        if region.get() == 0 {
            Err(BuilderError::ZeroRegion)
        } else {
            Ok(())
        }
    }
}

impl MeshSink for MeshBuffer {
    type Output = StructuredMesh;
    type Error = BuilderError;

    fn attach_bounding_box(&mut self, cuboid: Cuboid) -> Result<(), BuilderError> {
        if self.dim != 3 || !self.points.is_empty() || self.geometry.is_some() {
            return Err(BuilderError::MisplacedGeometry);
        }
        self.geometry = Some(cuboid);
        Ok(())
    }

    fn add_point(&mut self, coord: [f64; 3]) -> Result<PointId, BuilderError> {
        if coord.iter().any(|c| !c.is_finite()) {
            return Err(BuilderError::NonFiniteCoordinate(coord));
        }
        let id = PointId::new(self.points.len());
        self.points.push(coord);
        Ok(id)
    }

    fn add_volume_element(
        &mut self,
        region: RegionIndex,
        points: &[PointId],
        curved: bool,
    ) -> Result<ElementId, BuilderError> {
        Self::check_region(region)?;
        let shape = ElementShape::volume(self.dim, points.len()).ok_or(BuilderError::Arity {
            entity: "volume element",
            arity: points.len(),
            dim: self.dim,
        })?;
        self.check_points(points)?;

        let id = ElementId::new(self.elements.len());
        self.elements.push(VolumeElement {
            region,
            shape,
            points: points.to_vec(),
            curved,
        });
        Ok(id)
    }

    fn add_boundary_facet(
        &mut self,
        region: RegionIndex,
        points: &[PointId],
    ) -> Result<(), BuilderError> {
        Self::check_region(region)?;
        let shape = ElementShape::facet(self.dim, points.len()).ok_or(BuilderError::Arity {
            entity: "boundary facet",
            arity: points.len(),
            dim: self.dim,
        })?;
        self.check_points(points)?;
        if self.dim == 3 && !self.face_descriptors.iter().any(|fd| fd.surface == region) {
            return Err(BuilderError::MissingFaceDescriptor(region));
        }

        self.facets.push(BoundaryFacet {
            region,
            shape,
            points: points.to_vec(),
        });
        Ok(())
    }

    fn add_face_descriptor(&mut self, descriptor: FaceDescriptor) -> Result<(), BuilderError> {
        Self::check_region(descriptor.surface)?;
        self.face_descriptors.push(descriptor);
        Ok(())
    }

    fn add_periodic_identification(
        &mut self,
        master: PointId,
        slave: PointId,
        ident: u32,
        kind: IdentificationKind,
    ) -> Result<(), BuilderError> {
        if ident == 0 {
            return Err(BuilderError::ZeroIdentification);
        }
        self.check_points(&[master, slave])?;
        if master == slave {
            return Err(BuilderError::SelfIdentification(master));
        }
        if !self.identification_keys.insert((master, slave, ident)) {
            return Err(BuilderError::DuplicateIdentification {
                master,
                slave,
                ident,
            });
        }
        self.identifications.push(PeriodicIdentification {
            master,
            slave,
            ident,
            kind,
        });
        Ok(())
    }

    fn set_boundary_name(&mut self, region: RegionIndex, name: &str) -> Result<(), BuilderError> {
        Self::check_region(region)?;
        self.boundary_names.insert(region, name.to_string());
        Ok(())
    }

    fn compact(&mut self) -> Result<(), BuilderError> {
        let mut used = vec![false; self.points.len()];
        let referenced = self
            .elements
            .iter()
            .flat_map(|e| e.points.iter())
            .chain(self.facets.iter().flat_map(|f| f.points.iter()));
        for &p in referenced {
            used[p.get()] = true;
        }
        for id in &self.identifications {
            used[id.master.get()] = true;
            used[id.slave.get()] = true;
        }

        let n_unused = used.iter().filter(|&&u| !u).count();
        if n_unused == 0 {
            return Ok(());
        }
        tracing::warn!(n_unused, "compaction dropped unreferenced points");

        // old index -> new index, only valid for used points
        let mut renumber = vec![PointId::new(usize::MAX); self.points.len()];
        let mut kept = Vec::with_capacity(self.points.len() - n_unused);
        for (old, &coord) in self.points.iter().enumerate() {
            if used[old] {
                renumber[old] = PointId::new(kept.len());
                kept.push(coord);
            }
        }
        self.points = kept;

        for p in self
            .elements
            .iter_mut()
            .flat_map(|e| e.points.iter_mut())
            .chain(self.facets.iter_mut().flat_map(|f| f.points.iter_mut()))
        {
            *p = renumber[p.get()];
        }
        for id in &mut self.identifications {
            id.master = renumber[id.master.get()];
            id.slave = renumber[id.slave.get()];
        }
        self.identification_keys = self
            .identifications
            .iter()
            .map(|id| (id.master, id.slave, id.ident))
            .collect();
        Ok(())
    }

    fn finalize(self) -> Result<StructuredMesh, BuilderError> {
        Ok(StructuredMesh {
            dim: self.dim,
            points: self.points,
            elements: self.elements,
            facets: self.facets,
            face_descriptors: self.face_descriptors,
            identifications: self.identifications,
            boundary_names: self.boundary_names,
            geometry: self.geometry,
        })
    }
}
