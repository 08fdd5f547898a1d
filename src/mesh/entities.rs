//! Mesh entities stored by a finished mesh.
//!
//! Orientation conventions:
//! - Volume elements keep the corner order they were registered with.
//! - Boundary facets are wound so that their induced normal
//!   (right-hand rule over the point order) points out of the domain.
//!   In 2D the domain interior lies to the left of each boundary edge.

use std::fmt;

use crate::types::{PointId, RegionIndex};

/// Shape of a volume element or boundary facet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementShape {
    /// Single point (1D boundary marker)
    Point,
    /// Two-point line segment
    Segment,
    /// Three-point triangle
    Triangle,
    /// Four-point quadrilateral
    Quadrilateral,
    /// Four-point tetrahedron
    Tetrahedron,
    /// Eight-point hexahedron
    Hexahedron,
}

impl ElementShape {
    /// Number of corner points.
    pub const fn n_points(self) -> usize {
        match self {
            ElementShape::Point => 1,
            ElementShape::Segment => 2,
            ElementShape::Triangle => 3,
            ElementShape::Quadrilateral => 4,
            ElementShape::Tetrahedron => 4,
            ElementShape::Hexahedron => 8,
        }
    }

    /// Topological dimension of the shape.
    pub const fn dim(self) -> usize {
        match self {
            ElementShape::Point => 0,
            ElementShape::Segment => 1,
            ElementShape::Triangle | ElementShape::Quadrilateral => 2,
            ElementShape::Tetrahedron | ElementShape::Hexahedron => 3,
        }
    }

    /// Volume element shape for a given mesh dimension and point count.
    pub fn volume(mesh_dim: usize, n_points: usize) -> Option<Self> {
        match (mesh_dim, n_points) {
            (1, 2) => Some(ElementShape::Segment),
            (2, 3) => Some(ElementShape::Triangle),
            (2, 4) => Some(ElementShape::Quadrilateral),
            (3, 4) => Some(ElementShape::Tetrahedron),
            (3, 8) => Some(ElementShape::Hexahedron),
            _ => None,
        }
    }

    /// Boundary facet shape for a given mesh dimension and point count.
    pub fn facet(mesh_dim: usize, n_points: usize) -> Option<Self> {
        match (mesh_dim, n_points) {
            (1, 1) => Some(ElementShape::Point),
            (2, 2) => Some(ElementShape::Segment),
            (3, 3) => Some(ElementShape::Triangle),
            (3, 4) => Some(ElementShape::Quadrilateral),
            _ => None,
        }
    }
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementShape::Point => "point",
            ElementShape::Segment => "segment",
            ElementShape::Triangle => "triangle",
            ElementShape::Quadrilateral => "quadrilateral",
            ElementShape::Tetrahedron => "tetrahedron",
            ElementShape::Hexahedron => "hexahedron",
        };
        f.write_str(name)
    }
}

/// A volume element: the cells of the mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeElement {
    /// Material region (always [`RegionIndex::DOMAIN`] for generated meshes)
    pub region: RegionIndex,
    /// Element shape
    pub shape: ElementShape,
    /// Corner points in element order
    pub points: Vec<PointId>,
    /// Whether edges may be curved (a coordinate mapping was applied)
    pub curved: bool,
}

/// A boundary facet tagged with its boundary region.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryFacet {
    /// Boundary region
    pub region: RegionIndex,
    /// Facet shape
    pub shape: ElementShape,
    /// Corner points, wound outward
    pub points: Vec<PointId>,
}

/// Surface metadata for one 3D boundary region.
///
/// Must be registered before any facet of its region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceDescriptor {
    /// Surface number (equal to the boundary region)
    pub surface: RegionIndex,
    /// Domain on the inner side of the surface
    pub domain_in: u32,
    /// Boundary condition index
    pub bc: u32,
}

impl FaceDescriptor {
    /// Descriptor for a boundary region of the single generated domain.
    pub fn boundary(region: RegionIndex) -> Self {
        Self {
            surface: region,
            domain_in: RegionIndex::DOMAIN.get(),
            bc: region.get(),
        }
    }
}

/// Kind of point identification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentificationKind {
    /// Points related by a full-period translation
    Periodic,
    /// Geometrically coincident points to be merged
    Coincident,
}

/// Declared equivalence of two boundary points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicIdentification {
    /// Point on the max side of the periodic axis
    pub master: PointId,
    /// Point on the min side of the periodic axis
    pub slave: PointId,
    /// Group number shared by all pairs of one periodic direction
    pub ident: u32,
    /// Identification kind
    pub kind: IdentificationKind,
}

/// Axis-aligned box given by two opposite corners.
///
/// Corners are stored as given; a mapping may swap their order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    /// Image of the logical corner (0, 0, 0)
    pub corner1: [f64; 3],
    /// Image of the logical corner (1, 1, 1)
    pub corner2: [f64; 3],
}

impl Cuboid {
    /// Create a box from two corners.
    pub fn new(corner1: [f64; 3], corner2: [f64; 3]) -> Self {
        Self { corner1, corner2 }
    }

    /// Unit cube [0,1]³.
    pub fn unit() -> Self {
        Self::new([0.0; 3], [1.0; 3])
    }

    /// Edge lengths along each axis.
    pub fn extent(&self) -> [f64; 3] {
        std::array::from_fn(|d| (self.corner2[d] - self.corner1[d]).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_lookup() {
        assert_eq!(ElementShape::volume(1, 2), Some(ElementShape::Segment));
        assert_eq!(ElementShape::volume(3, 4), Some(ElementShape::Tetrahedron));
        assert_eq!(ElementShape::volume(3, 8), Some(ElementShape::Hexahedron));
        assert_eq!(ElementShape::volume(2, 8), None);

        assert_eq!(ElementShape::facet(1, 1), Some(ElementShape::Point));
        assert_eq!(ElementShape::facet(3, 3), Some(ElementShape::Triangle));
        assert_eq!(ElementShape::facet(2, 3), None);
    }

    #[test]
    fn test_shape_arity_matches_lookup() {
        for shape in [
            ElementShape::Segment,
            ElementShape::Triangle,
            ElementShape::Quadrilateral,
            ElementShape::Tetrahedron,
            ElementShape::Hexahedron,
        ] {
            assert_eq!(
                ElementShape::volume(shape.dim(), shape.n_points()),
                Some(shape)
            );
        }
    }

    #[test]
    fn test_face_descriptor() {
        let fd = FaceDescriptor::boundary(RegionIndex::new(5));
        assert_eq!(fd.surface.get(), 5);
        assert_eq!(fd.domain_in, 1);
        assert_eq!(fd.bc, 5);
    }

    #[test]
    fn test_cuboid_extent() {
        let c = Cuboid::new([1.0, 0.0, 2.0], [0.0, 3.0, 4.0]);
        assert_eq!(c.extent(), [1.0, 3.0, 2.0]);
        assert_eq!(Cuboid::unit().extent(), [1.0; 3]);
    }
}
