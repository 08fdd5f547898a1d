//! Structured mesh generators.
//!
//! Builders describe one structured mesh each:
//!
//! ```
//! use structmesh::generation::Structured2D;
//!
//! let mesh = Structured2D::new(4, 3)
//!     .triangles()
//!     .periodic_x()
//!     .with_mapping(|[x, y]| [2.0 * x, y])
//!     .generate()
//!     .unwrap();
//! assert_eq!(mesh.n_elements(), 24);
//! assert_eq!(mesh.identifications.len(), 4);
//! assert!(mesh.has_curved_elements());
//! ```
//!
//! The `make_*` functions are positional shorthands over the builders.

use super::boundary::{box_facets, line_facets, plane_facets};
use super::elements::{hexes_or_tets, quads_or_triangles, segments};
use super::indexer::GridIndexer;
use super::mapping::CoordinateMapper;
use super::periodic::periodic_pairs;
use super::plan::MeshPlan;
use crate::error::{MappingError, MeshResult};
use crate::mesh::{Cuboid, MeshBuffer, MeshSink, StructuredMesh};
use crate::types::{Periodicity, Resolution1D, Resolution2D, Resolution3D};

fn map_coords<const D: usize>(
    mapper: &CoordinateMapper<D>,
    grid: &GridIndexer<D>,
) -> Result<Vec<[f64; 3]>, MappingError> {
    #[cfg(feature = "parallel")]
    {
        mapper.map_grid_parallel(grid)
    }
    #[cfg(not(feature = "parallel"))]
    {
        mapper.map_grid(grid)
    }
}

/// 1D chain of segments over `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Structured1D {
    n: usize,
    periodic: bool,
    mapping: CoordinateMapper<1>,
    curved: Option<bool>,
}

impl Structured1D {
    /// `n` segments.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            periodic: false,
            mapping: CoordinateMapper::identity(),
            curved: None,
        }
    }

    /// Identify the two end points.
    pub fn periodic(mut self) -> Self {
        self.periodic = true;
        self
    }

    /// Set periodicity explicitly.
    pub fn with_periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    /// Map logical coordinates with `f`.
    pub fn with_mapping<F>(self, f: F) -> Self
    where
        F: Fn([f64; 1]) -> [f64; 1] + Send + Sync + 'static,
    {
        self.with_mapper(CoordinateMapper::new(f))
    }

    /// Map logical coordinates with a prepared mapper.
    pub fn with_mapper(mut self, mapper: CoordinateMapper<1>) -> Self {
        self.mapping = mapper;
        self
    }

    /// Override the curved flag; `None` derives it from the mapping.
    pub fn with_curved(mut self, curved: Option<bool>) -> Self {
        self.curved = curved;
        self
    }

    /// Validated resolution.
    pub fn resolution(&self) -> MeshResult<Resolution1D> {
        Ok(Resolution1D::try_new(self.n)?)
    }

    /// Compute the mesh without writing it anywhere.
    pub fn plan(&self) -> MeshResult<MeshPlan> {
        let res = self.resolution()?;
        let grid = GridIndexer::line(res.n());
        let coords = map_coords(&self.mapping, &grid)?;
        let periodicity = Periodicity::new(self.periodic, false, false);
        tracing::debug!(n = res.n(), periodic = self.periodic, "planned 1D mesh");

        Ok(MeshPlan {
            dim: 1,
            geometry: None,
            coords,
            elements: segments(&grid),
            curved: self.curved.unwrap_or(!self.mapping.is_identity()),
            boundary: line_facets(&grid),
            periodic: periodic_pairs(&grid, periodicity),
        })
    }

    /// Generate into an in-memory [`StructuredMesh`].
    pub fn generate(&self) -> MeshResult<StructuredMesh> {
        let res = self.resolution()?;
        self.generate_into(MeshBuffer::with_capacity(1, res.total_points()))
    }

    /// Generate into `sink`.
    pub fn generate_into<S: MeshSink>(&self, sink: S) -> MeshResult<S::Output> {
        self.plan()?.commit(sink)
    }
}

/// 2D grid of quadrilaterals or triangles over the unit square.
#[derive(Clone, Debug)]
pub struct Structured2D {
    nx: usize,
    ny: usize,
    quads: bool,
    periodicity: Periodicity,
    mapping: CoordinateMapper<2>,
    curved: Option<bool>,
}

impl Structured2D {
    /// `nx × ny` quadrilaterals.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            quads: true,
            periodicity: Periodicity::none(),
            mapping: CoordinateMapper::identity(),
            curved: None,
        }
    }

    /// Split every cell into two triangles.
    pub fn triangles(mut self) -> Self {
        self.quads = false;
        self
    }

    /// Choose quadrilaterals (`true`) or triangles (`false`).
    pub fn with_quads(mut self, quads: bool) -> Self {
        self.quads = quads;
        self
    }

    /// Identify the left and right sides.
    pub fn periodic_x(mut self) -> Self {
        self.periodicity.x = true;
        self
    }

    /// Identify the bottom and top sides.
    pub fn periodic_y(mut self) -> Self {
        self.periodicity.y = true;
        self
    }

    /// Set periodicity explicitly; the z flag is ignored.
    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = Periodicity::new(periodicity.x, periodicity.y, false);
        self
    }

    /// Map logical coordinates with `f`.
    pub fn with_mapping<F>(self, f: F) -> Self
    where
        F: Fn([f64; 2]) -> [f64; 2] + Send + Sync + 'static,
    {
        self.with_mapper(CoordinateMapper::new(f))
    }

    /// Map logical coordinates with a prepared mapper.
    pub fn with_mapper(mut self, mapper: CoordinateMapper<2>) -> Self {
        self.mapping = mapper;
        self
    }

    /// Override the curved flag; `None` derives it from the mapping.
    pub fn with_curved(mut self, curved: Option<bool>) -> Self {
        self.curved = curved;
        self
    }

    /// Validated resolution.
    pub fn resolution(&self) -> MeshResult<Resolution2D> {
        Ok(Resolution2D::try_new(self.nx, self.ny)?)
    }

    /// Compute the mesh without writing it anywhere.
    pub fn plan(&self) -> MeshResult<MeshPlan> {
        let res = self.resolution()?;
        let grid = GridIndexer::plane(res.nx(), res.ny());
        let coords = map_coords(&self.mapping, &grid)?;
        tracing::debug!(
            nx = res.nx(),
            ny = res.ny(),
            quads = self.quads,
            periodicity = %self.periodicity,
            "planned 2D mesh"
        );

        Ok(MeshPlan {
            dim: 2,
            geometry: None,
            coords,
            elements: quads_or_triangles(&grid, !self.quads),
            curved: self.curved.unwrap_or(!self.mapping.is_identity()),
            boundary: plane_facets(&grid),
            periodic: periodic_pairs(&grid, self.periodicity),
        })
    }

    /// Generate into an in-memory [`StructuredMesh`].
    pub fn generate(&self) -> MeshResult<StructuredMesh> {
        let res = self.resolution()?;
        self.generate_into(MeshBuffer::with_capacity(2, res.total_points()))
    }

    /// Generate into `sink`.
    pub fn generate_into<S: MeshSink>(&self, sink: S) -> MeshResult<S::Output> {
        self.plan()?.commit(sink)
    }
}

/// 3D grid of hexahedra or tetrahedra over the unit cube.
#[derive(Clone, Debug)]
pub struct Structured3D {
    nx: usize,
    ny: Option<usize>,
    nz: Option<usize>,
    hexes: bool,
    periodicity: Periodicity,
    mapping: CoordinateMapper<3>,
    curved: Option<bool>,
    cuboid: bool,
}

impl Structured3D {
    /// `nx` cells along x; `ny` and `nz` default to `nx`.
    pub fn new(nx: usize) -> Self {
        Self {
            nx,
            ny: None,
            nz: None,
            hexes: true,
            periodicity: Periodicity::none(),
            mapping: CoordinateMapper::identity(),
            curved: None,
            cuboid: true,
        }
    }

    /// `nx × ny × nz` cells.
    pub fn with_resolution(nx: usize, ny: usize, nz: usize) -> Self {
        Self::new(nx).with_ny(ny).with_nz(nz)
    }

    /// Cells along y. Requires [`Self::with_nz`] as well.
    pub fn with_ny(mut self, ny: usize) -> Self {
        self.ny = Some(ny);
        self
    }

    /// Cells along z.
    pub fn with_nz(mut self, nz: usize) -> Self {
        self.nz = Some(nz);
        self
    }

    /// Split every cell into six tetrahedra.
    pub fn tetrahedra(mut self) -> Self {
        self.hexes = false;
        self
    }

    /// Choose hexahedra (`true`) or tetrahedra (`false`).
    pub fn with_hexes(mut self, hexes: bool) -> Self {
        self.hexes = hexes;
        self
    }

    pub fn periodic_x(mut self) -> Self {
        self.periodicity.x = true;
        self
    }

    pub fn periodic_y(mut self) -> Self {
        self.periodicity.y = true;
        self
    }

    pub fn periodic_z(mut self) -> Self {
        self.periodicity.z = true;
        self
    }

    /// Set periodicity explicitly.
    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    /// Map logical coordinates with `f`.
    pub fn with_mapping<F>(self, f: F) -> Self
    where
        F: Fn([f64; 3]) -> [f64; 3] + Send + Sync + 'static,
    {
        self.with_mapper(CoordinateMapper::new(f))
    }

    /// Map logical coordinates with a prepared mapper.
    pub fn with_mapper(mut self, mapper: CoordinateMapper<3>) -> Self {
        self.mapping = mapper;
        self
    }

    /// Override the curved flag; `None` derives it from the mapping.
    pub fn with_curved(mut self, curved: Option<bool>) -> Self {
        self.curved = curved;
        self
    }

    /// Skip attaching the bounding box geometry.
    pub fn without_cuboid(self) -> Self {
        self.with_cuboid(false)
    }

    /// Attach (`true`, the default) or skip the bounding box geometry.
    pub fn with_cuboid(mut self, cuboid: bool) -> Self {
        self.cuboid = cuboid;
        self
    }

    /// Validated resolution with defaults applied.
    pub fn resolution(&self) -> MeshResult<Resolution3D> {
        Ok(Resolution3D::resolve(self.nx, self.ny, self.nz)?)
    }

    /// Compute the mesh without writing it anywhere.
    pub fn plan(&self) -> MeshResult<MeshPlan> {
        let res = self.resolution()?;
        let grid = GridIndexer::volume(res.nx(), res.ny(), res.nz());

        let geometry = if self.cuboid {
            let lo = self.mapping.map_point(&grid, [0, 0, 0])?;
            let hi = self.mapping.map_point(&grid, grid.cells())?;
            Some(Cuboid::new(lo, hi))
        } else {
            None
        };
        let coords = map_coords(&self.mapping, &grid)?;
        tracing::debug!(
            resolution = %res,
            hexes = self.hexes,
            periodicity = %self.periodicity,
            cuboid = self.cuboid,
            "planned 3D mesh"
        );

        Ok(MeshPlan {
            dim: 3,
            geometry,
            coords,
            elements: hexes_or_tets(&grid, !self.hexes),
            curved: self.curved.unwrap_or(!self.mapping.is_identity()),
            boundary: box_facets(&grid, !self.hexes),
            periodic: periodic_pairs(&grid, self.periodicity),
        })
    }

    /// Generate into an in-memory [`StructuredMesh`].
    pub fn generate(&self) -> MeshResult<StructuredMesh> {
        let res = self.resolution()?;
        self.generate_into(MeshBuffer::with_capacity(3, res.total_points()))
    }

    /// Generate into `sink`.
    pub fn generate_into<S: MeshSink>(&self, sink: S) -> MeshResult<S::Output> {
        self.plan()?.commit(sink)
    }
}

/// 1D mesh of `n` segments.
pub fn make_1d_mesh(
    n: usize,
    mapping: Option<CoordinateMapper<1>>,
    periodic: bool,
) -> MeshResult<StructuredMesh> {
    Structured1D::new(n)
        .with_mapper(mapping.unwrap_or_default())
        .with_periodic(periodic)
        .generate()
}

/// 2D mesh of `nx × ny` cells, quadrilaterals if `quads` else triangles.
pub fn make_structured_2d_mesh(
    quads: bool,
    nx: usize,
    ny: usize,
    periodic_x: bool,
    periodic_y: bool,
    mapping: Option<CoordinateMapper<2>>,
) -> MeshResult<StructuredMesh> {
    Structured2D::new(nx, ny)
        .with_quads(quads)
        .with_periodicity(Periodicity::new(periodic_x, periodic_y, false))
        .with_mapper(mapping.unwrap_or_default())
        .generate()
}

/// 3D mesh, hexahedra if `hexes` else tetrahedra.
///
/// `ny` and `nz` default to `nx`; giving `ny` without `nz` is an error.
pub fn make_structured_3d_mesh(
    hexes: bool,
    nx: usize,
    ny: Option<usize>,
    nz: Option<usize>,
    periodic: Periodicity,
    mapping: Option<CoordinateMapper<3>>,
    cuboid: bool,
) -> MeshResult<StructuredMesh> {
    let mut builder = Structured3D::new(nx)
        .with_hexes(hexes)
        .with_periodicity(periodic)
        .with_mapper(mapping.unwrap_or_default())
        .with_cuboid(cuboid);
    builder.ny = ny;
    builder.nz = nz;
    builder.generate()
}

/// Quadrilateral mesh of the unit square.
pub fn make_quad_mesh(
    nx: usize,
    ny: usize,
    periodic_x: bool,
    periodic_y: bool,
    mapping: Option<CoordinateMapper<2>>,
) -> MeshResult<StructuredMesh> {
    make_structured_2d_mesh(true, nx, ny, periodic_x, periodic_y, mapping)
}

/// Hexahedral mesh of the unit cube in cuboid mode.
pub fn make_hex_mesh(
    nx: usize,
    ny: usize,
    nz: usize,
    periodic: Periodicity,
    mapping: Option<CoordinateMapper<3>>,
) -> MeshResult<StructuredMesh> {
    make_structured_3d_mesh(true, nx, Some(ny), Some(nz), periodic, mapping, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, MeshError};
    use crate::types::{Axis, RegionIndex};

    #[test]
    fn test_curved_flag_follows_mapping() {
        let plain = Structured1D::new(3).generate().unwrap();
        assert!(!plain.has_curved_elements());

        let mapped = Structured1D::new(3).with_mapping(|[x]| [x * x]).generate().unwrap();
        assert!(mapped.has_curved_elements());

        let forced = Structured1D::new(3)
            .with_mapping(|[x]| [x * x])
            .with_curved(Some(false))
            .generate()
            .unwrap();
        assert!(!forced.has_curved_elements());
    }

    #[test]
    fn test_missing_nz_rejected_before_planning() {
        let err = Structured3D::new(2).with_ny(3).plan().unwrap_err();
        assert!(matches!(
            err,
            MeshError::Configuration(ConfigurationError::MissingNz { ny: 3 })
        ));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let err = make_structured_2d_mesh(true, 0, 2, false, false, None).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Configuration(ConfigurationError::ZeroResolution { axis: Axis::X })
        ));
    }

    #[test]
    fn test_oversized_resolution_rejected() {
        let err = Structured3D::new(usize::MAX).generate().unwrap_err();
        assert!(matches!(
            err,
            MeshError::Configuration(ConfigurationError::TooLarge { .. })
        ));

        let err = Structured2D::new(1 << 40, 1 << 40).plan().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_cuboid_follows_mapping() {
        let mesh = Structured3D::with_resolution(2, 1, 1)
            .with_mapping(|[x, y, z]| [3.0 * x, 2.0 * y - 1.0, z])
            .generate()
            .unwrap();
        let cuboid = mesh.geometry.unwrap();
        assert_eq!(cuboid.corner1, [0.0, -1.0, 0.0]);
        assert_eq!(cuboid.corner2, [3.0, 1.0, 1.0]);

        let plain = Structured3D::new(1).without_cuboid().generate().unwrap();
        assert!(plain.geometry.is_none());
        assert_eq!(plain.boundary_name(RegionIndex::new(6)), Some("top"));
    }

    #[test]
    fn test_plan_counts() {
        let plan = Structured3D::with_resolution(2, 3, 4).tetrahedra().plan().unwrap();
        assert_eq!(plan.n_points(), 3 * 4 * 5);
        assert_eq!(plan.n_elements(), 6 * 24);
        assert_eq!(plan.n_facets(), 4 * (6 + 12 + 8));
        assert_eq!(plan.n_identifications(), 0);
    }
}
