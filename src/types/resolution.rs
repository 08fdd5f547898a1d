//! Grid resolution types.
//!
//! A resolution is the number of cells along each logical axis. Grids
//! have `n + 1` points along an axis with `n` cells.

use std::fmt;

use crate::error::ConfigurationError;
use crate::types::Axis;

/// Upper bound on the point count of an accepted grid.
///
/// Every per-point array (coordinates) and per-cell array (up to six
/// tetrahedra of four indices) must stay addressable.
const MAX_GRID_POINTS: usize = isize::MAX as usize / 256;

fn check_axis(axis: Axis, n: usize) -> Result<usize, ConfigurationError> {
    if n == 0 {
        Err(ConfigurationError::ZeroResolution { axis })
    } else {
        Ok(n)
    }
}

/// Reject grids whose point count Π(n + 1) exceeds [`MAX_GRID_POINTS`].
fn check_size(cells: &[usize]) -> Result<(), ConfigurationError> {
    let points = cells
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n.checked_add(1)?));
    match points {
        Some(p) if p <= MAX_GRID_POINTS => Ok(()),
        _ => Err(ConfigurationError::TooLarge {
            cells: cells.to_vec(),
        }),
    }
}

/// 1D grid resolution (number of segments).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution1D {
    n: usize,
}

impl Resolution1D {
    /// Create a 1D resolution.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "n must be positive, got {}", n);
        assert!(check_size(&[n]).is_ok(), "resolution {} is too large", n);
        Self { n }
    }

    /// Create a 1D resolution, rejecting zero and oversized grids.
    pub fn try_new(n: usize) -> Result<Self, ConfigurationError> {
        let n = check_axis(Axis::X, n)?;
        check_size(&[n])?;
        Ok(Self { n })
    }

    /// Number of segments.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of grid points.
    #[inline]
    pub fn total_points(&self) -> usize {
        self.n + 1
    }
}

impl fmt::Display for Resolution1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.n)
    }
}

/// 2D grid resolution (number of cells in each direction).
///
/// Provides a strongly-typed way to specify mesh resolution,
/// preventing mix-ups between nx/ny and other integer parameters.
///
/// # Example
///
/// ```
/// use structmesh::types::Resolution2D;
///
/// let res = Resolution2D::new(10, 5);
/// assert_eq!(res.nx(), 10);
/// assert_eq!(res.ny(), 5);
/// assert_eq!(res.total_cells(), 50);
/// assert_eq!(res.total_points(), 66);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution2D {
    /// Number of cells in x-direction
    nx: usize,
    /// Number of cells in y-direction
    ny: usize,
}

impl Resolution2D {
    /// Create a 2D resolution.
    ///
    /// # Panics
    ///
    /// Panics if either `nx` or `ny` is zero, or the grid is too large.
    pub fn new(nx: usize, ny: usize) -> Self {
        assert!(nx > 0, "nx must be positive, got {}", nx);
        assert!(ny > 0, "ny must be positive, got {}", ny);
        assert!(check_size(&[nx, ny]).is_ok(), "resolution {}×{} is too large", nx, ny);
        Self { nx, ny }
    }

    /// Create a resolution, rejecting zero cell counts and oversized grids.
    pub fn try_new(nx: usize, ny: usize) -> Result<Self, ConfigurationError> {
        let nx = check_axis(Axis::X, nx)?;
        let ny = check_axis(Axis::Y, ny)?;
        check_size(&[nx, ny])?;
        Ok(Self { nx, ny })
    }

    /// Number of cells in x-direction.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of cells in y-direction.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of cells.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Number of points in the structured grid.
    #[inline]
    pub fn total_points(&self) -> usize {
        (self.nx + 1) * (self.ny + 1)
    }
}

impl fmt::Display for Resolution2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.nx, self.ny)
    }
}

/// 3D grid resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution3D {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl Resolution3D {
    /// Create a 3D resolution.
    ///
    /// # Panics
    ///
    /// Panics if any cell count is zero, or the grid is too large.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        assert!(nx > 0, "nx must be positive, got {}", nx);
        assert!(ny > 0, "ny must be positive, got {}", ny);
        assert!(nz > 0, "nz must be positive, got {}", nz);
        assert!(
            check_size(&[nx, ny, nz]).is_ok(),
            "resolution {}×{}×{} is too large",
            nx,
            ny,
            nz
        );
        Self { nx, ny, nz }
    }

    /// Create a 3D resolution, rejecting zero cell counts and oversized grids.
    pub fn try_new(nx: usize, ny: usize, nz: usize) -> Result<Self, ConfigurationError> {
        let nx = check_axis(Axis::X, nx)?;
        let ny = check_axis(Axis::Y, ny)?;
        let nz = check_axis(Axis::Z, nz)?;
        check_size(&[nx, ny, nz])?;
        Ok(Self { nx, ny, nz })
    }

    /// Create a cube resolution.
    pub fn cube(n: usize) -> Self {
        Self::new(n, n, n)
    }

    /// Resolve partially specified resolution parameters.
    ///
    /// Omitted `ny` and `nz` fall back to `nx`, except that `nz` has no
    /// default once `ny` is given.
    ///
    /// # Example
    ///
    /// ```
    /// use structmesh::types::Resolution3D;
    ///
    /// assert_eq!(Resolution3D::resolve(4, None, None).unwrap(), Resolution3D::cube(4));
    /// assert_eq!(
    ///     Resolution3D::resolve(4, None, Some(2)).unwrap(),
    ///     Resolution3D::new(4, 4, 2)
    /// );
    /// assert!(Resolution3D::resolve(4, Some(2), None).is_err());
    /// ```
    pub fn resolve(
        nx: usize,
        ny: Option<usize>,
        nz: Option<usize>,
    ) -> Result<Self, ConfigurationError> {
        let (ny, nz) = match (ny, nz) {
            (None, None) => (nx, nx),
            (None, Some(nz)) => (nx, nz),
            (Some(ny), Some(nz)) => (ny, nz),
            (Some(ny), None) => return Err(ConfigurationError::MissingNz { ny }),
        };
        Self::try_new(nx, ny, nz)
    }

    /// Number of cells in x-direction.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of cells in y-direction.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of cells in z-direction.
    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Total number of cells.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Number of points in the structured grid.
    #[inline]
    pub fn total_points(&self) -> usize {
        (self.nx + 1) * (self.ny + 1) * (self.nz + 1)
    }
}

impl fmt::Display for Resolution3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}×{}", self.nx, self.ny, self.nz)
    }
}
