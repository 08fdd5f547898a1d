//! Logical grid indexing.
//!
//! Point numbers follow a fixed row-major traversal with the outermost
//! axis varying slowest:
//!
//! | grid | point number of `(i, j, k)`          | traversal        |
//! |------|---------------------------------------|------------------|
//! | 1D   | `i`                                   | x                |
//! | 2D   | `j·(nx+1) + i`                        | y outer, x inner |
//! | 3D   | `i·(ny+1)(nz+1) + j·(nz+1) + k`       | x, y, z inner    |
//!
//! Logical indices are always given in axis order `[x, y, z]`; only the
//! strides differ between layouts. Every connectivity pattern in this
//! crate is expressed as a base point number plus (possibly negative)
//! multiples of these strides.

use crate::types::{Axis, Side};

/// Apply a signed offset to a point number.
#[inline]
pub(crate) fn offset(base: usize, delta: isize) -> usize {
    (base as isize + delta) as usize
}

/// Closed-form mapping between logical grid indices and point numbers.
///
/// Cell counts are taken as given; the generators only build indexers
/// from a validated resolution, which bounds the point count.
///
/// # Example
///
/// ```
/// use structmesh::generation::GridIndexer;
///
/// let grid = GridIndexer::volume(2, 3, 4);
/// assert_eq!(grid.point_count(), 60);
/// assert_eq!(grid.index([1, 2, 3]), 1 * 20 + 2 * 5 + 3);
/// assert_eq!(grid.logical(33), [1, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridIndexer<const D: usize> {
    /// Number of cells along each logical axis
    cells: [usize; D],
    /// Point-number stride along each logical axis
    strides: [usize; D],
}

impl GridIndexer<1> {
    /// Indexer for a chain of `n` segments.
    pub fn line(n: usize) -> Self {
        Self {
            cells: [n],
            strides: [1],
        }
    }

    /// Sweep over the single point at one end of the line.
    pub fn side_sweep(&self, side: Side) -> FaceSweep {
        FaceSweep {
            base: side.position(self.cells[0]),
            directions: Vec::new(),
        }
    }
}

impl GridIndexer<2> {
    /// Indexer for an `nx × ny` grid, x varying fastest.
    pub fn plane(nx: usize, ny: usize) -> Self {
        Self {
            cells: [nx, ny],
            strides: [1, nx + 1],
        }
    }

    /// Sweep along one side of the rectangle, counter-clockwise.
    ///
    /// Bottom and right start at the origin side and walk forward; top
    /// and left start at the far corner and walk backward, which keeps
    /// the interior on the left of every edge.
    pub fn side_sweep(&self, axis: Axis, side: Side) -> FaceSweep {
        let a = axis.index();
        let t = 1 - a;
        let forward = (axis == Axis::X) == (side == Side::Max);
        let start_t = if forward { 0 } else { self.cells[t] };
        let stride = self.strides[t] as isize;

        FaceSweep {
            base: side.position(self.cells[a]) * self.strides[a] + start_t * self.strides[t],
            directions: vec![SweepDirection {
                stride: if forward { stride } else { -stride },
                steps: self.cells[t],
            }],
        }
    }
}

impl GridIndexer<3> {
    /// Indexer for an `nx × ny × nz` grid, z varying fastest.
    pub fn volume(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            cells: [nx, ny, nz],
            strides: [(ny + 1) * (nz + 1), nz + 1, 1],
        }
    }

    /// Sweep over one face of the box with outward winding.
    ///
    /// For normal axis `a` the min face walks `(a+2, a+1)` with positive
    /// strides from point 0; the max face walks `(a+1, a+2)` with negated
    /// strides from the last point. Both orders make the quad winding
    /// `base → +d0 → +d0+d1 → +d1` point away from the interior.
    pub fn side_sweep(&self, axis: Axis, side: Side) -> FaceSweep {
        let a = axis.index();
        let (first, second, base, sign) = match side {
            Side::Min => ((a + 2) % 3, (a + 1) % 3, 0, 1),
            Side::Max => ((a + 1) % 3, (a + 2) % 3, self.last(), -1),
        };
        let direction = |axis: usize| SweepDirection {
            stride: sign * self.strides[axis] as isize,
            steps: self.cells[axis],
        };

        FaceSweep {
            base,
            directions: vec![direction(first), direction(second)],
        }
    }
}

impl<const D: usize> GridIndexer<D> {
    /// Number of cells along each axis.
    #[inline]
    pub fn cells(&self) -> [usize; D] {
        self.cells
    }

    /// Point-number stride along an axis.
    #[inline]
    pub fn stride(&self, axis: Axis) -> usize {
        self.strides[axis.index()]
    }

    /// Total number of grid points: Π(n + 1).
    pub fn point_count(&self) -> usize {
        self.cells.iter().map(|&n| n + 1).product()
    }

    /// Total number of grid cells: Π n.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().product()
    }

    /// Point number of the far corner `(nx, ny, nz)`.
    pub fn last(&self) -> usize {
        self.point_count() - 1
    }

    /// Point number of a logical index.
    #[inline]
    pub fn index(&self, idx: [usize; D]) -> usize {
        idx.iter().zip(&self.strides).map(|(&i, &s)| i * s).sum()
    }

    /// Logical index of a point number (inverse of [`Self::index`]).
    #[inline]
    pub fn logical(&self, id: usize) -> [usize; D] {
        std::array::from_fn(|d| (id / self.strides[d]) % (self.cells[d] + 1))
    }

    /// Logical fractional position `i / n` of a grid point.
    #[inline]
    pub fn fractional(&self, idx: [usize; D]) -> [f64; D] {
        std::array::from_fn(|d| idx[d] as f64 / self.cells[d] as f64)
    }

    /// Axes ordered from outermost (largest stride) to innermost.
    pub fn axes_outermost_first(&self) -> Vec<Axis> {
        let mut axes: Vec<Axis> = (0..D).map(Axis::from_index).collect();
        axes.sort_by(|a, b| self.strides[b.index()].cmp(&self.strides[a.index()]));
        axes
    }

    /// Logical indices of all points in point-number order.
    pub fn points(&self) -> impl Iterator<Item = [usize; D]> + '_ {
        (0..self.point_count()).map(|id| self.logical(id))
    }

    /// Point numbers of all cell origins, in point-number order.
    ///
    /// A cell origin is the corner with the smallest logical index.
    pub fn cell_origins(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.point_count()).filter(move |&id| {
            let idx = self.logical(id);
            (0..D).all(|d| idx[d] < self.cells[d])
        })
    }

    /// Point numbers on the `side` end of `axis`, in point-number order.
    pub fn side_points(&self, axis: Axis, side: Side) -> impl Iterator<Item = usize> + '_ {
        let a = axis.index();
        let pos = side.position(self.cells[a]);
        (0..self.point_count()).filter(move |&id| self.logical(id)[a] == pos)
    }
}

/// One in-plane direction of a [`FaceSweep`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepDirection {
    /// Signed point-number stride per step
    pub stride: isize,
    /// Number of steps (cells) along this direction
    pub steps: usize,
}

/// Parameter sweep over a logical side or face of the grid.
///
/// A sweep is a base point plus zero (1D end point), one (2D side) or
/// two (3D face) signed directions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceSweep {
    /// Point number the sweep starts from
    pub base: usize,
    /// In-plane directions, outer first
    pub directions: Vec<SweepDirection>,
}

impl FaceSweep {
    /// Number of facets (cells of the sweep).
    pub fn facet_count(&self) -> usize {
        self.directions.iter().map(|d| d.steps).product()
    }

    /// All point numbers covered by the sweep.
    pub fn points(&self) -> Vec<usize> {
        let mut points = vec![self.base];
        for dir in &self.directions {
            points = points
                .iter()
                .flat_map(|&p| (0..=dir.steps).map(move |s| offset(p, s as isize * dir.stride)))
                .collect();
        }
        points
    }

    /// Edges `[p, p + d]` of a one-direction sweep.
    ///
    /// # Panics
    ///
    /// Panics unless the sweep has exactly one direction.
    pub fn edges(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        assert_eq!(self.directions.len(), 1, "edges need a 1-direction sweep");
        let d = self.directions[0];
        (0..d.steps).map(move |i| {
            let p = offset(self.base, i as isize * d.stride);
            [p, offset(p, d.stride)]
        })
    }

    /// Quads `[p, p+d0, p+d0+d1, p+d1]` of a two-direction sweep.
    ///
    /// # Panics
    ///
    /// Panics unless the sweep has exactly two directions.
    pub fn quads(&self) -> impl Iterator<Item = [usize; 4]> + '_ {
        assert_eq!(self.directions.len(), 2, "quads need a 2-direction sweep");
        let [d0, d1] = [self.directions[0], self.directions[1]];
        (0..d0.steps).flat_map(move |i| {
            (0..d1.steps).map(move |j| {
                let p = offset(self.base, i as isize * d0.stride + j as isize * d1.stride);
                [
                    p,
                    offset(p, d0.stride),
                    offset(p, d0.stride + d1.stride),
                    offset(p, d1.stride),
                ]
            })
        })
    }
}
