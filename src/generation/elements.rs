//! Volume element assembly.
//!
//! Each logical cell is emitted either as its tensor-product element
//! (segment, quadrilateral, hexahedron) or split into simplices with a
//! fixed table. Corners are always expressed as the cell's origin point
//! plus multiples of the grid strides, so neighbouring cells share point
//! numbers verbatim.
//!
//! Local corner numbering:
//!
//! ```text
//! quad:  3 ── 2        hex: 0..3 on the x = i layer, 4..7 on x = i+1
//!        │    │             0 = origin   1 = +z      2 = +z+y   3 = +y
//!        0 ── 1             4 = +x       5 = +x+z    6 = +x+z+y 7 = +x+y
//! ```

use super::indexer::GridIndexer;
use crate::types::Axis;

/// Quadrilateral split into two triangles along the 0–2 diagonal.
pub const QUAD_TO_TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

/// Hexahedron split into six tetrahedra around the 0–6 diagonal.
///
/// Each row is one monotone path from corner 0 to corner 6 along cube
/// edges (Kuhn decomposition), so the six tets partition the cell and
/// all share one orientation. Every cube face is cut along the diagonal
/// through corner 0 or corner 6, matching [`QUAD_TO_TRIANGLES`] applied
/// to a face quad that starts at that corner.
pub const HEX_TO_TETS: [[usize; 4]; 6] = [
    [0, 4, 5, 6],
    [0, 6, 7, 4],
    [0, 3, 7, 6],
    [0, 1, 6, 5],
    [0, 1, 2, 6],
    [0, 3, 6, 2],
];

/// Flat connectivity of equally-sized entities.
///
/// Stores `len() * arity` point numbers in one exactly-sized vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connectivity {
    arity: usize,
    indices: Vec<usize>,
}

impl Connectivity {
    /// Empty connectivity with room for `capacity` entities.
    pub fn with_capacity(arity: usize, capacity: usize) -> Self {
        Self {
            arity,
            indices: Vec::with_capacity(arity * capacity),
        }
    }

    /// Points per entity.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.indices.len() / self.arity
    }

    /// Whether there are no entities.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append one entity.
    ///
    /// # Panics
    ///
    /// Panics if `points.len()` differs from the arity.
    pub fn push(&mut self, points: &[usize]) {
        assert_eq!(points.len(), self.arity, "entity arity mismatch");
        self.indices.extend_from_slice(points);
    }

    /// Append a simplex split of `corners` given by `table`.
    pub fn push_split<const M: usize>(&mut self, corners: &[usize], table: &[[usize; M]]) {
        for local in table {
            for &c in local {
                self.indices.push(corners[c]);
            }
        }
    }

    /// Entity `k`.
    pub fn get(&self, k: usize) -> &[usize] {
        &self.indices[k * self.arity..(k + 1) * self.arity]
    }

    /// Iterate over entities.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, usize> {
        self.indices.chunks_exact(self.arity)
    }
}

/// Corners of a quad spanned by two signed strides from `base`.
#[inline]
pub fn quad_corners(base: usize, s0: isize, s1: isize) -> [usize; 4] {
    use super::indexer::offset;
    [base, offset(base, s0), offset(base, s0 + s1), offset(base, s1)]
}

/// Corners of the hex cell whose origin is `base`.
#[inline]
pub fn hex_corners(base: usize, sx: usize, sy: usize, sz: usize) -> [usize; 8] {
    let up = base + sx;
    [
        base,
        base + sz,
        base + sz + sy,
        base + sy,
        up,
        up + sz,
        up + sz + sy,
        up + sy,
    ]
}

/// Segments `[i, i+1]` of a 1D grid.
pub fn segments(grid: &GridIndexer<1>) -> Connectivity {
    let mut cells = Connectivity::with_capacity(2, grid.cell_count());
    let s = grid.stride(Axis::X);
    for base in grid.cell_origins() {
        cells.push(&[base, base + s]);
    }
    cells
}

/// Quadrilaterals, or two triangles per cell, of a 2D grid.
///
/// Quads are wound counter-clockwise: origin, +x, +x+y, +y.
pub fn quads_or_triangles(grid: &GridIndexer<2>, triangles: bool) -> Connectivity {
    let sx = grid.stride(Axis::X) as isize;
    let sy = grid.stride(Axis::Y) as isize;
    let mut cells = if triangles {
        Connectivity::with_capacity(3, 2 * grid.cell_count())
    } else {
        Connectivity::with_capacity(4, grid.cell_count())
    };

    for base in grid.cell_origins() {
        let corners = quad_corners(base, sx, sy);
        if triangles {
            cells.push_split(&corners, &QUAD_TO_TRIANGLES);
        } else {
            cells.push(&corners);
        }
    }
    cells
}

/// Hexahedra, or six tetrahedra per cell, of a 3D grid.
pub fn hexes_or_tets(grid: &GridIndexer<3>, tets: bool) -> Connectivity {
    let sx = grid.stride(Axis::X);
    let sy = grid.stride(Axis::Y);
    let sz = grid.stride(Axis::Z);
    let mut cells = if tets {
        Connectivity::with_capacity(4, HEX_TO_TETS.len() * grid.cell_count())
    } else {
        Connectivity::with_capacity(8, grid.cell_count())
    };

    for base in grid.cell_origins() {
        let corners = hex_corners(base, sx, sy, sz);
        if tets {
            cells.push_split(&corners, &HEX_TO_TETS);
        } else {
            cells.push(&corners);
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_segments() {
        let cells = segments(&GridIndexer::line(3));
        assert_eq!(cells.len(), 3);
        assert_eq!(cells.get(0), &[0, 1]);
        assert_eq!(cells.get(2), &[2, 3]);
    }

    #[test]
    fn test_quad_layout() {
        // nx = 3: base + [0, 1, nx+2, nx+1]
        let grid = GridIndexer::plane(3, 2);
        let cells = quads_or_triangles(&grid, false);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells.get(0), &[0, 1, 5, 4]);
        assert_eq!(cells.get(4), &[5, 6, 10, 9]);
    }

    #[test]
    fn test_triangle_split() {
        let grid = GridIndexer::plane(1, 1);
        let cells = quads_or_triangles(&grid, true);
        assert_eq!(cells.arity(), 3);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells.get(0), &[0, 1, 3]);
        assert_eq!(cells.get(1), &[0, 3, 2]);
    }

    #[test]
    fn test_hex_layout() {
        // base + [0, 1, nz+2, nz+1] on the x = i layer, shifted by (ny+1)(nz+1)
        let (ny, nz) = (2, 3);
        let grid = GridIndexer::volume(2, ny, nz);
        let cells = hexes_or_tets(&grid, false);
        assert_eq!(cells.len(), 12);
        let up = (ny + 1) * (nz + 1);
        assert_eq!(
            cells.get(0),
            &[0, 1, nz + 2, nz + 1, up, up + 1, up + nz + 2, up + nz + 1]
        );
    }

    #[test]
    fn test_tet_split_uses_cell_corners() {
        let grid = GridIndexer::volume(1, 1, 1);
        let cells = hexes_or_tets(&grid, true);
        assert_eq!(cells.len(), 6);
        let hex = hex_corners(0, grid.stride(Axis::X), grid.stride(Axis::Y), 1);
        for (tet, local) in cells.iter().zip(HEX_TO_TETS.iter()) {
            let expected: Vec<_> = local.iter().map(|&c| hex[c]).collect();
            assert_eq!(tet, expected.as_slice());
        }
    }

    #[test]
    fn test_tet_table_is_kuhn() {
        // Local corner offsets (x, y, z)
        let pos = [
            [0, 0, 0],
            [0, 0, 1],
            [0, 1, 1],
            [0, 1, 0],
            [1, 0, 0],
            [1, 0, 1],
            [1, 1, 1],
            [1, 1, 0],
        ];
        let mut paths = HashSet::new();
        for tet in HEX_TO_TETS {
            assert!(tet.contains(&0) && tet.contains(&6));
            // The four corners sorted by coordinate sum form an edge path
            let mut path = tet.to_vec();
            path.sort_by_key(|&c| pos[c].iter().sum::<i32>());
            for w in path.windows(2) {
                let diff: i32 = (0..3).map(|d| (pos[w[1]][d] - pos[w[0]][d]).abs()).sum();
                assert_eq!(diff, 1, "tet {:?} is not an edge path", tet);
            }
            paths.insert(path);
        }
        // Six distinct paths = all axis permutations
        assert_eq!(paths.len(), 6);
    }

    #[test]
    fn test_shared_points_between_cells() {
        let grid = GridIndexer::plane(2, 1);
        let cells = quads_or_triangles(&grid, false);
        let left: HashSet<_> = cells.get(0).iter().copied().collect();
        let right: HashSet<_> = cells.get(1).iter().copied().collect();
        let shared: Vec<_> = left.intersection(&right).collect();
        assert_eq!(shared.len(), 2);
    }

    #[test]
    #[should_panic(expected = "entity arity mismatch")]
    fn test_push_checks_arity() {
        let mut c = Connectivity::with_capacity(2, 1);
        c.push(&[1, 2, 3]);
    }
}
