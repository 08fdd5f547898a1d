//! Periodic point pairing.
//!
//! For a periodic axis every point on the min side (slave) is paired with
//! the point on the max side (master) at the same in-plane position,
//! which sits exactly `n · stride` point numbers further on.

use super::indexer::GridIndexer;
use crate::types::{Axis, Periodicity, Side};

/// All master/slave pairs of one periodic axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodicPairs {
    /// Identification number, unique per axis
    pub ident: u32,
    pub axis: Axis,
    /// `(master, slave)` point numbers in slave point-number order
    pub pairs: Vec<(usize, usize)>,
}

/// Identification number of `axis`: its position in the outermost-first
/// traversal order of the layout, counting from 1.
pub fn identification_number<const D: usize>(grid: &GridIndexer<D>, axis: Axis) -> Option<u32> {
    grid.axes_outermost_first()
        .iter()
        .position(|&a| a == axis)
        .map(|k| k as u32 + 1)
}

/// Pairs for every periodic axis, ordered by identification number.
///
/// Axes beyond the grid dimension are ignored.
pub fn periodic_pairs<const D: usize>(
    grid: &GridIndexer<D>,
    periodicity: Periodicity,
) -> Vec<PeriodicPairs> {
    let mut result = Vec::new();
    for (k, axis) in grid.axes_outermost_first().into_iter().enumerate() {
        if !periodicity.is_periodic(axis) {
            continue;
        }
        let shift = grid.cells()[axis.index()] * grid.stride(axis);
        let pairs: Vec<_> = grid
            .side_points(axis, Side::Min)
            .map(|slave| (slave + shift, slave))
            .collect();
        tracing::trace!(%axis, ident = k + 1, n_pairs = pairs.len(), "periodic pairs");
        result.push(PeriodicPairs {
            ident: k as u32 + 1,
            axis,
            pairs,
        });
    }
    result
}
