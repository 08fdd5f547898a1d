//! Logical axes and sides of a structured grid.
//!
//! Every boundary of a structured box is named by an axis and a side:
//! `(Axis::X, Side::Min)` is the face `x = 0`, `(Axis::Z, Side::Max)` the
//! face `z = nz`.

use std::fmt;

/// Logical grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// First logical axis (i)
    X,
    /// Second logical axis (j)
    Y,
    /// Third logical axis (k)
    Z,
}

impl Axis {
    /// All axes in logical order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in a logical index tuple.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis at a logical tuple position.
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Axis::X,
            1 => Axis::Y,
            2 => Axis::Z,
            _ => panic!("Invalid axis index {}", index),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Which end of an axis a boundary lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Logical index 0
    Min,
    /// Logical index n
    Max,
}

impl Side {
    /// Logical index of this side along an axis with `n` cells.
    #[inline]
    pub fn position(self, n: usize) -> usize {
        match self {
            Side::Min => 0,
            Side::Max => n,
        }
    }

    /// The opposite side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Min => Side::Max,
            Side::Max => Side::Min,
        }
    }
}
