//! Per-axis periodicity flags.

use std::fmt;

use crate::types::Axis;

/// Which logical axes are periodic.
///
/// # Example
///
/// ```
/// use structmesh::types::{Axis, Periodicity};
///
/// let p = Periodicity::none().with_x().with_z();
/// assert!(p.is_periodic(Axis::X));
/// assert!(!p.is_periodic(Axis::Y));
/// assert_eq!(p.count(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Periodicity {
    /// Periodic in x
    pub x: bool,
    /// Periodic in y
    pub y: bool,
    /// Periodic in z
    pub z: bool,
}

impl Periodicity {
    /// No periodic axis.
    pub const fn none() -> Self {
        Self {
            x: false,
            y: false,
            z: false,
        }
    }

    /// Create from explicit flags.
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    /// Periodic in every axis.
    pub const fn all() -> Self {
        Self::new(true, true, true)
    }

    /// Mark x as periodic.
    pub fn with_x(mut self) -> Self {
        self.x = true;
        self
    }

    /// Mark y as periodic.
    pub fn with_y(mut self) -> Self {
        self.y = true;
        self
    }

    /// Mark z as periodic.
    pub fn with_z(mut self) -> Self {
        self.z = true;
        self
    }

    /// Check a single axis.
    #[inline]
    pub fn is_periodic(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Number of periodic axes.
    pub fn count(&self) -> usize {
        [self.x, self.y, self.z].iter().filter(|&&p| p).count()
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |p: bool| if p { 'P' } else { '-' };
        write!(f, "{}{}{}", flag(self.x), flag(self.y), flag(self.z))
    }
}
