//! Strongly-typed index newtypes.
//!
//! These types prevent mixing up point handles, element handles and
//! boundary region numbers, which are all plain integers underneath.

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        // Allow using as array index
        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }
    };
}

define_index!(
    /// Handle of a point registered with a mesh sink.
    ///
    /// Issued by [`MeshSink::add_point`](crate::mesh::MeshSink::add_point);
    /// unique within one mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use structmesh::types::PointId;
    ///
    /// let p = PointId::new(7);
    /// assert_eq!(p.get(), 7);
    /// assert_eq!(p.to_string(), "P7");
    /// ```
    PointId,
    "P"
);

define_index!(
    /// Handle of a volume element registered with a mesh sink.
    ElementId,
    "E"
);

/// Boundary (or material) region number.
///
/// Region numbers are 1-based, following the usual solver convention
/// where 0 means "no region".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RegionIndex(u32);

impl RegionIndex {
    /// The single material region every generated element belongs to.
    pub const DOMAIN: Self = Self(1);

    /// Create a region index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw region number.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}
