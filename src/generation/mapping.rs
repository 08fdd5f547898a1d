//! Coordinate mapping of logical grid positions.
//!
//! Grid points start at their logical fractional position `(i/nx, j/ny,
//! k/nz)` in the unit box and are optionally pushed through a
//! user-supplied transform of the same dimension.
//!
//! # Example
//!
//! ```
//! use structmesh::generation::CoordinateMapper;
//!
//! // Annulus sector from the unit square
//! let mapper = CoordinateMapper::new(|[r, t]: [f64; 2]| {
//!     let radius = 1.0 + r;
//!     let angle = std::f64::consts::FRAC_PI_2 * t;
//!     [radius * angle.cos(), radius * angle.sin()]
//! });
//! assert!(!mapper.is_identity());
//! let p = mapper.apply([0.0, 1.0]).unwrap();
//! assert!(p[0].abs() < 1e-12 && (p[1] - 1.0).abs() < 1e-12);
//! ```

use std::fmt;
use std::sync::Arc;

use super::indexer::GridIndexer;
use crate::error::{MappingError, MappingFailure};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

type MapFn<const D: usize> = dyn Fn([f64; D]) -> Result<[f64; D], String> + Send + Sync;

/// Stateless transform from logical to physical coordinates.
///
/// Cloning shares the underlying function.
#[derive(Clone)]
pub struct CoordinateMapper<const D: usize> {
    func: Option<Arc<MapFn<D>>>,
}

impl<const D: usize> CoordinateMapper<D> {
    /// The identity mapping.
    pub fn identity() -> Self {
        Self { func: None }
    }

    /// Wrap an infallible mapping function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn([f64; D]) -> [f64; D] + Send + Sync + 'static,
    {
        Self {
            func: Some(Arc::new(move |x: [f64; D]| -> Result<[f64; D], String> {
                Ok(f(x))
            })),
        }
    }

    /// Wrap a mapping function that can fail.
    pub fn try_new<F, E>(f: F) -> Self
    where
        F: Fn([f64; D]) -> Result<[f64; D], E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self {
            func: Some(Arc::new(move |x: [f64; D]| f(x).map_err(|e| e.to_string()))),
        }
    }

    /// Whether this is the identity mapping.
    ///
    /// A custom function is never treated as identity, even if it happens
    /// to return its input.
    pub fn is_identity(&self) -> bool {
        self.func.is_none()
    }

    /// Map one coordinate tuple.
    pub fn apply(&self, x: [f64; D]) -> Result<[f64; D], MappingFailure> {
        let Some(func) = &self.func else {
            return Ok(x);
        };
        let y = (**func)(x).map_err(MappingFailure::Failed)?;
        match y.iter().position(|c| !c.is_finite()) {
            Some(component) => Err(MappingFailure::NonFinite {
                component,
                value: y[component],
            }),
            None => Ok(y),
        }
    }

    /// Map the grid point at a logical index, padded to three components.
    pub fn map_point(
        &self,
        grid: &GridIndexer<D>,
        idx: [usize; D],
    ) -> Result<[f64; 3], MappingError> {
        let y = self.apply(grid.fractional(idx)).map_err(|reason| MappingError {
            point: idx.to_vec(),
            reason,
        })?;
        let mut coord = [0.0; 3];
        coord[..D].copy_from_slice(&y);
        Ok(coord)
    }

    /// Map every grid point, indexed by point number.
    ///
    /// Stops at the first point (in point-number order) that fails.
    pub fn map_grid(&self, grid: &GridIndexer<D>) -> Result<Vec<[f64; 3]>, MappingError> {
        let mut coords = Vec::with_capacity(grid.point_count());
        for idx in grid.points() {
            coords.push(self.map_point(grid, idx)?);
        }
        Ok(coords)
    }

    /// Map every grid point on the rayon thread pool.
    ///
    /// Produces the same coordinates as [`Self::map_grid`]. When several
    /// points fail, which failure is reported is unspecified.
    #[cfg(feature = "parallel")]
    pub fn map_grid_parallel(&self, grid: &GridIndexer<D>) -> Result<Vec<[f64; 3]>, MappingError> {
        (0..grid.point_count())
            .into_par_iter()
            .map(|id| self.map_point(grid, grid.logical(id)))
            .collect()
    }
}

impl<const D: usize> Default for CoordinateMapper<D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const D: usize> fmt::Debug for CoordinateMapper<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            write!(f, "CoordinateMapper<{}>(identity)", D)
        } else {
            write!(f, "CoordinateMapper<{}>(custom)", D)
        }
    }
}
