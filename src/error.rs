//! Error types for mesh generation.
//!
//! Every failure aborts the whole generation call: there is no partial
//! mesh and no retry, since generation is deterministic.

use thiserror::Error;

use crate::types::Axis;

/// Invalid or underspecified resolution parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// An axis was given zero cells.
    #[error("{axis} resolution must be positive, got 0")]
    ZeroResolution { axis: Axis },

    /// `ny` was given but `nz` was not; there is no sensible default.
    #[error("no default for nz when ny = {ny} is given; pass nz explicitly")]
    MissingNz { ny: usize },

    /// The point count of the grid does not fit in memory.
    #[error("grid with {cells:?} cells has too many points")]
    TooLarge { cells: Vec<usize> },
}

/// Why a coordinate mapping was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MappingFailure {
    /// The mapping function itself reported an error.
    #[error("{0}")]
    Failed(String),

    /// The mapping returned NaN or an infinite component.
    #[error("component {component} is not finite ({value})")]
    NonFinite { component: usize, value: f64 },
}

/// The coordinate mapping failed for one grid point.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("mapping failed at grid point {point:?}: {reason}")]
pub struct MappingError {
    /// Logical grid index (x, y, z order) of the offending point
    pub point: Vec<usize>,
    /// Underlying reason
    pub reason: MappingFailure,
}

/// Errors returned by the mesh generators.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Resolution parameters were rejected before any point was created.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The coordinate mapping failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The mesh sink rejected an operation.
    #[error("mesh builder error: {0}")]
    Builder(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MeshError {
    /// Wrap a sink error.
    pub fn builder<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Builder(Box::new(err))
    }

    /// Check if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MeshError::Configuration(_))
    }

    /// Check if this is a mapping error.
    pub fn is_mapping(&self) -> bool {
        matches!(self, MeshError::Mapping(_))
    }
}

/// Result alias for generator calls.
pub type MeshResult<T> = Result<T, MeshError>;
