use thiserror::Error;

use crate::index::Orientation;

/// Top-level error type for the hull engine.
#[derive(Debug, Error)]
pub enum HullError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to the bounded coordinate domain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("coordinate ({x}, {y}, {z}) is outside the domain of radius {radius}")]
    OutOfDomain { x: i32, y: i32, z: i32, radius: i32 },

    #[error("voxel id {0} does not address a cell of the domain")]
    InvalidId(i64),
}

/// Errors raised by the exterior/interior partition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("exterior partition has not been computed")]
    NotComputed,

    #[error("exterior partition is stale (computed at revision {computed}, hull is at {current})")]
    Stale { computed: u64, current: u64 },

    #[error(
        "non-manifold surface: face {orientation} of ({x}, {y}, {z}) has no neighbor toward {toward}"
    )]
    NonManifold {
        x: i32,
        y: i32,
        z: i32,
        orientation: Orientation,
        toward: Orientation,
    },

    #[error("interior faces do not pair up in column (y = {y}, z = {z}) at depth {depth}")]
    UnmatchedInterior { y: i32, z: i32, depth: i32 },
}

/// Errors related to engine configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("domain radius {0} is out of range")]
    InvalidRadius(i32),

    #[error("invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Convenience type alias for results using [`HullError`].
pub type Result<T> = std::result::Result<T, HullError>;
