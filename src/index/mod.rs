mod cube_indexer;
mod orientation;

pub use cube_indexer::{CubeIndexer, MAX_DOMAIN_RADIUS};
pub use orientation::{Axis, Orientation};

/// Linear key of a voxel cell, produced by a [`CubeIndexer`].
///
/// Neighbor lookups are plain integer arithmetic on this key; it is only
/// meaningful together with the indexer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelId(i64);

impl VoxelId {
    /// Wraps a raw linear index.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw linear index.
    #[must_use]
    pub fn raw(self) -> i64 {
        self.0
    }
}
