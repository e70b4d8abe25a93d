use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::diff::ChangeQueue;
use super::face_set::FaceSet;
use super::outline;
use crate::config::HullConfig;
use crate::error::Result;
use crate::index::{Axis, CubeIndexer, Orientation, VoxelId};
use crate::math::{Point3, VoxelCoord};
use crate::tracker::ExtremumTracker;

/// Axis-aligned bounds of the occupied voxels, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelBounds {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
}

/// Sparse voxel occupancy with incrementally maintained exposed faces.
///
/// For every occupied voxel `id` and orientation `o`, the border set of `o`
/// contains `id` exactly when the neighbor of `id` toward `o` is empty.
/// Every change of that relation is recorded in a per-orientation
/// [`ChangeQueue`], which a consumer drains with
/// [`HullManager::hull_additions`] and [`HullManager::hull_removals`].
#[derive(Debug, Clone)]
pub struct HullManager<T> {
    config: HullConfig,
    indexer: CubeIndexer,
    voxels: HashMap<VoxelId, T>,
    pub(crate) border: FaceSet,
    changes: [ChangeQueue<T>; 6],
    bounds: [ExtremumTracker; 3],
    revision: u64,
}

impl<T: Clone + PartialEq> HullManager<T> {
    /// Creates an empty manager with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default configuration is rejected.
    pub fn new() -> Result<Self> {
        Self::with_config(HullConfig::default())
    }

    /// Creates an empty manager.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config` fails validation.
    pub fn with_config(config: HullConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            indexer: CubeIndexer::new(config.domain_radius)?,
            voxels: HashMap::new(),
            border: FaceSet::new(),
            changes: Default::default(),
            bounds: Default::default(),
            revision: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    #[must_use]
    pub fn indexer(&self) -> &CubeIndexer {
        &self.indexer
    }

    /// Counter bumped by every occupancy mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Removes every voxel and discards all pending changes.
    pub fn clear(&mut self) {
        self.voxels.clear();
        self.border.clear();
        for queue in &mut self.changes {
            queue.clear();
        }
        for tracker in &mut self.bounds {
            tracker.clear();
        }
        self.revision += 1;
    }

    #[must_use]
    pub fn contains(&self, coord: &VoxelCoord) -> bool {
        self.indexer
            .id(coord)
            .is_ok_and(|id| self.voxels.contains_key(&id))
    }

    #[must_use]
    pub fn contains_id(&self, id: VoxelId) -> bool {
        self.voxels.contains_key(&id)
    }

    /// Returns true if the face of `id` toward `orientation` is exposed.
    #[must_use]
    pub fn contains_border(&self, id: VoxelId, orientation: Orientation) -> bool {
        self.border.contains(id, orientation)
    }

    #[must_use]
    pub fn get(&self, coord: &VoxelCoord) -> Option<&T> {
        let id = self.indexer.id(coord).ok()?;
        self.voxels.get(&id)
    }

    #[must_use]
    pub fn get_id(&self, id: VoxelId) -> Option<&T> {
        self.voxels.get(&id)
    }

    /// Ids of all occupied voxels, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = VoxelId> + '_ {
        self.voxels.keys().copied()
    }

    /// Inserts or replaces the payload at `coord`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfDomain` if `coord` is outside the domain.
    pub fn update(&mut self, coord: VoxelCoord, payload: T) -> Result<()> {
        let id = self.indexer.id(&coord)?;
        self.insert(id, coord, payload);
        Ok(())
    }

    /// Inserts or replaces the payload at `id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if `id` does not address a voxel of the domain.
    pub fn update_id(&mut self, id: VoxelId, payload: T) -> Result<()> {
        let coord = self.indexer.coord(id)?;
        // Padding cells decode fine but are not part of the domain.
        self.indexer.id(&coord)?;
        self.insert(id, coord, payload);
        Ok(())
    }

    fn insert(&mut self, id: VoxelId, coord: VoxelCoord, payload: T) {
        self.revision += 1;

        if let Some(slot) = self.voxels.get_mut(&id) {
            trace!(?coord, "replacing voxel payload");
            slot.clone_from(&payload);
            for o in Orientation::ALL {
                let exposed = self.border.contains(id, o);
                self.changes[o.index()].refresh(id, payload.clone(), exposed);
            }
            return;
        }

        trace!(?coord, "inserting voxel");
        for o in Orientation::ALL {
            let neighbor = self.indexer.step(id, o);
            if let Some(neighbor_payload) = self.voxels.get(&neighbor) {
                let facing = o.opposite();
                if self.border.remove(neighbor, facing) {
                    self.changes[facing.index()].hide(neighbor, neighbor_payload.clone());
                }
            } else if self.border.insert(id, o) {
                self.changes[o.index()].expose(id, payload.clone());
            }
        }

        self.voxels.insert(id, payload);
        for axis in Axis::ALL {
            self.bounds[axis.index()].add(coord[axis.index()]);
        }
    }

    /// Removes the voxel at `coord`.
    ///
    /// Returns `Ok(false)` if the position was empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfDomain` if `coord` is outside the domain.
    pub fn clear_position(&mut self, coord: VoxelCoord) -> Result<bool> {
        let id = self.indexer.id(&coord)?;
        Ok(self.clear_position_id(id))
    }

    /// Removes the voxel at `id`; returns false if it was not occupied.
    pub fn clear_position_id(&mut self, id: VoxelId) -> bool {
        let Some(payload) = self.voxels.remove(&id) else {
            return false;
        };
        self.revision += 1;
        trace!(id = id.raw(), "clearing voxel");

        for o in Orientation::ALL {
            let neighbor = self.indexer.step(id, o);
            if let Some(neighbor_payload) = self.voxels.get(&neighbor) {
                let facing = o.opposite();
                if self.border.insert(neighbor, facing) {
                    self.changes[facing.index()].expose(neighbor, neighbor_payload.clone());
                }
            } else if self.border.remove(id, o) {
                self.changes[o.index()].hide(id, payload.clone());
            }
        }

        let coord = self.indexer.decode(id);
        for axis in Axis::ALL {
            self.bounds[axis.index()].remove(coord[axis.index()]);
        }
        true
    }

    /// Coordinates of every voxel exposed toward `orientation`.
    #[must_use]
    pub fn hull(&self, orientation: Orientation) -> Vec<VoxelCoord> {
        self.border
            .get(orientation)
            .iter()
            .map(|&id| self.indexer.decode(id))
            .collect()
    }

    /// Ids of every voxel exposed toward `orientation`.
    #[must_use]
    pub fn hull_ids(&self, orientation: Orientation) -> Vec<VoxelId> {
        self.border.get(orientation).iter().copied().collect()
    }

    /// Drains the faces newly exposed toward `orientation` since the last
    /// call, each with the payload it now carries.
    ///
    /// A face whose voxel payload was replaced while exposed is reported
    /// again; consumers key displayed faces by id.
    pub fn hull_additions(&mut self, orientation: Orientation) -> Vec<(VoxelId, T)> {
        self.changes[orientation.index()].drain_additions()
    }

    /// Drains the faces hidden toward `orientation` since the last call,
    /// each with its last-known payload.
    ///
    /// When both queues are drained for one batch, apply removals first.
    pub fn hull_removals(&mut self, orientation: Orientation) -> Vec<(VoxelId, T)> {
        self.changes[orientation.index()].drain_removals()
    }

    /// Ids of all voxels with at least one exposed face.
    #[must_use]
    pub fn visible_voxel_ids(&self) -> HashSet<VoxelId> {
        self.border.iter().map(|(id, _)| id).collect()
    }

    /// Inclusive bounds of the occupied voxels, or `None` when empty.
    pub fn bounds(&mut self) -> Option<VoxelBounds> {
        let mut min = VoxelCoord::origin();
        let mut max = VoxelCoord::origin();
        for axis in Axis::ALL {
            let tracker = &mut self.bounds[axis.index()];
            min[axis.index()] = tracker.min()?;
            max[axis.index()] = tracker.max()?;
        }
        Some(VoxelBounds { min, max })
    }

    /// World-space outline of the voxels projected along `axis`.
    ///
    /// Returns an empty list if no face is exposed along `axis`.
    #[must_use]
    pub fn outline(&self, axis: Axis) -> Vec<[Point3; 2]> {
        let [u, v] = axis.others();
        let cells: HashSet<(i32, i32)> = [axis.positive(), axis.negative()]
            .into_iter()
            .flat_map(|o| self.border.get(o).iter())
            .map(|&id| {
                let coord = self.indexer.decode(id);
                (coord[u.index()], coord[v.index()])
            })
            .collect();
        let cells: Vec<(i32, i32)> = cells.into_iter().collect();
        outline::project_outline(&cells, axis, &self.config)
    }
}
