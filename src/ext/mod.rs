mod contour;
mod interior;

pub use hit_test::{cast_ray, RayHit};

use slotmap::SlotMap;
use tracing::debug;

use contour::{Contour, ContourId};

use crate::config::HullConfig;
use crate::error::{PartitionError, Result};
use crate::hull::{FaceSet, HullManager};
use crate::index::Orientation;
use crate::math::{Point3, Vector3, VoxelCoord};

/// Exposed faces split into those facing open space and those bounding
/// enclosed cavities.
///
/// Only valid for the hull revision it was computed at.
#[derive(Debug, Clone, Default)]
pub struct ExteriorPartition {
    pub(crate) exterior: FaceSet,
    pub(crate) interior: FaceSet,
    pub(crate) revision: u64,
}

impl ExteriorPartition {
    /// Faces reachable from the outside.
    #[must_use]
    pub fn exterior(&self) -> &FaceSet {
        &self.exterior
    }

    /// Faces bounding an enclosed cavity.
    #[must_use]
    pub fn interior(&self) -> &FaceSet {
        &self.interior
    }

    /// Hull revision the partition was computed at.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// A [`HullManager`] with ray picking and cavity analysis.
///
/// Mutations go through [`HullManagerExt::hull_mut`]; any mutation makes the
/// last [`HullManagerExt::compute_exterior`] result stale, and the partition
/// queries refuse to answer until it is recomputed.
#[derive(Debug, Clone)]
pub struct HullManagerExt<T> {
    hull: HullManager<T>,
    partition: Option<ExteriorPartition>,
}

impl<T: Clone + PartialEq> HullManagerExt<T> {
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
        Ok(Self::from(HullManager::with_config(config)?))
    }

    #[must_use]
    pub fn hull(&self) -> &HullManager<T> {
        &self.hull
    }

    pub fn hull_mut(&mut self) -> &mut HullManager<T> {
        &mut self.hull
    }

    #[must_use]
    pub fn into_inner(self) -> HullManager<T> {
        self.hull
    }

    /// Casts a pick ray against the exposed faces.
    ///
    /// Gives up after `raycast_max_steps` cells and returns `None`.
    #[must_use]
    pub fn hit_test(&self, origin: &Point3, direction: &Vector3) -> Option<RayHit> {
        cast_ray(
            &self.hull,
            origin,
            direction,
            self.hull.config().raycast_max_steps,
        )
    }

    /// Recomputes the exterior/interior partition of the exposed faces.
    ///
    /// Returns true if at least one cavity was found.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError::NonManifold` if the contour walk finds a face
    /// without neighbors; no partition is stored in that case.
    pub fn compute_exterior(&mut self) -> Result<bool> {
        self.partition = None;
        let hull = &self.hull;
        let indexer = hull.indexer();

        let mut contours: SlotMap<ContourId, Contour> = SlotMap::with_key();
        let mut exterior = Vec::new();
        let mut interior = Vec::new();
        let mut processed = FaceSet::new();

        // Every closed surface has +X faces, so these starts reach all contours.
        let mut starts = hull.hull_ids(Orientation::PosX);
        starts.sort_unstable();
        for start in starts {
            if processed.contains(start, Orientation::PosX) {
                continue;
            }
            let faces = contour::detect_contour(hull, start, Orientation::PosX, &mut processed)?;
            let inward = contour::faces_inward(&faces, indexer);
            let key = contours.insert(Contour { faces });
            if inward {
                interior.push(key);
            } else {
                exterior.push(key);
            }
        }
        let cavities = interior.len();

        // An outward surface inside a cavity (a shell floating in a hollow)
        // belongs to the interior as well.
        let mut moved = true;
        while moved {
            moved = false;
            let mut i = 0;
            while i < exterior.len() {
                let candidate = &contours[exterior[i]];
                let nested = interior
                    .iter()
                    .any(|&key| contour::encloses(&contours[key], candidate, indexer));
                if nested {
                    interior.push(exterior.remove(i));
                    moved = true;
                } else {
                    i += 1;
                }
            }
        }

        let mut partition = ExteriorPartition {
            revision: hull.revision(),
            ..ExteriorPartition::default()
        };
        for key in &exterior {
            partition.exterior.extend(&contours[*key].faces);
        }
        for key in &interior {
            partition.interior.extend(&contours[*key].faces);
        }

        debug!(
            contours = contours.len(),
            cavities,
            nested = interior.len() - cavities,
            exterior_faces = partition.exterior.len(),
            interior_faces = partition.interior.len(),
            "computed exterior partition"
        );

        self.partition = Some(partition);
        Ok(!interior.is_empty())
    }

    /// The last computed partition.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError::NotComputed` if [`HullManagerExt::compute_exterior`]
    /// never succeeded, or `PartitionError::Stale` if the hull changed since.
    pub fn partition(&self) -> Result<&ExteriorPartition> {
        let partition = self.partition.as_ref().ok_or(PartitionError::NotComputed)?;
        if partition.revision != self.hull.revision() {
            return Err(PartitionError::Stale {
                computed: partition.revision,
                current: self.hull.revision(),
            }
            .into());
        }
        Ok(partition)
    }

    /// Exterior faces toward `orientation`.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError` if the partition is missing or stale.
    pub fn exterior_hull(&self, orientation: Orientation) -> Result<Vec<VoxelCoord>> {
        let partition = self.partition()?;
        Ok(self.decode_all(partition.exterior.get(orientation).iter().copied()))
    }

    /// Interior (cavity) faces toward `orientation`.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError` if the partition is missing or stale.
    pub fn interior_hull(&self, orientation: Orientation) -> Result<Vec<VoxelCoord>> {
        let partition = self.partition()?;
        Ok(self.decode_all(partition.interior.get(orientation).iter().copied()))
    }

    /// Empty positions enclosed by cavity walls.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError` if the partition is missing or stale, or if
    /// the interior faces do not pair up column by column.
    pub fn empty_interior(&self) -> Result<Vec<VoxelCoord>> {
        interior::empty_interior(&self.hull, self.partition()?)
    }

    /// Occupied voxels that touch the outside through none of their faces.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError` if the partition is missing or stale.
    pub fn filled_interior(&self) -> Result<Vec<VoxelCoord>> {
        Ok(interior::filled_interior(&self.hull, self.partition()?))
    }

    fn decode_all(&self, ids: impl Iterator<Item = crate::index::VoxelId>) -> Vec<VoxelCoord> {
        let indexer = self.hull.indexer();
        ids.map(|id| indexer.decode(id)).collect()
    }
}

impl<T> From<HullManager<T>> for HullManagerExt<T> {
    fn from(hull: HullManager<T>) -> Self {
        Self {
            hull,
            partition: None,
        }
    }
}
