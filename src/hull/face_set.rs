use std::collections::HashSet;

use crate::index::{Orientation, VoxelId};

/// Six id sets, one per face orientation.
///
/// A member `(id, o)` names the face of voxel `id` that points toward `o`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceSet {
    faces: [HashSet<VoxelId>; 6],
}

impl FaceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a face; returns true if it was not present.
    pub fn insert(&mut self, id: VoxelId, orientation: Orientation) -> bool {
        self.faces[orientation.index()].insert(id)
    }

    /// Removes a face; returns true if it was present.
    pub fn remove(&mut self, id: VoxelId, orientation: Orientation) -> bool {
        self.faces[orientation.index()].remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: VoxelId, orientation: Orientation) -> bool {
        self.faces[orientation.index()].contains(&id)
    }

    /// Returns true if any orientation holds a face of `id`.
    #[must_use]
    pub fn contains_any(&self, id: VoxelId) -> bool {
        self.faces.iter().any(|set| set.contains(&id))
    }

    /// The ids holding a face in `orientation`.
    #[must_use]
    pub fn get(&self, orientation: Orientation) -> &HashSet<VoxelId> {
        &self.faces[orientation.index()]
    }

    /// Total number of faces over all orientations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.iter().map(HashSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.iter().all(HashSet::is_empty)
    }

    /// Adds every face of `other`.
    pub fn extend(&mut self, other: &FaceSet) {
        for (set, extra) in self.faces.iter_mut().zip(&other.faces) {
            set.extend(extra.iter().copied());
        }
    }

    pub fn clear(&mut self) {
        for set in &mut self.faces {
            set.clear();
        }
    }

    /// Iterates over all faces as `(id, orientation)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelId, Orientation)> + '_ {
        Orientation::ALL
            .into_iter()
            .flat_map(move |o| self.faces[o.index()].iter().map(move |&id| (id, o)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_contains() {
        let mut set = FaceSet::new();
        let id = VoxelId::from_raw(17);
        assert!(set.insert(id, Orientation::PosY));
        assert!(!set.insert(id, Orientation::PosY));
        assert!(set.contains(id, Orientation::PosY));
        assert!(!set.contains(id, Orientation::NegY));
        assert!(set.contains_any(id));
        assert!(set.remove(id, Orientation::PosY));
        assert!(set.is_empty());
    }

    #[test]
    fn extend_merges_per_orientation() {
        let mut a = FaceSet::new();
        let mut b = FaceSet::new();
        a.insert(VoxelId::from_raw(1), Orientation::PosX);
        b.insert(VoxelId::from_raw(1), Orientation::PosX);
        b.insert(VoxelId::from_raw(2), Orientation::NegZ);
        a.extend(&b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().count(), 2);
    }
}
