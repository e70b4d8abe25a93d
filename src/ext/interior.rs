use std::collections::HashMap;

use super::ExteriorPartition;
use crate::error::{PartitionError, Result};
use crate::hull::HullManager;
use crate::index::Orientation;
use crate::math::VoxelCoord;

/// Empty cells enclosed by interior faces, scanned along x.
///
/// Interior `+X` faces open a hollow span in their (y, z) column and
/// interior `-X` faces close it. Faces are merged in depth order, with a
/// closing face winning a tie so that a one-voxel wall between two
/// cavities closes the first span before opening the next.
///
/// # Errors
///
/// Returns `PartitionError::UnmatchedInterior` if a span is closed without
/// being opened, opened twice, or never closed.
pub(crate) fn empty_interior<T: Clone + PartialEq>(
    hull: &HullManager<T>,
    partition: &ExteriorPartition,
) -> Result<Vec<VoxelCoord>> {
    let indexer = hull.indexer();
    let sorted_faces = |o: Orientation| {
        let mut coords: Vec<VoxelCoord> = partition
            .interior
            .get(o)
            .iter()
            .map(|&id| indexer.decode(id))
            .collect();
        coords.sort_by_key(|c| (c.x, c.y, c.z));
        coords
    };
    let entries = sorted_faces(Orientation::PosX);
    let exits = sorted_faces(Orientation::NegX);

    let mut open: HashMap<(i32, i32), i32> = HashMap::new();
    let mut hollow = Vec::new();
    let (mut ia, mut ib) = (0, 0);

    while ia < entries.len() || ib < exits.len() {
        let take_entry = ia < entries.len() && (ib >= exits.len() || entries[ia].x < exits[ib].x);
        if take_entry {
            let entry = entries[ia];
            if open.insert((entry.y, entry.z), entry.x).is_some() {
                return Err(unmatched(entry));
            }
            ia += 1;
        } else {
            let exit = exits[ib];
            let Some(start) = open.remove(&(exit.y, exit.z)) else {
                return Err(unmatched(exit));
            };
            hollow.extend(
                (start + 1..exit.x)
                    .map(|x| VoxelCoord::new(x, exit.y, exit.z))
                    .filter(|c| !hull.contains(c)),
            );
            ib += 1;
        }
    }

    if let Some((&(y, z), &depth)) = open.iter().next() {
        return Err(PartitionError::UnmatchedInterior { y, z, depth }.into());
    }

    Ok(hollow)
}

fn unmatched(face: VoxelCoord) -> crate::error::HullError {
    PartitionError::UnmatchedInterior {
        y: face.y,
        z: face.z,
        depth: face.x,
    }
    .into()
}

/// Occupied voxels without any exterior face.
pub(crate) fn filled_interior<T: Clone + PartialEq>(
    hull: &HullManager<T>,
    partition: &ExteriorPartition,
) -> Vec<VoxelCoord> {
    let indexer = hull.indexer();
    hull.ids()
        .filter(|&id| !partition.exterior.contains_any(id))
        .map(|id| indexer.decode(id))
        .collect()
}
