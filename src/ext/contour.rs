use std::collections::VecDeque;

use slotmap::new_key_type;
use tracing::warn;

use crate::error::{PartitionError, Result};
use crate::hull::{FaceSet, HullManager};
use crate::index::{CubeIndexer, Orientation, VoxelId};

new_key_type! {
    /// Key of a contour in the classification arena.
    pub(crate) struct ContourId;
}

/// A maximal connected patch of exposed faces.
#[derive(Debug, Clone, Default)]
pub(crate) struct Contour {
    pub(crate) faces: FaceSet,
}

type FaceQueue = VecDeque<(VoxelId, Orientation)>;

/// Collects the contour containing the face `(start, orientation)`.
///
/// Faces are connected across shared edges. From each face the walk looks
/// in the four in-plane directions and takes the first exposed face among:
/// the face folding inward onto the diagonal neighbor, the coplanar face of
/// the adjacent voxel, and the face folding outward around the voxel's own
/// edge. Every visited face is added to `processed`.
///
/// # Errors
///
/// Returns `PartitionError::NonManifold` if a face has no neighbor in some
/// in-plane direction, which means the border sets are inconsistent.
pub(crate) fn detect_contour<T: Clone + PartialEq>(
    hull: &HullManager<T>,
    start: VoxelId,
    orientation: Orientation,
    processed: &mut FaceSet,
) -> Result<FaceSet> {
    let indexer = hull.indexer();
    let mut contour = FaceSet::new();
    let mut queue = FaceQueue::new();
    visit(hull, start, orientation, processed, &mut queue);

    while let Some((id, facing)) = queue.pop_front() {
        contour.insert(id, facing);
        for axis in facing.axis().others() {
            for toward in [axis.positive(), axis.negative()] {
                let side = indexer.step(id, toward);
                let diagonal = indexer.step(side, facing);
                let found = visit(hull, diagonal, toward.opposite(), processed, &mut queue)
                    || visit(hull, side, facing, processed, &mut queue)
                    || visit(hull, id, toward, processed, &mut queue);
                if !found {
                    let coord = indexer.decode(id);
                    warn!(?coord, %facing, %toward, "exposed face has no neighbor");
                    return Err(PartitionError::NonManifold {
                        x: coord.x,
                        y: coord.y,
                        z: coord.z,
                        orientation: facing,
                        toward,
                    }
                    .into());
                }
            }
        }
    }

    Ok(contour)
}

/// Returns true if `(id, orientation)` is exposed; queues it when it has not
/// been processed yet.
fn visit<T: Clone + PartialEq>(
    hull: &HullManager<T>,
    id: VoxelId,
    orientation: Orientation,
    processed: &mut FaceSet,
    queue: &mut FaceQueue,
) -> bool {
    if !hull.contains_border(id, orientation) {
        return false;
    }
    if processed.insert(id, orientation) {
        queue.push_back((id, orientation));
    }
    true
}

/// Returns true if the contour bounds a cavity.
///
/// On an outward surface the `+X` faces sit at the far side of the solid
/// and the `-X` faces at the near side; on a cavity wall the order flips.
pub(crate) fn faces_inward(faces: &FaceSet, indexer: &CubeIndexer) -> bool {
    let min_depth = |o: Orientation| {
        faces
            .get(o)
            .iter()
            .map(|&id| indexer.decode(id).x)
            .min()
            .unwrap_or(i32::MAX)
    };
    min_depth(Orientation::PosX) < min_depth(Orientation::NegX)
}

/// Returns true if `inner` lies inside the x-silhouette of `outer`.
///
/// Takes one `+X` face of `inner` as probe and sorts the depths of the
/// `outer` x-faces in the probe's column; consecutive depths pair up into
/// spans, and the probe is enclosed if it falls strictly inside one.
pub(crate) fn encloses(outer: &Contour, inner: &Contour, indexer: &CubeIndexer) -> bool {
    let Some(&probe_id) = inner.faces.get(Orientation::PosX).iter().min() else {
        return false;
    };
    let probe = indexer.decode(probe_id);

    let mut depths: Vec<i32> = [Orientation::PosX, Orientation::NegX]
        .into_iter()
        .flat_map(|o| outer.faces.get(o).iter())
        .map(|&id| indexer.decode(id))
        .filter(|c| c.y == probe.y && c.z == probe.z)
        .map(|c| c.x)
        .collect();
    depths.sort_unstable();

    depths
        .chunks_exact(2)
        .any(|span| span[0] < probe.x && probe.x < span[1])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::HullConfig;
    use crate::error::HullError;
    use crate::math::VoxelCoord;

    fn hull_with(coords: &[(i32, i32, i32)]) -> HullManager<()> {
        let mut hull = HullManager::with_config(HullConfig {
            domain_radius: 16,
            ..HullConfig::default()
        })
        .unwrap();
        for &(x, y, z) in coords {
            hull.update(VoxelCoord::new(x, y, z), ()).unwrap();
        }
        hull
    }

    fn first_face(hull: &HullManager<()>) -> VoxelId {
        *hull.hull_ids(Orientation::PosX).iter().min().unwrap()
    }

    #[test]
    fn single_voxel_contour_has_six_faces() {
        let hull = hull_with(&[(0, 0, 0)]);
        let mut processed = FaceSet::new();
        let faces =
            detect_contour(&hull, first_face(&hull), Orientation::PosX, &mut processed).unwrap();
        assert_eq!(faces.len(), 6);
        assert_eq!(processed.len(), 6);
        assert!(!faces_inward(&faces, hull.indexer()));
    }

    #[test]
    fn separate_voxels_form_separate_contours() {
        let hull = hull_with(&[(0, 0, 0), (5, 0, 0)]);
        let mut processed = FaceSet::new();
        let faces =
            detect_contour(&hull, first_face(&hull), Orientation::PosX, &mut processed).unwrap();
        assert_eq!(faces.len(), 6);
    }

    #[test]
    fn l_shape_folds_inward() {
        let hull = hull_with(&[(0, 0, 0), (1, 0, 0), (0, 1, 0)]);
        let mut processed = FaceSet::new();
        let faces =
            detect_contour(&hull, first_face(&hull), Orientation::PosX, &mut processed).unwrap();
        let total: usize = Orientation::ALL.iter().map(|&o| hull.hull(o).len()).sum();
        assert_eq!(faces.len(), total);
    }

    #[test]
    fn missing_neighbor_is_reported() {
        let mut hull = hull_with(&[(0, 0, 0), (1, 0, 0)]);
        let id = hull.indexer().id(&VoxelCoord::new(1, 0, 0)).unwrap();
        hull.border.remove(id, Orientation::PosY);
        hull.border.remove(id, Orientation::NegY);
        let start = hull.indexer().id(&VoxelCoord::new(1, 0, 0)).unwrap();
        let mut processed = FaceSet::new();
        let err = detect_contour(&hull, start, Orientation::PosX, &mut processed).unwrap_err();
        assert!(matches!(
            err,
            HullError::Partition(PartitionError::NonManifold { x: 1, y: 0, z: 0, .. })
        ));
    }

    #[test]
    fn enclosing_span_is_strict() {
        let indexer = CubeIndexer::new(16).unwrap();
        let mut outer = Contour::default();
        let mut inner = Contour::default();
        outer
            .faces
            .insert(indexer.id(&VoxelCoord::new(0, 2, 2)).unwrap(), Orientation::PosX);
        outer
            .faces
            .insert(indexer.id(&VoxelCoord::new(6, 2, 2)).unwrap(), Orientation::NegX);
        inner
            .faces
            .insert(indexer.id(&VoxelCoord::new(3, 2, 2)).unwrap(), Orientation::PosX);
        assert!(encloses(&outer, &inner, &indexer));

        let mut touching = Contour::default();
        touching
            .faces
            .insert(indexer.id(&VoxelCoord::new(6, 2, 2)).unwrap(), Orientation::PosX);
        assert!(!encloses(&outer, &touching, &indexer));
    }
}
