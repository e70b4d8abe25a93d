//! Property-based tests for the incremental hull.
//!
//! Random edit sequences are replayed against a [`HullManager`] and checked
//! against a brute-force recomputation of the exposed faces.
//!
//! Run with: cargo test -- proptest

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use voxhull::tracker::ExtremumTracker;
use voxhull::{HullConfig, HullManager, Orientation, VoxelBounds, VoxelCoord, VoxelId};

// =============================================================================
// Strategies
// =============================================================================

#[derive(Debug, Clone)]
enum Edit {
    Update(VoxelCoord, u8),
    Clear(VoxelCoord),
}

/// Coordinates packed into a small box so that edits collide often.
fn arb_coord() -> impl Strategy<Value = VoxelCoord> {
    prop::array::uniform3(-3..3i32).prop_map(VoxelCoord::from)
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (arb_coord(), 0..3u8).prop_map(|(c, p)| Edit::Update(c, p)),
        2 => arb_coord().prop_map(Edit::Clear),
    ]
}

fn arb_edits(max: usize) -> impl Strategy<Value = Vec<Edit>> {
    prop::collection::vec(arb_edit(), 0..max)
}

// =============================================================================
// Helpers
// =============================================================================

fn new_hull() -> HullManager<u8> {
    HullManager::with_config(HullConfig {
        domain_radius: 4,
        ..HullConfig::default()
    })
    .unwrap()
}

fn apply(hull: &mut HullManager<u8>, edit: &Edit) {
    match edit {
        Edit::Update(coord, payload) => hull.update(*coord, *payload).unwrap(),
        Edit::Clear(coord) => {
            hull.clear_position(*coord).unwrap();
        }
    }
}

/// Exposed faces recomputed from scratch.
fn expected_faces(hull: &HullManager<u8>) -> HashSet<(VoxelId, Orientation)> {
    let indexer = hull.indexer();
    let mut faces = HashSet::new();
    for id in hull.ids() {
        for o in Orientation::ALL {
            if !hull.contains_id(indexer.step(id, o)) {
                faces.insert((id, o));
            }
        }
    }
    faces
}

fn actual_faces(hull: &HullManager<u8>) -> HashSet<(VoxelId, Orientation)> {
    Orientation::ALL
        .into_iter()
        .flat_map(|o| hull.hull_ids(o).into_iter().map(move |id| (id, o)))
        .collect()
}

/// A consumer mirroring the exposed faces through the drained diffs.
#[derive(Default)]
struct Mirror {
    faces: [HashMap<VoxelId, u8>; 6],
}

impl Mirror {
    fn sync(&mut self, hull: &mut HullManager<u8>) {
        for o in Orientation::ALL {
            let shown = &mut self.faces[o.index()];
            for (id, _) in hull.hull_removals(o) {
                assert!(shown.remove(&id).is_some(), "removed face was never shown");
            }
            for (id, payload) in hull.hull_additions(o) {
                shown.insert(id, payload);
            }
        }
    }

    fn matches(&self, hull: &HullManager<u8>) -> bool {
        Orientation::ALL.into_iter().all(|o| {
            let expected: HashMap<VoxelId, u8> = hull
                .hull_ids(o)
                .into_iter()
                .filter_map(|id| hull.get_id(id).map(|p| (id, *p)))
                .collect();
            self.faces[o.index()] == expected
        })
    }
}

fn brute_bounds(hull: &HullManager<u8>) -> Option<VoxelBounds> {
    let coords: Vec<VoxelCoord> = hull
        .ids()
        .map(|id| hull.indexer().coord(id).unwrap())
        .collect();
    let first = *coords.first()?;
    let mut bounds = VoxelBounds {
        min: first,
        max: first,
    };
    for c in &coords {
        for axis in 0..3 {
            bounds.min[axis] = bounds.min[axis].min(c[axis]);
            bounds.max[axis] = bounds.max[axis].max(c[axis]);
        }
    }
    Some(bounds)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// The border sets always equal the brute-force exposed faces.
    #[test]
    fn proptest_border_matches_occupancy(edits in arb_edits(60)) {
        let mut hull = new_hull();
        for edit in &edits {
            apply(&mut hull, edit);
            prop_assert_eq!(actual_faces(&hull), expected_faces(&hull));
        }
    }

    /// Draining after every edit keeps a consumer in sync.
    #[test]
    fn proptest_diffs_track_each_edit(edits in arb_edits(40)) {
        let mut hull = new_hull();
        let mut mirror = Mirror::default();
        for edit in &edits {
            apply(&mut hull, edit);
            mirror.sync(&mut hull);
            prop_assert!(mirror.matches(&hull));
        }
    }

    /// Draining in arbitrary batches yields the same consumer state as
    /// draining after every edit.
    #[test]
    fn proptest_batched_diffs_converge(
        batches in prop::collection::vec(arb_edits(20), 1..5),
    ) {
        let mut hull = new_hull();
        let mut mirror = Mirror::default();
        for batch in &batches {
            for edit in batch {
                apply(&mut hull, edit);
            }
            mirror.sync(&mut hull);
            prop_assert!(mirror.matches(&hull));
        }
        for o in Orientation::ALL {
            prop_assert!(hull.hull_additions(o).is_empty());
            prop_assert!(hull.hull_removals(o).is_empty());
        }
    }

    /// Undoing a batch within one drain window leaves no net change.
    #[test]
    fn proptest_undo_cancels(edits in arb_edits(20)) {
        let mut hull = new_hull();
        for edit in &edits {
            apply(&mut hull, edit);
        }
        for o in Orientation::ALL {
            hull.hull_additions(o);
            hull.hull_removals(o);
        }

        let snapshot: Vec<(VoxelCoord, u8)> = hull
            .ids()
            .map(|id| (hull.indexer().coord(id).unwrap(), *hull.get_id(id).unwrap()))
            .collect();
        hull.update(VoxelCoord::new(3, 3, 3), 9).unwrap();
        hull.clear_position(VoxelCoord::new(3, 3, 3)).unwrap();
        for (coord, _) in &snapshot {
            hull.clear_position(*coord).unwrap();
        }
        for (coord, payload) in &snapshot {
            hull.update(*coord, *payload).unwrap();
        }

        for o in Orientation::ALL {
            prop_assert!(hull.hull_additions(o).is_empty(), "additions toward {}", o);
            prop_assert!(hull.hull_removals(o).is_empty(), "removals toward {}", o);
        }
    }

    /// Bounds follow the occupied voxels through insertions and removals.
    #[test]
    fn proptest_bounds_match_occupancy(edits in arb_edits(60)) {
        let mut hull = new_hull();
        for edit in &edits {
            apply(&mut hull, edit);
            let expected = brute_bounds(&hull);
            prop_assert_eq!(hull.bounds(), expected);
        }
    }

    /// The extremum tracker agrees with a sorted multiset.
    #[test]
    fn proptest_tracker_matches_multiset(
        ops in prop::collection::vec((any::<bool>(), -20..20i32), 0..100),
    ) {
        let mut tracker = ExtremumTracker::new();
        let mut values: Vec<i32> = Vec::new();
        for (insert, value) in ops {
            if insert {
                tracker.add(value);
                values.push(value);
            } else {
                let held = values.iter().position(|&v| v == value);
                prop_assert_eq!(tracker.remove(value), held.is_some());
                if let Some(i) = held {
                    values.swap_remove(i);
                }
            }
            prop_assert_eq!(tracker.len(), values.len());
            prop_assert_eq!(tracker.min(), values.iter().copied().min());
            prop_assert_eq!(tracker.max(), values.iter().copied().max());
        }
    }
}
