use std::collections::HashMap;

use crate::index::VoxelId;

/// Net change of one face since the consumer last drained it.
#[derive(Debug, Clone, PartialEq)]
enum FaceChange<T> {
    /// Hidden at the last drain, exposed now.
    Exposed(T),
    /// Exposed at the last drain and now, with a replaced payload.
    Refreshed(T),
    /// Exposed at the last drain, hidden now. `refreshed` records a payload
    /// replacement in between, so a later re-exposure must be reported.
    Hidden { payload: T, refreshed: bool },
}

/// Drainable record of face exposure changes for one orientation.
///
/// Each face holds at most one pending entry, describing the net
/// transition between the consumer's last view and the current state.
/// A toggle that returns a face to that view with the same payload leaves
/// no entry behind.
#[derive(Debug, Clone)]
pub struct ChangeQueue<T> {
    pending: HashMap<VoxelId, FaceChange<T>>,
}

impl<T> Default for ChangeQueue<T> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<T: Clone + PartialEq> ChangeQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the face of `id` became exposed, carrying `payload`.
    pub fn expose(&mut self, id: VoxelId, payload: T) {
        match self.pending.remove(&id) {
            None => {
                self.pending.insert(id, FaceChange::Exposed(payload));
            }
            Some(FaceChange::Hidden {
                payload: previous,
                refreshed,
            }) => {
                if refreshed || previous != payload {
                    self.pending.insert(id, FaceChange::Refreshed(payload));
                }
            }
            // Already exposed; keep the newest payload.
            Some(FaceChange::Exposed(_)) => {
                self.pending.insert(id, FaceChange::Exposed(payload));
            }
            Some(FaceChange::Refreshed(_)) => {
                self.pending.insert(id, FaceChange::Refreshed(payload));
            }
        }
    }

    /// Records that the face of `id` became hidden; `payload` is the last
    /// payload the face carried.
    pub fn hide(&mut self, id: VoxelId, payload: T) {
        match self.pending.remove(&id) {
            None => {
                self.pending.insert(
                    id,
                    FaceChange::Hidden {
                        payload,
                        refreshed: false,
                    },
                );
            }
            Some(FaceChange::Exposed(_)) => {}
            Some(FaceChange::Refreshed(_)) => {
                self.pending.insert(
                    id,
                    FaceChange::Hidden {
                        payload,
                        refreshed: true,
                    },
                );
            }
            Some(FaceChange::Hidden { refreshed, .. }) => {
                self.pending
                    .insert(id, FaceChange::Hidden { payload, refreshed });
            }
        }
    }

    /// Records a payload replacement for the voxel `id`.
    ///
    /// An exposed face is reported again with the new payload; a pending
    /// removal keeps the new payload as its last-known value.
    pub fn refresh(&mut self, id: VoxelId, payload: T, exposed: bool) {
        if exposed {
            let change = match self.pending.remove(&id) {
                Some(FaceChange::Exposed(_)) => FaceChange::Exposed(payload),
                _ => FaceChange::Refreshed(payload),
            };
            self.pending.insert(id, change);
        } else if let Some(FaceChange::Hidden {
            payload: last,
            refreshed,
        }) = self.pending.get_mut(&id)
        {
            *last = payload;
            *refreshed = true;
        }
    }

    /// Takes every pending addition, leaving removals queued.
    pub fn drain_additions(&mut self) -> Vec<(VoxelId, T)> {
        let mut additions = Vec::new();
        self.pending.retain(|&id, change| match change {
            FaceChange::Exposed(payload) | FaceChange::Refreshed(payload) => {
                additions.push((id, payload.clone()));
                false
            }
            FaceChange::Hidden { .. } => true,
        });
        additions
    }

    /// Takes every pending removal, leaving additions queued.
    pub fn drain_removals(&mut self) -> Vec<(VoxelId, T)> {
        let mut removals = Vec::new();
        self.pending.retain(|&id, change| match change {
            FaceChange::Hidden { payload, .. } => {
                removals.push((id, payload.clone()));
                false
            }
            FaceChange::Exposed(_) | FaceChange::Refreshed(_) => true,
        });
        removals
    }

    /// Number of faces with a pending change.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
