use std::collections::HashMap;

/// Tracks the minimum and maximum of a multiset of integers.
///
/// Insertion updates the cached extremes directly. Removing a value that
/// is a current extreme only marks the cache as outdated; the next read
/// rescans the remaining keys once.
#[derive(Debug, Clone, Default)]
pub struct ExtremumTracker {
    counts: HashMap<i32, usize>,
    min: i32,
    max: i32,
    outdated: bool,
}

impl ExtremumTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values held, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Adds one occurrence of `value`.
    pub fn add(&mut self, value: i32) {
        let was_empty = self.counts.is_empty();
        let count = self.counts.entry(value).or_insert(0);
        *count += 1;
        if *count > 1 || self.outdated {
            return;
        }
        if was_empty {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Removes one occurrence of `value`.
    ///
    /// Returns false and leaves the tracker untouched if `value` is not held.
    pub fn remove(&mut self, value: i32) -> bool {
        let Some(count) = self.counts.get_mut(&value) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&value);
            if value == self.min || value == self.max {
                self.outdated = true;
            }
        }
        true
    }

    /// Smallest value held, or `None` when empty.
    pub fn min(&mut self) -> Option<i32> {
        self.refresh();
        (!self.counts.is_empty()).then_some(self.min)
    }

    /// Largest value held, or `None` when empty.
    pub fn max(&mut self) -> Option<i32> {
        self.refresh();
        (!self.counts.is_empty()).then_some(self.max)
    }

    /// Resets to the empty state.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.min = 0;
        self.max = 0;
        self.outdated = false;
    }

    fn refresh(&mut self) {
        if !self.outdated {
            return;
        }
        let mut keys = self.counts.keys().copied();
        if let Some(first) = keys.next() {
            let (min, max) = keys.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
            self.min = min;
            self.max = max;
        }
        self.outdated = false;
    }
}
