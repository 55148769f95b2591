//! The proximity index itself: insert/update/remove positions, scan a circle.
//!
//! The index is a flat `BTreeMap` of key → position. While not optimal for
//! very large entity counts, a sorted flat scan is correct, cache-friendly at
//! the scale of a combat encounter (tens of actors), and — critically —
//! deterministic: a query visits candidates in key order on every platform.
//!
//! # Truncation
//!
//! [`ProximityIndex::query_into`] fills a caller-owned slice. When more
//! candidates overlap the circle than the slice can hold, the overflow is
//! silently dropped (logged at trace level). Callers that rescan periodically
//! treat this as "some candidates invisible this scan".

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Proximity index over keyed 2D positions.
///
/// Keys are caller-defined (entity ids, typically). The index never inspects
/// them beyond ordering, which fixes the scan order for determinism.
///
/// # Synchronization
///
/// The index is not self-updating: after moving an entity, the owner must
/// call [`update`](Self::update) (or re-[`insert`](Self::insert)) to keep the
/// stored position in sync. Batch updates are fine — move everything first,
/// sync all positions, then query.
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use nearfield::ProximityIndex;
///
/// let mut index = ProximityIndex::new();
/// index.insert(7u32, Vec2::new(3.0, 4.0));
/// assert_eq!(index.position(7), Some(Vec2::new(3.0, 4.0)));
///
/// let nearby = index.query_radius(Vec2::ZERO, 6.0);
/// assert_eq!(nearby, vec![7]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityIndex<K: Copy + Ord> {
    /// Positions keyed by entity, iterated in key order.
    positions: BTreeMap<K, Vec2>,
}

impl<K: Copy + Ord> ProximityIndex<K> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: BTreeMap::new(),
        }
    }

    /// Inserts or updates an entity's position.
    pub fn insert(&mut self, key: K, position: Vec2) {
        self.positions.insert(key, position);
    }

    /// Removes an entity from the index. No-op if the key is unknown.
    pub fn remove(&mut self, key: K) {
        self.positions.remove(&key);
    }

    /// Updates the position of an already-indexed entity.
    ///
    /// Returns `true` if the entity was found and updated, `false` if the
    /// key is unknown (the index is left unchanged).
    pub fn update(&mut self, key: K, position: Vec2) -> bool {
        match self.positions.get_mut(&key) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Returns the stored position for a key, if any.
    #[must_use]
    pub fn position(&self, key: K) -> Option<Vec2> {
        self.positions.get(&key).copied()
    }

    /// Returns the number of indexed entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Scans a circle and fills `buffer` with the keys inside it, in key
    /// order. Returns how many keys were written.
    ///
    /// Never allocates. A candidate exactly on the boundary is included.
    /// When the buffer is too small for every hit, the remainder is silently
    /// truncated; because the scan runs in key order, the retained subset is
    /// deterministic.
    ///
    /// An empty scene (or an empty buffer) yields 0.
    pub fn query_into(&self, origin: Vec2, radius: f32, buffer: &mut [K]) -> usize {
        let radius_sq = radius * radius;
        let mut written = 0;
        let mut overflow = 0usize;

        for (key, position) in &self.positions {
            if origin.distance_squared(*position) > radius_sq {
                continue;
            }
            if written < buffer.len() {
                buffer[written] = *key;
                written += 1;
            } else {
                overflow += 1;
            }
        }

        if overflow > 0 {
            trace!(overflow, capacity = buffer.len(), "proximity scan truncated");
        }

        written
    }

    /// Allocating variant of [`query_into`](Self::query_into): returns every
    /// key inside the circle, in key order.
    #[must_use]
    pub fn query_radius(&self, origin: Vec2, radius: f32) -> Vec<K> {
        let radius_sq = radius * radius;
        self.positions
            .iter()
            .filter(|(_, position)| origin.distance_squared(**position) <= radius_sq)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Iterates over all (key, position) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Vec2)> + '_ {
        self.positions.iter().map(|(key, position)| (*key, *position))
    }
}

impl<K: Copy + Ord> Default for ProximityIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_tests {
        use super::*;

        #[test]
        fn new_is_empty() {
            let index: ProximityIndex<u64> = ProximityIndex::new();
            assert!(index.is_empty());
            assert_eq!(index.len(), 0);
        }

        #[test]
        fn insert_and_position() {
            let mut index = ProximityIndex::new();
            index.insert(1u64, Vec2::new(10.0, 20.0));

            assert_eq!(index.position(1), Some(Vec2::new(10.0, 20.0)));
            assert_eq!(index.len(), 1);
        }

        #[test]
        fn insert_overwrites() {
            let mut index = ProximityIndex::new();
            index.insert(1u64, Vec2::new(10.0, 20.0));
            index.insert(1u64, Vec2::new(30.0, 40.0));

            assert_eq!(index.position(1), Some(Vec2::new(30.0, 40.0)));
            assert_eq!(index.len(), 1);
        }

        #[test]
        fn remove_deletes_entry() {
            let mut index = ProximityIndex::new();
            index.insert(1u64, Vec2::ZERO);
            index.remove(1);

            assert!(index.position(1).is_none());
            assert!(index.is_empty());
        }

        #[test]
        fn remove_unknown_is_noop() {
            let mut index: ProximityIndex<u64> = ProximityIndex::new();
            index.remove(99);
            assert!(index.is_empty());
        }

        #[test]
        fn update_existing() {
            let mut index = ProximityIndex::new();
            index.insert(1u64, Vec2::ZERO);

            assert!(index.update(1, Vec2::new(5.0, 5.0)));
            assert_eq!(index.position(1), Some(Vec2::new(5.0, 5.0)));
        }

        #[test]
        fn update_unknown_returns_false() {
            let mut index: ProximityIndex<u64> = ProximityIndex::new();
            assert!(!index.update(1, Vec2::ZERO));
            assert!(index.is_empty());
        }

        #[test]
        fn clear_removes_everything() {
            let mut index = ProximityIndex::new();
            index.insert(1u64, Vec2::ZERO);
            index.insert(2u64, Vec2::ONE);
            index.clear();
            assert!(index.is_empty());
        }

        #[test]
        fn iter_is_key_ordered() {
            let mut index = ProximityIndex::new();
            index.insert(5u64, Vec2::ZERO);
            index.insert(2u64, Vec2::ONE);
            index.insert(9u64, Vec2::ZERO);

            let keys: Vec<u64> = index.iter().map(|(key, _)| key).collect();
            assert_eq!(keys, vec![2, 5, 9]);
        }
    }

    mod query_tests {
        use super::*;

        fn populated() -> ProximityIndex<u64> {
            let mut index = ProximityIndex::new();
            index.insert(1, Vec2::new(0.0, 0.0));
            index.insert(2, Vec2::new(50.0, 0.0));
            index.insert(3, Vec2::new(150.0, 0.0));
            index
        }

        #[test]
        fn query_radius_finds_inside() {
            let index = populated();
            let hits = index.query_radius(Vec2::ZERO, 100.0);
            assert_eq!(hits, vec![1, 2]);
        }

        #[test]
        fn query_radius_empty_scene() {
            let index: ProximityIndex<u64> = ProximityIndex::new();
            assert!(index.query_radius(Vec2::ZERO, 100.0).is_empty());
        }

        #[test]
        fn query_radius_boundary_inclusive() {
            let mut index = ProximityIndex::new();
            index.insert(1u64, Vec2::new(100.0, 0.0));
            assert_eq!(index.query_radius(Vec2::ZERO, 100.0), vec![1]);
        }

        #[test]
        fn query_radius_zero_radius() {
            let mut index = ProximityIndex::new();
            index.insert(1u64, Vec2::ZERO);
            assert_eq!(index.query_radius(Vec2::ZERO, 0.0), vec![1]);
        }

        #[test]
        fn query_into_fills_buffer() {
            let index = populated();
            let mut buffer = [0u64; 8];

            let written = index.query_into(Vec2::ZERO, 100.0, &mut buffer);

            assert_eq!(written, 2);
            assert_eq!(&buffer[..written], &[1, 2]);
        }

        #[test]
        fn query_into_truncates_at_capacity() {
            let mut index = ProximityIndex::new();
            for key in 0..10u64 {
                index.insert(key, Vec2::new(key as f32, 0.0));
            }
            let mut buffer = [0u64; 4];

            let written = index.query_into(Vec2::ZERO, 100.0, &mut buffer);

            // Key-ordered truncation keeps the lowest keys.
            assert_eq!(written, 4);
            assert_eq!(buffer, [0, 1, 2, 3]);
        }

        #[test]
        fn query_into_empty_buffer() {
            let index = populated();
            let mut buffer: [u64; 0] = [];
            assert_eq!(index.query_into(Vec2::ZERO, 100.0, &mut buffer), 0);
        }

        #[test]
        fn query_into_empty_scene() {
            let index: ProximityIndex<u64> = ProximityIndex::new();
            let mut buffer = [0u64; 4];
            assert_eq!(index.query_into(Vec2::ZERO, 100.0, &mut buffer), 0);
        }

        #[test]
        fn query_into_matches_query_radius_prefix() {
            let index = populated();
            let mut buffer = [0u64; 1];

            let written = index.query_into(Vec2::ZERO, 100.0, &mut buffer);
            let full = index.query_radius(Vec2::ZERO, 100.0);

            assert_eq!(&buffer[..written], &full[..written]);
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn serialization_roundtrip() {
            let mut index = ProximityIndex::new();
            index.insert(1u64, Vec2::new(100.0, 200.0));
            index.insert(2u64, Vec2::new(300.0, 400.0));

            let json = serde_json::to_string(&index).unwrap();
            let restored: ProximityIndex<u64> = serde_json::from_str(&json).unwrap();

            assert_eq!(restored.position(1), Some(Vec2::new(100.0, 200.0)));
            assert_eq!(restored.position(2), Some(Vec2::new(300.0, 400.0)));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn query_into_never_exceeds_capacity(
                points in prop::collection::vec((0u64..64, -100.0f32..100.0, -100.0f32..100.0), 0..64),
                radius in 0.0f32..200.0,
                capacity in 0usize..8,
            ) {
                let mut index = ProximityIndex::new();
                for (key, x, y) in points {
                    index.insert(key, Vec2::new(x, y));
                }

                let mut buffer = vec![0u64; capacity];
                let written = index.query_into(Vec2::ZERO, radius, &mut buffer);

                prop_assert!(written <= capacity);
                let full = index.query_radius(Vec2::ZERO, radius);
                prop_assert_eq!(&buffer[..written], &full[..written.min(full.len())]);
            }

            #[test]
            fn query_radius_is_sorted(
                points in prop::collection::vec((0u64..1000, -100.0f32..100.0, -100.0f32..100.0), 0..64),
            ) {
                let mut index = ProximityIndex::new();
                for (key, x, y) in points {
                    index.insert(key, Vec2::new(x, y));
                }

                let hits = index.query_radius(Vec2::ZERO, 50.0);
                let mut sorted = hits.clone();
                sorted.sort_unstable();
                prop_assert_eq!(hits, sorted);
            }
        }
    }
}
