// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot cache for the accessory list and room layout.
//!
//! Entries never expire on their own; they are dropped only by
//! [`AccessoryCache::reset`].

use parking_lot::RwLock;

use crate::model::{Accessory, RoomLayout};

/// Holds the last fetched accessory list and layout.
///
/// # Examples
///
/// ```
/// use homebridge_lib::cache::AccessoryCache;
/// use homebridge_lib::model::RoomLayout;
///
/// let cache = AccessoryCache::new();
/// cache.store_layout(RoomLayout::default());
/// assert!(cache.layout().is_some());
///
/// cache.reset();
/// assert!(cache.layout().is_none());
/// ```
#[derive(Debug, Default)]
pub struct AccessoryCache {
    accessories: RwLock<Option<Vec<Accessory>>>,
    layout: RwLock<Option<RoomLayout>>,
}

impl AccessoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the cached accessory list.
    #[must_use]
    pub fn accessories(&self) -> Option<Vec<Accessory>> {
        self.accessories.read().clone()
    }

    /// Replaces the cached accessory list.
    pub fn store_accessories(&self, accessories: Vec<Accessory>) {
        *self.accessories.write() = Some(accessories);
    }

    /// Returns a copy of the cached layout.
    #[must_use]
    pub fn layout(&self) -> Option<RoomLayout> {
        self.layout.read().clone()
    }

    /// Replaces the cached layout.
    pub fn store_layout(&self, layout: RoomLayout) {
        *self.layout.write() = Some(layout);
    }

    /// Drops every snapshot so the next read goes to the controller.
    pub fn reset(&self) {
        *self.accessories.write() = None;
        *self.layout.write() = None;
        tracing::debug!("Accessory cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accessory(id: &str) -> Accessory {
        serde_json::from_value(serde_json::json!({"uniqueId": id})).unwrap()
    }

    #[test]
    fn cache_starts_empty() {
        let cache = AccessoryCache::new();
        assert!(cache.accessories().is_none());
        assert!(cache.layout().is_none());
    }

    #[test]
    fn cache_store_replaces_snapshot() {
        let cache = AccessoryCache::new();
        cache.store_accessories(vec![accessory("a")]);
        cache.store_accessories(vec![accessory("b"), accessory("c")]);
        let ids: Vec<_> = cache
            .accessories()
            .unwrap()
            .into_iter()
            .map(|a| a.unique_id)
            .collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn cache_keeps_empty_list_as_hit() {
        let cache = AccessoryCache::new();
        cache.store_accessories(Vec::new());
        assert_eq!(cache.accessories(), Some(Vec::new()));
    }

    #[test]
    fn reset_clears_both_snapshots() {
        let cache = AccessoryCache::new();
        cache.store_accessories(vec![accessory("a")]);
        cache.store_layout(RoomLayout::default());
        cache.reset();
        assert!(cache.accessories().is_none());
        assert!(cache.layout().is_none());
    }
}
