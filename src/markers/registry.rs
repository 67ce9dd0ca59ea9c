/*
    ClusterViz
    https://github.com/dbalsom/clusterviz

    Copyright 2024 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/

//! The [MarkerRegistry] owns every marker handle a reconciler has created, and tracks which of
//! them are currently attached to the map surface.
//!
//! The attached set is always a subset of the created set.

use crate::{feature::ClusterId, markers::handle::MarkerHandle, VizHashMap, VizHashSet};

#[derive(Debug)]
struct RegistryEntry<E> {
    handle: MarkerHandle<E>,
    // Reconciliation tick at which this cluster was last visible
    last_seen: u64,
}

#[derive(Debug)]
pub struct MarkerRegistry<E> {
    markers: VizHashMap<ClusterId, RegistryEntry<E>>,
    on_screen: VizHashSet<ClusterId>,
}

impl<E> Default for MarkerRegistry<E> {
    fn default() -> Self {
        Self {
            markers: VizHashMap::default(),
            on_screen: VizHashSet::default(),
        }
    }
}

impl<E> MarkerRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of handles ever created and not evicted.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Return the number of handles currently attached to the surface.
    pub fn attached_len(&self) -> usize {
        self.on_screen.len()
    }

    pub fn contains(&self, id: ClusterId) -> bool {
        self.markers.contains_key(&id)
    }

    pub fn is_attached(&self, id: ClusterId) -> bool {
        self.on_screen.contains(&id)
    }

    pub fn get(&self, id: ClusterId) -> Option<&MarkerHandle<E>> {
        self.markers.get(&id).map(|entry| &entry.handle)
    }

    /// Return the tick at which `id` was last reported visible.
    pub fn last_seen(&self, id: ClusterId) -> Option<u64> {
        self.markers.get(&id).map(|entry| entry.last_seen)
    }

    /// Return the ids of all attached markers, sorted.
    pub fn attached_ids(&self) -> Vec<ClusterId> {
        let mut ids: Vec<ClusterId> = self.on_screen.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Return an iterator over every handle in the registry, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerHandle<E>> {
        self.markers.values().map(|entry| &entry.handle)
    }

    pub(crate) fn insert(&mut self, handle: MarkerHandle<E>, tick: u64) {
        let id = handle.id();
        self.markers.insert(id, RegistryEntry { handle, last_seen: tick });
    }

    pub(crate) fn touch(&mut self, id: ClusterId, tick: u64) {
        if let Some(entry) = self.markers.get_mut(&id) {
            entry.last_seen = tick;
        }
    }

    /// Replace the attached set. Every id in `ids` must already have a handle.
    pub(crate) fn set_on_screen(&mut self, ids: VizHashSet<ClusterId>) {
        debug_assert!(ids.iter().all(|id| self.markers.contains_key(id)));
        self.on_screen = ids;
    }

    /// Remove every detached handle that has not been seen for more than `max_age` ticks, and
    /// return the removed handles.
    pub(crate) fn evict_unseen(&mut self, tick: u64, max_age: u64) -> Vec<MarkerHandle<E>> {
        let stale: Vec<ClusterId> = self
            .markers
            .iter()
            .filter(|(id, entry)| !self.on_screen.contains(*id) && tick.saturating_sub(entry.last_seen) > max_age)
            .map(|(id, _)| *id)
            .collect();

        stale
            .into_iter()
            .filter_map(|id| self.markers.remove(&id).map(|entry| entry.handle))
            .collect()
    }

    /// Clear the attached set and return the ids that were attached, sorted.
    pub(crate) fn take_on_screen(&mut self) -> Vec<ClusterId> {
        let mut ids: Vec<ClusterId> = self.on_screen.drain().collect();
        ids.sort_unstable();
        ids
    }
}
