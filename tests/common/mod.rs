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

    tests/common/mod.rs

    Common support routines for tests
*/
#![allow(dead_code)]

use clusterviz::{prelude::*, VizHashMap};
use geojson::{Feature, GeoJson};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    Attach { id: u64, serial: u64 },
    Detach { id: u64, serial: u64 },
}

/// A marker surface that records every attach and detach, and checks that the reconciler never
/// attaches a marker twice or detaches one that is not attached.
#[derive(Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
    /// Attached cluster ids, mapped to the serial of the attached handle
    pub attached: VizHashMap<u64, u64>,
}

impl RecordingSurface {
    /// Take the events recorded since the last call.
    pub fn drain(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn attached_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.attached.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl<E> MarkerSurface<E> for RecordingSurface {
    fn attach(&mut self, marker: &MarkerHandle<E>) {
        let id = marker.id().0;
        assert!(
            self.attached.insert(id, marker.serial()).is_none(),
            "marker {} attached twice",
            id
        );
        self.events.push(SurfaceEvent::Attach {
            id,
            serial: marker.serial(),
        });
    }

    fn detach(&mut self, marker: &MarkerHandle<E>) {
        let id = marker.id().0;
        assert_eq!(
            self.attached.remove(&id),
            Some(marker.serial()),
            "marker {} detached while not attached",
            id
        );
        self.events.push(SurfaceEvent::Detach {
            id,
            serial: marker.serial(),
        });
    }
}

/// A feature source backed by a fixed query result.
pub struct MockSource {
    pub loaded: bool,
    pub result: Result<Vec<Feature>, SourceError>,
}

impl MockSource {
    pub fn from_geojson(json: &str) -> MockSource {
        let features = match json.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(collection) => collection.features,
            other => panic!("expected a feature collection, got {:?}", other),
        };
        MockSource {
            loaded: true,
            result: Ok(features),
        }
    }
}

impl FeatureSource for MockSource {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn query_features(&self) -> Result<Vec<Feature>, SourceError> {
        self.result.clone()
    }
}

pub fn cluster(id: u64, counts: &[u32]) -> ClusterFeature {
    ClusterFeature::new(ClusterId(id), (-68.137343 + id as f64 * 0.1, 45.137451), counts.to_vec())
}

/// Build a visible list of single-category clusters with the given ids.
pub fn visible(ids: &[u64]) -> Vec<ClusterFeature> {
    ids.iter().map(|&id| cluster(id, &[id as u32 + 1, 0, 0, 0, 0])).collect()
}

pub fn earthquake_reconciler() -> Reconciler<DisplayListRenderer> {
    Reconciler::new(DisplayListRenderer, ReconcilerParams::default()).unwrap()
}
