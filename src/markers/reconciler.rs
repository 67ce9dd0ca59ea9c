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
use std::sync::{Arc, Mutex};

use web_time::Instant;

use crate::{
    badge::{synthesize, BadgeParams},
    category::CategoryScheme,
    feature::{clusters_from_features, ClusterFeature, ClusterId},
    markers::{handle::MarkerHandle, registry::MarkerRegistry, BadgeRenderer, FeatureSource, MarkerSurface},
    types::color::VizColor,
    ClusterVizError,
    VizHashMap,
    VizHashSet,
    SourceError,
};

/// A reconciler behind a mutex, for hosts that may deliver render ticks from more than one
/// thread. Hold the lock for the whole of each [Reconciler::on_render] or [Reconciler::reconcile]
/// call.
pub type SharedReconciler<R> = Arc<Mutex<Reconciler<R>>>;

/// Controls when detached marker handles are dropped from the registry.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Keep every handle for the lifetime of the reconciler. Memory grows with the number of
    /// distinct clusters ever seen, which is fine for a short-lived page.
    #[default]
    Never,
    /// Drop a detached handle once its cluster has gone unseen for more than this many
    /// reconciliation passes.
    UnseenFor(u64),
}

/// Parameter struct for a [Reconciler].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ReconcilerParams {
    pub badge: BadgeParams,
    /// Badge color for each category, parallel to `category_names`.
    pub palette: Vec<VizColor>,
    /// Names of the per-category count properties on cluster features.
    pub category_names: Vec<String>,
    pub eviction: EvictionPolicy,
}

impl ReconcilerParams {
    pub fn from_scheme(scheme: &CategoryScheme) -> Self {
        Self {
            badge: BadgeParams::default(),
            palette: scheme.palette(),
            category_names: scheme.names(),
            eviction: EvictionPolicy::default(),
        }
    }

    pub fn with_badge_params(mut self, badge: BadgeParams) -> Self {
        self.badge = badge;
        self
    }

    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    pub fn validate(&self) -> Result<(), ClusterVizError> {
        if self.palette.len() != self.category_names.len() {
            return Err(ClusterVizError::PaletteMismatch {
                counts:  self.category_names.len(),
                palette: self.palette.len(),
            });
        }
        self.badge.validate()
    }
}

impl Default for ReconcilerParams {
    fn default() -> Self {
        ReconcilerParams::from_scheme(&CategoryScheme::earthquake_magnitude())
    }
}

/// What happened during one reconciliation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Number of distinct visible cluster ids
    pub visible: usize,
    /// Handles created this pass
    pub created: usize,
    /// Visible ids that already had a handle
    pub reused: usize,
    /// Handles attached to the surface this pass
    pub attached: usize,
    /// Handles detached from the surface this pass
    pub detached: usize,
    /// Handles dropped by the eviction policy this pass
    pub evicted: usize,
}

/// The result of handling one render tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The source was not ready or could not be queried. Nothing was changed; try again on the
    /// next tick.
    Skipped(SourceError),
    Reconciled(ReconcileStats),
}

pub struct Reconciler<R: BadgeRenderer> {
    renderer: R,
    params: ReconcilerParams,
    registry: MarkerRegistry<R::Element>,
    tick: u64,
    next_serial: u64,
}

impl<R: BadgeRenderer> Reconciler<R> {
    pub fn new(renderer: R, params: ReconcilerParams) -> Result<Self, ClusterVizError> {
        params.validate()?;
        Ok(Self {
            renderer,
            params,
            registry: MarkerRegistry::new(),
            tick: 0,
            next_serial: 0,
        })
    }

    pub fn params(&self) -> &ReconcilerParams {
        &self.params
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn registry(&self) -> &MarkerRegistry<R::Element> {
        &self.registry
    }

    /// Return the number of reconciliation passes completed.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn into_shared(self) -> SharedReconciler<R> {
        Arc::new(Mutex::new(self))
    }

    /// Handle a render event: query `source` for visible clusters and reconcile `surface` with
    /// them. The tick is skipped without any change if the source is not loaded or its query
    /// fails. A malformed cluster feature is an error and also leaves everything unchanged.
    pub fn on_render<F, S>(&mut self, source: &F, surface: &mut S) -> Result<TickOutcome, ClusterVizError>
    where
        F: FeatureSource + ?Sized,
        S: MarkerSurface<R::Element> + ?Sized,
    {
        if !source.is_loaded() {
            log::trace!("on_render(): source not loaded, skipping tick");
            return Ok(TickOutcome::Skipped(SourceError::NotLoaded));
        }

        let features = match source.query_features() {
            Ok(features) => features,
            Err(e) => {
                log::warn!("on_render(): feature query failed, skipping tick: {}", e);
                return Ok(TickOutcome::Skipped(e));
            }
        };

        let clusters = clusters_from_features(&features, &self.params.category_names)?;
        log::trace!(
            "on_render(): {} features, {} clusters",
            features.len(),
            clusters.len()
        );

        self.reconcile(&clusters, surface).map(TickOutcome::Reconciled)
    }

    /// Bring `surface` in line with `visible`, so that exactly the visible cluster ids have an
    /// attached marker. If an id appears more than once, the last feature with that id is used.
    ///
    /// All badges needed for this pass are built before anything is mutated, so an error leaves
    /// the registry and surface as they were.
    pub fn reconcile<S>(
        &mut self,
        visible: &[ClusterFeature],
        surface: &mut S,
    ) -> Result<ReconcileStats, ClusterVizError>
    where
        S: MarkerSurface<R::Element> + ?Sized,
    {
        let timer = Instant::now();
        let mut stats = ReconcileStats::default();

        // Latest feature per id, and ids in order of first appearance
        let mut latest: VizHashMap<ClusterId, &ClusterFeature> = VizHashMap::with_capacity(visible.len());
        let mut order: Vec<ClusterId> = Vec::with_capacity(visible.len());
        for feature in visible {
            if latest.insert(feature.id, feature).is_none() {
                order.push(feature.id);
            }
        }
        stats.visible = order.len();

        for id in &order {
            self.check_feature(latest[id])?;
        }

        let mut created = Vec::new();
        for &id in &order {
            if self.registry.contains(id) {
                continue;
            }
            let feature = latest[&id];
            let badge = synthesize(&feature.counts, &self.params.palette, &self.params.badge)?;
            let element = self.renderer.render(&badge)?;
            let serial = self.next_serial + created.len() as u64;
            created.push(MarkerHandle::new(id, serial, feature.position, badge.size, element));
        }

        // Nothing below can fail.
        self.tick += 1;
        let tick = self.tick;
        self.next_serial += created.len() as u64;
        stats.created = created.len();
        stats.reused = stats.visible - stats.created;
        for handle in created {
            log::trace!("reconcile(): created marker {} (serial {})", handle.id(), handle.serial());
            self.registry.insert(handle, tick);
        }

        for &id in &order {
            self.registry.touch(id, tick);
            if !self.registry.is_attached(id) {
                if let Some(handle) = self.registry.get(id) {
                    log::trace!("reconcile(): attaching marker {}", id);
                    surface.attach(handle);
                    stats.attached += 1;
                }
            }
        }

        for id in self.registry.attached_ids() {
            if latest.contains_key(&id) {
                continue;
            }
            if let Some(handle) = self.registry.get(id) {
                log::trace!("reconcile(): detaching marker {}", id);
                surface.detach(handle);
                stats.detached += 1;
            }
        }

        self.registry
            .set_on_screen(order.iter().copied().collect::<VizHashSet<ClusterId>>());

        if let EvictionPolicy::UnseenFor(max_age) = self.params.eviction {
            stats.evicted = self.registry.evict_unseen(tick, max_age).len();
        }

        log::debug!(
            "reconcile(): tick {} visible: {} created: {} attached: {} detached: {} evicted: {} in {:.3}ms",
            tick,
            stats.visible,
            stats.created,
            stats.attached,
            stats.detached,
            stats.evicted,
            timer.elapsed().as_secs_f64() * 1000.0
        );

        Ok(stats)
    }

    /// Detach every attached marker, e.g. when the map is torn down. Handles are kept.
    /// Returns the number of markers detached.
    pub fn detach_all<S>(&mut self, surface: &mut S) -> usize
    where
        S: MarkerSurface<R::Element> + ?Sized,
    {
        let ids = self.registry.take_on_screen();
        for &id in &ids {
            if let Some(handle) = self.registry.get(id) {
                surface.detach(handle);
            }
        }
        log::debug!("detach_all(): detached {} markers", ids.len());
        ids.len()
    }

    fn check_feature(&self, feature: &ClusterFeature) -> Result<(), ClusterVizError> {
        if !feature.position.lng.is_finite() || !feature.position.lat.is_finite() {
            return Err(ClusterVizError::InvalidCoordinate(format!(
                "cluster {} at {}",
                feature.id, feature.position
            )));
        }
        if feature.counts.len() != self.params.palette.len() {
            return Err(ClusterVizError::PaletteMismatch {
                counts:  feature.counts.len(),
                palette: self.params.palette.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{badge::DonutBadge, markers::DisplayListRenderer, types::lnglat::LngLat};
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingSurface {
        attached: VizHashSet<ClusterId>,
        attach_calls: usize,
        detach_calls: usize,
    }

    impl<E> MarkerSurface<E> for CountingSurface {
        fn attach(&mut self, marker: &MarkerHandle<E>) {
            assert!(self.attached.insert(marker.id()), "double attach of {}", marker.id());
            self.attach_calls += 1;
        }

        fn detach(&mut self, marker: &MarkerHandle<E>) {
            assert!(self.attached.remove(&marker.id()), "detach of unattached {}", marker.id());
            self.detach_calls += 1;
        }
    }

    /// Fails on the nth render call.
    struct FailingRenderer {
        calls: Cell<usize>,
        fail_on: usize,
    }

    impl BadgeRenderer for FailingRenderer {
        type Element = u64;

        fn render(&self, badge: &DonutBadge) -> Result<u64, ClusterVizError> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if n == self.fail_on {
                return Err(ClusterVizError::RenderError("out of canvas".to_string()));
            }
            Ok(badge.total)
        }
    }

    fn cluster(id: u64, counts: [u32; 5]) -> ClusterFeature {
        ClusterFeature::new(ClusterId(id), (-68.0 + id as f64, 45.0), counts.to_vec())
    }

    fn reconciler() -> Reconciler<DisplayListRenderer> {
        Reconciler::new(DisplayListRenderer, ReconcilerParams::default()).unwrap()
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let mut r = reconciler();
        let mut surface = CountingSurface::default();

        let stats = r
            .reconcile(&[cluster(1, [1, 0, 0, 0, 0]), cluster(1, [0, 0, 50, 0, 0])], &mut surface)
            .unwrap();
        assert_eq!(stats.visible, 1);
        assert_eq!(stats.created, 1);
        assert_eq!(surface.attach_calls, 1);

        let handle = r.registry().get(ClusterId(1)).unwrap();
        assert_eq!(handle.element().total, 50);
        assert_eq!(handle.position(), LngLat::new(-67.0, 45.0));
    }

    #[test]
    fn test_render_failure_is_atomic() {
        let renderer = FailingRenderer {
            calls: Cell::new(0),
            fail_on: 1,
        };
        let mut r = Reconciler::new(renderer, ReconcilerParams::default()).unwrap();
        let mut surface = CountingSurface::default();

        let result = r.reconcile(&[cluster(1, [1, 0, 0, 0, 0]), cluster(2, [2, 0, 0, 0, 0])], &mut surface);
        assert!(matches!(result, Err(ClusterVizError::RenderError(_))));
        assert!(r.registry().is_empty());
        assert_eq!(r.tick(), 0);
        assert_eq!(surface.attach_calls, 0);
    }

    #[test]
    fn test_malformed_feature_is_atomic() {
        let mut r = reconciler();
        let mut surface = CountingSurface::default();
        r.reconcile(&[cluster(1, [1, 0, 0, 0, 0])], &mut surface).unwrap();

        let bad = ClusterFeature::new(ClusterId(2), (f64::NAN, 0.0), vec![1, 0, 0, 0, 0]);
        let result = r.reconcile(&[bad], &mut surface);
        assert!(matches!(result, Err(ClusterVizError::InvalidCoordinate(_))));

        let short = ClusterFeature::new(ClusterId(3), (0.0, 0.0), vec![1, 2]);
        let result = r.reconcile(&[cluster(4, [1, 0, 0, 0, 0]), short], &mut surface);
        assert_eq!(result, Err(ClusterVizError::PaletteMismatch { counts: 2, palette: 5 }));

        // Marker 1 is still the only attached marker
        assert_eq!(r.registry().attached_ids(), vec![ClusterId(1)]);
        assert_eq!(r.registry().len(), 1);
        assert_eq!(surface.detach_calls, 0);
    }

    #[test]
    fn test_first_malformed_feature_is_reported() {
        let features: Vec<ClusterFeature> = (0..8u64)
            .rev()
            .map(|id| ClusterFeature::new(ClusterId(id), (f64::NAN, 45.0), vec![1, 0, 0, 0, 0]))
            .collect();

        for _ in 0..20 {
            let mut r = reconciler();
            let mut surface = CountingSurface::default();
            match r.reconcile(&features, &mut surface) {
                Err(ClusterVizError::InvalidCoordinate(msg)) => assert!(msg.starts_with("cluster 7 "), "{}", msg),
                other => panic!("unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn test_eviction() {
        let params = ReconcilerParams::default().with_eviction(EvictionPolicy::UnseenFor(2));
        let mut r = Reconciler::new(DisplayListRenderer, params).unwrap();
        let mut surface = CountingSurface::default();

        r.reconcile(&[cluster(1, [1, 0, 0, 0, 0])], &mut surface).unwrap(); // tick 1
        let first_serial = r.registry().get(ClusterId(1)).unwrap().serial();

        r.reconcile(&[], &mut surface).unwrap(); // tick 2, age 1
        r.reconcile(&[], &mut surface).unwrap(); // tick 3, age 2
        assert!(r.registry().contains(ClusterId(1)));

        let stats = r.reconcile(&[], &mut surface).unwrap(); // tick 4, age 3
        assert_eq!(stats.evicted, 1);
        assert!(!r.registry().contains(ClusterId(1)));

        // Reappearing after eviction builds a new handle
        let stats = r.reconcile(&[cluster(1, [1, 0, 0, 0, 0])], &mut surface).unwrap();
        assert_eq!(stats.created, 1);
        assert_ne!(r.registry().get(ClusterId(1)).unwrap().serial(), first_serial);
    }

    #[test]
    fn test_attached_markers_are_never_evicted() {
        let params = ReconcilerParams::default().with_eviction(EvictionPolicy::UnseenFor(0));
        let mut r = Reconciler::new(DisplayListRenderer, params).unwrap();
        let mut surface = CountingSurface::default();

        for _ in 0..5 {
            let stats = r.reconcile(&[cluster(9, [0, 1, 0, 0, 0])], &mut surface).unwrap();
            assert_eq!(stats.evicted, 0);
        }
        assert_eq!(r.registry().len(), 1);
    }

    #[test]
    fn test_detach_all() {
        let mut r = reconciler();
        let mut surface = CountingSurface::default();
        r.reconcile(&[cluster(1, [1, 0, 0, 0, 0]), cluster(2, [1, 0, 0, 0, 0])], &mut surface)
            .unwrap();

        assert_eq!(r.detach_all(&mut surface), 2);
        assert!(surface.attached.is_empty());
        assert_eq!(r.registry().attached_len(), 0);
        assert_eq!(r.registry().len(), 2);

        // Both come back without being rebuilt
        let stats = r
            .reconcile(&[cluster(1, [1, 0, 0, 0, 0]), cluster(2, [1, 0, 0, 0, 0])], &mut surface)
            .unwrap();
        assert_eq!(stats.created, 0);
        assert_eq!(stats.attached, 2);
    }

    #[test]
    fn test_params_validation() {
        let mut params = ReconcilerParams::default();
        params.palette.pop();
        assert!(matches!(
            Reconciler::new(DisplayListRenderer, params),
            Err(ClusterVizError::PaletteMismatch { counts: 5, palette: 4 })
        ));
    }
}
