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

//! # Marker reconciliation
//! A map engine redraws many times per second. On each render tick the [Reconciler] reads the
//! clusters currently visible in a [FeatureSource] and brings the markers on a [MarkerSurface]
//! in line with them:
//!
//! - A cluster id seen for the first time gets a badge synthesized, rendered by a
//!   [BadgeRenderer] and wrapped in a [MarkerHandle].
//! - A cluster id that is visible but not attached has its handle attached.
//! - An attached id that is no longer visible has its handle detached. The handle is kept and
//!   reattached if the id becomes visible again.
//!
//! Per cluster id the lifecycle is `Unknown -> Created -> Attached <-> Detached`. Handles only
//! return to `Unknown` if an [EvictionPolicy] other than `Never` is configured.

pub mod handle;
pub mod reconciler;
pub mod registry;

use geojson::Feature;

use crate::{badge::DonutBadge, ClusterVizError, SourceError};

pub use handle::MarkerHandle;
pub use reconciler::{EvictionPolicy, ReconcileStats, Reconciler, ReconcilerParams, SharedReconciler, TickOutcome};
pub use registry::MarkerRegistry;

/// A clustered data source owned by a map engine.
pub trait FeatureSource {
    /// Return whether the source has finished loading. Reconciliation is skipped until it has.
    fn is_loaded(&self) -> bool;

    /// Return every feature of the source within the current viewport, clustered and unclustered.
    fn query_features(&self) -> Result<Vec<Feature>, SourceError>;
}

/// The display surface markers are placed on.
pub trait MarkerSurface<E> {
    /// Place `marker` on the surface at its position.
    fn attach(&mut self, marker: &MarkerHandle<E>);

    /// Remove `marker` from the surface. The marker may be attached again later.
    fn detach(&mut self, marker: &MarkerHandle<E>);
}

/// Converts a badge display list into an element that a [MarkerSurface] can display.
pub trait BadgeRenderer {
    type Element;

    fn render(&self, badge: &DonutBadge) -> Result<Self::Element, ClusterVizError>;
}

/// A [BadgeRenderer] that keeps the display list itself as the marker element. Useful for hosts
/// that draw badges with their own primitives.
#[derive(Copy, Clone, Debug, Default)]
pub struct DisplayListRenderer;

impl BadgeRenderer for DisplayListRenderer {
    type Element = DonutBadge;

    fn render(&self, badge: &DonutBadge) -> Result<DonutBadge, ClusterVizError> {
        Ok(badge.clone())
    }
}
