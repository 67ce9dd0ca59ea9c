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

//! # ClusterViz
//! `clusterviz` renders clustered map features as donut-chart badges and keeps a set of on-screen
//! markers in sync with the clusters a map engine reports as visible.
//!
//! The crate is split into two halves:
//!
//! - The [badge] module turns a cluster's per-category counts into a [badge::DonutBadge], a
//!   backend-neutral display list of annular wedges, a background disc and a centered label.
//!   Rendering the display list is left to a backend such as `clusterviz_svg` or
//!   `clusterviz_tiny_skia`.
//! - The [markers] module provides a [markers::Reconciler] that is driven once per render tick.
//!   It creates a marker the first time a cluster id is seen, reuses it on later ticks, and
//!   detaches markers whose clusters are no longer visible.
//!
//! The map engine itself is abstracted behind the [markers::FeatureSource] and
//! [markers::MarkerSurface] traits.

pub mod badge;
pub mod category;
pub mod feature;
pub mod markers;
pub mod prelude;
pub mod types;

use std::hash::RandomState;

use thiserror::Error;

#[allow(unused)]
pub type VizHashMap<K, V, S = RandomState> = std::collections::HashMap<K, V, S>;
#[allow(unused)]
pub type VizHashSet<T, S = RandomState> = std::collections::HashSet<T, S>;

/// Errors that can occur while parsing cluster features, synthesizing badges or rendering
/// markers.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClusterVizError {
    #[error("Feature is missing required property '{0}'")]
    MissingProperty(String),
    #[error("Feature property '{0}' has an invalid value")]
    InvalidProperty(String),
    #[error("Feature does not have a point geometry")]
    MissingGeometry,
    #[error("Feature coordinate is invalid: {0}")]
    InvalidCoordinate(String),
    #[error("Got {counts} category counts but {palette} palette colors")]
    PaletteMismatch { counts: usize, palette: usize },
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid parameters were specified to a library function: {0}")]
    ParameterError(String),
    #[error("Failed to render marker element: {0}")]
    RenderError(String),
}

/// Errors reported by a [markers::FeatureSource]. These are transient; the reconciler skips the
/// tick and tries again on the next render event.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SourceError {
    #[error("The feature source has not finished loading")]
    NotLoaded,
    #[error("The feature source query failed: {0}")]
    QueryFailed(String),
}

pub use crate::{
    badge::{synthesize, BadgeParams, DonutBadge, SizeTier},
    category::{Category, CategoryScheme, PointStyle},
    feature::{ClusterFeature, ClusterId},
    markers::{
        BadgeRenderer,
        EvictionPolicy,
        FeatureSource,
        MarkerHandle,
        MarkerRegistry,
        MarkerSurface,
        ReconcileStats,
        Reconciler,
        ReconcilerParams,
        SharedReconciler,
        TickOutcome,
    },
    types::{color::VizColor, lnglat::LngLat},
};
