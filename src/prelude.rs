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

//! Re-exports of the types most hosts need.

pub use crate::{
    badge::{synthesize, BadgeLabel, BadgeParams, BadgeSegment, DonutBadge, SizeTier},
    category::{Category, CategoryScheme, PointStyle},
    feature::{clusters_from_features, clusters_from_geojson, ClusterFeature, ClusterId},
    markers::{
        BadgeRenderer,
        DisplayListRenderer,
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
    types::{
        color::VizColor,
        lnglat::LngLat,
        shapes::{VizArc, VizCircle, VizDimensions, VizPoint2d, VizRect, VizShape, VizWedge},
    },
    ClusterVizError,
    SourceError,
};
