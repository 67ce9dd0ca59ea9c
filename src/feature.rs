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

//! Cluster features as reported by a map engine's clustered source.
//!
//! A clustered GeoJSON source reports two kinds of features: the original unclustered points,
//! and synthetic cluster points carrying `cluster: true`, a `cluster_id` that is stable for a
//! given source and zoom, and one aggregated count property per category.

use std::fmt::{self, Display, Formatter};

use geojson::{Feature, GeoJson, JsonValue};

use crate::{types::lnglat::LngLat, ClusterVizError};

pub const CLUSTER_PROPERTY: &str = "cluster";
pub const CLUSTER_ID_PROPERTY: &str = "cluster_id";
pub const POINT_COUNT_PROPERTY: &str = "point_count";

/// The stable identifier of a cluster within its source.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub u64);

impl Display for ClusterId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ClusterId {
    fn from(id: u64) -> Self {
        ClusterId(id)
    }
}

/// A visible cluster: its identity, position and per-category counts.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterFeature {
    pub id: ClusterId,
    pub position: LngLat,
    /// Count of member points per category, in category order
    pub counts: Vec<u32>,
}

impl ClusterFeature {
    pub fn new(id: ClusterId, position: impl Into<LngLat>, counts: Vec<u32>) -> ClusterFeature {
        ClusterFeature {
            id,
            position: position.into(),
            counts,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Read a cluster from a GeoJSON feature, reading one count property for each entry in
    /// `category_names`.
    ///
    /// Returns `Ok(None)` if the feature is not a cluster. A cluster that is missing its id, point
    /// geometry or any count property is malformed and produces an error.
    pub fn from_geojson<S: AsRef<str>>(
        feature: &Feature,
        category_names: &[S],
    ) -> Result<Option<ClusterFeature>, ClusterVizError> {
        let is_cluster = feature
            .property(CLUSTER_PROPERTY)
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);
        if !is_cluster {
            return Ok(None);
        }

        let id = feature
            .property(CLUSTER_ID_PROPERTY)
            .ok_or_else(|| ClusterVizError::MissingProperty(CLUSTER_ID_PROPERTY.to_string()))
            .and_then(|v| json_to_u64(v, CLUSTER_ID_PROPERTY))?;

        let position = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::Point(position)) => LngLat::from_position(position)?,
            _ => return Err(ClusterVizError::MissingGeometry),
        };

        let counts = category_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let value = feature
                    .property(name)
                    .ok_or_else(|| ClusterVizError::MissingProperty(name.to_string()))?;
                let count = json_to_u64(value, name)?;
                u32::try_from(count).map_err(|_| ClusterVizError::InvalidProperty(name.to_string()))
            })
            .collect::<Result<Vec<u32>, ClusterVizError>>()?;

        // point_count is optional, but if the engine supplied it, it should agree with the counts.
        if let Some(point_count) = feature.property(POINT_COUNT_PROPERTY).and_then(JsonValue::as_u64) {
            let total: u64 = counts.iter().map(|&c| c as u64).sum();
            if point_count != total {
                log::debug!(
                    "from_geojson(): cluster {} has point_count {} but category counts sum to {}",
                    id,
                    point_count,
                    total
                );
            }
        }

        Ok(Some(ClusterFeature {
            id: ClusterId(id),
            position,
            counts,
        }))
    }
}

/// Read every cluster out of a list of features, skipping unclustered points.
/// Fails on the first malformed cluster.
pub fn clusters_from_features<S: AsRef<str>>(
    features: &[Feature],
    category_names: &[S],
) -> Result<Vec<ClusterFeature>, ClusterVizError> {
    let mut clusters = Vec::with_capacity(features.len());
    for feature in features {
        if let Some(cluster) = ClusterFeature::from_geojson(feature, category_names)? {
            clusters.push(cluster);
        }
    }
    Ok(clusters)
}

/// Read every cluster out of a GeoJSON object. A lone geometry contains no clusters.
pub fn clusters_from_geojson<S: AsRef<str>>(
    geojson: &GeoJson,
    category_names: &[S],
) -> Result<Vec<ClusterFeature>, ClusterVizError> {
    match geojson {
        GeoJson::FeatureCollection(collection) => clusters_from_features(&collection.features, category_names),
        GeoJson::Feature(feature) => Ok(ClusterFeature::from_geojson(feature, category_names)?
            .into_iter()
            .collect()),
        GeoJson::Geometry(_) => Ok(Vec::new()),
    }
}

/// Accept non-negative integers, including integral floats such as `3.0` that some engines emit
/// for aggregated properties.
fn json_to_u64(value: &JsonValue, name: &str) -> Result<u64, ClusterVizError> {
    if let Some(v) = value.as_u64() {
        return Ok(v);
    }
    match value.as_f64() {
        Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
        _ => Err(ClusterVizError::InvalidProperty(name.to_string())),
    }
}
