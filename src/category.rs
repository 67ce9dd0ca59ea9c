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

//! Category schemes classify individual point features into the categories that badges count.
//!
//! A scheme names a numeric feature property and a list of half-open value ranges. When a map
//! engine clusters a source, each cluster carries one count property per category, summed over
//! the cluster's member points; [CategoryScheme::accumulate] performs the same reduction.

use std::ops::Range;

use crate::{types::color::VizColor, ClusterVizError};

/// A single category: a named half-open range `[min, max)` of property values and a display color.
/// A `None` bound is unbounded.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub name:  String,
    pub min:   Option<f64>,
    pub max:   Option<f64>,
    pub color: VizColor,
}

impl Category {
    pub fn new(name: impl Into<String>, min: Option<f64>, max: Option<f64>, color: VizColor) -> Category {
        Category {
            name: name.into(),
            min,
            max,
            color,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value < max)
    }
}

/// Rendering parameters for an unclustered point feature.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PointStyle {
    pub fill: VizColor,
    pub radius: f32,
    pub label: String,
    pub label_color: VizColor,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryScheme {
    /// The feature property that is classified, e.g. `mag`.
    pub property: String,
    pub categories: Vec<Category>,
    /// Opacity applied to unclustered point fills.
    pub point_opacity: f32,
    /// Radius of unclustered points, in pixels.
    pub point_radius: f32,
    /// Point labels are drawn in black below this value and in white at or above it, to keep
    /// them legible against the darker end of the palette.
    pub dark_label_below: f64,
}

impl CategoryScheme {
    pub fn new(property: impl Into<String>, categories: Vec<Category>) -> Result<CategoryScheme, ClusterVizError> {
        if categories.is_empty() {
            return Err(ClusterVizError::ParameterError(
                "a category scheme needs at least one category".to_string(),
            ));
        }
        Ok(CategoryScheme {
            property: property.into(),
            categories,
            point_opacity: 0.6,
            point_radius: 12.0,
            dark_label_below: 3.0,
        })
    }

    /// Build a scheme from consecutive thresholds. `n` thresholds produce `n + 1` categories:
    /// `(-inf, t0)`, `[t0, t1)`, ..., `[tn-1, +inf)`. Category names are `{prefix}1`, `{prefix}2`...
    pub fn from_thresholds(
        property: impl Into<String>,
        prefix: &str,
        thresholds: &[f64],
        palette: &[VizColor],
    ) -> Result<CategoryScheme, ClusterVizError> {
        if palette.len() != thresholds.len() + 1 {
            return Err(ClusterVizError::PaletteMismatch {
                counts:  thresholds.len() + 1,
                palette: palette.len(),
            });
        }
        if thresholds.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(ClusterVizError::ParameterError(
                "category thresholds must be strictly increasing".to_string(),
            ));
        }

        let categories = palette
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let min = i.checked_sub(1).map(|j| thresholds[j]);
                let max = thresholds.get(i).copied();
                Category::new(format!("{}{}", prefix, i + 1), min, max, color)
            })
            .collect();

        CategoryScheme::new(property, categories)
    }

    /// The earthquake magnitude scheme: `mag1` < 2, `mag2` [2, 3), `mag3` [3, 4), `mag4` [4, 5),
    /// `mag5` >= 5, on a yellow to red palette.
    pub fn earthquake_magnitude() -> CategoryScheme {
        let palette = [
            VizColor::from_rgb8(0xfe, 0xd9, 0x76),
            VizColor::from_rgb8(0xfe, 0xb2, 0x4c),
            VizColor::from_rgb8(0xfd, 0x8d, 0x3c),
            VizColor::from_rgb8(0xfc, 0x4e, 0x2a),
            VizColor::from_rgb8(0xe3, 0x1a, 0x1c),
        ];
        let bounds = [
            (None, Some(2.0)),
            (Some(2.0), Some(3.0)),
            (Some(3.0), Some(4.0)),
            (Some(4.0), Some(5.0)),
            (Some(5.0), None),
        ];
        let categories = bounds
            .into_iter()
            .zip(palette)
            .enumerate()
            .map(|(i, ((min, max), color))| Category::new(format!("mag{}", i + 1), min, max, color))
            .collect();

        CategoryScheme {
            property: "mag".to_string(),
            categories,
            point_opacity: 0.6,
            point_radius: 12.0,
            dark_label_below: 3.0,
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Return the index of the first category containing `value`, or `None` if no category does.
    pub fn classify(&self, value: f64) -> Option<usize> {
        self.categories.iter().position(|c| c.contains(value))
    }

    /// Count member values per category. Values that fall in no category are not counted.
    pub fn accumulate<I: IntoIterator<Item = f64>>(&self, values: I) -> Vec<u32> {
        let mut counts = vec![0u32; self.categories.len()];
        for value in values {
            if let Some(idx) = self.classify(value) {
                counts[idx] = counts[idx].saturating_add(1);
            }
        }
        counts
    }

    /// Merge the counts of two clusters, as a map engine does when clusters combine at a lower
    /// zoom level.
    pub fn merge_counts(&self, a: &[u32], b: &[u32]) -> Result<Vec<u32>, ClusterVizError> {
        if a.len() != self.len() || b.len() != self.len() {
            return Err(ClusterVizError::ParameterError(format!(
                "expected {} counts, got {} and {}",
                self.len(),
                a.len(),
                b.len()
            )));
        }
        Ok(a.iter().zip(b).map(|(x, y)| x.saturating_add(*y)).collect())
    }

    pub fn palette(&self) -> Vec<VizColor> {
        self.categories.iter().map(|c| c.color).collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Return the value range covered by category `idx`, with unbounded ends widened to infinity.
    pub fn range(&self, idx: usize) -> Option<Range<f64>> {
        self.categories
            .get(idx)
            .map(|c| c.min.unwrap_or(f64::NEG_INFINITY)..c.max.unwrap_or(f64::INFINITY))
    }

    /// Style an unclustered point. Values outside every category take the last category's color.
    pub fn point_style(&self, value: f64) -> PointStyle {
        let fill = self
            .classify(value)
            .or(self.categories.len().checked_sub(1))
            .and_then(|idx| self.categories.get(idx))
            .map(|c| c.color)
            .unwrap_or_default();

        PointStyle {
            fill: fill.with_opacity(self.point_opacity),
            radius: self.point_radius,
            label: format!("{:.1}", value),
            label_color: if value < self.dark_label_below {
                VizColor::BLACK
            }
            else {
                VizColor::WHITE
            },
        }
    }
}

impl Default for CategoryScheme {
    fn default() -> Self {
        CategoryScheme::earthquake_magnitude()
    }
}
