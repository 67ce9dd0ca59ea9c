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

//! # Badge synthesis
//! A badge is a ring chart summarizing the category breakdown of a cluster, with the cluster's
//! total count printed in the middle.
//!
//! The ring is drawn on a circle whose fraction 0.0 sits at the 12 o'clock position. Each category
//! with a non-zero count receives one wedge spanning `[offset / total, (offset + count) / total)`
//! of the circle, where `offset` is the sum of the counts of all preceding categories. Wedges
//! proceed clockwise in category order.
//!
//! Badge size is chosen from four [SizeTier]s by total count.

pub mod display_list;
pub mod label;

use strum::EnumIter;

use crate::{
    badge::label::format_count,
    types::{
        color::VizColor,
        shapes::{VizCircle, VizDimensions, VizPoint2d, VizWedge},
    },
    ClusterVizError,
};

pub use display_list::{BadgeLabel, BadgeSegment, DonutBadge};

/// Amount subtracted from the end of a segment that covers the full circle. An arc whose start
/// and end points coincide would not be drawn at all.
pub const FULL_CIRCLE_EPSILON: f64 = 0.00001;

pub const DEFAULT_INNER_RADIUS_RATIO: f32 = 0.6;

/// Rotation of fraction 0.0, in turns. -0.25 is the 12 o'clock position.
pub const DEFAULT_START_TURN: f64 = -0.25;

/// Badge size tiers. Each tier has a fixed outer radius and label font size.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum SizeTier {
    /// total < 10
    Small,
    /// 10 <= total < 100
    Medium,
    /// 100 <= total < 1000
    Large,
    /// total >= 1000
    Huge,
}

impl SizeTier {
    pub fn for_total(total: u64) -> SizeTier {
        match total {
            0..10 => SizeTier::Small,
            10..100 => SizeTier::Medium,
            100..1000 => SizeTier::Large,
            _ => SizeTier::Huge,
        }
    }

    /// Outer radius of the ring in pixels
    pub fn radius(&self) -> u32 {
        match self {
            SizeTier::Small => 18,
            SizeTier::Medium => 24,
            SizeTier::Large => 32,
            SizeTier::Huge => 50,
        }
    }

    /// Label font size in pixels
    pub fn font_size(&self) -> u32 {
        match self {
            SizeTier::Small => 16,
            SizeTier::Medium => 18,
            SizeTier::Large => 20,
            SizeTier::Huge => 22,
        }
    }
}

/// Parameter struct for badge synthesis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeParams {
    /// Inner radius as a fraction of the outer radius. The resulting radius is rounded to the
    /// nearest whole pixel. Must be in the range (0.0, 1.0).
    pub inner_radius_ratio: f32,
    /// Fill color of the disc inside the ring, behind the label.
    pub background_color: VizColor,
    /// Color of the label text.
    pub label_color: VizColor,
    /// CSS font family used for the label.
    pub font_family: String,
    /// Amount to shorten a segment that would otherwise cover the entire circle.
    pub full_circle_epsilon: f64,
    /// Rotation of fraction 0.0, in turns.
    pub start_turn: f64,
    /// Thousands separator for the label. If None, the total is printed without grouping.
    pub group_separator: Option<char>,
}

impl Default for BadgeParams {
    fn default() -> Self {
        Self {
            inner_radius_ratio: DEFAULT_INNER_RADIUS_RATIO,
            background_color: VizColor::WHITE,
            label_color: VizColor::BLACK,
            font_family: "sans-serif".to_string(),
            full_circle_epsilon: FULL_CIRCLE_EPSILON,
            start_turn: DEFAULT_START_TURN,
            group_separator: Some(','),
        }
    }
}

impl BadgeParams {
    pub fn with_inner_radius_ratio(mut self, ratio: f32) -> Self {
        self.inner_radius_ratio = ratio;
        self
    }

    pub fn with_background_color(mut self, color: VizColor) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_label_color(mut self, color: VizColor) -> Self {
        self.label_color = color;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the thousands separator used in the label. `None` disables grouping.
    pub fn with_group_separator(mut self, separator: Option<char>) -> Self {
        self.group_separator = separator;
        self
    }

    /// Set the angle of fraction 0.0, in turns. The default of -0.25 is 12 o'clock.
    pub fn with_start_turn(mut self, turn: f64) -> Self {
        self.start_turn = turn;
        self
    }

    pub fn validate(&self) -> Result<(), ClusterVizError> {
        if !(self.inner_radius_ratio > 0.0 && self.inner_radius_ratio < 1.0) {
            return Err(ClusterVizError::ParameterError(format!(
                "inner_radius_ratio must be in (0.0, 1.0), got {}",
                self.inner_radius_ratio
            )));
        }
        if !(0.0..0.5).contains(&self.full_circle_epsilon) {
            return Err(ClusterVizError::ParameterError(format!(
                "full_circle_epsilon must be in [0.0, 0.5), got {}",
                self.full_circle_epsilon
            )));
        }
        if !self.start_turn.is_finite() {
            return Err(ClusterVizError::ParameterError("start_turn must be finite".to_string()));
        }
        Ok(())
    }
}

/// Synthesize a donut badge from per-category `counts`, coloring category `i` with `palette[i]`.
///
/// A total of zero produces a badge of the smallest tier with no wedges and a "0" label.
pub fn synthesize(counts: &[u32], palette: &[VizColor], params: &BadgeParams) -> Result<DonutBadge, ClusterVizError> {
    if counts.len() != palette.len() {
        return Err(ClusterVizError::PaletteMismatch {
            counts:  counts.len(),
            palette: palette.len(),
        });
    }
    params.validate()?;

    let total: u64 = counts.iter().map(|&c| c as u64).sum();
    let tier = SizeTier::for_total(total);
    let radius = tier.radius();
    let outer_radius = radius as f32;
    let inner_radius = (outer_radius * params.inner_radius_ratio).round();
    let center = VizPoint2d::new(outer_radius, outer_radius);

    let mut segments = Vec::with_capacity(counts.len());
    if total > 0 {
        let mut offset: u64 = 0;
        for (category, (&count, &color)) in counts.iter().zip(palette.iter()).enumerate() {
            if count > 0 {
                let start = offset as f64 / total as f64;
                let mut end = (offset + count as u64) as f64 / total as f64;
                if end - start >= 1.0 {
                    end -= params.full_circle_epsilon;
                }

                segments.push(BadgeSegment {
                    category,
                    count,
                    start,
                    end,
                    color,
                    wedge: VizWedge::from_fractions(center, inner_radius, outer_radius, start, end, params.start_turn),
                });
            }
            offset += count as u64;
        }
    }

    log::trace!(
        "synthesize(): total: {} tier: {:?} radius: {}/{} segments: {}",
        total,
        tier,
        outer_radius,
        inner_radius,
        segments.len()
    );

    Ok(DonutBadge {
        total,
        tier,
        outer_radius,
        inner_radius,
        size: VizDimensions::new(radius * 2, radius * 2),
        segments,
        background: VizCircle::new(center, inner_radius),
        background_color: params.background_color,
        label: BadgeLabel {
            text: format_count(total, params.group_separator),
            position: center,
            font_size: tier.font_size(),
            font_family: params.font_family.clone(),
            color: params.label_color,
        },
    })
}
