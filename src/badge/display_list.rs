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

//! A [DonutBadge] is the display list for one cluster badge: a ring of [BadgeSegment] wedges, a
//! background disc filling the hole of the ring, and a centered label.
//! Backends draw the items in the order returned by [DonutBadge::iter_shapes], then the label.

use crate::{
    badge::SizeTier,
    types::{
        color::VizColor,
        shapes::{VizCircle, VizDimensions, VizPoint2d, VizRect, VizShape, VizWedge},
    },
};

/// One category's share of the ring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeSegment {
    /// Index of the category in the counts and palette sequences
    pub category: usize,
    pub count: u32,
    /// Start of the segment as a fraction of the full circle
    pub start: f64,
    /// End of the segment as a fraction of the full circle (exclusive)
    pub end: f64,
    pub color: VizColor,
    pub wedge: VizWedge,
}

impl BadgeSegment {
    /// The fraction of the full circle covered by this segment.
    #[inline]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// The text drawn in the middle of the badge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeLabel {
    pub text: String,
    /// Anchor point of the label. Text should be centered horizontally and vertically on it.
    pub position: VizPoint2d<f32>,
    pub font_size: u32,
    pub font_family: String,
    pub color: VizColor,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct DonutBadge {
    /// Sum of all category counts
    pub total: u64,
    pub tier: SizeTier,
    pub outer_radius: f32,
    pub inner_radius: f32,
    /// Pixel size of the badge. The badge is always square, with sides of twice the outer radius.
    pub size: VizDimensions,
    pub segments: Vec<BadgeSegment>,
    pub background: VizCircle,
    pub background_color: VizColor,
    pub label: BadgeLabel,
}

impl DonutBadge {
    /// The view box of the badge, from (0, 0) to (size.x, size.y).
    pub fn view_box(&self) -> VizRect<f32> {
        VizRect::from_tuple((0.0, 0.0), (self.size.x as f32, self.size.y as f32))
    }

    /// Return the number of wedges in the ring.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of the fractional spans of every segment. This is 1.0 for any badge with a non-zero
    /// total, less the full-circle epsilon when a single category holds the entire total.
    pub fn span_sum(&self) -> f64 {
        self.segments.iter().map(|s| s.span()).sum()
    }

    /// Return an iterator over every filled shape in paint order, paired with its fill color.
    pub fn iter_shapes(&self) -> impl Iterator<Item = (VizShape, VizColor)> + '_ {
        self.segments
            .iter()
            .map(|s| (VizShape::from(s.wedge), s.color))
            .chain(std::iter::once((
                VizShape::from(self.background),
                self.background_color,
            )))
    }

    /// Return the segment drawn for `category`, if that category has a non-zero count.
    pub fn segment(&self, category: usize) -> Option<&BadgeSegment> {
        self.segments.iter().find(|s| s.category == category)
    }
}
