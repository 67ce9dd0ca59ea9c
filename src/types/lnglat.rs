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
use std::fmt::{self, Display, Formatter};

use crate::ClusterVizError;

/// A geographic coordinate in degrees. Longitude comes first, matching GeoJSON position order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> LngLat {
        LngLat { lng, lat }
    }

    /// Build a [LngLat] from a GeoJSON position. Extra elements (altitude) are ignored.
    pub fn from_position(position: &[f64]) -> Result<LngLat, ClusterVizError> {
        match position {
            [lng, lat, ..] if lng.is_finite() && lat.is_finite() => Ok(LngLat::new(*lng, *lat)),
            [_, _, ..] => Err(ClusterVizError::InvalidCoordinate(format!("{:?}", position))),
            _ => Err(ClusterVizError::InvalidCoordinate(format!(
                "expected at least 2 elements, got {}",
                position.len()
            ))),
        }
    }

    /// Shift the longitude by whole turns until it lies within 180 degrees of `reference_lng`.
    ///
    /// When a map is zoomed out far enough that the world repeats horizontally, a feature is drawn
    /// once per copy. Wrapping its coordinate near the pointer's longitude places a popup or marker
    /// over the copy that was actually clicked.
    pub fn wrap_near(self, reference_lng: f64) -> LngLat {
        let mut lng = self.lng;
        if !lng.is_finite() || !reference_lng.is_finite() {
            return self;
        }
        // Jump most of the way in one step, then settle with the same 360 degree shifts
        let turns = ((reference_lng - lng) / 360.0).trunc();
        lng += turns * 360.0;
        while (reference_lng - lng).abs() > 180.0 {
            lng += if reference_lng > lng { 360.0 } else { -360.0 };
        }
        LngLat { lng, lat: self.lat }
    }

    pub fn to_tuple(&self) -> (f64, f64) {
        (self.lng, self.lat)
    }
}

impl From<(f64, f64)> for LngLat {
    fn from(tuple: (f64, f64)) -> Self {
        LngLat::new(tuple.0, tuple.1)
    }
}

impl Display for LngLat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.lng, self.lat)
    }
}
