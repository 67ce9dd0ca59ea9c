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
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::ClusterVizError;

/// A [VizColor] represents a color in 32-bit RGBA format.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VizColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for VizColor {
    fn default() -> VizColor {
        VizColor::TRANSPARENT
    }
}

#[rustfmt::skip]
impl VizColor {
    pub const TRANSPARENT: VizColor = VizColor { r: 0, g: 0, b: 0, a: 0 };
    pub const WHITE: VizColor = VizColor { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: VizColor = VizColor { r: 0, g: 0, b: 0, a: 255 };

    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> VizColor {
        VizColor { r, g, b, a }
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> VizColor {
        VizColor { r, g, b, a: 255 }
    }

    /// Return a copy of this color with the alpha channel set from a fractional opacity.
    pub fn with_opacity(self, opacity: f32) -> VizColor {
        VizColor {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Parse a CSS hex color in `#rgb`, `#rrggbb` or `#rrggbbaa` form, or one of the keywords
    /// `white`, `black` and `transparent`.
    pub fn from_hex(text: &str) -> Result<VizColor, ClusterVizError> {
        let invalid = || ClusterVizError::InvalidColor(text.to_string());
        let trimmed = text.trim();

        match trimmed.to_ascii_lowercase().as_str() {
            "white" => return Ok(VizColor::WHITE),
            "black" => return Ok(VizColor::BLACK),
            "transparent" => return Ok(VizColor::TRANSPARENT),
            _ => {}
        }

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                // Each nibble is doubled: #abc == #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(VizColor::from_rgb8(r * 17, g * 17, b * 17))
            }
            6 => Ok(VizColor::from_rgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Ok(VizColor::from_rgba8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Parse a list of CSS hex colors into a palette.
    pub fn palette_from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Vec<VizColor>, ClusterVizError> {
        colors.iter().map(|c| VizColor::from_hex(c.as_ref())).collect()
    }
}

impl FromStr for VizColor {
    type Err = ClusterVizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VizColor::from_hex(s)
    }
}

/// Colors display as lowercase CSS hex, with an alpha byte only if the color is not opaque.
impl Display for VizColor {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
        else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}
