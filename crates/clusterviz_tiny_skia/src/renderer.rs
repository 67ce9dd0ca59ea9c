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

use tiny_skia::{Paint, Pixmap, Transform};

use clusterviz::prelude::*;

use crate::render_elements::skia_render_badge;

/// A [BadgeRenderer] that rasterizes badges into a [Pixmap].
#[derive(Clone, Debug)]
pub struct SkiaBadgeRenderer {
    // Pixels per badge unit. Use 2.0 or more for high DPI displays.
    scale: f32,
    // Whether to antialias shape edges. Default is true.
    anti_alias: bool,
}

impl Default for SkiaBadgeRenderer {
    fn default() -> Self {
        Self {
            scale: 1.0,
            anti_alias: true,
        }
    }
}

impl SkiaBadgeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of device pixels per badge pixel. The pixmap for a badge of size `w` will be
    /// `ceil(w * scale)` pixels wide.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_anti_alias(mut self, state: bool) -> Self {
        self.anti_alias = state;
        self
    }
}

impl BadgeRenderer for SkiaBadgeRenderer {
    type Element = Pixmap;

    fn render(&self, badge: &DonutBadge) -> Result<Pixmap, ClusterVizError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ClusterVizError::ParameterError(format!(
                "raster scale must be positive, got {}",
                self.scale
            )));
        }

        let width = (badge.size.x as f32 * self.scale).ceil() as u32;
        let height = (badge.size.y as f32 * self.scale).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ClusterVizError::RenderError(format!("could not allocate {}x{} pixmap", width, height))
        })?;

        let mut paint = Paint {
            anti_alias: self.anti_alias,
            ..Default::default()
        };
        let transform = Transform::from_scale(self.scale, self.scale);
        skia_render_badge(&mut pixmap, &mut paint, &transform, badge);

        log::trace!("render(): badge of {} as {}x{} pixmap", badge.total, width, height);
        Ok(pixmap)
    }
}
