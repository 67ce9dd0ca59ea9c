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

use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

use clusterviz::prelude::*;

pub fn vizcolor_to_color(color: VizColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

#[inline]
fn skia_render_arc(path: &mut PathBuilder, arc: &VizArc) {
    path.cubic_to(arc.cp1.x, arc.cp1.y, arc.cp2.x, arc.cp2.y, arc.end.x, arc.end.y);
}

pub fn skia_render_wedge(path: &mut PathBuilder, wedge: &VizWedge) {
    let inner_start = wedge.inner_start();
    let outer_start = wedge.outer_start();
    let inner_end = wedge.inner_end();

    path.move_to(inner_start.x, inner_start.y);
    path.line_to(outer_start.x, outer_start.y);
    for arc in wedge.outer_arcs() {
        skia_render_arc(path, &arc);
    }
    path.line_to(inner_end.x, inner_end.y);
    for arc in wedge.inner_arcs() {
        skia_render_arc(path, &arc);
    }
    path.close();
}

/// Build a path for a single badge shape. Returns `None` for degenerate shapes.
pub fn skia_render_shape(shape: &VizShape) -> Option<Path> {
    match shape {
        VizShape::Wedge(wedge) => {
            let mut path = PathBuilder::new();
            skia_render_wedge(&mut path, wedge);
            path.finish()
        }
        VizShape::Circle(circle) => PathBuilder::from_circle(circle.center.x, circle.center.y, circle.radius),
    }
}

/// Fill every shape of the badge into `pixmap`, in paint order.
pub fn skia_render_badge(pixmap: &mut Pixmap, paint: &mut Paint, transform: &Transform, badge: &DonutBadge) {
    for (shape, color) in badge.iter_shapes() {
        if color.a == 0 {
            continue;
        }
        paint.set_color(vizcolor_to_color(color));

        if let Some(path) = skia_render_shape(&shape) {
            if !path.is_empty() {
                pixmap.fill_path(&path, paint, FillRule::Winding, *transform, None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wedge_bounds() {
        let center = VizPoint2d::new(24.0, 24.0);
        // The top right quarter of the ring
        let wedge = VizWedge::from_fractions(center, 14.0, 24.0, 0.0, 0.25, -0.25);
        let path = skia_render_shape(&VizShape::Wedge(wedge)).unwrap();
        let bounds = path.bounds();

        assert!((bounds.left() - 24.0).abs() < 0.01);
        assert!(bounds.top().abs() < 0.01);
        assert!((bounds.right() - 48.0).abs() < 0.01);
        assert!((bounds.bottom() - 24.0).abs() < 0.01);
    }

    #[test]
    fn test_hairline_wedge_keeps_finite_path() {
        let scheme = CategoryScheme::earthquake_magnitude();
        let counts = [1, u32::MAX, u32::MAX, u32::MAX, u32::MAX];
        let badge = synthesize(&counts, &scheme.palette(), &BadgeParams::default()).unwrap();

        let first = &badge.segments[0];
        assert_eq!(first.wedge.start_angle as f32, first.wedge.end_angle as f32);
        for segment in &badge.segments {
            let path = skia_render_shape(&VizShape::Wedge(segment.wedge));
            assert!(path.is_some(), "segment {} has no path", segment.category);
        }
    }
}
