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

use clusterviz::prelude::*;

use svg::node::{
    element::{path::Data, Circle, Path, Text},
    Value,
};

pub fn viz_color_to_value(color: VizColor) -> Value {
    if color.a == 0 {
        // Fully transparent, return 'none' to prevent rendering
        Value::from("none")
    }
    else if color.a < 255 {
        Value::from(format!(
            "rgba({}, {}, {}, {:.3})",
            color.r,
            color.g,
            color.b,
            color.a as f32 / 255.0
        ))
    }
    else {
        Value::from(format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b))
    }
}

fn svg_arc_to(data: Data, radius: f32, large_arc: bool, clockwise: bool, end: VizPoint2d<f32>) -> Data {
    let large = if large_arc { 1.0 } else { 0.0 };
    let sweep = if clockwise { 1.0 } else { 0.0 };
    data.elliptical_arc_to((radius, radius, 0.0, large, sweep, end.x, end.y))
}

/// Render a wedge as a closed path: out along the start edge, clockwise around the outer radius,
/// in along the end edge, then counter-clockwise back around the inner radius.
pub fn svg_render_wedge(wedge: &VizWedge, fill: VizColor) -> Path {
    let inner_start = wedge.inner_start();
    let outer_start = wedge.outer_start();
    let inner_end = wedge.inner_end();

    let mut data = Data::new()
        .move_to((inner_start.x, inner_start.y))
        .line_to((outer_start.x, outer_start.y));
    data = svg_arc_to(data, wedge.outer_radius, wedge.large_arc, true, wedge.outer_end());
    data = data.line_to((inner_end.x, inner_end.y));
    data = svg_arc_to(data, wedge.inner_radius, wedge.large_arc, false, inner_start);

    Path::new().set("d", data.close()).set("fill", viz_color_to_value(fill))
}

pub fn svg_render_circle(circle: &VizCircle, fill: VizColor) -> Circle {
    Circle::new()
        .set("cx", circle.center.x)
        .set("cy", circle.center.y)
        .set("r", circle.radius)
        .set("fill", viz_color_to_value(fill))
}

/// Render the badge label. Font size and family are inherited from the document style, and the
/// text is anchored in the middle by the document's `text-anchor`.
pub fn svg_render_label(label: &BadgeLabel) -> Text {
    Text::new(label.text.clone())
        .set("dominant-baseline", "central")
        .set(
            "transform",
            format!("translate({}, {})", label.position.x, label.position.y),
        )
        .set("fill", viz_color_to_value(label.color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_values() {
        assert_eq!(viz_color_to_value(VizColor::TRANSPARENT).to_string(), "none");
        assert_eq!(
            viz_color_to_value(VizColor::from_hex("#FD8D3C").unwrap()).to_string(),
            "#fd8d3c"
        );
        assert_eq!(
            viz_color_to_value(VizColor::from_rgba8(255, 0, 0, 153)).to_string(),
            "rgba(255, 0, 0, 0.600)"
        );
    }

    #[test]
    fn test_wedge_path() {
        let center = VizPoint2d::new(18.0, 18.0);
        // Right half of the ring, from 12 o'clock to 6 o'clock
        let wedge = VizWedge::from_fractions(center, 11.0, 18.0, 0.0, 0.5, -0.25);
        let path = svg_render_wedge(&wedge, VizColor::BLACK).to_string();

        assert!(path.contains("fill=\"#000000\""));
        // Two elliptical arcs, the outer one clockwise and the inner one back counter-clockwise
        assert!(path.contains("A18,18,0,0,1,"));
        assert!(path.contains("A11,11,0,0,0,"));
        assert!(path.contains('z'));
    }

    #[test]
    fn test_large_arc_flag() {
        let center = VizPoint2d::new(24.0, 24.0);
        let wedge = VizWedge::from_fractions(center, 14.0, 24.0, 0.1, 0.9, -0.25);
        let path = svg_render_wedge(&wedge, VizColor::BLACK).to_string();
        assert!(path.contains("A24,24,0,1,1,"));
        assert!(path.contains("A14,14,0,1,0,"));
    }
}
