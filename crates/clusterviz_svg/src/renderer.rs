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
use svg::{node::element::Group, Document};

use crate::render_elements::{svg_render_circle, svg_render_label, svg_render_wedge};

/// The markup of a rendered badge, ready to be used as the content of a marker element.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedBadge {
    pub markup: String,
    /// Pixel size of the badge. Markers should be centered on their position.
    pub size: VizDimensions,
}

/// Build an SVG document for a badge. The document is sized to the badge in pixels, with wedges
/// drawn first, then the background disc, then the label.
pub fn render_badge_as_svg(badge: &DonutBadge, css_class: Option<&str>) -> Document {
    let view_box = badge.view_box();
    let mut document = Document::new()
        .set("width", badge.size.x)
        .set("height", badge.size.y)
        .set("viewBox", view_box.to_tuple())
        .set("text-anchor", "middle")
        .set("style", label_style(&badge.label));

    if let Some(class) = css_class {
        document = document.set("class", class);
    }

    let mut ring = Group::new();
    for (shape, color) in badge.iter_shapes() {
        match shape {
            VizShape::Wedge(wedge) => {
                ring = ring.add(svg_render_wedge(&wedge, color));
            }
            VizShape::Circle(circle) => {
                ring = ring.add(svg_render_circle(&circle, color));
            }
        }
    }

    document.add(ring).add(svg_render_label(&badge.label))
}

fn label_style(label: &BadgeLabel) -> String {
    format!("font: {}px {}; display: block", label.font_size, label.font_family)
}

/// A [BadgeRenderer] producing SVG markup for HTML markers.
#[derive(Clone, Debug, Default)]
pub struct SvgBadgeRenderer {
    // Optional CSS class set on the root svg element.
    css_class: Option<String>,
    // Wrap the svg element in a div, as some map engines expect a block container.
    wrap_div:  bool,
}

impl SvgBadgeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a CSS class on the root `<svg>` element of every badge.
    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Wrap each badge in a `<div>` element.
    pub fn with_div_wrapper(mut self, state: bool) -> Self {
        self.wrap_div = state;
        self
    }
}

impl BadgeRenderer for SvgBadgeRenderer {
    type Element = RenderedBadge;

    fn render(&self, badge: &DonutBadge) -> Result<RenderedBadge, ClusterVizError> {
        let document = render_badge_as_svg(badge, self.css_class.as_deref());
        let mut markup = document.to_string();
        if self.wrap_div {
            markup = format!("<div>{}</div>", markup);
        }

        log::trace!(
            "render(): badge of {} as {} bytes of svg",
            badge.total,
            markup.len()
        );

        Ok(RenderedBadge {
            markup,
            size: badge.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn badge(counts: &[u32]) -> DonutBadge {
        let scheme = CategoryScheme::earthquake_magnitude();
        synthesize(counts, &scheme.palette(), &BadgeParams::default()).unwrap()
    }

    #[test]
    fn test_render_small_badge() {
        init();
        let rendered = SvgBadgeRenderer::new().render(&badge(&[3, 0, 0, 0, 0])).unwrap();
        let markup = &rendered.markup;

        assert_eq!(rendered.size, VizDimensions::new(36, 36));
        assert!(markup.contains("<svg"));
        assert!(markup.contains("width=\"36\""));
        assert!(markup.contains("viewBox=\"0 0 36 36\""));
        assert!(markup.contains("font: 16px sans-serif; display: block"));
        assert_eq!(markup.matches("<path").count(), 1);
        assert!(markup.contains("fill=\"#fed976\""));
        // The background disc fills the hole of the ring
        assert!(markup.contains("r=\"11\""));
        assert!(markup.contains("fill=\"#ffffff\""));
        assert!(markup.contains("dominant-baseline=\"central\""));
        assert!(markup.contains("translate(18, 18)"));
    }

    #[test]
    fn test_render_one_path_per_nonzero_category() {
        init();
        let rendered = SvgBadgeRenderer::new().render(&badge(&[400, 0, 300, 200, 100])).unwrap();
        let markup = &rendered.markup;

        assert_eq!(rendered.size, VizDimensions::new(100, 100));
        assert_eq!(markup.matches("<path").count(), 4);
        assert!(!markup.contains("#feb24c"));
        assert!(markup.contains("1,000"));
        assert!(markup.contains("font: 22px"));
    }

    #[test]
    fn test_render_options() {
        init();
        let renderer = SvgBadgeRenderer::new()
            .with_css_class("quake-badge")
            .with_div_wrapper(true);
        let markup = renderer.render(&badge(&[1, 2, 3, 4, 5])).unwrap().markup;

        assert!(markup.starts_with("<div>"));
        assert!(markup.ends_with("</div>"));
        assert!(markup.contains("class=\"quake-badge\""));
    }

    #[test]
    fn test_render_empty_badge() {
        init();
        let markup = SvgBadgeRenderer::new().render(&badge(&[0; 5])).unwrap().markup;
        assert_eq!(markup.matches("<path").count(), 0);
        assert_eq!(markup.matches("<circle").count(), 1);
    }
}
