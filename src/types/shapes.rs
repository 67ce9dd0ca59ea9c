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

//! Geometry primitives used by badge display lists.
//!
//! Badge coordinates are in pixels with the origin at the top-left corner of the badge and the
//! y-axis pointing down, so increasing angles turn clockwise on screen.
//!
//! Circular arcs are kept in their exact form (center, radii and angles) so that vector backends
//! can emit true elliptical arc commands. Backends that can only draw Bézier curves may request a
//! cubic approximation with [VizWedge::outer_arcs] and [VizWedge::inner_arcs].
//!
//! The cubic approximation uses the constant derived at:
//! https://spencermortensen.com/articles/bezier-circle/

use std::{
    f64::consts::{FRAC_PI_2, TAU},
    fmt::{self, Display, Formatter},
};

use num_traits::Num;

/// A [VizDimensions] represents the width and height of a rectangular region, such as a pixmap.
pub type VizDimensions = VizPoint2d<u32>;

/// A [VizPoint2d] represents a point in 2D space.
/// It is generic across numeric types, using `num_traits`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VizPoint2d<T> {
    pub x: T,
    pub y: T,
}

impl<T: Num + Copy + Default + Display> Display for VizPoint2d<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T: Num + Copy + Default> Default for VizPoint2d<T> {
    fn default() -> Self {
        VizPoint2d {
            x: T::default(),
            y: T::default(),
        }
    }
}

impl<T: Num + Copy + Default> From<(T, T)> for VizPoint2d<T> {
    fn from(tuple: (T, T)) -> Self {
        VizPoint2d { x: tuple.0, y: tuple.1 }
    }
}

impl<T: Num + Copy + Default> VizPoint2d<T> {
    pub fn new(x: T, y: T) -> Self {
        VizPoint2d { x, y }
    }
}

impl VizPoint2d<f32> {
    /// Return the point at `radius` from `self` in the direction of `angle` (radians).
    #[inline]
    pub fn polar_offset(&self, radius: f32, angle: f64) -> VizPoint2d<f32> {
        let (sin, cos) = angle.sin_cos();
        VizPoint2d {
            x: (self.x as f64 + radius as f64 * cos) as f32,
            y: (self.y as f64 + radius as f64 * sin) as f32,
        }
    }

    pub fn distance(&self, other: &VizPoint2d<f32>) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A [VizRect] represents a rectangle in 2D space, defined by its top-left and bottom-right
/// corners.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Default, Debug, PartialEq)]
pub struct VizRect<T: Num + Copy + PartialOrd + Default> {
    pub top_left: VizPoint2d<T>,
    pub bottom_right: VizPoint2d<T>,
}

impl<T: Num + Copy + PartialOrd + Default> VizRect<T> {
    pub fn from_tuple(top_left: (T, T), bottom_right: (T, T)) -> VizRect<T> {
        VizRect {
            top_left: VizPoint2d::from(top_left),
            bottom_right: VizPoint2d::from(bottom_right),
        }
    }

    pub fn to_tuple(&self) -> (T, T, T, T) {
        (
            self.top_left.x,
            self.top_left.y,
            self.bottom_right.x,
            self.bottom_right.y,
        )
    }
}

/// A [VizArc] represents a cubic Bezier curve in 2D space.
#[derive(Copy, Clone, Debug)]
pub struct VizArc {
    pub start: VizPoint2d<f32>, // Start point of arc
    pub end:   VizPoint2d<f32>, // End point of arc
    pub cp1:   VizPoint2d<f32>, // 1st control point
    pub cp2:   VizPoint2d<f32>, // 2nd control point
}

impl VizArc {
    /// Calculate cubic Bézier parameters from a center point, radius, and start and end angles.
    /// This assumes the curve represents a segment of a circle no longer than a quarter turn.
    pub fn from_angles(center: &VizPoint2d<f32>, radius: f32, start_angle: f32, end_angle: f32) -> VizArc {
        let x1 = center.x + radius * start_angle.cos();
        let y1 = center.y + radius * start_angle.sin();
        let x4 = center.x + radius * end_angle.cos();
        let y4 = center.y + radius * end_angle.sin();

        // Compute relative vectors
        let ax = x1 - center.x;
        let ay = y1 - center.y;
        let bx = x4 - center.x;
        let by = y4 - center.y;

        // q1 = |A|^2 = ax² + ay²
        // q2 = q1 + (A · B) = q1 + ax*bx + ay*by
        let q1 = ax * ax + ay * ay;
        let q2 = q1 + ax * bx + ay * by;
        let k2 = (4.0 / 3.0) * ((2.0 * q1 * q2).sqrt() - q2) / (ax * by - ay * bx);

        // Angles closer than f32 precision give coincident endpoints. Draw a straight segment.
        if !k2.is_finite() {
            let (start, end) = (VizPoint2d { x: x1, y: y1 }, VizPoint2d { x: x4, y: y4 });
            return VizArc {
                start,
                end,
                cp1: start,
                cp2: end,
            };
        }

        let (x2, y2) = (center.x + ax - k2 * ay, center.y + ay + k2 * ax);
        let (x3, y3) = (center.x + bx + k2 * by, center.y + by - k2 * bx);

        VizArc {
            start: VizPoint2d { x: x1, y: y1 },
            end:   VizPoint2d { x: x4, y: y4 },
            cp1:   VizPoint2d { x: x2, y: y2 },
            cp2:   VizPoint2d { x: x3, y: y3 },
        }
    }

    /// Approximate the arc from `start_angle` to `end_angle` with as many cubic curves as needed
    /// to keep each piece within a quarter turn.
    pub fn split_from_angles(center: &VizPoint2d<f32>, radius: f32, start_angle: f64, end_angle: f64) -> Vec<VizArc> {
        let sweep = end_angle - start_angle;
        let pieces = ((sweep.abs() / FRAC_PI_2).ceil() as usize).max(1);
        let step = sweep / pieces as f64;

        (0..pieces)
            .map(|i| {
                let a0 = start_angle + step * i as f64;
                let a1 = a0 + step;
                VizArc::from_angles(center, radius, a0 as f32, a1 as f32)
            })
            .collect()
    }
}

/// A [VizCircle] represents a simple circle with center point and radius.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VizCircle {
    pub center: VizPoint2d<f32>,
    pub radius: f32,
}

impl VizCircle {
    pub fn new(center: VizPoint2d<f32>, radius: f32) -> VizCircle {
        VizCircle { center, radius }
    }
}

/// A [VizWedge] represents an arc with thickness, or an 'annular sector', spanning from
/// `start_angle` to `end_angle` in the clockwise (on screen) direction.
///
/// The path outline runs: inner radius at start -> outer radius at start -> along the outer
/// radius to the end angle -> inner radius at end -> back along the inner radius to the start.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VizWedge {
    pub center: VizPoint2d<f32>,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Start angle in radians
    pub start_angle: f64,
    /// End angle in radians. Always greater than `start_angle`.
    pub end_angle: f64,
    /// Set when the wedge covers more than half of the circle. Vector backends need this to pick
    /// the correct elliptical arc.
    pub large_arc: bool,
}

impl VizWedge {
    /// Build a wedge from a fractional range of a full turn. `start_turn` is the rotation, in
    /// turns, of fraction 0.0. A value of -0.25 puts fraction 0.0 at the 12 o'clock position.
    pub fn from_fractions(
        center: VizPoint2d<f32>,
        inner_radius: f32,
        outer_radius: f32,
        start: f64,
        end: f64,
        start_turn: f64,
    ) -> VizWedge {
        VizWedge {
            center,
            inner_radius,
            outer_radius,
            start_angle: TAU * (start + start_turn),
            end_angle: TAU * (end + start_turn),
            large_arc: end - start > 0.5,
        }
    }

    /// The angular extent of the wedge in radians.
    #[inline]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[inline]
    pub fn inner_start(&self) -> VizPoint2d<f32> {
        self.center.polar_offset(self.inner_radius, self.start_angle)
    }

    #[inline]
    pub fn outer_start(&self) -> VizPoint2d<f32> {
        self.center.polar_offset(self.outer_radius, self.start_angle)
    }

    #[inline]
    pub fn outer_end(&self) -> VizPoint2d<f32> {
        self.center.polar_offset(self.outer_radius, self.end_angle)
    }

    #[inline]
    pub fn inner_end(&self) -> VizPoint2d<f32> {
        self.center.polar_offset(self.inner_radius, self.end_angle)
    }

    /// Cubic approximation of the outer edge, running from the start angle to the end angle.
    pub fn outer_arcs(&self) -> Vec<VizArc> {
        VizArc::split_from_angles(&self.center, self.outer_radius, self.start_angle, self.end_angle)
    }

    /// Cubic approximation of the inner edge, running back from the end angle to the start angle.
    pub fn inner_arcs(&self) -> Vec<VizArc> {
        VizArc::split_from_angles(&self.center, self.inner_radius, self.end_angle, self.start_angle)
    }
}

/// A [VizShape] represents a shape that can be rendered in a badge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VizShape {
    Wedge(VizWedge),
    Circle(VizCircle),
}

impl From<VizWedge> for VizShape {
    #[inline]
    fn from(wedge: VizWedge) -> VizShape {
        VizShape::Wedge(wedge)
    }
}

impl From<VizCircle> for VizShape {
    #[inline]
    fn from(circle: VizCircle) -> VizShape {
        VizShape::Circle(circle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_wedge_starts_at_twelve_oclock() {
        let center = VizPoint2d::new(18.0, 18.0);
        let wedge = VizWedge::from_fractions(center, 11.0, 18.0, 0.0, 0.25, -0.25);

        let outer_start = wedge.outer_start();
        assert!(close(outer_start.x, 18.0));
        assert!(close(outer_start.y, 0.0));

        // A quarter turn clockwise lands at 3 o'clock
        let outer_end = wedge.outer_end();
        assert!(close(outer_end.x, 36.0));
        assert!(close(outer_end.y, 18.0));

        let inner_start = wedge.inner_start();
        assert!(close(inner_start.x, 18.0));
        assert!(close(inner_start.y, 7.0));
        assert!(!wedge.large_arc);
    }

    #[test]
    fn test_arc_below_f32_precision() {
        let center = VizPoint2d::new(50.0, 50.0);
        let wedge = VizWedge::from_fractions(center, 30.0, 50.0, 0.0, 1e-12, -0.25);
        assert!(wedge.sweep() > 0.0);
        assert_eq!(wedge.start_angle as f32, wedge.end_angle as f32);

        for arc in wedge.outer_arcs().iter().chain(wedge.inner_arcs().iter()) {
            for p in [arc.start, arc.cp1, arc.cp2, arc.end] {
                assert!(p.x.is_finite() && p.y.is_finite(), "{:?}", arc);
            }
        }
        let arc = wedge.outer_arcs()[0];
        assert_eq!(arc.cp1, arc.start);
        assert_eq!(arc.cp2, arc.end);
    }

    #[test]
    fn test_wedge_large_arc() {
        let center = VizPoint2d::new(0.0, 0.0);
        assert!(VizWedge::from_fractions(center, 1.0, 2.0, 0.1, 0.7, -0.25).large_arc);
        assert!(!VizWedge::from_fractions(center, 1.0, 2.0, 0.0, 0.5, -0.25).large_arc);
    }

    #[test]
    fn test_split_arcs_stay_on_circle() {
        let center = VizPoint2d::new(50.0, 50.0);
        let wedge = VizWedge::from_fractions(center, 30.0, 50.0, 0.0, 0.9, -0.25);

        let outer = wedge.outer_arcs();
        assert_eq!(outer.len(), 4);
        for arc in &outer {
            assert!(close(center.distance(&arc.start), 50.0));
            assert!(close(center.distance(&arc.end), 50.0));
        }
        // Pieces are contiguous
        for pair in outer.windows(2) {
            assert!(close(pair[0].end.x, pair[1].start.x));
            assert!(close(pair[0].end.y, pair[1].start.y));
        }

        let inner = wedge.inner_arcs();
        assert!(close(inner[0].start.x, wedge.inner_end().x));
        assert!(close(inner.last().unwrap().end.y, wedge.inner_start().y));
    }
}
