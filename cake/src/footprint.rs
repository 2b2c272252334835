//! Footprint math for each cake shape.
//!
//! Every shape answers three questions at a given scale:
//!
//! | Function | Question |
//! |----------|----------|
//! | [`perimeter`] | How long is the outline? Drives border spacing. |
//! | [`boundary_point`] | Where is the point a fraction `t` of the way around? |
//! | [`scatter_point`] | Where is a random point inside? |
//!
//! Points live on the top plane of a tier: `x` to the right, `z` towards the
//! viewer, origin at the tier's centre. Rectangular outlines start at the
//! `(-x, -z)` corner and walk clockwise seen from above, so the corners fall at
//! the cumulative edge lengths.

#[cfg(test)]
#[path = "footprint_test.rs"]
mod footprint_test;

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::CakeShape;
use crate::consts::{
    HEART_CURVE_SCALE, HEART_PERIMETER_SAMPLES, HEART_SHAPE_FACTOR, RECT_DEPTH_FACTOR, RECT_WIDTH_FACTOR,
    SQUARE_SIDE_FACTOR,
};

/// A point on a tier's top plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    pub x: f64,
    pub z: f64,
}

impl PlanePoint {
    #[must_use]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self { x: self.x * factor, z: self.z * factor }
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Heading from the origin, in radians around the vertical axis.
    #[must_use]
    pub fn heading(self) -> f64 {
        self.x.atan2(self.z)
    }
}

/// Outline length at `scale`.
#[must_use]
pub fn perimeter(shape: CakeShape, scale: f64) -> f64 {
    match shape {
        CakeShape::Round => TAU * scale,
        CakeShape::Square => 4.0 * SQUARE_SIDE_FACTOR * scale,
        CakeShape::Rectangle => 2.0 * (RECT_WIDTH_FACTOR + RECT_DEPTH_FACTOR) * scale,
        CakeShape::Heart => heart_unit_perimeter() * scale,
    }
}

/// Point a fraction `t` of the way around the outline. `t` wraps, so `0.0`
/// and `1.0` name the same point.
#[must_use]
pub fn boundary_point(shape: CakeShape, scale: f64, t: f64) -> PlanePoint {
    let t = t.rem_euclid(1.0);
    match shape {
        CakeShape::Round => {
            let theta = TAU * t;
            PlanePoint::new(scale * theta.cos(), scale * theta.sin())
        }
        CakeShape::Square => {
            let side = SQUARE_SIDE_FACTOR * scale;
            rect_walk(side, side, t)
        }
        CakeShape::Rectangle => rect_walk(RECT_WIDTH_FACTOR * scale, RECT_DEPTH_FACTOR * scale, t),
        CakeShape::Heart => heart_point(TAU * t).scaled(scale),
    }
}

/// Random point inside the outline at `scale`.
pub fn scatter_point<R: Rng + ?Sized>(shape: CakeShape, scale: f64, rng: &mut R) -> PlanePoint {
    match shape {
        CakeShape::Round => {
            let radius = rng.random::<f64>() * scale;
            let theta = rng.random::<f64>() * TAU;
            PlanePoint::new(radius * theta.cos(), radius * theta.sin())
        }
        CakeShape::Square => {
            let side = SQUARE_SIDE_FACTOR * scale;
            uniform_in_rect(side, side, rng)
        }
        CakeShape::Rectangle => uniform_in_rect(RECT_WIDTH_FACTOR * scale, RECT_DEPTH_FACTOR * scale, rng),
        CakeShape::Heart => {
            let theta = rng.random::<f64>() * TAU;
            let inset = rng.random::<f64>();
            heart_point(theta).scaled(scale * inset)
        }
    }
}

/// Width (`x`) and depth (`z`) of the outline's bounding box at `scale`.
#[must_use]
pub fn span(shape: CakeShape, scale: f64) -> (f64, f64) {
    match shape {
        CakeShape::Round => (2.0 * scale, 2.0 * scale),
        CakeShape::Square => (SQUARE_SIDE_FACTOR * scale, SQUARE_SIDE_FACTOR * scale),
        CakeShape::Rectangle => (RECT_WIDTH_FACTOR * scale, RECT_DEPTH_FACTOR * scale),
        CakeShape::Heart => {
            let (min, max) = heart_samples().fold(
                (PlanePoint::new(f64::MAX, f64::MAX), PlanePoint::new(f64::MIN, f64::MIN)),
                |(min, max), p| {
                    (PlanePoint::new(min.x.min(p.x), min.z.min(p.z)), PlanePoint::new(max.x.max(p.x), max.z.max(p.z)))
                },
            );
            ((max.x - min.x) * scale, (max.z - min.z) * scale)
        }
    }
}

// =============================================================================
// HEART
// =============================================================================

/// Heart curve at angle `theta` for unit scale:
/// `x = 16 sin³θ`, `y = 13 cosθ − 5 cos2θ − 2 cos3θ − cos4θ`, lobes towards `-z`.
#[must_use]
pub fn heart_point(theta: f64) -> PlanePoint {
    let x = 16.0 * theta.sin().powi(3);
    let y = 13.0 * theta.cos() - 5.0 * (2.0 * theta).cos() - 2.0 * (3.0 * theta).cos() - (4.0 * theta).cos();
    PlanePoint::new(x, -y).scaled(HEART_CURVE_SCALE * HEART_SHAPE_FACTOR)
}

#[allow(clippy::cast_precision_loss)]
fn heart_samples() -> impl Iterator<Item = PlanePoint> {
    (0..=HEART_PERIMETER_SAMPLES).map(|i| heart_point(TAU * i as f64 / HEART_PERIMETER_SAMPLES as f64))
}

fn heart_unit_perimeter() -> f64 {
    let points: Vec<PlanePoint> = heart_samples().collect();
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

// =============================================================================
// RECTANGLES
// =============================================================================

fn rect_walk(width: f64, depth: f64, t: f64) -> PlanePoint {
    let (hw, hd) = (width / 2.0, depth / 2.0);
    let mut d = t * 2.0 * (width + depth);

    if d <= width {
        return PlanePoint::new(-hw + d, -hd);
    }
    d -= width;
    if d <= depth {
        return PlanePoint::new(hw, -hd + d);
    }
    d -= depth;
    if d <= width {
        return PlanePoint::new(hw - d, hd);
    }
    d -= width;
    PlanePoint::new(-hw, hd - d.min(depth))
}

fn uniform_in_rect<R: Rng + ?Sized>(width: f64, depth: f64, rng: &mut R) -> PlanePoint {
    PlanePoint::new((rng.random::<f64>() - 0.5) * width, (rng.random::<f64>() - 0.5) * depth)
}
