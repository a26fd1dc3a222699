//! Square bounds, knob placement and the conversions between knob offsets and axis values
//!
//! All points are widget-local pixels: the origin is the top-left corner of the widget,
//! and `y` grows downward.

use bevy::math::{Rect, Vec2};
use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};

use crate::alignment::JoypadAlignment;

/// The square a joypad is drawn in, together with the smaller square of its knob
///
/// The knob is free to move while its center stays within [`available_radius`](Self::available_radius)
/// of the bounds center. Its position is stored as an offset from that center,
/// so that values written through the conversions below are read back exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub struct JoypadBounds {
    center: Vec2,
    side: f32,
    knob_side: f32,
    knob_offset: Vec2,
}

impl JoypadBounds {
    /// Creates bounds with a knob of `knob_ratio` times the side of `bounds`, resting in the center.
    #[must_use]
    pub fn new(bounds: Rect, knob_ratio: f32) -> Self {
        Self {
            center: bounds.center(),
            side: bounds.width(),
            knob_side: bounds.width() * knob_ratio,
            knob_offset: Vec2::ZERO,
        }
    }

    /// Lays out the largest square fitting a widget of `size`, placed by `alignment`,
    /// then shrunk about its center by the `margin` fraction.
    #[must_use]
    pub fn fit(size: Vec2, alignment: JoypadAlignment, margin: f32, knob_ratio: f32) -> Self {
        let square = alignment.square_bounds(size);
        let side = square.width() * (1.0 - margin);
        Self {
            center: square.center(),
            side,
            knob_side: side * knob_ratio,
            knob_offset: Vec2::ZERO,
        }
    }

    /// The square background region.
    #[must_use]
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(self.side))
    }

    /// The square region covered by the knob.
    #[must_use]
    #[inline]
    pub fn knob(&self) -> Rect {
        Rect::from_center_size(self.knob_center(), Vec2::splat(self.knob_side))
    }

    /// The side length of the background square.
    #[must_use]
    #[inline]
    pub fn side(&self) -> f32 {
        self.side
    }

    /// The center of the background square.
    #[must_use]
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// The center of the knob.
    #[must_use]
    #[inline]
    pub fn knob_center(&self) -> Vec2 {
        self.center + self.knob_offset
    }

    /// The vector from the bounds center to the knob center.
    #[must_use]
    #[inline]
    pub fn knob_offset(&self) -> Vec2 {
        self.knob_offset
    }

    /// Half the difference between the bounds side and the knob side:
    /// the farthest the knob center may travel from the bounds center.
    #[must_use]
    #[inline]
    pub fn available_radius(&self) -> f32 {
        (self.side - self.knob_side) / 2.0
    }

    /// Moves the knob so that its center sits at `offset` from the bounds center.
    ///
    /// The offset is taken as is; clamp it with a [`KnobConstraint`] first.
    #[inline]
    pub fn set_knob_offset(&mut self, offset: Vec2) {
        self.knob_offset = offset;
    }

    /// Is `point` on the knob? Edges count as inside.
    #[must_use]
    #[inline]
    pub fn knob_contains(&self, point: Vec2) -> bool {
        self.knob().contains(point)
    }

    /// The knob offset encoding the Cartesian axis values `(x, y)`.
    ///
    /// `y` points up while screen coordinates grow downward, so it is inverted.
    #[must_use]
    #[inline]
    pub fn cartesian_offset(&self, x: f32, y: f32) -> Vec2 {
        let radius = self.available_radius();
        Vec2::new(x * radius, -y * radius)
    }

    /// The Cartesian axis values `(x, y)` encoded by `offset`.
    ///
    /// Returns [`None`] when there is no room for the knob to move.
    #[must_use]
    #[inline]
    pub fn cartesian_values(&self, offset: Vec2) -> Option<Vec2> {
        let radius = self.available_radius();
        (radius > 0.0).then(|| Vec2::new(offset.x / radius, -offset.y / radius))
    }

    /// The knob offset encoding the polar axis values.
    ///
    /// The `angle` is measured in radians, in screen space: positive angles turn clockwise on screen.
    #[must_use]
    #[inline]
    pub fn polar_offset(&self, distance: f32, angle: f32) -> Vec2 {
        let radius = self.available_radius();
        Vec2::new(
            distance * radius * angle.cos(),
            distance * radius * angle.sin(),
        )
    }

    /// The polar axis values `(distance, angle)` encoded by `offset`.
    ///
    /// Returns [`None`] when there is no room for the knob to move.
    #[must_use]
    #[inline]
    pub fn polar_values(&self, offset: Vec2) -> Option<(f32, f32)> {
        let radius = self.available_radius();
        (radius > 0.0).then(|| (offset.length() / radius, offset.y.atan2(offset.x)))
    }
}

/// How a dragged knob is kept inside its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum KnobConstraint {
    /// Each axis is clamped independently, so the knob can reach the corners of the square.
    #[default]
    Square,

    /// The offset length is clamped, keeping the knob within a disc.
    Circle,
}

impl KnobConstraint {
    /// Clamps `offset` so that it stays within `radius` of the origin under this constraint.
    #[must_use]
    #[inline]
    pub fn clamp(&self, offset: Vec2, radius: f32) -> Vec2 {
        let radius = radius.max(0.0);
        match self {
            Self::Square => offset.clamp(Vec2::splat(-radius), Vec2::splat(radius)),
            Self::Circle => offset.clamp_length_max(radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    // Quarter-size knob keeps every test value exactly representable
    fn bounds() -> JoypadBounds {
        JoypadBounds::new(Rect::new(0.0, 0.0, 200.0, 200.0), 0.25)
    }

    #[test]
    fn knob_starts_centered() {
        let bounds = bounds();
        assert_eq!(bounds.knob_center(), Vec2::splat(100.0));
        assert_eq!(bounds.knob().size(), Vec2::splat(50.0));
        assert_eq!(bounds.available_radius(), 75.0);
        assert_eq!(bounds.knob_offset(), Vec2::ZERO);
    }

    #[test]
    fn fit_with_margin() {
        let bounds = JoypadBounds::fit(
            Vec2::new(300.0, 200.0),
            JoypadAlignment::CENTER,
            0.02,
            0.3,
        );
        assert!((bounds.center() - Vec2::new(150.0, 100.0)).length() < 1e-4);
        assert!((bounds.side() - 196.0).abs() < 1e-4);
        assert!((bounds.knob().width() - 58.8).abs() < 1e-4);
    }

    #[test]
    fn knob_hit_testing() {
        let bounds = bounds();
        assert!(bounds.knob_contains(Vec2::splat(100.0)));
        assert!(bounds.knob_contains(Vec2::new(75.0, 100.0)));
        assert!(!bounds.knob_contains(Vec2::new(74.0, 100.0)));
        assert!(!bounds.knob_contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn moving_the_knob() {
        let mut bounds = bounds();
        bounds.set_knob_offset(Vec2::new(-20.0, 30.0));
        assert_eq!(bounds.knob_center(), Vec2::new(80.0, 130.0));
        assert_eq!(bounds.knob_offset(), Vec2::new(-20.0, 30.0));
        assert_eq!(bounds.knob().size(), Vec2::splat(50.0));
    }

    #[test]
    fn cartesian_round_trip() {
        let bounds = bounds();
        for x in -75..=75 {
            for y in -75..=75 {
                let offset = Vec2::new(x as f32, y as f32);
                let values = bounds.cartesian_values(offset).unwrap();
                let recovered = bounds.cartesian_offset(values.x, values.y);
                assert!((recovered - offset).length() < 1e-4);
            }
        }
    }

    #[test]
    fn cartesian_y_points_up() {
        let bounds = bounds();
        let values = bounds.cartesian_values(Vec2::new(37.5, -75.0)).unwrap();
        assert_eq!(values, Vec2::new(0.5, 1.0));
        assert_eq!(bounds.cartesian_offset(0.5, 1.0), Vec2::new(37.5, -75.0));
    }

    #[test]
    fn polar_round_trip() {
        let bounds = bounds();
        for x in -50..=50 {
            for y in -50..=50 {
                let offset = Vec2::new(x as f32, y as f32);
                let (distance, angle) = bounds.polar_values(offset).unwrap();
                let recovered = bounds.polar_offset(distance, angle);
                assert!((recovered - offset).length() < 1e-3);
            }
        }
    }

    #[test]
    fn polar_angle_is_in_screen_space() {
        let bounds = bounds();
        let (distance, angle) = bounds.polar_values(Vec2::new(0.0, 37.5)).unwrap();
        assert_eq!(distance, 0.5);
        assert!((angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn degenerate_bounds_have_no_values() {
        let bounds = JoypadBounds::default();
        assert_eq!(bounds.available_radius(), 0.0);
        assert_eq!(bounds.cartesian_values(Vec2::X), None);
        assert_eq!(bounds.polar_values(Vec2::X), None);
    }

    #[test]
    fn constraints() {
        let offset = Vec2::new(100.0, 100.0);

        let square = KnobConstraint::Square.clamp(offset, 70.0);
        assert_eq!(square, Vec2::splat(70.0));

        let circle = KnobConstraint::Circle.clamp(offset, 70.0);
        assert!((circle.length() - 70.0).abs() < 1e-4);
        assert!((circle.x - circle.y).abs() < 1e-4);

        let inside = Vec2::new(10.0, -20.0);
        assert_eq!(KnobConstraint::Square.clamp(inside, 70.0), inside);
        assert_eq!(KnobConstraint::Circle.clamp(inside, 70.0), inside);
    }
}
