//! A joypad reporting how far, and in which direction, the knob was pushed

use bevy::log::{debug, trace};
use bevy::math::{Rect, Vec2};
use bevy::prelude::{Component, Reflect};
use bevy::utils::Duration;
use serde::{Deserialize, Serialize};

use crate::alignment::JoypadAlignment;
use crate::easing::ReturnAnimation;
use crate::errors::SettingsError;
use crate::geometry::{JoypadBounds, KnobConstraint};
use crate::interaction::DragTracker;
use crate::settings::JoypadSettings;
use crate::Joypad;

/// A change to one of the axes of a [`PolarJoypad`], carrying the new value
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub enum PolarEvent {
    /// The distance of the knob from the center changed, in `[0, 1]`.
    DistanceChanged(f32),
    /// The direction of the knob changed, in radians.
    AngleChanged(f32),
}

/// A virtual joystick reporting a `distance` in `[0, 1]` and an `angle` in radians
///
/// Angles are measured in screen space, where `y` grows downward:
/// `0` points right and `PI / 2` points down.
/// The knob always stays within a disc, and only the distance returns to `0` on release;
/// the angle is kept, so the last direction stays readable.
///
/// ```rust
/// use bevy::math::Vec2;
/// use leafwing_joypad::prelude::*;
///
/// let mut joypad = PolarJoypad::default();
/// joypad.resize(Vec2::new(200.0, 200.0));
///
/// joypad.press(joypad.geometry().knob_center());
/// joypad.move_to(Vec2::new(100.0, 900.0));
/// assert_eq!(joypad.distance(), 1.0);
/// assert!((joypad.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
/// ```
#[derive(Component, Debug, Clone)]
pub struct PolarJoypad {
    settings: JoypadSettings,
    size: Vec2,
    geometry: JoypadBounds,
    drag: DragTracker,
    distance: f32,
    angle: f32,
    distance_return: ReturnAnimation,
    enabled: bool,
    needs_redraw: bool,
}

impl Default for PolarJoypad {
    fn default() -> Self {
        Self::with_settings(JoypadSettings::polar())
    }
}

impl PolarJoypad {
    /// Creates an unsized joypad resting in the center.
    ///
    /// # Panics
    ///
    /// Panics if `settings` fail [`JoypadSettings::validate`].
    #[must_use]
    pub fn with_settings(settings: JoypadSettings) -> Self {
        match Self::try_with_settings(settings) {
            Ok(joypad) => joypad,
            Err(error) => panic!("invalid joypad settings: {error}"),
        }
    }

    /// Creates an unsized joypad resting in the center, rejecting invalid `settings`.
    pub fn try_with_settings(settings: JoypadSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        Ok(Self {
            distance_return: settings.return_animation(),
            settings,
            size: Vec2::ZERO,
            geometry: JoypadBounds::default(),
            drag: DragTracker::default(),
            distance: 0.0,
            angle: 0.0,
            enabled: true,
            needs_redraw: true,
        })
    }

    /// How far the knob is from the center, in `[0, 1]`.
    #[must_use]
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The direction of the knob, in radians.
    #[must_use]
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// The knob direction scaled by its distance, with `y` pointing down as on screen.
    #[must_use]
    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.distance
    }

    /// Sets the distance, clamped to `[0, 1]`, and moves the knob to match.
    ///
    /// `NaN` is treated as `0.0`. The change is always reported, even if the value is unchanged.
    /// Systems must send the returned event as a [`PolarJoypadChanged`](crate::plugin::PolarJoypadChanged)
    /// for readers of that event to see it.
    pub fn set_distance(&mut self, value: f32) -> PolarEvent {
        self.distance = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.place_knob();

        PolarEvent::DistanceChanged(self.distance)
    }

    /// Sets the angle, in radians, and moves the knob to match.
    ///
    /// Non-finite angles are treated as `0.0`. The change is always reported, even if the value is unchanged.
    /// Systems must send the returned event as a [`PolarJoypadChanged`](crate::plugin::PolarJoypadChanged)
    /// for readers of that event to see it.
    pub fn set_angle(&mut self, value: f32) -> PolarEvent {
        self.angle = if value.is_finite() { value } else { 0.0 };
        self.place_knob();

        PolarEvent::AngleChanged(self.angle)
    }

    /// The square background region, in widget-local coordinates.
    #[must_use]
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    /// The square covered by the knob, in widget-local coordinates.
    #[must_use]
    #[inline]
    pub fn knob_bounds(&self) -> Rect {
        self.geometry.knob()
    }

    /// The farthest the knob center may travel from the bounds center.
    #[must_use]
    #[inline]
    pub fn available_radius(&self) -> f32 {
        self.geometry.available_radius()
    }

    /// Switches pointer input and knob drawing on or off.
    ///
    /// Disabling a joypad mid-drag lets go of the knob.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.needs_redraw = true;
        if !enabled {
            self.release();
        }
    }

    fn place_knob(&mut self) {
        self.geometry
            .set_knob_offset(self.geometry.polar_offset(self.distance, self.angle));
        self.needs_redraw = true;
    }
}

impl Joypad for PolarJoypad {
    type Event = PolarEvent;

    fn settings(&self) -> &JoypadSettings {
        &self.settings
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn geometry(&self) -> &JoypadBounds {
        &self.geometry
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_pressed(&self) -> bool {
        self.drag.is_pressed()
    }

    fn is_returning(&self) -> bool {
        self.distance_return.is_returning()
    }

    /// Lays the joypad out again, scaling the knob offset with the bounds
    /// so that repeated resizes do not drift.
    fn resize(&mut self, size: Vec2) {
        let previous = self.geometry;
        self.size = size.max(Vec2::ZERO);
        self.geometry = JoypadBounds::fit(
            self.size,
            JoypadAlignment::CENTER,
            self.settings.margin,
            self.settings.knob_ratio,
        );

        let offset = if previous.side() > 0.0 {
            previous.knob_offset() * (self.geometry.side() / previous.side())
        } else {
            self.geometry.polar_offset(self.distance, self.angle)
        };
        self.geometry.set_knob_offset(offset);
        self.needs_redraw = true;

        debug!(bounds = ?self.geometry.bounds(), "laid out polar joypad");
    }

    fn press(&mut self, position: Vec2) -> bool {
        if !self.enabled || !self.geometry.knob_contains(position) {
            return false;
        }

        self.distance_return.stop();
        self.drag.press(position);
        trace!(?position, "polar joypad knob pressed");
        true
    }

    fn move_to(&mut self, position: Vec2) -> Vec<PolarEvent> {
        let Some(delta) =
            self.drag
                .drag_to(position, self.geometry.knob_center(), self.settings.drag_bias)
        else {
            return Vec::new();
        };

        let radius = self.geometry.available_radius();
        let offset = KnobConstraint::Circle.clamp(self.geometry.knob_offset() + delta, radius);
        self.geometry.set_knob_offset(offset);
        self.needs_redraw = true;

        let Some((distance, angle)) = self.geometry.polar_values(offset) else {
            return Vec::new();
        };

        let mut events = Vec::with_capacity(2);
        let distance = distance.min(1.0);
        if self.distance != distance {
            self.distance = distance;
            events.push(PolarEvent::DistanceChanged(distance));
        }

        if self.angle != angle {
            self.angle = angle;
            events.push(PolarEvent::AngleChanged(angle));
        }

        events
    }

    fn release(&mut self) -> bool {
        if !self.drag.release() {
            return false;
        }

        self.distance_return.start(self.distance);
        trace!(
            distance = self.distance,
            angle = self.angle,
            "polar joypad knob released"
        );
        true
    }

    fn tick(&mut self, delta: Duration) -> Vec<PolarEvent> {
        self.distance_return
            .tick(delta)
            .map(|distance| self.set_distance(distance))
            .into_iter()
            .collect()
    }

    fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const FRAME: Duration = Duration::from_millis(20);

    fn joypad() -> PolarJoypad {
        let mut joypad = PolarJoypad::with_settings(JoypadSettings {
            knob_ratio: 0.25,
            margin: 0.0,
            ..JoypadSettings::polar()
        });
        joypad.resize(Vec2::new(200.0, 200.0));
        joypad
    }

    fn drain(joypad: &mut PolarJoypad, frames: usize) -> Vec<PolarEvent> {
        (0..frames).flat_map(|_| joypad.tick(FRAME)).collect()
    }

    #[test]
    fn layout_is_centered_with_margin() {
        let mut joypad = PolarJoypad::default();
        joypad.resize(Vec2::new(300.0, 100.0));

        let bounds = joypad.bounds();
        assert!((bounds.center() - Vec2::new(150.0, 50.0)).length() < 1e-4);
        assert!((bounds.width() - 98.0).abs() < 1e-4);
        assert!((joypad.knob_bounds().width() - 29.4).abs() < 1e-4);
        assert_eq!(joypad.geometry().knob_offset(), Vec2::ZERO);
    }

    #[test]
    fn setters_clamp_and_report() {
        let mut joypad = joypad();

        assert_eq!(joypad.set_distance(0.5), PolarEvent::DistanceChanged(0.5));
        assert_eq!(joypad.geometry().knob_offset(), Vec2::new(37.5, 0.0));

        assert_eq!(
            joypad.set_angle(FRAC_PI_2),
            PolarEvent::AngleChanged(FRAC_PI_2)
        );
        let offset = joypad.geometry().knob_offset();
        assert!((offset - Vec2::new(0.0, 37.5)).length() < 1e-4);

        assert_eq!(joypad.set_distance(7.0), PolarEvent::DistanceChanged(1.0));
        assert_eq!(joypad.set_distance(-1.0), PolarEvent::DistanceChanged(0.0));
        assert_eq!(
            joypad.set_distance(f32::NAN),
            PolarEvent::DistanceChanged(0.0)
        );
        assert_eq!(
            joypad.set_angle(f32::INFINITY),
            PolarEvent::AngleChanged(0.0)
        );
    }

    #[test]
    fn drag_beyond_radius_clamps_to_disc() {
        let mut joypad = joypad();
        assert!(joypad.press(Vec2::new(100.0, 100.0)));

        let events = joypad.move_to(Vec2::new(700.0, 700.0));
        assert_eq!(events.len(), 2);
        assert!((joypad.distance() - 1.0).abs() < 1e-5);
        assert!(joypad.distance() <= 1.0);
        assert!((joypad.angle() - FRAC_PI_4).abs() < 1e-4);
        assert!(joypad.geometry().knob_offset().length() <= 75.0 + 1e-3);
    }

    #[test]
    fn drag_inside_disc() {
        let mut joypad = joypad();
        joypad.press(Vec2::new(100.0, 100.0));

        // Straight left; the bias adds 5% of the gap to the pointer
        joypad.move_to(Vec2::new(80.0, 100.0));
        assert!((joypad.distance() - 21.0 / 75.0).abs() < 1e-5);
        assert!((joypad.angle().abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn press_outside_knob_is_ignored() {
        let mut joypad = joypad();
        assert!(!joypad.press(Vec2::new(190.0, 190.0)));
        assert!(joypad.move_to(Vec2::new(10.0, 10.0)).is_empty());
        assert!(!joypad.release());
        assert!(drain(&mut joypad, 30).is_empty());
        assert_eq!(joypad.distance(), 0.0);
        assert_eq!(joypad.angle(), 0.0);
    }

    #[test]
    fn release_returns_distance_only() {
        let mut joypad = joypad();
        joypad.press(Vec2::new(100.0, 100.0));
        joypad.move_to(Vec2::new(100.0, 900.0));
        assert_eq!(joypad.distance(), 1.0);
        let angle = joypad.angle();

        assert!(joypad.release());
        let events = drain(&mut joypad, 10);
        assert_eq!(events.len(), 10);
        assert!(joypad.distance() > 0.0 && joypad.distance() < 1.0);

        drain(&mut joypad, 10);
        assert_eq!(joypad.distance(), 0.0);
        assert_eq!(joypad.angle(), angle);
        assert_eq!(joypad.geometry().knob_offset(), Vec2::ZERO);
        assert!(!joypad.is_returning());
    }

    #[test]
    fn resize_scales_offset() {
        let mut joypad = joypad();
        joypad.press(Vec2::new(100.0, 100.0));
        joypad.move_to(Vec2::new(60.0, 100.0));
        joypad.release();
        let offset = joypad.geometry().knob_offset();

        joypad.resize(Vec2::new(400.0, 400.0));
        assert!((joypad.geometry().knob_offset() - offset * 2.0).length() < 1e-4);

        // Shrinking back recovers the original placement
        for _ in 0..10 {
            joypad.resize(Vec2::new(400.0, 400.0));
            joypad.resize(Vec2::new(200.0, 200.0));
        }
        assert!((joypad.geometry().knob_offset() - offset).length() < 1e-3);
    }

    #[test]
    fn first_resize_uses_values() {
        let mut joypad = PolarJoypad::with_settings(JoypadSettings {
            knob_ratio: 0.25,
            margin: 0.0,
            ..JoypadSettings::polar()
        });
        joypad.set_distance(1.0);
        joypad.set_angle(PI);

        joypad.resize(Vec2::new(200.0, 200.0));
        let offset = joypad.geometry().knob_offset();
        assert!((offset - Vec2::new(-75.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn unsized_joypad_does_not_divide_by_zero() {
        let mut joypad = PolarJoypad::default();
        assert!(joypad.press(Vec2::ZERO));
        assert!(joypad.move_to(Vec2::new(10.0, 10.0)).is_empty());
        assert_eq!(joypad.distance(), 0.0);
        assert!(joypad.distance().is_finite());
    }

    #[test]
    fn disabled_joypad_ignores_pointer() {
        let mut joypad = joypad();
        joypad.set_enabled(false);
        assert!(!joypad.press(Vec2::new(100.0, 100.0)));
        assert!(!joypad.scene().draws_knob());
    }
}
