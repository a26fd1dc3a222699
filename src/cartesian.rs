//! A joypad reporting independent `x` and `y` axis values

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

/// A change to one of the axes of a [`CartesianJoypad`], carrying the new value
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub enum CartesianEvent {
    /// The horizontal axis changed; positive values point right.
    XChanged(f32),
    /// The vertical axis changed; positive values point up.
    YChanged(f32),
}

/// A virtual joystick with two independent axes, each ranging over `[-1, 1]`
///
/// The knob can be dragged with a pointer, and returns to the center when released.
/// Each axis' return animation can be switched off on its own, leaving that axis where it was let go.
///
/// ```rust
/// use bevy::math::Vec2;
/// use leafwing_joypad::prelude::*;
///
/// let mut joypad = CartesianJoypad::default();
/// joypad.resize(Vec2::new(200.0, 200.0));
///
/// // Grab the knob in the middle and pull it far to the right
/// assert!(joypad.press(Vec2::new(100.0, 100.0)));
/// let events = joypad.move_to(Vec2::new(400.0, 100.0));
/// assert_eq!(events, vec![CartesianEvent::XChanged(1.0)]);
/// assert_eq!(joypad.x(), 1.0);
/// assert_eq!(joypad.y(), 0.0);
/// ```
#[derive(Component, Debug, Clone)]
pub struct CartesianJoypad {
    settings: JoypadSettings,
    alignment: JoypadAlignment,
    constraint: KnobConstraint,
    size: Vec2,
    geometry: JoypadBounds,
    drag: DragTracker,
    x: f32,
    y: f32,
    x_return: ReturnAnimation,
    y_return: ReturnAnimation,
    x_return_enabled: bool,
    y_return_enabled: bool,
    enabled: bool,
    needs_redraw: bool,
}

impl Default for CartesianJoypad {
    fn default() -> Self {
        Self::with_settings(JoypadSettings::cartesian())
    }
}

impl CartesianJoypad {
    /// Creates an unsized joypad resting at `(0, 0)`.
    ///
    /// Call [`resize`](Joypad::resize) before feeding it pointer input.
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

    /// Creates an unsized joypad resting at `(0, 0)`, rejecting invalid `settings`.
    pub fn try_with_settings(settings: JoypadSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        Ok(Self {
            x_return: settings.return_animation(),
            y_return: settings.return_animation(),
            settings,
            alignment: JoypadAlignment::default(),
            constraint: KnobConstraint::default(),
            size: Vec2::ZERO,
            geometry: JoypadBounds::default(),
            drag: DragTracker::default(),
            x: 0.0,
            y: 0.0,
            x_return_enabled: true,
            y_return_enabled: true,
            enabled: true,
            needs_redraw: true,
        })
    }

    /// Places the bounds according to `alignment`.
    #[must_use]
    pub fn with_alignment(mut self, alignment: JoypadAlignment) -> Self {
        self.set_alignment(alignment);
        self
    }

    /// Keeps the dragged knob within `constraint`.
    #[must_use]
    pub fn with_constraint(mut self, constraint: KnobConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// The horizontal axis value, in `[-1, 1]`.
    #[must_use]
    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// The vertical axis value, in `[-1, 1]`. Positive values point up.
    #[must_use]
    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Both axis values as a vector.
    #[must_use]
    #[inline]
    pub fn axis_pair(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Sets the horizontal axis, clamped to `[-1, 1]`, and moves the knob to match.
    ///
    /// `NaN` is treated as `0.0`. The change is always reported, even if the value is unchanged.
    /// Systems must send the returned event as a [`CartesianJoypadChanged`](crate::plugin::CartesianJoypadChanged)
    /// for readers of that event to see it.
    pub fn set_x(&mut self, value: f32) -> CartesianEvent {
        self.x = clamp_axis(value);

        let offset = self.geometry.knob_offset();
        let target = self.geometry.cartesian_offset(self.x, 0.0);
        self.geometry.set_knob_offset(Vec2::new(target.x, offset.y));
        self.needs_redraw = true;

        CartesianEvent::XChanged(self.x)
    }

    /// Sets the vertical axis, clamped to `[-1, 1]`, and moves the knob to match.
    ///
    /// `NaN` is treated as `0.0`. The change is always reported, even if the value is unchanged.
    /// Systems must send the returned event as a [`CartesianJoypadChanged`](crate::plugin::CartesianJoypadChanged)
    /// for readers of that event to see it.
    pub fn set_y(&mut self, value: f32) -> CartesianEvent {
        self.y = clamp_axis(value);

        let offset = self.geometry.knob_offset();
        let target = self.geometry.cartesian_offset(0.0, self.y);
        self.geometry.set_knob_offset(Vec2::new(offset.x, target.y));
        self.needs_redraw = true;

        CartesianEvent::YChanged(self.y)
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

    /// How the square bounds are placed inside the widget.
    #[must_use]
    #[inline]
    pub fn alignment(&self) -> JoypadAlignment {
        self.alignment
    }

    /// Places the bounds according to `alignment`, laying the joypad out again.
    pub fn set_alignment(&mut self, alignment: JoypadAlignment) {
        self.alignment = alignment;
        self.layout();
    }

    /// How the dragged knob is kept inside its bounds.
    #[must_use]
    #[inline]
    pub fn constraint(&self) -> KnobConstraint {
        self.constraint
    }

    /// Changes how the dragged knob is kept inside its bounds.
    ///
    /// Takes effect on the next drag.
    pub fn set_constraint(&mut self, constraint: KnobConstraint) {
        self.constraint = constraint;
    }

    /// Lets the horizontal axis return to `0.0` on release.
    pub fn add_x_animation(&mut self) {
        self.x_return_enabled = true;
    }

    /// Leaves the horizontal axis where it was released, stopping any return in progress.
    pub fn remove_x_animation(&mut self) {
        self.x_return_enabled = false;
        self.x_return.stop();
    }

    /// Lets the vertical axis return to `0.0` on release.
    pub fn add_y_animation(&mut self) {
        self.y_return_enabled = true;
    }

    /// Leaves the vertical axis where it was released, stopping any return in progress.
    pub fn remove_y_animation(&mut self) {
        self.y_return_enabled = false;
        self.y_return.stop();
    }

    /// Does the horizontal axis return to `0.0` on release?
    #[must_use]
    #[inline]
    pub fn has_x_animation(&self) -> bool {
        self.x_return_enabled
    }

    /// Does the vertical axis return to `0.0` on release?
    #[must_use]
    #[inline]
    pub fn has_y_animation(&self) -> bool {
        self.y_return_enabled
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

    fn layout(&mut self) {
        self.geometry = JoypadBounds::fit(
            self.size,
            self.alignment,
            self.settings.margin,
            self.settings.knob_ratio,
        );
        self.geometry
            .set_knob_offset(self.geometry.cartesian_offset(self.x, self.y));
        self.needs_redraw = true;

        debug!(bounds = ?self.geometry.bounds(), "laid out cartesian joypad");
    }
}

impl Joypad for CartesianJoypad {
    type Event = CartesianEvent;

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
        self.x_return.is_returning() || self.y_return.is_returning()
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
        self.layout();
    }

    fn press(&mut self, position: Vec2) -> bool {
        if !self.enabled || !self.geometry.knob_contains(position) {
            return false;
        }

        self.x_return.stop();
        self.y_return.stop();
        self.drag.press(position);
        trace!(?position, "cartesian joypad knob pressed");
        true
    }

    fn move_to(&mut self, position: Vec2) -> Vec<CartesianEvent> {
        let Some(delta) =
            self.drag
                .drag_to(position, self.geometry.knob_center(), self.settings.drag_bias)
        else {
            return Vec::new();
        };

        let radius = self.geometry.available_radius();
        let offset = self
            .constraint
            .clamp(self.geometry.knob_offset() + delta, radius);
        self.geometry.set_knob_offset(offset);
        self.needs_redraw = true;

        let Some(values) = self.geometry.cartesian_values(offset) else {
            return Vec::new();
        };

        let mut events = Vec::with_capacity(2);
        let x = clamp_axis(values.x);
        if self.x != x {
            self.x = x;
            events.push(CartesianEvent::XChanged(x));
        }

        let y = clamp_axis(values.y);
        if self.y != y {
            self.y = y;
            events.push(CartesianEvent::YChanged(y));
        }

        events
    }

    fn release(&mut self) -> bool {
        if !self.drag.release() {
            return false;
        }

        if self.x_return_enabled {
            self.x_return.start(self.x);
        }
        if self.y_return_enabled {
            self.y_return.start(self.y);
        }
        trace!(x = self.x, y = self.y, "cartesian joypad knob released");
        true
    }

    fn tick(&mut self, delta: Duration) -> Vec<CartesianEvent> {
        let mut events = Vec::new();

        if let Some(x) = self.x_return.tick(delta) {
            events.push(self.set_x(x));
        }
        if let Some(y) = self.y_return.tick(delta) {
            events.push(self.set_y(y));
        }

        events
    }

    fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }
}

/// Clamps an axis value to `[-1, 1]`, mapping `NaN` to `0.0`.
#[inline]
fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
