//! Tunable proportions, timings and colors of a joypad

use bevy::color::Color;
use bevy::prelude::Reflect;
use bevy::utils::Duration;
use serde::{Deserialize, Serialize};

use crate::easing::{EasingCurve, ReturnAnimation};
use crate::errors::SettingsError;

/// Configuration shared by both joypad variants
///
/// The defaults reproduce the classic look and feel:
/// a knob 30% the size of its bounds, a 5% pointer bias,
/// and a 400 millisecond ease-out-sine return.
///
/// ```rust
/// use leafwing_joypad::prelude::*;
///
/// let settings = JoypadSettings::polar();
/// assert_eq!(settings.margin, 0.02);
/// assert!(settings.validate().is_ok());
///
/// let broken = JoypadSettings { knob_ratio: 1.5, ..JoypadSettings::default() };
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct JoypadSettings {
    /// The side of the knob, as a fraction of the side of the bounds.
    pub knob_ratio: f32,

    /// The fraction of the pointer-to-knob gap added to every drag step,
    /// keeping the knob glued to the pointer.
    pub drag_bias: f32,

    /// The fraction of the widget size left empty around the bounds.
    pub margin: f32,

    /// How long the knob takes to return to neutral after release.
    pub return_duration: Duration,

    /// The curve the return follows.
    pub return_easing: EasingCurve,

    /// Colors and stroke proportions.
    pub style: JoypadStyle,
}

impl Default for JoypadSettings {
    fn default() -> Self {
        Self {
            knob_ratio: 0.3,
            drag_bias: 0.05,
            margin: 0.0,
            return_duration: Duration::from_millis(400),
            return_easing: EasingCurve::OutSine,
            style: JoypadStyle::default(),
        }
    }
}

impl JoypadSettings {
    /// The defaults for a [`CartesianJoypad`](crate::cartesian::CartesianJoypad): no margin.
    #[must_use]
    pub fn cartesian() -> Self {
        Self::default()
    }

    /// The defaults for a [`PolarJoypad`](crate::polar::PolarJoypad): a 2% margin.
    #[must_use]
    pub fn polar() -> Self {
        Self {
            margin: 0.02,
            ..Self::default()
        }
    }

    /// Checks that these settings describe a joypad that can be laid out.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.knob_ratio == 0.0 || !(0.0..1.0).contains(&self.knob_ratio) {
            return Err(SettingsError::KnobRatio {
                ratio: self.knob_ratio,
            });
        }

        if self.drag_bias.is_nan() || self.drag_bias < 0.0 {
            return Err(SettingsError::DragBias {
                bias: self.drag_bias,
            });
        }

        if !(0.0..1.0).contains(&self.margin) {
            return Err(SettingsError::Margin {
                margin: self.margin,
            });
        }

        if self.return_duration.is_zero() {
            return Err(SettingsError::ZeroReturnDuration);
        }

        Ok(())
    }

    /// Builds an idle [`ReturnAnimation`] with the configured duration and curve.
    #[must_use]
    pub fn return_animation(&self) -> ReturnAnimation {
        ReturnAnimation::new(self.return_duration, self.return_easing)
    }
}

/// Colors and stroke proportions used when building a [`JoypadScene`](crate::render::JoypadScene)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct JoypadStyle {
    /// Background gradient color at the focal circle.
    pub background_inner: Color,
    /// Background gradient color at the outer circle.
    pub background_outer: Color,
    /// Outline of the background and crosshair lines.
    pub background_outline: Color,
    /// Knob gradient color at the focal circle.
    pub knob_inner: Color,
    /// Knob gradient color at the outer circle.
    pub knob_outer: Color,
    /// Outline of the knob.
    pub knob_outline: Color,
    /// Stroke width, as a fraction of the side of the bounds.
    pub stroke_ratio: f32,
    /// How far from the center the crosshair lines stop, as a fraction of the side of the bounds.
    pub crosshair_gap_ratio: f32,
}

impl Default for JoypadStyle {
    fn default() -> Self {
        Self {
            background_inner: Color::WHITE,
            background_outer: Color::srgb_u8(192, 192, 192),
            background_outline: Color::srgb_u8(160, 160, 164),
            knob_inner: Color::srgb_u8(160, 160, 164),
            knob_outer: Color::srgb_u8(128, 128, 128),
            knob_outline: Color::srgb_u8(128, 128, 128),
            stroke_ratio: 0.005,
            crosshair_gap_ratio: 0.35,
        }
    }
}
