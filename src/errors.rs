//! Errors that may occur when configuring a joypad

use derive_more::{Display, Error};

/// A flag name could not be parsed into a [`JoypadAlignment`](crate::alignment::JoypadAlignment)
///
/// Produced by the [`FromStr`](std::str::FromStr) implementation of
/// [`JoypadAlignment`](crate::alignment::JoypadAlignment),
/// which accepts `|`-separated names such as `"bottom | hcenter"`.
#[derive(Debug, Clone, Error, Display, PartialEq, Eq)]
#[display(fmt = "unknown alignment flag `{}`", flag)]
pub struct AlignmentParseError {
    /// The offending flag name, as written.
    pub flag: String,
}

/// The supplied [`JoypadSettings`](crate::settings::JoypadSettings) describe a joypad that cannot be laid out
///
/// In almost all cases, the correct way to handle this error is to fall back to
/// [`JoypadSettings::default`](crate::settings::JoypadSettings::default).
#[derive(Debug, Clone, Copy, Error, Display, PartialEq)]
pub enum SettingsError {
    /// The knob must be strictly smaller than the bounds, and not vanish entirely.
    #[display(fmt = "knob ratio {} must lie strictly between 0 and 1", ratio)]
    KnobRatio {
        /// The rejected ratio.
        ratio: f32,
    },

    /// The pointer bias may not push the knob away from the pointer.
    #[display(fmt = "drag bias {} must not be negative", bias)]
    DragBias {
        /// The rejected bias.
        bias: f32,
    },

    /// The margin is a fraction of the widget size, and must leave some room to draw in.
    #[display(fmt = "margin {} must lie in [0, 1)", margin)]
    Margin {
        /// The rejected margin.
        margin: f32,
    },

    /// A return animation must take some time to play.
    #[display(fmt = "the return animation duration must be greater than zero")]
    ZeroReturnDuration,
}
