#![forbid(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

use std::fmt::Debug;

use bevy::math::Vec2;
use bevy::utils::Duration;

use crate::geometry::JoypadBounds;
use crate::render::JoypadScene;
use crate::settings::JoypadSettings;

pub mod alignment;
pub mod cartesian;
pub mod easing;
pub mod errors;
pub mod geometry;
pub mod interaction;
pub mod plugin;
pub mod pointer;
pub mod polar;
pub mod render;
pub mod settings;
pub mod systems;

/// Everything you need to get started
pub mod prelude {
    pub use crate::alignment::JoypadAlignment;
    pub use crate::cartesian::{CartesianEvent, CartesianJoypad};
    pub use crate::easing::{Easing, EasingCurve, ReturnAnimation};
    pub use crate::geometry::KnobConstraint;
    pub use crate::pointer::JoypadPointer;
    pub use crate::polar::{PolarEvent, PolarJoypad};
    pub use crate::settings::{JoypadSettings, JoypadStyle};

    pub use crate::plugin::{
        CartesianJoypadChanged, JoypadArea, JoypadBundle, JoypadChanged, JoypadPlugin,
        JoypadSystem, PolarJoypadChanged,
    };
    #[cfg(feature = "gizmos")]
    pub use crate::plugin::JoypadGizmosPlugin;
    #[cfg(feature = "egui")]
    pub use crate::render::egui::JoypadWidget;
    pub use crate::Joypad;
}

/// The state machine shared by every joypad variant
///
/// A joypad is plain data: the host feeds it a widget size, pointer positions and frame deltas,
/// and it answers with the axis changes those inputs caused.
/// All positions are widget-local pixels, with `y` growing downward.
///
/// The systems in [`systems`] are generic over this trait,
/// so one copy of the [`JoypadPlugin`](crate::plugin::JoypadPlugin) machinery serves each variant.
pub trait Joypad: Send + Sync + 'static {
    /// The axis change notification this joypad emits
    type Event: Send + Sync + Debug + Clone + 'static;

    /// The settings this joypad was created with.
    fn settings(&self) -> &JoypadSettings;

    /// The size of the widget, as last passed to [`resize`](Joypad::resize).
    fn size(&self) -> Vec2;

    /// The current layout of the bounds and knob.
    fn geometry(&self) -> &JoypadBounds;

    /// Does this joypad react to pointer input?
    fn is_enabled(&self) -> bool;

    /// Is the knob currently held?
    fn is_pressed(&self) -> bool;

    /// Is a return animation playing?
    fn is_returning(&self) -> bool;

    /// Lays the bounds and knob out for a widget of `size`.
    fn resize(&mut self, size: Vec2);

    /// Starts a drag if `position` is on the knob, returning whether it was.
    ///
    /// A successful press stops any return animation.
    fn press(&mut self, position: Vec2) -> bool;

    /// Drags the knob toward `position`, returning the axis changes.
    ///
    /// Does nothing unless the knob is pressed.
    fn move_to(&mut self, position: Vec2) -> Vec<Self::Event>;

    /// Lets go of the knob and starts the return animations.
    ///
    /// Returns `false`, doing nothing, if the knob was not pressed.
    fn release(&mut self) -> bool;

    /// Advances the return animations by `delta`, returning the axis changes.
    fn tick(&mut self, delta: Duration) -> Vec<Self::Event>;

    /// Has the joypad changed its appearance since this was last called?
    fn take_redraw(&mut self) -> bool;

    /// Builds the display list for the current state.
    fn scene(&self) -> JoypadScene {
        JoypadScene::new(self.geometry(), &self.settings().style, self.is_enabled())
    }
}
