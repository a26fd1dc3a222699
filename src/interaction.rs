//! Pointer tracking while the knob is being dragged

use bevy::math::Vec2;
use bevy::prelude::Reflect;

/// Remembers whether the knob is held, and where the pointer was last seen
///
/// Drags are incremental: each move translates the knob by the distance the pointer
/// travelled since the previous move, nudged slightly toward the pointer so the two
/// never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct DragTracker {
    pressed: bool,
    last_position: Vec2,
}

impl DragTracker {
    /// Is a drag in progress?
    #[must_use]
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// The pointer position recorded by the latest press or move.
    #[must_use]
    #[inline]
    pub fn last_position(&self) -> Vec2 {
        self.last_position
    }

    /// Starts a drag at `position`.
    pub fn press(&mut self, position: Vec2) {
        self.pressed = true;
        self.last_position = position;
    }

    /// Ends the drag, returning whether one was in progress.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.pressed, false)
    }

    /// Computes how far the knob centered at `knob_center` should move
    /// now that the pointer is at `position`, and records `position`.
    ///
    /// `bias` is the fraction of the pointer-to-knob gap added to the pointer motion.
    ///
    /// Returns [`None`] if no drag is in progress.
    #[must_use]
    pub fn drag_to(&mut self, position: Vec2, knob_center: Vec2, bias: f32) -> Option<Vec2> {
        if !self.pressed {
            return None;
        }

        let delta = position - self.last_position + bias * (position - knob_center);
        self.last_position = position;
        Some(delta)
    }
}
