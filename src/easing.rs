//! Easing curves and the animation that returns a released knob to neutral

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt::Debug;

use bevy::prelude::Reflect;
use bevy::utils::Duration;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};

/// A curve mapping linear animation progress onto eased progress
///
/// Both input and output run from `0.0` (start) to `1.0` (end).
/// Implement this trait to inject your own curve into a [`ReturnAnimation`].
///
/// ```rust
/// use leafwing_joypad::easing::{Easing, ReturnAnimation};
/// use bevy::utils::Duration;
///
/// #[derive(Debug, Clone)]
/// struct Snap;
///
/// impl Easing for Snap {
///     fn ease(&self, progress: f32) -> f32 {
///         if progress < 0.5 { 0.0 } else { 1.0 }
///     }
/// }
///
/// let mut animation = ReturnAnimation::new(Duration::from_millis(400), Snap);
/// animation.start(1.0);
/// assert_eq!(animation.tick(Duration::from_millis(100)), Some(1.0));
/// assert_eq!(animation.tick(Duration::from_millis(200)), Some(0.0));
/// ```
pub trait Easing: Send + Sync + Debug + DynClone + 'static {
    /// Maps `progress` in `[0, 1]` onto the eased progress.
    fn ease(&self, progress: f32) -> f32;
}

dyn_clone::clone_trait_object!(Easing);

/// The built-in [`Easing`] curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum EasingCurve {
    /// Constant speed.
    Linear,

    /// Accelerates from rest along a quarter sine wave.
    InSine,

    /// Decelerates to rest along a quarter sine wave.
    #[default]
    OutSine,

    /// Accelerates, then decelerates, along a half cosine wave.
    InOutSine,

    /// Decelerates to rest along a parabola.
    OutQuad,

    /// Decelerates to rest along a cubic.
    OutCubic,
}

impl Easing for EasingCurve {
    fn ease(&self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::OutSine => (t * FRAC_PI_2).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Is a [`ReturnAnimation`] currently playing?
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReturnState {
    /// Nothing to animate.
    #[default]
    Idle,

    /// Interpolating from `from` toward zero.
    Returning {
        /// The value when the animation started.
        from: f32,
        /// Time played so far.
        elapsed: Duration,
    },
}

/// Drives a single axis value back to zero over a fixed duration
///
/// The animation owns no timer: the host advances it with [`tick`](Self::tick),
/// and applies the returned value to the axis.
#[derive(Debug, Clone)]
pub struct ReturnAnimation {
    duration: Duration,
    easing: Box<dyn Easing>,
    state: ReturnState,
}

impl Default for ReturnAnimation {
    /// 400 milliseconds along [`EasingCurve::OutSine`].
    fn default() -> Self {
        Self::new(Duration::from_millis(400), EasingCurve::OutSine)
    }
}

impl ReturnAnimation {
    /// Creates an idle animation lasting `duration` along `easing`.
    pub fn new(duration: Duration, easing: impl Easing) -> Self {
        Self {
            duration,
            easing: Box::new(easing),
            state: ReturnState::Idle,
        }
    }

    /// The time a complete animation takes.
    #[must_use]
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The current state of the animation.
    #[must_use]
    #[inline]
    pub fn state(&self) -> ReturnState {
        self.state
    }

    /// Is the animation playing?
    #[must_use]
    #[inline]
    pub fn is_returning(&self) -> bool {
        matches!(self.state, ReturnState::Returning { .. })
    }

    /// Replaces the easing curve; a playing animation continues along the new curve.
    pub fn set_easing(&mut self, easing: impl Easing) {
        self.easing = Box::new(easing);
    }

    /// Replaces the duration; a playing animation continues with the new duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Starts (or restarts) returning `from` the given value.
    ///
    /// A value already at zero has nowhere to go, and leaves the animation idle.
    pub fn start(&mut self, from: f32) {
        self.state = if from == 0.0 {
            ReturnState::Idle
        } else {
            ReturnState::Returning {
                from,
                elapsed: Duration::ZERO,
            }
        };
    }

    /// Stops the animation where it is.
    pub fn stop(&mut self) {
        self.state = ReturnState::Idle;
    }

    /// Advances the animation by `delta`, returning the value the axis should now hold.
    ///
    /// Returns [`None`] while idle. The final tick yields exactly `0.0` and stops the animation.
    #[must_use]
    pub fn tick(&mut self, delta: Duration) -> Option<f32> {
        let ReturnState::Returning { from, elapsed } = self.state else {
            return None;
        };

        let elapsed = elapsed + delta;
        if elapsed >= self.duration {
            self.state = ReturnState::Idle;
            return Some(0.0);
        }

        self.state = ReturnState::Returning { from, elapsed };
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Some(from * (1.0 - self.easing.ease(progress)))
    }
}
