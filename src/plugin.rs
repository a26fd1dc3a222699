//! Contains the main plugin exported by this crate.

use bevy::app::{App, Plugin, PreUpdate};
use bevy::ecs::prelude::*;
use bevy::input::InputSystem;
use bevy::math::{Rect, Vec2};
use bevy::prelude::Reflect;

use crate::cartesian::{CartesianEvent, CartesianJoypad};
use crate::geometry::KnobConstraint;
use crate::pointer::JoypadPointer;
use crate::polar::{PolarEvent, PolarJoypad};
use crate::settings::{JoypadSettings, JoypadStyle};
use crate::Joypad;

/// A [`Plugin`] that drives every [`CartesianJoypad`] and [`PolarJoypad`] entity from mouse and touch input
///
/// Spawn joypads with a [`JoypadBundle`], then read [`CartesianJoypadChanged`] and [`PolarJoypadChanged`] events,
/// or query the joypad components directly.
///
/// ## Setting values from code
///
/// Setters such as [`CartesianJoypad::set_x`] and [`PolarJoypad::set_angle`] return their event
/// instead of sending it, since the joypad does not know its own entity.
/// A system that calls them must forward the event:
///
/// ```rust
/// use bevy::prelude::*;
/// use leafwing_joypad::prelude::*;
///
/// fn center_on_demand(
///     mut query: Query<(Entity, &mut CartesianJoypad)>,
///     mut events: EventWriter<CartesianJoypadChanged>,
/// ) {
///     for (entity, mut joypad) in query.iter_mut() {
///         let event = joypad.set_x(0.0);
///         events.send(JoypadChanged { entity, event });
///     }
/// }
/// ```
///
/// ## Systems
///
/// **WARNING:** These systems run during [`PreUpdate`], after [`InputSystem`].
/// If you have systems that care about joypads that also run during this schedule,
/// you must define an ordering between your systems or behavior will be very erratic.
/// The stable labels for these systems are available under the [`JoypadSystem`] enum.
///
/// Complete list:
///
/// - [`collect_pointer`](crate::systems::collect_pointer), which merges touch and mouse input into the [`JoypadPointer`]
///     - labeled [`JoypadSystem::Pointer`]
/// - [`layout_joypads`](crate::systems::layout_joypads), which lays joypads out when their [`JoypadArea`] changes
///     - labeled [`JoypadSystem::Layout`]
/// - [`drag_joypads`](crate::systems::drag_joypads), which presses, drags and releases knobs
///     - labeled [`JoypadSystem::Drag`]
/// - [`animate_joypads`](crate::systems::animate_joypads), which plays return animations
///     - labeled [`JoypadSystem::Animate`]
/// - [`flag_redraws`](crate::systems::flag_redraws) and [`clear_pointer`](crate::systems::clear_pointer)
///     - labeled [`JoypadSystem::Flush`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JoypadPlugin;

impl Plugin for JoypadPlugin {
    fn build(&self, app: &mut App) {
        use crate::systems::*;

        app.configure_sets(
            PreUpdate,
            (
                JoypadSystem::Pointer,
                JoypadSystem::Layout,
                JoypadSystem::Drag,
                JoypadSystem::Animate,
                JoypadSystem::Flush,
            )
                .chain()
                .after(InputSystem),
        )
        .add_systems(PreUpdate, collect_pointer.in_set(JoypadSystem::Pointer))
        .add_systems(
            PreUpdate,
            (
                layout_joypads::<CartesianJoypad>,
                layout_joypads::<PolarJoypad>,
            )
                .in_set(JoypadSystem::Layout),
        )
        .add_systems(
            PreUpdate,
            (
                drag_joypads::<CartesianJoypad>,
                drag_joypads::<PolarJoypad>,
            )
                .in_set(JoypadSystem::Drag),
        )
        .add_systems(
            PreUpdate,
            (
                animate_joypads::<CartesianJoypad>,
                animate_joypads::<PolarJoypad>,
            )
                .in_set(JoypadSystem::Animate),
        )
        .add_systems(
            PreUpdate,
            (
                flag_redraws::<CartesianJoypad>,
                flag_redraws::<PolarJoypad>,
                clear_pointer,
            )
                .in_set(JoypadSystem::Flush),
        );

        // Resources
        app.init_resource::<JoypadPointer>();

        // Events
        app.add_event::<CartesianJoypadChanged>()
            .add_event::<PolarJoypadChanged>();

        // Reflection
        app.register_type::<JoypadPointer>()
            .register_type::<JoypadArea>()
            .register_type::<KnobConstraint>()
            .register_type::<JoypadSettings>()
            .register_type::<JoypadStyle>()
            .register_type::<CartesianEvent>()
            .register_type::<PolarEvent>();
    }
}

/// A [`Plugin`] that draws every joypad with Bevy gizmos
///
/// Requires a 2D camera, and the gizmo plugin that `DefaultPlugins` provides.
#[cfg(feature = "gizmos")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JoypadGizmosPlugin;

#[cfg(feature = "gizmos")]
impl Plugin for JoypadGizmosPlugin {
    fn build(&self, app: &mut App) {
        use crate::systems::draw_joypads;

        app.add_systems(
            bevy::app::Update,
            (
                draw_joypads::<CartesianJoypad>,
                draw_joypads::<PolarJoypad>,
            ),
        );
    }
}

/// [`SystemSet`]s for the [`crate::systems`] used by this crate
///
/// They run in the order they are declared.
#[derive(SystemSet, Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub enum JoypadSystem {
    /// Collects mouse and touch input into the [`JoypadPointer`]
    Pointer,
    /// Lays joypads out for their current [`JoypadArea`]
    Layout,
    /// Applies the pointer to knobs
    Drag,
    /// Advances return animations
    Animate,
    /// Flags redraws and clears the single-frame pointer state
    Flush,
}

/// The rectangle a joypad widget covers, in window logical pixels
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct JoypadArea(pub Rect);

impl JoypadArea {
    /// Creates an area from its top-left corner and size.
    #[must_use]
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self(Rect::from_corners(min, min + size))
    }

    /// The size of the widget.
    #[must_use]
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.0.size()
    }

    /// Converts a window position into the widget-local coordinates joypads work in.
    #[must_use]
    #[inline]
    pub fn local_position(&self, position: Vec2) -> Vec2 {
        position - self.0.min
    }
}

/// This [`Bundle`] spawns a joypad of type `J`, covering a [`JoypadArea`]
#[derive(Bundle, Debug, Clone, Default)]
pub struct JoypadBundle<J: Joypad + Component> {
    /// The joypad state
    pub joypad: J,
    /// Where the joypad is drawn
    pub area: JoypadArea,
}

impl<J: Joypad + Component> JoypadBundle<J> {
    /// Places `joypad` in `area`.
    #[must_use]
    pub fn new(joypad: J, area: JoypadArea) -> Self {
        Self { joypad, area }
    }
}

/// An axis change of the joypad on `entity`
#[derive(Event, Debug, Clone, PartialEq)]
pub struct JoypadChanged<E: Send + Sync + 'static> {
    /// The joypad entity
    pub entity: Entity,
    /// What changed
    pub event: E,
}

/// Sent whenever an axis of a [`CartesianJoypad`] changes
pub type CartesianJoypadChanged = JoypadChanged<CartesianEvent>;

/// Sent whenever an axis of a [`PolarJoypad`] changes
pub type PolarJoypadChanged = JoypadChanged<PolarEvent>;
