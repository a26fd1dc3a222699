//! The systems that power the [`JoypadPlugin`](crate::plugin::JoypadPlugin).
//!
//! Joypad state is mutated without tripping Bevy change detection;
//! [`flag_redraws`] marks a joypad as changed only when its appearance did.

use bevy::ecs::prelude::*;
use bevy::input::mouse::MouseButton;
use bevy::input::touch::Touches;
use bevy::input::ButtonInput;
use bevy::log::trace;
use bevy::time::Time;
use bevy::window::{PrimaryWindow, Window};

use crate::plugin::{JoypadArea, JoypadChanged};
use crate::pointer::JoypadPointer;
use crate::Joypad;

#[cfg(feature = "gizmos")]
use crate::render::gizmos::GizmoPainter;
#[cfg(feature = "gizmos")]
use bevy::{
    gizmos::prelude::Gizmos,
    math::Vec2,
    render::camera::Camera,
    transform::components::GlobalTransform,
};

/// Reads touch and mouse input into the [`JoypadPointer`].
///
/// Touches take priority: while a finger is down, the mouse is ignored.
/// Without a primary window there is nothing to read,
/// and the pointer is left as is so that it can be driven by hand.
pub fn collect_pointer(
    mut pointer: ResMut<JoypadPointer>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if let Some(touches) = touches {
        if pointer.update_from_touches(&touches) {
            return;
        }
    }

    if let Some(mouse_buttons) = mouse_buttons {
        pointer.update_from_mouse(&mouse_buttons, window.cursor_position());
    }
}

/// Lays joypads out again whenever their [`JoypadArea`] is added or changed.
pub fn layout_joypads<J: Joypad + Component>(
    mut query: Query<(&JoypadArea, &mut J), Changed<JoypadArea>>,
) {
    for (area, mut joypad) in query.iter_mut() {
        joypad.bypass_change_detection().resize(area.size());
    }
}

/// Presses, drags and releases knobs according to the [`JoypadPointer`],
/// sending a [`JoypadChanged`] event for every axis change.
pub fn drag_joypads<J: Joypad + Component>(
    pointer: Res<JoypadPointer>,
    mut query: Query<(Entity, &JoypadArea, &mut J)>,
    mut events: EventWriter<JoypadChanged<J::Event>>,
) {
    for (entity, area, mut joypad) in query.iter_mut() {
        let joypad = joypad.bypass_change_detection();

        // Hit test where the pointer went down, even if it has moved since
        if pointer.just_pressed() {
            if let Some(origin) = pointer.press_position() {
                if joypad.press(area.local_position(origin)) {
                    trace!(?entity, "joypad grabbed");
                }
            }
        }

        if pointer.moved() && (pointer.pressed() || pointer.just_released()) {
            if let Some(position) = pointer.position() {
                events.send_batch(
                    joypad
                        .move_to(area.local_position(position))
                        .into_iter()
                        .map(|event| JoypadChanged { entity, event }),
                );
            }
        }

        if pointer.just_released() {
            joypad.release();
        }
    }
}

/// Advances return animations by the frame time, sending a [`JoypadChanged`] event for every step.
pub fn animate_joypads<J: Joypad + Component>(
    time: Res<Time>,
    mut query: Query<(Entity, &mut J)>,
    mut events: EventWriter<JoypadChanged<J::Event>>,
) {
    let delta = time.delta();

    for (entity, mut joypad) in query.iter_mut() {
        let joypad = joypad.bypass_change_detection();
        if !joypad.is_returning() {
            continue;
        }

        events.send_batch(
            joypad
                .tick(delta)
                .into_iter()
                .map(|event| JoypadChanged { entity, event }),
        );
    }
}

/// Marks joypads whose appearance changed this frame, so that `Changed<J>` filters see them.
pub fn flag_redraws<J: Joypad + Component>(mut query: Query<&mut J>) {
    for mut joypad in query.iter_mut() {
        if joypad.bypass_change_detection().take_redraw() {
            joypad.set_changed();
        }
    }
}

/// Clears the single-frame flags of the [`JoypadPointer`].
pub fn clear_pointer(mut pointer: ResMut<JoypadPointer>) {
    pointer.clear();
}

/// Draws every joypad with gizmos, through the first active camera.
#[cfg(feature = "gizmos")]
pub fn draw_joypads<J: Joypad + Component>(
    mut gizmos: Gizmos,
    cameras: Query<(&Camera, &GlobalTransform)>,
    query: Query<(&JoypadArea, &J)>,
) {
    let Some((camera, transform)) = cameras.iter().find(|(camera, _)| camera.is_active) else {
        return;
    };

    for (area, joypad) in query.iter() {
        let corner = area.0.min;
        let (Some(origin), Some(unit)) = (
            camera.viewport_to_world_2d(transform, corner),
            camera.viewport_to_world_2d(transform, corner + Vec2::X),
        ) else {
            continue;
        };

        let scale = origin.distance(unit);
        joypad
            .scene()
            .paint(&mut GizmoPainter::new(&mut gizmos, origin, scale));
    }
}
