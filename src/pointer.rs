//! A single pointer merged from mouse and touch input

use bevy::ecs::prelude::Resource;
use bevy::input::mouse::MouseButton;
use bevy::input::touch::Touches;
use bevy::input::ButtonInput;
use bevy::math::Vec2;
use bevy::prelude::Reflect;

/// Where the pointer is this frame, and how its button changed
///
/// Positions are window logical pixels, with `y` growing downward.
/// [`collect_pointer`](crate::systems::collect_pointer) fills this in from
/// the first active touch, or from the left mouse button and the cursor.
///
/// The edge flags (`just_pressed`, `just_released`, `moved`) last a single frame.
/// Insert pointer actions by hand with [`press`](Self::press), [`move_to`](Self::move_to)
/// and [`release`](Self::release) to drive joypads in tests.
/// A press followed by a move in the same frame still grabs the knob under the press,
/// since [`press_position`](Self::press_position) is kept apart from the current position.
#[derive(Resource, Debug, Clone, PartialEq, Default, Reflect)]
pub struct JoypadPointer {
    position: Option<Vec2>,
    press_position: Option<Vec2>,
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
    moved: bool,
    touch: Option<u64>,
}

impl JoypadPointer {
    /// The last known pointer position.
    #[must_use]
    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Where the pointer last went down.
    ///
    /// Unlike [`position`](Self::position), moves do not change this.
    #[must_use]
    #[inline]
    pub fn press_position(&self) -> Option<Vec2> {
        self.press_position
    }

    /// Is the pointer held down?
    #[must_use]
    #[inline]
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Did the pointer go down this frame?
    #[must_use]
    #[inline]
    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }

    /// Did the pointer go up this frame?
    #[must_use]
    #[inline]
    pub fn just_released(&self) -> bool {
        self.just_released
    }

    /// Did the pointer move this frame?
    #[must_use]
    #[inline]
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Puts the pointer down at `position`.
    pub fn press(&mut self, position: Vec2) {
        self.position = Some(position);
        self.press_position = Some(position);
        self.pressed = true;
        self.just_pressed = true;
    }

    /// Moves the pointer to `position`, flagging the move if it went anywhere.
    pub fn move_to(&mut self, position: Vec2) {
        if self.position != Some(position) {
            self.position = Some(position);
            self.moved = true;
        }
    }

    /// Lifts the pointer, if it was down.
    pub fn release(&mut self) {
        if self.pressed {
            self.pressed = false;
            self.just_released = true;
        }
    }

    /// Clears the single-frame edge flags.
    pub fn clear(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
        self.moved = false;
    }

    /// Follows the touch that went down first, returning whether a touch is being followed.
    pub fn update_from_touches(&mut self, touches: &Touches) -> bool {
        match self.touch {
            Some(id) => {
                if let Some(touch) = touches.get_pressed(id) {
                    self.move_to(touch.position());
                } else {
                    if let Some(touch) = touches.get_released(id) {
                        self.move_to(touch.position());
                    }
                    self.touch = None;
                    self.release();
                }
                true
            }
            None => match touches.iter_just_pressed().next() {
                Some(touch) => {
                    self.touch = Some(touch.id());
                    self.press(touch.position());
                    true
                }
                None => false,
            },
        }
    }

    /// Follows the left mouse button and the `cursor` position.
    ///
    /// Presses with the cursor outside the window are ignored.
    /// A click that goes down and up within one frame reports both edges.
    pub fn update_from_mouse(&mut self, buttons: &ButtonInput<MouseButton>, cursor: Option<Vec2>) {
        if buttons.just_pressed(MouseButton::Left) {
            if let Some(position) = cursor {
                self.press(position);
            }
        } else if buttons.pressed(MouseButton::Left) {
            if let Some(position) = cursor {
                self.move_to(position);
            }
        } else if let Some(position) = cursor {
            // Hovering keeps the position fresh without flagging a drag
            self.position = Some(position);
        }

        if buttons.just_released(MouseButton::Left) {
            self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::app::App;
    use bevy::ecs::entity::Entity;
    use bevy::input::touch::{TouchInput, TouchPhase};
    use bevy::input::InputPlugin;

    fn touch(app: &mut App, id: u64, phase: TouchPhase, position: Vec2) {
        app.world_mut().send_event(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        });
        app.update();
    }

    #[test]
    fn moves_keep_the_press_position() {
        let mut pointer = JoypadPointer::default();
        pointer.press(Vec2::new(10.0, 20.0));
        pointer.move_to(Vec2::new(-300.0, 20.0));

        assert!(pointer.just_pressed());
        assert!(pointer.moved());
        assert_eq!(pointer.press_position(), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(pointer.position(), Some(Vec2::new(-300.0, 20.0)));

        pointer.clear();
        pointer.release();
        assert_eq!(pointer.press_position(), Some(Vec2::new(10.0, 20.0)));

        pointer.clear();
        pointer.press(Vec2::new(1.0, 2.0));
        assert_eq!(pointer.press_position(), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn click_within_one_frame() {
        let mut pointer = JoypadPointer::default();
        let mut buttons = ButtonInput::<MouseButton>::default();
        let cursor = Some(Vec2::new(5.0, 5.0));

        buttons.press(MouseButton::Left);
        buttons.release(MouseButton::Left);
        pointer.update_from_mouse(&buttons, cursor);
        assert!(pointer.just_pressed());
        assert!(pointer.just_released());
        assert!(!pointer.pressed());

        for _ in 0..3 {
            pointer.clear();
            buttons.clear();
            pointer.update_from_mouse(&buttons, cursor);
            assert!(!pointer.pressed());
            assert!(!pointer.just_pressed());
            assert!(!pointer.just_released());
        }
    }

    #[test]
    fn follows_the_first_touch() {
        let mut app = App::new();
        app.add_plugins(InputPlugin);
        let mut pointer = JoypadPointer::default();

        touch(&mut app, 7, TouchPhase::Started, Vec2::new(10.0, 10.0));
        assert!(pointer.update_from_touches(app.world().resource::<Touches>()));
        assert!(pointer.just_pressed());
        assert_eq!(pointer.press_position(), Some(Vec2::new(10.0, 10.0)));

        // A second finger is ignored while the first one is down
        pointer.clear();
        touch(&mut app, 8, TouchPhase::Started, Vec2::new(90.0, 90.0));
        assert!(pointer.update_from_touches(app.world().resource::<Touches>()));
        assert!(!pointer.just_pressed());
        assert!(!pointer.moved());

        pointer.clear();
        touch(&mut app, 7, TouchPhase::Moved, Vec2::new(30.0, 10.0));
        assert!(pointer.update_from_touches(app.world().resource::<Touches>()));
        assert!(pointer.moved());
        assert_eq!(pointer.position(), Some(Vec2::new(30.0, 10.0)));
        assert_eq!(pointer.press_position(), Some(Vec2::new(10.0, 10.0)));

        pointer.clear();
        touch(&mut app, 7, TouchPhase::Ended, Vec2::new(30.0, 10.0));
        assert!(pointer.update_from_touches(app.world().resource::<Touches>()));
        assert!(pointer.just_released());
        assert!(!pointer.pressed());

        // The released touch is forgotten, and the next one is picked up
        pointer.clear();
        app.update();
        let touches = app.world().resource::<Touches>();
        assert!(!pointer.update_from_touches(touches));

        touch(&mut app, 9, TouchPhase::Started, Vec2::new(50.0, 60.0));
        assert!(pointer.update_from_touches(app.world().resource::<Touches>()));
        assert!(pointer.just_pressed());
        assert_eq!(pointer.position(), Some(Vec2::new(50.0, 60.0)));
    }

    #[test]
    fn edges_last_one_frame() {
        let mut pointer = JoypadPointer::default();
        pointer.press(Vec2::new(10.0, 20.0));
        assert!(pointer.pressed());
        assert!(pointer.just_pressed());
        assert_eq!(pointer.position(), Some(Vec2::new(10.0, 20.0)));

        pointer.clear();
        assert!(pointer.pressed());
        assert!(!pointer.just_pressed());

        pointer.move_to(Vec2::new(10.0, 20.0));
        assert!(!pointer.moved());
        pointer.move_to(Vec2::new(15.0, 20.0));
        assert!(pointer.moved());

        pointer.release();
        assert!(pointer.just_released());
        assert!(!pointer.pressed());
    }

    #[test]
    fn release_without_press_is_silent() {
        let mut pointer = JoypadPointer::default();
        pointer.release();
        assert!(!pointer.just_released());
    }

    #[test]
    fn mouse_drag() {
        let mut pointer = JoypadPointer::default();
        let mut buttons = ButtonInput::<MouseButton>::default();

        buttons.press(MouseButton::Left);
        pointer.update_from_mouse(&buttons, Some(Vec2::new(5.0, 5.0)));
        assert!(pointer.just_pressed());

        pointer.clear();
        buttons.clear();
        pointer.update_from_mouse(&buttons, Some(Vec2::new(8.0, 5.0)));
        assert!(pointer.moved());
        assert_eq!(pointer.position(), Some(Vec2::new(8.0, 5.0)));

        pointer.clear();
        buttons.release(MouseButton::Left);
        pointer.update_from_mouse(&buttons, Some(Vec2::new(8.0, 5.0)));
        assert!(pointer.just_released());
    }

    #[test]
    fn mouse_press_outside_window() {
        let mut pointer = JoypadPointer::default();
        let mut buttons = ButtonInput::<MouseButton>::default();

        buttons.press(MouseButton::Left);
        pointer.update_from_mouse(&buttons, None);
        assert!(!pointer.pressed());
    }

    #[test]
    fn hovering_is_not_a_move() {
        let mut pointer = JoypadPointer::default();
        let buttons = ButtonInput::<MouseButton>::default();

        pointer.update_from_mouse(&buttons, Some(Vec2::new(3.0, 4.0)));
        assert_eq!(pointer.position(), Some(Vec2::new(3.0, 4.0)));
        assert!(!pointer.moved());
    }

    #[test]
    fn no_touches() {
        let mut pointer = JoypadPointer::default();
        assert!(!pointer.update_from_touches(&Touches::default()));
        assert_eq!(pointer, JoypadPointer::default());
    }
}
