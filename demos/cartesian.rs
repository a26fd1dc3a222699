use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use leafwing_joypad::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        // Reads mouse and touch input, and sends `CartesianJoypadChanged` events
        .add_plugins(JoypadPlugin)
        // Draws the joypad with gizmos
        .add_plugins(JoypadGizmosPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (fit_to_window, report_axes))
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    // The widget is wider than it is tall: the square bounds hug its bottom-left corner
    let joypad = CartesianJoypad::default()
        .with_alignment("bottom | left".parse().unwrap_or_default())
        .with_constraint(KnobConstraint::Circle);
    commands.spawn(JoypadBundle::new(joypad, JoypadArea::default()));
}

/// Keeps the joypad in the lower half of the window
fn fit_to_window(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut areas: Query<&mut JoypadArea>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    let size = window.size();
    for mut area in areas.iter_mut() {
        *area = JoypadArea::new(Vec2::new(0.0, size.y / 2.0), Vec2::new(size.x, size.y / 2.0));
    }
}

fn report_axes(mut events: EventReader<CartesianJoypadChanged>, joypads: Query<&CartesianJoypad>) {
    for changed in events.read() {
        if let Ok(joypad) = joypads.get(changed.entity) {
            info!(
                "{:?}: x = {:.3}, y = {:.3}",
                changed.event,
                joypad.x(),
                joypad.y()
            );
        }
    }
}
