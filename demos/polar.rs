use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use leafwing_joypad::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(JoypadPlugin)
        .add_plugins(JoypadGizmosPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (fit_to_window, report_axes))
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    // A slower, linear return makes the animation easy to follow
    let settings = JoypadSettings {
        return_duration: std::time::Duration::from_millis(1200),
        return_easing: EasingCurve::Linear,
        ..JoypadSettings::polar()
    };
    commands.spawn(JoypadBundle::new(
        PolarJoypad::with_settings(settings),
        JoypadArea::default(),
    ));
}

/// Centers the joypad in the window
fn fit_to_window(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut areas: Query<&mut JoypadArea>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    for mut area in areas.iter_mut() {
        *area = JoypadArea::new(Vec2::ZERO, window.size());
    }
}

fn report_axes(mut events: EventReader<PolarJoypadChanged>, joypads: Query<&PolarJoypad>) {
    for changed in events.read() {
        if let Ok(joypad) = joypads.get(changed.entity) {
            info!(
                "{:?}: distance = {:.3}, angle = {:.1} degrees",
                changed.event,
                joypad.distance(),
                joypad.angle().to_degrees()
            );
        }
    }
}
