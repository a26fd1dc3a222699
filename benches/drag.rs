use bevy::math::Vec2;
use bevy::utils::Duration;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leafwing_joypad::prelude::*;

const SIZE: Vec2 = Vec2::new(200.0, 200.0);

fn drag_in_circles<J: Joypad>(joypad: &mut J, steps: usize) -> usize {
    let center = joypad.geometry().knob_center();
    joypad.press(center);

    let mut changes = 0;
    for step in 0..steps {
        let angle = step as f32 * 0.1;
        changes += joypad.move_to(center + Vec2::from_angle(angle) * 120.0).len();
    }
    joypad.release();
    changes
}

fn play_return<J: Joypad>(joypad: &mut J) -> usize {
    let mut changes = 0;
    while joypad.is_returning() {
        changes += joypad.tick(Duration::from_millis(16)).len();
    }
    changes
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut drag_group = c.benchmark_group("drag");

    let mut cartesian = CartesianJoypad::default();
    cartesian.resize(SIZE);
    drag_group.bench_function("cartesian", |b| {
        b.iter(|| drag_in_circles(black_box(&mut cartesian), 100))
    });

    let mut polar = PolarJoypad::default();
    polar.resize(SIZE);
    drag_group.bench_function("polar", |b| {
        b.iter(|| drag_in_circles(black_box(&mut polar), 100))
    });
    drag_group.finish();

    // The knob starts pinned to the edge for every iteration
    let mut pinned = CartesianJoypad::default();
    pinned.resize(SIZE);
    c.bench_function("return_animation", |b| {
        b.iter(|| {
            pinned.set_x(1.0);
            pinned.set_y(-1.0);
            let center = pinned.geometry().knob_center();
            pinned.press(center);
            pinned.release();
            play_return(black_box(&mut pinned))
        })
    });

    c.bench_function("scene", |b| b.iter(|| black_box(&cartesian).scene()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
