//! Draws joypad scenes with Bevy [`Gizmos`]

use bevy::gizmos::prelude::Gizmos;
use bevy::math::{Rect, Vec2};

use super::{JoypadPainter, Pen, RadialGradient, RING_SPACING};

/// A [`JoypadPainter`] drawing in 2D world space through [`Gizmos`]
///
/// Widget-local points are mapped as `origin + scale * (x, -y)`,
/// so `origin` is the world position of the widget's top-left corner
/// and `scale` is the world size of one widget pixel.
/// Gizmo lines have no width, so pen widths are ignored.
pub struct GizmoPainter<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    origin: Vec2,
    scale: f32,
}

impl<'a, 'w, 's> GizmoPainter<'a, 'w, 's> {
    /// Creates a painter placing the widget's top-left corner at `origin`.
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, origin: Vec2, scale: f32) -> Self {
        Self {
            gizmos,
            origin,
            scale,
        }
    }

    fn to_world(&self, point: Vec2) -> Vec2 {
        self.origin + self.scale * Vec2::new(point.x, -point.y)
    }
}

impl JoypadPainter for GizmoPainter<'_, '_, '_> {
    fn fill_ellipse(&mut self, rect: Rect, fill: &RadialGradient, outline: &Pen) {
        let center = self.to_world(rect.center());
        let radius = rect.width().min(rect.height()) / 2.0;

        for (ring, color) in fill.rings(radius, RING_SPACING) {
            self.gizmos.circle_2d(center, ring * self.scale, color);
        }
        self.gizmos
            .circle_2d(center, radius * self.scale, outline.color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, pen: &Pen) {
        let from = self.to_world(from);
        let to = self.to_world(to);
        self.gizmos.line_2d(from, to, pen.color);
    }
}
