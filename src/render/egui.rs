//! Draws and drives joypads inside an `egui` UI

use bevy::color::Color;
use bevy::math::{Rect, Vec2};
use bevy::utils::Duration;
use bevy_egui::egui::{self, Color32, Pos2, Response, Sense, Stroke, Ui, Widget};

use super::{JoypadPainter, Pen, RadialGradient, RING_SPACING};
use crate::Joypad;

/// A [`JoypadPainter`] drawing through an [`egui::Painter`]
///
/// Widget-local points are offset by `origin`, the screen position of the widget's top-left corner.
pub struct EguiPainter<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
}

impl<'a> EguiPainter<'a> {
    /// Creates a painter placing the widget's top-left corner at `origin`.
    pub fn new(painter: &'a egui::Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }

    fn to_screen(&self, point: Vec2) -> Pos2 {
        self.origin + egui::vec2(point.x, point.y)
    }
}

impl JoypadPainter for EguiPainter<'_> {
    fn fill_ellipse(&mut self, rect: Rect, fill: &RadialGradient, outline: &Pen) {
        let center = self.to_screen(rect.center());
        let radius = rect.width().min(rect.height()) / 2.0;

        for (ring, color) in fill.rings(radius, RING_SPACING) {
            self.painter.circle_filled(center, ring, color32(color));
        }
        self.painter.circle_stroke(
            center,
            radius,
            Stroke::new(outline.width, color32(outline.color)),
        );
    }

    fn line(&mut self, from: Vec2, to: Vec2, pen: &Pen) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(pen.width, color32(pen.color)),
        );
    }
}

fn color32(color: Color) -> Color32 {
    let [r, g, b, a] = color.to_srgba().to_u8_array();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// An [`egui::Widget`] that lays out, drives and paints a joypad
///
/// Axis changes caused by the pointer or the return animation are appended to `events`.
///
/// ```rust,ignore
/// let mut events = Vec::new();
/// ui.add(JoypadWidget::new(&mut joypad, &mut events).size(160.0));
/// ```
pub struct JoypadWidget<'a, J: Joypad> {
    joypad: &'a mut J,
    events: &'a mut Vec<J::Event>,
    size: egui::Vec2,
}

impl<'a, J: Joypad> JoypadWidget<'a, J> {
    /// Creates a 192 pixel square widget.
    pub fn new(joypad: &'a mut J, events: &'a mut Vec<J::Event>) -> Self {
        Self {
            joypad,
            events,
            size: egui::Vec2::splat(192.0),
        }
    }

    /// Sets the side of the square widget.
    #[must_use]
    pub fn size(mut self, side: f32) -> Self {
        self.size = egui::Vec2::splat(side);
        self
    }
}

impl<J: Joypad> Widget for JoypadWidget<'_, J> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::drag());
        let local = |pos: Pos2| Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);

        let size = Vec2::new(rect.width(), rect.height());
        if self.joypad.size() != size {
            self.joypad.resize(size);
        }

        // Drags start past a small threshold, so press where the pointer went down
        if response.drag_started() {
            if let Some(origin) = ui.input(|input| input.pointer.press_origin()) {
                self.joypad.press(local(origin));
            }
        }
        if response.dragged() {
            if let Some(position) = response.interact_pointer_pos() {
                self.events.extend(self.joypad.move_to(local(position)));
            }
        }
        if response.drag_stopped() {
            self.joypad.release();
        }

        let delta = ui.input(|input| input.stable_dt).max(0.0);
        self.events
            .extend(self.joypad.tick(Duration::from_secs_f32(delta)));
        if self.joypad.is_returning() {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            self.joypad
                .scene()
                .paint(&mut EguiPainter::new(&painter, rect.min));
        }

        response
    }
}
