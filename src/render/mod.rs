//! Backend-agnostic drawing of a joypad
//!
//! A joypad describes its appearance as a [`JoypadScene`]: a short list of [`DrawCommand`]s
//! in widget-local pixels. Any [`JoypadPainter`] can then replay the scene.
//!
//! Built-in painters:
//!
//! - `gizmos::GizmoPainter`, drawing with Bevy gizmos (feature `gizmos`).
//! - `egui::EguiPainter`, drawing into an `egui` UI (feature `egui`).

use bevy::color::{Color, Mix, Srgba};
use bevy::math::{Rect, Vec2};
use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};

use crate::geometry::JoypadBounds;
use crate::settings::JoypadStyle;

#[cfg(feature = "egui")]
pub mod egui;
#[cfg(feature = "gizmos")]
pub mod gizmos;

const BACKGROUND_FOCAL_RATIO: f32 = 0.3;
const BACKGROUND_CENTER_RATIO: f32 = 0.7;
const KNOB_FOCAL_RATIO: f32 = 0.2;
const KNOB_CENTER_RATIO: f32 = 0.5;

/// The distance between the rings painters use to approximate a gradient fill, in widget pixels.
pub const RING_SPACING: f32 = 1.5;

/// A two-stop radial gradient
///
/// Points within `focal_radius` of the `center` get the `inner` color,
/// points beyond `center_radius` get the `outer` color,
/// and the ring between them is interpolated linearly.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct RadialGradient {
    /// The center of the gradient.
    pub center: Vec2,
    /// The radius where the gradient starts.
    pub focal_radius: f32,
    /// The radius where the gradient ends.
    pub center_radius: f32,
    /// The color at and inside `focal_radius`.
    pub inner: Color,
    /// The color at and outside `center_radius`.
    pub outer: Color,
}

impl RadialGradient {
    /// The color at `distance` from the gradient center.
    #[must_use]
    pub fn color_at(&self, distance: f32) -> Color {
        let span = self.center_radius - self.focal_radius;
        let t = if span > 0.0 {
            ((distance - self.focal_radius) / span).clamp(0.0, 1.0)
        } else if distance < self.focal_radius {
            0.0
        } else {
            1.0
        };

        Srgba::from(self.inner)
            .mix(&Srgba::from(self.outer), t)
            .into()
    }

    /// Splits a disc of `radius` around the gradient center into rings `spacing` apart,
    /// from the outside in, each paired with its color.
    ///
    /// Painters without native gradients stack these rings to approximate the fill.
    pub fn rings(&self, radius: f32, spacing: f32) -> impl Iterator<Item = (f32, Color)> + '_ {
        let count = if radius > 0.0 && spacing > 0.0 {
            (radius / spacing).ceil() as usize
        } else {
            0
        };

        (0..count).map(move |step| {
            let ring = radius - step as f32 * spacing;
            (ring, self.color_at(ring))
        })
    }
}

/// A stroke color and width
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Pen {
    /// The stroke color.
    pub color: Color,
    /// The stroke width, in pixels.
    pub width: f32,
}

/// A single drawing operation of a [`JoypadScene`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An ellipse inscribed in `rect`, filled with `fill` and outlined with `outline`.
    Ellipse {
        /// The bounding rectangle.
        rect: Rect,
        /// The fill gradient.
        fill: RadialGradient,
        /// The outline stroke.
        outline: Pen,
    },
    /// A straight line segment.
    Line {
        /// The start point.
        from: Vec2,
        /// The end point.
        to: Vec2,
        /// The stroke.
        pen: Pen,
    },
}

/// Everything a painter needs to draw one joypad, in drawing order
///
/// The background disc comes first, then the four crosshair lines,
/// then the knob when the joypad is enabled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoypadScene {
    commands: Vec<DrawCommand>,
}

impl JoypadScene {
    /// Builds the scene for a joypad laid out as `geometry`.
    #[must_use]
    pub fn new(geometry: &JoypadBounds, style: &JoypadStyle, enabled: bool) -> Self {
        let side = geometry.side();
        let center = geometry.center();
        let bounds = geometry.bounds();
        let width = style.stroke_ratio * side;

        let mut commands = Vec::with_capacity(6);
        commands.push(DrawCommand::Ellipse {
            rect: bounds,
            fill: RadialGradient {
                center,
                focal_radius: BACKGROUND_FOCAL_RATIO * side,
                center_radius: BACKGROUND_CENTER_RATIO * side,
                inner: style.background_inner,
                outer: style.background_outer,
            },
            outline: Pen {
                color: style.background_outline,
                width,
            },
        });

        let gap = style.crosshair_gap_ratio * side;
        let pen = Pen {
            color: style.background_outline,
            width,
        };
        let crosshair = [
            (Vec2::new(center.x, bounds.min.y), Vec2::new(center.x, center.y - gap)),
            (Vec2::new(center.x, bounds.max.y), Vec2::new(center.x, center.y + gap)),
            (Vec2::new(bounds.min.x, center.y), Vec2::new(center.x - gap, center.y)),
            (Vec2::new(bounds.max.x, center.y), Vec2::new(center.x + gap, center.y)),
        ];
        commands.extend(crosshair.into_iter().map(|(from, to)| DrawCommand::Line {
            from,
            to,
            pen: pen.clone(),
        }));

        if enabled {
            let knob = geometry.knob();
            let knob_side = knob.width();
            commands.push(DrawCommand::Ellipse {
                rect: knob,
                fill: RadialGradient {
                    center: geometry.knob_center(),
                    focal_radius: KNOB_FOCAL_RATIO * knob_side,
                    center_radius: KNOB_CENTER_RATIO * knob_side,
                    inner: style.knob_inner,
                    outer: style.knob_outer,
                },
                outline: Pen {
                    color: style.knob_outline,
                    width,
                },
            });
        }

        Self { commands }
    }

    /// The drawing operations, in order.
    #[must_use]
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Does this scene include the knob?
    #[must_use]
    pub fn draws_knob(&self) -> bool {
        // The knob is the only ellipse after the background
        self.commands
            .iter()
            .skip(1)
            .any(|command| matches!(command, DrawCommand::Ellipse { .. }))
    }

    /// Replays every command onto `painter`.
    pub fn paint(&self, painter: &mut impl JoypadPainter) {
        for command in &self.commands {
            match command {
                DrawCommand::Ellipse {
                    rect,
                    fill,
                    outline,
                } => painter.fill_ellipse(*rect, fill, outline),
                DrawCommand::Line { from, to, pen } => painter.line(*from, *to, pen),
            }
        }
    }
}

/// A drawing backend able to replay a [`JoypadScene`]
///
/// All coordinates are widget-local pixels, with `y` growing downward.
pub trait JoypadPainter {
    /// Fills the ellipse inscribed in `rect` with `fill`, then strokes its outline.
    fn fill_ellipse(&mut self, rect: Rect, fill: &RadialGradient, outline: &Pen);

    /// Strokes a line segment.
    fn line(&mut self, from: Vec2, to: Vec2, pen: &Pen);
}
