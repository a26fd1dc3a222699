//! Where a joypad's square bounds sit inside a non-square widget

use std::str::FromStr;

use bevy::math::{Rect, Vec2};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::errors::AlignmentParseError;

bitflags! {
    /// Layout flags for the square bounds of a [`CartesianJoypad`](crate::cartesian::CartesianJoypad)
    ///
    /// Combine one vertical flag ([`TOP`](Self::TOP), [`VCENTER`](Self::VCENTER), [`BOTTOM`](Self::BOTTOM))
    /// with one horizontal flag ([`LEFT`](Self::LEFT), [`HCENTER`](Self::HCENTER), [`RIGHT`](Self::RIGHT)).
    ///
    /// When several flags of one direction are set, they are tested in the order listed above and
    /// the first one wins. When none is set, the bounds hug the top (or left) edge.
    ///
    /// ```rust
    /// use bevy::math::Vec2;
    /// use leafwing_joypad::alignment::JoypadAlignment;
    ///
    /// let alignment: JoypadAlignment = "bottom | hcenter".parse().unwrap();
    /// assert_eq!(alignment, JoypadAlignment::BOTTOM | JoypadAlignment::HCENTER);
    ///
    /// // A 300x100 widget gets a 100x100 square, centered horizontally
    /// let bounds = alignment.square_bounds(Vec2::new(300.0, 100.0));
    /// assert_eq!(bounds.min, Vec2::new(100.0, 0.0));
    /// assert_eq!(bounds.size(), Vec2::splat(100.0));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct JoypadAlignment: u8 {
        /// Hug the top edge.
        const TOP = 1 << 0;
        /// Center vertically.
        const VCENTER = 1 << 1;
        /// Hug the bottom edge.
        const BOTTOM = 1 << 2;
        /// Hug the left edge.
        const LEFT = 1 << 3;
        /// Center horizontally.
        const HCENTER = 1 << 4;
        /// Hug the right edge.
        const RIGHT = 1 << 5;
        /// Center in both directions.
        const CENTER = Self::VCENTER.bits() | Self::HCENTER.bits();
    }
}

impl Default for JoypadAlignment {
    /// Top-left, matching a widget that has never been told otherwise.
    fn default() -> Self {
        Self::TOP | Self::LEFT
    }
}

impl JoypadAlignment {
    /// Computes the largest square that fits into a widget of the given `size`,
    /// placed according to these flags.
    ///
    /// The returned [`Rect`] is in widget-local coordinates, with the origin at the top-left corner.
    #[must_use]
    pub fn square_bounds(&self, size: Vec2) -> Rect {
        let side = size.min_element().max(0.0);

        let top = if self.contains(Self::TOP) {
            0.0
        } else if self.contains(Self::VCENTER) {
            (size.y - side) / 2.0
        } else if self.contains(Self::BOTTOM) {
            size.y - side
        } else {
            0.0
        };

        let left = if self.contains(Self::LEFT) {
            0.0
        } else if self.contains(Self::HCENTER) {
            (size.x - side) / 2.0
        } else if self.contains(Self::RIGHT) {
            size.x - side
        } else {
            0.0
        };

        let min = Vec2::new(left, top);
        Rect::from_corners(min, min + Vec2::splat(side))
    }
}

impl FromStr for JoypadAlignment {
    type Err = AlignmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut alignment = Self::empty();

        for flag in s.split('|').map(str::trim).filter(|flag| !flag.is_empty()) {
            alignment |= match flag.to_ascii_lowercase().as_str() {
                "top" => Self::TOP,
                "vcenter" => Self::VCENTER,
                "bottom" => Self::BOTTOM,
                "left" => Self::LEFT,
                "hcenter" => Self::HCENTER,
                "right" => Self::RIGHT,
                "center" => Self::CENTER,
                _ => {
                    return Err(AlignmentParseError {
                        flag: flag.to_string(),
                    })
                }
            };
        }

        Ok(alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: Vec2 = Vec2::new(400.0, 100.0);
    const TALL: Vec2 = Vec2::new(100.0, 400.0);

    #[test]
    fn default_is_top_left() {
        let bounds = JoypadAlignment::default().square_bounds(TALL);
        assert_eq!(bounds.min, Vec2::ZERO);
        assert_eq!(bounds.size(), Vec2::splat(100.0));
    }

    #[test]
    fn vertical_flags() {
        let top = JoypadAlignment::TOP.square_bounds(TALL);
        assert_eq!(top.min.y, 0.0);

        let center = JoypadAlignment::VCENTER.square_bounds(TALL);
        assert_eq!(center.min.y, 150.0);

        let bottom = JoypadAlignment::BOTTOM.square_bounds(TALL);
        assert_eq!(bottom.min.y, 300.0);
        assert_eq!(bottom.max.y, 400.0);
    }

    #[test]
    fn horizontal_flags() {
        let left = JoypadAlignment::LEFT.square_bounds(WIDE);
        assert_eq!(left.min.x, 0.0);

        let center = JoypadAlignment::HCENTER.square_bounds(WIDE);
        assert_eq!(center.min.x, 150.0);

        let right = JoypadAlignment::RIGHT.square_bounds(WIDE);
        assert_eq!(right.min.x, 300.0);
    }

    #[test]
    fn first_flag_wins() {
        let alignment = JoypadAlignment::TOP | JoypadAlignment::BOTTOM;
        assert_eq!(alignment.square_bounds(TALL).min.y, 0.0);

        let alignment = JoypadAlignment::HCENTER | JoypadAlignment::RIGHT;
        assert_eq!(alignment.square_bounds(WIDE).min.x, 150.0);
    }

    #[test]
    fn missing_direction_hugs_origin() {
        let bounds = JoypadAlignment::RIGHT.square_bounds(Vec2::new(400.0, 400.0));
        assert_eq!(bounds.min, Vec2::ZERO);

        let bounds = JoypadAlignment::BOTTOM.square_bounds(WIDE);
        assert_eq!(bounds.min, Vec2::ZERO);
    }

    #[test]
    fn parse_flags() {
        assert_eq!(
            "Top|Left".parse::<JoypadAlignment>(),
            Ok(JoypadAlignment::default())
        );
        assert_eq!(
            " center ".parse::<JoypadAlignment>(),
            Ok(JoypadAlignment::CENTER)
        );
        assert_eq!("".parse::<JoypadAlignment>(), Ok(JoypadAlignment::empty()));
        assert_eq!(
            "top | middle".parse::<JoypadAlignment>(),
            Err(AlignmentParseError {
                flag: "middle".to_string()
            })
        );
    }

    #[test]
    fn alignment_serde() {
        use serde_test::{assert_tokens, Configure, Token};

        let alignment = JoypadAlignment::default();
        assert_tokens(&alignment.readable(), &[Token::Str("TOP | LEFT")]);
        assert_tokens(&alignment.compact(), &[Token::U8(9)]);

        let centered = JoypadAlignment::CENTER;
        assert_tokens(&centered.compact(), &[Token::U8(18)]);
    }
}
