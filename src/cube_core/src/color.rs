use std::{fmt, ops::Index, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::face::Face;

/// The color of a single facelet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Yellow,
    Red,
    Orange,
    Blue,
    Green,
}

impl Color {
    pub const ALL: [Self; 6] = [
        Color::White,
        Color::Yellow,
        Color::Red,
        Color::Orange,
        Color::Blue,
        Color::Green,
    ];

    /// The name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Blue => "blue",
            Color::Green => "green",
        }
    }

    /// Initial used when drawing the cube as text.
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Green => 'G',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemeError {
    #[error("Color {color} is assigned to both {first:?} and {second:?}")]
    DuplicateColor { color: Color, first: Face, second: Face },
}

/// Which color each face shows when the cube is solved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemeRepr", into = "SchemeRepr")]
pub struct ColorScheme([Color; 6]);

impl ColorScheme {
    /// Build a scheme from colors listed in canonical face order.
    ///
    /// # Errors
    ///
    /// If two faces are given the same color.
    pub fn new(colors: [Color; 6]) -> Result<ColorScheme, SchemeError> {
        for (i, a) in colors.iter().enumerate() {
            if let Some(j) = colors[i + 1..].iter().position(|b| b == a) {
                return Err(SchemeError::DuplicateColor {
                    color: *a,
                    first: Face::ALL[i],
                    second: Face::ALL[i + 1 + j],
                });
            }
        }

        Ok(ColorScheme(colors))
    }

    pub fn colors(&self) -> [Color; 6] {
        self.0
    }

    /// The face that shows `color` when solved.
    pub fn face_of(&self, color: Color) -> Face {
        let i = self
            .0
            .iter()
            .position(|&c| c == color)
            .expect("a scheme assigns every color to exactly one face");
        Face::ALL[i]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme([
            Color::Blue,
            Color::Green,
            Color::White,
            Color::Yellow,
            Color::Red,
            Color::Orange,
        ])
    }
}

impl Index<Face> for ColorScheme {
    type Output = Color;

    fn index(&self, index: Face) -> &Self::Output {
        &self.0[index as usize]
    }
}

#[derive(Serialize, Deserialize)]
struct SchemeRepr {
    right: Color,
    left: Color,
    up: Color,
    down: Color,
    front: Color,
    back: Color,
}

impl TryFrom<SchemeRepr> for ColorScheme {
    type Error = SchemeError;

    fn try_from(value: SchemeRepr) -> Result<Self, Self::Error> {
        ColorScheme::new([
            value.right,
            value.left,
            value.up,
            value.down,
            value.front,
            value.back,
        ])
    }
}

impl From<ColorScheme> for SchemeRepr {
    fn from(value: ColorScheme) -> Self {
        SchemeRepr {
            right: value[Face::Right],
            left: value[Face::Left],
            up: value[Face::Up],
            down: value[Face::Down],
            front: value[Face::Front],
            back: value[Face::Back],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme[Face::Up], Color::White);
        assert_eq!(scheme[Face::Front], Color::Red);
        assert_eq!(scheme[Face::Back], Color::Orange);
        assert_eq!(scheme.face_of(Color::Green), Face::Left);
    }

    #[test]
    fn duplicate_colors_are_rejected() {
        let err = ColorScheme::new([
            Color::Blue,
            Color::Green,
            Color::White,
            Color::Yellow,
            Color::Blue,
            Color::Orange,
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SchemeError::DuplicateColor {
                color: Color::Blue,
                first: Face::Right,
                second: Face::Front,
            }
        );
    }

    #[test]
    fn scheme_from_toml() {
        let scheme: ColorScheme = toml::from_str(
            r#"
            right = "red"
            left = "orange"
            up = "yellow"
            down = "white"
            front = "green"
            back = "blue"
            "#,
        )
        .unwrap();
        assert_eq!(scheme[Face::Right], Color::Red);
        assert_eq!(scheme[Face::Back], Color::Blue);

        let duplicate = toml::from_str::<ColorScheme>(
            r#"
            right = "red"
            left = "red"
            up = "yellow"
            down = "white"
            front = "green"
            back = "blue"
            "#,
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn names_round_trip() {
        for color in Color::ALL {
            assert_eq!(color.name().parse::<Color>(), Ok(color));
        }
        assert!("purple".parse::<Color>().is_err());
    }
}
