//! Color types for rule definitions.
//!
//! Supports the eight base ANSI colors, the 256-color palette and 24-bit
//! truecolor.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;

use crate::error::SpecParseError;

/// The eight base ANSI colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

static COLOR_NAMES: phf::Map<&'static str, NamedColor> = phf_map! {
    "black" => NamedColor::Black,
    "red" => NamedColor::Red,
    "green" => NamedColor::Green,
    "yellow" => NamedColor::Yellow,
    "blue" => NamedColor::Blue,
    "magenta" => NamedColor::Magenta,
    "cyan" => NamedColor::Cyan,
    "white" => NamedColor::White,
};

impl NamedColor {
    /// All base colors, in palette order.
    pub const ALL: [NamedColor; 8] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
    ];

    /// Palette value, added to the fg/bg offset.
    pub fn value(self) -> u8 {
        match self {
            NamedColor::Black => 0,
            NamedColor::Red => 1,
            NamedColor::Green => 2,
            NamedColor::Yellow => 3,
            NamedColor::Blue => 4,
            NamedColor::Magenta => 5,
            NamedColor::Cyan => 6,
            NamedColor::White => 7,
        }
    }

    /// Lowercase identifier used in markup and rule sheets.
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Blue => "blue",
            NamedColor::Magenta => "magenta",
            NamedColor::Cyan => "cyan",
            NamedColor::White => "white",
        }
    }
}

impl FromStr for NamedColor {
    type Err = SpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COLOR_NAMES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| SpecParseError::UnknownColor(s.to_string()))
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of a cell a color applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorTarget {
    /// Foreground (text) color.
    Fg,
    /// Background color.
    Bg,
}

impl ColorTarget {
    /// Base SGR offset for this target (30 or 40).
    pub fn offset(self) -> u8 {
        match self {
            ColorTarget::Fg => 30,
            ColorTarget::Bg => 40,
        }
    }
}

/// A color value as written in a rule definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpec {
    /// One of the eight base colors.
    Named(NamedColor),
    /// Entry of the 256-color palette.
    Indexed(u8),
    /// 24-bit color.
    TrueColor(u8, u8, u8),
}

impl ColorSpec {
    /// Build a color from a numeric sequence.
    ///
    /// One component selects a 256-color palette entry, three components
    /// select a truecolor value. Any other arity is rejected.
    ///
    /// ```
    /// use ansi_markup::ColorSpec;
    ///
    /// assert_eq!(ColorSpec::from_components(&[208]).unwrap(), ColorSpec::Indexed(208));
    /// assert_eq!(
    ///     ColorSpec::from_components(&[30, 80, 128]).unwrap(),
    ///     ColorSpec::TrueColor(30, 80, 128)
    /// );
    /// assert!(ColorSpec::from_components(&[1, 2]).is_err());
    /// ```
    pub fn from_components(components: &[u8]) -> Result<Self, SpecParseError> {
        match *components {
            [index] => Ok(ColorSpec::Indexed(index)),
            [r, g, b] => Ok(ColorSpec::TrueColor(r, g, b)),
            _ => Err(SpecParseError::InvalidComponents(components.len())),
        }
    }
}

impl From<NamedColor> for ColorSpec {
    fn from(color: NamedColor) -> Self {
        ColorSpec::Named(color)
    }
}

impl From<u8> for ColorSpec {
    fn from(index: u8) -> Self {
        ColorSpec::Indexed(index)
    }
}

impl From<[u8; 3]> for ColorSpec {
    fn from([r, g, b]: [u8; 3]) -> Self {
        ColorSpec::TrueColor(r, g, b)
    }
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorSpec::TrueColor(r, g, b)
    }
}

impl FromStr for ColorSpec {
    type Err = SpecParseError;

    /// Parses a named color or a bare palette index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            return s
                .parse::<u8>()
                .map(ColorSpec::Indexed)
                .map_err(|_| SpecParseError::InvalidIndex(s.to_string()));
        }
        s.parse::<NamedColor>().map(ColorSpec::Named)
    }
}
