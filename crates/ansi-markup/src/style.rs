//! Style attributes and reset targets.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use phf::phf_map;

use crate::error::SpecParseError;

/// A text attribute that can be switched on or off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Bold/increased intensity (alias: `intense`).
    Bold,
    /// Dim/decreased intensity (alias: `dark`).
    Dim,
    Italic,
    Underline,
    /// Reverse video (swap fg/bg).
    Inverse,
    Hidden,
    Strikethrough,
}

static ATTRIBUTE_NAMES: phf::Map<&'static str, Attribute> = phf_map! {
    "bold" => Attribute::Bold,
    "intense" => Attribute::Bold,
    "dim" => Attribute::Dim,
    "dark" => Attribute::Dim,
    "italic" => Attribute::Italic,
    "underline" => Attribute::Underline,
    "inverse" => Attribute::Inverse,
    "hidden" => Attribute::Hidden,
    "strikethrough" => Attribute::Strikethrough,
};

impl Attribute {
    /// Every attribute, in code order.
    pub const ALL: [Attribute; 7] = [
        Attribute::Bold,
        Attribute::Dim,
        Attribute::Italic,
        Attribute::Underline,
        Attribute::Inverse,
        Attribute::Hidden,
        Attribute::Strikethrough,
    ];

    /// Base SGR value; the disable code adds 20.
    pub fn value(self) -> u8 {
        match self {
            Attribute::Bold => 1,
            Attribute::Dim => 2,
            Attribute::Italic => 3,
            Attribute::Underline => 4,
            Attribute::Inverse => 7,
            Attribute::Hidden => 8,
            Attribute::Strikethrough => 9,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Bold => "bold",
            Attribute::Dim => "dim",
            Attribute::Italic => "italic",
            Attribute::Underline => "underline",
            Attribute::Inverse => "inverse",
            Attribute::Hidden => "hidden",
            Attribute::Strikethrough => "strikethrough",
        }
    }
}

impl FromStr for Attribute {
    type Err = SpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ATTRIBUTE_NAMES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| SpecParseError::UnknownAttribute(s.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an attribute is being switched on or off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleAction {
    Enable,
    Disable,
}

impl StyleAction {
    /// Offset added to the attribute value (0 or 20).
    pub fn offset(self) -> u8 {
        match self {
            StyleAction::Enable => 0,
            StyleAction::Disable => 20,
        }
    }
}

bitflags! {
    /// Targets a `reset` or `keep` entry may name.
    ///
    /// `ALL` is kept as its own bit so an unexpanded "reset everything"
    /// can still be emitted as the single code `0`.
    ///
    /// # Example
    ///
    /// ```
    /// use ansi_markup::ResetTargets;
    ///
    /// let targets = ResetTargets::ALL.expand();
    /// assert_eq!(targets, ResetTargets::FG | ResetTargets::BG | ResetTargets::STYLE);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResetTargets: u8 {
        /// Everything (SGR 0)
        const ALL   = 0b0001;
        /// Foreground color (SGR 39)
        const FG    = 0b0010;
        /// Background color (SGR 49)
        const BG    = 0b0100;
        /// Style attributes, as a group
        const STYLE = 0b1000;
    }
}

impl ResetTargets {
    /// Replace `ALL` with the concrete targets it stands for.
    pub fn expand(self) -> Self {
        if self.contains(ResetTargets::ALL) {
            (self - ResetTargets::ALL) | ResetTargets::FG | ResetTargets::BG | ResetTargets::STYLE
        } else {
            self
        }
    }
}

impl FromStr for ResetTargets {
    type Err = SpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ResetTargets::ALL),
            "fg" => Ok(ResetTargets::FG),
            "bg" => Ok(ResetTargets::BG),
            "style" => Ok(ResetTargets::STYLE),
            _ => Err(SpecParseError::UnknownReset(s.to_string())),
        }
    }
}

/// An entry of a `reset` list: a reset target, or an attribute to disable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResetOperand {
    Target(ResetTargets),
    Attribute(Attribute),
}

impl From<ResetTargets> for ResetOperand {
    fn from(targets: ResetTargets) -> Self {
        ResetOperand::Target(targets)
    }
}

impl From<Attribute> for ResetOperand {
    fn from(attribute: Attribute) -> Self {
        ResetOperand::Attribute(attribute)
    }
}

impl FromStr for ResetOperand {
    type Err = SpecParseError;

    /// Reset target names win over attribute names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(targets) = s.parse::<ResetTargets>() {
            return Ok(ResetOperand::Target(targets));
        }
        s.parse::<Attribute>()
            .map(ResetOperand::Attribute)
            .map_err(|_| SpecParseError::UnknownReset(s.to_string()))
    }
}
