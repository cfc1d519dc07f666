//! SGR codes and the resolvers that produce them.
//!
//! Every resolver here is a pure function of its inputs:
//!
//! - [`resolve_color`]: `fg`/`bg` colors, including the extended encodings
//! - [`resolve_style`]: enabling or disabling a text attribute
//! - [`resolve_reset`]: reset targets, or an attribute to disable
//!
//! ```
//! use ansi_markup::code::{resolve_color, escape_sequence};
//! use ansi_markup::{ColorSpec, ColorTarget, NamedColor};
//!
//! let red = resolve_color(&ColorSpec::Named(NamedColor::Red), ColorTarget::Fg);
//! let orange = resolve_color(&ColorSpec::Indexed(208), ColorTarget::Bg);
//! assert_eq!(escape_sequence(&[red, orange]), "\x1b[31m\x1b[48;5;208m");
//! ```

use std::fmt;

use smallvec::{SmallVec, smallvec};

use crate::color::{ColorSpec, ColorTarget};
use crate::style::{Attribute, ResetOperand, ResetTargets, StyleAction};

/// Added to the fg/bg offset to select an extended color (38/48).
pub const EXTENDED_COLOR_OFFSET: u8 = 8;
/// Extended color mode for the 256-color palette.
pub const EXTENDED_MODE_INDEXED: u8 = 5;
/// Extended color mode for 24-bit color.
pub const EXTENDED_MODE_TRUECOLOR: u8 = 2;

/// A single SGR parameter.
///
/// Extended colors are one compound parameter (`38;2;r;g;b`), not several.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Code {
    Single(u8),
    Compound(SmallVec<[u8; 5]>),
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Single(value) => write!(f, "{}", value),
            Code::Compound(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{}", field)?;
                }
                Ok(())
            }
        }
    }
}

impl From<u8> for Code {
    fn from(value: u8) -> Self {
        Code::Single(value)
    }
}

/// Resolve a color for the given target.
pub fn resolve_color(spec: &ColorSpec, target: ColorTarget) -> Code {
    let offset = target.offset();
    match *spec {
        ColorSpec::Named(color) => Code::Single(offset + color.value()),
        ColorSpec::Indexed(index) => Code::Compound(smallvec![
            offset + EXTENDED_COLOR_OFFSET,
            EXTENDED_MODE_INDEXED,
            index
        ]),
        ColorSpec::TrueColor(r, g, b) => Code::Compound(smallvec![
            offset + EXTENDED_COLOR_OFFSET,
            EXTENDED_MODE_TRUECOLOR,
            r,
            g,
            b
        ]),
    }
}

/// Resolve an attribute switch.
pub fn resolve_style(attribute: Attribute, action: StyleAction) -> Code {
    Code::Single(action.offset() + attribute.value())
}

/// Resolve a single reset entry.
///
/// `ALL`, `FG` and `BG` have fixed codes and an attribute resolves to its
/// disable code. Anything else (the `STYLE` group, or several targets at
/// once) has no code of its own.
pub fn resolve_reset(operand: ResetOperand) -> Option<Code> {
    match operand {
        ResetOperand::Attribute(attribute) => Some(resolve_style(attribute, StyleAction::Disable)),
        ResetOperand::Target(target) if target == ResetTargets::ALL => Some(Code::Single(0)),
        ResetOperand::Target(target) if target == ResetTargets::FG => Some(Code::Single(39)),
        ResetOperand::Target(target) if target == ResetTargets::BG => Some(Code::Single(49)),
        ResetOperand::Target(_) => None,
    }
}

/// Join codes into escape sequences, one `ESC [ code m` per code.
pub fn escape_sequence(codes: &[Code]) -> String {
    codes.iter().map(|code| format!("\x1b[{}m", code)).collect()
}
