//! Inline markup expanded into ANSI SGR escape sequences.
//!
//! This crate compiles named style rules once and then expands markup
//! tags in plain text into terminal escape sequences at render time.
//!
//! # Overview
//!
//! With the default symbols:
//!
//! - `{%name` - Open the rule called `name`
//! - `%}` - Close the innermost open rule
//! - `%@` - Reset, unwinding every open rule
//!
//! A rule has an *inside* part, applied when it opens, and an *after*
//! part, applied when it closes. After parts that are not written out are
//! inferred from the inside part according to the rule set's
//! [`AfterPolicy`]. Closing an inner rule re-applies every rule that is
//! still open, so nested rules compose.
//!
//! # Usage
//!
//! ```
//! use ansi_markup::{Attribute, NamedColor, RuleDefinition, RuleSet};
//!
//! let rules = RuleSet::with_defaults([
//!     ("red", RuleDefinition::new().fg(NamedColor::Red)),
//!     ("em", RuleDefinition::new().enable(Attribute::Italic)),
//! ])
//! .unwrap();
//!
//! assert_eq!(rules.apply("a{%redB%}c"), "a\x1b[31mB\x1b[39mc");
//! assert_eq!(rules.strip("{%emhi%}"), "hi");
//! ```

pub mod after;
pub mod code;
pub mod color;
pub mod definition;
pub mod error;
pub mod parser;
pub mod rule;
pub mod rule_set;
pub mod style;

// Re-export main types at crate root
pub use code::Code;
pub use color::{ColorSpec, ColorTarget, NamedColor};
pub use definition::{AfterPolicy, Part, RuleDefinition};
pub use error::{RuleError, SpecParseError};
pub use rule::{CompiledRule, Phase};
pub use rule_set::{RESET_RULE, RuleSet, RuleSetOptions, Symbols};
pub use style::{Attribute, ResetOperand, ResetTargets, StyleAction};
