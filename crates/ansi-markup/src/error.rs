//! Error types for rule compilation and token parsing.

use thiserror::Error;

/// Errors that can occur while building a rule set.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleError {
    /// A rule definition is not shaped like a rule record.
    #[error("invalid rule definition `{name}`: {reason}")]
    InvalidDefinition {
        /// Name the rule was registered under.
        name: String,
        /// What is wrong with its shape.
        reason: String,
    },

    /// A rule was registered under an empty name.
    #[error("rule names must not be empty")]
    EmptyName,

    /// A delimiter symbol was configured as the empty string.
    #[error("the {0} symbol must not be empty")]
    EmptySymbol(&'static str),

    /// Two delimiter symbols are the same string.
    #[error("the {0} and {1} symbols must differ")]
    ConflictingSymbols(&'static str, &'static str),
}

/// Errors that can occur when parsing a color, attribute or reset token.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecParseError {
    /// Unknown color name.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// Unknown style attribute name.
    #[error("unknown style attribute: {0}")]
    UnknownAttribute(String),

    /// Unknown reset target name.
    #[error("unknown reset target: {0}")]
    UnknownReset(String),

    /// A numeric color sequence that is neither `[i]` nor `[r, g, b]`.
    #[error("color sequences take 1 or 3 components, got {0}")]
    InvalidComponents(usize),

    /// A color component outside `0..=255`.
    #[error("invalid color component: {0}")]
    InvalidIndex(String),

    /// Unknown after policy keyword.
    #[error("unknown after policy: {0}")]
    UnknownPolicy(String),
}
