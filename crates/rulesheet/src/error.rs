//! Error types for rule sheet parsing.

use ansi_markup::RuleError;
use thiserror::Error;

/// Errors that can occur while reading a rule sheet.
///
/// # Examples
///
/// ```rust
/// use rulesheet::{parse_sheet, SheetError};
///
/// // Missing closing brace
/// let result = parse_sheet("name { fg: green;");
/// assert!(matches!(result, Err(SheetError::InvalidSyntax(_))));
/// ```
#[derive(Error, Debug)]
pub enum SheetError {
    /// The sheet is not structurally valid.
    ///
    /// The string says what was unexpected and on which line.
    #[error("rule sheet syntax error: {0}")]
    InvalidSyntax(String),

    /// A `$variable` was referenced but never defined.
    #[error("unknown variable: ${0}")]
    UnknownVariable(String),

    /// The parsed rules could not be compiled.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// An I/O error occurred while reading a sheet file.
    #[error("I/O error reading rule sheet")]
    Io(#[from] std::io::Error),
}
