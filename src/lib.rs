//! Markup tags in plain text, expanded into terminal colors and styles.
//!
//! ```
//! use term_color::{Attribute, NamedColor, RuleDefinition, create_rule_set};
//!
//! let rules = create_rule_set([
//!     ("name", RuleDefinition::new().fg(NamedColor::Green).enable(Attribute::Underline)),
//!     ("quote", RuleDefinition::new().enable(Attribute::Italic)),
//! ])
//! .unwrap();
//!
//! let line = rules.apply("{%nameJohn%}: {%quoteRoses%}");
//! assert_eq!(line, "\x1b[4m\x1b[32mJohn\x1b[39m\x1b[24m: \x1b[3mRoses\x1b[23m");
//! ```
//!
//! Rule sets can also be read from a sheet:
//!
//! ```
//! let rules = term_color::from_sheet("warn { fg: [208]; enable: bold; }").unwrap();
//! assert_eq!(rules.strip("{%warnhot%}"), "hot");
//! ```

pub mod error;
pub mod log_init;
pub mod printer;

use std::path::Path;

pub use ansi_markup::{
    AfterPolicy, Attribute, Code, ColorSpec, ColorTarget, CompiledRule, NamedColor, Part, Phase,
    RESET_RULE, ResetOperand, ResetTargets, RuleDefinition, RuleError, RuleSet, RuleSetOptions,
    SpecParseError, StyleAction, Symbols,
};
pub use error::{Error, Result};
pub use printer::Printer;
pub use rulesheet::{Sheet, SheetError, parse_sheet, parse_sheet_file};

/// The core markup crate, for the resolver, compiler, and scanner APIs.
pub use ansi_markup as markup;

/// Build a rule set with default options.
pub fn create_rule_set<N: Into<String>>(
    rules: impl IntoIterator<Item = (N, RuleDefinition)>,
) -> Result<RuleSet> {
    Ok(RuleSet::with_defaults(rules)?)
}

/// Parse a rule sheet and compile it.
pub fn from_sheet(source: &str) -> Result<RuleSet> {
    Ok(parse_sheet(source)?.into_rule_set()?)
}

/// Read a rule sheet file and compile it.
pub fn from_sheet_file(path: impl AsRef<Path>) -> Result<RuleSet> {
    Ok(parse_sheet_file(path)?.into_rule_set()?)
}
