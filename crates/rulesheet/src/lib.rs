//! # rulesheet - rule sets from text
//!
//! A small CSS-like format for describing [`ansi_markup`] rule sets, so
//! styles can live in a configuration file instead of code.
//!
//! ## Quick Start
//!
//! ```rust
//! use rulesheet::parse_sheet;
//!
//! let source = r#"
//!     /* chat styles */
//!     $accent: [208];
//!
//!     name  { fg: green; enable: underline; }
//!     warn  { fg: $accent; enable: bold; }
//! "#;
//!
//! let rules = parse_sheet(source).unwrap().into_rule_set().unwrap();
//! assert_eq!(rules.apply("{%nameJohn%}"), "\x1b[4m\x1b[32mJohn\x1b[39m\x1b[24m");
//! ```
//!
//! ## Format
//!
//! ### Rules
//! - `name { property: value; ... }` - top-level properties form the inside part
//! - `inside { ... }` / `after { ... }` - explicit parts, nested in a rule
//!
//! ### Properties
//! - `fg`, `bg`: `red`, `208`, `[208]`, `[30, 80, 128]`
//! - `enable`, `disable`: style attributes, e.g. `bold, underline`
//! - `reset`: `all`, `fg`, `bg`, `style`, or an attribute name
//! - `keep`: `all`, `fg`, `bg`, `style`
//!
//! ### Options
//! - `@after: auto;` (`auto`, `reset`, `keep`) or `@after { ... }` for an override baseline
//! - `@symbols { open: "{%"; close: "%}"; reset: "%@"; }`
//!
//! ### Other
//! - Block comments: `/* ... */`
//! - Variables: `$name: value;` defined on their own line, used as `$name`
//!
//! Unknown properties and unreadable values are skipped with a warning
//! through the `log` facade. Structural problems are errors.

pub mod error;
pub mod parser;

pub use error::SheetError;
pub use parser::{Sheet, parse_sheet, parse_sheet_file};
