//! Rule sets: compiled rules plus the symbols that mark them up.

use std::collections::HashMap;

use crate::definition::{AfterPolicy, Part, RuleDefinition};
use crate::error::RuleError;
use crate::parser::{RenderMode, Scanner, Token, render};
use crate::rule::{CompiledRule, compile};
use crate::style::ResetTargets;

/// Name of the synthetic rule bound to the reset symbol.
pub const RESET_RULE: &str = "reset";

/// Delimiters used in markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbols {
    /// Prefix immediately followed by a rule name.
    pub open: String,
    /// Closes the innermost open rule.
    pub close: String,
    /// Unconditional reset.
    pub reset: String,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            open: "{%".to_string(),
            close: "%}".to_string(),
            reset: "%@".to_string(),
        }
    }
}

impl Symbols {
    pub fn new(open: impl Into<String>, close: impl Into<String>, reset: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            reset: reset.into(),
        }
    }

    fn validate(&self) -> Result<(), RuleError> {
        if self.open.is_empty() {
            return Err(RuleError::EmptySymbol("open"));
        }
        if self.close.is_empty() {
            return Err(RuleError::EmptySymbol("close"));
        }
        if self.reset.is_empty() {
            return Err(RuleError::EmptySymbol("reset"));
        }
        if self.open == self.close {
            return Err(RuleError::ConflictingSymbols("open", "close"));
        }
        if self.open == self.reset {
            return Err(RuleError::ConflictingSymbols("open", "reset"));
        }
        // a reset equal to close would never be reached
        if self.close == self.reset {
            return Err(RuleError::ConflictingSymbols("close", "reset"));
        }
        Ok(())
    }
}

/// Construction options for a [`RuleSet`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSetOptions {
    /// How after parts are derived.
    pub after: AfterPolicy,
    /// Markup delimiters.
    pub symbols: Symbols,
}

impl RuleSetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(mut self, policy: AfterPolicy) -> Self {
        self.after = policy;
        self
    }

    pub fn symbols(mut self, symbols: Symbols) -> Self {
        self.symbols = symbols;
        self
    }
}

/// A set of compiled rules.
///
/// Every rule is compiled when the set is built; afterwards the set is
/// read-only and can be shared between threads.
///
/// # Examples
///
/// ```
/// use ansi_markup::{Attribute, NamedColor, RuleDefinition, RuleSet};
///
/// let rules = RuleSet::with_defaults([
///     ("name", RuleDefinition::new().fg(NamedColor::Green).enable(Attribute::Underline)),
///     ("quote", RuleDefinition::new().enable(Attribute::Italic)),
/// ])
/// .unwrap();
///
/// let out = rules.apply("{%nameJohn%}: {%quoteRoses%}");
/// assert_eq!(
///     out,
///     "\x1b[4m\x1b[32mJohn\x1b[39m\x1b[24m: \x1b[3mRoses\x1b[23m"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: HashMap<String, CompiledRule>,
    reset: CompiledRule,
    symbols: Symbols,
    default_after: AfterPolicy,
    scanner: Scanner,
}

impl RuleSet {
    /// Compile every rule and build the scanner.
    ///
    /// A rule named [`RESET_RULE`] replaces the synthetic reset rule; it is
    /// compiled without after-part inference.
    pub fn new<N: Into<String>>(
        rules: impl IntoIterator<Item = (N, RuleDefinition)>,
        options: RuleSetOptions,
    ) -> Result<Self, RuleError> {
        let RuleSetOptions {
            after: default_after,
            symbols,
        } = options;
        symbols.validate()?;

        let mut compiled = HashMap::new();
        let mut reset_definition =
            RuleDefinition::new().with_after(Part::new().reset(ResetTargets::ALL));

        for (name, definition) in rules {
            let name = name.into();
            if name.is_empty() {
                return Err(RuleError::EmptyName);
            }
            if name == RESET_RULE {
                definition.validate(&name)?;
                reset_definition = definition;
                continue;
            }
            let rule = compile(&name, &definition, &default_after, false)?;
            compiled.insert(name, rule);
        }

        let reset = compile(RESET_RULE, &reset_definition, &default_after, true)?;
        compiled.insert(RESET_RULE.to_string(), reset.clone());

        let scanner = Scanner::new(&symbols, compiled.keys().map(String::as_str));

        log::debug!(
            "built rule set: {} rules, after policy {:?}, symbols {:?}",
            compiled.len(),
            default_after,
            symbols
        );

        Ok(Self {
            rules: compiled,
            reset,
            symbols,
            default_after,
            scanner,
        })
    }

    /// Build a rule set with default options.
    pub fn with_defaults<N: Into<String>>(
        rules: impl IntoIterator<Item = (N, RuleDefinition)>,
    ) -> Result<Self, RuleError> {
        Self::new(rules, RuleSetOptions::default())
    }

    /// Expand markup in `text` into escape sequences.
    pub fn apply(&self, text: &str) -> String {
        let tokens = self.scan(text);
        render(&tokens, self, RenderMode::Apply)
    }

    /// Remove markup from `text` without emitting escape sequences.
    pub fn strip(&self, text: &str) -> String {
        let tokens = self.scan(text);
        render(&tokens, self, RenderMode::Strip)
    }

    /// Split `text` into tokens.
    pub fn scan<'a>(&'a self, text: &'a str) -> Vec<Token<'a>> {
        self.scanner.tokenize(text)
    }

    /// Look up a compiled rule.
    pub fn get(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.get(name)
    }

    /// The rule bound to the reset symbol.
    pub fn reset_rule(&self) -> &CompiledRule {
        &self.reset
    }

    /// Rule names, including the reset rule, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of rules, including the reset rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false: the reset rule is always present.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn default_after(&self) -> &AfterPolicy {
        &self.default_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Code;
    use crate::color::NamedColor;
    use crate::style::Attribute;

    #[test]
    fn includes_all_keys_and_reset() {
        let rules = RuleSet::with_defaults([
            ("a", RuleDefinition::new().fg(NamedColor::Red)),
            ("b", RuleDefinition::new().enable(Attribute::Bold)),
        ])
        .unwrap();
        let mut names: Vec<&str> = rules.names().collect();
        names.sort();
        assert_eq!(names, vec!["a", "b", "reset"]);
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn synthetic_reset_rule() {
        let rules = RuleSet::with_defaults(Vec::<(String, RuleDefinition)>::new()).unwrap();
        assert_eq!(rules.reset_rule().after_codes(), &[Code::Single(0)]);
        assert!(rules.reset_rule().inside_codes().is_empty());
        assert_eq!(rules.get(RESET_RULE), Some(rules.reset_rule()));
    }

    #[test]
    fn custom_reset_rule_replaces_synthetic() {
        let custom = RuleDefinition::new().with_after(Part::new().reset(ResetTargets::FG));
        let rules = RuleSet::with_defaults([(RESET_RULE, custom)]).unwrap();
        assert_eq!(rules.reset_rule().after_codes(), &[Code::Single(39)]);
        assert_eq!(rules.apply("x%@"), "x\x1b[39m");
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = RuleSet::with_defaults([("", RuleDefinition::new())]);
        assert_eq!(result.unwrap_err(), RuleError::EmptyName);
    }

    #[test]
    fn empty_symbol_is_rejected() {
        let options = RuleSetOptions::new().symbols(Symbols::new("<", "", "!"));
        let result = RuleSet::new(Vec::<(&str, RuleDefinition)>::new(), options);
        assert_eq!(result.unwrap_err(), RuleError::EmptySymbol("close"));
    }

    #[test]
    fn equal_symbols_are_rejected() {
        let cases = [
            (Symbols::new("<", "<", "!"), RuleError::ConflictingSymbols("open", "close")),
            (Symbols::new("<", ">", "<"), RuleError::ConflictingSymbols("open", "reset")),
            (Symbols::new("<", ">", ">"), RuleError::ConflictingSymbols("close", "reset")),
        ];
        for (symbols, expected) in cases {
            let options = RuleSetOptions::new().symbols(symbols);
            let result = RuleSet::new(Vec::<(&str, RuleDefinition)>::new(), options);
            assert_eq!(result.unwrap_err(), expected);
        }
    }

    #[test]
    fn invalid_definition_fails_construction() {
        let bad = RuleDefinition::new()
            .fg(NamedColor::Red)
            .with_inside(Part::new().fg(NamedColor::Blue));
        let result = RuleSet::with_defaults([("bad", bad)]);
        assert!(matches!(result, Err(RuleError::InvalidDefinition { .. })));
    }

    #[test]
    fn options_are_kept() {
        let options = RuleSetOptions::new()
            .after(AfterPolicy::Keep)
            .symbols(Symbols::new("<", ">", "!"));
        let rules = RuleSet::new([("x", RuleDefinition::new())], options).unwrap();
        assert_eq!(rules.default_after(), &AfterPolicy::Keep);
        assert_eq!(rules.symbols().open, "<");
    }

    #[test]
    fn rule_set_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
