//! Stack renderer for scanned markup.
//!
//! Literal text is copied through; rule symbols become the escape
//! sequences of the compiled rules, tracked with a stack of open rules.

use crate::rule::{CompiledRule, Phase};
use crate::rule_set::RuleSet;

use super::scanner::Token;

/// What the renderer emits for rule symbols.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Emit escape sequences.
    #[default]
    Apply,
    /// Consume symbols without emitting anything.
    Strip,
}

/// Render a token stream against a rule set.
///
/// # Examples
///
/// ```
/// use ansi_markup::parser::{render, RenderMode};
/// use ansi_markup::{NamedColor, RuleDefinition, RuleSet};
///
/// let rules = RuleSet::with_defaults([("red", RuleDefinition::new().fg(NamedColor::Red))]).unwrap();
/// let tokens = rules.scan("a{%redB%}c");
/// assert_eq!(render(&tokens, &rules, RenderMode::Apply), "a\x1b[31mB\x1b[39mc");
/// assert_eq!(render(&tokens, &rules, RenderMode::Strip), "aBc");
/// ```
pub fn render(tokens: &[Token<'_>], rules: &RuleSet, mode: RenderMode) -> String {
    let mut renderer = Renderer::new(rules, mode);
    for token in tokens {
        renderer.process_token(token);
    }
    log::trace!(
        "rendered {} tokens, {} rule(s) left open",
        tokens.len(),
        renderer.stack.len()
    );
    renderer.output
}

/// The renderer state.
struct Renderer<'r> {
    rules: &'r RuleSet,
    mode: RenderMode,
    /// Open rules, outermost first.
    stack: Vec<&'r CompiledRule>,
    output: String,
}

impl<'r> Renderer<'r> {
    fn new(rules: &'r RuleSet, mode: RenderMode) -> Self {
        Self {
            rules,
            mode,
            stack: Vec::new(),
            output: String::new(),
        }
    }

    fn process_token(&mut self, token: &Token<'_>) {
        match token {
            Token::Text(text) => self.output.push_str(text),
            Token::Open(name) => self.open(name),
            Token::Close => self.close(),
            Token::Reset => self.reset(),
        }
    }

    fn emit(&mut self, rule: &CompiledRule, phase: Phase) {
        if self.mode == RenderMode::Apply {
            self.output.push_str(rule.sequence(phase));
        }
    }

    /// Push a rule and apply its inside sequence. Unknown names are ignored.
    fn open(&mut self, name: &str) {
        if let Some(rule) = self.rules.get(name) {
            self.stack.push(rule);
            self.emit(rule, Phase::Inside);
        }
    }

    /// Pop the innermost rule, apply its after sequence, then re-apply
    /// every rule still open, outermost first.
    fn close(&mut self) {
        let Some(rule) = self.stack.pop() else {
            return;
        };
        self.emit(rule, Phase::After);

        for index in 0..self.stack.len() {
            let outer = self.stack[index];
            self.emit(outer, Phase::Inside);
        }
    }

    /// Unwind every open rule and apply the reset rule's after sequence.
    fn reset(&mut self) {
        self.stack.clear();
        let reset = self.rules.reset_rule();
        self.emit(reset, Phase::After);
    }
}
