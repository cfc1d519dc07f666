use std::fmt;
use std::io::Write;

use ansi_markup::RuleSet;

use crate::error::Result;

/// Writes markup through a rule set to an output sink.
///
/// ```
/// use term_color::{NamedColor, Printer, RuleDefinition, create_rule_set};
///
/// let rules = create_rule_set([("red", RuleDefinition::new().fg(NamedColor::Red))]).unwrap();
/// let mut printer = Printer::new(rules, Vec::new());
/// printer.println("{%redalert%}").unwrap();
/// assert_eq!(printer.into_inner(), b"\x1b[31malert\x1b[39m\n");
/// ```
#[derive(Debug)]
pub struct Printer<W: Write> {
    rules: RuleSet,
    out: W,
    plain: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(rules: RuleSet, out: W) -> Self {
        Self {
            rules,
            out,
            plain: false,
        }
    }

    /// A printer that strips markup instead of emitting escape sequences,
    /// for sinks that are not terminals.
    pub fn plain(rules: RuleSet, out: W) -> Self {
        Self {
            rules,
            out,
            plain: true,
        }
    }

    pub fn print(&mut self, text: &str) -> Result<()> {
        let rendered = self.render(text);
        self.out.write_all(rendered.as_bytes())?;
        Ok(())
    }

    pub fn println(&mut self, text: &str) -> Result<()> {
        let mut rendered = self.render(text);
        rendered.push('\n');
        self.out.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Format first, then expand markup in the result.
    ///
    /// Literal braces in the format string must be doubled, so an open tag
    /// is written `{{%name`.
    ///
    /// ```
    /// use term_color::{Attribute, Printer, RuleDefinition, create_rule_set};
    ///
    /// let rules = create_rule_set([("b", RuleDefinition::new().enable(Attribute::Bold))]).unwrap();
    /// let mut printer = Printer::new(rules, Vec::new());
    /// printer.print_fmt(format_args!("{{%b{}%}} items", 3)).unwrap();
    /// assert_eq!(printer.into_inner(), b"\x1b[1m3\x1b[21m items");
    /// ```
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.print(&args.to_string())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, text: &str) -> String {
        if self.plain {
            self.rules.strip(text)
        } else {
            self.rules.apply(text)
        }
    }
}
