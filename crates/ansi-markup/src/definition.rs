//! Rule definitions as authored by callers.
//!
//! A [`RuleDefinition`] describes what a rule does when it opens (its
//! *inside* part) and optionally what it does when it closes (its *after*
//! part). When no after part is given, one is inferred from the rule set's
//! [`AfterPolicy`].
//!
//! ```
//! use ansi_markup::{Attribute, NamedColor, Part, ResetTargets, RuleDefinition};
//!
//! // Green underlined text; closing resets fg and disables underline.
//! let name = RuleDefinition::new()
//!     .fg(NamedColor::Green)
//!     .enable(Attribute::Underline);
//!
//! // Red inside, blue after the rule closes.
//! let weird = RuleDefinition::new()
//!     .with_inside(Part::new().fg(NamedColor::Red))
//!     .with_after(Part::new().fg(NamedColor::Blue));
//!
//! // Italic red, only the color is cleared at the end.
//! let quote = RuleDefinition::new()
//!     .fg(NamedColor::Red)
//!     .enable(Attribute::Italic)
//!     .with_after(Part::new().reset(ResetTargets::FG));
//! # let _ = (name, weird, quote);
//! ```

use std::str::FromStr;

use crate::color::ColorSpec;
use crate::error::{RuleError, SpecParseError};
use crate::style::{Attribute, ResetOperand, ResetTargets};

/// One operand record: the fields of an inside or after part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Part {
    /// Foreground color.
    pub fg: Option<ColorSpec>,
    /// Background color.
    pub bg: Option<ColorSpec>,
    /// Attributes to switch on, in authoring order.
    pub enable: Vec<Attribute>,
    /// Attributes to switch off, in authoring order.
    pub disable: Vec<Attribute>,
    /// Reset targets.
    pub reset: ResetTargets,
    /// Attributes named in `reset`; each resolves to its disable code.
    pub reset_attributes: Vec<Attribute>,
    /// Targets that must not be reset, even if a baseline would.
    pub keep: ResetTargets,
}

impl Part {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.fg.is_none()
            && self.bg.is_none()
            && self.enable.is_empty()
            && self.disable.is_empty()
            && self.reset.is_empty()
            && self.reset_attributes.is_empty()
            && self.keep.is_empty()
    }

    pub fn fg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.fg = Some(color.into());
        self
    }

    pub fn bg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.bg = Some(color.into());
        self
    }

    pub fn enable(mut self, attribute: Attribute) -> Self {
        push_unique(&mut self.enable, attribute);
        self
    }

    pub fn disable(mut self, attribute: Attribute) -> Self {
        push_unique(&mut self.disable, attribute);
        self
    }

    /// Add a reset target, or an attribute to disable.
    pub fn reset(mut self, operand: impl Into<ResetOperand>) -> Self {
        match operand.into() {
            ResetOperand::Target(targets) => self.reset |= targets,
            ResetOperand::Attribute(attribute) => {
                push_unique(&mut self.reset_attributes, attribute)
            }
        }
        self
    }

    pub fn keep(mut self, targets: ResetTargets) -> Self {
        self.keep |= targets;
        self
    }
}

/// Append `item` unless it is already present.
pub(crate) fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// A rule as supplied to [`RuleSet::new`](crate::RuleSet::new).
///
/// Fields set directly on the definition form the inside part, unless an
/// explicit inside part is given with [`with_inside`](Self::with_inside).
/// Mixing both is a shape error reported by [`validate`](Self::validate).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleDefinition {
    /// Top-level fields.
    pub fields: Part,
    /// Explicit inside part.
    pub inside: Option<Part>,
    /// Explicit after part.
    pub after: Option<Part>,
}

impl RuleDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.fields = self.fields.fg(color);
        self
    }

    pub fn bg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.fields = self.fields.bg(color);
        self
    }

    pub fn enable(mut self, attribute: Attribute) -> Self {
        self.fields = self.fields.enable(attribute);
        self
    }

    pub fn disable(mut self, attribute: Attribute) -> Self {
        self.fields = self.fields.disable(attribute);
        self
    }

    pub fn reset(mut self, operand: impl Into<ResetOperand>) -> Self {
        self.fields = self.fields.reset(operand);
        self
    }

    pub fn keep(mut self, targets: ResetTargets) -> Self {
        self.fields = self.fields.keep(targets);
        self
    }

    /// Set the explicit inside part.
    pub fn with_inside(mut self, part: Part) -> Self {
        self.inside = Some(part);
        self
    }

    /// Set the explicit after part.
    pub fn with_after(mut self, part: Part) -> Self {
        self.after = Some(part);
        self
    }

    /// Check that the definition is shaped like a rule record.
    pub fn validate(&self, name: &str) -> Result<(), RuleError> {
        if self.inside.is_some() && !self.fields.is_empty() {
            return Err(RuleError::InvalidDefinition {
                name: name.to_string(),
                reason: "top-level fields cannot be combined with an explicit inside part"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// The part applied when the rule opens.
    pub fn inside_part(&self) -> &Part {
        self.inside.as_ref().unwrap_or(&self.fields)
    }

    /// The explicitly authored after part, or an empty one.
    pub fn explicit_after(&self) -> Part {
        self.after.clone().unwrap_or_default()
    }
}

impl From<Part> for RuleDefinition {
    fn from(fields: Part) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }
}

/// How a rule set derives after parts that are not fully authored.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AfterPolicy {
    /// Undo whatever the inside part changed, then apply explicit overrides.
    #[default]
    Auto,
    /// Reset everything, then apply explicit overrides.
    Reset,
    /// Use the explicit after part as written; nothing is inferred.
    Keep,
    /// Use this record as the baseline, then apply explicit overrides.
    Override(Part),
}

impl FromStr for AfterPolicy {
    type Err = SpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(AfterPolicy::Auto),
            "reset" => Ok(AfterPolicy::Reset),
            "keep" => Ok(AfterPolicy::Keep),
            _ => Err(SpecParseError::UnknownPolicy(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;

    #[test]
    fn part_builder_dedupes() {
        let part = Part::new()
            .enable(Attribute::Bold)
            .enable(Attribute::Italic)
            .enable(Attribute::Bold);
        assert_eq!(part.enable, vec![Attribute::Bold, Attribute::Italic]);
    }

    #[test]
    fn reset_splits_targets_and_attributes() {
        let part = Part::new()
            .reset(ResetTargets::FG)
            .reset(Attribute::Italic)
            .reset(ResetTargets::BG);
        assert_eq!(part.reset, ResetTargets::FG | ResetTargets::BG);
        assert_eq!(part.reset_attributes, vec![Attribute::Italic]);
    }

    #[test]
    fn empty_part() {
        assert!(Part::new().is_empty());
        assert!(!Part::new().keep(ResetTargets::STYLE).is_empty());
    }

    #[test]
    fn inside_defaults_to_top_level_fields() {
        let def = RuleDefinition::new().fg(NamedColor::Red);
        assert_eq!(def.inside_part().fg, Some(ColorSpec::Named(NamedColor::Red)));
        assert!(def.explicit_after().is_empty());
    }

    #[test]
    fn explicit_inside_wins() {
        let def = RuleDefinition::new().with_inside(Part::new().bg(NamedColor::Blue));
        assert_eq!(def.inside_part().bg, Some(ColorSpec::Named(NamedColor::Blue)));
        assert!(def.validate("x").is_ok());
    }

    #[test]
    fn mixed_shape_is_rejected() {
        let def = RuleDefinition::new()
            .fg(NamedColor::Red)
            .with_inside(Part::new().bg(NamedColor::Blue));
        assert!(matches!(
            def.validate("mixed"),
            Err(RuleError::InvalidDefinition { name, .. }) if name == "mixed"
        ));
    }

    #[test]
    fn parse_policy() {
        assert_eq!("Auto".parse::<AfterPolicy>().unwrap(), AfterPolicy::Auto);
        assert_eq!("reset".parse::<AfterPolicy>().unwrap(), AfterPolicy::Reset);
        assert_eq!("keep".parse::<AfterPolicy>().unwrap(), AfterPolicy::Keep);
        assert_eq!(
            " Sometimes ".parse::<AfterPolicy>(),
            Err(SpecParseError::UnknownPolicy("Sometimes".to_string()))
        );
    }
}
