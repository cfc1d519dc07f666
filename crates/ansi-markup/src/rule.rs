//! Rule compilation.
//!
//! [`compile`] turns a [`RuleDefinition`] into a [`CompiledRule`]: two
//! ordered code lists (inside and after) plus their escape sequences,
//! joined once so rendering only concatenates strings.

use crate::after::{auto_after, override_after};
use crate::code::{Code, escape_sequence, resolve_color, resolve_reset, resolve_style};
use crate::color::ColorTarget;
use crate::definition::{AfterPolicy, Part, RuleDefinition, push_unique};
use crate::error::RuleError;
use crate::style::{Attribute, ResetOperand, ResetTargets, StyleAction};

/// Which half of a compiled rule to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Applied when the rule opens.
    Inside,
    /// Applied when the rule closes.
    After,
}

/// An immutable, compiled rule.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledRule {
    original: RuleDefinition,
    inside: Vec<Code>,
    after: Vec<Code>,
    inside_sequence: String,
    after_sequence: String,
}

impl CompiledRule {
    /// The definition this rule was compiled from.
    pub fn original(&self) -> &RuleDefinition {
        &self.original
    }

    pub fn inside_codes(&self) -> &[Code] {
        &self.inside
    }

    pub fn after_codes(&self) -> &[Code] {
        &self.after
    }

    /// Codes for one phase.
    pub fn codes(&self, phase: Phase) -> &[Code] {
        match phase {
            Phase::Inside => &self.inside,
            Phase::After => &self.after,
        }
    }

    /// Pre-joined escape sequence for one phase.
    pub fn sequence(&self, phase: Phase) -> &str {
        match phase {
            Phase::Inside => &self.inside_sequence,
            Phase::After => &self.after_sequence,
        }
    }

    /// Returns true if neither phase emits anything.
    pub fn is_noop(&self) -> bool {
        self.inside.is_empty() && self.after.is_empty()
    }
}

/// Compile a rule definition.
///
/// `is_reset` marks the rule bound to the reset symbol: its after part is
/// taken as written, without consulting the policy.
///
/// ```
/// use ansi_markup::rule::{compile, Phase};
/// use ansi_markup::{AfterPolicy, NamedColor, RuleDefinition};
///
/// let def = RuleDefinition::new().fg(NamedColor::Red);
/// let rule = compile("red", &def, &AfterPolicy::Auto, false).unwrap();
/// assert_eq!(rule.sequence(Phase::Inside), "\x1b[31m");
/// assert_eq!(rule.sequence(Phase::After), "\x1b[39m");
/// ```
pub fn compile(
    name: &str,
    definition: &RuleDefinition,
    policy: &AfterPolicy,
    is_reset: bool,
) -> Result<CompiledRule, RuleError> {
    definition.validate(name)?;

    let inside = definition.inside_part();
    let explicit = definition.explicit_after();

    let after = if is_reset {
        explicit
    } else {
        match policy {
            AfterPolicy::Keep => explicit,
            AfterPolicy::Reset => {
                override_after(&explicit, &Part::new().reset(ResetTargets::ALL))
            }
            AfterPolicy::Auto => auto_after(inside, &explicit),
            AfterPolicy::Override(base) => override_after(&explicit, base),
        }
    };

    let inside_codes = part_codes(inside, inside);
    let after_codes = part_codes(&after, inside);

    log::trace!(
        "compiled rule `{}`: inside={:?} after={:?}",
        name,
        inside_codes,
        after_codes
    );

    Ok(CompiledRule {
        original: definition.clone(),
        inside_sequence: escape_sequence(&inside_codes),
        after_sequence: escape_sequence(&after_codes),
        inside: inside_codes,
        after: after_codes,
    })
}

/// Resolve a part into de-duplicated codes.
///
/// Order: reset targets, reset attributes, disables, enables, fg, bg.
/// The `STYLE` group disables whatever `opened` enabled (or every
/// attribute when it enabled none), skipping attributes `part` enables.
fn part_codes(part: &Part, opened: &Part) -> Vec<Code> {
    let mut codes = Vec::new();

    for target in [ResetTargets::ALL, ResetTargets::FG, ResetTargets::BG] {
        if !part.reset.contains(target) {
            continue;
        }
        if let Some(code) = resolve_reset(ResetOperand::Target(target)) {
            push_unique(&mut codes, code);
        }
    }

    if part.reset.contains(ResetTargets::STYLE) {
        let group: &[Attribute] = if opened.enable.is_empty() {
            &Attribute::ALL
        } else {
            &opened.enable
        };
        for attribute in group.iter().filter(|a| !part.enable.contains(a)) {
            push_unique(&mut codes, resolve_style(*attribute, StyleAction::Disable));
        }
    }

    for attribute in &part.reset_attributes {
        if let Some(code) = resolve_reset(ResetOperand::Attribute(*attribute)) {
            push_unique(&mut codes, code);
        }
    }

    for attribute in &part.disable {
        push_unique(&mut codes, resolve_style(*attribute, StyleAction::Disable));
    }
    for attribute in &part.enable {
        push_unique(&mut codes, resolve_style(*attribute, StyleAction::Enable));
    }

    if let Some(fg) = &part.fg {
        push_unique(&mut codes, resolve_color(fg, ColorTarget::Fg));
    }
    if let Some(bg) = &part.bg {
        push_unique(&mut codes, resolve_color(bg, ColorTarget::Bg));
    }

    codes
}
