//! After-part inference and override merging.
//!
//! - [`auto_after`]: infer what closing a rule must undo
//! - [`override_after`]: reconcile an authored after part with a baseline
//!
//! Explicitly authored fields always win over the baseline. A `keep`
//! removes a target from the final reset set, and an attribute is never
//! enabled and disabled in the same after part.

use crate::definition::{Part, push_unique};
use crate::style::{Attribute, ResetTargets};

/// Infer an after part from an inside part, then merge `explicit` over it.
///
/// Enabling any attribute schedules the `STYLE` group reset; setting `fg`
/// or `bg` schedules the matching color reset. Disables in the inside part
/// are not reversed.
pub fn auto_after(inside: &Part, explicit: &Part) -> Part {
    let mut candidate = Part::new();

    if !inside.enable.is_empty() {
        candidate.reset |= ResetTargets::STYLE;
    }
    if inside.fg.is_some() {
        candidate.reset |= ResetTargets::FG;
    }
    if inside.bg.is_some() {
        candidate.reset |= ResetTargets::BG;
    }

    override_after(explicit, &candidate)
}

/// Merge an override record onto a base record.
pub fn override_after(overrides: &Part, base: &Part) -> Part {
    let base_reset = base.reset.expand();
    let override_reset = overrides.reset.expand();
    let keep = overrides.keep.expand();

    let mut reset = (base_reset | override_reset) - keep;

    let mut reset_attributes = base.reset_attributes.clone();
    for attribute in &overrides.reset_attributes {
        push_unique(&mut reset_attributes, *attribute);
    }

    // Inherited disables are dropped when the override keeps styles.
    let inherited_disable: &[Attribute] = if keep.contains(ResetTargets::STYLE) {
        &[]
    } else {
        &base.disable
    };

    // Explicit disables replace the blanket group reset.
    if !overrides.disable.is_empty() {
        reset.remove(ResetTargets::STYLE);
    }

    let mut enable = Vec::new();
    for attribute in base.enable.iter().chain(&overrides.enable) {
        if !overrides.disable.contains(attribute) {
            push_unique(&mut enable, *attribute);
        }
    }

    let mut disable = Vec::new();
    for attribute in inherited_disable.iter().chain(&overrides.disable) {
        if !overrides.enable.contains(attribute) {
            push_unique(&mut disable, *attribute);
        }
    }

    enable.retain(|attribute| !disable.contains(attribute));

    Part {
        fg: overrides.fg.or(base.fg),
        bg: overrides.bg.or(base.bg),
        enable,
        disable,
        reset,
        reset_attributes,
        keep: ResetTargets::empty(),
    }
}
