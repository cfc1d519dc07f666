//! Turning a parsed sheet into rule definitions and options.
//!
//! Anything that parses but cannot be interpreted (an unknown property, a
//! color that does not exist, a misspelled attribute) is dropped with a
//! warning; the rest of the sheet still applies.

use std::fmt::Display;
use std::str::FromStr;

use ansi_markup::{
    AfterPolicy, Attribute, Part, ResetOperand, ResetTargets, RuleDefinition, RuleSet,
    RuleSetOptions, Symbols,
};
use nom::combinator::all_consuming;

use crate::SheetError;
use crate::parser::ast::{AtBody, BodyItem, Declaration, Item, Value};
use crate::parser::values::{parse_color, parse_ident_list};

/// Rule definitions and rule set options read from a sheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    /// Rules in the order they first appear. A rule defined twice keeps
    /// its first position and its last definition.
    pub rules: Vec<(String, RuleDefinition)>,
    pub options: RuleSetOptions,
}

impl Sheet {
    /// Look up a rule definition by name.
    pub fn get(&self, name: &str) -> Option<&RuleDefinition> {
        self.rules
            .iter()
            .find(|(rule, _)| rule == name)
            .map(|(_, definition)| definition)
    }

    /// Compile the sheet into a rule set.
    pub fn into_rule_set(self) -> Result<RuleSet, SheetError> {
        Ok(RuleSet::new(self.rules, self.options)?)
    }

    pub(crate) fn from_items(items: Vec<Item<'_>>) -> Self {
        let mut sheet = Sheet::default();

        for item in items {
            match item {
                Item::Rule { name, body } => sheet.define(name, rule_definition(name, body)),
                Item::At {
                    name: "after",
                    body,
                } => {
                    if let Some(policy) = after_policy(body) {
                        sheet.options.after = policy;
                    }
                }
                Item::At {
                    name: "symbols",
                    body,
                } => apply_symbols(&mut sheet.options.symbols, body),
                Item::At { name, .. } => log::warn!("ignoring unknown at-rule `@{}`", name),
            }
        }

        sheet
    }

    fn define(&mut self, name: &str, definition: RuleDefinition) {
        match self.rules.iter_mut().find(|(rule, _)| rule == name) {
            Some((_, existing)) => {
                log::debug!("rule `{}` redefined", name);
                *existing = definition;
            }
            None => self.rules.push((name.to_string(), definition)),
        }
    }
}

impl FromStr for Sheet {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_sheet(s)
    }
}

fn rule_definition(name: &str, body: Vec<BodyItem<'_>>) -> RuleDefinition {
    let mut definition = RuleDefinition::new();

    for item in body {
        match item {
            BodyItem::Declaration(declaration) => {
                definition.fields = apply_declaration(definition.fields, &declaration, name);
            }
            BodyItem::Block {
                name: "inside",
                declarations,
            } => {
                let part = definition.inside.take().unwrap_or_default();
                definition.inside = Some(apply_declarations(part, &declarations, name));
            }
            BodyItem::Block {
                name: "after",
                declarations,
            } => {
                let part = definition.after.take().unwrap_or_default();
                definition.after = Some(apply_declarations(part, &declarations, name));
            }
            BodyItem::Block { name: block, .. } => {
                log::warn!("{}: ignoring unknown block `{}`", name, block);
            }
        }
    }

    definition
}

fn apply_declarations(part: Part, declarations: &[Declaration<'_>], context: &str) -> Part {
    declarations
        .iter()
        .fold(part, |part, declaration| apply_declaration(part, declaration, context))
}

/// Apply one declaration to a part, warning about what cannot be read.
fn apply_declaration(mut part: Part, declaration: &Declaration<'_>, context: &str) -> Part {
    let property = declaration.property;
    let text = match declaration.value {
        Value::Bare(text) => text,
        Value::Quoted(text) => {
            log::warn!(
                "{}: ignoring quoted value \"{}\" for `{}`",
                context,
                text,
                property
            );
            return part;
        }
    };

    match property {
        "fg" | "bg" => match all_consuming(parse_color)(text) {
            Ok((_, color)) if property == "fg" => part = part.fg(color),
            Ok((_, color)) => part = part.bg(color),
            Err(_) => log::warn!("{}: dropping invalid color `{}` for `{}`", context, text, property),
        },
        "enable" => {
            for attribute in keywords::<Attribute>(text, property, context) {
                part = part.enable(attribute);
            }
        }
        "disable" => {
            for attribute in keywords::<Attribute>(text, property, context) {
                part = part.disable(attribute);
            }
        }
        "reset" => {
            for operand in keywords::<ResetOperand>(text, property, context) {
                part = part.reset(operand);
            }
        }
        "keep" => {
            for targets in keywords::<ResetTargets>(text, property, context) {
                part = part.keep(targets);
            }
        }
        _ => log::warn!("{}: ignoring unknown property `{}`", context, property),
    }

    part
}

/// Parse a keyword list, keeping the words that name a `T`.
fn keywords<T>(text: &str, property: &str, context: &str) -> Vec<T>
where
    T: FromStr,
    T::Err: Display,
{
    let words = match all_consuming(parse_ident_list)(text) {
        Ok((_, words)) => words,
        Err(_) => {
            log::warn!("{}: dropping malformed list `{}` for `{}`", context, text, property);
            return Vec::new();
        }
    };

    words
        .into_iter()
        .filter_map(|word| match word.parse::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("{}: dropping `{}` from `{}`: {}", context, word, property, err);
                None
            }
        })
        .collect()
}

/// `@after: auto|reset|keep;` or `@after { ... }` (an override baseline).
fn after_policy(body: AtBody<'_>) -> Option<AfterPolicy> {
    match body {
        AtBody::Value(Value::Bare(text)) => match text.parse::<AfterPolicy>() {
            Ok(policy) => Some(policy),
            Err(err) => {
                log::warn!("@after: {}", err);
                None
            }
        },
        AtBody::Value(Value::Quoted(text)) => {
            log::warn!("@after: ignoring quoted value \"{}\"", text);
            None
        }
        AtBody::Block(declarations) => Some(AfterPolicy::Override(apply_declarations(
            Part::new(),
            &declarations,
            "@after",
        ))),
    }
}

/// `@symbols { open: "<"; close: ">"; reset: "<!>"; }`
fn apply_symbols(symbols: &mut Symbols, body: AtBody<'_>) {
    let AtBody::Block(declarations) = body else {
        log::warn!("@symbols: expected a block of declarations");
        return;
    };

    for declaration in declarations {
        let text = match declaration.value {
            Value::Quoted(text) | Value::Bare(text) => text.to_string(),
        };
        match declaration.property {
            "open" => symbols.open = text,
            "close" => symbols.close = text,
            "reset" => symbols.reset = text,
            other => log::warn!("@symbols: ignoring unknown symbol `{}`", other),
        }
    }
}
