//! Syntax tree produced by the sheet grammar.
//!
//! Values are kept as written; interpreting them is left to
//! [`Sheet`](crate::Sheet) construction, which drops what it cannot read.

/// A property value as written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value<'a> {
    /// Unquoted text up to the terminating `;`, trimmed.
    Bare(&'a str),
    /// Contents of a double-quoted string.
    Quoted(&'a str),
}

/// `property: value;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub property: &'a str,
    pub value: Value<'a>,
}

/// One entry in a rule body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyItem<'a> {
    Declaration(Declaration<'a>),
    /// `inside { ... }` or `after { ... }`.
    Block {
        name: &'a str,
        declarations: Vec<Declaration<'a>>,
    },
}

/// Body of an at-rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AtBody<'a> {
    /// `@name: value;`
    Value(Value<'a>),
    /// `@name { ... }`
    Block(Vec<Declaration<'a>>),
}

/// A top-level item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item<'a> {
    /// `name { ... }`
    Rule {
        name: &'a str,
        body: Vec<BodyItem<'a>>,
    },
    /// `@after ...`, `@symbols ...`
    At {
        name: &'a str,
        body: AtBody<'a>,
    },
}
