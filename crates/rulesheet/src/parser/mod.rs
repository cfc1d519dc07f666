//! Rule sheet parsing.
//!
//! - [`parse_sheet`]: Main entry point for parsing sheet source
//! - [`parse_sheet_file`]: Same, reading from a file
//! - [`Sheet`]: Rule definitions and options read from a sheet
//!
//! ## Submodules
//!
//! - [`ast`]: Syntax tree produced by the grammar
//! - [`sheet`]: Turning the syntax tree into rule definitions
//! - [`values`]: Identifier, color, and list parsing
//! - [`variables`]: Comment stripping and `$variable` substitution
//!
//! ## Example
//!
//! ```rust
//! use rulesheet::parser::parse_sheet;
//!
//! let sheet = parse_sheet("name { fg: green; enable: underline; }").unwrap();
//! assert_eq!(sheet.rules[0].0, "name");
//! ```

pub mod ast;
pub mod sheet;
pub mod values;
pub mod variables;

use std::path::Path;

pub use crate::parser::ast::{AtBody, BodyItem, Declaration, Item, Value};
pub use crate::parser::sheet::Sheet;
pub use crate::parser::variables::{extract_variables, resolve_variables, strip_comments};

use crate::SheetError;
use crate::parser::values::{parse_ident, parse_quoted};

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{char, multispace0},
    combinator::map,
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
};

/// Parses a full rule sheet, including comment removal and variable
/// resolution.
pub fn parse_sheet(source: &str) -> Result<Sheet, SheetError> {
    let source = strip_comments(source);
    let vars = extract_variables(&source);
    let resolved = resolve_variables(&source, &vars)?;

    let items = parse_items(&resolved)?;
    let sheet = Sheet::from_items(items);

    log::debug!(
        "parsed rule sheet: {} rules, {} variables",
        sheet.rules.len(),
        vars.len()
    );
    Ok(sheet)
}

/// Reads and parses a rule sheet file.
pub fn parse_sheet_file(path: impl AsRef<Path>) -> Result<Sheet, SheetError> {
    let path = path.as_ref();
    log::debug!("reading rule sheet {}", path.display());
    let source = std::fs::read_to_string(path)?;
    parse_sheet(&source)
}

/// Parses every top-level item of already resolved source.
pub fn parse_items(source: &str) -> Result<Vec<Item<'_>>, SheetError> {
    let (remaining, items) =
        many0(parse_item)(source).map_err(|e| SheetError::InvalidSyntax(e.to_string()))?;

    let rest = remaining.trim_start();
    if !rest.is_empty() {
        let snippet: String = rest
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(40)
            .collect();
        return Err(SheetError::InvalidSyntax(format!(
            "unexpected input on line {}: {}",
            line_of(source, rest),
            snippet.trim_end()
        )));
    }

    Ok(items)
}

/// 1-based line of `rest` within `source`, where `rest` is a suffix of it.
fn line_of(source: &str, rest: &str) -> usize {
    let consumed = source.len() - rest.len();
    source[..consumed].matches('\n').count() + 1
}

/// A top-level item: an at-rule or a rule block.
fn parse_item(input: &str) -> IResult<&str, Item<'_>> {
    preceded(multispace0, alt((parse_at_rule, parse_rule)))(input)
}

/// `@name: value;` or `@name { declarations }`.
fn parse_at_rule(input: &str) -> IResult<&str, Item<'_>> {
    let (input, name) = preceded(char('@'), parse_ident)(input)?;
    let (input, _) = multispace0(input)?;

    let (input, body) = alt((
        map(braced(parse_declarations), AtBody::Block),
        map(
            delimited(
                pair(char(':'), multispace0),
                parse_value,
                preceded(multispace0, char(';')),
            ),
            AtBody::Value,
        ),
    ))(input)?;

    Ok((input, Item::At { name, body }))
}

/// `name { ... }`, where the body mixes declarations and nested blocks.
fn parse_rule(input: &str) -> IResult<&str, Item<'_>> {
    let (input, name) = parse_ident(input)?;
    let (input, _) = multispace0(input)?;
    let (input, body) = braced(many0(parse_body_item))(input)?;
    Ok((input, Item::Rule { name, body }))
}

fn parse_body_item(input: &str) -> IResult<&str, BodyItem<'_>> {
    preceded(
        multispace0,
        alt((
            parse_nested_block,
            map(parse_declaration, BodyItem::Declaration),
        )),
    )(input)
}

/// `inside { ... }` / `after { ... }`. Only declarations may appear inside.
fn parse_nested_block(input: &str) -> IResult<&str, BodyItem<'_>> {
    let (input, name) = parse_ident(input)?;
    let (input, _) = multispace0(input)?;
    let (input, declarations) = braced(parse_declarations)(input)?;
    Ok((input, BodyItem::Block { name, declarations }))
}

fn parse_declarations(input: &str) -> IResult<&str, Vec<Declaration<'_>>> {
    many0(preceded(multispace0, parse_declaration))(input)
}

/// `property: value;`. The semicolon is required.
fn parse_declaration(input: &str) -> IResult<&str, Declaration<'_>> {
    let (input, property) = parse_ident(input)?;
    let (input, _) = tuple((multispace0, char(':'), multispace0))(input)?;
    let (input, value) = parse_value(input)?;
    let (input, _) = preceded(multispace0, char(';'))(input)?;
    Ok((input, Declaration { property, value }))
}

fn parse_value(input: &str) -> IResult<&str, Value<'_>> {
    alt((
        map(parse_quoted, Value::Quoted),
        map(
            take_till1(|c: char| matches!(c, ';' | ':' | '{' | '}' | '"')),
            |value: &str| Value::Bare(value.trim_end()),
        ),
    ))(input)
}

/// Wraps `inner` in braces, allowing whitespace before the closing one.
fn braced<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: Parser<&'a str, O, nom::error::Error<&'a str>>,
{
    delimited(char('{'), inner, preceded(multispace0, char('}')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declaration() {
        let (rest, decl) = parse_declaration("fg : green ; x").unwrap();
        assert_eq!(rest, " x");
        assert_eq!(
            decl,
            Declaration {
                property: "fg",
                value: Value::Bare("green"),
            }
        );
    }

    #[test]
    fn test_quoted_value_may_hold_braces() {
        let (_, decl) = parse_declaration("close: \"%}\";").unwrap();
        assert_eq!(decl.value, Value::Quoted("%}"));
    }

    #[test]
    fn test_declaration_requires_semicolon() {
        assert!(parse_declaration("fg: red }").is_err());
        assert!(parse_declaration("fg: red enable: bold;").is_err());
    }

    #[test]
    fn test_parse_rule_with_nested_blocks() {
        let (_, item) = parse_rule("weird { inside { fg: red; } after { fg: blue; } }").unwrap();
        let Item::Rule { name, body } = item else {
            panic!("expected a rule");
        };
        assert_eq!(name, "weird");
        assert_eq!(body.len(), 2);
        assert!(matches!(body[0], BodyItem::Block { name: "inside", .. }));
        assert!(matches!(body[1], BodyItem::Block { name: "after", .. }));
    }

    #[test]
    fn test_parse_at_rules() {
        let (_, item) = parse_at_rule("@after: keep;").unwrap();
        assert_eq!(
            item,
            Item::At {
                name: "after",
                body: AtBody::Value(Value::Bare("keep")),
            }
        );

        let (_, item) = parse_at_rule("@symbols { open: \"<\"; }").unwrap();
        assert!(matches!(item, Item::At { name: "symbols", body: AtBody::Block(ref d) } if d.len() == 1));
    }

    #[test]
    fn test_trailing_garbage_reports_line() {
        let err = parse_items("a { fg: red; }\n\nb { fg: red;\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "rule sheet syntax error: unexpected input on line 3: b { fg: red;"
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(parse_items("  \n ").unwrap().is_empty());
    }
}
