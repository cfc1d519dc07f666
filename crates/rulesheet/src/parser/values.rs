//! Value parsing for rule sheet properties.
//!
//! - Identifiers: rule names, property names, keywords
//! - Colors: `red`, `208`, `[208]`, `[30, 80, 128]`
//! - Lists: `bold, underline` or `bold underline`
//! - Quoted strings: `"{%"`

use ansi_markup::ColorSpec;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map_res, value},
    multi::separated_list1,
    sequence::{delimited, pair, tuple},
};

/// Parses an identifier (alphanumeric characters, dashes, and underscores).
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Parses a double-quoted string without escapes, returning its contents.
pub fn parse_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c: char| c == '"'), char('"'))(input)
}

/// A comma, optionally surrounded by whitespace, or plain whitespace.
fn list_separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), tuple((multispace0, char(','), multispace0))),
        value((), multispace1),
    ))(input)
}

/// Parses one or more identifiers separated by commas or whitespace.
pub fn parse_ident_list(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(list_separator, parse_ident)(input)
}

/// Parses a bracketed sequence of color components: `[208]`, `[1, 2, 3]`.
pub fn parse_components(input: &str) -> IResult<&str, Vec<u8>> {
    delimited(
        pair(char('['), multispace0),
        separated_list1(list_separator, map_res(digit1, str::parse::<u8>)),
        pair(multispace0, char(']')),
    )(input)
}

/// Parses a color value.
///
/// Bracketed components go through [`ColorSpec::from_components`]; bare
/// words are color names or palette indices.
pub fn parse_color(input: &str) -> IResult<&str, ColorSpec> {
    alt((
        map_res(parse_components, |components| {
            ColorSpec::from_components(&components)
        }),
        map_res(parse_ident, str::parse::<ColorSpec>),
    ))(input)
}

/// Parses a keyword into any type with a `FromStr` implementation.
pub fn parse_keyword<T: std::str::FromStr>(input: &str) -> IResult<&str, T> {
    map_res(parse_ident, str::parse::<T>)(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansi_markup::{Attribute, NamedColor};
    use nom::combinator::all_consuming;

    #[test]
    fn test_parse_ident() {
        assert_eq!(parse_ident("name-2 {"), Ok((" {", "name-2")));
        assert!(parse_ident("{").is_err());
    }

    #[test]
    fn test_parse_quoted() {
        assert_eq!(parse_quoted("\"{%\";"), Ok((";", "{%")));
        assert_eq!(parse_quoted("\"\""), Ok(("", "")));
        assert!(parse_quoted("\"open").is_err());
    }

    #[test]
    fn test_ident_lists() {
        assert_eq!(
            all_consuming(parse_ident_list)("bold, underline italic").unwrap().1,
            vec!["bold", "underline", "italic"]
        );
        assert_eq!(
            all_consuming(parse_ident_list)("bold ,underline").unwrap().1,
            vec!["bold", "underline"]
        );
        assert!(all_consuming(parse_ident_list)("bold,").is_err());
    }

    #[test]
    fn test_named_and_indexed_colors() {
        assert_eq!(
            parse_color("green").unwrap().1,
            ColorSpec::Named(NamedColor::Green)
        );
        assert_eq!(parse_color("RED").unwrap().1, ColorSpec::Named(NamedColor::Red));
        assert_eq!(parse_color("52").unwrap().1, ColorSpec::Indexed(52));
        assert!(parse_color("256").is_err());
        assert!(parse_color("purple").is_err());
    }

    #[test]
    fn test_component_colors() {
        assert_eq!(parse_color("[208]").unwrap().1, ColorSpec::Indexed(208));
        assert_eq!(
            parse_color("[ 30, 80 128 ]").unwrap().1,
            ColorSpec::TrueColor(30, 80, 128)
        );
        assert!(parse_color("[1, 2]").is_err());
        assert!(parse_color("[1, 2, 300]").is_err());
    }

    #[test]
    fn test_keywords() {
        let (_, attribute) = parse_keyword::<Attribute>("intense").unwrap();
        assert_eq!(attribute, Attribute::Bold);
        assert!(parse_keyword::<Attribute>("blink").is_err());
    }
}
