//! Comment stripping and `$variable` substitution.
//!
//! Runs on the raw source before the grammar sees it:
//!
//! 1. Block comments (`/* */`) are removed, keeping their newlines
//! 2. Definitions (`$name: value;`) are collected and blanked out
//! 3. References (`$name`) are replaced with their values
//!
//! ```css
//! $accent: [208];
//!
//! warn { fg: $accent; }
//! ```
//!
//! Quoted strings are copied verbatim by both passes, so `"/*"` or `"$"`
//! can be used as a symbol value.
//!
//! Line numbers of the processed text match the source, so syntax errors
//! can point at the line the author wrote.

use std::collections::HashMap;

use crate::error::SheetError;

/// Variables defined at the top of a sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetVariables {
    variables: HashMap<String, String>,
}

impl SheetVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a variable.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Remove block comments, keeping the newlines they span.
pub fn strip_comments(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            output.push(c);
            copy_quoted(&mut chars, &mut output);
            continue;
        }
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            while let Some(inner) = chars.next() {
                if inner == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    break;
                }
                if inner == '\n' {
                    output.push('\n');
                }
            }
            continue;
        }
        output.push(c);
    }

    output
}

/// Collect `$name: value;` definitions. Expects comment-free input.
pub fn extract_variables(source: &str) -> SheetVariables {
    let mut vars = SheetVariables::new();

    for line in source.lines() {
        let Some(definition) = line.trim().strip_prefix('$') else {
            continue;
        };
        let Some((name, value)) = definition.split_once(':') else {
            continue;
        };
        let value = value.trim();
        let value = value.strip_suffix(';').unwrap_or(value).trim_end();
        vars.define(name.trim(), value);
    }

    vars
}

/// Blank out definition lines and substitute references.
///
/// A lone `$` not followed by a name is kept as is.
pub fn resolve_variables(source: &str, vars: &SheetVariables) -> Result<String, SheetError> {
    let mut output = String::with_capacity(source.len());

    for line in source.lines() {
        if !line.trim().starts_with('$') {
            resolve_line(line, vars, &mut output)?;
        }
        output.push('\n');
    }

    Ok(output)
}

fn resolve_line(line: &str, vars: &SheetVariables, output: &mut String) -> Result<(), SheetError> {
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            output.push(c);
            copy_quoted(&mut chars, output);
            continue;
        }
        if c != '$' {
            output.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '-' || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            output.push('$');
            continue;
        }
        match vars.resolve(&name) {
            Some(value) => output.push_str(value),
            None => return Err(SheetError::UnknownVariable(name)),
        }
    }

    Ok(())
}

/// Copy up to and including the closing quote. An unterminated string runs
/// to the end of the input.
fn copy_quoted(chars: &mut impl Iterator<Item = char>, output: &mut String) {
    for c in chars {
        output.push(c);
        if c == '"' {
            break;
        }
    }
}
