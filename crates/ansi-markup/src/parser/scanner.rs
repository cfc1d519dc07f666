//! Scanner for rule markup.
//!
//! Finds every occurrence of the open symbol followed by a rule name, the
//! close symbol and the reset symbol, and splits the text into a stream of
//! tokens.

use crate::rule_set::Symbols;

/// A token produced by the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text, passed through unchanged.
    Text(&'a str),
    /// A rule opens: the open symbol followed by this rule name.
    Open(&'a str),
    /// The close symbol.
    Close,
    /// The reset symbol.
    Reset,
}

/// What a matcher reports when its pattern is found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    Open(String),
    Close,
    Reset,
}

/// One literal pattern and the symbol it stands for.
#[derive(Clone, Debug)]
struct Matcher {
    pattern: String,
    symbol: Symbol,
}

/// An occurrence of a matcher in the scanned text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// Index of the matcher that produced this occurrence.
    pub matcher: usize,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset of the last matched byte (inclusive).
    pub end: usize,
    /// Byte offset where scanning resumes.
    pub resume: usize,
}

/// Scanner holding one matcher per rule name plus the close and reset
/// matchers.
///
/// # Examples
///
/// ```
/// use ansi_markup::parser::{Scanner, Token};
/// use ansi_markup::Symbols;
///
/// let scanner = Scanner::new(&Symbols::default(), ["red"]);
/// let tokens = scanner.tokenize("a{%redB%}c");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Text("a"),
///         Token::Open("red"),
///         Token::Text("B"),
///         Token::Close,
///         Token::Text("c"),
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Scanner {
    matchers: Vec<Matcher>,
}

impl Scanner {
    /// Build matchers for the given symbols and rule names.
    ///
    /// Names are sorted so matcher order does not depend on map order.
    pub fn new<'n>(symbols: &Symbols, names: impl IntoIterator<Item = &'n str>) -> Self {
        let mut names: Vec<&str> = names.into_iter().filter(|n| !n.is_empty()).collect();
        names.sort_unstable();
        names.dedup();

        let mut matchers = Vec::with_capacity(names.len() + 2);
        matchers.push(Matcher {
            pattern: symbols.close.clone(),
            symbol: Symbol::Close,
        });
        matchers.push(Matcher {
            pattern: symbols.reset.clone(),
            symbol: Symbol::Reset,
        });
        for name in names {
            matchers.push(Matcher {
                pattern: format!("{}{}", symbols.open, name),
                symbol: Symbol::Open(name.to_string()),
            });
        }

        Self { matchers }
    }

    /// Number of matchers, including close and reset.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Symbol reported by the matcher at `index`.
    pub fn symbol(&self, index: usize) -> Option<&Symbol> {
        self.matchers.get(index).map(|m| &m.symbol)
    }

    /// Locate all occurrences, in text order.
    ///
    /// Scanning is leftmost-first: at each step the occurrence with the
    /// smallest start wins (longest match first on ties), and every matcher
    /// then resumes from its end. A matcher's cached hit is searched again
    /// once the accepted occurrence passes it.
    pub fn locate(&self, text: &str) -> Vec<Location> {
        let mut pending: Vec<Option<Location>> = vec![None; self.matchers.len()];
        let mut done: Vec<bool> = self.matchers.iter().map(|m| m.pattern.is_empty()).collect();
        let mut locations = Vec::new();
        let mut floor = 0;

        loop {
            for (index, matcher) in self.matchers.iter().enumerate() {
                if done[index] {
                    continue;
                }
                if matches!(pending[index], Some(hit) if hit.start >= floor) {
                    continue;
                }
                pending[index] = text[floor..]
                    .find(matcher.pattern.as_str())
                    .map(|offset| {
                        let start = floor + offset;
                        let resume = start + matcher.pattern.len();
                        Location {
                            matcher: index,
                            start,
                            end: resume - 1,
                            resume,
                        }
                    });
                if pending[index].is_none() {
                    done[index] = true;
                }
            }

            let next = pending
                .iter()
                .flatten()
                .filter(|hit| hit.start >= floor)
                .min_by(|a, b| a.start.cmp(&b.start).then(b.resume.cmp(&a.resume)))
                .copied();

            match next {
                Some(location) => {
                    floor = location.resume;
                    pending[location.matcher] = None;
                    locations.push(location);
                }
                None => break,
            }
        }

        locations
    }

    /// Split `text` into literal spans and symbol tokens.
    ///
    /// Empty literal spans are not emitted.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> Vec<Token<'a>> {
        let locations = self.locate(text);
        let mut tokens = Vec::with_capacity(locations.len() * 2 + 1);
        let mut cursor = 0;

        for location in locations {
            if location.start > cursor {
                tokens.push(Token::Text(&text[cursor..location.start]));
            }
            tokens.push(match &self.matchers[location.matcher].symbol {
                Symbol::Open(name) => Token::Open(name.as_str()),
                Symbol::Close => Token::Close,
                Symbol::Reset => Token::Reset,
            });
            cursor = location.resume;
        }

        if cursor < text.len() {
            tokens.push(Token::Text(&text[cursor..]));
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(names: &[&str]) -> Scanner {
        Scanner::new(&Symbols::default(), names.iter().copied())
    }

    #[test]
    fn plain_text_is_one_span() {
        let s = scanner(&["red"]);
        let tokens = s.tokenize("Hello World");
        assert_eq!(tokens, vec![Token::Text("Hello World")]);
    }

    #[test]
    fn empty_text() {
        assert!(scanner(&["red"]).tokenize("").is_empty());
    }

    #[test]
    fn matchers_include_close_and_reset() {
        let s = scanner(&["b", "a"]);
        assert_eq!(s.len(), 4);
        assert_eq!(s.symbol(0), Some(&Symbol::Close));
        assert_eq!(s.symbol(1), Some(&Symbol::Reset));
        assert_eq!(s.symbol(2), Some(&Symbol::Open("a".into())));
    }

    #[test]
    fn locations_are_in_text_order() {
        let s = scanner(&["a", "b"]);
        let text = "{%bx{%ay%}%}%@";
        let starts: Vec<usize> = s.locate(text).iter().map(|l| l.start).collect();
        assert_eq!(starts, vec![0, 4, 8, 10, 12]);
    }

    #[test]
    fn location_bounds() {
        let s = scanner(&["red"]);
        let locations = s.locate("ab{%red");
        assert_eq!(
            locations,
            vec![Location {
                matcher: 2,
                start: 2,
                end: 6,
                resume: 7
            }]
        );
    }

    #[test]
    fn nested_tokens() {
        let s = scanner(&["outer", "inner"]);
        let tokens = s.tokenize("{%outerX{%innerY%}Z%}");
        assert_eq!(
            tokens,
            vec![
                Token::Open("outer"),
                Token::Text("X"),
                Token::Open("inner"),
                Token::Text("Y"),
                Token::Close,
                Token::Text("Z"),
                Token::Close,
            ]
        );
    }

    #[test]
    fn longest_name_wins_on_shared_prefix() {
        let s = scanner(&["red", "redder"]);
        let tokens = s.tokenize("{%redderX{%redY");
        assert_eq!(
            tokens,
            vec![
                Token::Open("redder"),
                Token::Text("X"),
                Token::Open("red"),
                Token::Text("Y"),
            ]
        );
    }

    #[test]
    fn unknown_names_stay_literal() {
        let s = scanner(&["red"]);
        let tokens = s.tokenize("{%blue%}");
        assert_eq!(tokens, vec![Token::Text("{%blue"), Token::Close]);
    }

    #[test]
    fn overlapping_symbols_resolve_leftmost() {
        // "%}" starts inside "{%" + "}" rule name
        let s = scanner(&["}"]);
        let tokens = s.tokenize("{%}x");
        assert_eq!(tokens, vec![Token::Open("}"), Token::Text("x")]);
    }

    #[test]
    fn skipped_overlap_is_searched_again() {
        // "!-" takes the first dash, so "--" must be found one byte later
        let symbols = Symbols::new("<", "--", "!-");
        let s = Scanner::new(&symbols, ["b"]);
        let tokens = s.tokenize("a!---b");
        assert_eq!(
            tokens,
            vec![Token::Text("a"), Token::Reset, Token::Close, Token::Text("b")]
        );
    }

    #[test]
    fn self_overlapping_close() {
        let symbols = Symbols::new("<", "%%", "<%");
        let s = Scanner::new(&symbols, ["x"]);
        let tokens = s.tokenize("<xA<%%%B");
        assert_eq!(
            tokens,
            vec![
                Token::Open("x"),
                Token::Text("A"),
                Token::Reset,
                Token::Close,
                Token::Text("B"),
            ]
        );
    }

    #[test]
    fn repeated_symbols() {
        let s = scanner(&[]);
        let tokens = s.tokenize("%@%@");
        assert_eq!(tokens, vec![Token::Reset, Token::Reset]);
    }

    #[test]
    fn unicode_text() {
        let s = scanner(&["b"]);
        let tokens = s.tokenize("日本{%b語%}");
        assert_eq!(
            tokens,
            vec![
                Token::Text("日本"),
                Token::Open("b"),
                Token::Text("語"),
                Token::Close,
            ]
        );
    }

    #[test]
    fn custom_symbols() {
        let symbols = Symbols::new("<", ">", "<!>");
        let s = Scanner::new(&symbols, ["em"]);
        let tokens = s.tokenize("a<emb>c<!>");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a"),
                Token::Open("em"),
                Token::Text("b"),
                Token::Close,
                Token::Text("c"),
                Token::Reset,
            ]
        );
    }
}
