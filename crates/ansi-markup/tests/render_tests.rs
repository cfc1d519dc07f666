//! End-to-end markup rendering tests.

use std::sync::Arc;
use std::thread;

use ansi_markup::{
    AfterPolicy, Attribute, ColorSpec, NamedColor, Part, RuleDefinition, RuleSet, RuleSetOptions,
    Symbols,
};
use insta::assert_snapshot;

/// Make escape bytes readable in snapshots.
fn visible(text: &str) -> String {
    text.replace('\x1b', "\\e")
}

fn chat_rules() -> RuleSet {
    RuleSet::with_defaults([
        (
            "name",
            RuleDefinition::new()
                .fg(NamedColor::Green)
                .enable(Attribute::Underline),
        ),
        ("quote", RuleDefinition::new().enable(Attribute::Italic)),
        ("warn", RuleDefinition::new().fg(ColorSpec::Indexed(208)).enable(Attribute::Bold)),
        ("panel", RuleDefinition::new().bg([30, 30, 46])),
    ])
    .unwrap()
}

// ============================================================================
// Basic scenarios
// ============================================================================

#[test]
fn single_rule() {
    let rules = RuleSet::with_defaults([("red", RuleDefinition::new().fg(NamedColor::Red))]).unwrap();
    let out = rules.apply("a{%redB%}c");
    assert_eq!(out, "a\x1b[31mB\x1b[39mc");
    assert_snapshot!(visible(&out), @r"a\e[31mB\e[39mc");
}

#[test]
fn nested_rules_restore_outer() {
    let rules = RuleSet::with_defaults([
        ("outer", RuleDefinition::new().fg(NamedColor::Blue)),
        ("inner", RuleDefinition::new().enable(Attribute::Italic)),
    ])
    .unwrap();
    let out = rules.apply("{%outerX{%innerY%}Z%}");
    assert_snapshot!(visible(&out), @r"\e[34mX\e[3mY\e[23m\e[34mZ\e[39m");
}

#[test]
fn bare_reset() {
    let rules = RuleSet::with_defaults(Vec::<(&str, RuleDefinition)>::new()).unwrap();
    assert_eq!(rules.apply("%@"), "\x1b[0m");
}

#[test]
fn empty_rule_set_passes_plain_text_through() {
    let rules = RuleSet::with_defaults(Vec::<(&str, RuleDefinition)>::new()).unwrap();
    let text = "no markup here, just text: 100% {braces}";
    assert_eq!(rules.apply(text), text);
}

#[test]
fn unknown_rule_name_stays_literal() {
    let rules = RuleSet::with_defaults([("red", RuleDefinition::new().fg(NamedColor::Red))]).unwrap();
    assert_eq!(rules.apply("{%blueX"), "{%blueX");
}

#[test]
fn chat_line() {
    let out = chat_rules().apply("{%nameJohn%}: {%quoteRoses are red%}");
    assert_snapshot!(visible(&out), @r"\e[4m\e[32mJohn\e[39m\e[24m: \e[3mRoses are red\e[23m");
}

#[test]
fn extended_colors() {
    let out = chat_rules().apply("{%panel{%warnhot%} cold%}");
    assert_snapshot!(
        visible(&out),
        @r"\e[48;2;30;30;46m\e[1m\e[38;5;208mhot\e[39m\e[21m\e[48;2;30;30;46m cold\e[49m"
    );
}

// ============================================================================
// Delimiters
// ============================================================================

#[test]
fn no_residual_delimiters() {
    let rules = chat_rules();
    let inputs = [
        "{%nameA%}",
        "{%name{%quoteB%}%}",
        "%@{%warnC%}%@",
        "{%panel{%name{%quote{%warnD%}%}%}%}",
    ];
    for input in inputs {
        let out = rules.apply(input);
        assert!(!out.contains("{%"), "{input} -> {out:?}");
        assert!(!out.contains("%}"), "{input} -> {out:?}");
        assert!(!out.contains("%@"), "{input} -> {out:?}");
    }
}

#[test]
fn custom_symbols() {
    let options = RuleSetOptions::new().symbols(Symbols::new("<", ">", "<!>"));
    let rules = RuleSet::new(
        [("b", RuleDefinition::new().enable(Attribute::Bold))],
        options,
    )
    .unwrap();
    let out = rules.apply("x<bY> z<!>");
    assert_snapshot!(visible(&out), @r"x\e[1mY\e[21m z\e[0m");
}

#[test]
fn self_overlapping_close_symbol() {
    let options = RuleSetOptions::new().symbols(Symbols::new("<", "%%", "<%"));
    let rules = RuleSet::new(
        [("x", RuleDefinition::new().enable(Attribute::Bold))],
        options,
    )
    .unwrap();
    let out = rules.apply("<xA<%%%B");
    assert_snapshot!(visible(&out), @r"\e[1mA\e[0mB");
    assert_eq!(rules.strip("<xA<%%%B"), "AB");
}

// ============================================================================
// Reset and stack behavior
// ============================================================================

#[test]
fn reset_while_rules_are_open() {
    let out = chat_rules().apply("{%name{%quoteA%@B%}C");
    // the stack is empty after the reset, so the trailing close is a no-op
    assert_snapshot!(visible(&out), @r"\e[4m\e[32m\e[3mA\e[0mBC");
}

#[test]
fn unbalanced_closes_are_ignored() {
    let out = chat_rules().apply("%}%}{%quoteA%}%}B");
    assert_snapshot!(visible(&out), @r"\e[3mA\e[23mB");
}

#[test]
fn keep_policy_leaves_state_open() {
    let rules = RuleSet::new(
        [
            ("red", RuleDefinition::new().fg(NamedColor::Red)),
            (
                "soft",
                RuleDefinition::new()
                    .enable(Attribute::Dim)
                    .with_after(Part::new().disable(Attribute::Dim)),
            ),
        ],
        RuleSetOptions::new().after(AfterPolicy::Keep),
    )
    .unwrap();
    let out = rules.apply("{%redA%} {%softB%}");
    assert_snapshot!(visible(&out), @r"\e[31mA \e[2mB\e[22m");
}

// ============================================================================
// Strip and sharing
// ============================================================================

#[test]
fn strip_removes_markup() {
    let rules = chat_rules();
    assert_eq!(
        rules.strip("{%nameJohn%}: {%quoteRoses%}%@ {%nopeX"),
        "John: Roses {%nopeX"
    );
}

#[test]
fn rule_set_is_shared_between_threads() {
    let rules = Arc::new(chat_rules());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || rules.apply(&format!("{{%quote{i}%}}")))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(out, format!("\x1b[3m{i}\x1b[23m"));
    }
}
