/// Property-based tests for the JSON5 parser.
///
/// Uses `proptest` to generate random value trees, render them as JSON5 text
/// with the syntax variations the grammar allows (quote styles, hex integers,
/// comments, trailing commas), and check that parsing gives the tree back.
/// A second group feeds arbitrary text to the parser to check that it always
/// terminates without panicking.
///
/// The renderer here is test-only: the library does not write JSON5.
use proptest::prelude::*;
use std::collections::BTreeMap;

use json5_core::{parse, parse_with, ParseOptions, Value};

// ============================================================================
// Strategies
// ============================================================================

/// A bare identifier key.
fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_$][a-zA-Z0-9_$]{0,12}").unwrap()
}

/// String content without quotes or backslashes, so it can be written raw.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ,:{}\\[\\]/*-]{0,20}",
        Just(String::new()),
        Just("caf\u{e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
    ]
}

/// Floats with a fractional part and few decimals, so `{:?}` text parses back exactly.
fn arb_float() -> impl Strategy<Value = f64> {
    (-100_000_000i64..100_000_000i64, 1u32..5u32).prop_filter_map(
        "must have a fractional part",
        |(mantissa, decimals)| {
            let f = mantissa as f64 / 10f64.powi(decimals as i32);
            (f.fract() != 0.0).then_some(f)
        },
    )
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        arb_float().prop_map(Value::Float),
        arb_text().prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..6).prop_map(Value::Object),
        ]
    })
}

/// Rendering choices applied while writing a tree as JSON5 text.
#[derive(Debug, Clone, Copy)]
struct Style {
    single_quotes: bool,
    quoted_keys: bool,
    hex_integers: bool,
    trailing_commas: bool,
    comments: bool,
}

fn arb_style() -> impl Strategy<Value = Style> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(single_quotes, quoted_keys, hex_integers, trailing_commas, comments)| Style {
            single_quotes,
            quoted_keys,
            hex_integers,
            trailing_commas,
            comments,
        },
    )
}

fn render(value: &Value, style: Style, out: &mut String) {
    let quote = if style.single_quotes { '\'' } else { '"' };
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) if style.hex_integers => {
            let sign = if *n < 0 { "-" } else { "" };
            out.push_str(&format!("{sign}0x{:X}", n.unsigned_abs()));
        }
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&format!("{f:?}")),
        Value::String(s) => {
            out.push(quote);
            out.push_str(s);
            out.push(quote);
        }
        Value::Array(arr) => {
            out.push('[');
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render(v, style, out);
            }
            if style.trailing_commas && !arr.is_empty() {
                out.push(',');
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            if style.comments {
                out.push_str(" // members\n");
            }
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if style.quoted_keys {
                    out.push(quote);
                    out.push_str(k);
                    out.push(quote);
                } else {
                    out.push_str(k);
                }
                out.push_str(": ");
                if style.comments {
                    out.push_str("/* value */ ");
                }
                render(v, style, out);
            }
            if style.trailing_commas && !map.is_empty() {
                out.push(',');
            }
            out.push('}');
        }
    }
}

fn count_nodes(value: &Value) -> usize {
    match value {
        Value::Array(arr) => 1 + arr.iter().map(count_nodes).sum::<usize>(),
        Value::Object(map) => 1 + map.values().map(count_nodes).sum::<usize>(),
        _ => 1,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn rendered_tree_parses_back(value in arb_value(), style in arb_style()) {
        let mut text = String::new();
        render(&value, style, &mut text);
        prop_assert_eq!(parse(&text), value, "text: {}", text);
    }

    #[test]
    fn container_size_matches_member_count(
        items in prop::collection::vec(any::<i32>(), 0..20),
        trailing in any::<bool>(),
    ) {
        let mut text = items.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        if trailing && !items.is_empty() {
            text.push(',');
        }
        let arr = parse(&format!("[{text}]"));
        prop_assert_eq!(arr.size(), items.len());

        let members: BTreeMap<String, i32> =
            items.iter().enumerate().map(|(i, n)| (format!("k{i}"), *n)).collect();
        let mut text = members.iter().map(|(k, n)| format!("{k}: {n}")).collect::<Vec<_>>().join(", ");
        if trailing && !members.is_empty() {
            text.push(',');
        }
        let obj = parse(&format!("{{{text}}}"));
        prop_assert_eq!(obj.size(), members.len());
    }

    #[test]
    fn whitespace_around_value_is_insignificant(value in arb_value(), pad in "[ \t\r\n]{0,4}") {
        let mut text = String::new();
        render(&value, Style { single_quotes: true, quoted_keys: false, hex_integers: false, trailing_commas: false, comments: false }, &mut text);
        prop_assert_eq!(parse(&format!("{pad}{text}{pad}")), value);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,64}") {
        let _ = parse(&text);
    }

    #[test]
    fn json5_alphabet_never_panics(text in "[\\[\\]{}:,'\"\\\\/*a-z0-9.+\\-xXeE \n\u{e9}\u{2028}]{0,64}") {
        let _ = parse(&text);
    }

    #[test]
    fn depth_limit_bounds_tree(depth in 0usize..8, value in arb_value()) {
        let mut text = String::new();
        render(&value, Style { single_quotes: false, quoted_keys: true, hex_integers: false, trailing_commas: false, comments: false }, &mut text);
        let opts = ParseOptions::default().with_max_depth(depth);
        let parsed = parse_with(&text, &opts);
        prop_assert!(count_nodes(&parsed) <= count_nodes(&value));
    }
}
