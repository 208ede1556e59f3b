/// Property-based roundtrip tests.
///
/// Uses `proptest` to build random `Value` trees and checks that
/// `parse(v.to_string()) == v` holds, that serialization is a fixed point,
/// and that the parser never panics on arbitrary text.
///
/// Strategies generate:
/// - Full-range `i32` and finite `f64` (subnormals and signed zero included)
/// - Strings with arbitrary Unicode, restricted to the control characters
///   the parser reads back (`\n`, `\t`, `\r`)
/// - Arrays and objects nested up to 4 levels
use proptest::prelude::*;
use tinyjson_core::{parse, JsonError, Limits, Object, Parser, Value};

// ============================================================================
// Strategies for generating values
// ============================================================================

/// Text the serializer writes with an escape the parser accepts.
fn arb_json_string() -> impl Strategy<Value = String> {
    prop_oneof![
        // Arbitrary Unicode without control characters
        "[^\\x00-\\x1f]{0,20}",
        // Escapable characters mixed with plain ASCII
        "[a-z\"\\\\\n\t\r ]{0,20}",
        Just(String::new()),
        Just("null".to_string()),
        Just("-1.5e3".to_string()),
        Just("caf\u{00e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
    ]
}

fn arb_double() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>().prop_filter("must be finite", |f| f.is_finite()),
        (-1_000_000i64..1_000_000i64, 0u32..6u32)
            .prop_map(|(mantissa, decimals)| mantissa as f64 / 10f64.powi(decimals as i32)),
        Just(-0.0),
    ]
}

fn arb_primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::Int),
        arb_double().prop_map(Value::Double),
        arb_json_string().prop_map(Value::String),
    ]
}

/// Generate a value with limited nesting (recursive).
fn arb_json_value_inner(depth: u32) -> impl Strategy<Value = Value> {
    if depth == 0 {
        arb_primitive().boxed()
    } else {
        prop_oneof![
            4 => arb_primitive(),
            2 => prop::collection::vec((arb_json_string(), arb_json_value_inner(depth - 1)), 0..5)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Object>())),
            2 => prop::collection::vec(arb_json_value_inner(depth - 1), 0..5)
                .prop_map(Value::Array),
        ]
        .boxed()
    }
}

fn arb_json_value() -> impl Strategy<Value = Value> {
    arb_json_value_inner(4)
}

fn nested_arrays(n: usize) -> String {
    format!("{}{}", "[".repeat(n), "]".repeat(n))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Core roundtrip property: parse(serialize(v)) == v.
    #[test]
    fn roundtrip_preserves_value(value in arb_json_value()) {
        let text = value.to_string();
        let back = parse(&text);
        prop_assert!(back.is_ok(), "failed to re-parse {:?}: {:?}", text, back);
        prop_assert_eq!(back.unwrap(), value, "serialized: {}", text);
    }

    /// Serializing the re-parsed tree gives the same text.
    #[test]
    fn serialization_is_idempotent(value in arb_json_value()) {
        let first = value.to_string();
        let second = parse(&first).unwrap().to_string();
        prop_assert_eq!(first, second);
    }

    /// Pretty output describes the same tree as compact output.
    #[test]
    fn pretty_roundtrip(value in arb_json_value()) {
        let pretty = value.to_pretty_string();
        prop_assert_eq!(parse(&pretty).unwrap(), value);
    }

    /// Integers keep the int tag, doubles keep the double tag.
    #[test]
    fn numbers_keep_their_tag(n in any::<i32>(), f in arb_double()) {
        let int = parse(&Value::Int(n).to_string()).unwrap();
        let double = parse(&Value::Double(f).to_string()).unwrap();
        prop_assert!(int.is_int());
        prop_assert!(double.is_double());
        prop_assert_eq!(int, n);
        prop_assert_eq!(double, f);
    }

    /// Parsing arbitrary text returns a value or an error; never panics, and
    /// error offsets stay within the input.
    #[test]
    fn parse_never_panics(text in any::<String>()) {
        if let Err(err) = parse(&text) {
            if let Some(offset) = err.offset() {
                prop_assert!(offset <= text.len(), "{err} for {text:?}");
            }
        }
    }

    /// Same, biased toward JSON-looking input.
    #[test]
    fn parse_never_panics_on_json_like_text(text in "[\\[\\]{}:,\" 0-9a-z.eE+\\-\\\\]{0,40}") {
        let _ = parse(&text);
    }

    /// Nesting at or below the limit parses; one past it fails with the
    /// offending depth.
    #[test]
    fn depth_limit_is_exact(max in 1usize..100) {
        let limits = Limits::with_max_depth(max);
        prop_assert!(Parser::new(&nested_arrays(max)).with_limits(limits).parse().is_ok());
        let err = Parser::new(&nested_arrays(max + 1))
            .with_limits(limits)
            .parse()
            .unwrap_err();
        prop_assert_eq!(err, JsonError::MaxDepthExceeded { depth: max + 1, max, offset: max });
    }
}
