use rstest::rstest;

use super::*;
use crate::text::TextIndex;

/// Clean and index `text`, then evaluate `expr` against it.
fn query(text: &str, expr: &str) -> bool {
    let node = tokenize_and_parse(expr).expect("parse should succeed");
    evaluate(&node, &TextIndex::from_raw(text))
}

fn code(expr: &str) -> Option<ErrorCode> {
    tokenize_and_parse(expr)
        .expect_err("parse should fail")
        .code()
}

// --- Boolean chains ---

#[rstest]
#[case("foo bar", "foo OR bar AND baz", false)]
#[case("foo bar baz", "foo OR bar AND baz", true)]
#[case("foo qux", "NOT foo AND qux", false)]
#[case("foo qux", "NOT (bar) AND qux", true)]
#[case("foo bar", "NOT foo OR bar", true)]
#[case("foo bar", "NOT (foo OR bar)", false)]
#[case("foo baz", "(foo OR bar) AND baz", true)]
#[case("bar qux", "(foo OR bar) AND baz", false)]
#[case("foo baz", "foo XOR bar", true)]
#[case("foo bar", "foo XOR bar", false)]
#[case("qux", "foo XOR bar", false)]
#[case("foo", "NOT NOT foo", true)]
#[case("nasa rocket launch", "NASA AND rocket", true)]
fn test_boolean(#[case] text: &str, #[case] expr: &str, #[case] expected: bool) {
    assert_eq!(query(text, expr), expected, "{expr:?} on {text:?}");
}

// --- Positional operators ---

#[rstest]
#[case("foo bar", "foo BEF/1 bar", true)]
#[case("foo bar", "foo BEF bar", true)]
#[case("bar foo", "foo BEF bar", false)]
#[case("foo x bar", "foo NEAR/2 bar", true)]
#[case("foo x y bar", "foo NEAR/1 bar", false)]
#[case("bar foo", "foo NEAR bar", true)]
#[case("foo foo", "foo NEAR/0 foo", true)]
#[case("bar foo", "foo AFT/1 bar", true)]
#[case("foo bar", "foo AFT/1 bar", false)]
#[case("foo x y bar", "foo BEF/2-3 bar", true)]
#[case("foo x y z bar", "foo NEAR/3-4 bar", true)]
#[case("foo x y z bar", "foo NEAR/1-2 bar", false)]
#[case("foo a b c d bar", "foo BEF/* bar", true)]
#[case("bar a b c foo", "foo AFT/* bar", true)]
#[case("foo a b c bar", "foo NEAR/* bar", true)]
#[case("foo", "foo BEF/* foo", false)]
#[case("foobar baz", "foo * NEAR/1 baz", true)]
#[case("foobar baz", "foo* NEAR/1 baz", true)]
#[case("foo bar", "foo BEF/1 missing", false)]
fn test_positional(#[case] text: &str, #[case] expr: &str, #[case] expected: bool) {
    assert_eq!(query(text, expr), expected, "{expr:?} on {text:?}");
}

#[rstest]
#[case("foo a b", "foo BEF/2 IN(a b)", true)]
#[case("foo a b", "foo BEF/1 IN(a b)", false)]
#[case("foo a c", "foo BEF/1 INOF(b a)", true)]
#[case("foo c", "foo BEF/1 INOF(a b)", false)]
#[case("foo bar baz", "foo BEF/3 IN(bar baz)", true)]
#[case("foo qux baz", "foo BEF/* INOF(bar baz)", true)]
#[case("a b foo", "foo AFT/2 IN(a b)", true)]
fn test_positional_sets(#[case] text: &str, #[case] expr: &str, #[case] expected: bool) {
    assert_eq!(query(text, expr), expected, "{expr:?} on {text:?}");
}

// --- Length operators ---

#[rstest]
#[case("one two three", "LEN/3", true)]
#[case("one two", "LEN/3", true)]
#[case("one two three four", "LEN/3", false)]
#[case("alpha beta gamma delta epsilon", "LEN/3-6", true)]
#[case("alpha beta", "LEN/3-6", false)]
#[case("abcde", "SIZE/5", true)]
#[case("abcdefghijk", "SIZE/5", false)]
#[case("alpha beta gamma", "NOT LEN/2", true)]
#[case("abc", "NOT SIZE/2", true)]
#[case("foo x bar", "LEN/5 AND foo BEF/3 bar", true)]
#[case("foo x y z bar", "LEN/5 AND foo BEF/3 bar", false)]
fn test_length(#[case] text: &str, #[case] expr: &str, #[case] expected: bool) {
    assert_eq!(query(text, expr), expected, "{expr:?} on {text:?}");
}

#[test]
fn test_size_counts_cleaned_bytes() {
    // "Ça va!" cleans to "ça va " which is 7 bytes
    assert!(query("Ça va!", "SIZE/7-7"));
    assert!(!query("Ça va!", "SIZE/6"));
}

// --- Match operators ---

#[rstest]
#[case("hello world", "LIKE hello world", true)]
#[case("hello world world", "ONLY hello world foo", false)]
#[case("world hello world", "ONLY hello world", true)]
#[case("the quick brown", "STR the quick", true)]
#[case("over the lazy dog", "END lazy dog", true)]
#[case("hello   world", "STR hello world", true)]
#[case("over the   lazy    dog", "END lazy dog", true)]
#[case("Hello, World!", "STR hello world", true)]
fn test_match(#[case] text: &str, #[case] expr: &str, #[case] expected: bool) {
    assert_eq!(query(text, expr), expected, "{expr:?} on {text:?}");
}

// --- Expression lists ---

#[test]
fn test_comma_separated_segments_all_hold() {
    assert!(query("alpha foo bar", "alpha, foo BEF/1 bar"));
    assert!(!query("alpha foo bar", "alpha, baz"));
}

// --- Larger expressions ---

#[test]
fn test_nested_not_and_sets() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu";
    let expr = "(NOT (alpha AND omega)) AND LEN/20 AND (beta BEF/2 IN(gamma delta))";
    assert!(query(text, expr));
}

#[test]
fn test_complex_expression_flips_on_xor() {
    let corpus = [
        "intro", "alpha", "delta", "one", "epsilon", "delta", "two", "zeta", "eta", "foo",
        "bar", "theta", "iota", "bar", "baz", "kappa", "lambda", "mu", "omega", "sigma", "tau",
        "upsilon", "phi",
    ];
    let expr = "LEN/20-40 AND NOT ((alpha AND beta) OR gamma) \
                AND ((delta BEF/3 IN(epsilon zeta)) XOR (eta NEAR/2 theta)) \
                AND (iota BEF/* INOF(kappa lambda mu))";
    assert!(query(&corpus.join(" "), expr));

    // Moving theta next to eta satisfies both sides of the XOR
    let mut moved: Vec<&str> = corpus.iter().copied().filter(|w| *w != "theta").collect();
    let eta = moved.iter().position(|w| *w == "eta").expect("eta present");
    moved.insert(eta + 1, "theta");
    assert!(!query(&moved.join(" "), expr));
}

#[test]
fn test_deeply_nested_list() {
    let text = "alpha foo beta bar baz qux foo bar baz qux foo baz quux corge grault";
    let expr = "LEN/5-20 AND \
                NOT ((foo BEF/1 bar) XOR (baz AFT/* qux)) AND \
                ((foo NEAR/1 bar) OR (baz BEF/2 qux)) AND \
                (foo BEF/2 IN(bar baz)) AND \
                NOT SIZE/5, \
                alpha, foo BEF/1 bar, \
                NOT barrr AND fo* BEF/* qux";
    assert!(query(text, expr));
}

// --- Grammar errors ---

#[rstest]
#[case("LEN", Some(ErrorCode::LO1))]
#[case("SIZE", Some(ErrorCode::LO1))]
#[case("LEN/3-1", Some(ErrorCode::LO1))]
#[case("foo NEAR/5-2 bar", Some(ErrorCode::PP2))]
#[case("foo BEF/0 bar", Some(ErrorCode::PP2))]
#[case("IN(foo bar)", Some(ErrorCode::SO1))]
#[case("(foo AND bar", Some(ErrorCode::BO5))]
#[case("AND foo", Some(ErrorCode::BO1))]
#[case("NEAR/2 foo", Some(ErrorCode::PP1))]
#[case("STR", Some(ErrorCode::MO2))]
#[case("foo NOT bar", Some(ErrorCode::BO3))]
#[case("NOT", Some(ErrorCode::BO4))]
#[case("foo bar", None)]
fn test_grammar_errors(#[case] expr: &str, #[case] expected: Option<ErrorCode>) {
    assert_eq!(code(expr), expected, "{expr:?}");
}

// --- Properties ---

#[rstest]
#[case("foo")]
#[case("fo* BEF/* qux")]
#[case("STR a b, LEN/2-9 XOR NOT SIZE/4")]
#[case("a NEAR INOF(b c) OR (d AFT/3 e)")]
fn test_valid_expressions_evaluate_on_any_text(#[case] expr: &str) {
    let node = tokenize_and_parse(expr).expect("parse should succeed");
    assert_eq!(tokenize_and_parse(expr), Ok(node.clone()));
    for text in ["", "a", "a b c d e", "qux fo foo fox"] {
        // Evaluation is total; only the answer varies.
        let _ = evaluate(&node, &TextIndex::from_raw(text));
    }
}

#[test]
fn test_compact_and_explicit_wildcards_evaluate_alike() {
    for text in ["foobar baz", "baz foobar", "foo", "bar"] {
        assert_eq!(
            query(text, "foo* NEAR/1 baz"),
            query(text, "foo * NEAR/1 baz"),
            "{text:?}"
        );
    }
}
