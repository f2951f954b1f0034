//! Universal properties expected of every minification back end (idempotence,
//! mode equivalence, semantic preservation, no-growth, and friends). Chunk-
//! splitter correctness and worker commutativity are instead covered by the
//! `turbo::chunk`/`turbo::scheduler` unit tests, which already exercise them
//! directly.

use proptest::prelude::*;

use jsonmin::eco::ScalarState;
use jsonmin::{minify, validate, Mode};

#[derive(Debug, Clone)]
enum Json {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Arr(Vec<Json>),
    Obj(Vec<(String, Json)>),
}

fn arb_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

fn arb_json() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i32>().prop_map(|n| Json::Int(n as i64)),
        arb_string().prop_map(Json::Str),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Json::Arr),
            prop::collection::vec((arb_string(), inner), 0..5).prop_map(Json::Obj),
        ]
    })
}

/// Renders with generous insignificant whitespace around every token, so
/// the minifier always has real work to do.
fn render(v: &Json, out: &mut String) {
    match v {
        Json::Null => out.push_str(" null "),
        Json::Bool(b) => out.push_str(if *b { " true " } else { " false " }),
        Json::Int(n) => {
            out.push(' ');
            out.push_str(&n.to_string());
            out.push(' ');
        }
        Json::Str(s) => {
            out.push(' ');
            out.push('"');
            out.push_str(s);
            out.push('"');
            out.push(' ');
        }
        Json::Arr(items) => {
            out.push_str("[ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(" ,\n");
                }
                render(item, out);
            }
            out.push_str(" ]");
        }
        Json::Obj(fields) => {
            out.push_str("{ ");
            for (i, (k, v)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(" ,\n");
                }
                out.push('"');
                out.push_str(k);
                out.push_str("\" : ");
                render(v, out);
            }
            out.push_str(" }");
        }
    }
}

fn render_string(v: &Json) -> String {
    let mut s = String::new();
    render(v, &mut s);
    s
}

/// Collects every string literal's rendered `"..."` form, for the
/// string-fidelity property.
fn collect_string_literals(v: &Json, out: &mut Vec<String>) {
    match v {
        Json::Str(s) => out.push(format!("\"{}\"", s)),
        Json::Arr(items) => items.iter().for_each(|i| collect_string_literals(i, out)),
        Json::Obj(fields) => {
            for (k, v) in fields {
                out.push(format!("\"{}\"", k));
                collect_string_literals(v, out);
            }
        }
        _ => {}
    }
}

proptest! {
    #[test]
    fn idempotence(value in arb_json()) {
        let input = render_string(&value).into_bytes();
        let once = minify(&input, Mode::Eco).unwrap();
        let twice = minify(&once, Mode::Eco).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn mode_equivalence(value in arb_json()) {
        let input = render_string(&value).into_bytes();
        let eco = minify(&input, Mode::Eco).unwrap();
        let sport = minify(&input, Mode::Sport).unwrap();
        let turbo = minify(&input, Mode::Turbo).unwrap();
        prop_assert_eq!(&eco, &sport);
        prop_assert_eq!(&sport, &turbo);
    }

    #[test]
    fn whitespace_absent_outside_strings(value in arb_json()) {
        let input = render_string(&value).into_bytes();
        let out = minify(&input, Mode::Eco).unwrap();
        let mut state = ScalarState::new();
        for &b in &out {
            let was_in_string = state.in_string;
            state.step_byte(b);
            if !was_in_string {
                prop_assert!(!matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
            }
        }
    }

    #[test]
    fn string_literals_survive_verbatim(value in arb_json()) {
        let input = render_string(&value).into_bytes();
        let out = minify(&input, Mode::Eco).unwrap();
        let out_str = String::from_utf8(out).unwrap();
        let mut literals = Vec::new();
        collect_string_literals(&value, &mut literals);
        for lit in literals {
            prop_assert!(out_str.contains(&lit), "missing literal: {}", lit);
        }
    }

    #[test]
    fn no_growth(value in arb_json()) {
        let input = render_string(&value).into_bytes();
        let out = minify(&input, Mode::Eco).unwrap();
        prop_assert!(out.len() <= input.len());
    }

    #[test]
    fn validation_parity(value in arb_json(), truncate_to in 0usize..4) {
        let rendered = render_string(&value);
        let mut input = rendered.into_bytes();
        // Occasionally truncate a few trailing bytes to probe the
        // invalid side of the parity claim too.
        let new_len = input.len().saturating_sub(truncate_to);
        input.truncate(new_len);

        let validated = validate::validate(&input).is_ok();
        let all_modes_ok = [Mode::Eco, Mode::Sport, Mode::Turbo]
            .iter()
            .all(|&mode| minify(&input, mode).is_ok());
        prop_assert_eq!(validated, all_modes_ok);
    }
}
