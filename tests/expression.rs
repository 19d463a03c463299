//! Tests for the sandboxed expression engine.
mod common;
use keisei::error::ExpressionError;
use keisei::expression::{
    Scope, Value, evaluate_guard, evaluate_str, interpolate, parse,
};
use serde_json::{Value as JsonValue, json};

fn scope_over<'a>(data: &'a JsonValue, null: &'a JsonValue) -> Scope<'a> {
    Scope::new(data, null, null, "edit")
}

#[test]
fn test_comparison_against_data() {
    let data = json!({ "age": 21 });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    let result = evaluate_str("data.age >= 18", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));

    let result = evaluate_str("data.age < 18", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(false));
}

#[test]
fn test_arithmetic_and_precedence() {
    let data = json!({ "a": 2, "b": 3 });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    let result = evaluate_str("data.a + data.b * 2", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Number(8.0));

    let result = evaluate_str("(data.a + data.b) * 2", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Number(10.0));
}

#[test]
fn test_return_prefix_and_trailing_semicolon() {
    let data = json!({ "age": 30 });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    let result = evaluate_str("return data.age > 18;", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_loose_equality_number_vs_string() {
    let data = json!({ "count": 5, "code": "5" });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    let result = evaluate_str("data.count == '5'", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));

    let result = evaluate_str("data.code == 5", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));

    let result = evaluate_str("data.count != '6'", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_strict_equality_token_accepted() {
    let data = json!({ "status": "open" });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    let result = evaluate_str("data.status === 'open'", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_missing_path_resolves_to_null() {
    let data = json!({ "age": 21 });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    let result = evaluate_str("data.missing == null", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));

    let result = evaluate_str("data.missing == undefined", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_not_on_absent_value_is_true() {
    let data = json!({});
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    let result = evaluate_str("!data.archived", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_or_short_circuits_past_faulting_side() {
    let data = json!({ "flag": true });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    // The right side would be a type error on its own; it is never reached.
    let result = evaluate_str("data.flag || data.missing > 5", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));

    let err = evaluate_str("data.missing > 5 || data.flag", &scope);
    assert!(matches!(err, Err(ExpressionError::TypeMismatch { .. })));
}

#[test]
fn test_form_mode_root() {
    let data = json!({});
    let null = JsonValue::Null;
    let scope = Scope::new(&data, &null, &null, "readonly");

    let result = evaluate_str("formMode == 'readonly'", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_global_state_and_selected_row_roots() {
    let data = json!({});
    let global = json!({ "tenant": "acme" });
    let row = json!({ "id": 7 });
    let scope = Scope::new(&data, &global, &row, "edit");

    let result = evaluate_str("globalState.tenant == 'acme'", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));

    let result = evaluate_str("selectedRow.id == 7", &scope).expect("evaluation failed");
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_parse_error_reports_position() {
    let err = parse("data.age >").expect_err("must not parse");
    match err {
        ExpressionError::ParseError { message, .. } => {
            println!("parse error: {}", message);
        }
        other => panic!("unexpected error: {}", other),
    }

    assert!(parse("data.age = 5").is_err());
    assert!(parse("data.a & data.b").is_err());
}

#[test]
fn test_guard_degrades_to_fallback() {
    let data = json!({ "age": 21 });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    // Absent and empty sources use the fallback.
    assert!(evaluate_guard(None, &scope, true));
    assert!(!evaluate_guard(None, &scope, false));
    assert!(evaluate_guard(Some("   "), &scope, true));

    // A parse fault uses the fallback.
    assert!(evaluate_guard(Some("data.age >"), &scope, true));
    assert!(!evaluate_guard(Some("data.age >"), &scope, false));

    // A non-boolean result uses the fallback.
    assert!(evaluate_guard(Some("data.age + 1"), &scope, true));

    // A healthy expression decides.
    assert!(evaluate_guard(Some("data.age >= 18"), &scope, false));
}

#[test]
fn test_interpolation() {
    let data = json!({ "customer": { "name": "Ada" } });
    let null = JsonValue::Null;
    let scope = scope_over(&data, &null);

    assert_eq!(
        interpolate("Hello {data.customer.name}!", &scope),
        "Hello Ada!"
    );
    assert_eq!(interpolate("Missing: {data.nope}", &scope), "Missing: ");
    assert_eq!(interpolate("no placeholders", &scope), "no placeholders");
    assert_eq!(interpolate("open {data.customer.name", &scope), "open {data.customer.name");
}
