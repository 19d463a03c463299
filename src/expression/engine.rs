use super::ast::{Expression, PathRef};
use super::parser::parse;
use super::value::Value;
use crate::error::ExpressionError;
use serde_json::Value as JsonValue;
use tracing::warn;

/// The ambient data an expression can read from. Roots are `data`,
/// `globalState`, `selectedRow` and `formMode`; anything else resolves to
/// `Null`.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub data: &'a JsonValue,
    pub global_state: &'a JsonValue,
    pub selected_row: &'a JsonValue,
    pub form_mode: &'a str,
}

impl<'a> Scope<'a> {
    pub fn new(
        data: &'a JsonValue,
        global_state: &'a JsonValue,
        selected_row: &'a JsonValue,
        form_mode: &'a str,
    ) -> Self {
        Self {
            data,
            global_state,
            selected_row,
            form_mode,
        }
    }

    /// Resolves a dotted path against the scope. Missing segments and
    /// unknown roots yield `Null` instead of an error, mirroring how a
    /// scripted lookup on an absent property behaves.
    pub fn lookup(&self, path: &PathRef) -> Value {
        let mut segments = path.segments.iter();
        let root = match segments.next() {
            Some(r) => r.as_str(),
            None => return Value::Null,
        };

        if root == "formMode" {
            return Value::String(self.form_mode.to_string());
        }

        let mut current = match root {
            "data" => self.data,
            "globalState" => self.global_state,
            "selectedRow" => self.selected_row,
            _ => return Value::Null,
        };

        for segment in segments {
            match current.get(segment) {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }

        Value::from_json(current)
    }
}

/// Evaluates a parsed expression against a scope.
///
/// `And` and `Or` short-circuit, so a type error on the right side is never
/// observed once the left side decides the outcome.
pub fn evaluate(expr: &Expression, scope: &Scope<'_>) -> Result<Value, ExpressionError> {
    match expr {
        Expression::Literal(v) => Ok(v.clone()),
        Expression::Path(p) => Ok(scope.lookup(p)),

        Expression::Sum(l, r) => numeric(expr_name(expr), evaluate(l, scope)?, evaluate(r, scope)?)
            .map(|(a, b)| Value::Number(a + b)),
        Expression::Subtract(l, r) => {
            numeric(expr_name(expr), evaluate(l, scope)?, evaluate(r, scope)?)
                .map(|(a, b)| Value::Number(a - b))
        }
        Expression::Multiply(l, r) => {
            numeric(expr_name(expr), evaluate(l, scope)?, evaluate(r, scope)?)
                .map(|(a, b)| Value::Number(a * b))
        }
        Expression::Divide(l, r) => {
            numeric(expr_name(expr), evaluate(l, scope)?, evaluate(r, scope)?)
                .map(|(a, b)| Value::Number(a / b))
        }
        Expression::Negate(v) => match evaluate(v, scope)? {
            Value::Number(n) => Ok(Value::Number(-n)),
            found => Err(type_mismatch("negate", "a number", found)),
        },

        Expression::Not(v) => match evaluate(v, scope)? {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            // Script-style truthiness: `!x` on an absent value is true.
            Value::Null => Ok(Value::Bool(true)),
            found => Err(type_mismatch("not", "a boolean", found)),
        },
        Expression::And(l, r) => match evaluate(l, scope)? {
            Value::Bool(false) => Ok(Value::Bool(false)),
            Value::Bool(true) => as_bool("and", evaluate(r, scope)?).map(Value::Bool),
            found => Err(type_mismatch("and", "a boolean", found)),
        },
        Expression::Or(l, r) => match evaluate(l, scope)? {
            Value::Bool(true) => Ok(Value::Bool(true)),
            Value::Bool(false) => as_bool("or", evaluate(r, scope)?).map(Value::Bool),
            found => Err(type_mismatch("or", "a boolean", found)),
        },

        Expression::Equal(l, r) => Ok(Value::Bool(loose_equal(
            &evaluate(l, scope)?,
            &evaluate(r, scope)?,
        ))),
        Expression::NotEqual(l, r) => Ok(Value::Bool(!loose_equal(
            &evaluate(l, scope)?,
            &evaluate(r, scope)?,
        ))),
        Expression::GreaterThan(l, r) => {
            numeric("greater than", evaluate(l, scope)?, evaluate(r, scope)?)
                .map(|(a, b)| Value::Bool(a > b))
        }
        Expression::GreaterThanOrEqual(l, r) => numeric(
            "greater than or equal",
            evaluate(l, scope)?,
            evaluate(r, scope)?,
        )
        .map(|(a, b)| Value::Bool(a >= b)),
        Expression::SmallerThan(l, r) => {
            numeric("smaller than", evaluate(l, scope)?, evaluate(r, scope)?)
                .map(|(a, b)| Value::Bool(a < b))
        }
        Expression::SmallerThanOrEqual(l, r) => numeric(
            "smaller than or equal",
            evaluate(l, scope)?,
            evaluate(r, scope)?,
        )
        .map(|(a, b)| Value::Bool(a <= b)),
    }
}

/// Parses and evaluates an expression source in one step.
pub fn evaluate_str(source: &str, scope: &Scope<'_>) -> Result<Value, ExpressionError> {
    let expr = parse(source)?;
    evaluate(&expr, scope)
}

/// Evaluates an optional boolean guard expression, degrading to `fallback`
/// when the source is absent, fails to parse or evaluate, or produces a
/// non-boolean. Faults are logged rather than propagated so a broken
/// configuration cannot take the whole form down.
pub fn evaluate_guard(source: Option<&str>, scope: &Scope<'_>, fallback: bool) -> bool {
    let Some(source) = source else {
        return fallback;
    };
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return fallback;
    }

    match evaluate_str(trimmed, scope) {
        Ok(Value::Bool(b)) => b,
        Ok(other) => {
            warn!(expression = trimmed, result = %other, "guard expression did not produce a boolean");
            fallback
        }
        Err(e) => {
            warn!(expression = trimmed, error = %e, "guard expression faulted");
            fallback
        }
    }
}

/// Replaces `{path}` placeholders in a template with scope values.
///
/// Unresolved paths interpolate to the empty string. A `{` with no closing
/// brace is kept verbatim.
pub fn interpolate(template: &str, scope: &Scope<'_>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let path = PathRef::parse(&after[..close]);
                result.push_str(&scope.lookup(&path).to_text());
                rest = &after[close + 1..];
            }
            None => {
                result.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

fn expr_name(expr: &Expression) -> &'static str {
    match expr {
        Expression::Sum(..) => "sum",
        Expression::Subtract(..) => "subtract",
        Expression::Multiply(..) => "multiply",
        Expression::Divide(..) => "divide",
        _ => "operation",
    }
}

fn type_mismatch(operation: &str, expected: &str, found: Value) -> ExpressionError {
    ExpressionError::TypeMismatch {
        operation: operation.to_string(),
        expected: expected.to_string(),
        found,
    }
}

fn numeric(operation: &str, left: Value, right: Value) -> Result<(f64, f64), ExpressionError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((a, b)),
        (Value::Number(_), found) | (found, _) => {
            Err(type_mismatch(operation, "two numbers", found))
        }
    }
}

fn as_bool(operation: &str, value: Value) -> Result<bool, ExpressionError> {
    match value {
        Value::Bool(b) => Ok(b),
        found => Err(type_mismatch(operation, "a boolean", found)),
    }
}

/// Equality in the loose scripted sense: numbers compare numerically to
/// numeric strings, everything else compares structurally.
fn loose_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            s.trim().parse::<f64>().map(|p| p == *n).unwrap_or(false)
        }
        (l, r) => l == r,
    }
}
