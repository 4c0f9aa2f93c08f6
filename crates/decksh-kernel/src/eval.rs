//! Expression evaluation for decksh scripts.
//!
//! The evaluator is deliberately not a recursive-descent parser: there is
//! no precedence table and no parenthesis support. Five forms are tried in
//! order and the first match wins; text matching none of them is returned
//! verbatim, so unknown identifiers "evaluate" to their own spelling.

use decksh_types::Value;

use crate::scope::Scope;

/// Evaluate an expression against the current variable environment.
///
/// Pure and infallible. The order is part of the language:
/// quoted literal, numeric literal, variable, `||` concatenation,
/// verbatim fallback.
pub fn evaluate(expr: &str, scope: &Scope) -> Value {
    let expr = expr.trim();

    if expr.len() >= 2 {
        let bytes = expr.as_bytes();
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return Value::String(expr[1..expr.len() - 1].to_string());
        }
    }

    if !expr.is_empty() {
        if let Ok(i) = expr.parse::<i64>() {
            return Value::Int(i);
        }
        // Restrict the float form to number-shaped text so bare words like
        // "inf" stay words.
        if expr.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-' || c == '.') {
            if let Ok(f) = expr.parse::<f64>() {
                return Value::Float(f);
            }
        }
    }

    if let Some(value) = scope.get(expr) {
        return value.clone();
    }

    if expr.contains("||") {
        let joined: String = expr
            .split("||")
            .map(|part| value_to_string(&evaluate(part, scope)))
            .collect();
        return Value::String(joined);
    }

    Value::String(expr.to_string())
}

/// Display form of a value, as produced by SAY and by concatenation.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => s.clone(),
        Value::Json(json) => json.to_string(),
    }
}

/// Truthiness of a value, as used by IF conditions and parameter defaults.
///
/// Zero, NaN, the empty string, and null are false; note that a non-empty
/// string such as "0" is true.
pub fn value_to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0 && !f.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Json(_) => true,
    }
}
