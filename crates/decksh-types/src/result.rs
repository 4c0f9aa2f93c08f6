//! CommandResult — the structured result of every deck command.
//!
//! After every ADDRESS directive, the interpreter copies this record into
//! the reserved `RC` and `RESULT` script variables.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The result of executing one deck command.
///
/// Invariant: `success` is true exactly when `error_code` is 0. The
/// constructors maintain this; build results through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    /// True if the command succeeded.
    pub success: bool,
    /// Error code. 0 means success; each command owns a stable block of
    /// failure codes that scripts branch on.
    pub error_code: i64,
    /// Human-readable summary of what happened.
    pub output: String,
    /// Structured payload, when the command produces one.
    pub result: Option<Value>,
}

impl CommandResult {
    /// Create a successful result with a summary message.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            error_code: 0,
            output: output.into(),
            result: None,
        }
    }

    /// Create a successful result carrying a structured payload.
    pub fn ok_with(output: impl Into<String>, result: Value) -> Self {
        Self {
            success: true,
            error_code: 0,
            output: output.into(),
            result: Some(result),
        }
    }

    /// Create a failed result.
    ///
    /// A code of 0 is normalized to 1 so the invariant holds even for
    /// callers that forget to pick a code.
    pub fn fail(code: i64, output: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: if code == 0 { 1 } else { code },
            output: output.into(),
            result: None,
        }
    }
}

impl Default for CommandResult {
    fn default() -> Self {
        Self::ok("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_creates_success() {
        let r = CommandResult::ok("done");
        assert!(r.success);
        assert_eq!(r.error_code, 0);
        assert_eq!(r.output, "done");
        assert!(r.result.is_none());
    }

    #[test]
    fn ok_with_carries_payload() {
        let r = CommandResult::ok_with("done", Value::Int(3));
        assert!(r.success);
        assert_eq!(r.result, Some(Value::Int(3)));
    }

    #[test]
    fn fail_creates_failure() {
        let r = CommandResult::fail(42, "bad index");
        assert!(!r.success);
        assert_eq!(r.error_code, 42);
        assert_eq!(r.output, "bad index");
    }

    #[test]
    fn fail_with_zero_code_normalizes() {
        let r = CommandResult::fail(0, "broken");
        assert!(!r.success);
        assert_eq!(r.error_code, 1);
    }

    #[test]
    fn serde_roundtrip() {
        let r = CommandResult::ok_with("x", Value::Json(serde_json::json!({"a": 1})));
        let text = serde_json::to_string(&r).unwrap();
        let back: CommandResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, r);
    }
}
