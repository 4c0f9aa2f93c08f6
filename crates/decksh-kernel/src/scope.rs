//! Variable environment for one script run.
//!
//! A flat name → value mapping: the script language has no nested
//! procedures, so there are no frames. The reserved `RC` and `RESULT`
//! variables are overwritten after every ADDRESS directive.

use std::collections::HashMap;

use decksh_types::{CommandResult, Value};

use crate::eval::value_to_bool;

/// Name of the reserved return-code variable.
pub const RC: &str = "RC";
/// Name of the reserved result-payload variable.
pub const RESULT: &str = "RESULT";

/// Variable bindings owned by a single interpreter run.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    vars: HashMap<String, Value>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Look up a variable by its exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Check whether a variable is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Overwrite `RC` and `RESULT` from a command result.
    ///
    /// Success: `RC` is 0 and `RESULT` is the structured payload when one
    /// is present and truthy, else the output text. Failure: `RC` is the
    /// error code (normalized to 1 when 0) and `RESULT` is the output.
    pub fn apply_command_result(&mut self, result: &CommandResult) {
        if result.success {
            self.set(RC, Value::Int(0));
            let payload = match &result.result {
                Some(v) if value_to_bool(v) => v.clone(),
                _ => Value::String(result.output.clone()),
            };
            self.set(RESULT, payload);
        } else {
            let code = if result.error_code == 0 {
                1
            } else {
                result.error_code
            };
            self.set(RC, Value::Int(code));
            self.set(RESULT, Value::String(result.output.clone()));
        }
    }

    /// Consume the scope, yielding all bindings.
    pub fn into_vars(self) -> HashMap<String, Value> {
        self.vars
    }
}
