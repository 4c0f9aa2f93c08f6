//! Command-line decoding for the dispatcher.
//!
//! A command line is whitespace-split; the first token is the command name
//! and each remaining token decodes as `key=value`. Value coercion:
//! literal `true`/`false` become booleans, number-shaped text becomes a
//! number, and everything else is a string with every quote character
//! stripped. There is no quoting support, so values cannot contain spaces.

use std::collections::HashMap;

use decksh_types::Value;

/// Decoded `key=value` parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    named: HashMap<String, Value>,
}

impl Params {
    /// Create an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a sequence of `key=value` tokens.
    ///
    /// Tokens without `=` and tokens with an empty key are skipped; only
    /// the first two `=`-separated fields are read, so `a=b=c` decodes as
    /// `a` → `b`.
    pub fn decode<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut named = HashMap::new();
        for token in tokens {
            let mut fields = token.splitn(3, '=');
            let key = fields.next().unwrap_or("");
            let Some(value) = fields.next() else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            named.insert(key.to_string(), coerce(value));
        }
        Self { named }
    }

    /// Get a raw parameter value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.named.get(key)
    }

    /// Check whether a parameter was supplied.
    pub fn contains(&self, key: &str) -> bool {
        self.named.contains_key(key)
    }

    /// Get a parameter's display form as a string.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.named.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Null => "null".to_string(),
            Value::Json(json) => json.to_string(),
        })
    }

    /// Get a parameter as an integer. Floats truncate; number-shaped
    /// strings parse; anything else is None.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.named.get(key).and_then(value_as_i64)
    }

    /// Number of decoded parameters.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// True when no parameters were decoded.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }
}

/// Split a command line into its name and decoded parameters.
pub fn split_command_line(line: &str) -> (&str, Params) {
    let mut tokens = line.trim().split_whitespace();
    let name = tokens.next().unwrap_or("");
    (name, Params::decode(tokens))
}

/// Coerce one raw value token.
fn coerce(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if !raw.is_empty() {
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
    }
    // Strip every quote character, not just wrapping pairs.
    Value::String(raw.replace(&['\'', '"'][..], ""))
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}
