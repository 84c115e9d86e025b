//! Turning raw query strings, path segments and bodies into validated input
//!
//! Extraction never stops at the first problem: each reader records its
//! errors so a handler can report every offending field at once.

use axum::body::Bytes;
use echoapi_core::prelude::*;
use echoapi_core::schema::coerce;
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Query parameters of one request. A repeated key keeps its last value.
#[derive(Debug, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
    errors: Vec<FieldError>,
}

impl QueryParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
            errors: Vec::new(),
        }
    }

    /// A required text parameter; an empty string is accepted
    pub fn required_str(&mut self, name: &str) -> String {
        self.take(name, ScalarKind::Str)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// A required text parameter that must contain at least one character
    pub fn required_non_empty_str(&mut self, name: &str) -> String {
        let value = self.required_str(name);
        if value.is_empty() && self.values.contains_key(name) {
            self.errors.push(
                FieldError::new(loc("query", name), ErrorKind::StringTooShort).with_input(Value::String(value.clone())),
            );
        }
        value
    }

    /// A required decimal parameter
    pub fn required_float(&mut self, name: &str) -> f64 {
        self.take(name, ScalarKind::Float)
            .and_then(|v| v.as_f64())
            .unwrap_or_default()
    }

    /// An optional integer parameter with a default. The value is not
    /// bounded.
    pub fn int_or(&mut self, name: &str, default: i64) -> Number {
        if !self.values.contains_key(name) {
            return Number::from(default);
        }
        match self.take(name, ScalarKind::Int) {
            Some(Value::Number(n)) => n,
            _ => Number::from(default),
        }
    }

    /// Errors recorded so far
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Fail with every recorded error, if any
    pub fn finish(self) -> CoreResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }

    fn take(&mut self, name: &str, kind: ScalarKind) -> Option<Value> {
        let Some(raw) = self.values.get(name) else {
            self.errors.push(FieldError::new(loc("query", name), ErrorKind::Missing).with_input(Value::Null));
            return None;
        };
        match coerce(raw, kind) {
            Ok(value) => Some(value),
            Err(kind) => {
                self.errors
                    .push(FieldError::new(loc("query", name), kind).with_input(Value::String(raw.clone())));
                None
            }
        }
    }
}

/// Parse an integer path segment, recording a failure under `["path", name]`
pub fn path_int(name: &str, raw: &str, errors: &mut Vec<FieldError>) -> Option<Number> {
    match coerce(raw, ScalarKind::Int) {
        Ok(Value::Number(n)) => Some(n),
        Ok(_) => None,
        Err(kind) => {
            errors.push(FieldError::new(loc("path", name), kind).with_input(Value::String(raw.to_string())));
            None
        }
    }
}

/// Decode a JSON body and validate it against `T`, recording failures under
/// `["body", ...]`.
pub fn read_body<T: Schema>(body: &Bytes, errors: &mut Vec<FieldError>) -> Option<T> {
    let body_loc = vec![LocItem::from("body")];

    if body.is_empty() {
        errors.push(FieldError::new(body_loc, ErrorKind::Missing).with_input(Value::Null));
        return None;
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            errors.push(
                FieldError::new(vec![LocItem::from("body"), LocItem::from(e.column())], ErrorKind::JsonInvalid)
                    .with_msg(format!("JSON decode error: {}", e)),
            );
            return None;
        }
    };

    match T::parse(value, &body_loc) {
        Ok(parsed) => Some(parsed),
        Err(CoreError::Validation(mut found)) => {
            errors.append(&mut found);
            None
        }
        Err(other) => {
            errors.push(FieldError::new(body_loc, ErrorKind::ModelAttributesType).with_msg(other.to_string()));
            None
        }
    }
}

fn loc(source: &str, name: &str) -> Vec<LocItem> {
    vec![LocItem::from(source), LocItem::from(name)]
}
