//! Declarative schemas and the explicit validation pass
//!
//! A [`Schema`] lists its fields statically. Before any entity is built from
//! untrusted input, [`validate_object`] walks the raw JSON value against that
//! list and collects one [`FieldError`] per offending field. Only a value that
//! produced no errors is handed to serde for deserialization.

use crate::errors::{CoreError, CoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::debug;

/// One segment of the location of an error, e.g. `["body", "address", "zip"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocItem {
    Key(String),
    Index(usize),
}

impl From<&str> for LocItem {
    fn from(key: &str) -> Self {
        LocItem::Key(key.to_string())
    }
}

impl From<String> for LocItem {
    fn from(key: String) -> Self {
        LocItem::Key(key)
    }
}

impl From<usize> for LocItem {
    fn from(index: usize) -> Self {
        LocItem::Index(index)
    }
}

impl std::fmt::Display for LocItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocItem::Key(key) => write!(f, "{}", key),
            LocItem::Index(index) => write!(f, "{}", index),
        }
    }
}

/// The kind of a single validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Missing,
    StringType,
    StringTooShort,
    IntParsing,
    FloatParsing,
    FiniteNumber,
    DictType,
    ModelAttributesType,
    JsonInvalid,
}

impl ErrorKind {
    /// Human readable message sent alongside the kind
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Missing => "Field required",
            ErrorKind::StringType => "Input should be a valid string",
            ErrorKind::StringTooShort => "String should have at least 1 character",
            ErrorKind::IntParsing => "Input should be a valid integer, unable to parse string as an integer",
            ErrorKind::FloatParsing => "Input should be a valid number, unable to parse string as a number",
            ErrorKind::FiniteNumber => "Input should be a finite number",
            ErrorKind::DictType => "Input should be a valid dictionary",
            ErrorKind::ModelAttributesType => "Input should be a valid dictionary or object to extract fields from",
            ErrorKind::JsonInvalid => "JSON decode error",
        }
    }
}

/// A single offending field: where it is, what is wrong, and what was sent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<LocItem>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl FieldError {
    /// Create an error at `loc` with the standard message for `kind`
    pub fn new(loc: Vec<LocItem>, kind: ErrorKind) -> Self {
        Self {
            loc,
            msg: kind.message().to_string(),
            kind,
            input: None,
        }
    }

    /// Attach the offending input
    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Replace the standard message, e.g. with a parser diagnostic
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Dotted rendering of the location, for logs
    pub fn path(&self) -> String {
        self.loc
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Expected shape of a body field
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Str,
    /// A nested schema
    Object(&'static [Field]),
    /// An open-ended mapping from text keys to arbitrary values
    Map,
}

/// Expected type of a query parameter or path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Str,
    /// An integer of any magnitude
    Int,
    Float,
}

/// A named, required field in a schema
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A type whose shape is declared up front and checked before construction
pub trait Schema: DeserializeOwned {
    /// The declared fields, in reporting order
    const FIELDS: &'static [Field];

    /// Validate `value` against [`Schema::FIELDS`] and build the entity.
    ///
    /// `loc` is the prefix reported in front of every field path, usually
    /// `["body"]`.
    fn parse(value: Value, loc: &[LocItem]) -> CoreResult<Self> {
        let errors = validate_object(&value, Self::FIELDS, loc);
        if !errors.is_empty() {
            debug!("Schema validation produced {} error(s)", errors.len());
            return Err(CoreError::Validation(errors));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Check `value` against `fields`, returning every error found
pub fn validate_object(value: &Value, fields: &[Field], loc: &[LocItem]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_object(value, fields, loc, &mut errors);
    errors
}

fn check_object(value: &Value, fields: &[Field], loc: &[LocItem], errors: &mut Vec<FieldError>) {
    let Some(map) = value.as_object() else {
        errors.push(FieldError::new(loc.to_vec(), ErrorKind::ModelAttributesType).with_input(value.clone()));
        return;
    };

    for field in fields {
        let mut field_loc = loc.to_vec();
        field_loc.push(LocItem::from(field.name));

        match map.get(field.name) {
            Some(field_value) => check_value(field_value, field.kind, &field_loc, errors),
            None => errors.push(FieldError::new(field_loc, ErrorKind::Missing).with_input(value.clone())),
        }
    }
}

fn check_value(value: &Value, kind: FieldKind, loc: &[LocItem], errors: &mut Vec<FieldError>) {
    let failure = match kind {
        FieldKind::Str if value.is_string() => None,
        FieldKind::Str => Some(ErrorKind::StringType),
        FieldKind::Object(fields) => {
            check_object(value, fields, loc, errors);
            None
        }
        FieldKind::Map if value.is_object() => None,
        FieldKind::Map => Some(ErrorKind::DictType),
    };

    if let Some(kind) = failure {
        errors.push(FieldError::new(loc.to_vec(), kind).with_input(value.clone()));
    }
}

/// Coerce raw text (a query parameter or path segment) into a JSON value of
/// the given kind. Integers are not bounded: any optionally signed run of
/// digits is accepted and kept exact.
pub fn coerce(raw: &str, kind: ScalarKind) -> Result<Value, ErrorKind> {
    match kind {
        ScalarKind::Str => Ok(Value::String(raw.to_string())),
        ScalarKind::Int => parse_integer(raw)
            .map(Value::Number)
            .ok_or(ErrorKind::IntParsing),
        ScalarKind::Float => {
            let parsed = raw.trim().parse::<f64>().map_err(|_| ErrorKind::FloatParsing)?;
            Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or(ErrorKind::FiniteNumber)
        }
    }
}

/// Parse `[+-]?[0-9]+` (surrounding whitespace allowed) into a canonical
/// integer `Number`: no leading zeros, no `+`, and no `-0`.
fn parse_integer(raw: &str) -> Option<Number> {
    let text = raw.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = digits.trim_start_matches('0');
    let canonical = match (digits.is_empty(), negative) {
        (true, _) => "0".to_string(),
        (false, true) => format!("-{}", digits),
        (false, false) => digits.to_string(),
    };
    serde_json::from_str(&canonical).ok()
}
