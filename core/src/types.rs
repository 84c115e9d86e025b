//! Core entities for EchoAPI
//!
//! Every entity is built fresh from one request and dropped once the
//! response is written. Nothing here has identity or is persisted.

use crate::schema::{Field, FieldKind, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended profile data attached to a user. Key order is preserved so the
/// echoed document matches what the client sent.
pub type Profile = Map<String, Value>;

const ADDRESS_FIELDS: &[Field] = &[
    Field::required("street", FieldKind::Str),
    Field::required("city", FieldKind::Str),
    Field::required("zip", FieldKind::Str),
];

const USER_FIELDS: &[Field] = &[
    Field::required("name", FieldKind::Str),
    Field::required("email", FieldKind::Str),
    Field::required("address", FieldKind::Object(ADDRESS_FIELDS)),
    Field::required("profile", FieldKind::Map),
];

const REPORT_FIELDS: &[Field] = &[
    Field::required("title", FieldKind::Str),
    Field::required("content", FieldKind::Str),
];

/// A postal address embedded in a [`User`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
}

impl Schema for Address {
    const FIELDS: &'static [Field] = ADDRESS_FIELDS;
}

/// A user as submitted to `POST /users/`. The email is not format-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: Address,
    pub profile: Profile,
}

impl Schema for User {
    const FIELDS: &'static [Field] = USER_FIELDS;
}

/// Report body for `POST /reports/{report_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub content: String,
}

impl Schema for Report {
    const FIELDS: &'static [Field] = REPORT_FIELDS;
}

impl Report {
    /// The report as a plain key-value mapping
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("title".to_string(), Value::String(self.title.clone()));
        map.insert("content".to_string(), Value::String(self.content.clone()));
        map
    }
}
