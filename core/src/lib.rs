//! # EchoAPI Core
//!
//! Entities, schema descriptors, the explicit validation pass and the
//! request rules shared by every EchoAPI presentation layer.

pub mod types;
pub mod schema;
pub mod rules;
pub mod traits;
pub mod errors;

// Re-export commonly used types and traits
pub use types::{Address, Profile, Report, User};
pub use schema::{ErrorKind, Field, FieldError, FieldKind, LocItem, ScalarKind, Schema};
pub use traits::PresentationAdapter;
pub use errors::{CoreError, CoreResult, PresentationError, RuleViolation};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::schema::*;
    pub use crate::rules::*;
    pub use crate::traits::*;
    pub use crate::errors::*;
    pub use async_trait::async_trait;
}
