//! Validation and filtering system
//!
//! Form payloads are filtered and validated declaratively before anything
//! reaches a repository. Failures are reported per field.

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::{FieldRule, FormSchema, HANDLE_PATTERN, create_payment_schema, validate_create_payment};
