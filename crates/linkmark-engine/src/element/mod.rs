//! # Inline Element Types
//!
//! - **`schema`**: `AttributeSchema` / `VariableRule`, the positional
//!   attribute binder with value domains and required fields
//! - **`link`**: `LinkElement`, `LinkTarget` and the link's schema

pub mod link;
pub mod schema;

pub use link::{LINK_SCHEMA, LINK_TAG, LinkElement, LinkTarget, TARGET_DOMAIN};
pub use schema::{AttributeSchema, VariableRule};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required attribute `{attribute}` is missing or empty")]
    Required { attribute: &'static str },
    #[error("Value `{value}` is not allowed for attribute `{attribute}`")]
    OutOfDomain {
        attribute: &'static str,
        value: String,
    },
}
