//! Error types for tenant schema handling.
//!
//! The resolver itself never surfaces these (every failure path recovers
//! to `None`); they exist for callers constructing schema names directly,
//! including the serde deserializer.

use thiserror::Error;

/// Why a string was rejected as a schema name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaNameError {
    #[error("schema name is empty")]
    Empty,

    #[error("schema name '{candidate}' contains characters outside a-z, 0-9, _")]
    InvalidCharacters { candidate: String },
}
