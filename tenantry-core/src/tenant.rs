//! Core multi-tenant types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::SchemaName;

/// A tenant identifier as supplied by the outside world.
///
/// Typically arrives in an auth-token claim or a request header.
/// Later this can be a UUID, slug, or composite key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl TenantId {
    /// Convenience constructor from a string.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Context carried with every tenant-scoped operation.
///
/// Holds the raw identifier together with the storage partition it
/// resolved to, so downstream lookups never re-derive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub schema: Option<SchemaName>,
}

impl TenantContext {
    /// Convenience constructor from a string; no schema resolved yet.
    pub fn new<S: Into<String>>(tenant: S) -> Self {
        Self {
            tenant_id: TenantId::new(tenant),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: SchemaName) -> Self {
        self.schema = Some(schema);
        self
    }

    /// The resolved partition name, if any.
    pub fn schema_str(&self) -> Option<&str> {
        self.schema.as_ref().map(|s| s.as_str())
    }
}
