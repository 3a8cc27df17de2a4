//! Tenant-to-schema mapping.
//!
//! Every tenant's data lives in its own storage partition, named by
//! prefixing the tenant identifier with `ds_`. The resolver accepts
//! either a raw identifier or an already-prefixed partition name, so a
//! single entry point serves both call sites.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::diag::{Diagnostics, TracingDiagnostics};
use crate::errors::SchemaNameError;
use crate::tenant::{TenantContext, TenantId};

/// Prefix marking a schema name as a tenant data partition.
pub const SCHEMA_PREFIX: &str = "ds_";

/// Character-set check shared by [`SchemaName`] and the resolver.
///
/// Full-string match: lowercase ASCII letters, digits, underscore,
/// nothing else. Anything outside the set is rejected outright rather
/// than escaped, so the name can be spliced into a namespace reference
/// downstream.
fn is_valid_schema_name(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// A validated storage-partition identifier.
///
/// Only constructible through validation; holding one is proof the name
/// is safe to use in identifier position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SchemaName(String);

impl SchemaName {
    /// Validate `name` as a schema name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self, SchemaNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaNameError::Empty);
        }
        if !is_valid_schema_name(&name) {
            return Err(SchemaNameError::InvalidCharacters { candidate: name });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SchemaName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        SchemaName::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Maps externally supplied tenant identifiers to storage partitions.
///
/// Pure and total: every input yields either a validated [`SchemaName`]
/// or `None` plus a diagnostic. Nothing here blocks, allocates shared
/// state, or needs coordination between callers.
#[derive(Clone)]
pub struct TenantSchemaResolver {
    diag: Arc<dyn Diagnostics>,
}

impl TenantSchemaResolver {
    /// Resolver reporting through the `tracing` facade.
    pub fn new() -> Self {
        Self::with_diagnostics(Arc::new(TracingDiagnostics))
    }

    /// Resolver reporting through a caller-supplied sink.
    pub fn with_diagnostics(diag: Arc<dyn Diagnostics>) -> Self {
        Self { diag }
    }

    /// Derive the schema name for `tenant`, if any.
    ///
    /// An input already starting with `ds_` is taken as a pre-formed
    /// partition name and passed through unchanged; anything else gets
    /// the prefix prepended. The candidate is then validated as a whole.
    /// Empty or missing input resolves to `None` with a warning.
    pub fn resolve(&self, tenant: Option<&str>) -> Option<SchemaName> {
        let tenant = match tenant {
            Some(t) if !t.is_empty() => t,
            _ => {
                self.diag.warn("tenant identifier is empty or missing");
                return None;
            }
        };

        let candidate = if tenant.starts_with(SCHEMA_PREFIX) {
            self.diag.debug(&format!(
                "tenant '{tenant}' already carries the partition prefix, using as-is"
            ));
            tenant.to_string()
        } else {
            self.diag
                .debug(&format!("prefixed '{SCHEMA_PREFIX}' to tenant '{tenant}'"));
            format!("{SCHEMA_PREFIX}{tenant}")
        };

        if is_valid_schema_name(&candidate) {
            self.diag
                .debug(&format!("validated schema name '{candidate}'"));
            Some(SchemaName(candidate))
        } else {
            self.diag.error(&format!(
                "invalid schema name '{candidate}' derived from tenant '{tenant}'; \
                 schema names may only contain lowercase letters, digits, and underscores"
            ));
            None
        }
    }

    pub fn resolve_tenant(&self, tenant: &TenantId) -> Option<SchemaName> {
        self.resolve(Some(tenant.as_str()))
    }

    /// Resolve `tenant` and package the outcome into a per-operation
    /// context.
    pub fn context<S: Into<String>>(&self, tenant: S) -> TenantContext {
        let ctx = TenantContext::new(tenant);
        let schema = self.resolve_tenant(&ctx.tenant_id);
        TenantContext { schema, ..ctx }
    }
}

impl Default for TenantSchemaResolver {
    fn default() -> Self {
        Self::new()
    }
}
