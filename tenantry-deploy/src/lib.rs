//! tenantry-deploy: typed deployment options for an analytics host with
//! per-tenant storage partitions.
//!
//! A deployment ships one declarative options set: database location,
//! session secret, token lifetime, feature flags, upload allow-lists,
//! CORS policy, and response-header overrides. The host framework
//! consumes the values; this crate only models, loads, layers, and
//! validates them.

pub mod env;
pub mod options;

pub use options::{
    CorsOptions, DeployError, DeployOptions, FeatureFlags, HeaderOverrides, UploadOptions,
};
