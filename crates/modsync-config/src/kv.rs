// crates/modsync-config/src/kv.rs
// ============================================================================
// Module: KV Watch Configuration
// Description: Watch-source variant for a key/value path in the catalog store.
// Purpose: Carry the KV path, recursion, and scope fields through the
//          merge/finalize/validate lifecycle.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A KV watch observes one key/value path in the discovery backend's store,
//! optionally recursing into sub-paths. Every field is optional until
//! [`KvWatchConfig::finalize`] runs; the path is the one field with no safe
//! default and is rejected by [`KvWatchConfig::validate`] when empty.

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Construct name used in validation errors for this variant.
const CONSTRUCT: &str = "kv watch source";

/// Configuration for a KV-path watch.
///
/// # Invariants
/// - All fields are optional before finalize; none are optional after.
/// - `path` has no safe default and must be non-empty to validate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvWatchConfig {
    /// Key/value path to watch.
    pub path: Option<String>,
    /// Whether to watch all sub-paths beneath `path`.
    pub recurse: Option<bool>,
    /// Datacenter scope for the watch.
    pub datacenter: Option<String>,
    /// Namespace scope for the watch.
    pub namespace: Option<String>,
    /// Whether the rendered module consumes the watched value as a variable.
    pub include_var: Option<bool>,
}

impl KvWatchConfig {
    /// Merges `other` into a copy of this configuration.
    ///
    /// Fields explicitly set on `other` take precedence; fields left unset on
    /// `other` keep this configuration's values.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        if other.path.is_some() {
            merged.path.clone_from(&other.path);
        }
        if other.recurse.is_some() {
            merged.recurse = other.recurse;
        }
        if other.datacenter.is_some() {
            merged.datacenter.clone_from(&other.datacenter);
        }
        if other.namespace.is_some() {
            merged.namespace.clone_from(&other.namespace);
        }
        if other.include_var.is_some() {
            merged.include_var = other.include_var;
        }
        merged
    }

    /// Fills every unset field with its documented default, in place.
    ///
    /// The path defaults to the empty string so a missing path is caught by
    /// [`Self::validate`] rather than silently watching nothing.
    pub fn finalize(&mut self) {
        if self.path.is_none() {
            self.path = Some(String::new());
        }
        if self.recurse.is_none() {
            self.recurse = Some(false);
        }
        if self.datacenter.is_none() {
            self.datacenter = Some(String::new());
        }
        if self.namespace.is_none() {
            self.namespace = Some(String::new());
        }
        if self.include_var.is_none() {
            self.include_var = Some(false);
        }
    }

    /// Validates required fields. Run after [`Self::finalize`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the path is unset or empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.path.as_deref() {
            None | Some("") => Err(ConfigError::MissingField {
                construct: CONSTRUCT,
                field: "path",
            }),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;
