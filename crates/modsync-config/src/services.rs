// crates/modsync-config/src/services.rs
// ============================================================================
// Module: Services Watch Configuration
// Description: Watch-source variant for catalog services matched by pattern.
// Purpose: Carry the service pattern and scope fields through the
//          merge/finalize/validate lifecycle.
// Dependencies: regex, serde
// ============================================================================

//! ## Overview
//! A services watch observes catalog services whose names match a regular
//! expression. Every field is optional until
//! [`ServicesWatchConfig::finalize`] runs. When the operator sets no pattern,
//! finalize derives one from the service names supplied in the finalize
//! context; with no context either, the pattern stays empty and
//! [`ServicesWatchConfig::validate`] rejects it.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Construct name used in validation errors for this variant.
const CONSTRUCT: &str = "services watch source";

/// Configuration for a catalog-services watch.
///
/// # Invariants
/// - All fields are optional before finalize; none are optional after.
/// - `regexp` must be non-empty and compile as a regular expression to
///   validate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesWatchConfig {
    /// Pattern matched against catalog service names.
    pub regexp: Option<String>,
    /// Datacenter scope for the watch.
    pub datacenter: Option<String>,
    /// Namespace scope for the watch.
    pub namespace: Option<String>,
    /// Node metadata filters applied to matched services.
    pub node_meta: Option<BTreeMap<String, String>>,
    /// Whether the rendered module consumes matched services as a variable.
    pub include_var: Option<bool>,
}

impl ServicesWatchConfig {
    /// Merges `other` into a copy of this configuration.
    ///
    /// Fields explicitly set on `other` take precedence; fields left unset on
    /// `other` keep this configuration's values.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        if other.regexp.is_some() {
            merged.regexp.clone_from(&other.regexp);
        }
        if other.datacenter.is_some() {
            merged.datacenter.clone_from(&other.datacenter);
        }
        if other.namespace.is_some() {
            merged.namespace.clone_from(&other.namespace);
        }
        if other.node_meta.is_some() {
            merged.node_meta.clone_from(&other.node_meta);
        }
        if other.include_var.is_some() {
            merged.include_var = other.include_var;
        }
        merged
    }

    /// Fills every unset field with its documented default, in place.
    ///
    /// `service_names` carries ambient task context; when the operator set no
    /// pattern, the default is an anchored alternation over those names so the
    /// watch covers exactly the task's services.
    pub fn finalize(&mut self, service_names: &[String]) {
        if self.regexp.is_none() {
            self.regexp = Some(default_pattern(service_names));
        }
        if self.datacenter.is_none() {
            self.datacenter = Some(String::new());
        }
        if self.namespace.is_none() {
            self.namespace = Some(String::new());
        }
        if self.node_meta.is_none() {
            self.node_meta = Some(BTreeMap::new());
        }
        if self.include_var.is_none() {
            self.include_var = Some(false);
        }
    }

    /// Validates required fields. Run after [`Self::finalize`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the pattern is unset or
    /// empty, and [`ConfigError::InvalidField`] when it does not compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pattern = match self.regexp.as_deref() {
            None | Some("") => {
                return Err(ConfigError::MissingField {
                    construct: CONSTRUCT,
                    field: "regexp",
                });
            }
            Some(pattern) => pattern,
        };
        match Regex::new(pattern) {
            Ok(_) => Ok(()),
            Err(err) => Err(ConfigError::InvalidField {
                construct: CONSTRUCT,
                field: "regexp",
                reason: err.to_string(),
            }),
        }
    }
}

/// Builds the default pattern from finalize-context service names.
///
/// Names are sorted and escaped so the result is deterministic and matches
/// exactly the listed services. No names yields the empty pattern, which
/// validation rejects.
fn default_pattern(service_names: &[String]) -> String {
    if service_names.is_empty() {
        return String::new();
    }
    let mut names: Vec<String> =
        service_names.iter().map(|name| regex::escape(name)).collect();
    names.sort();
    names.dedup();
    format!("^({})$", names.join("|"))
}
