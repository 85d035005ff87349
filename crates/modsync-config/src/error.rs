// crates/modsync-config/src/error.rs
// ============================================================================
// Module: Configuration Errors
// Description: Field-level validation errors for watch-source configuration.
// Purpose: Surface correctable misconfiguration with construct and field detail.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Validation errors always name the offending field and the configuring
//! construct so operator-facing layers can surface them verbatim. They are
//! never raised for an absent configuration.

use thiserror::Error;

/// Watch-source configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every variant names the construct and field it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required field has no value after finalize.
    #[error("{field} is required for {construct}")]
    MissingField {
        /// Configuring construct, e.g. `kv watch source`.
        construct: &'static str,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A field holds a value that cannot be used.
    #[error("{field} is invalid for {construct}: {reason}")]
    InvalidField {
        /// Configuring construct, e.g. `services watch source`.
        construct: &'static str,
        /// Name of the invalid field.
        field: &'static str,
        /// Human-readable reason the value was rejected.
        reason: String,
    },
}
