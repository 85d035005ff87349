// crates/modsync-config/src/kv/tests.rs
// ============================================================================
// Module: KV Watch Configuration Tests
// Description: Unit tests for KV watch merge, finalize, and validate.
// Purpose: Validate field precedence and default-fill behavior per variant.
// Dependencies: modsync-config
// ============================================================================

//! ## Overview
//! Validates the KV variant's merge precedence, finalize defaults, and
//! required-path validation.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::KvWatchConfig;
use crate::error::ConfigError;

// ============================================================================
// SECTION: Merge Tests
// ============================================================================

#[test]
fn merge_set_fields_take_precedence() {
    let base = KvWatchConfig {
        path: Some("base/path".to_string()),
        recurse: Some(false),
        datacenter: Some("dc1".to_string()),
        namespace: Some("team-a".to_string()),
        include_var: Some(false),
    };
    let overlay = KvWatchConfig {
        path: Some("override/path".to_string()),
        recurse: Some(true),
        ..KvWatchConfig::default()
    };
    let merged = base.merge(&overlay);
    assert_eq!(merged.path.as_deref(), Some("override/path"));
    assert_eq!(merged.recurse, Some(true));
    assert_eq!(merged.datacenter.as_deref(), Some("dc1"));
    assert_eq!(merged.namespace.as_deref(), Some("team-a"));
    assert_eq!(merged.include_var, Some(false));
}

#[test]
fn merge_unset_fields_do_not_clobber() {
    let base = KvWatchConfig {
        path: Some("base/path".to_string()),
        ..KvWatchConfig::default()
    };
    let merged = base.merge(&KvWatchConfig::default());
    assert_eq!(merged, base);
}

#[test]
fn merge_does_not_mutate_inputs() {
    let base = KvWatchConfig {
        path: Some("base/path".to_string()),
        ..KvWatchConfig::default()
    };
    let overlay = KvWatchConfig {
        path: Some("override/path".to_string()),
        ..KvWatchConfig::default()
    };
    let _ = base.merge(&overlay);
    assert_eq!(base.path.as_deref(), Some("base/path"));
    assert_eq!(overlay.path.as_deref(), Some("override/path"));
}

// ============================================================================
// SECTION: Finalize Tests
// ============================================================================

#[test]
fn finalize_fills_every_unset_field() {
    let mut config = KvWatchConfig::default();
    config.finalize();
    assert_eq!(config.path.as_deref(), Some(""));
    assert_eq!(config.recurse, Some(false));
    assert_eq!(config.datacenter.as_deref(), Some(""));
    assert_eq!(config.namespace.as_deref(), Some(""));
    assert_eq!(config.include_var, Some(false));
}

#[test]
fn finalize_preserves_set_fields() {
    let mut config = KvWatchConfig {
        path: Some("app/config".to_string()),
        recurse: Some(true),
        ..KvWatchConfig::default()
    };
    config.finalize();
    assert_eq!(config.path.as_deref(), Some("app/config"));
    assert_eq!(config.recurse, Some(true));
}

#[test]
fn finalize_is_idempotent() {
    let mut once = KvWatchConfig {
        path: Some("app/config".to_string()),
        ..KvWatchConfig::default()
    };
    once.finalize();
    let mut twice = once.clone();
    twice.finalize();
    assert_eq!(once, twice);
}

// ============================================================================
// SECTION: Validate Tests
// ============================================================================

#[test]
fn validate_accepts_finalized_config_with_path() {
    let mut config = KvWatchConfig {
        path: Some("app/config".to_string()),
        ..KvWatchConfig::default()
    };
    config.finalize();
    assert!(config.validate().is_ok());
}

#[test]
fn validate_rejects_empty_path_naming_field() {
    let mut config = KvWatchConfig::default();
    config.finalize();
    let err = config.validate().expect_err("expected missing path rejection");
    assert_eq!(err, ConfigError::MissingField {
        construct: "kv watch source",
        field: "path",
    });
}
