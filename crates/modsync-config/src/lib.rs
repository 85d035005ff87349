// crates/modsync-config/src/lib.rs
// ============================================================================
// Module: Modsync Config
// Description: Polymorphic watch-source configuration model for Modsync tasks.
// Purpose: Combine, default-fill, and validate operator watch configuration.
// Dependencies: regex, serde, thiserror
// ============================================================================

//! ## Overview
//! This crate defines the watch-source configuration model: a closed set of
//! watch kinds (a KV-path watch, a catalog-services watch) that all follow the
//! same lifecycle. Operator fragments are partially specified; fragments are
//! merged with later-wins precedence for explicitly set fields, finalized so
//! every field holds a concrete value, and validated before the scheduler may
//! run them.
//! Invariants:
//! - After [`finalize`], no field of a present watch source is unset.
//! - [`validate`] is meaningful only after [`finalize`]; an absent watch
//!   source always validates (a task simply has no such watch).
//! - A validated watch source is read-only; changes build a new snapshot.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod kv;
pub mod services;
pub mod watch;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ConfigError;
pub use kv::KvWatchConfig;
pub use services::ServicesWatchConfig;
pub use watch::WatchKind;
pub use watch::WatchSource;
pub use watch::finalize;
pub use watch::merge;
pub use watch::validate;
