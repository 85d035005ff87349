// crates/modsync-config/src/watch.rs
// ============================================================================
// Module: Watch Source
// Description: Closed variant set over watch-source configuration kinds.
// Purpose: Dispatch the merge/finalize/validate lifecycle exhaustively and
//          implement the absence-aware combination rules.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`WatchSource`] is the closed enum over all watch kinds. Adding a kind is a
//! compile-time-checked exercise: every lifecycle method matches exhaustively.
//! Absence ("the task configures no such watch") is modeled as
//! `Option<WatchSource>`; the free functions [`merge`], [`finalize`], and
//! [`validate`] implement the absence rules so callers never special-case
//! `None` themselves.

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::kv::KvWatchConfig;
use crate::services::ServicesWatchConfig;

// ============================================================================
// SECTION: Watch Kind
// ============================================================================

/// Discriminant for the closed set of watch kinds.
///
/// # Invariants
/// - Variants are stable for serialization and log labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchKind {
    /// Key/value path watch.
    Kv,
    /// Catalog-services watch.
    Services,
}

impl WatchKind {
    /// Returns a stable label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kv => "kv",
            Self::Services => "services",
        }
    }
}

// ============================================================================
// SECTION: Watch Source
// ============================================================================

/// A configured origin of dynamic state that a task depends on.
///
/// # Invariants
/// - The variant set is closed; lifecycle dispatch is exhaustive.
/// - After [`WatchSource::finalize`], no field of the active variant is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum WatchSource {
    /// Key/value path watch.
    Kv(KvWatchConfig),
    /// Catalog-services watch.
    Services(ServicesWatchConfig),
}

impl WatchSource {
    /// Returns the kind discriminant for this watch source.
    #[must_use]
    pub const fn kind(&self) -> WatchKind {
        match self {
            Self::Kv(_) => WatchKind::Kv,
            Self::Services(_) => WatchKind::Services,
        }
    }

    /// Merges `other` into a copy of this watch source.
    ///
    /// Fields explicitly set on `other` take precedence. Merging two different
    /// kinds is a no-op returning this watch source's copy unchanged: a
    /// cross-kind merge signals "nothing to combine", not an error.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Kv(base), Self::Kv(overlay)) => Self::Kv(base.merge(overlay)),
            (Self::Services(base), Self::Services(overlay)) => {
                Self::Services(base.merge(overlay))
            }
            _ => self.clone(),
        }
    }

    /// Fills every unset field of the active variant with its default.
    ///
    /// `context` carries ambient values known only at finalize time (the
    /// task's service names); variants that need no context ignore it.
    pub fn finalize(&mut self, context: &[String]) {
        match self {
            Self::Kv(config) => config.finalize(),
            Self::Services(config) => config.finalize(context),
        }
    }

    /// Validates the active variant's required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the missing or invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Kv(config) => config.validate(),
            Self::Services(config) => config.validate(),
        }
    }
}

// ============================================================================
// SECTION: Absence-Aware Lifecycle
// ============================================================================

/// Merges two optional watch sources with later-wins precedence.
///
/// An absent base yields a copy of the overlay; an absent overlay yields a
/// copy of the base; both absent yields absent. The returned value is fully
/// independent of both inputs.
#[must_use]
pub fn merge(base: Option<&WatchSource>, overlay: Option<&WatchSource>) -> Option<WatchSource> {
    match (base, overlay) {
        (None, None) => None,
        (None, Some(overlay)) => Some(overlay.clone()),
        (Some(base), None) => Some(base.clone()),
        (Some(base), Some(overlay)) => Some(base.merge(overlay)),
    }
}

/// Finalizes an optional watch source in place. Absent is a no-op.
pub fn finalize(watch: &mut Option<WatchSource>, context: &[String]) {
    if let Some(watch) = watch {
        watch.finalize(context);
    }
}

/// Validates an optional watch source. Absent always validates.
///
/// # Errors
///
/// Returns [`ConfigError`] naming the missing or invalid field when a present
/// watch source fails validation.
pub fn validate(watch: Option<&WatchSource>) -> Result<(), ConfigError> {
    watch.map_or(Ok(()), WatchSource::validate)
}
