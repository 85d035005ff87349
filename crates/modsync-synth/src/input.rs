// crates/modsync-synth/src/input.rs
// ============================================================================
// Module: Task Module Input
// Description: Normalized per-render snapshot of a task's declarative inputs.
// Purpose: Assemble backend, providers, services, and variables into a
//          sorted structure ready for rendering.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ModuleInput`] is built fresh for every re-synthesis event from the
//! scheduler's current view of task configuration and discovered services. It
//! is never cached or diffed here; diffing is the provisioning tool's job
//! against the emitted files. [`ModuleInput::normalize`] must run once before
//! rendering and is idempotent.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::block::AttributeBlock;

// ============================================================================
// SECTION: Task Identity
// ============================================================================

/// Identity of the task a module is generated for.
///
/// # Invariants
/// - `name` is the module block label and must be unique per task directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task name.
    pub name: String,
    /// Operator-supplied description rendered above the module block.
    pub description: String,
    /// Module source location.
    pub source: String,
    /// Optional module version pin.
    pub version: Option<String>,
}

// ============================================================================
// SECTION: Services
// ============================================================================

/// A discovered service included in the task's module.
///
/// # Invariants
/// - `object_id` values must be unique within one render pass; duplicates are
///   a caller defect and must be deduplicated upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name.
    pub name: String,
    /// Optional tag scoping the watched service instances.
    pub tag: Option<String>,
    /// Optional datacenter the service is queried in.
    pub datacenter: Option<String>,
    /// Optional namespace the service is queried in.
    pub namespace: Option<String>,
    /// Optional operator-supplied description.
    pub description: Option<String>,
}

impl Service {
    /// Returns the stable per-service identifier.
    ///
    /// The identifier is the service name; a tag prefixes it as `tag.name`;
    /// a datacenter suffixes the result as `id@datacenter`.
    #[must_use]
    pub fn object_id(&self) -> String {
        let mut id = self.name.clone();
        if let Some(tag) = self.tag.as_deref()
            && !tag.is_empty()
        {
            id = format!("{tag}.{id}");
        }
        if let Some(datacenter) = self.datacenter.as_deref()
            && !datacenter.is_empty()
        {
            id = format!("{id}@{datacenter}");
        }
        id
    }
}

// ============================================================================
// SECTION: Variables
// ============================================================================

/// User-supplied module input variables, keyed by name.
///
/// # Invariants
/// - Names iterate in ascending order (BTreeMap order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variables(BTreeMap<String, Value>);

impl Variables {
    /// Creates an empty variable set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns true when no variables are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns variable names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns variables as `(name, value)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Sets a variable value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }
}

impl From<BTreeMap<String, Value>> for Variables {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

// ============================================================================
// SECTION: Module Input
// ============================================================================

/// The input data used to generate one task's root module.
///
/// # Invariants
/// - [`Self::normalize`] runs before any render and is idempotent.
/// - Normalized providers and services are sorted by name; emission order is
///   a rendering concern only and carries no semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInput {
    /// Task identity.
    pub task: Task,
    /// Backend configuration in the operator's `{name: {attrs}}` shape.
    pub backend: Option<BTreeMap<String, Value>>,
    /// Provider configurations, each in the `{name: {attrs}}` shape.
    pub providers: Vec<BTreeMap<String, Value>>,
    /// Required-provider declarations keyed by provider name.
    pub provider_info: BTreeMap<String, Value>,
    /// Discovered services included in the module.
    pub services: Vec<Service>,
    /// User-supplied module input variables.
    pub variables: Variables,
    /// Backend block built by normalize; absent when no backend is configured.
    backend_block: Option<AttributeBlock>,
    /// Provider blocks built by normalize, sorted by name.
    provider_blocks: Vec<AttributeBlock>,
}

impl ModuleInput {
    /// Creates an input for the given task with no backend, providers,
    /// services, or variables. Callers fill the public fields and then run
    /// [`Self::normalize`].
    #[must_use]
    pub fn new(task: Task) -> Self {
        Self {
            task,
            ..Self::default()
        }
    }

    /// Normalizes raw inputs into the sorted state the renderer consumes.
    ///
    /// Recomputes everything from the raw fields, so running it again after
    /// any mutation (or running it twice) yields the same internal state.
    pub fn normalize(&mut self) {
        self.backend_block = self.backend.as_ref().and_then(AttributeBlock::from_entry);
        self.provider_blocks =
            self.providers.iter().filter_map(AttributeBlock::from_entry).collect();
        self.provider_blocks.sort_by(|a, b| a.name().cmp(b.name()));
        self.services.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.tag.cmp(&b.tag))
                .then_with(|| a.datacenter.cmp(&b.datacenter))
        });
    }

    /// Returns the normalized backend block, if a backend was configured.
    #[must_use]
    pub const fn backend_block(&self) -> Option<&AttributeBlock> {
        self.backend_block.as_ref()
    }

    /// Returns the normalized provider blocks, sorted by name.
    #[must_use]
    pub fn provider_blocks(&self) -> &[AttributeBlock] {
        &self.provider_blocks
    }
}
