// crates/modsync-synth/src/block.rs
// ============================================================================
// Module: Attribute Block
// Description: Named, sorted key/value set for deterministic block rendering.
// Purpose: Order attribute emission by name regardless of input iteration
//          order.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! An [`AttributeBlock`] is a pure rendering helper: a block name plus a
//! mapping from attribute name to an opaque, already-typed value. Iteration
//! for output purposes is always in ascending attribute-name order. Blocks
//! are constructed once per render pass and carry no merge or validation
//! semantics.

use std::collections::BTreeMap;

use serde_json::Value;

/// A named configuration block with deterministically ordered attributes.
///
/// # Invariants
/// - Attribute iteration is in ascending attribute-name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBlock {
    /// Block name, e.g. a provider or backend name.
    name: String,
    /// Attribute name to value mapping; BTreeMap keeps keys sorted.
    attrs: BTreeMap<String, Value>,
}

impl AttributeBlock {
    /// Creates a block from a name and an attribute mapping.
    #[must_use]
    pub const fn new(name: String, attrs: BTreeMap<String, Value>) -> Self {
        Self {
            name,
            attrs,
        }
    }

    /// Creates a block from the operator's single-entry `{name: {attrs}}`
    /// shape. Returns `None` when the mapping holds no entry or the entry's
    /// value is not an object.
    #[must_use]
    pub fn from_entry(entry: &BTreeMap<String, Value>) -> Option<Self> {
        let (name, value) = entry.iter().next()?;
        let Value::Object(attrs) = value else {
            return None;
        };
        let attrs = attrs.iter().map(|(key, value)| (key.clone(), value.clone())).collect();
        Some(Self::new(name.clone(), attrs))
    }

    /// Returns the block name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns attribute names in ascending order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Returns attributes as `(name, value)` pairs in ascending name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the value of the named attribute, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }
}
