// crates/modsync-synth/src/render/tests.rs
// ============================================================================
// Module: Module Rendering Tests
// Description: Unit tests for value rendering and block emission rules.
// Purpose: Validate literal/type conversion, alias dropping, and the
//          backend-absent rule.
// Dependencies: modsync-synth
// ============================================================================

//! ## Overview
//! Validates the value-to-literal and value-to-type conversions plus the
//! block-level emission rules of the main definition file.

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

use std::collections::BTreeMap;

use serde_json::json;

use super::hcl_string;
use super::hcl_type;
use super::hcl_value;
use super::is_ident;
use super::render_file;
use crate::input::ModuleInput;
use crate::input::Task;
use crate::synth::FILE_PREAMBLE;
use crate::synth::ModuleFile;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Builds a normalized input with one provider carrying the given attributes.
fn input_with_provider(name: &str, attrs: serde_json::Value) -> ModuleInput {
    let mut input = ModuleInput::new(Task {
        name: "example".to_string(),
        source: "./modules/example".to_string(),
        ..Task::default()
    });
    input.providers = vec![BTreeMap::from([(name.to_string(), attrs)])];
    input.normalize();
    input
}

// ============================================================================
// SECTION: Value Rendering Tests
// ============================================================================

#[test]
fn scalars_render_as_literals() {
    assert_eq!(hcl_value(&json!(null), 0), "null");
    assert_eq!(hcl_value(&json!(true), 0), "true");
    assert_eq!(hcl_value(&json!(8500), 0), "8500");
    assert_eq!(hcl_value(&json!("addr"), 0), "\"addr\"");
}

#[test]
fn strings_escape_quotes_and_backslashes() {
    assert_eq!(hcl_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
    assert_eq!(hcl_string("line\nbreak"), "\"line\\nbreak\"");
}

#[test]
fn arrays_render_inline() {
    assert_eq!(hcl_value(&json!(["a", "b"]), 0), "[\"a\", \"b\"]");
}

#[test]
fn objects_render_multiline_with_sorted_keys() {
    let value = json!({"zeta": 1, "alpha": "x"});
    assert_eq!(hcl_value(&value, 2), "{\n    alpha = \"x\"\n    zeta = 1\n  }");
}

#[test]
fn non_identifier_object_keys_are_quoted() {
    let value = json!({"key with space": 1});
    assert_eq!(hcl_value(&value, 0), "{\n  \"key with space\" = 1\n}");
}

// ============================================================================
// SECTION: Type Derivation Tests
// ============================================================================

#[test]
fn types_derive_from_value_shape() {
    assert_eq!(hcl_type(&json!("x")), "string");
    assert_eq!(hcl_type(&json!(1)), "number");
    assert_eq!(hcl_type(&json!(false)), "bool");
    assert_eq!(hcl_type(&json!(null)), "any");
    assert_eq!(hcl_type(&json!(["a", "b"])), "list(string)");
    assert_eq!(hcl_type(&json!(["a", 1])), "list(any)");
    assert_eq!(hcl_type(&json!([])), "list(any)");
    assert_eq!(hcl_type(&json!({"port": 1, "host": "h"})), "object({ host = string, port = number })");
    assert_eq!(hcl_type(&json!({"bad key": 1})), "map(any)");
}

#[test]
fn identifier_rule_rejects_leading_digits_and_spaces() {
    assert!(is_ident("local"));
    assert!(is_ident("_hidden"));
    assert!(is_ident("name-with-dash"));
    assert!(!is_ident("1st"));
    assert!(!is_ident("has space"));
    assert!(!is_ident(""));
}

// ============================================================================
// SECTION: Block Emission Tests
// ============================================================================

#[test]
fn provider_attributes_become_variable_references_and_alias_is_dropped() {
    let input = input_with_provider("local", json!({"address": "a", "alias": "x"}));
    let main = render_file(ModuleFile::Main, &input).expect("main must render");
    assert!(main.contains("provider \"local\" {\n  address = var.local.address\n}"));
    assert!(!main.contains("alias"));
}

#[test]
fn missing_backend_emits_no_backend_block() {
    let input = input_with_provider("local", json!({}));
    let main = render_file(ModuleFile::Main, &input).expect("main must render");
    assert!(!main.contains("backend"));
    assert!(main.contains("terraform {"));
}

#[test]
fn zero_providers_keep_the_section_separators() {
    let mut input = ModuleInput::new(Task {
        name: "example".to_string(),
        source: "./modules/example".to_string(),
        ..Task::default()
    });
    input.normalize();
    let main = render_file(ModuleFile::Main, &input).expect("main must render");
    assert!(main.contains("}\n\n\nmodule \"example\" {"));
}

#[test]
fn task_description_renders_as_leading_comment() {
    let mut input = input_with_provider("local", json!({}));
    input.task.description = "Keeps the db pool in sync".to_string();
    let main = render_file(ModuleFile::Main, &input).expect("main must render");
    assert!(main.contains("# Keeps the db pool in sync\nmodule \"example\" {"));
}

#[test]
fn rendered_files_start_with_the_ownership_preamble() {
    let input = input_with_provider("local", json!({}));
    for file in ModuleFile::ALL {
        let content = render_file(file, &input).expect("file must render");
        assert!(content.starts_with(FILE_PREAMBLE));
    }
}

#[test]
fn invalid_variable_name_is_a_render_error() {
    let mut input = input_with_provider("local", json!({}));
    input.variables.insert("not valid", json!(1));
    let err = render_file(ModuleFile::Main, &input).expect_err("expected render rejection");
    assert!(matches!(err, crate::error::SynthError::Render { .. }));
}
