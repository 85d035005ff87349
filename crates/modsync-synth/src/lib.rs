// crates/modsync-synth/src/lib.rs
// ============================================================================
// Module: Modsync Synth
// Description: Deterministic root-module synthesizer for Modsync tasks.
// Purpose: Render a task's declarative inputs into infrastructure-as-code
//          files with idempotent-regeneration semantics.
// Dependencies: serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate turns a task's declarative inputs (backend, required providers,
//! discovered services, user variables) into a fixed set of module files that
//! an external provisioning tool applies. Rendering is deterministic: blocks,
//! attributes, services, and variable names are emitted in sorted order, so
//! identical logical input produces byte-identical output regardless of
//! construction order.
//! Invariants:
//! - [`synthesize`] never modifies an existing file unless `force` is set.
//! - Files are fully written (preamble included) or not written at all from
//!   one pass; the first error aborts the call.
//! - `synthesize` must be serialized per destination directory by the caller;
//!   calls for different directories are independent.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod block;
pub mod error;
pub mod input;
pub mod render;
pub mod synth;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use block::AttributeBlock;
pub use error::SynthError;
pub use input::ModuleInput;
pub use input::Service;
pub use input::Task;
pub use input::Variables;
pub use synth::FILE_PREAMBLE;
pub use synth::MAIN_FILENAME;
pub use synth::MODULE_VARS_FILENAME;
pub use synth::ModuleFile;
pub use synth::REQUIRED_VERSION;
pub use synth::TFVARS_TMPL_FILENAME;
pub use synth::VARS_FILENAME;
pub use synth::synthesize;
