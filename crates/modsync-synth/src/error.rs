// crates/modsync-synth/src/error.rs
// ============================================================================
// Module: Synthesis Errors
// Description: Error kinds for module rendering and file materialization.
// Purpose: Name the task and file for every failure so the scheduler can
//          decide retry policy with full context.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Synthesis errors abort the current task's materialization; the core
//! performs no retries. I/O errors wrap the underlying filesystem failure.
//! Render errors indicate malformed input that normalization did not catch
//! and are a caller defect.

use thiserror::Error;

/// Module synthesis errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every variant names the task and the output file it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthError {
    /// Failure to create, chmod, write, or flush an output file.
    #[error("unable to write {file} for task {task}: {message}")]
    Io {
        /// Task whose module was being materialized.
        task: String,
        /// Output file that failed.
        file: String,
        /// Underlying filesystem error.
        message: String,
    },
    /// Malformed input discovered at render time.
    #[error("unable to render {file} for task {task}: {message}")]
    Render {
        /// Task whose module was being rendered.
        task: String,
        /// Output file that failed.
        file: String,
        /// Reason the input could not be rendered.
        message: String,
    },
}
