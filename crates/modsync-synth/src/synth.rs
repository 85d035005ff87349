// crates/modsync-synth/src/synth.rs
// ============================================================================
// Module: Module Synthesizer
// Description: On-disk materialization of a task's module files.
// Purpose: Write the fixed file set with skip/create/overwrite semantics and
//          durable flushes.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! [`synthesize`] writes a task's module files into its destination
//! directory. A file that already exists is skipped unless `force` is set, so
//! re-running synthesis never destroys operator- or tool-made edits to
//! already-materialized files. Each file is rendered in memory first, then
//! created, chmodded, written with its ownership preamble, and flushed; the
//! first error aborts the call. Files are fsynced but the directory entry is
//! not, so a crash between write and directory persistence can leave an
//! indeterminate file that the next run's existence check treats as present.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;

use tracing::debug;
use tracing::info;

use crate::error::SynthError;
use crate::input::ModuleInput;
use crate::render;

// ============================================================================
// SECTION: File Contract
// ============================================================================

/// Version constraint pinned into the generated module for compatibility
/// between the synthesizer, the provisioning tool, and task modules.
pub const REQUIRED_VERSION: &str = "~> 1.0";

/// File name for the main definition file.
pub const MAIN_FILENAME: &str = "main.tf";

/// File name for the variable definitions file.
pub const VARS_FILENAME: &str = "variables.tf";

/// File name for the variable definitions specific to the task's module.
pub const MODULE_VARS_FILENAME: &str = "variables.module.tf";

/// File name for the variable-values template filled by the watcher.
pub const TFVARS_TMPL_FILENAME: &str = "terraform.tfvars.tmpl";

/// Ownership preamble written at the top of every generated file.
pub const FILE_PREAMBLE: &str = "# This file is generated by Modsync.
#
# The blocks, arguments, variables, and values are derived from the operator
# configuration for Modsync. Any manual changes to this file may not be
# preserved and could be clobbered by a subsequent update.

";

/// The fixed set of files a task's module directory may contain.
///
/// # Invariants
/// - The set is closed; file names are a stable external contract.
/// - [`Self::ALL`] fixes the write order for deterministic logs and
///   first-error selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFile {
    /// Main definition file.
    Main,
    /// Variable definitions file.
    Vars,
    /// Module-specific variable definitions file.
    ModuleVars,
    /// Variable-values template file.
    TfvarsTmpl,
}

impl ModuleFile {
    /// All module files in write order.
    pub const ALL: [Self; 4] = [Self::Main, Self::Vars, Self::ModuleVars, Self::TfvarsTmpl];

    /// Returns the on-disk file name.
    #[must_use]
    pub const fn filename(self) -> &'static str {
        match self {
            Self::Main => MAIN_FILENAME,
            Self::Vars => VARS_FILENAME,
            Self::ModuleVars => MODULE_VARS_FILENAME,
            Self::TfvarsTmpl => TFVARS_TMPL_FILENAME,
        }
    }
}

// ============================================================================
// SECTION: Synthesis
// ============================================================================

/// Materializes the task's module files under `dir`.
///
/// `input` must be normalized. `mode` is the permission set applied to each
/// created file (ignored on non-Unix platforms). Existing files are skipped
/// unless `force` is set; the module-specific variable definitions file is
/// never written when the task defines no variables. Not safe to call
/// concurrently for the same directory.
///
/// # Errors
///
/// Returns [`SynthError`] naming the task and file on the first render or
/// filesystem failure; earlier files written in the same call are left in
/// place and the task directory must be treated as not yet materialized.
pub fn synthesize(
    input: &ModuleInput,
    dir: &Path,
    mode: u32,
    force: bool,
) -> Result<(), SynthError> {
    for file in ModuleFile::ALL {
        // Absence of this file is the signal that the task takes no
        // module-level variables.
        if file == ModuleFile::ModuleVars && input.variables.is_empty() {
            continue;
        }

        let path = dir.join(file.filename());
        let exists = path.exists();
        if exists && !force {
            debug!(
                target: "modsync::synth",
                task = %input.task.name,
                file = file.filename(),
                "module file already exists, skipping creation"
            );
            continue;
        }
        if exists {
            info!(
                target: "modsync::synth",
                task = %input.task.name,
                file = file.filename(),
                "overwriting module file"
            );
        } else {
            debug!(
                target: "modsync::synth",
                task = %input.task.name,
                file = file.filename(),
                "creating module file"
            );
        }

        let content = render::render_file(file, input)?;
        write_file(&path, &content, mode).map_err(|err| SynthError::Io {
            task: input.task.name.clone(),
            file: file.filename().to_string(),
            message: err.to_string(),
        })?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Creates the file, applies permissions, writes the content, and flushes it
/// to stable storage.
fn write_file(path: &Path, content: &str, mode: u32) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    set_mode(&file, mode)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

/// Applies the requested permission bits.
#[cfg(unix)]
fn set_mode(file: &fs::File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(mode))
}

/// Permission bits are not applicable on this platform.
#[cfg(not(unix))]
fn set_mode(_file: &fs::File, _mode: u32) -> io::Result<()> {
    Ok(())
}
