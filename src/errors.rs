//! Application error types and user-facing error formatting.
//!
//! Two layers of failure exist in an indexing run:
//! - [`FileError`] for anything that goes wrong inside a single file (read,
//!   parse, extraction). These are logged, the file is skipped, and the run
//!   continues.
//! - [`PhindexError`] for failures that end the run: an unusable root path
//!   or an output destination that cannot be written.
//!
//! [`PhindexError`] carries contextual hints and exit codes so that `main()`
//! can present human-readable diagnostics on stderr without ever exposing
//! raw panics or debug formatting.

use std::path::PathBuf;

use thiserror::Error;

use crate::extractor::{ExtractError, ParseError};

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

/// Process exit codes.
///
/// * `0` - success (per-file skips do not change this)
/// * `1` - fatal runtime error
///
/// Usage errors exit with code `2`, handled by clap before `main` runs.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

// ---------------------------------------------------------------------------
// Per-file errors
// ---------------------------------------------------------------------------

/// Errors isolated to a single file.
///
/// None of these abort the run: the pipeline logs the file and moves on, and
/// the failing file contributes nothing to the index.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file could not be read.
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    /// The file could not be parsed into a usable tree.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A declaration was too malformed to interpret.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

// ---------------------------------------------------------------------------
// Unified application error
// ---------------------------------------------------------------------------

/// Unified error type for failures that abort the run.
#[derive(Error, Debug)]
pub enum PhindexError {
    /// The root path does not exist or is not a directory.
    #[error("cannot index {}: not a readable directory", path.display())]
    Root { path: PathBuf },

    /// The finished index could not be written to its destination.
    #[error("cannot write index to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings document failed to serialize.
    #[error("rendering index: {0}")]
    Render(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhindexError {
    /// Return the appropriate process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }

    /// Return an optional human-readable hint that may help the user fix
    /// the problem.  Returns `None` when no specific guidance applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PhindexError::Root { .. } => {
                Some("pass a directory that exists and is readable")
            }
            PhindexError::Write { .. } => {
                Some("check that the destination directory exists and is writable")
            }
            PhindexError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Some("check file permissions")
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
