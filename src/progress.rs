//! Progress reporting for indexing runs.
//!
//! Provides stderr-based feedback while the walker and parsers work through
//! a source tree. Two modes:
//! - **Silent**: no output (piped stderr, `--quiet`)
//! - **PerFile**: one line per file plus a completion summary
//!
//! Progress output is informational only; the index itself always goes to
//! stdout or the output file.

use std::path::Path;

use crate::pipeline::IndexStats;

// ---------------------------------------------------------------------------
// ProgressMode
// ---------------------------------------------------------------------------

/// How progress should be displayed on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// No output at all.
    Silent,
    /// A line per indexed file, plus a summary.
    PerFile,
}

/// Detect the appropriate progress mode.
///
/// - Returns `Silent` if `suppress` is true (`--quiet`).
/// - Returns `Silent` if stderr is not a TTY.
/// - Returns `PerFile` otherwise.
pub fn detect_mode(suppress: bool) -> ProgressMode {
    if suppress {
        return ProgressMode::Silent;
    }

    use std::io::IsTerminal;
    if !std::io::stderr().is_terminal() {
        return ProgressMode::Silent;
    }

    ProgressMode::PerFile
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress reporter for one indexing run.
///
/// [`file`] may be called from parallel workers; each call writes a single
/// line, so interleaving never corrupts the output.
///
/// [`file`]: Progress::file
pub struct Progress {
    mode: ProgressMode,
}

impl Progress {
    pub fn new(mode: ProgressMode) -> Self {
        Self { mode }
    }

    /// Convenience: create a silent reporter (no output).
    pub fn silent() -> Self {
        Self::new(ProgressMode::Silent)
    }

    /// Announce that a file is being indexed. `path` should already be
    /// relative to the walk root.
    pub fn file(&self, path: &Path) {
        if self.mode == ProgressMode::PerFile {
            eprintln!("Indexing file {}", path.display());
        }
    }

    /// Print the final completion summary.
    pub fn finish(&self, stats: &IndexStats) {
        if self.mode == ProgressMode::Silent {
            return;
        }
        if stats.skipped_count > 0 {
            eprintln!(
                "Indexed {} of {} files ({} symbols, {} skipped) in {:.1}s",
                stats.indexed_count,
                stats.file_count,
                stats.symbol_count,
                stats.skipped_count,
                stats.elapsed.as_secs_f64(),
            );
        } else {
            eprintln!(
                "Indexed {} files ({} symbols) in {:.1}s",
                stats.indexed_count,
                stats.symbol_count,
                stats.elapsed.as_secs_f64(),
            );
        }
    }

    /// Get the mode (for testing).
    #[cfg(test)]
    pub fn mode(&self) -> ProgressMode {
        self.mode
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
