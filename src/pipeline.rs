//! Full indexing pipeline.
//!
//! Orchestrates a run by combining:
//! - File walking ([`crate::walker`])
//! - Tree-sitter parsing and extraction ([`crate::extractor`])
//! - Index aggregation ([`crate::index`])
//! - Parallel file processing (rayon)
//!
//! Each file is processed independently into its own [`SymbolIndex`]; the
//! per-file results are merged in walk order, so the final index is
//! identical whether the parse phase ran on one thread or many.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::errors::{FileError, PhindexError};
use crate::extractor;
use crate::index::SymbolIndex;
use crate::progress::Progress;
use crate::walker::Walker;

// ---------------------------------------------------------------------------
// IndexStats
// ---------------------------------------------------------------------------

/// Statistics returned after an indexing run.
#[derive(Debug, Clone)]
pub struct IndexStats {
    /// Number of matching files found by the walker.
    pub file_count: usize,
    /// Number of files that contributed to the index.
    pub indexed_count: usize,
    /// Number of files skipped because of read, parse, or extraction errors.
    pub skipped_count: usize,
    /// Number of symbols in the final index.
    pub symbol_count: usize,
    /// Wall-clock elapsed time.
    pub elapsed: std::time::Duration,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Index every PHP file under `root`.
///
/// Steps:
/// 1. Validate the root path (fatal when unusable: nothing is indexed and
///    nothing is written).
/// 2. Walk the tree for `.php` files, in lexical order.
/// 3. Parse and extract files in parallel with rayon; each failure is
///    logged to stderr and that file contributes nothing.
/// 4. Merge per-file results in walk order.
pub fn build_index(
    root: &Path,
    progress: &Progress,
) -> Result<(SymbolIndex, IndexStats), PhindexError> {
    let start = Instant::now();

    let meta = std::fs::metadata(root).map_err(|_| PhindexError::Root {
        path: root.to_path_buf(),
    })?;
    if !meta.is_dir() {
        return Err(PhindexError::Root {
            path: root.to_path_buf(),
        });
    }

    let paths = Walker::new(root).collect_paths();

    let results: Vec<Result<SymbolIndex, FileError>> = paths
        .par_iter()
        .map(|path| {
            progress.file(path.strip_prefix(root).unwrap_or(path));
            index_file(path)
        })
        .collect();

    let mut index = SymbolIndex::new();
    let mut skipped = 0usize;
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(file_index) => index.merge(file_index),
            Err(err) => {
                skipped += 1;
                eprintln!("phindex: skipping {}: {err}", path.display());
            }
        }
    }

    let stats = IndexStats {
        file_count: paths.len(),
        indexed_count: paths.len() - skipped,
        skipped_count: skipped,
        symbol_count: index.symbol_count(),
        elapsed: start.elapsed(),
    };
    Ok((index, stats))
}

/// Read, parse, and extract a single file into a fresh index.
pub fn index_file(path: &Path) -> Result<SymbolIndex, FileError> {
    let source = std::fs::read_to_string(path)?;
    let tree = extractor::parse_source(&source)?;
    let mut index = SymbolIndex::new();
    extractor::extract_symbols(&tree, &source, &mut index)?;
    Ok(index)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
