//! File walker for PHP sources.
//!
//! Wraps the `ignore` crate's `WalkBuilder` to enumerate every `.php` file
//! under a root directory. Unlike a search tool, an index has to see the
//! whole tree: gitignore rules, hidden-file filtering, and default
//! exclusions are all switched off. The extension gate is the only filter.
//!
//! Entries are yielded in lexical path order so that a re-run over an
//! unchanged tree visits files in the same sequence.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// A file-system walker that collects PHP source files.
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    /// Create a new walker rooted at the given path.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Build the underlying `WalkBuilder` with all our configuration applied.
    fn make_builder(&self) -> WalkBuilder {
        let mut builder = WalkBuilder::new(&self.root);

        // No .gitignore, no hidden-file skipping, no parent lookups: every
        // file under the root is a candidate.
        builder.standard_filters(false);

        // Symlinks are not followed, which also rules out symlink cycles.
        builder.follow_links(false);

        // Deterministic lexical ordering; files can then be dispatched to
        // worker threads without losing the output ordering guarantee.
        builder.sort_by_file_path(|a, b| a.cmp(b));

        builder
    }

    /// Walk the file tree and collect every `.php` file path, in lexical
    /// order. Unreadable directory entries are skipped.
    pub fn collect_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for result in self.make_builder().build() {
            let entry = match result {
                Ok(e) => e,
                Err(_) => continue,
            };
            if entry.file_type().map_or(false, |ft| ft.is_file())
                && is_php_file(entry.path())
            {
                paths.push(entry.into_path());
            }
        }
        paths
    }
}

/// Case-insensitive `.php` extension check.
pub fn is_php_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("php"))
}
