//! Document discovery.
//!
//! The walk never fails: a missing root, a root that is not a directory, an
//! unreadable subtree or a symlink cycle each become a [`TraversalWarning`]
//! and the walk carries on with whatever it could read.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// How to decide which files are documents and how deep to look for them.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// File-name suffix, compared literally (`.md` matches `notes.md`).
    pub extension: String,
    /// Maximum directory depth below the root; the root itself is depth 0.
    pub max_depth: usize,
}

/// Suffix used when the configured one is blank.
pub const DEFAULT_EXTENSION: &str = ".md";

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: 64,
        }
    }
}

/// A subtree that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for TraversalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Everything one walk produced.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Matching files, in traversal order (siblings sorted by file name).
    pub documents: Vec<PathBuf>,
    pub warnings: Vec<TraversalWarning>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn push_warning(&mut self, path: &Path, reason: String) {
        warn!(path = %path.display(), reason = %reason, "cannot read directory, skipping");
        self.warnings.push(TraversalWarning {
            path: path.to_path_buf(),
            reason,
        });
    }
}

/// Recursively collect every file under `root` whose name ends with
/// `options.extension`.
///
/// Returned paths keep the form of `root`: a relative root yields relative
/// paths. Symbolic links are followed; a link back to one of its own
/// ancestors, or a second link to a directory already walked, is reported as
/// a warning instead of being walked again.
pub fn discover_documents(root: &Path, options: &DiscoveryOptions) -> Discovery {
    let mut discovery = Discovery::default();

    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            discovery.push_warning(root, "not a directory".to_string());
            return discovery;
        }
        Err(e) => {
            discovery.push_warning(root, e.to_string());
            return discovery;
        }
    }

    // A blank suffix would match every file.
    let extension = match options.extension.trim() {
        "" => {
            warn!(default = DEFAULT_EXTENSION, "blank document extension, using default");
            DEFAULT_EXTENSION
        }
        ext => ext,
    };

    let mut walker = WalkDir::new(root)
        .follow_links(true)
        .max_depth(options.max_depth)
        .sort_by_file_name()
        .into_iter();
    // Canonical paths of directories already walked, so a second link to the
    // same directory does not produce duplicate documents.
    let mut visited: HashSet<PathBuf> = HashSet::new();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let reason = match e.loop_ancestor() {
                    Some(ancestor) => format!("symlink cycle back to {}", ancestor.display()),
                    None => e
                        .io_error()
                        .map(|io| io.to_string())
                        .unwrap_or_else(|| e.to_string()),
                };
                discovery.push_warning(&path, reason);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            let real = std::fs::canonicalize(entry.path())
                .unwrap_or_else(|_| entry.path().to_path_buf());
            if !visited.insert(real) {
                discovery
                    .push_warning(entry.path(), "already walked via another path".to_string());
                walker.skip_current_dir();
                continue;
            }
            if entry.depth() == options.max_depth {
                discovery.push_warning(
                    entry.path(),
                    format!("depth limit {} reached, not descending", options.max_depth),
                );
            }
            continue;
        }

        if matches_extension(&entry.file_name().to_string_lossy(), extension) {
            debug!(path = %entry.path().display(), "document matched");
            discovery.documents.push(entry.into_path());
        }
    }

    discovery
}

fn matches_extension(file_name: &str, extension: &str) -> bool {
    file_name.ends_with(extension)
}
