/*!
 * Directory scanning and source file collection
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::Language;
use crate::error::{Result, ResultExt};
use crate::types::{CollectedFiles, SourceFile};

/// Build-artifact directory that is never descended into
pub const PRUNED_DIR: &str = "obj";

/// Name of the C# file holding project-wide `global using` declarations
pub const GLOBAL_USINGS_FILE: &str = "globalusings.cs";

/// Outcome of classifying one file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Merged like any other source file
    Source,
    /// Seeds the declaration set before other files are processed
    GlobalUsings,
    /// Not part of the merge
    Excluded,
}

/// Collector for the source files of one language
pub struct Scanner {
    /// Root directory to walk
    root: PathBuf,
    /// Language whose rules apply
    language: Language,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(root: impl Into<PathBuf>, language: Language) -> Self {
        Self {
            root: root.into(),
            language,
        }
    }

    /// Walk the root directory and return the eligible files in sorted order
    pub fn collect(&self) -> CollectedFiles {
        let mut collected = CollectedFiles::default();

        let walker = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| !is_pruned_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "skipping non-UTF-8 file name");
                continue;
            };

            match classify_file_name(self.language, name) {
                FileRole::Source => collected.files.push(entry.into_path()),
                FileRole::GlobalUsings => collected.global_usings = Some(entry.into_path()),
                FileRole::Excluded => {
                    let ext = entry.path().extension().and_then(|e| e.to_str());
                    if ext == Some(self.language.extension()) {
                        debug!(path = %entry.path().display(), "excluded source file");
                    }
                }
            }
        }

        collected
            .files
            .sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));

        debug!(
            root = %self.root.display(),
            language = %self.language,
            files = collected.files.len(),
            "collected source files"
        );

        collected
    }
}

/// Whether the walker should skip this entry and everything beneath it
fn is_pruned_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == PRUNED_DIR
}

/// Apply the per-language inclusion and exclusion rules to a file name
pub fn classify_file_name(language: Language, name: &str) -> FileRole {
    match language {
        Language::Go => {
            if name.ends_with(".go") && !name.ends_with("_test.go") && !name.starts_with("_merged")
            {
                FileRole::Source
            } else {
                FileRole::Excluded
            }
        }
        Language::CSharp => {
            if !name.ends_with(".cs") {
                return FileRole::Excluded;
            }

            let lower = name.to_lowercase();
            if name.ends_with("merged.cs")
                || lower.contains("test")
                || name.ends_with(".Designer.cs")
                || name.ends_with(".g.cs")
            {
                FileRole::Excluded
            } else if lower == GLOBAL_USINGS_FILE {
                FileRole::GlobalUsings
            } else {
                FileRole::Source
            }
        }
    }
}

/// Read a selected file; a failure aborts the merge
///
/// Content that is not valid UTF-8 is merged with replacement characters.
pub fn read_source(path: &Path) -> Result<SourceFile> {
    let bytes = fs::read(path).with_path(path)?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    Ok(SourceFile::new(path, content))
}

/// Read every file in order, stopping at the first failure
pub fn read_sources(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    paths.iter().map(|path| read_source(path)).collect()
}
