//! Global error handling for codemerge
//!
//! This module provides a centralized error type that can represent errors
//! from every stage of the merge pipeline.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for codemerge operations
#[derive(Error, Debug)]
pub enum MergeError {
    /// A selected source file could not be read
    #[error("error reading {}: {}", .path.display(), .source)]
    Read {
        /// Path of the file that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Language selector outside the supported set
    #[error("Unsupported language: {0} (supported: go, csharp)")]
    UnsupportedLanguage(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

/// Specialized Result type for codemerge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Creates a MergeError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::MergeError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Extension trait for attaching the offending path to IO errors
pub trait ResultExt<T> {
    /// Turn an IO error into a [`MergeError::Read`] for `path`
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> ResultExt<T> for io::Result<T> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| MergeError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}
