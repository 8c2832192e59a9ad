/*!
 * codemerge - Merge the source files of a project into one file
 *
 * This library concatenates every source file of a single-language Go or C#
 * project into one text, hoisting and deduplicating imports and unifying the
 * package or namespace, for use as context for Large Language Models.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod merge;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{Config, Language};
pub use error::{MergeError, Result};
pub use merge::{merge_directory, merge_project};
pub use scanner::Scanner;
pub use types::{CollectedFiles, DeclarationSet, MergedDocument, NamespaceIdentity, SourceFile};
pub use writer::DocumentWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
