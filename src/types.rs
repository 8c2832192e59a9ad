/*!
 * Core types and data structures for the codemerge pipeline
 */

use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::Language;
use crate::utils::split_lines;

/// Byte-order mark some editors write at the start of a file
const BYTE_ORDER_MARK: char = '\u{feff}';

/// A source file read once from disk
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as produced by the traversal; also the marker text
    pub path: PathBuf,
    /// File content without a leading byte-order mark
    pub content: String,
}

impl SourceFile {
    /// Create a source file from a path and its content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let mut content = content.into();
        if content.starts_with(BYTE_ORDER_MARK) {
            content.drain(..BYTE_ORDER_MARK.len_utf8());
        }

        Self {
            path: path.into(),
            content,
        }
    }

    /// Content split into lines, with any trailing `\r` removed
    pub fn lines(&self) -> Vec<&str> {
        split_lines(&self.content)
    }
}

/// Result of walking a project tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedFiles {
    /// Eligible source files, sorted by path string
    pub files: Vec<PathBuf>,
    /// The diverted `GlobalUsings.cs` file, if one was found
    pub global_usings: Option<PathBuf>,
}

/// Deduplicated declarations (import paths or using clauses)
///
/// Keeps first-seen order; [`DeclarationSet::sorted`] gives the output order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl DeclarationSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration; blank and already-present values are ignored.
    /// Returns true if the declaration was new.
    pub fn insert(&mut self, declaration: &str) -> bool {
        let declaration = declaration.trim();
        if declaration.is_empty() || self.seen.contains(declaration) {
            return false;
        }
        self.seen.insert(declaration.to_string());
        self.ordered.push(declaration.to_string());
        true
    }

    /// Whether the declaration has already been collected
    pub fn contains(&self, declaration: &str) -> bool {
        self.seen.contains(declaration.trim())
    }

    /// Declarations in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    /// Number of distinct declarations
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether no declaration has been collected
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Syntax variant of a C# namespace declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceForm {
    /// `namespace X;` covering the whole file
    FileScoped,
    /// `namespace X { ... }`
    Block,
}

/// The namespace chosen for a merged C# document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceIdentity {
    /// Namespace name as declared
    pub name: String,
    /// Which wrapper syntax to emit
    pub form: NamespaceForm,
}

impl NamespaceIdentity {
    /// Whether the namespace is rendered as `namespace X;`
    pub fn is_file_scoped(&self) -> bool {
        self.form == NamespaceForm::FileScoped
    }
}

/// Wrapper emitted between the declarations and the file bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wrapper {
    /// Bodies emitted as-is
    None,
    /// A C# namespace
    Namespace(NamespaceIdentity),
    /// A Go package clause
    Package(String),
}

/// One rewritten file, ready for assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBody {
    /// Source path written into the marker line
    pub path: PathBuf,
    /// Rewritten body lines
    pub lines: Vec<String>,
}

/// Summary of a merge run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of file bodies in the document
    pub files_merged: usize,
    /// Number of distinct declarations hoisted
    pub declarations: usize,
    /// Namespace or package the bodies were wrapped in
    pub namespace: Option<String>,
}

/// Everything the assembler needs to produce the final text
#[derive(Debug, Clone)]
pub struct MergedDocument {
    /// Language the document was merged as
    pub language: Language,
    /// Hoisted declarations
    pub declarations: DeclarationSet,
    /// Namespace or package wrapper
    pub wrapper: Wrapper,
    /// Rewritten bodies in collector order
    pub bodies: Vec<FileBody>,
}

impl MergedDocument {
    /// Summary numbers for logging
    pub fn stats(&self) -> MergeStats {
        MergeStats {
            files_merged: self.bodies.len(),
            declarations: self.declarations.len(),
            namespace: match &self.wrapper {
                Wrapper::Namespace(namespace) => Some(namespace.name.clone()),
                Wrapper::Package(name) => Some(name.clone()),
                Wrapper::None => None,
            },
        }
    }
}
