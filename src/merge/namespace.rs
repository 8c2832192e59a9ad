//! Choosing the single namespace a merged C# document is wrapped in.
//!
//! Selection runs two independent scans over the same sorted file list:
//! first the namespace of the earliest file that also holds the program
//! entry point, then, failing that, the earliest namespace declared at all.

use tracing::debug;

use crate::types::{NamespaceForm, NamespaceIdentity, SourceFile};
use crate::utils::{CS_ENTRY_POINT, CS_FILE_SCOPED_NAMESPACE, CS_NAMESPACE};

/// Classify a single line as a namespace declaration
pub fn parse_namespace_line(line: &str) -> Option<NamespaceIdentity> {
    if let Some(caps) = CS_FILE_SCOPED_NAMESPACE.captures(line) {
        return Some(NamespaceIdentity {
            name: caps[1].to_string(),
            form: NamespaceForm::FileScoped,
        });
    }

    CS_NAMESPACE.captures(line).map(|caps| NamespaceIdentity {
        name: caps[1].to_string(),
        form: NamespaceForm::Block,
    })
}

/// The first namespace a file declares
pub fn declared_namespace(file: &SourceFile) -> Option<NamespaceIdentity> {
    file.lines().into_iter().find_map(parse_namespace_line)
}

/// Whether the file contains a `Main` entry point signature
pub fn has_entry_point(file: &SourceFile) -> bool {
    CS_ENTRY_POINT.is_match(&file.content)
}

/// Namespace of the first file that declares one and contains the entry point
pub fn find_entry_point_namespace(files: &[SourceFile]) -> Option<NamespaceIdentity> {
    files
        .iter()
        .filter(|file| has_entry_point(file))
        .find_map(declared_namespace)
}

/// Namespace of the first file that declares any namespace
pub fn find_first_namespace(files: &[SourceFile]) -> Option<NamespaceIdentity> {
    files.iter().find_map(declared_namespace)
}

/// Pick the namespace for the merged output, if any file declares one
pub fn select_namespace(files: &[SourceFile]) -> Option<NamespaceIdentity> {
    if let Some(namespace) = find_entry_point_namespace(files) {
        debug!(namespace = %namespace.name, "namespace chosen from entry point file");
        return Some(namespace);
    }

    let namespace = find_first_namespace(files);
    match &namespace {
        Some(ns) => debug!(namespace = %ns.name, "namespace chosen from first declaration"),
        None => debug!("no namespace declared"),
    }
    namespace
}
