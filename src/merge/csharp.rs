//! C# pipeline: hoisted `using` declarations and one unified namespace.

use tracing::trace;

use crate::config::Language;
use crate::error::Result;
use crate::merge::namespace::select_namespace;
use crate::merge::rewriter::CSharpRewriter;
use crate::scanner::{read_source, read_sources};
use crate::types::{CollectedFiles, DeclarationSet, FileBody, MergedDocument, SourceFile, Wrapper};
use crate::utils::{CS_GLOBAL_USING, CS_USING};

/// Read the collected files and merge them
pub fn merge(collected: &CollectedFiles) -> Result<MergedDocument> {
    let global_usings = collected
        .global_usings
        .as_deref()
        .map(read_source)
        .transpose()?;
    let files = read_sources(&collected.files)?;

    Ok(merge_sources(global_usings.as_ref(), &files))
}

/// Merge already-read sources
pub fn merge_sources(global_usings: Option<&SourceFile>, files: &[SourceFile]) -> MergedDocument {
    let mut declarations = DeclarationSet::new();

    if let Some(file) = global_usings {
        collect_global_usings(file, &mut declarations);
    }

    let namespace = select_namespace(files);

    let bodies = files
        .iter()
        .map(|file| {
            collect_usings(file, &mut declarations);
            FileBody {
                path: file.path.clone(),
                lines: CSharpRewriter::rewrite(file),
            }
        })
        .collect();

    MergedDocument {
        language: Language::CSharp,
        declarations,
        wrapper: namespace.map_or(Wrapper::None, Wrapper::Namespace),
        bodies,
    }
}

/// Seed the declaration set from the `GlobalUsings.cs` file
pub fn collect_global_usings(file: &SourceFile, declarations: &mut DeclarationSet) {
    for line in file.lines() {
        if let Some(caps) = CS_GLOBAL_USING.captures(line) {
            record(declarations, &caps[1]);
        }
    }
}

/// Collect the `using` and `global using` declarations of an ordinary file
pub fn collect_usings(file: &SourceFile, declarations: &mut DeclarationSet) {
    for line in file.lines() {
        let caps = CS_USING
            .captures(line)
            .or_else(|| CS_GLOBAL_USING.captures(line));
        if let Some(caps) = caps {
            record(declarations, &caps[1]);
        }
    }
}

fn record(declarations: &mut DeclarationSet, clause: &str) {
    if declarations.insert(clause) {
        trace!(using = clause.trim(), "collected declaration");
    }
}
