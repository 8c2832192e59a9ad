//! Go pipeline: one `package` clause and one consolidated import block.

use tracing::trace;

use crate::config::Language;
use crate::error::Result;
use crate::scanner::read_sources;
use crate::types::{CollectedFiles, DeclarationSet, FileBody, MergedDocument, SourceFile, Wrapper};
use crate::utils::{GO_IMPORT_BLOCK_OPEN, GO_IMPORT_SINGLE, GO_PACKAGE};

/// Package used when no file declares one
pub const DEFAULT_PACKAGE: &str = "main";

/// A classified line or group of lines of a Go file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoLine<'a> {
    /// `package name`
    Package(&'a str),
    /// A single import or a whole `import ( ... )` block
    Imports(Vec<String>),
    /// Anything else, kept verbatim
    Content(&'a str),
}

/// Classify the lines of a Go file
///
/// Grouped import entries keep only their first token, so aliased imports
/// come out as the alias rather than the path.
pub fn classify_lines<'a>(lines: &[&'a str]) -> Vec<GoLine<'a>> {
    let mut classified = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if let Some(caps) = GO_PACKAGE.captures(line) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            classified.push(GoLine::Package(name));
            continue;
        }

        if GO_IMPORT_BLOCK_OPEN.is_match(line) {
            let mut imports = Vec::new();
            while i < lines.len() && !lines[i].trim_start().starts_with(')') {
                if let Some(import) = block_entry(lines[i]) {
                    imports.push(import);
                }
                i += 1;
            }
            // skip the closing paren
            i += 1;
            classified.push(GoLine::Imports(imports));
            continue;
        }

        if let Some(caps) = GO_IMPORT_SINGLE.captures(line) {
            classified.push(GoLine::Imports(vec![caps[1].to_string()]));
            continue;
        }

        classified.push(GoLine::Content(line));
    }

    classified
}

fn block_entry(line: &str) -> Option<String> {
    let entry = line.trim();
    if entry.is_empty() || entry.starts_with("//") {
        return None;
    }
    let token = entry.split_whitespace().next()?.trim_matches('"');
    (!token.is_empty()).then(|| token.to_string())
}

/// Read the collected files and merge them
pub fn merge(collected: &CollectedFiles) -> Result<MergedDocument> {
    let files = read_sources(&collected.files)?;
    Ok(merge_sources(&files))
}

/// Merge already-read sources
pub fn merge_sources(files: &[SourceFile]) -> MergedDocument {
    let mut declarations = DeclarationSet::new();
    let mut package: Option<String> = None;
    let mut bodies = Vec::with_capacity(files.len());

    for file in files {
        let lines = file.lines();
        let mut body = Vec::new();

        for item in classify_lines(&lines) {
            match item {
                GoLine::Package(name) => {
                    if package.is_none() {
                        package = Some(name.to_string());
                    }
                }
                GoLine::Imports(imports) => {
                    for import in imports {
                        if declarations.insert(&import) {
                            trace!(import = %import, "collected declaration");
                        }
                    }
                }
                GoLine::Content(line) => body.push(line.to_string()),
            }
        }

        bodies.push(FileBody {
            path: file.path.clone(),
            lines: body,
        });
    }

    MergedDocument {
        language: Language::Go,
        declarations,
        wrapper: Wrapper::Package(package.unwrap_or_else(|| DEFAULT_PACKAGE.to_string())),
        bodies,
    }
}
