/*!
 * Merge pipelines: collect, extract, rewrite and assemble
 */

pub mod csharp;
pub mod golang;
pub mod namespace;
pub mod rewriter;

use std::path::Path;

use tracing::info;

use crate::config::{Config, Language};
use crate::error::Result;
use crate::scanner::Scanner;
use crate::types::MergedDocument;
use crate::writer::DocumentWriter;

/// Merge the project described by the configuration into one text
pub fn merge_project(config: &Config) -> Result<String> {
    merge_directory(&config.target_dir, config.language)
}

/// Merge every eligible source file under `root`
pub fn merge_directory(root: &Path, language: Language) -> Result<String> {
    let document = build_document(root, language)?;
    Ok(DocumentWriter::new().render(&document))
}

/// Run the pipeline up to, but not including, assembly
pub fn build_document(root: &Path, language: Language) -> Result<MergedDocument> {
    let collected = Scanner::new(root, language).collect();

    let document = match language {
        Language::Go => golang::merge(&collected)?,
        Language::CSharp => csharp::merge(&collected)?,
    };

    let stats = document.stats();
    info!(
        language = %language,
        files = stats.files_merged,
        declarations = stats.declarations,
        namespace = stats.namespace.as_deref().unwrap_or("<none>"),
        "merged project"
    );

    Ok(document)
}
