/*!
 * Text writer assembling the merged document
 */

use std::path::Path;

use crate::config::Language;
use crate::types::{FileBody, MergedDocument, NamespaceForm, Wrapper};
use crate::utils::INDENT_UNIT;

/// Assembles a [`MergedDocument`] into its final text
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    /// Indentation added to bodies inside a block namespace
    indent: String,
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self {
            indent: INDENT_UNIT.to_string(),
        }
    }

    /// Render the document as newline-joined text
    pub fn render(&self, document: &MergedDocument) -> String {
        self.render_lines(document).join("\n")
    }

    /// Render the document as lines
    pub fn render_lines(&self, document: &MergedDocument) -> Vec<String> {
        let mut output = Vec::new();

        match &document.wrapper {
            Wrapper::Package(name) => {
                output.push(format!("package {}", name));
                output.push(String::new());
                self.write_declarations(document, &mut output);
                self.write_bodies(&document.bodies, &mut output);
            }
            Wrapper::Namespace(namespace) => {
                self.write_declarations(document, &mut output);
                match namespace.form {
                    NamespaceForm::FileScoped => {
                        output.push(format!("namespace {};", namespace.name));
                        output.push(String::new());
                        self.write_bodies(&document.bodies, &mut output);
                    }
                    NamespaceForm::Block => {
                        output.push(format!("namespace {}", namespace.name));
                        output.push("{".to_string());
                        let mut inner = Vec::new();
                        self.write_bodies(&document.bodies, &mut inner);
                        output.extend(inner.into_iter().map(|line| self.indent_line(line)));
                        output.push("}".to_string());
                    }
                }
            }
            Wrapper::None => {
                self.write_declarations(document, &mut output);
                self.write_bodies(&document.bodies, &mut output);
            }
        }

        output
    }

    /// Write the sorted declaration block followed by a blank line
    fn write_declarations(&self, document: &MergedDocument, output: &mut Vec<String>) {
        if document.declarations.is_empty() {
            return;
        }

        match document.language {
            Language::CSharp => {
                let mut usings: Vec<String> = document
                    .declarations
                    .iter()
                    .map(|clause| format!("using {};", clause))
                    .collect();
                usings.sort();
                output.extend(usings);
            }
            Language::Go => {
                let mut imports: Vec<&str> = document.declarations.iter().collect();
                imports.sort_unstable();
                output.push("import (".to_string());
                output.extend(imports.into_iter().map(|path| format!("\t\"{}\"", path)));
                output.push(")".to_string());
            }
        }

        output.push(String::new());
    }

    /// Write each body preceded by its marker line
    fn write_bodies(&self, bodies: &[FileBody], output: &mut Vec<String>) {
        for body in bodies {
            output.push(marker_line(&body.path));
            output.extend(body.lines.iter().cloned());
        }
    }

    fn indent_line(&self, line: String) -> String {
        if line.is_empty() {
            line
        } else {
            format!("{}{}", self.indent, line)
        }
    }
}

/// The comment line naming the file a body came from
pub fn marker_line(path: &Path) -> String {
    format!("// --- {} ---", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclarationSet, NamespaceIdentity};
    use std::path::PathBuf;

    fn body(path: &str, lines: &[&str]) -> FileBody {
        FileBody {
            path: PathBuf::from(path),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn declarations(items: &[&str]) -> DeclarationSet {
        let mut set = DeclarationSet::new();
        for item in items {
            set.insert(item);
        }
        set
    }

    #[test]
    fn test_csharp_without_namespace() {
        let doc = MergedDocument {
            language: Language::CSharp,
            declarations: declarations(&["System.Linq", "System"]),
            wrapper: Wrapper::None,
            bodies: vec![body("A.cs", &["class A {}"])],
        };

        assert_eq!(
            DocumentWriter::new().render(&doc),
            "using System.Linq;\nusing System;\n\n// --- A.cs ---\nclass A {}"
        );
    }

    #[test]
    fn test_block_namespace_indents_non_blank_lines() {
        let doc = MergedDocument {
            language: Language::CSharp,
            declarations: DeclarationSet::new(),
            wrapper: Wrapper::Namespace(NamespaceIdentity {
                name: "App".to_string(),
                form: NamespaceForm::Block,
            }),
            bodies: vec![body("A.cs", &["class A", "{", "", "}"])],
        };

        assert_eq!(
            DocumentWriter::new().render_lines(&doc),
            vec![
                "namespace App",
                "{",
                "    // --- A.cs ---",
                "    class A",
                "    {",
                "",
                "    }",
                "}",
            ]
        );
    }

    #[test]
    fn test_file_scoped_namespace() {
        let doc = MergedDocument {
            language: Language::CSharp,
            declarations: declarations(&["System"]),
            wrapper: Wrapper::Namespace(NamespaceIdentity {
                name: "App".to_string(),
                form: NamespaceForm::FileScoped,
            }),
            bodies: vec![body("A.cs", &["class A {}"])],
        };

        assert_eq!(
            DocumentWriter::new().render(&doc),
            "using System;\n\nnamespace App;\n\n// --- A.cs ---\nclass A {}"
        );
    }

    #[test]
    fn test_go_package_and_import_block() {
        let doc = MergedDocument {
            language: Language::Go,
            declarations: declarations(&["os", "fmt"]),
            wrapper: Wrapper::Package("main".to_string()),
            bodies: vec![body("a.go", &["func main() {}"])],
        };

        assert_eq!(
            DocumentWriter::new().render(&doc),
            "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\n// --- a.go ---\nfunc main() {}"
        );
    }

    #[test]
    fn test_go_without_imports_omits_block() {
        let doc = MergedDocument {
            language: Language::Go,
            declarations: DeclarationSet::new(),
            wrapper: Wrapper::Package("main".to_string()),
            bodies: vec![body("a.go", &["func main() {}"])],
        };

        let text = DocumentWriter::new().render(&doc);
        assert!(!text.contains("import"));
        assert_eq!(text, "package main\n\n// --- a.go ---\nfunc main() {}");
    }
}
