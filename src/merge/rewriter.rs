//! Per-file body rewriting for C# sources.
//!
//! Declarations and namespace wrappers are removed; content that sat inside
//! a block namespace loses one indentation level so that re-wrapping it in
//! the merged namespace restores its original depth.

use crate::types::SourceFile;
use crate::utils::{
    code_text, leading_whitespace, scan_braces, strip_indent, CS_FILE_SCOPED_NAMESPACE,
    CS_GLOBAL_USING, CS_NAMESPACE, CS_USING,
};

/// Where the rewriter is relative to a block namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Top level of the file
    Outside,
    /// Saw `namespace X`, waiting for its `{`
    AwaitingOpen,
    /// Inside the namespace block at the given brace depth (1 = namespace level)
    Inside(usize),
}

/// Rewrites the lines of one C# file
#[derive(Debug)]
pub struct CSharpRewriter {
    scope: Scope,
    /// Leading whitespace of the namespace declaration line
    namespace_indent: String,
    output: Vec<String>,
}

impl Default for CSharpRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CSharpRewriter {
    pub fn new() -> Self {
        Self {
            scope: Scope::Outside,
            namespace_indent: String::new(),
            output: Vec::new(),
        }
    }

    /// Rewrite a whole file
    pub fn rewrite(file: &SourceFile) -> Vec<String> {
        let mut rewriter = Self::new();
        for line in file.lines() {
            rewriter.push_line(line);
        }
        rewriter.finish()
    }

    /// Feed the next line of the file
    pub fn push_line(&mut self, line: &str) {
        if CS_USING.is_match(line) || CS_GLOBAL_USING.is_match(line) {
            return;
        }

        if CS_FILE_SCOPED_NAMESPACE.is_match(line) {
            return;
        }

        if CS_NAMESPACE.is_match(line) {
            self.enter_namespace(line);
            return;
        }

        match self.scope {
            Scope::Outside => self.output.push(line.to_string()),
            Scope::AwaitingOpen => {
                if code_text(line) == "{" {
                    self.scope = Scope::Inside(1);
                } else {
                    self.emit_stripped(line);
                }
            }
            Scope::Inside(depth) => {
                if depth == 1 && code_text(line) == "}" {
                    self.scope = Scope::Outside;
                    return;
                }

                let depth = depth as isize + scan_braces(line).delta();
                self.emit_stripped(line);
                self.scope = if depth > 0 {
                    Scope::Inside(depth as usize)
                } else {
                    Scope::Outside
                };
            }
        }
    }

    /// The rewritten body
    pub fn finish(self) -> Vec<String> {
        self.output
    }

    fn enter_namespace(&mut self, line: &str) {
        self.namespace_indent = leading_whitespace(line).to_string();

        let scan = scan_braces(line);
        self.scope = if scan.opens == 0 {
            Scope::AwaitingOpen
        } else if scan.delta() > 0 {
            Scope::Inside(scan.delta() as usize)
        } else {
            // `namespace X { }` on a single line
            Scope::Outside
        };
    }

    fn emit_stripped(&mut self, line: &str) {
        let stripped = strip_indent(line, &self.namespace_indent);
        self.output.push(stripped.to_string());
    }
}
