/*!
 * Line classification patterns and text helpers shared by the merge pipelines
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// One level of indentation in the rendered output
pub const INDENT_UNIT: &str = "    ";

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in pattern must compile")
}

/// `using X;`, `using static X;` and `using Alias = X;`
///
/// Statement forms such as `using var x = ...;` and `using (...)` do not match.
pub static CS_USING: Lazy<Regex> = Lazy::new(|| {
    pattern(r"^\s*using\s+((?:static\s+)?[A-Za-z_@][\w.:@]*(?:\s*=\s*[^;]+)?)\s*;")
});

/// `global using X;`
pub static CS_GLOBAL_USING: Lazy<Regex> = Lazy::new(|| {
    pattern(r"^\s*global\s+using\s+((?:static\s+)?[A-Za-z_@][\w.:@]*(?:\s*=\s*[^;]+)?)\s*;")
});

/// Any namespace declaration; captures the name
pub static CS_NAMESPACE: Lazy<Regex> = Lazy::new(|| pattern(r"^\s*namespace\s+([^\s{;]+)"));

/// `namespace X;` as the whole statement
pub static CS_FILE_SCOPED_NAMESPACE: Lazy<Regex> =
    Lazy::new(|| pattern(r"^\s*namespace\s+([^\s{;]+)\s*;\s*$"));

/// Program entry point method signature
pub static CS_ENTRY_POINT: Lazy<Regex> = Lazy::new(|| {
    pattern(r"\bstatic\s+(?:async\s+)?(?:void|int|Task(?:\s*<\s*int\s*>)?)\s+Main\s*\(")
});

/// `package name`
pub static GO_PACKAGE: Lazy<Regex> = Lazy::new(|| pattern(r"^\s*package\s+(\w+)"));

/// `import "path"`
pub static GO_IMPORT_SINGLE: Lazy<Regex> = Lazy::new(|| pattern(r#"^\s*import\s+"([^"]+)""#));

/// `import (` opening a grouped import block
pub static GO_IMPORT_BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| pattern(r"^\s*import\s*\(\s*(?://.*)?$"));

/// Split text into lines on `\n`, dropping a trailing `\r` from each line.
///
/// A trailing newline yields a final empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// The leading spaces and tabs of a line
pub fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Remove one indentation level below `base`, if the line has exactly that prefix
pub fn strip_indent<'a>(line: &'a str, base: &str) -> &'a str {
    line.strip_prefix(base)
        .and_then(|rest| {
            rest.strip_prefix(INDENT_UNIT)
                .or_else(|| rest.strip_prefix('\t'))
        })
        .unwrap_or(line)
}

/// Brace structure of one line of C-family code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceScan {
    /// `{` outside literals and comments
    pub opens: usize,
    /// `}` outside literals and comments
    pub closes: usize,
    /// Byte offset where a `//` comment starts, or the line length
    pub code_end: usize,
}

impl BraceScan {
    /// Net change in nesting depth
    pub fn delta(&self) -> isize {
        self.opens as isize - self.closes as isize
    }
}

/// Count braces on a line, skipping string and char literals and comments.
///
/// A `/*` comment ends at its `*/` or at the end of the line; block comments
/// are not tracked across lines.
pub fn scan_braces(line: &str) -> BraceScan {
    let bytes = line.as_bytes();
    let mut scan = BraceScan {
        code_end: line.len(),
        ..BraceScan::default()
    };
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                scan.code_end = i;
                break;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                // land on the closing '/'
                i += 1;
            }
            b'@' if bytes.get(i + 1) == Some(&b'"') => {
                // verbatim string: "" is an escaped quote
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == b'"' {
                        if bytes.get(i + 1) == Some(&b'"') {
                            i += 2;
                            continue;
                        }
                        break;
                    }
                    i += 1;
                }
            }
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'{' => scan.opens += 1,
            b'}' => scan.closes += 1,
            _ => {}
        }
        i += 1;
    }

    scan
}

/// The code portion of a line with any `//` comment and surrounding whitespace removed
pub fn code_text(line: &str) -> &str {
    line[..scan_braces(line).code_end].trim()
}
