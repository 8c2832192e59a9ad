/*!
 * End-to-end tests for the merge pipelines
 */

use std::fs;
use std::io;
use std::path::Path;

use tempfile::tempdir;

use crate::config::{Args, Config, Language};
use crate::error::MergeError;
use crate::merge::{build_document, merge_directory, merge_project};
use crate::writer::marker_line;

fn write(root: &Path, rel: &str, content: &str) -> io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

fn marker(root: &Path, rel: &str) -> String {
    marker_line(&root.join(rel))
}

// Test identical output for repeated runs over the same tree
#[test]
fn test_repeated_runs_are_identical() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write(root, "b/util.go", "package main\n\nfunc util() {}\n")?;
    write(root, "a.go", "package main\n\nimport \"fmt\"\n\nfunc main() { fmt.Println() }\n")?;
    write(root, "c/zz.go", "package main\n")?;

    let first = merge_directory(root, Language::Go)?;
    let second = merge_directory(root, Language::Go)?;
    assert_eq!(first, second);

    let a = first.find(&marker(root, "a.go")).unwrap();
    let b = first.find(&marker(root, "b/util.go")).unwrap();
    let c = first.find(&marker(root, "c/zz.go")).unwrap();
    assert!(a < b && b < c);

    Ok(())
}

// Test that a shared using appears once in the declaration block
#[test]
fn test_using_declarations_deduplicated() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    for name in ["A.cs", "B.cs", "C.cs"] {
        write(root, name, "using System;\nusing System.Collections.Generic;\n\nclass X {}\n")?;
    }

    let merged = merge_directory(root, Language::CSharp)?;
    assert_eq!(merged.matches("using System;").count(), 1);
    assert_eq!(merged.matches("using System.Collections.Generic;").count(), 1);
    assert!(merged.starts_with("using System.Collections.Generic;\nusing System;\n\n"));

    Ok(())
}

// Test excluded names and pruned directories never reach the output
#[test]
fn test_excluded_files_are_not_merged() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write(root, "Program.cs", "class Program {}\n")?;
    write(root, "Foo.Designer.cs", "class Designer {}\n")?;
    write(root, "FooTest.cs", "class FooTest {}\n")?;
    write(root, "Client.g.cs", "class Generated {}\n")?;
    write(root, "project_merged.cs", "class Merged {}\n")?;
    write(root, "obj/Debug/Assembly.cs", "class Artifact {}\n")?;

    let document = build_document(root, Language::CSharp)?;
    assert_eq!(document.bodies.len(), 1);
    assert_eq!(document.bodies[0].path, root.join("Program.cs"));

    write(root, "main.go", "package main\n")?;
    write(root, "main_test.go", "package main\n\nfunc TestX() {}\n")?;
    write(root, "_merged_anything.go", "package main\n\nfunc Merged() {}\n")?;
    write(root, "obj/gen.go", "package main\n\nfunc Gen() {}\n")?;

    let merged = merge_directory(root, Language::Go)?;
    assert!(merged.contains(&marker(root, "main.go")));
    assert!(!merged.contains("TestX"));
    assert!(!merged.contains("Merged()"));
    assert!(!merged.contains("Gen()"));

    Ok(())
}

// Test the entry point file decides the namespace regardless of sort order
#[test]
fn test_namespace_follows_entry_point() -> crate::Result<()> {
    for program in ["0Program.cs", "ZProgram.cs"] {
        let dir = tempdir()?;
        let root = dir.path();
        write(root, "Alpha.cs", "namespace A\n{\n    class Alpha {}\n}\n")?;
        write(root, "Beta.cs", "namespace A\n{\n    class Beta {}\n}\n")?;
        write(
            root,
            program,
            "namespace B\n{\n    class Program\n    {\n        static void Main(string[] args) {}\n    }\n}\n",
        )?;

        let merged = merge_directory(root, Language::CSharp)?;
        assert!(merged.starts_with("namespace B\n{\n"), "{program}: {merged}");
        assert!(!merged.contains("namespace A"));
        assert!(merged.ends_with("\n}"));
    }

    Ok(())
}

// Test the exact output for a single file-scoped namespace file
#[test]
fn test_file_scoped_namespace_output() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write(root, "Program.cs", "namespace N;\nclass A {}\nclass B {}")?;

    let merged = merge_directory(root, Language::CSharp)?;
    let expected = format!(
        "namespace N;\n\n{}\nclass A {{}}\nclass B {{}}",
        marker(root, "Program.cs")
    );
    assert_eq!(merged, expected);
    assert_eq!(merged.matches("namespace").count(), 1);

    Ok(())
}

// Test stripping then re-wrapping keeps the original indentation
#[test]
fn test_block_namespace_indentation_round_trip() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let class_block = "    public class Foo\n    {\n        public void Bar() { }\n    }\n";
    write(
        root,
        "Foo.cs",
        &format!("using System;\n\nnamespace App\n{{\n{}}}\n", class_block),
    )?;

    let merged = merge_directory(root, Language::CSharp)?;
    let expected = format!(
        "using System;\n\nnamespace App\n{{\n    {}\n\n{}\n}}",
        marker(root, "Foo.cs"),
        class_block
    );
    assert_eq!(merged, expected);
    assert!(merged.contains(class_block));

    Ok(())
}

// Test Go files collapse into one package clause and one import block
#[test]
fn test_go_package_collapse() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write(root, "a.go", "package main\n\nimport \"fmt\"\n\nfunc A() { fmt.Println() }\n")?;
    write(root, "b.go", "package main\n\nimport \"os\"\n\nfunc B() { os.Exit(0) }\n")?;

    let merged = merge_directory(root, Language::Go)?;
    assert_eq!(merged.lines().filter(|l| *l == "package main").count(), 1);
    assert_eq!(merged.matches("\t\"fmt\"").count(), 1);
    assert_eq!(merged.matches("\t\"os\"").count(), 1);
    assert!(merged.starts_with("package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n"));
    assert_eq!(merged.matches("import").count(), 1);

    Ok(())
}

// Test global usings seed declarations and are rendered as plain usings
#[test]
fn test_global_usings_file() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write(root, "GlobalUsings.cs", "global using System.Text;\nglobal using System;\n")?;
    write(root, "Program.cs", "using System;\n\nclass Program {}\n")?;

    let document = build_document(root, Language::CSharp)?;
    assert_eq!(document.bodies.len(), 1);

    let merged = merge_directory(root, Language::CSharp)?;
    assert!(merged.starts_with("using System.Text;\nusing System;\n\n"));
    assert!(!merged.contains("global using"));
    assert!(!merged.contains(&marker(root, "GlobalUsings.cs")));

    Ok(())
}

// Test a file that cannot be read aborts the whole merge
#[cfg(unix)]
#[test]
fn test_unreadable_file_aborts() -> io::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write(root, "a.go", "package main\n")?;
    // Collected by name, but reading follows the link to nothing
    std::os::unix::fs::symlink(root.join("missing.go.bak"), root.join("b.go"))?;

    match merge_directory(root, Language::Go) {
        Err(MergeError::Read { path, source }) => {
            assert_eq!(path, root.join("b.go"));
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected read error, got {other:?}"),
    }

    Ok(())
}

// Test files in a legacy encoding are merged rather than rejected
#[test]
fn test_non_utf8_file_is_merged() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    fs::write(root.join("Program.cs"), b"using System;\n// caf\xe9\nclass Program {}\n")?;

    let merged = merge_directory(root, Language::CSharp)?;
    assert!(merged.starts_with("using System;\n\n"));
    assert!(merged.contains("// caf\u{fffd}\nclass Program {}"));

    Ok(())
}

// Test byte-order marks do not hide first-line declarations
#[test]
fn test_byte_order_mark_files() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write(root, "A.cs", "\u{feff}using System;\nnamespace App;\n\nclass A {}\n")?;
    write(root, "B.cs", "\u{feff}namespace App;\n\nclass B {}\n")?;

    let document = build_document(root, Language::CSharp)?;
    assert_eq!(document.stats().namespace.as_deref(), Some("App"));

    let merged = merge_directory(root, Language::CSharp)?;
    assert!(merged.starts_with("using System;\n\nnamespace App;\n\n"));
    assert!(!merged.contains('\u{feff}'));
    assert_eq!(merged.matches("using System;").count(), 1);
    assert_eq!(merged.matches("namespace App;").count(), 1);

    Ok(())
}

// Test an empty tree still yields a package clause
#[test]
fn test_empty_go_tree() -> io::Result<()> {
    let dir = tempdir()?;
    let merged = merge_directory(dir.path(), Language::Go).unwrap();
    assert_eq!(merged, "package main\n");
    Ok(())
}

// Test configuration drives the merge
#[test]
fn test_merge_project_from_args() -> crate::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write(root, "Program.cs", "namespace App;\nclass Program {}\n")?;

    let args = Args {
        dir: root.to_string_lossy().to_string(),
        lang: "csharp".to_string(),
        clipboard: false,
        verbose: 0,
        generate: None,
    };
    let config = Config::from_args(args)?;
    config.validate()?;

    let merged = merge_project(&config)?;
    assert!(merged.starts_with("namespace App;\n\n"));

    Ok(())
}
