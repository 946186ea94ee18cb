//! The `arbora` binary: output and exit status of the `count` subcommand.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn arbora(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_arbora"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run arbora")
}

fn stderr_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::to_string)
        .collect()
}

fn write_words(dir: &Path) -> String {
    let path = dir.join("words.txt");
    fs::write(&path, "dados livro dados texto").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn count_with_known_structure_succeeds() {
    let dir = tempdir().unwrap();
    let file = write_words(dir.path());
    let output = arbora(&["count", &file, "--structure", "avl", "--top", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AVL Tree: 4 words, 3 distinct"), "{}", stdout);
    assert!(stdout.contains("dados"));
}

#[test]
fn unknown_structure_exits_with_failure() {
    let dir = tempdir().unwrap();
    let file = write_words(dir.path());
    let output = arbora(&["count", &file, "--structure", "splay"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let lines = stderr_lines(&output);
    assert!(
        lines.iter().any(|l| l == "error: Unknown structure: 'splay'"),
        "{:?}",
        lines
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_exits_with_failure() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    let output = arbora(&["count", &missing.to_string_lossy()]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let lines = stderr_lines(&output);
    assert!(lines.iter().any(|l| l.starts_with("error: ")), "{:?}", lines);
}
