//! Integration tests for the line sort driver and the `ordtree-sort` binary.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use ordtree::driver::{sort_file, SortOptions};
use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_ordtree-sort");

fn run_bin(args: &[&str], stdin: &[u8]) -> std::process::Output {
    let mut child = Command::new(BIN)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The binary may exit before reading; a closed pipe is fine here.
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output().unwrap()
}

/// Sorting a file gives the same bytes as sorting its lines by hand.
#[test]
fn test_sort_file_matches_std_sort() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.txt");

    let mut lines: Vec<String> = (0..2000u32)
        .map(|i| format!("word-{:05}\n", (i * 7919) % 2000))
        .collect();
    fs::write(&path, lines.concat()).unwrap();

    let mut out = Vec::new();
    let options = SortOptions {
        degree: 3,
        emit: true,
    };
    let report = sort_file(&path, &mut out, &options).unwrap();

    lines.sort();
    assert_eq!(String::from_utf8(out).unwrap(), lines.concat());
    assert_eq!(report.records, 2000);
    assert!(report.height >= 2);
    assert!(report.nodes_released > 1);
}

#[test]
fn test_sort_file_missing_path() {
    let dir = tempdir().unwrap();
    let result = sort_file(dir.path().join("absent.txt"), Vec::new(), &SortOptions::default());
    assert!(matches!(result, Err(ordtree::Error::Io(_))));
}

#[test]
fn test_binary_sorts_stdin() {
    let output = run_bin(&[], b"cherry\napple\nbanana\n");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"apple\nbanana\ncherry\n");
}

#[test]
fn test_binary_reads_file_argument() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "3\n1\n2\n").unwrap();

    let output = run_bin(&["--degree", "2", path.to_str().unwrap()], b"");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"1\n2\n3\n");
}

#[test]
fn test_binary_quiet_writes_nothing() {
    let output = run_bin(&["--quiet"], b"b\na\n");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_binary_fails_with_exit_software() {
    let output = run_bin(&["--degree", "1"], b"a\n");
    assert_eq!(output.status.code(), Some(70));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid degree 1"));
}

#[test]
fn test_binary_rejects_overflowing_degree() {
    let degree = usize::MAX.to_string();
    let output = run_bin(&["--degree", &degree], b"a\n");
    assert_eq!(output.status.code(), Some(70));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("invalid degree {degree}")));
}

/// Records are raw bytes: Latin-1 and other non-UTF-8 lines sort bytewise.
#[test]
fn test_binary_sorts_latin1_bytes() {
    let output = run_bin(&["--degree", "2"], b"caf\xe9\nabc\n\xff\xfe\nok\ncafe\n");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"abc\ncafe\ncaf\xe9\nok\n\xff\xfe\n");
}
