// End-to-end tests: library pipeline and the bftape binary

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::{TempDir, tempdir};

use bftape::{Halt, Limits, Program, ValidationError, execute, validate};

const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

/// Source file inside a directory that is removed when the guard drops.
fn write_source(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("program.bf");
    std::fs::write(&path, contents).expect("write source");
    (dir, path)
}

fn bftape() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bftape"))
}

#[test]
fn test_hello_world_with_layout() {
    // Same program spread over lines with indentation.
    let source = HELLO_WORLD
        .replace("[", "\n[\n  ")
        .replace("]", "\n]\n");
    let program = validate(&source).expect("validation failed");
    assert_eq!(program.to_string(), HELLO_WORLD);
    assert_eq!(execute(&program).expect("execution failed"), b"Hello World!\n");
}

#[test]
fn test_comment_text_is_rejected() {
    let result = validate("+++ print a byte .");
    assert_eq!(
        result,
        Err(ValidationError::InvalidSymbol { position: 4, symbol: 'p' })
    );
}

#[test]
fn test_bounded_infinite_loop() {
    let program: Program = "+[]".parse().expect("validation failed");
    let outcome = bftape::Executor::new(&program)
        .run(&mut std::io::empty(), &mut std::io::sink(), &Limits::steps(50_000))
        .expect("execution failed");
    assert_eq!(outcome.halt, Halt::StepLimit);
}

#[test]
fn test_cli_hello_world() {
    let (_dir, path) = write_source(HELLO_WORLD);
    let output = bftape().arg(&path).output().expect("spawn bftape");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(output.stdout, b"Hello World!\n");
}

#[test]
fn test_cli_reads_stdin() {
    let (_dir, path) = write_source(",[.,]");
    let mut child = bftape()
        .arg(&path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn bftape");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"abc\0")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait bftape");

    assert!(output.status.success());
    assert_eq!(output.stdout, b"abc");
}

#[test]
fn test_cli_validation_error() {
    let (_dir, path) = write_source("[[]");
    let output = bftape().arg(&path).output().expect("spawn bftape");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 unmatched loop-open(s) in program"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_source_size_limit() {
    let (_dir, path) = write_source("++++++++");
    let output = bftape().arg(&path).arg("4").output().expect("spawn bftape");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the source size limit of 4 bytes"), "stderr: {stderr}");
}

#[test]
fn test_cli_step_limit() {
    let (_dir, path) = write_source("+[]");
    let output = bftape()
        .arg(&path)
        .args(["--step-limit", "1000"])
        .output()
        .expect("spawn bftape");

    assert_eq!(output.status.code(), Some(2));
}
