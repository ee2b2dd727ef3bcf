//! End-to-end tests for the cetem binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
<ext n=1 sec=pol sem=1>
<t>
Política\tpol\t1\tpolítica\tNC
</t>
<p par=a1>
<s>
casa\tpol\t1\tcasa\tNCMS
</s>
</p>
</ext>
";

fn corpus_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file
}

fn cetem() -> Command {
    Command::cargo_bin("cetem").unwrap()
}

#[test]
fn test_process_tokens_text() {
    let file = corpus_file();
    cetem()
        .args(["process", "-q", "-g", "token", "-i"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("casa\tpol\t1\tcasa\tNCMS"))
        .stdout(predicate::str::contains("Política"));
}

#[test]
fn test_process_extract_text_roundtrips_markup() {
    let file = corpus_file();
    cetem()
        .args(["process", "-q", "-g", "extract", "-i"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<ext n=1 sec=pol sem=1>"))
        .stdout(predicate::str::contains("</ext>"));
}

#[test]
fn test_process_json_output() {
    let file = corpus_file();
    cetem()
        .args(["process", "-q", "-g", "sentence", "-f", "json", "-i"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"type\":\"sentence\""))
        .stdout(predicate::str::contains("\"word\":\"casa\""));
}

#[test]
fn test_process_reads_stdin() {
    cetem()
        .args(["process", "-q", "-g", "line", "-i", "-"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("<p par=a1>"));
}

#[test]
fn test_process_limit() {
    let file = corpus_file();
    let output = cetem()
        .args(["process", "-q", "-g", "line", "-n", "3", "-i"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 3);
}

#[test]
fn test_process_rejects_unknown_granularity() {
    let file = corpus_file();
    cetem()
        .args(["process", "-q", "-g", "word", "-i"])
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn test_process_missing_file_fails() {
    cetem()
        .args(["process", "-q", "-i", "/nonexistent/corpus.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open corpus file"));
}

#[test]
fn test_validate_well_formed() {
    let file = corpus_file();
    cetem()
        .args(["validate", "-i"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Corpus is well-formed!"))
        .stdout(predicate::str::contains("Extracts:   1"))
        .stdout(predicate::str::contains("Tokens:     2"));
}

#[test]
fn test_validate_unbalanced_corpus_fails() {
    let mut file = NamedTempFile::new().unwrap();
    // Sentence never closed
    file.write_all(b"<ext n=1 sec=pol sem=1>\n<p par=a1>\n<s>\ncasa\tpol\t1\tcasa\tNCMS\n")
        .unwrap();

    cetem()
        .args(["validate", "-i"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Corpus is not well-formed!"))
        .stdout(predicate::str::contains("unbalanced markup"));
}
