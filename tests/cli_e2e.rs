//! End-to-end CLI tests for chatsense.
//!
//! These tests run the actual binary against fixtures in a temporary
//! directory and check the files it writes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const EXPORT: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"/></head><body><div class="history">
 <div class="message default clearfix" id="message1"><div class="body">
  <div class="pull_right date details" title="15.03.2024 10:05:00 UTC+03:00">10:05</div>
  <div class="from_name">Алиса</div>
  <div class="text">Хорошие новости!</div>
 </div></div>
 <div class="message default clearfix joined" id="message2"><div class="body">
  <div class="pull_right date details" title="15.03.2024 10:06:00 UTC+03:00">10:06</div>
  <div class="text">Маша, мне очень понравились 2 фильма!</div>
 </div></div>
 <div class="message default clearfix" id="message3"><div class="body">
  <div class="pull_right date details" title="16.03.2024 22:15:00 UTC+03:00">22:15</div>
  <div class="from_name">Борис</div>
  <div class="text">Это было ужасно</div>
 </div></div>
 <div class="message default clearfix joined" id="message4"><div class="body">
  <div class="pull_right date details" title="16.03.2024 22:16:00 UTC+03:00">22:16</div>
  <div class="text">42</div>
 </div></div>
</div></body></html>"#;

const REVIEWS: &str = "id;Text\n1;Отличный фильм!\n2;\n3;12 345\n4;Это не плохо\n";

/// Creates a temporary directory with an HTML export and a CSV dataset.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("messages.html"), EXPORT).unwrap();
    fs::write(dir.path().join("reviews.csv"), REVIEWS).unwrap();
    dir
}

fn chatsense() -> Command {
    Command::cargo_bin("chatsense").unwrap()
}

fn path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// chat
// ============================================================================

#[test]
fn test_chat_to_csv() {
    let dir = setup_fixtures();
    let output = path(&dir, "chat.csv");

    chatsense()
        .arg("chat")
        .arg(path(&dir, "messages.html"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 4 messages"))
        .stdout(predicate::str::contains("Done!"));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "Sender,Message,Date,Time");
    assert_eq!(lines[1], "Алиса,Хорошие новости!,15.03.2024,10:05");
    assert_eq!(
        lines[2],
        "Алиса,\"Маша, мне очень понравились 2 фильма!\",15.03.2024,10:06"
    );
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_chat_to_json() {
    let dir = setup_fixtures();
    let output = path(&dir, "chat.json");

    chatsense()
        .arg("chat")
        .arg(path(&dir, "messages.html"))
        .args(["-f", "json", "-o"])
        .arg(&output)
        .assert()
        .success();

    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2]["Sender"], "Борис");
    assert_eq!(rows[2]["Time"], "22:15");
}

#[test]
fn test_chat_to_jsonl() {
    let dir = setup_fixtures();
    let output = path(&dir, "chat.jsonl");

    chatsense()
        .arg("chat")
        .arg(path(&dir, "messages.html"))
        .args(["-f", "jsonl", "-o"])
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 4);
    for line in content.lines() {
        let _: serde_json::Value = serde_json::from_str(line).unwrap();
    }
}

#[test]
fn test_chat_default_output_follows_format() {
    let dir = setup_fixtures();

    chatsense()
        .current_dir(dir.path())
        .args(["chat", "messages.html", "-f", "json"])
        .assert()
        .success();

    assert!(path(&dir, "chat.json").exists());
    assert!(!path(&dir, "chat.csv").exists());
}

#[test]
fn test_chat_clean() {
    let dir = setup_fixtures();
    let output = path(&dir, "clean.csv");

    chatsense()
        .arg("chat")
        .arg(path(&dir, "messages.html"))
        .arg("--clean")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Normalizing messages"))
        .stdout(predicate::str::contains("3 rows after normalization"));

    let table = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "Алиса,хороший новость,15.03.2024,10:05");
    assert_eq!(lines[2], "Алиса,очень понравиться фильм,15.03.2024,10:06");
    assert_eq!(lines[3], "Борис,это ужасно,16.03.2024,22:15");
}

#[test]
fn test_chat_filters() {
    let dir = setup_fixtures();
    let output = path(&dir, "filtered.csv");

    chatsense()
        .arg("chat")
        .arg(path(&dir, "messages.html"))
        .args(["--after", "2024-03-16", "--from", "борис", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 messages after filtering"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.contains("Это было ужасно"));
    assert!(!csv.contains("Алиса"));
}

#[test]
fn test_chat_invalid_date() {
    let dir = setup_fixtures();

    chatsense()
        .arg("chat")
        .arg(path(&dir, "messages.html"))
        .args(["--after", "15/03/2024", "-o"])
        .arg(path(&dir, "out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_chat_missing_file() {
    let dir = tempdir().unwrap();

    chatsense()
        .arg("chat")
        .arg(path(&dir, "missing.html"))
        .arg("-o")
        .arg(path(&dir, "out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));

    assert!(!path(&dir, "out.csv").exists());
}

// ============================================================================
// clean
// ============================================================================

#[test]
fn test_clean_csv_with_delimiter() {
    let dir = setup_fixtures();
    let output = path(&dir, "cleaned.csv");

    chatsense()
        .arg("clean")
        .arg(path(&dir, "reviews.csv"))
        .args(["--column", "Text", "--delimiter", ";", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dropped:   2 empty rows"));

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv, "id;Text\n1;отличный фильм\n4;это не плохо\n");
}

#[test]
fn test_clean_missing_column() {
    let dir = setup_fixtures();

    chatsense()
        .arg("clean")
        .arg(path(&dir, "reviews.csv"))
        .args(["--column", "Review", "--delimiter", ";", "-o"])
        .arg(path(&dir, "out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column 'Review' not found"))
        .stderr(predicate::str::contains("Text"));
}

#[test]
fn test_clean_bad_delimiter() {
    let dir = setup_fixtures();

    chatsense()
        .arg("clean")
        .arg(path(&dir, "reviews.csv"))
        .args(["--delimiter", ";;"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter"));
}

#[test]
fn test_clean_with_lemma_dict() {
    let dir = setup_fixtures();
    let dict = path(&dir, "extra.tsv");
    fs::write(&dict, "отличный\tотлично\n").unwrap();
    let output = path(&dir, "cleaned.jsonl");

    chatsense()
        .arg("clean")
        .arg(path(&dir, "reviews.csv"))
        .args(["--column", "Text", "--delimiter", ";", "-f", "jsonl", "--lemma-dict"])
        .arg(&dict)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let first = fs::read_to_string(&output).unwrap();
    let row: serde_json::Value = serde_json::from_str(first.lines().next().unwrap()).unwrap();
    assert_eq!(row["Text"], "отлично фильм");
}

// ============================================================================
// text
// ============================================================================

#[test]
fn test_text_prints_normalized() {
    chatsense()
        .args(["text", "Маша, мне очень понравились 2 фильма!"])
        .assert()
        .success()
        .stdout(predicate::str::diff("очень понравиться фильм\n"));
}

#[test]
fn test_text_noise_prints_empty_line() {
    chatsense()
        .args(["text", "12 345 😀"])
        .assert()
        .success()
        .stdout(predicate::str::diff("\n"));
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    chatsense()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("text"));
}

#[test]
fn test_version() {
    chatsense()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
