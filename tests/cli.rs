#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bookshelf(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env("BOOKSHELF_HOME", home).env("NO_COLOR", "1");
    cmd
}

fn library(home: &Path) -> Vec<Value> {
    let content = fs::read_to_string(home.join("library.json")).unwrap();
    serde_json::from_str::<Value>(&content)
        .unwrap()
        .as_array()
        .unwrap()
        .clone()
}

fn add(home: &Path, title: &str, author: &str, year: &str) {
    bookshelf(home)
        .args(["add", title, author, "--year", year])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book added"));
}

#[test]
fn add_list_and_persist() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    bookshelf(home)
        .args([
            "add",
            "Dune",
            "Frank Herbert",
            "--year",
            "1965",
            "--genre",
            "fiction",
            "--read",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book added (1): Dune by Frank Herbert"));

    bookshelf(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Dune by Frank Herbert"))
        .stdout(predicate::str::contains("1965"));

    let records = library(home);
    assert_eq!(records.len(), 1);
    let record = records[0].as_object().unwrap();
    for field in [
        "id",
        "title",
        "author",
        "publication_year",
        "genre",
        "read_status",
        "added_date",
    ] {
        assert!(record.contains_key(field), "missing field {}", field);
    }
    assert_eq!(record["genre"], Value::from("Fiction"));
    assert_eq!(record["read_status"], Value::from(true));
}

#[test]
fn naked_run_lists_books() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "Emma", "Jane Austen", "1815");

    bookshelf(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Emma by Jane Austen"));
}

#[test]
fn empty_library_warns_on_list() {
    let temp = TempDir::new().unwrap();
    bookshelf(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your library is empty"));
    assert!(!temp.path().join("library.json").exists());
}

#[test]
fn search_is_case_insensitive() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    add(home, "Dune", "Frank Herbert", "1965");
    add(home, "dune2", "Frank Herbert", "1969");
    add(home, "Emma", "Jane Austen", "1815");

    bookshelf(home)
        .args(["search", "dun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 results."))
        .stdout(predicate::str::contains("Dune by Frank Herbert"))
        .stdout(predicate::str::contains("dune2 by Frank Herbert"))
        .stdout(predicate::str::contains("Emma").not());

    bookshelf(home)
        .args(["search", "18", "--by", "publication_year"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emma by Jane Austen"));

    bookshelf(home)
        .args(["search", "tolkien", "--by", "author"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));
}

#[test]
fn remove_out_of_range_fails_without_touching_the_file() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    add(home, "Dune", "Frank Herbert", "1965");
    add(home, "Emma", "Jane Austen", "1815");
    let before = fs::read_to_string(home.join("library.json")).unwrap();

    for bad in ["-1", "0", "3", "1-9000000000000000000"] {
        bookshelf(home)
            .args(["remove", bad])
            .assert()
            .failure()
            .stderr(predicate::str::contains("out of range"));
    }

    let after = fs::read_to_string(home.join("library.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn remove_by_position() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    add(home, "Dune", "Frank Herbert", "1965");
    add(home, "Emma", "Jane Austen", "1815");
    add(home, "Cosmos", "Carl Sagan", "1980");

    bookshelf(home)
        .args(["rm", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book removed (1): Dune"))
        .stdout(predicate::str::contains("Book removed (2): Emma"));

    let records = library(home);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], Value::from("Cosmos"));
}

#[test]
fn toggle_and_view_read_status() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    add(home, "Dune", "Frank Herbert", "1965");

    bookshelf(home)
        .args(["toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked as read (1): Dune"));

    bookshelf(home)
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status:"))
        .stdout(predicate::str::contains("Read"))
        .stdout(predicate::str::contains("Frank Herbert"));

    bookshelf(home).args(["unread", "1"]).assert().success();
    assert_eq!(library(home)[0]["read_status"], Value::from(false));
}

#[test]
fn malformed_records_are_dropped_and_file_rewritten() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    fs::write(
        home.join("library.json"),
        r#"[
            {
                "title": "A",
                "author": "Someone",
                "publication_year": 1999,
                "genre": "Fiction",
                "read_status": false,
                "added_date": "2024-02-02 08:00:00"
            },
            {"title": "B"}
        ]"#,
    )
    .unwrap();

    bookshelf(home)
        .args(["list", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A by Someone"))
        .stdout(predicate::str::contains("Dropped 1 malformed record"));

    let records = library(home);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], Value::from("A"));
    assert_eq!(records[0]["added_date"], Value::from("2024-02-02 08:00:00"));
}

#[test]
fn odd_values_and_unknown_keys_survive_startup() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    fs::write(
        home.join("library.json"),
        r#"[{
            "title": "Neuromancer",
            "author": "William Gibson",
            "publication_year": "1984",
            "genre": "Sci-Fi",
            "read_status": false,
            "added_date": "2024-01-01 10:00:00",
            "notes": "signed copy"
        }]"#,
    )
    .unwrap();

    bookshelf(home)
        .args(["search", "sci", "--by", "genre"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Neuromancer by William Gibson"));

    bookshelf(home).args(["read", "1"]).assert().success();

    let records = library(home);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["notes"], Value::from("signed copy"));
    assert_eq!(records[0]["publication_year"], Value::from("1984"));
    assert_eq!(records[0]["genre"], Value::from("Sci-Fi"));
    assert_eq!(records[0]["read_status"], Value::from(true));
}

#[test]
fn corrupt_library_is_backed_up_and_reset() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    fs::write(home.join("library.json"), "[{\"title\": ").unwrap();

    bookshelf(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("corrupted"))
        .stdout(predicate::str::contains("kept as"));

    assert_eq!(
        fs::read_to_string(home.join("library.json")).unwrap(),
        "[]"
    );
    let backups: Vec<_> = fs::read_dir(home)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("library.json.corrupt-"))
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn stats_json_reports_decades() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    for (title, year) in [("A", "1985"), ("B", "1990"), ("C", "1991"), ("D", "2001")] {
        add(home, title, "Author", year);
    }

    let output = bookshelf(home)
        .args(["stats", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stats: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(stats["total_books"], Value::from(4));
    assert_eq!(stats["percent_read"], Value::from(0.0));
    assert_eq!(
        stats["decades"],
        serde_json::json!([[1980, 1], [1990, 2], [2000, 1]])
    );
}

#[test]
fn stats_text_output() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    add(home, "Dune", "Frank Herbert", "1965");
    bookshelf(home).args(["read", "1"]).assert().success();

    bookshelf(home)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("100.00%"))
        .stdout(predicate::str::contains("Frank Herbert: 1 book"));
}

#[test]
fn empty_title_adds_nothing() {
    let temp = TempDir::new().unwrap();
    bookshelf(temp.path())
        .args(["add", "", "Someone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No book was added"));
    assert!(!temp.path().join("library.json").exists());
}

#[test]
fn invalid_year_is_an_error() {
    let temp = TempDir::new().unwrap();
    bookshelf(temp.path())
        .args(["add", "Old", "Someone", "--year", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Publication year"));
}

#[test]
fn config_set_and_show() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    bookshelf(home)
        .args(["config", "library-file", "books.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("library-file set to books.json"));

    bookshelf(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("library-file = books.json"))
        .stdout(predicate::str::contains("top-authors = 5"));

    bookshelf(home)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("books.json"));

    add(home, "Dune", "Frank Herbert", "1965");
    assert!(home.join("books.json").exists());
}

#[test]
fn genres_lists_labels() {
    let temp = TempDir::new().unwrap();
    bookshelf(temp.path())
        .arg("genres")
        .assert()
        .success()
        .stdout(predicate::str::contains("Graphic Novel"))
        .stdout(predicate::str::contains("philosophical"));
}
