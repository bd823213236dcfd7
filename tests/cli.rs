use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const SHEET: &str = "Yearbook 2024,,\n\
                     #,First,Last\n\
                     1,Matthew,Spooner\n\
                     2,Ana,Pierre\n";

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".rosterchk.toml"),
        "pairings_file = \"data/pairs.nms\"\n\
         dictionary_file = \"data/names.dict\"\n\
         roster_input = \"pairings.csv\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("pairings.csv"), SHEET).unwrap();
    dir
}

fn rosterchk(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rosterchk").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG").arg("--no-color");
    cmd
}

fn reloaded_workspace() -> TempDir {
    let dir = workspace();
    rosterchk(dir.path())
        .arg("reload")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 2 name pairs (4 distinct names)"));
    dir
}

#[test]
fn test_reload_writes_database() {
    let dir = reloaded_workspace();
    assert!(dir.path().join("data/pairs.nms").exists());
    assert!(dir.path().join("data/names.dict").exists());
}

#[test]
fn test_first_reload_does_not_ask_for_a_reload() {
    let dir = workspace();
    rosterchk(dir.path())
        .arg("reload")
        .assert()
        .success()
        .stderr(predicate::str::contains("Reload the name database first").not());
}

#[test]
fn test_reload_replaces_corrupt_dictionary() {
    let dir = workspace();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/names.dict"), b"garbage").unwrap();

    rosterchk(dir.path())
        .arg("reload")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 2 name pairs (4 distinct names)"));

    rosterchk(dir.path())
        .write_stdin("ana pierre")
        .assert()
        .success()
        .stdout(predicate::str::contains("All good."));
}

#[test]
fn test_registered_names_are_all_good() {
    let dir = reloaded_workspace();
    rosterchk(dir.path())
        .write_stdin("  matthew   Spooner  \n\nANA pierre\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matthew Spooner"))
        .stdout(predicate::str::contains("Ana Pierre"))
        .stdout(predicate::str::contains("All good."));
}

#[test]
fn test_misspelled_name_fails_with_suggestion() {
    let dir = reloaded_workspace();
    rosterchk(dir.path())
        .write_stdin("ana pierrre\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Error: \"Pierrre\" is not a registered last name. Did you mean: Pierre?",
        ));
}

#[test]
fn test_unregistered_pair() {
    let dir = reloaded_workspace();
    rosterchk(dir.path())
        .arg("--no-fail")
        .write_stdin("ana spooner")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: \"Ana Spooner\" is not a registered name pair.",
        ));
}

#[test]
fn test_unparseable_entry_rejects_batch() {
    let dir = reloaded_workspace();
    rosterchk(dir.path())
        .write_stdin("ana pierre\nana maria st. martino vanchez\n")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Ana Pierre").not())
        .stderr(predicate::str::contains(
            "Error on entry 2: \"ana maria st. martino vanchez\". Each name must be from 2 to 4 words.",
        ));
}

#[test]
fn test_comma_delimiter_from_file() {
    let dir = reloaded_workspace();
    fs::write(dir.path().join("names.txt"), "ana pierre,matthew spooner").unwrap();
    rosterchk(dir.path())
        .args(["-d", ",", "names.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("names.txt"))
        .stdout(predicate::str::contains("All good."));
}

#[test]
fn test_json_output() {
    let dir = reloaded_workspace();
    let output = rosterchk(dir.path())
        .args(["--format", "json", "--no-fail"])
        .write_stdin("matthew spooner\nmathew spooner")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "stdin");
    assert_eq!(json["error_count"], 1);
    assert_eq!(json["entries"][0]["canonical"], "Matthew Spooner");
    assert_eq!(json["entries"][0]["diagnostic"], "");
    assert_eq!(json["entries"][1]["line"], 2);
}

#[test]
fn test_dict_words() {
    let dir = reloaded_workspace();
    rosterchk(dir.path())
        .args(["dict", "words"])
        .assert()
        .success()
        .stdout("Ana\nMatthew\nPierre\nSpooner\n");
}

#[test]
fn test_failed_reload_keeps_previous_database() {
    let dir = reloaded_workspace();
    rosterchk(dir.path())
        .args(["reload", "--input", "missing.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name database unchanged."))
        .stderr(predicate::str::contains("Warning: Could not read the name pairings"));

    rosterchk(dir.path())
        .write_stdin("ana pierre")
        .assert()
        .success();
}

#[test]
fn test_without_database_everything_is_unregistered() {
    let dir = workspace();
    rosterchk(dir.path())
        .write_stdin("ana pierre")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Error: Both \"Ana\" and \"Pierre\" are unregistered names.",
        ));
}
