//! Integration tests for CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WORLD: &str = r#"{
    "start_area": "cellar",
    "artifacts": [
        {"type": "area", "id": "cellar", "name": "Cellar",
         "description": "A cold cellar.",
         "fixtures": ["box"], "exits": {"hall": "n"}},
        {"type": "area", "id": "hall", "name": "Hall", "description": "A bright hall."},
        {"type": "fixture", "id": "box", "name": "Box",
         "description": "A wooden box.",
         "container_description": "A box sits in the corner.",
         "items": ["key"], "properties": {"openable": true}},
        {"type": "item", "id": "key", "name": "Key"},
        {"type": "item", "id": "coin", "name": "Coin"}
    ],
    "game_state": {
        "inventory": ["coin"],
        "state_events": {
            "game_victory": {"artifacts": {"box": {"items": {"equals": []}}}}
        }
    }
}"#;

/// Create a temp directory holding the test world.
fn test_world() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.json");
    fs::write(&path, WORLD).unwrap();
    (dir, path)
}

fn lantern() -> Command {
    Command::cargo_bin("lantern").unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_world() {
    let (_dir, path) = test_world();
    lantern()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("2 areas, 1 fixtures, 2 items")),
        );
}

#[test]
fn check_fails_on_missing_start_area() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"start_area": "nowhere", "artifacts": []}"#).unwrap();

    lantern()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("nowhere")));
}

#[test]
fn check_fails_on_missing_file() {
    let dir = TempDir::new().unwrap();
    lantern()
        .arg("check")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_all_artifacts() {
    let (_dir, path) = test_world();
    lantern()
        .arg("list")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Cellar")
                .and(predicate::str::contains("Box"))
                .and(predicate::str::contains("(inventory)"))
                .and(predicate::str::contains("5 artifacts")),
        );
}

#[test]
fn list_filters_by_kind() {
    let (_dir, path) = test_world();
    lantern()
        .args(["list", "--kind", "item"])
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Key")
                .and(predicate::str::contains("Cellar").not())
                .and(predicate::str::contains("2 artifacts")),
        );
}

#[test]
fn list_rejects_unknown_kind() {
    let (_dir, path) = test_world();
    lantern()
        .args(["list", "--kind", "monster"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown kind"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_executes_script_until_victory() {
    let (dir, path) = test_world();
    let script = dir.path().join("script.txt");
    fs::write(&script, "take key\n\nopen box\ntake key\nlook\n").unwrap();

    lantern()
        .arg("run")
        .arg(&path)
        .arg("--script")
        .arg(&script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("> take key\nYou can't take that.")
                .and(predicate::str::contains("> open box\nYou opened the Box"))
                .and(predicate::str::contains("You have won the game!"))
                .and(predicate::str::contains("> look").not()),
        );
}

#[test]
fn run_honours_victory_flag_override() {
    let (dir, path) = test_world();
    let script = dir.path().join("script.txt");
    fs::write(&script, "open box\ntake key\n").unwrap();

    lantern()
        .arg("run")
        .arg(&path)
        .args(["--script"])
        .arg(&script)
        .args(["--victory-flag", "never_raised"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You took the Key")
                .and(predicate::str::contains("You have won the game!").not()),
        );
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_reads_commands_until_quit() {
    let (_dir, path) = test_world();
    lantern()
        .arg("play")
        .arg(&path)
        .write_stdin("inventory\ngo north\nquit\nlook\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("A cold cellar. A box sits in the corner.")
                .and(predicate::str::contains("You have:\nCoin"))
                .and(predicate::str::contains("A bright hall."))
                .and(predicate::str::contains("Quitting...")),
        );
}

#[test]
fn play_suggests_close_names() {
    let (_dir, path) = test_world();
    lantern()
        .arg("play")
        .arg(&path)
        .write_stdin("take bo\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("I don't see any bo here.")
                .and(predicate::str::contains("Did you mean: Box?")),
        );
}
