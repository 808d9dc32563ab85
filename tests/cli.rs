mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_model(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("MyGame.json");
    let json = serde_json::to_string_pretty(&common::game_package()).unwrap();
    std::fs::write(&path, json).unwrap();
    path
}

fn binary() -> Command {
    Command::cargo_bin("uscript-dec-rs").unwrap()
}

#[test]
fn test_decompile_class_to_stdout() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir);

    binary()
        .arg("decompile")
        .arg(&model)
        .args(["--class", "Weapon", "--lf"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("class Weapon extends Actor;\n"))
        .stdout(predicate::str::contains("\tfunction BeginState();"));
}

#[test]
fn test_decompile_to_file() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir);
    let output = dir.path().join("Weapon.uc");

    binary()
        .arg("decompile")
        .arg(&model)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("defaultproperties{\r\n\tAmmo=5\r\n}"));
}

#[test]
fn test_decompile_unknown_class_fails() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir);

    binary()
        .arg("decompile")
        .arg(&model)
        .args(["--class", "Pistol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pistol"));
}

#[test]
fn test_disasm_lists_offsets() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir);

    binary()
        .arg("disasm")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("; Weapon.Fire (2 instructions)"))
        .stdout(predicate::str::contains("0x0000: Ammo = Ammo - 1"))
        .stdout(predicate::str::contains("; Weapon.Firing.BeginState"));
}

#[test]
fn test_inspect_prints_directory() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir);

    binary()
        .arg("inspect")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"MyGame\""))
        .stdout(predicate::str::contains("\"full_name\": \"Engine.Actor\""))
        .stdout(predicate::str::contains("\"full_name\": \"MyGame.Weapon0\""));
}

#[test]
fn test_invalid_model_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"name\": 3 }").unwrap();

    binary()
        .arg("inspect")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid object model"));
}
