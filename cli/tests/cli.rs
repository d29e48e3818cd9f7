//! End-to-end tests for the gdm binary.
//!
//! Each test points `GDM_DATA_DIR` at its own temporary directory so the
//! database and config never leak between tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn gdm(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gdm"));
    cmd.env("GDM_DATA_DIR", data_dir.path()).env_remove("RUST_LOG");
    cmd
}

fn save_profile(dir: &TempDir, age: &str) {
    gdm(dir)
        .args([
            "profile",
            "save",
            "--last-period",
            "01.01.2024",
            "--age",
            age,
            "--weight",
            "70",
            "--height",
            "170",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    let dir = setup_test_dir();
    gdm(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gestational diabetes"));
}

#[test]
fn test_calc_commands_need_no_database() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["calc", "bmi", "70", "170"])
        .assert()
        .success()
        .stdout("24.22\n");
    gdm(&dir)
        .args(["calc", "due-date", "01.01.2024"])
        .assert()
        .success()
        .stdout("10.10.2023\n");
    gdm(&dir)
        .args(["calc", "heart-rate", "30"])
        .assert()
        .success()
        .stdout("190\n");

    assert!(!dir.path().join("gdm.db").exists());
}

#[test]
fn test_calc_bmi_zero_height_fails() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["calc", "bmi", "70", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("height must be greater than 0"));
}

#[test]
fn test_calc_due_date_bad_format() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["calc", "due-date", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use DD.MM.YYYY"));
}

#[test]
fn test_calc_due_date_out_of_range_year() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["calc", "due-date", "01.01.-262143"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_profile_history_table_keeps_seconds() {
    let dir = setup_test_dir();
    save_profile(&dir, "30");
    gdm(&dir)
        .args(["profile", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"))
        .stdout(predicate::str::contains("...").not());
}

#[test]
fn test_profile_save_and_show() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args([
            "profile",
            "save",
            "--last-period",
            "01.01.2024",
            "--age",
            "30",
            "--weight",
            "70",
            "--height",
            "170",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated due date: 10.10.2023"));

    assert!(dir.path().join("gdm.db").exists());

    let output = gdm(&dir)
        .args(["profile", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["age"], 30);
    assert_eq!(profile["pregnancy_due_date"], "10.10.2023");
}

#[test]
fn test_profile_show_without_profile() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["profile", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No health profile saved yet"));
}

#[test]
fn test_profile_save_rejects_bad_field() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args([
            "profile",
            "save",
            "--last-period",
            "01.01.2024",
            "--age",
            "thirty",
            "--weight",
            "70",
            "--height",
            "170",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("age"));
}

#[test]
fn test_recommend_uses_latest_profile() {
    let dir = setup_test_dir();
    save_profile(&dir, "25");
    save_profile(&dir, "30");

    let output = gdm(&dir).args(["recommend", "--json"]).output().unwrap();
    assert!(output.status.success());
    let rec: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rec["target_heart_rate"], 190);
    assert_eq!(rec["bmi"], 24.22);

    gdm(&dir)
        .args(["profile", "history", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"age\": 25"));
}

#[test]
fn test_recommend_without_profile() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["recommend", "--json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"error\""));
}

#[test]
fn test_diary_food_and_show() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["diary", "food", "Apple", "200g", "--date", "15.06.2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("104 kcal"));

    gdm(&dir)
        .args([
            "diary",
            "vitals",
            "--systolic",
            "118",
            "--diastolic",
            "76",
            "--pulse",
            "80",
            "--water",
            "1500",
            "--activity",
            "yes",
            "--date",
            "15.06.2024",
        ])
        .assert()
        .success();

    let output = gdm(&dir)
        .args(["diary", "show", "15.06.2024", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let diary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(diary["total_calories"], 104.0);
    assert_eq!(diary["total_water_ml"], 1500);
    assert_eq!(diary["measurements"][0]["activity"], true);
    assert_eq!(diary["food_entries"][0]["grams"], 200);
}

#[test]
fn test_diary_food_unknown_product() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["diary", "food", "apple", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found"));
}

#[test]
fn test_diary_show_empty_day() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["diary", "show", "01.01.2000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No entries for 01.01.2000"));
}

#[test]
fn test_custom_catalog_flag() {
    let dir = setup_test_dir();
    let catalog = dir.path().join("foods.csv");
    fs::write(&catalog, "name,calories_per_100g\nKiwi,61\n").unwrap();

    gdm(&dir)
        .arg("--catalog")
        .arg(&catalog)
        .args(["diary", "food", "Kiwi", "100", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"calories\": 61.0"));

    gdm(&dir)
        .arg("--catalog")
        .arg(&catalog)
        .args(["diary", "food", "Apple", "100"])
        .assert()
        .failure();
}

#[test]
fn test_missing_catalog_is_fatal() {
    let dir = setup_test_dir();
    fs::write(
        dir.path().join("config.toml"),
        format!(
            "catalog = {:?}\n",
            dir.path().join("missing.json").display().to_string()
        ),
    )
    .unwrap();

    gdm(&dir)
        .args(["foods"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load food catalog"));
}

#[test]
fn test_physiological_policy_from_config() {
    let dir = setup_test_dir();
    fs::write(
        dir.path().join("config.toml"),
        "[validation]\nmode = \"physiological\"\n",
    )
    .unwrap();

    gdm(&dir)
        .args([
            "diary",
            "vitals",
            "--systolic",
            "400",
            "--diastolic",
            "80",
            "--pulse",
            "70",
            "--water",
            "1000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the accepted range"));
}

#[test]
fn test_foods_search() {
    let dir = setup_test_dir();
    gdm(&dir)
        .args(["foods", "--search", "breast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chicken breast"))
        .stdout(predicate::str::contains("Turkey breast"));
}
