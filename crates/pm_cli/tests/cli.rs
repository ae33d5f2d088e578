//! End-to-end runs of the `parliament` binary: exit codes, stdout summary
//! and the files written under --out.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn parliament() -> Command {
    let mut cmd = Command::cargo_bin("parliament").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("chamber.json");
    fs::write(&path, body).unwrap();
    path
}

// -----------------------------------------------------------------------------
// Happy paths
// -----------------------------------------------------------------------------

#[test]
fn us_senate_preset_gives_all_seats_to_plurality_winner() {
    parliament()
        .args(["--preset", "us-senate", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("System: First-Past-The-Post"))
        .stdout(predicate::str::contains("Democrats"))
        .stdout(predicate::str::contains("Result: RES:"));
}

#[test]
fn coalition_completes_majority_challenge() {
    parliament()
        .args(["--preset", "us-senate", "--coalition", "p1", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coalition: [p1] 100 seats"))
        .stdout(predicate::str::contains("Challenge completed: Simple Majority (new)"))
        .stdout(predicate::str::contains("Challenge completed: Two-Thirds Majority (new)"));
}

#[test]
fn floor_vote_is_reported() {
    parliament()
        .args(["--preset", "dutch", "--motion", "Climate Act", "--seed", "0x2A", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Floor vote \"Climate Act\""));
}

#[test]
fn validate_only_exits_zero_without_summary() {
    parliament()
        .args(["--preset", "dutch", "--validate-only", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn renders_are_written_to_out_dir() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("run");
    parliament()
        .args(["--preset", "dutch", "--render", "json", "--render", "csv", "--render", "html", "--quiet", "--out"])
        .arg(&out)
        .assert()
        .success();

    let result = fs::read_to_string(out.join("result.json")).unwrap();
    assert!(result.starts_with("{\"allocation\":"));
    assert!(result.contains("\"result_id\":\"RES:"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("parliament_simulation.json")).unwrap()).unwrap();
    assert_eq!(json["totalSeats"], 150);
    assert_eq!(json["parties"].as_array().unwrap().len(), 5);

    let csv = fs::read_to_string(out.join("parliament_data.csv")).unwrap();
    assert!(csv.starts_with("id,name,seats,color,ideology\r\n\"p1\",\"VVD\","));

    let html = fs::read_to_string(out.join("parliament_results.html")).unwrap();
    assert!(html.contains("GroenLinks-PvdA"));
}

#[test]
fn same_seed_same_randomized_outcome() {
    let run = |seed: &str| {
        let out = parliament()
            .args(["--randomize", "--seed", seed, "--quiet"])
            .output()
            .unwrap();
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap()
    };
    assert_eq!(run("7"), run("7"));
}

#[test]
fn config_file_drives_the_election() {
    let tmp = TempDir::new().unwrap();
    let cfg = write_config(
        tmp.path(),
        r##"{
  "total_seats": 10,
  "election": { "system": "sainte_lague", "threshold_pct": 0, "eligible_voters": 1000, "turnout_pct": 100 },
  "parties": [
    { "id": "a", "name": "Alpha", "color": "#f00", "vote_percentage": 60 },
    { "id": "b", "name": "Beta", "color": "#0f0", "vote_percentage": 30 },
    { "id": "c", "name": "Gamma", "color": "#00f", "vote_percentage": 10 }
  ]
}"##,
    );
    parliament()
        .arg("--config")
        .arg(&cfg)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("System: Sainte-Laguë"))
        .stdout(predicate::str::contains("Votes cast: 1000 | Valid: 1000 | Spoiled: 0"));
}

// -----------------------------------------------------------------------------
// Exit codes
// -----------------------------------------------------------------------------

#[test]
fn zero_seats_is_a_validation_error() {
    parliament().args(["--seats", "0", "--quiet"]).assert().code(2);
}

#[test]
fn render_without_out_is_rejected() {
    parliament()
        .args(["--render", "csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--out"));
}

#[test]
fn config_and_preset_conflict() {
    parliament().args(["--config", "a.json", "--preset", "dutch"]).assert().code(2);
}

#[test]
fn unknown_coalition_member_is_rejected() {
    parliament().args(["--preset", "us-senate", "--coalition", "p9", "--quiet"]).assert().code(2);
}

#[test]
fn missing_config_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    parliament()
        .arg("--config")
        .arg(tmp.path().join("nope.json"))
        .arg("--quiet")
        .assert()
        .code(4);
}

#[test]
fn malformed_config_is_a_validation_error() {
    let tmp = TempDir::new().unwrap();
    let cfg = write_config(tmp.path(), r#"{ "parties": [ "#);
    parliament().arg("--config").arg(&cfg).arg("--quiet").assert().code(2);
}

#[test]
fn shares_over_one_hundred_reject_the_election() {
    let tmp = TempDir::new().unwrap();
    let cfg = write_config(
        tmp.path(),
        r##"{
  "parties": [
    { "id": "a", "name": "Alpha", "color": "#f00", "vote_percentage": 60 },
    { "id": "b", "name": "Beta", "color": "#0f0", "vote_percentage": 50 }
  ]
}"##,
    );
    parliament()
        .arg("--config")
        .arg(&cfg)
        .arg("--quiet")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("election rejected"));
}
