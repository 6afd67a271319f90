mod common;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use common::{repo_data_dir, unique_temp_dir};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_mathhammer")
}

fn scenario_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios/havocs.yaml")
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env("MATHHAMMER_DATA_DIR", repo_data_dir())
        .env("MATHHAMMER_WORKERS", "2")
        .output()
        .expect("binary should run")
}

#[test]
fn simulate_emits_json_report() {
    let path = scenario_path();
    let output = run(&["simulate", path.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("simulate should emit json");
    let outcomes = payload.as_array().expect("array of outcomes");
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["attacker"], "havocs");
    assert_eq!(outcomes[0]["report"]["attacks"].as_array().map(Vec::len), Some(2));
    assert!(outcomes[0]["report"]["total"]["mean"].is_string());
    assert!(outcomes[0]["report"]["total"]["approx_mean"].is_number());
}

#[test]
fn simulate_emits_csv_report() {
    let path = scenario_path();
    let output = run(&["simulate", path.to_str().expect("utf-8 path"), "--csv"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("# havocs"));
    assert_eq!(lines.next(), Some("attack,damage,probability,approx"));
    assert!(stdout.contains("# tacticals"));
    assert!(stdout.lines().any(|line| line.starts_with("total,0,")));
}

#[test]
fn simulate_without_scenario_is_a_usage_error() {
    let output = run(&["simulate"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: mathhammer simulate"));
}

#[test]
fn simulate_reports_bad_scenarios() {
    let dir = unique_temp_dir("cli");
    let path = dir.join("broken.yaml");
    fs::write(&path, "data_set: nowhere\n").expect("write scenario");

    let output = run(&["simulate", path.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulate failed"));
}

#[test]
fn inspect_lists_data_set_contents() {
    let output = run(&["inspect", "chaos_space_marines"]);

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("inspect should emit json");
    let weapons = payload["weapons"].as_array().expect("weapon list");
    assert!(weapons.iter().any(|weapon| weapon == "Boltgun"));
    let effects = payload["effects"].as_array().expect("effect list");
    assert!(effects.iter().any(|effect| effect == "Lord of Chaos"));
}

#[test]
fn unknown_command_prints_usage() {
    let output = run(&["serve"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: mathhammer"));
}
