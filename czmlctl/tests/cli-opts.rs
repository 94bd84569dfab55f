use std::io::Write;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::NamedTempFile;

const BIN: &str = "czmlctl";

const SCENE: &str = r##"
version = 1
start = "2024-06-14T10:00:00Z"
multiplier = 10

entities = [
  { kind = "station", id = "TLS", name = "Toulouse", lon = 1.36, lat = 43.63, alt = 150 },
  { kind = "plane", id = "AF123", coords = [[0, 1.36, 43.63, 150], [1800, 2, 46, 10000], [3600, 2.55, 49.01, 120]] },
]
"##;

fn scene_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".hcl").tempfile().unwrap();
    write!(file, "{SCENE}").unwrap();
    file
}

fn run_convert(args: &[&str]) -> Value {
    let scene = scene_file();
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .arg("convert")
        .args(args)
        .arg(scene.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version_opt() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-V").assert().failure();
}

#[test]
fn test_version_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("version").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_completion() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("completion").arg("bash").assert().success();
}

#[test]
fn test_convert() {
    let v = run_convert(&[]);
    let packets = v.as_array().unwrap();
    assert_eq!(3, packets.len());
    assert_eq!("document", packets[0]["id"]);
    assert_eq!(10.0, packets[0]["clock"]["multiplier"]);
    assert_eq!(
        "2024-06-14T10:00:00Z/2024-06-15T10:00:00Z",
        packets[0]["clock"]["interval"]
    );
    assert_eq!("TLS", packets[1]["id"]);
    assert!(packets[1].get("path").is_none());
    assert_eq!("AF123", packets[2]["id"]);
    assert!(packets[2].get("path").is_some());
}

#[test]
fn test_convert_window_and_multiplier() {
    let v = run_convert(&["-w", "2024-06-14T09:00:00Z..2024-06-14T12:00:00Z", "-m", "120"]);
    assert_eq!(120.0, v[0]["clock"]["multiplier"]);
    assert_eq!(
        "2024-06-14T09:00:00Z/2024-06-14T12:00:00Z",
        v[0]["clock"]["interval"]
    );
    assert_eq!("2024-06-14T09:00:00Z", v[0]["clock"]["currentTime"]);
    assert_eq!(v[0]["clock"]["interval"], v[2]["availability"]);
}

#[test]
fn test_convert_output_file() {
    let scene = scene_file();
    let out = tempfile::Builder::new().suffix(".czml").tempfile().unwrap();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-o")
        .arg(out.path())
        .arg("convert")
        .arg("-p")
        .arg(scene.path())
        .assert()
        .success();

    let data = std::fs::read_to_string(out.path()).unwrap();
    let v: Value = serde_json::from_str(&data).unwrap();
    assert_eq!(3, v.as_array().unwrap().len());
}

#[test]
fn test_convert_bad_window() {
    let scene = scene_file();
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("convert")
        .arg("-w")
        .arg("tomorrow-ish")
        .arg(scene.path())
        .assert()
        .failure();
}

#[test]
fn test_convert_infinite_multiplier() {
    let scene = scene_file();
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .arg("convert")
        .arg("-m")
        .arg("inf")
        .arg(scene.path())
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Bad multiplier inf"));
}

#[test]
fn test_convert_missing_scene() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("convert")
        .arg("/nonexistent/scene.hcl")
        .assert()
        .failure();
}

#[test]
fn test_list() {
    let scene = scene_file();
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .arg("list")
        .arg(scene.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("AF123"));
    assert!(out.contains("Ground Station Toulouse"));
}

#[test]
fn test_bad_config() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-c")
        .arg("/nonexistent/czmlctl.hcl")
        .arg("version")
        .assert()
        .failure();
}
