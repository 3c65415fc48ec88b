//! Integration tests for single-file conversion

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const DASHBOARD: &str = r#"{
  "title": "My Dashboard",
  "uid": "my-dash",
  "panels": [{"id": 1, "type": "timeseries", "targets": [{"expr": "up"}]}],
  "schemaVersion": 39
}"#;

fn run_dashcm(cwd: &Path, args: &[&str]) -> Result<(String, String, bool), String> {
    run_dashcm_with_log(cwd, args, None)
}

fn run_dashcm_with_log(
    cwd: &Path,
    args: &[&str],
    rust_log: Option<&str>,
) -> Result<(String, String, bool), String> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_dashcm"));
    command.args(args).current_dir(cwd).env_remove("RUST_LOG");
    if let Some(filter) = rust_log {
        command.env("RUST_LOG", filter);
    }

    let output = command
        .output()
        .map_err(|e| format!("Failed to run dashcm: {}", e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    Ok((stdout, stderr, output.status.success()))
}

fn read_manifest(path: &Path) -> serde_yaml::Value {
    let text = fs::read_to_string(path).unwrap();
    serde_yaml::from_str(&text).unwrap()
}

fn embedded_json(manifest: &serde_yaml::Value, key: &str) -> String {
    manifest["data"][key].as_str().unwrap().to_string()
}

#[test]
fn test_default_name_path_and_namespace() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("my_dashboard.json"), DASHBOARD).unwrap();

    let (_, stderr, success) = run_dashcm(dir.path(), &["-f", "my_dashboard.json"]).unwrap();
    assert!(success, "Command should succeed: stderr={}", stderr);

    let manifest = read_manifest(&dir.path().join("my_dashboard.yaml"));
    assert_eq!(manifest["apiVersion"].as_str(), Some("v1"));
    assert_eq!(manifest["kind"].as_str(), Some("ConfigMap"));
    assert_eq!(manifest["metadata"]["name"].as_str(), Some("my-dashboard"));
    assert_eq!(manifest["metadata"]["namespace"].as_str(), Some("monitoring"));
    assert_eq!(
        manifest["metadata"]["labels"]["grafana_dashboard"].as_str(),
        Some("1")
    );
    assert!(manifest["metadata"].get("annotations").is_none());

    let data = manifest["data"].as_mapping().unwrap();
    assert_eq!(data.len(), 1);

    let embedded = embedded_json(&manifest, "my_dashboard.json");
    assert!(embedded.ends_with('\n'));
    assert!(embedded.lines().count() > 1, "pretty output expected");

    let round_trip: Value = serde_json::from_str(&embedded).unwrap();
    let original: Value = serde_json::from_str(DASHBOARD).unwrap();
    assert_eq!(round_trip, original);
}

#[test]
fn test_compact_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("dash.json"), DASHBOARD).unwrap();

    let (_, stderr, success) = run_dashcm(dir.path(), &["-f", "dash.json", "-c"]).unwrap();
    assert!(success, "Command should succeed: stderr={}", stderr);

    let manifest = read_manifest(&dir.path().join("dash.yaml"));
    let embedded = embedded_json(&manifest, "dash.json");
    let body = embedded.strip_suffix('\n').unwrap();

    assert!(!body.contains('\n'));
    assert!(!body.contains(": "));

    let round_trip: Value = serde_json::from_str(body).unwrap();
    let original: Value = serde_json::from_str(DASHBOARD).unwrap();
    assert_eq!(round_trip, original);
}

#[test]
fn test_explicit_output_name_namespace_and_annotations() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dash.json");
    fs::write(&input, DASHBOARD).unwrap();
    let output = dir.path().join("manifests.yaml");

    let (_, stderr, success) = run_dashcm(
        dir.path(),
        &[
            "--file.dashboard",
            input.to_str().unwrap(),
            "--file.output",
            output.to_str().unwrap(),
            "--dashboard.name",
            "node-overview",
            "--k8s.namespace",
            "grafana",
            "-a",
            "owner=team-x",
            "-a",
            "grafana_folder=Infra",
        ],
    )
    .unwrap();
    assert!(success, "Command should succeed: stderr={}", stderr);

    let manifest = read_manifest(&output);
    assert_eq!(manifest["metadata"]["name"].as_str(), Some("node-overview"));
    assert_eq!(manifest["metadata"]["namespace"].as_str(), Some("grafana"));
    assert_eq!(
        manifest["metadata"]["annotations"]["owner"].as_str(),
        Some("team-x")
    );
    assert_eq!(
        manifest["metadata"]["annotations"]["grafana_folder"].as_str(),
        Some("Infra")
    );
    assert!(!dir.path().join("dash.yaml").exists());
}

#[test]
fn test_empty_namespace_is_omitted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("dash.json"), DASHBOARD).unwrap();

    let (_, stderr, success) = run_dashcm(dir.path(), &["-f", "dash.json", "-N", ""]).unwrap();
    assert!(success, "Command should succeed: stderr={}", stderr);

    let manifest = read_manifest(&dir.path().join("dash.yaml"));
    assert!(manifest["metadata"].get("namespace").is_none());
}

#[test]
fn test_non_json_input_fails_without_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("dash.txt"), DASHBOARD).unwrap();

    let (_, stderr, success) = run_dashcm(dir.path(), &["-f", "dash.txt"]).unwrap();
    assert!(!success);
    assert!(stderr.contains("is not a json file"), "stderr={}", stderr);

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "no output file should be written");
}

#[test]
fn test_invalid_json_reports_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{\"title\": ").unwrap();

    let (_, stderr, success) = run_dashcm(dir.path(), &["-f", "broken.json"]).unwrap();
    assert!(!success);
    assert!(stderr.contains("broken.json"), "stderr={}", stderr);
    assert!(!dir.path().join("broken.yaml").exists());
}

#[test]
fn test_errors_reach_stderr_with_logging_off() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.json"), "{\"panels\": [").unwrap();

    let (_, stderr, success) =
        run_dashcm_with_log(dir.path(), &["-f", "bad.json"], Some("off")).unwrap();
    assert!(!success);
    assert!(stderr.contains("bad.json"), "stderr={}", stderr);
    assert!(!stderr.contains('\x1b'), "stderr={:?}", stderr);
}

#[test]
fn test_log_output_has_no_ansi_when_piped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("dash.json"), DASHBOARD).unwrap();

    let (_, stderr, success) =
        run_dashcm_with_log(dir.path(), &["-f", "dash.json"], Some("debug")).unwrap();
    assert!(success, "Command should succeed: stderr={}", stderr);
    assert!(stderr.contains("loaded dashboard"), "stderr={}", stderr);
    assert!(!stderr.contains('\x1b'), "stderr={:?}", stderr);
}

#[test]
fn test_missing_input_fails() {
    let dir = tempdir().unwrap();

    let (_, stderr, success) = run_dashcm(dir.path(), &["-f", "absent.json"]).unwrap();
    assert!(!success);
    assert!(stderr.contains("absent.json"), "stderr={}", stderr);
}

#[test]
fn test_quiet_suppresses_stdout() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("dash.json"), DASHBOARD).unwrap();

    let (stdout, _, success) = run_dashcm(dir.path(), &["-f", "dash.json", "--quiet"]).unwrap();
    assert!(success);
    assert!(stdout.is_empty(), "stdout={}", stdout);

    let (stdout, _, success) = run_dashcm(dir.path(), &["-f", "dash.json", "--stats"]).unwrap();
    assert!(success);
    assert!(stdout.contains("ConfigMap: dash"), "stdout={}", stdout);
}
