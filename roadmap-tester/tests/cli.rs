use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "roadmap-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_roadmap-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("drawer-dismiss"));
}

#[test]
fn cli_runs_all_scenarios_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_roadmap-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args(["--scenarios", "all", "--report", "json", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let content = std::fs::read_to_string(output_path).expect("read report");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let results = report.as_array().expect("array of results");
    assert!(results.len() >= 10);
    assert!(results.iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_rejects_unknown_scenarios() {
    let exe = env!("CARGO_BIN_EXE_roadmap-tester");
    let output = Command::new(exe)
        .args(["--scenarios", "no-such-scenario"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown scenario"));
}

#[test]
fn cli_check_config_accepts_partial_documents() {
    let exe = env!("CARGO_BIN_EXE_roadmap-tester");
    let path = temp_path("config-ok");
    std::fs::write(&path, r#"{ "nav_threshold": 0.25, "log_level": "debug" }"#)
        .expect("write config");
    let output = Command::new(exe)
        .arg("--check-config")
        .arg(&path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nav threshold 0.25"));
}

#[test]
fn cli_check_config_rejects_invalid_documents() {
    let exe = env!("CARGO_BIN_EXE_roadmap-tester");
    let path = temp_path("config-bad");
    std::fs::write(&path, r#"{ "log_level": "chatty" }"#).expect("write config");
    let output = Command::new(exe)
        .arg("--check-config")
        .arg(&path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid roadmap configuration"));
}
