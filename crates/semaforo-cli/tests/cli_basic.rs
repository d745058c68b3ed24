//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and verify
//! outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(config_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_semaforo"))
        .args(args)
        .env("SEMAFORO_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("Failed to parse JSON line"))
        .collect()
}

#[test]
fn test_presets_lists_every_modality() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["presets"]);
    assert_eq!(code, 0, "presets failed");

    let presets: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(presets["protocolo"]["green"], 7);
    assert_eq!(presets["informe"]["qa"], 6);
    assert_eq!(presets["custom"]["green"], 5);
}

#[test]
fn test_plan_json_for_preset() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["plan", "--modality", "informe", "--json"]);
    assert_eq!(code, 0, "plan failed");

    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["modality"], "informe");
    let phases = plan["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 6);
    assert_eq!(phases[3]["phase"], "warning");
    assert_eq!(phases[3]["seconds"], 10);
    assert_eq!(phases[5]["seconds"], 230);
    assert_eq!(plan["total_secs"], 7 * 60 + 2 * 60 + 60 + 10 + 6 * 60 + 230);
}

#[test]
fn test_plan_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["plan", "--green", "1", "--handoff", "0"]);
    assert_eq!(code, 0, "plan failed");
    assert!(stdout.contains("Custom presentation"));
    assert!(stdout.contains("Team change"));
    assert!(stdout.contains("1:00"));
}

#[test]
fn test_simulate_walks_the_phase_chain() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["simulate", "--green", "1", "--yellow", "1", "--red", "1", "--qa", "1", "--handoff", "1"],
    );
    assert_eq!(code, 0, "simulate failed");

    let lines = json_lines(&stdout);
    let types: Vec<&str> = lines
        .iter()
        .filter_map(|v| v["type"].as_str())
        .collect();
    assert_eq!(
        types,
        vec![
            "timer_started",
            "phase_changed",
            "phase_changed",
            "phase_changed",
            "phase_changed",
            "phase_changed",
            "phase_changed",
            "finished",
        ]
    );
    assert_eq!(lines[5]["to"], "handoff");
    assert_eq!(lines[5]["duration_secs"], 50);
    assert_eq!(lines[6]["from"], "handoff");
    assert_eq!(lines[6]["to"], "finished");

    let last = lines.last().unwrap();
    assert_eq!(last["phase"], "finished");
    assert_eq!(last["running"], false);
    assert_eq!(last["display"], "0:00");
}

#[test]
fn test_simulate_clamps_negative_durations() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["simulate", "--green", "-4", "--yellow", "0", "--red", "0", "--qa", "0", "--handoff", "0"],
    );
    assert_eq!(code, 0, "simulate failed");
    let lines = json_lines(&stdout);
    assert_eq!(lines[0]["duration_secs"], 0);
    // Empty phases are passed through on start; only the warning counts down.
    assert_eq!(lines[3]["to"], "warning");
    assert_eq!(lines.last().unwrap()["phase"], "finished");
}

#[test]
fn test_unknown_modality_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["plan", "--modality", "defensa"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("defensa"));
}

#[test]
fn test_config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "set", "presets.protocolo.green", "9"]);
    assert_eq!(code, 0, "config set failed");
    assert!(stdout.contains("ok"));

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "presets.protocolo.green"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "9");

    let (_, stdout, _) = run_cli(dir.path(), &["plan", "--modality", "protocolo", "--json"]);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["phases"][0]["seconds"], 9 * 60);
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "presets.defensa.green", "3"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_reset_restores_defaults() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "sound.enabled", "false"]);
    let (code, _, _) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "sound.enabled"]);
    assert_eq!(stdout.trim(), "true");
}
