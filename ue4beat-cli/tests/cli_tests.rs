//! Integration tests for the `ue4beat` binary.
//!
//! Runs the built executable with piped stdin/stdout and checks the JSON
//! line stream, exit codes and config-file handling.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const ENV_OVERRIDES: [&str; 4] = [
    "UE4BEAT_GENERAL_LOG_LEVEL",
    "UE4BEAT_GENERAL_LOG_FORMAT",
    "UE4BEAT_OUTPUT_LAYOUT",
    "RUST_LOG",
];

fn run(args: &[&str], stdin: &str) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ue4beat"));
    command
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for key in ENV_OVERRIDES {
        command.env_remove(key);
    }

    let mut child = command.spawn().expect("should spawn ue4beat");
    {
        let mut pipe = child.stdin.take().expect("stdin should be piped");
        // 사용법 에러면 프로세스가 먼저 종료될 수 있으므로 쓰기 실패는 무시
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().expect("should wait for ue4beat")
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8(output.stdout.clone())
        .expect("stdout should be UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect()
}

#[test]
fn test_stream_with_fields() {
    // Given: two server lines and two static fields
    let input = "[2018.09.21-21.44.44:212][  0]LogLinux: Selected Device Profile: [LinuxServer]\n\
                 \x1b[31m[2018.09.21-21.44.45:273][  0]HaxeLog: Error: Runner.hx:234: boom\n";

    // When: running ue4beat
    let output = run(&["-f", "server", "lobby-01", "-f", "port", "7777"], input);

    // Then: one JSON object per line with the fields merged in
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let values = json_lines(&output);
    assert_eq!(values.len(), 2);
    assert_eq!(values[0]["@timestamp"], "2018-09-21T21:44:44.212Z");
    assert_eq!(values[0]["fields.server"], "lobby-01");
    assert_eq!(values[0]["fields.port"], 7777);
    assert_eq!(values[0]["fields.log_line"], 1);
    assert_eq!(values[1]["fields.level"], "error");
    assert_eq!(values[1]["fields.category"], "HaxeLog");
    assert_eq!(values[1]["message"], "Runner.hx:234: boom");
}

#[test]
fn test_empty_input() {
    let output = run(&[], "");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_version_flag() {
    for flag in ["-v", "--version"] {
        let output = run(&[flag], "");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with("ue4beat "), "unexpected version output: {stdout}");
    }
}

#[test]
fn test_help_flag() {
    let output = run(&["--help"], "");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--field"));
}

#[test]
fn test_usage_errors_exit_non_zero() {
    for args in [&["--bogus"][..], &["-f", "only-name"][..]] {
        let output = run(args, "LogA: x\n");
        assert!(!output.status.success(), "args {args:?} should fail");
        assert!(output.stdout.is_empty(), "no line should be processed");
    }
}

#[test]
fn test_non_finite_field_emits_fallback() {
    let output = run(&["-f", "ratio", "NaN"], "one\ntwo\n");
    assert!(output.status.success());
    let values = json_lines(&output);
    assert_eq!(values.len(), 2);
    for (i, value) in values.iter().enumerate() {
        assert_eq!(value["level"], "error");
        assert_eq!(value["message"], "error marshalling to json");
        assert_eq!(value["fields.line"], i as u64 + 1);
    }
}

#[test]
fn test_config_file_fields_and_cli_override() {
    // Given: a config with record layout and a field
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ue4beat.toml");
    std::fs::write(
        &config_path,
        r#"
[output]
layout = "record"

[output.fields]
env = "dev"
"#,
    )
    .expect("should write config");
    let config_arg = config_path.to_str().expect("temp path should be UTF-8");

    // When: the config layout is used as-is
    let record = run(&["--config", config_arg], "LogInit: hello\n");
    assert!(record.status.success());
    let values = json_lines(&record);
    assert_eq!(values[0]["fields.frame"], -1);
    assert!(values[0].get("fields.env").is_none());

    // When: CLI overrides layout and field
    let flat = run(
        &["--config", config_arg, "--layout", "flat", "-f", "env", "prod"],
        "LogInit: hello\n",
    );
    assert!(flat.status.success());
    let values = json_lines(&flat);
    assert_eq!(values[0]["fields.env"], "prod");
    assert!(values[0].get("fields.frame").is_none());
    assert_eq!(values[0]["fields.log_line"], 1);
}

#[test]
fn test_missing_config_file_is_config_error() {
    let output = run(&["--config", "/nonexistent/ue4beat.toml"], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ue4beat:"));
}

#[test]
fn test_invalid_log_level_is_config_error() {
    let output = run(&["--log-level", "loud"], "");
    assert_eq!(output.status.code(), Some(2));
}
