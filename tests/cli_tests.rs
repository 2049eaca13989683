#![allow(clippy::unwrap_used, clippy::expect_used)]
#![cfg(unix)]

mod common;

use common::fixtures::{COLORS_YAML, DUPLICATE_SHAPE_YAML};
use common::stub_bin::{fake_generator, recorded_args};
use common::temp_files::write_file;
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_oapi-lambda-gen"));
    cmd.env("OLR_LOG_LEVEL", "warn").env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_cli_routes_lists_table_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_file(&dir, "colors-api.yaml", COLORS_YAML);

    let output = cli().arg("routes").arg("--spec").arg(&spec).output().expect("run cli");
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "[routes] Colors API 1.2.0 count=7");
    assert_eq!(lines[1], "[route] GET /colors -> getColors (200)");
    assert_eq!(lines[2], "[route] POST /colors -> createColor (201)");
    assert_eq!(lines[7], "[route] GET /users/:userId/colors/:colorId -> getUserColor (200)");
}

#[test]
fn test_cli_match_reports_params_and_misses() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_file(&dir, "colors-api.yaml", COLORS_YAML);

    let output = cli()
        .args(["match", "--spec"])
        .arg(&spec)
        .args(["get", "/users/ann/colors/teal"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "GET /users/ann/colors/teal -> getUserColor\n  userId = ann\n  colorId = teal\n"
    );

    let output = cli()
        .args(["match", "--spec"])
        .arg(&spec)
        .args(["PATCH", "/colors/1"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "PATCH /colors/1 -> no match\n");
}

#[test]
fn test_cli_invoke_from_file_and_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_file(&dir, "colors-api.yaml", COLORS_YAML);
    let event = write_file(&dir, "event.json", r#"{"httpMethod":"GET","path":"/colors/7"}"#);

    let output = cli()
        .args(["invoke", "--spec"])
        .arg(&spec)
        .arg("--event")
        .arg(&event)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let resp: Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(resp["statusCode"], 200);
    assert_eq!(resp["headers"]["Access-Control-Allow-Origin"], "*");

    let mut child = cli()
        .args(["invoke", "--spec"])
        .arg(&spec)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"httpMethod":"DELETE","path":"/nope"}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let resp: Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(resp["statusCode"], 404);
    let body: Value = serde_json::from_str(resp["body"].as_str().unwrap()).unwrap();
    assert_eq!(body["message"], "Route not found: DELETE nope");
}

#[test]
fn test_cli_generate_server_with_stub_generator() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_file(&dir, "colors-api.yaml", COLORS_YAML);
    let generator = fake_generator(dir.path(), 0);

    let status = cli()
        .env("OLR_GENERATOR_BIN", &generator)
        .args(["generate", "server"])
        .arg(&spec)
        .arg("--root")
        .arg(dir.path())
        .status()
        .expect("run cli");
    assert!(status.success());

    let lambda = dir.path().join("generated/server/lambda");
    for file in ["package.json", "tsconfig.json", "index.ts"] {
        assert!(lambda.join(file).exists(), "missing {file}");
    }
    assert!(recorded_args(dir.path()).contains(&"typescript-nestjs".to_string()));
}

#[test]
fn test_cli_generate_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_file(&dir, "colors-api.yaml", COLORS_YAML);
    let generator = fake_generator(dir.path(), 0);
    let config = write_file(
        &dir,
        "olr.yaml",
        &format!(
            "generator_bin: {}\npackage_version: 3.1.4\nskip_validate_spec: false\n",
            generator.display()
        ),
    );

    let status = cli()
        .env_remove("OLR_GENERATOR_BIN")
        .args(["generate", "client"])
        .arg(&spec)
        .arg("--root")
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .status()
        .expect("run cli");
    assert!(status.success());

    let args = recorded_args(dir.path());
    assert!(!args.contains(&"--skip-validate-spec".to_string()));
    assert!(args.iter().any(|a| a.contains(r#""npmVersion":"3.1.4""#)));
    assert!(!dir.path().join("generated/client/lambda").exists());
}

#[test]
fn test_cli_failures_exit_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_file(&dir, "broken.yaml", DUPLICATE_SHAPE_YAML);

    let output = cli().arg("routes").arg("--spec").arg(&broken).output().expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicates"));

    let output = cli()
        .args(["generate", "client"])
        .arg(dir.path().join("missing.yaml"))
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}
