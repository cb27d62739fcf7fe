use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;

fn wiredash() -> Result<Command> {
    let mut cmd = Command::cargo_bin("wiredash")?;
    // keep the developer's environment out of the run
    cmd.env_remove("WIREDASH_LOG_LEVEL").env_remove("WIREDASH_LOG_DIR");
    Ok(cmd)
}

#[test]
fn call_platform_version_prints_value() -> Result<()> {
    let output = wiredash()?.args(["call", "getPlatformVersion"]).output()?;
    assert!(output.status.success());

    let answer: Value = serde_json::from_slice(&output.stdout)?;
    let value = answer["value"].as_str().expect("value response");
    assert!(value.contains(' '), "expected `<platform> <version>`, got {value}");
    Ok(())
}

#[test]
fn call_unknown_method_prints_not_implemented() -> Result<()> {
    wiredash()?
        .args(["call", "foo", "--arguments", r#"{"ignored": true}"#])
        .assert()
        .success()
        .stdout("\"notImplemented\"\n");
    Ok(())
}

#[test]
fn call_with_broken_arguments_fails() -> Result<()> {
    wiredash()?
        .args(["call", "getPlatformVersion", "--arguments", "{nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--arguments is not valid JSON"));
    Ok(())
}

#[test]
fn methods_lists_platform_version() -> Result<()> {
    wiredash()?
        .arg("methods")
        .assert()
        .success()
        .stdout("getPlatformVersion\n");
    Ok(())
}

#[test]
fn serve_answers_every_line_on_stdout() -> Result<()> {
    let input = concat!(
        "{\"jsonrpc\":\"2.0\",\"method\":\"getPlatformVersion\",\"id\":1}\n",
        "{\"jsonrpc\":\"2.0\",\"method\":\"foo\",\"id\":2}\n",
        "garbage\n",
    );
    let output = wiredash()?.arg("serve").write_stdin(input).output()?;
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], json!(1));
    assert!(lines[0]["result"].is_string());
    assert_eq!(lines[1]["error"]["code"], json!(-32601));
    assert_eq!(lines[2]["error"]["code"], json!(-32700));
    assert_eq!(lines[2]["id"], Value::Null);
    Ok(())
}

#[test]
fn serve_is_the_default_command() -> Result<()> {
    wiredash()?
        .write_stdin("{\"method\":\"getPlatformVersion\",\"id\":\"x\"}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":\"x\""));
    Ok(())
}

#[test]
fn schema_writes_files() -> Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("schemas");
    wiredash()?
        .args(["schema", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("invocation.schema.json"));
    assert!(out.join("method-response.schema.json").is_file());
    Ok(())
}

#[test]
fn log_dir_receives_request_events() -> Result<()> {
    let dir = tempdir()?;
    let logs = dir.path().join("logs");
    wiredash()?
        .args(["call", "getPlatformVersion", "--log-dir"])
        .arg(&logs)
        .assert()
        .success();

    let events: String = std::fs::read_dir(&logs)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("wiredash-events.json"))
        .map(|e| std::fs::read_to_string(e.path()).unwrap_or_default())
        .collect();
    assert!(events.contains("getPlatformVersion"), "events: {events}");
    Ok(())
}

#[test]
fn bad_configured_log_level_aborts_startup() -> Result<()> {
    wiredash()?
        .env("WIREDASH_LOG_LEVEL", "chatty")
        .args(["call", "getPlatformVersion"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WIREDASH_LOG_LEVEL"));
    Ok(())
}
