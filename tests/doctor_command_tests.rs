use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary run in an empty directory with no inherited Supabase variables
fn isolated(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mylifepictures").unwrap();
    cmd.current_dir(dir.path()).env_clear();
    cmd
}

#[test]
fn test_doctor_help() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .arg("doctor")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Run the Supabase configuration checks",
        ))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_no_subcommand_shows_getting_started() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("mylifepictures doctor"))
        .stdout(predicate::str::contains("mylifepictures instructions"));
}

#[test]
fn test_doctor_without_key_stops_after_environment_check() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .arg("doctor")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("🩺 MYLIFEPICTURES DOCTOR"))
        .stdout(predicate::str::contains(
            "❌ Environment Variables: Missing Supabase API key environment variable",
        ))
        .stdout(predicate::str::contains("Connection Test").not())
        .stdout(predicate::str::contains("Total checks: 1"))
        .stdout(predicate::str::contains("Configuration Required"));
}

#[test]
fn test_doctor_placeholder_key_from_env_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "VITE_SUPABASE_URL=https://demo.supabase.co\nVITE_SUPABASE_ANON_KEY=your-anon-key-here\n",
    )
    .unwrap();

    isolated(&dir)
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("placeholder value"))
        .stdout(predicate::str::contains("URL: https://demo.supabase.co"));
}

#[test]
fn test_doctor_json_output() {
    let dir = TempDir::new().unwrap();

    let output = isolated(&dir)
        .arg("doctor")
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(parsed["summary"]["total_checks"], 1);
    assert_eq!(parsed["summary"]["failed"], 1);
    assert_eq!(parsed["halted_early"], true);
    assert_eq!(parsed["ready"], false);
    assert_eq!(parsed["results"][0]["name"], "Environment Variables");
    assert_eq!(parsed["results"][0]["status"], "error");
    assert_eq!(parsed["environment"]["has_key"], false);
    // The key itself never leaves the process
    assert!(parsed["environment"].get("key").is_none());
}

#[test]
fn test_instructions_stdout_is_stable() {
    let dir = TempDir::new().unwrap();

    let first = isolated(&dir)
        .args(["instructions", "--stdout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let second = isolated(&dir)
        .args(["instructions", "--stdout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(first, second);
    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("# Supabase Setup Instructions for MyLifePictures.ai"));
    assert!(text.contains("VITE_SUPABASE_URL=https://zvxnsjsltabvsfwatqox.supabase.co"));
    assert!(text.contains("/project/zvxnsjsltabvsfwatqox/storage/buckets"));
}

#[test]
fn test_instructions_use_configured_default_url() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("mylifepictures.toml"),
        "[supabase]\ndefault_url = \"https://abcdefgh.supabase.co\"\n",
    )
    .unwrap();

    isolated(&dir)
        .args(["instructions", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "VITE_SUPABASE_URL=https://abcdefgh.supabase.co",
        ));
}

#[test]
fn test_status_reports_detected_variables() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .env("NEXT_PUBLIC_SUPABASE_URL", "https://demo.supabase.co")
        .env("NEXT_PUBLIC_SUPABASE_ANON_KEY", "eyJhbGciOiJIUzI1NiIsInR5cCI6")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("   Source: NEXT_PUBLIC_ variables"))
        .stdout(predicate::str::contains("   Key: eyJhbGciOiJIUzI..."))
        .stdout(predicate::str::contains("Ready to Use"));
}
