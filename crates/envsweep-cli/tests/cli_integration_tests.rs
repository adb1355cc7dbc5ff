use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn envsweep() -> Command {
    Command::cargo_bin("envsweep").unwrap()
}

/// Config that never invokes real tools: the scanner is `true` (tests seed
/// the report themselves) and all quality stages succeed trivially.
fn write_quiet_config(dir: &TempDir) {
    std::fs::write(
        dir.path().join(".envsweep.yaml"),
        "scanner_command: \"true\"\nlint_command: \"true\"\ntypecheck_command: \"true\"\n",
    )
    .unwrap();
}

fn seed_finding(dir: &TempDir) {
    std::fs::write(
        dir.path().join("config.ts"),
        "const key = \"sk_live_ABC123\";\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("gitleaks-report.json"),
        r#"[{"RuleID":"stripe-key","File":"config.ts","Secret":"sk_live_ABC123","StartLine":1,"EndLine":1}]"#,
    )
    .unwrap();
}

#[test]
fn run_passes_on_clean_repo() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remediate"))
        .stdout(predicate::str::contains("pass"));
}

#[test]
fn run_rewrites_secret_and_updates_template() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);
    seed_finding(&dir);

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run"])
        .assert()
        .success();

    let source = std::fs::read_to_string(dir.path().join("config.ts")).unwrap();
    assert_eq!(source, "const key = process.env.STRIPE_KEY_CONFIG_TS;\n");

    let template = std::fs::read_to_string(dir.path().join(".env.example")).unwrap();
    assert_eq!(template, "STRIPE_KEY_CONFIG_TS=\n");

    // The report was consumed.
    assert!(!dir.path().join("gitleaks-report.json").exists());
}

#[test]
fn second_run_changes_nothing() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);
    seed_finding(&dir);

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run"])
        .assert()
        .success();
    let source = std::fs::read_to_string(dir.path().join("config.ts")).unwrap();
    let template = std::fs::read_to_string(dir.path().join(".env.example")).unwrap();

    // Scanner reports the same finding again.
    std::fs::write(
        dir.path().join("gitleaks-report.json"),
        r#"[{"RuleID":"stripe-key","File":"config.ts","Secret":"sk_live_ABC123"}]"#,
    )
    .unwrap();
    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("config.ts")).unwrap(),
        source
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".env.example")).unwrap(),
        template
    );
}

#[test]
fn failing_stage_fails_the_run_but_all_stages_execute() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".envsweep.yaml"),
        "scanner_command: \"true\"\nlint_command: \"false\"\ntypecheck_command: \"true\"\nanalyze_command: \"echo analyzed\"\n",
    )
    .unwrap();

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"))
        .stdout(predicate::str::contains("analyze"))
        .stderr(predicate::str::contains("stage(s) failed: lint"));
}

#[test]
fn dry_run_leaves_everything_untouched() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);
    seed_finding(&dir);

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run", "--dry-run"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("config.ts")).unwrap(),
        "const key = \"sk_live_ABC123\";\n"
    );
    assert!(!dir.path().join(".env.example").exists());
    assert!(dir.path().join("gitleaks-report.json").exists());
}

#[test]
fn unparseable_report_is_kept_and_surfaced() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);
    std::fs::write(dir.path().join("gitleaks-report.json"), "{ broken").unwrap();

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "remediate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manual review"));

    assert!(dir.path().join("gitleaks-report.json").exists());
}

#[test]
fn remediate_reports_registered_keys() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);
    seed_finding(&dir);

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "remediate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STRIPE_KEY_CONFIG_TS"));
}

#[test]
fn json_output_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);

    let output = envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "--json", "run"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], serde_json::Value::Bool(true));
    assert!(report["stages"].as_array().unwrap().len() >= 3);
}

#[test]
fn check_fails_when_scanner_is_missing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".envsweep.yaml"),
        "scanner_command: definitely-not-a-real-binary-xyz detect\n",
    )
    .unwrap();

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("NOT FOUND"))
        .stderr(predicate::str::contains("scanner binary not found"));
}

#[test]
fn check_passes_with_available_scanner() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".envsweep.yaml"), "scanner_command: \"sh -c true\"\n").unwrap();

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "check"])
        .assert()
        .success();
}

#[test]
fn broken_config_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".envsweep.yaml"), "mode: [unclosed").unwrap();

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn interactive_mode_aborts_without_confirmation() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);
    seed_finding(&dir);

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run", "--interactive"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("aborted"));

    // Nothing changed.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("config.ts")).unwrap(),
        "const key = \"sk_live_ABC123\";\n"
    );
}

#[test]
fn interactive_remediate_aborts_without_confirmation() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);
    seed_finding(&dir);

    envsweep()
        .args([
            "--root",
            dir.path().to_str().unwrap(),
            "remediate",
            "--interactive",
        ])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("aborted"));

    // Declining the prompt leaves the source untouched.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("config.ts")).unwrap(),
        "const key = \"sk_live_ABC123\";\n"
    );
    assert!(!dir.path().join(".env.example").exists());
}

#[test]
fn stage_logs_are_written_under_logs_dir() {
    let dir = TempDir::new().unwrap();
    write_quiet_config(&dir);

    envsweep()
        .args(["--root", dir.path().to_str().unwrap(), "run"])
        .assert()
        .success();

    let log_dir = dir.path().join(".logs/code-quality");
    assert!(log_dir.is_dir());
    let names: Vec<String> = std::fs::read_dir(&log_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("summary-")));
}
