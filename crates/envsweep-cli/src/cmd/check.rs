use envsweep_core::config::PipelineConfig;
use envsweep_core::remediate::Remediator;
use serde::Serialize;
use std::path::Path;

use crate::output::{print_json, print_settings};

#[derive(Serialize)]
struct CheckReport {
    scanner_command: String,
    scanner_binary: Option<String>,
    report_path: String,
    env_template: String,
    lint_command: String,
    typecheck_command: String,
    analyze_command: String,
    ok: bool,
}

/// Pre-flight check: is the configuration usable before any stage starts?
pub fn run(root: &Path, config: &PipelineConfig, json: bool) -> anyhow::Result<()> {
    let scanner_binary = Remediator::new(root, config)
        .scanner_binary()
        .map(|p| p.display().to_string());

    let report = CheckReport {
        scanner_command: config.scanner_invocation(),
        scanner_binary: scanner_binary.as_ref().ok().cloned(),
        report_path: config.report_path.clone(),
        env_template: config.env_template.clone(),
        lint_command: config.lint_command.clone(),
        typecheck_command: config.typecheck_command.clone(),
        analyze_command: config.analyze_command.clone(),
        ok: scanner_binary.is_ok(),
    };

    if json {
        print_json(&report)?;
    } else {
        print_settings(&[
            ("scanner", report.scanner_command.clone()),
            (
                "scanner binary",
                report
                    .scanner_binary
                    .clone()
                    .unwrap_or_else(|| "NOT FOUND".into()),
            ),
            ("report path", report.report_path.clone()),
            ("env template", report.env_template.clone()),
            ("lint", report.lint_command.clone()),
            ("type-check", report.typecheck_command.clone()),
            (
                "analyze",
                if report.analyze_command.is_empty() {
                    "(not configured)".into()
                } else {
                    report.analyze_command.clone()
                },
            ),
        ]);
    }

    if let Err(e) = scanner_binary {
        anyhow::bail!(e);
    }
    Ok(())
}
