//! Pipeline controller.
//!
//! Runs remediation first, then each quality tool in a fixed order. Every
//! stage is fail-soft: its result is recorded and the next stage always
//! runs, so one invocation surfaces every category of problem at once. The
//! aggregate fails when any stage failed.

use serde::Serialize;
use std::path::Path;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::logs::RunLogs;
use crate::remediate::{RemediationSummary, Remediator};
use crate::runner;

#[derive(Debug, Clone, Serialize)]
pub struct StageStatus {
    pub stage: String,
    pub passed: bool,
    pub skipped: bool,
    pub detail: String,
    pub duration_ms: u64,
}

impl StageStatus {
    fn skipped(stage: &str, reason: &str) -> Self {
        Self {
            stage: stage.to_string(),
            passed: true,
            skipped: true,
            detail: reason.to_string(),
            duration_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub stages: Vec<StageStatus>,
    pub passed: bool,
    pub remediation: Option<RemediationSummary>,
}

/// Run the full pipeline rooted at `root`.
///
/// The only fatal errors are pre-flight ones (an unwritable log directory);
/// everything after the first stage starts is captured in the report.
pub fn run_pipeline(root: &Path, config: &PipelineConfig) -> Result<PipelineReport> {
    let logs = RunLogs::create(root)?;
    let mut stages = Vec::new();

    // Stage 1: secret remediation.
    let start = Instant::now();
    let remediation = match Remediator::new(root, config).run() {
        Ok(summary) => {
            let detail = format!(
                "{} findings, {} rewritten, {} skipped, {} warnings{}",
                summary.findings,
                summary.rewritten,
                summary.skipped,
                summary.warnings,
                if summary.report_kept {
                    " (report kept for review)"
                } else {
                    ""
                }
            );
            record_stage(&logs, "remediate", &config.scanner_invocation(), &detail);
            stages.push(StageStatus {
                stage: "remediate".to_string(),
                passed: true,
                skipped: false,
                detail,
                duration_ms: start.elapsed().as_millis() as u64,
            });
            Some(summary)
        }
        Err(e) => {
            tracing::warn!(error = %e, "remediation stage failed");
            record_stage(&logs, "remediate", &config.scanner_invocation(), &e.to_string());
            stages.push(StageStatus {
                stage: "remediate".to_string(),
                passed: false,
                skipped: false,
                detail: e.to_string(),
                duration_ms: start.elapsed().as_millis() as u64,
            });
            None
        }
    };

    // Quality tools. Dry-run stops at reporting: lint-fix mutates files.
    if config.dry_run() {
        stages.push(StageStatus::skipped("lint", "dry-run"));
        stages.push(StageStatus::skipped("type-check", "dry-run"));
        stages.push(StageStatus::skipped("analyze", "dry-run"));
    } else {
        stages.push(run_tool_stage(root, &logs, "lint", &config.lint_command));

        if config.skip_typecheck {
            stages.push(StageStatus::skipped("type-check", "skipped by flag"));
        } else {
            stages.push(run_tool_stage(root, &logs, "type-check", &config.typecheck_command));
        }

        if config.skip_analyze {
            stages.push(StageStatus::skipped("analyze", "skipped by flag"));
        } else if config.analyze_command.trim().is_empty() {
            stages.push(StageStatus::skipped("analyze", "no command configured"));
        } else {
            stages.push(run_tool_stage(root, &logs, "analyze", &config.analyze_command));
        }
    }

    let passed = stages.iter().all(|s| s.passed);
    Ok(PipelineReport {
        stages,
        passed,
        remediation,
    })
}

/// Record a stage's output, tolerating log-write failures. Once the pipeline
/// is underway only stage results matter; a log that cannot be written must
/// not stop the remaining stages.
fn record_stage(logs: &RunLogs, stage: &str, command: &str, body: &str) {
    if let Err(e) = logs.record(stage, command, body) {
        tracing::warn!(stage, error = %e, "could not write stage log");
    }
}

/// Run one external quality tool with failure tolerated, recording its full
/// output to the run logs. Even a spawn failure is folded into a failed
/// stage rather than aborting the pipeline.
fn run_tool_stage(root: &Path, logs: &RunLogs, stage: &str, command: &str) -> StageStatus {
    let start = Instant::now();
    match runner::run_shell(command, root, true) {
        Ok(output) => {
            record_stage(logs, stage, command, &output.combined());
            let passed = output.success();
            if !passed {
                tracing::warn!(stage, exit_code = output.exit_code, "stage failed");
            }
            StageStatus {
                stage: stage.to_string(),
                passed,
                skipped: false,
                detail: format!("exit {}", output.exit_code),
                duration_ms: start.elapsed().as_millis() as u64,
            }
        }
        Err(e) => {
            tracing::warn!(stage, error = %e, "stage could not run");
            record_stage(logs, stage, command, &e.to_string());
            StageStatus {
                stage: stage.to_string(),
                passed: false,
                skipped: false,
                detail: e.to_string(),
                duration_ms: start.elapsed().as_millis() as u64,
            }
        }
    }
}
