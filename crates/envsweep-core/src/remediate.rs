//! Secret remediation orchestration.
//!
//! One run moves through three phases: **scanning** (invoke the external
//! scanner, which writes the report file), **processing** (classify →
//! synthesize → rewrite → register, per finding), and **done** (consume the
//! report). A failure on one finding is logged and never blocks the rest —
//! partial remediation is acceptable, silent corruption is not.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::envkey::EnvKey;
use crate::error::{Result, SweepError};
use crate::report;
use crate::rewrite;
use crate::runner;
use crate::template;
use crate::visibility::{self, Visibility};

/// Visibility decision hook. Injected so the path heuristic can be replaced
/// without touching rewrite logic.
pub type ClassifierFn = fn(&str) -> Visibility;

/// What one remediation run did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemediationSummary {
    pub findings: usize,
    pub rewritten: usize,
    pub skipped: usize,
    pub warnings: usize,
    /// True when an unparseable report was left on disk for manual review.
    pub report_kept: bool,
    /// Env keys registered (or, in dry-run mode, that would be registered).
    pub keys: Vec<String>,
}

pub struct Remediator<'a> {
    root: &'a Path,
    config: &'a PipelineConfig,
    classifier: ClassifierFn,
}

impl<'a> Remediator<'a> {
    pub fn new(root: &'a Path, config: &'a PipelineConfig) -> Self {
        Self {
            root,
            config,
            classifier: visibility::classify,
        }
    }

    pub fn with_classifier(mut self, classifier: ClassifierFn) -> Self {
        self.classifier = classifier;
        self
    }

    /// Resolve the scanner binary (the first token of the scanner command).
    /// Used as a pre-flight check so a missing scanner surfaces as a clear
    /// error instead of a shell exit 127 buried in a log.
    pub fn scanner_binary(&self) -> Result<PathBuf> {
        let bin = self
            .config
            .scanner_command
            .split_whitespace()
            .next()
            .ok_or(SweepError::EmptyCommand)?;
        which::which(bin).map_err(|_| SweepError::ScannerNotFound(bin.to_string()))
    }

    /// Run the full scan → process → done cycle.
    pub fn run(&self) -> Result<RemediationSummary> {
        // Scanning. The scanner's own exit code signals "secrets found",
        // not tool failure, so it is always tolerated.
        tracing::debug!(command = self.config.scanner_invocation(), "scanning");
        let scan = runner::run_shell(&self.config.scanner_invocation(), self.root, true)?;
        if !scan.success() {
            tracing::debug!(exit_code = scan.exit_code, "scanner exited non-zero");
        }

        self.process_report()
    }

    /// Process an existing report without invoking the scanner. Also the
    /// second half of `run`.
    pub fn process_report(&self) -> Result<RemediationSummary> {
        let report_path = self.root.join(&self.config.report_path);
        let mut summary = RemediationSummary::default();

        let findings = match report::parse_report(&report_path) {
            Ok(findings) => findings,
            Err(SweepError::ReportMissing(_)) => {
                tracing::debug!("no scanner report, nothing to remediate");
                return Ok(summary);
            }
            Err(SweepError::ReportUnparseable { path, reason }) => {
                tracing::warn!(path, reason, "report unparseable, left on disk for review");
                summary.report_kept = true;
                summary.warnings += 1;
                return Ok(summary);
            }
            Err(e) => return Err(e),
        };

        summary.findings = findings.len();
        for finding in &findings {
            self.apply_finding(&finding.file, &finding.secret, &finding.rule_id, &mut summary);
        }

        if self.config.dry_run() {
            summary.report_kept = report_path.exists();
        } else if report_path.exists() {
            std::fs::remove_file(&report_path)?;
        }
        Ok(summary)
    }

    fn apply_finding(&self, file: &str, secret: &str, rule_id: &str, summary: &mut RemediationSummary) {
        let file_path = self.root.join(file);
        if !file_path.is_file() {
            tracing::warn!(file, "finding references a missing file, skipping");
            summary.skipped += 1;
            return;
        }

        let vis = (self.classifier)(file);
        let key = EnvKey::synthesize(rule_id, file, vis).key();

        if self.config.dry_run() {
            match std::fs::read_to_string(&file_path) {
                Ok(content) if content.contains(secret) => {
                    tracing::info!(file, key, visibility = %vis, "would rewrite");
                    summary.rewritten += 1;
                    summary.keys.push(key);
                }
                Ok(_) => summary.skipped += 1,
                Err(e) => {
                    tracing::warn!(file, error = %e, "read failed, skipping finding");
                    summary.warnings += 1;
                }
            }
            return;
        }

        match rewrite::rewrite_secret(&file_path, secret, &key) {
            Ok(true) => {
                tracing::info!(file, key, visibility = %vis, "rewrote secret");
                summary.rewritten += 1;
                let template_path = self.root.join(&self.config.env_template);
                if let Err(e) = template::ensure_key(&template_path, &key) {
                    tracing::warn!(key, error = %e, "failed to register key in env template");
                    summary.warnings += 1;
                }
                summary.keys.push(key);
            }
            Ok(false) => {
                // Already remediated or the scanner's finding is stale.
                tracing::debug!(file, "secret not present, skipping");
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::warn!(file, error = %e, "rewrite failed, skipping finding");
                summary.warnings += 1;
            }
        }
    }
}
