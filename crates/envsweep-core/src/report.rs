//! Scanner report parsing.
//!
//! The external scanner (gitleaks by default) writes a JSON array of
//! findings. The report is ephemeral: parsed once, then deleted by the
//! orchestrator so stale findings never leak into a later run.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SweepError};

/// One detected secret occurrence, as reported by the scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "RuleID", default)]
    pub rule_id: String,
    #[serde(rename = "File", default)]
    pub file: String,
    #[serde(rename = "Secret", default)]
    pub secret: String,
    #[serde(rename = "StartLine", default)]
    pub start_line: Option<u32>,
    #[serde(rename = "EndLine", default)]
    pub end_line: Option<u32>,
}

impl Finding {
    /// A finding is actionable only with a rule id, a file path, and the
    /// literal secret text. Line numbers are informational.
    pub fn is_actionable(&self) -> bool {
        !self.rule_id.is_empty() && !self.file.is_empty() && !self.secret.is_empty()
    }
}

/// Parse the scanner report at `path`.
///
/// - Missing file → `ReportMissing` (the caller treats this as zero findings).
/// - Invalid JSON → `ReportUnparseable` (the caller must leave the file on
///   disk for manual review).
/// - Findings missing a required field are skipped with a warning, never
///   aborting the parse.
pub fn parse_report(path: &Path) -> Result<Vec<Finding>> {
    if !path.exists() {
        return Err(SweepError::ReportMissing(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(vec![]);
    }
    let findings: Vec<Finding> =
        serde_json::from_str(&content).map_err(|e| SweepError::ReportUnparseable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let (actionable, dropped): (Vec<_>, Vec<_>) =
        findings.into_iter().partition(Finding::is_actionable);
    for finding in &dropped {
        tracing::warn!(
            rule_id = finding.rule_id,
            file = finding.file,
            "skipping finding with missing required fields"
        );
    }
    Ok(actionable)
}
