//! Pipeline configuration.
//!
//! Built once at process start and passed down — nothing below the
//! controller reads ambient flags. An optional `.envsweep.yaml` at the
//! repository root overrides the defaults; CLI flags override the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

pub const CONFIG_FILE: &str = ".envsweep.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    #[default]
    Auto,
    Interactive,
    DryRun,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Auto => write!(f, "auto"),
            RunMode::Interactive => write!(f, "interactive"),
            RunMode::DryRun => write!(f, "dry-run"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Command that writes the scanner report. `{report}` expands to
    /// `report_path`.
    #[serde(default = "default_scanner_command")]
    pub scanner_command: String,

    /// Where the scanner writes its JSON report, relative to the root.
    #[serde(default = "default_report_path")]
    pub report_path: String,

    /// Shared env template that newly synthesized keys are appended to.
    #[serde(default = "default_env_template")]
    pub env_template: String,

    #[serde(default = "default_lint_command")]
    pub lint_command: String,

    #[serde(default = "default_typecheck_command")]
    pub typecheck_command: String,

    /// Static-analysis command. Empty means the stage is not configured
    /// and is skipped.
    #[serde(default)]
    pub analyze_command: String,

    #[serde(default)]
    pub skip_typecheck: bool,

    #[serde(default)]
    pub skip_analyze: bool,

    #[serde(default)]
    pub mode: RunMode,
}

fn default_scanner_command() -> String {
    "gitleaks detect --no-git --report-format json --report-path {report}".to_string()
}

fn default_report_path() -> String {
    "gitleaks-report.json".to_string()
}

fn default_env_template() -> String {
    ".env.example".to_string()
}

fn default_lint_command() -> String {
    "npm run lint:fix".to_string()
}

fn default_typecheck_command() -> String {
    "npm run type-check".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scanner_command: default_scanner_command(),
            report_path: default_report_path(),
            env_template: default_env_template(),
            lint_command: default_lint_command(),
            typecheck_command: default_typecheck_command(),
            analyze_command: String::new(),
            skip_typecheck: false,
            skip_analyze: false,
            mode: RunMode::Auto,
        }
    }
}

impl PipelineConfig {
    /// Load from `.envsweep.yaml` under `root`; an absent file yields the
    /// defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// The scanner command with `{report}` expanded.
    pub fn scanner_invocation(&self) -> String {
        self.scanner_command.replace("{report}", &self.report_path)
    }

    pub fn dry_run(&self) -> bool {
        self.mode == RunMode::DryRun
    }
}
