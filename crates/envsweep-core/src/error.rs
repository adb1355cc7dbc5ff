use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("scanner report not found: {0}")]
    ReportMissing(String),

    #[error("scanner report is not valid JSON: {path}: {reason}")]
    ReportUnparseable { path: String, reason: String },

    #[error("command failed: {command}: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("command is empty")]
    EmptyCommand,

    #[error("invalid environment key '{0}': must be letters, digits, and underscores")]
    InvalidKey(String),

    #[error("scanner binary not found: {0}")]
    ScannerNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;
