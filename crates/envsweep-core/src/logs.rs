//! Per-stage log files under `.logs/code-quality/`.
//!
//! Each pipeline run gets one timestamped file per stage plus a summary
//! file, so a failing type-check can be inspected after the run without
//! re-executing it.

use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io;

pub const LOG_DIR: &str = ".logs/code-quality";

pub struct RunLogs {
    dir: PathBuf,
    timestamp: String,
}

impl RunLogs {
    /// Create the log directory for a run rooted at `root`.
    pub fn create(root: &Path) -> Result<Self> {
        let dir = root.join(LOG_DIR);
        io::ensure_dir(&dir)?;
        // Colons are not filename-safe everywhere.
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        Ok(Self { dir, timestamp })
    }

    pub fn stage_log_path(&self, stage: &str) -> PathBuf {
        self.dir.join(format!("{stage}-{}.log", self.timestamp))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.stage_log_path("summary")
    }

    /// Append a stage's command and captured output to its log file and to
    /// the summary log.
    pub fn record(&self, stage: &str, command: &str, output: &str) -> Result<()> {
        let entry = format!(
            "=== {stage} ===\nCommand: {command}\n\n--- Output ---\n{output}\n--- End Output ---\n\n"
        );
        io::append_text(&self.stage_log_path(stage), &entry)?;
        io::append_text(&self.summary_path(), &entry)?;
        Ok(())
    }
}
