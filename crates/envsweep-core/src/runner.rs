//! Shell subprocess execution for external tools.
//!
//! Every external tool the pipeline touches (secret scanner, linter,
//! type-checker, static analyzer) goes through `run_shell` so the
//! orchestrator and controller never hard-code an invocation shape.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, SweepError};

/// Captured result of one subprocess invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout and stderr joined for log files; either side may be empty.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }
}

/// Run `command` through `sh -c` in `cwd`, blocking until it exits.
///
/// With `allow_failure = true` a non-zero exit is returned to the caller as
/// data; with `allow_failure = false` it becomes `CommandFailed` carrying the
/// captured stderr. No retries either way — the caller decides what failure
/// means.
pub fn run_shell(command: &str, cwd: &Path, allow_failure: bool) -> Result<CommandOutput> {
    if command.trim().is_empty() {
        return Err(SweepError::EmptyCommand);
    }

    tracing::debug!(command, cwd = %cwd.display(), "spawning");

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Read stdout/stderr in dedicated threads to avoid pipe-buffer deadlocks
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> String {
        let mut buf = String::new();
        if let Some(mut r) = stdout_handle {
            use std::io::Read;
            let _ = r.read_to_string(&mut buf);
        }
        buf
    });
    let stderr_thread = std::thread::spawn(move || -> String {
        let mut buf = String::new();
        if let Some(mut r) = stderr_handle {
            use std::io::Read;
            let _ = r.read_to_string(&mut buf);
        }
        buf
    });

    let status = child.wait()?;
    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();
    let exit_code = status.code().unwrap_or(-1);

    if exit_code != 0 && !allow_failure {
        return Err(SweepError::CommandFailed {
            command: command.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code,
    })
}
