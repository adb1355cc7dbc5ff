//! Env-template registration.
//!
//! The template file (`.env.example` by default) is the shared listing of
//! keys a deployment must provide. This module only ever appends `KEY=`
//! placeholder lines — existing keys and their values are never altered.

use std::path::Path;

use crate::error::Result;
use crate::io;

/// Ensure `key` appears in the template, appending `KEY=` with an empty
/// placeholder value if absent. Returns `Ok(true)` if a line was appended.
/// Idempotent: a second call with the same key changes nothing.
pub fn ensure_key(template_path: &Path, key: &str) -> Result<bool> {
    let existing = if template_path.exists() {
        std::fs::read_to_string(template_path)?
    } else {
        String::new()
    };

    let prefix = format!("{key}=");
    if existing.lines().any(|l| l.trim_start().starts_with(&prefix)) {
        return Ok(false);
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&prefix);
    updated.push('\n');
    io::atomic_write(template_path, updated.as_bytes())?;
    Ok(true)
}
