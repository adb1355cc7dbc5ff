//! Rendering of pipeline results for the terminal.

use envsweep_core::pipeline::StageStatus;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Skipped stages render as "skip" rather than a pass/fail verdict: a stage
/// that never ran carries no signal about the code.
pub fn status_label(stage: &StageStatus) -> &'static str {
    if stage.skipped {
        "skip"
    } else if stage.passed {
        "pass"
    } else {
        "FAIL"
    }
}

/// Aligned stage table. Detail goes last so free-form tool output never
/// shifts the fixed columns.
pub fn print_stage_table(stages: &[StageStatus]) {
    let name_width = stages
        .iter()
        .map(|s| s.stage.len())
        .max()
        .unwrap_or(0)
        .max("STAGE".len());

    println!("{:name_width$}  {:6}  {:>10}  DETAIL", "STAGE", "STATUS", "DURATION");
    for stage in stages {
        println!(
            "{:name_width$}  {:6}  {:>8}ms  {}",
            stage.stage,
            status_label(stage),
            stage.duration_ms,
            stage.detail
        );
    }
}

/// Two-column key/value listing for the pre-flight check.
pub fn print_settings(rows: &[(&str, String)]) {
    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in rows {
        println!("{key:key_width$}  {value}");
    }
}
