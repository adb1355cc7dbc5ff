use envsweep_core::config::{PipelineConfig, RunMode};
use envsweep_core::pipeline;
use std::path::Path;

use crate::output::{print_json, print_stage_table};

pub fn run(root: &Path, config: &PipelineConfig, json: bool) -> anyhow::Result<()> {
    if config.mode == RunMode::Interactive && !super::confirm_apply(root)? {
        println!("aborted, nothing changed");
        return Ok(());
    }

    let report = pipeline::run_pipeline(root, config)?;

    if json {
        print_json(&report)?;
    } else {
        print_stage_table(&report.stages);
    }

    let failed: Vec<&str> = report
        .stages
        .iter()
        .filter(|s| !s.passed)
        .map(|s| s.stage.as_str())
        .collect();
    if !failed.is_empty() {
        anyhow::bail!("{} stage(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}
