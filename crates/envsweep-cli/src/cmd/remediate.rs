use envsweep_core::config::{PipelineConfig, RunMode};
use envsweep_core::remediate::Remediator;
use std::path::Path;

use crate::output::print_json;

pub fn run(root: &Path, config: &PipelineConfig, json: bool) -> anyhow::Result<()> {
    if config.mode == RunMode::Interactive && !super::confirm_apply(root)? {
        println!("aborted, nothing changed");
        return Ok(());
    }

    let summary = Remediator::new(root, config).run()?;

    if json {
        print_json(&summary)?;
        return Ok(());
    }

    println!(
        "{} findings, {} rewritten, {} skipped, {} warnings",
        summary.findings, summary.rewritten, summary.skipped, summary.warnings
    );
    if !summary.keys.is_empty() {
        let verb = if config.dry_run() {
            "would register"
        } else {
            "registered"
        };
        println!("\n{verb} in {}:", config.env_template);
        for key in &summary.keys {
            println!("  {key}");
        }
    }
    if summary.report_kept && !config.dry_run() {
        println!(
            "\nwarning: report left at {} for manual review",
            config.report_path
        );
    }
    Ok(())
}
