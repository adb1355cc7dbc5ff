pub mod check;
pub mod remediate;
pub mod run;

use std::io::BufRead;
use std::path::Path;

/// Ask before mutating anything. Interactive confirmation lives at the
/// entry point; nothing in the core ever reads stdin.
pub(crate) fn confirm_apply(root: &Path) -> anyhow::Result<bool> {
    println!(
        "About to rewrite secrets in {}. Continue? [y/N]",
        root.display()
    );
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
