//! Literal secret replacement in source files.
//!
//! The only module allowed to mutate tracked source files. Replacement is
//! literal substring substitution — never pattern-based — so unrelated code
//! cannot be corrupted by an overly broad match.

use std::path::Path;

use crate::error::Result;
use crate::io;

/// Build the env-variable reference that replaces a secret literal.
pub fn env_reference(key: &str) -> String {
    format!("process.env.{key}")
}

/// Replace every literal occurrence of `secret` in the file with a
/// `process.env.<key>` reference. Returns `Ok(true)` if the file was
/// modified.
///
/// Quoted occurrences (`"s"`, `'s'`, `` `s` ``) are replaced including their
/// quotes, so `const k = "sk_live_X";` becomes `const k = process.env.KEY;`
/// — an expression, not a string containing the reference. Remaining bare
/// occurrences are replaced verbatim.
///
/// If the secret is no longer present (a prior run already fixed it, or the
/// scanner's finding is stale) nothing is written and `Ok(false)` is
/// returned. The write is atomic: the file is either fully rewritten or
/// untouched.
pub fn rewrite_secret(path: &Path, secret: &str, key: &str) -> Result<bool> {
    let content = std::fs::read_to_string(path)?;
    if secret.is_empty() || !content.contains(secret) {
        return Ok(false);
    }

    let reference = env_reference(key);
    let mut updated = content.clone();
    for quote in ['"', '\'', '`'] {
        let quoted = format!("{quote}{secret}{quote}");
        updated = updated.replace(&quoted, &reference);
    }
    updated = updated.replace(secret, &reference);

    if updated == content {
        return Ok(false);
    }
    io::atomic_write(path, updated.as_bytes())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.ts");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn quoted_secret_becomes_expression() {
        let dir = TempDir::new().unwrap();
        let path = source_file(&dir, "const key = \"sk_live_ABC123\";\n");
        let changed = rewrite_secret(&path, "sk_live_ABC123", "STRIPE_KEY_CONFIG_TS").unwrap();
        assert!(changed);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "const key = process.env.STRIPE_KEY_CONFIG_TS;\n"
        );
    }

    #[test]
    fn single_quoted_secret_replaced() {
        let dir = TempDir::new().unwrap();
        let path = source_file(&dir, "const t = 'ghp_token99';\n");
        rewrite_secret(&path, "ghp_token99", "GITHUB_PAT_CONFIG_TS").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "const t = process.env.GITHUB_PAT_CONFIG_TS;\n"
        );
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = source_file(
            &dir,
            "const a = \"tok_1\";\nconst b = `tok_1`;\nlog(\"prefix tok_1 suffix\");\n",
        );
        rewrite_secret(&path, "tok_1", "API_TOKEN_CONFIG_TS").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("tok_1"));
        assert_eq!(content.matches("process.env.API_TOKEN_CONFIG_TS").count(), 3);
    }

    #[test]
    fn bare_occurrence_inside_string_is_spliced() {
        let dir = TempDir::new().unwrap();
        let path = source_file(&dir, "const url = \"https://api.x.com?key=tok_2&v=1\";\n");
        rewrite_secret(&path, "tok_2", "API_TOKEN_CONFIG_TS").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("key=process.env.API_TOKEN_CONFIG_TS&v=1"));
    }

    #[test]
    fn absent_secret_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = source_file(&dir, "const key = process.env.ALREADY_FIXED;\n");
        let changed = rewrite_secret(&path, "sk_live_gone", "K").unwrap();
        assert!(!changed);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "const key = process.env.ALREADY_FIXED;\n"
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = source_file(&dir, "const key = \"sk_live_ABC123\";\n");
        assert!(rewrite_secret(&path, "sk_live_ABC123", "STRIPE_KEY_CONFIG_TS").unwrap());
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(!rewrite_secret(&path, "sk_live_ABC123", "STRIPE_KEY_CONFIG_TS").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = rewrite_secret(&dir.path().join("gone.ts"), "s", "K");
        assert!(result.is_err());
    }

    #[test]
    fn empty_secret_never_rewrites() {
        let dir = TempDir::new().unwrap();
        let path = source_file(&dir, "const a = 1;\n");
        assert!(!rewrite_secret(&path, "", "K").unwrap());
    }
}
