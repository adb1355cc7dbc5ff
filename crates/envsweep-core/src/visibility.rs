//! Client/server visibility heuristic.
//!
//! A secret referenced from browser-executed code needs a public-prefixed
//! env variable to reach the bundle; server-only code must not get one.
//! There is no authoritative build-time signal for this, so the decision
//! is a path heuristic — kept isolated here and injected into the
//! orchestrator so callers can override it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    ServerOnly,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::ServerOnly => write!(f, "server-only"),
        }
    }
}

const SOURCE_TREES: [&str; 5] = ["src/", "app/", "apps/", "libs/", "pages/"];

/// Classify a repository-relative path. Pure, total, deterministic.
///
/// `Public` when the file lives under a source tree and looks like
/// front-end code: a `components/` segment, a `.tsx`/`.jsx` extension, or
/// an app-router `page.*`/`layout.*` file. Everything else is `ServerOnly`.
pub fn classify(path: &str) -> Visibility {
    let norm = path.replace('\\', "/");

    let in_source_tree = SOURCE_TREES
        .iter()
        .any(|tree| norm.starts_with(tree) || norm.contains(&format!("/{tree}")));
    if !in_source_tree {
        return Visibility::ServerOnly;
    }

    let basename = norm.rsplit('/').next().unwrap_or(&norm);
    let stem = basename.split('.').next().unwrap_or(basename);

    let ui_shaped = norm.contains("/components/")
        || norm.starts_with("components/")
        || norm.ends_with(".tsx")
        || norm.ends_with(".jsx")
        || stem == "page"
        || stem == "layout";

    if ui_shaped {
        Visibility::Public
    } else {
        Visibility::ServerOnly
    }
}
