//! Candidate URL construction.
//!
//! Turns a base URL plus the configured target list into concrete
//! [`ProbeTarget`]s. Pure string work; nothing here can fail.

use crate::config::TargetSpec;
use crate::types::ProbeTarget;

/// Strip trailing slashes from a base URL.
///
/// # Examples
/// - `http://localhost:8000/` → `http://localhost:8000`
/// - `https://api.pasalku.ai/backend//` → `https://api.pasalku.ai/backend`
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = normalize_base_url(base_url);
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Build the ordered candidate list for one probe cycle.
///
/// Order follows `specs`; the caller guarantees `base_url` is non-empty.
pub fn resolve_targets(base_url: &str, specs: &[TargetSpec]) -> Vec<ProbeTarget> {
    specs
        .iter()
        .map(|spec| ProbeTarget::new(spec.kind, join_url(base_url, &spec.path)))
        .collect()
}
