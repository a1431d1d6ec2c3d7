//! Standards directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "CRF_STANDARDS_DIR";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `CRF_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Path of the forms manifest under a standards root.
pub fn manifest_path(root: &std::path::Path) -> PathBuf {
    root.join("manifest.toml")
}
