//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before the store is opened.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory holding a file-backed store exists.
pub async fn ensure_parent_dir(file: &Path) -> anyhow::Result<()> {
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(parent).await.is_ok() {
        return Ok(());
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    info!(dir = %parent.display(), "created data directory");
    Ok(())
}

/// Warn when an env var the server reads is set but empty.
pub fn warn_if_blank(keys: &[&str]) {
    for key in keys {
        if let Ok(v) = std::env::var(key) {
            if v.trim().is_empty() {
                warn!(%key, "environment variable is set but blank; falling back to defaults");
            }
        }
    }
}
