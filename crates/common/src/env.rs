//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists, creating it if needed.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_ok() {
        return Ok(());
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    info!(%data_dir, "created data directory");
    Ok(())
}

/// Warn when a `.env` file was expected but is missing; secrets then have to
/// come from the process environment.
pub fn warn_if_no_dotenv() {
    if !Path::new(".env").exists() {
        warn!("no .env file found; relying on process environment");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_data_dir_creates_nested_dirs() -> anyhow::Result<()> {
        let dir = std::env::temp_dir()
            .join(format!("career_maker_env_{}", uuid::Uuid::new_v4()))
            .join("nested");
        let dir_str = dir.to_string_lossy().to_string();
        ensure_data_dir(&dir_str).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());
        // idempotent
        ensure_data_dir(&dir_str).await?;
        let _ = tokio::fs::remove_dir_all(dir.parent().unwrap()).await;
        Ok(())
    }
}
