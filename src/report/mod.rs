pub mod markdown;

pub use markdown::{
    render_report, NO_HIGH_STOCK_PLACEHOLDER, NO_LOW_STOCK_PLACEHOLDER,
    NO_PROMOTION_PLACEHOLDER, NO_REPLENISHMENT_PLACEHOLDER,
};

use std::path::Path;

use crate::core::error::PipelineError;

/// Persist the report as one whole-file UTF-8 write, overwriting any
/// previous report. On failure nothing is kept.
pub async fn write_report(path: &Path, content: &str) -> Result<(), PipelineError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|source| PipelineError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!("[report] Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.md");

        write_report(&path, "first").await.unwrap();
        write_report(&path, "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[tokio::test]
    async fn unwritable_path_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("report.md");

        let err = write_report(&path, "content").await.unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }));
    }
}
