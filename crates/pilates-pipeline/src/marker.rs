//! Marker file writer.
//!
//! Every marker write appends exactly one timestamped line. A file that does
//! not exist yet is created, so repeated runs against the same output root
//! accumulate one line per run instead of truncating.

use std::path::Path;

use chrono::NaiveDateTime;
use pilates_types::{PilatesError, Result};
use tokio::io::AsyncWriteExt;

use crate::manifest::MarkerSet;

/// The line written into a marker file.
pub fn marker_record(at: NaiveDateTime) -> String {
    format!(
        "this MOCK record written at {}\n",
        at.format("%Y-%m-%d %H:%M:%S%.6f")
    )
}

/// Create `base/set.dir` (recursively, idempotently) and append a record to
/// every file of the set. Returns the number of files written.
pub async fn write_markers(base: &Path, set: &MarkerSet) -> Result<usize> {
    let folder = base.join(&set.dir);
    tokio::fs::create_dir_all(&folder)
        .await
        .map_err(|source| PilatesError::CreateDir {
            path: folder.clone(),
            source,
        })?;
    tracing::info!("Created folder '{}'", folder.display());

    for file_name in &set.files {
        append_record(&folder.join(file_name)).await?;
    }
    Ok(set.files.len())
}

/// Write every set of a manifest in order.
pub async fn write_manifest(base: &Path, sets: &[MarkerSet]) -> Result<usize> {
    let mut written = 0;
    for set in sets {
        written += write_markers(base, set).await?;
    }
    Ok(written)
}

async fn append_record(path: &Path) -> Result<()> {
    let wrap = |source: std::io::Error| PilatesError::MarkerWrite {
        path: path.to_path_buf(),
        source,
    };
    let record = marker_record(chrono::Local::now().naive_local());

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(wrap)?;
    file.write_all(record.as_bytes()).await.map_err(wrap)?;
    file.flush().await.map_err(wrap)?;
    tracing::debug!(path = %path.display(), "Marker written");
    Ok(())
}
