//! Report loading and writing
//!
//! Inputs are read and decoded concurrently; the merge only starts once every
//! input is loaded, and the first failure aborts the whole run before any
//! output is written.

use crate::merge::{CoverageMerger, MergeStats};
use crate::report::{encode_session, parse_report, CoverageSession};
use crate::result::{MergeError, MergeResult};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::info;

/// Read and decode one OpenCover report
///
/// # Errors
///
/// Returns [`MergeError::Load`] if the file cannot be read or decoded
pub async fn load_report(path: impl AsRef<Path>) -> MergeResult<CoverageSession> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading coverage report");

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MergeError::load(path, e.into()))?;
    parse_report(&text).map_err(|e| MergeError::load(path, e))
}

/// Load every report concurrently, preserving input order
///
/// # Errors
///
/// Returns the first load failure; no partial result is produced
pub async fn load_reports(paths: &[PathBuf]) -> MergeResult<Vec<CoverageSession>> {
    try_join_all(paths.iter().map(|path| load_report(path))).await
}

/// Encode and write a merged report
///
/// # Errors
///
/// Returns [`MergeError::Write`] if the destination cannot be written
pub async fn write_report(path: impl AsRef<Path>, session: &CoverageSession) -> MergeResult<()> {
    let path = path.as_ref();
    info!(path = %path.display(), "Writing merged report");

    tokio::fs::write(path, encode_session(session))
        .await
        .map_err(|source| MergeError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Load `inputs`, merge them in order, and write the result to `output`
///
/// # Errors
///
/// Returns error if any input fails to load, the merge fails, or the output
/// cannot be written
pub async fn merge_files(inputs: &[PathBuf], output: impl AsRef<Path>) -> MergeResult<MergeStats> {
    let mut merger = CoverageMerger::new();
    for document in load_reports(inputs).await? {
        merger.merge(document)?;
    }
    let stats = MergeStats::from_session(merger.session(), merger.documents_merged());

    write_report(output, &merger.finish()).await?;
    Ok(stats)
}
