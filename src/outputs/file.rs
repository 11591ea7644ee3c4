//! Writing the serialized guide to disk.
//!
//! The document is written to a temporary sibling (`guide.xml.tmp`) and then
//! renamed over the destination, so a reader sees either the previous guide
//! or the complete new one.

use crate::error::{GuideError, GuideResult};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Persist `bytes` at `path`, replacing any existing file.
///
/// Creates the parent directory (recursively) first; an already existing
/// directory is not an error.
///
/// # Errors
///
/// Returns [`GuideError::Io`] naming the failed operation if the directory
/// cannot be created, or the file cannot be written or moved into place.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = bytes.len()))]
pub async fn persist(bytes: &[u8], path: &Path) -> GuideResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        info!(dir = %parent.display(), "Ensuring output directory exists");
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(GuideError::io("create directory", parent, e));
        }
    }

    let staging = staging_path(path)?;
    let result = match fs::write(&staging, bytes).await {
        Ok(()) => fs::rename(&staging, path)
            .await
            .map_err(|e| GuideError::io("replace", path, e)),
        Err(e) => Err(GuideError::io("write", &staging, e)),
    };

    if let Err(e) = result {
        // a failed write can leave a partial staging file
        let _ = fs::remove_file(&staging).await;
        error!(staging = %staging.display(), error = %e, "Failed to write guide file");
        return Err(e);
    }

    info!("Wrote guide file");
    Ok(())
}

/// `<dir>/<file name>.tmp`
fn staging_path(path: &Path) -> GuideResult<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(GuideError::io(
            "write",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        ));
    };
    let mut staging = OsString::from(name);
    staging.push(".tmp");
    Ok(path.with_file_name(staging))
}
