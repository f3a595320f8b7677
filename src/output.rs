//! Atomic page writes into the output directory

use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `content` to `path`, replacing any existing file.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the target, so readers never observe a partial page.
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns error if the directory cannot be created or the file cannot be
/// written or renamed.
pub fn write_page(path: &Path, content: &str) -> Result<()> {
    let tmp = stage(path, content)?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write page: {}", path.display()))?;
    Ok(())
}

/// Writes `content` to `path` only if no file exists there yet.
///
/// Uses a no-clobber link so that two concurrent runs cannot overwrite each
/// other's page. Returns `true` when this call created the file.
///
/// # Errors
///
/// Returns error for any failure other than the target already existing.
pub fn write_page_if_absent(path: &Path, content: &str) -> Result<bool> {
    let tmp = stage(path, content)?;
    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error)
            .with_context(|| format!("Failed to write page: {}", path.display())),
    }
}

fn stage(path: &Path, content: &str) -> Result<NamedTempFile> {
    let dir = path
        .parent()
        .with_context(|| format!("Page path has no parent: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".page-")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .context("Failed to write temporary page")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .context("Failed to set page permissions")?;
    }

    Ok(tmp)
}
