//! Downloading updated cache files into the staging tree
//!
//! Each source gets its own directory: `cache_files/<source>/<file name>`.
//! Re-fetching overwrites the previous download, so an interrupted run can
//! simply be repeated.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::detect::UpdatedSource;
use crate::error::{Result, fs as fs_error, remote as remote_error};
use crate::progress::ProgressReporter;
use crate::remote::RemoteSource;

/// Cache files downloaded during this run, in fetch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedArtifacts {
    paths: Vec<PathBuf>,
}

impl StagedArtifacts {
    pub fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Last path segment of a URL, ignoring query and fragment
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let name = url[..end].rsplit('/').next()?;
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// Local path a source's cache file is downloaded to
pub fn staged_path(staging_root: &Path, name: &str, url: &str) -> Result<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(fs_error::write_failed(
            &staging_root.join(name),
            "source name cannot be used as a directory name",
        ));
    }
    let file_name = file_name_from_url(url).ok_or_else(|| remote_error::invalid_url(url))?;
    Ok(staging_root.join(name).join(file_name))
}

/// Download every updated source, skipping (and logging) the ones that fail
pub fn fetch_updated(
    updated: &[UpdatedSource],
    staging_root: &Path,
    remote: &dyn RemoteSource,
    progress: &mut dyn ProgressReporter,
) -> StagedArtifacts {
    let mut staged = StagedArtifacts::default();

    for source in updated {
        match fetch_one(source, staging_root, remote, progress) {
            Ok(path) => staged.push(path),
            Err(e) => tracing::error!("Failed to download cache file from repo {}: {e}", source.name),
        }
    }

    staged
}

fn fetch_one(
    source: &UpdatedSource,
    staging_root: &Path,
    remote: &dyn RemoteSource,
    progress: &mut dyn ProgressReporter,
) -> Result<PathBuf> {
    tracing::info!("Downloading cache file from repo {}..", source.name);

    let path = staged_path(staging_root, &source.name, &source.url)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| fs_error::write_failed(dir, e))?;
    }

    let file = File::create(&path).map_err(|e| fs_error::write_failed(&path, e))?;
    let mut out = BufWriter::new(file);

    progress.start_download(&source.name, Some(source.size));
    match remote.download(&source.url, &mut out, progress) {
        Ok(bytes) => {
            progress.finish_download();
            tracing::debug!("Wrote {bytes} bytes to {}", path.display());
            Ok(path)
        }
        Err(e) => {
            progress.abandon();
            drop(out);
            let _ = fs::remove_file(&path);
            Err(e)
        }
    }
}
