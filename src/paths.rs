//! Work directory layout and path resolution
//!
//! Everything the tool owns lives under one work directory:
//!
//! ```text
//! ~/.cache_merger/
//!   config.toml
//!   records.toml
//!   cache_files/<source>/<file>
//!   merge_files/Merged.dxvk-cache
//! ```
//!
//! The installed cache lives outside of it, under the configured game directory.

use std::path::{Path, PathBuf};

use crate::error::{CacheMergerError, Result};

/// Default work directory name under the user's home directory
const WORK_DIR: &str = ".cache_merger";

/// Configuration file name
pub const CONFIG_FILE: &str = "config.toml";

/// Size record file name
pub const RECORD_FILE: &str = "records.toml";

/// Per-source staging tree
pub const CACHE_FILES_DIR: &str = "cache_files";

/// Merge output directory
pub const MERGE_FILES_DIR: &str = "merge_files";

/// File name of the merge tool output
pub const MERGED_FILE: &str = "Merged.dxvk-cache";

/// File name of the installed cache inside the game directory
pub const INSTALLED_FILE: &str = "Overwatch.dxvk-cache";

/// Suffix appended to backup copies
pub const BACKUP_SUFFIX: &str = ".old";

/// Resolved locations used during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPaths {
    pub home: PathBuf,
    pub work_dir: PathBuf,
    pub config_file: PathBuf,
    pub record_file: PathBuf,
    pub cache_files_dir: PathBuf,
    pub merge_files_dir: PathBuf,
}

impl WorkPaths {
    /// Resolve the layout from the environment
    ///
    /// Uses the home directory reported by `dirs`. The work directory can be
    /// overridden with the `CACHE_MERGER_DIR` environment variable.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or(CacheMergerError::HomeDirNotFound)?;
        let work_dir = match std::env::var_os("CACHE_MERGER_DIR") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => home.join(WORK_DIR),
        };
        Ok(Self::new(home, work_dir))
    }

    pub fn new(home: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            home: home.into(),
            config_file: work_dir.join(CONFIG_FILE),
            record_file: work_dir.join(RECORD_FILE),
            cache_files_dir: work_dir.join(CACHE_FILES_DIR),
            merge_files_dir: work_dir.join(MERGE_FILES_DIR),
            work_dir,
        }
    }

    /// Path the merge tool writes its output to
    pub fn merged_file(&self) -> PathBuf {
        self.merge_files_dir.join(MERGED_FILE)
    }

    /// Installed cache for a game directory given relative to the home directory
    pub fn installed_artifact(&self, game_dir: &str) -> PathBuf {
        self.home.join(game_dir).join(INSTALLED_FILE)
    }
}

/// `<path>.old` sibling of a file
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}
