//! Size record store
//!
//! `records.toml` maps each source name to the byte size of the last cache
//! file seen for it. A source without an entry counts as size 0, so the first
//! non-empty file a source serves is always an update.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, config as config_error, fs as fs_error};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    sizes: BTreeMap<String, u64>,
}

impl RecordStore {
    /// Load the record file, starting empty when it does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Reading last downloaded dxvk cache file sizes from record file");
        if !path.exists() {
            tracing::warn!("{} is not found, will create a new one", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| fs_error::read_failed(path, e))?;
        let store = Self::from_toml(&content)
            .map_err(|e| config_error::records_parse_failed(path.display().to_string(), e))?;
        tracing::debug!("Loaded {} size record(s)", store.sizes.len());
        Ok(store)
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        let sizes: BTreeMap<String, i64> =
            toml::from_str(content).map_err(|e| e.message().to_string())?;
        let sizes = sizes
            .into_iter()
            .map(|(name, size)| {
                u64::try_from(size)
                    .map(|size| (name.clone(), size))
                    .map_err(|_| format!("negative size {size} for '{name}'"))
            })
            .collect::<std::result::Result<_, _>>()?;
        Ok(Self { sizes })
    }

    /// Last recorded size, 0 when the source was never seen
    pub fn size(&self, name: &str) -> u64 {
        self.sizes.get(name).copied().unwrap_or(0)
    }

    pub fn update(&mut self, name: impl Into<String>, size: u64) {
        self.sizes.insert(name.into(), size);
    }

    /// Write the whole store to `path`, creating the file if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        tracing::info!("Updating last downloaded dxvk cache file size record");
        // TOML integers are i64
        let table: BTreeMap<&str, i64> = self
            .sizes
            .iter()
            .map(|(name, size)| (name.as_str(), i64::try_from(*size).unwrap_or(i64::MAX)))
            .collect();
        let content = toml::to_string(&table)?;
        fs::write(path, content).map_err(|e| fs_error::write_failed(path, e))
    }
}
