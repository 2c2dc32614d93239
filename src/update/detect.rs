//! Change detection
//!
//! A source is updated when its remote cache file is strictly larger than the
//! last recorded size. Sources whose size cannot be read are skipped for this
//! run and keep their record.

use std::collections::BTreeMap;

use crate::records::RecordStore;
use crate::remote::RemoteSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Updated(u64),
    Unchanged,
    Unknown,
}

/// Compare a freshly reported size with the recorded one
pub fn classify(stored: u64, current: u64) -> Classification {
    if current > stored {
        Classification::Updated(current)
    } else {
        Classification::Unchanged
    }
}

/// A source with a newer cache file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedSource {
    pub name: String,
    pub url: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub updated: Vec<UpdatedSource>,
    pub unknown: Vec<String>,
}

impl Detection {
    pub fn any_update(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// Check every source once, in name order
pub fn detect(
    repos: &BTreeMap<String, String>,
    records: &RecordStore,
    remote: &dyn RemoteSource,
) -> Detection {
    let mut detection = Detection::default();

    for (name, url) in repos {
        tracing::info!("Getting dxvk cache file size of repo {name}");
        let classification = match remote.content_length(url) {
            Ok(size) => classify(records.size(name), size),
            Err(e) => {
                tracing::error!("Skipping repo {name}: {e}");
                Classification::Unknown
            }
        };

        match classification {
            Classification::Updated(size) => {
                tracing::info!("An updated cache file is found on repo {name}");
                detection.updated.push(UpdatedSource {
                    name: name.clone(),
                    url: url.clone(),
                    size,
                });
            }
            Classification::Unchanged => {
                tracing::info!("No new cache file found on the repo {name}");
            }
            Classification::Unknown => detection.unknown.push(name.clone()),
        }
    }

    detection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, remote as remote_error};
    use crate::progress::ProgressReporter;
    use std::collections::HashMap;
    use std::io::Write;

    /// Remote answering size checks from a table; unknown URLs are unreachable
    struct SizeTable(HashMap<&'static str, u64>);

    impl RemoteSource for SizeTable {
        fn content_length(&self, url: &str) -> Result<u64> {
            self.0
                .get(url)
                .copied()
                .ok_or_else(|| remote_error::request_failed(url, "connection refused"))
        }

        fn download(
            &self,
            url: &str,
            _out: &mut dyn Write,
            _progress: &mut dyn ProgressReporter,
        ) -> Result<u64> {
            Err(remote_error::download_failed(url, "not used"))
        }
    }

    fn repos(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(name, url)| ((*name).to_string(), (*url).to_string()))
            .collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0, 500), Classification::Updated(500));
        assert_eq!(classify(500, 501), Classification::Updated(501));
        assert_eq!(classify(500, 500), Classification::Unchanged);
        assert_eq!(classify(500, 499), Classification::Unchanged);
        assert_eq!(classify(0, 0), Classification::Unchanged);
    }

    #[test]
    fn test_first_seen_source_is_updated() {
        let remote = SizeTable(HashMap::from([("https://x/cacheA.bin", 500)]));
        let detection = detect(
            &repos(&[("repoA", "https://x/cacheA.bin")]),
            &RecordStore::default(),
            &remote,
        );

        assert!(detection.any_update());
        assert_eq!(
            detection.updated,
            vec![UpdatedSource {
                name: "repoA".to_string(),
                url: "https://x/cacheA.bin".to_string(),
                size: 500,
            }]
        );
    }

    #[test]
    fn test_same_size_is_unchanged() {
        let remote = SizeTable(HashMap::from([("https://x/cacheA.bin", 500)]));
        let mut records = RecordStore::default();
        records.update("repoA", 500);

        let detection = detect(
            &repos(&[("repoA", "https://x/cacheA.bin")]),
            &records,
            &remote,
        );

        assert!(!detection.any_update());
        assert!(detection.unknown.is_empty());
    }

    #[test]
    fn test_network_failure_is_skipped() {
        let remote = SizeTable(HashMap::from([("https://x/cacheA.bin", 500)]));
        let detection = detect(
            &repos(&[
                ("repoA", "https://x/cacheA.bin"),
                ("repoB", "https://unreachable/cacheB.bin"),
            ]),
            &RecordStore::default(),
            &remote,
        );

        assert_eq!(detection.updated.len(), 1);
        assert_eq!(detection.updated[0].name, "repoA");
        assert_eq!(detection.unknown, vec!["repoB".to_string()]);
    }
}
