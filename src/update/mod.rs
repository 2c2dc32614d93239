//! Update operation
//!
//! One run goes detect → fetch → merge → persist:
//!
//! 1. every configured source is checked for a larger cache file
//! 2. updated sources are downloaded into the staging tree
//! 3. the merge tool combines the installed cache with the downloads and the
//!    result replaces the installed cache
//! 4. the record file is rewritten with the new sizes
//!
//! Nothing happens after step 1 when no source was updated. Per-source and
//! per-step failures are logged and the run carries on; only failing to read
//! the record file aborts it.

pub mod detect;
pub mod fetch;
pub mod merge;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::paths::WorkPaths;
use crate::progress::ProgressReporter;
use crate::records::RecordStore;
use crate::remote::RemoteSource;

pub use merge::{InstallReport, MergeFailurePolicy, MergeTool};

/// Options for an update run
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    pub on_merge_failure: MergeFailurePolicy,
}

impl From<&Cli> for UpdateOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            on_merge_failure: cli.on_merge_failure,
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub checked: usize,
    pub updated: Vec<String>,
    pub unknown: Vec<String>,
    pub staged: usize,
    pub install: Option<InstallReport>,
    pub records_saved: bool,
}

/// Check all sources and merge whatever changed
pub struct UpdateOperation<'a> {
    paths: &'a WorkPaths,
    config: &'a Config,
    remote: &'a dyn RemoteSource,
    tool: &'a MergeTool,
    options: UpdateOptions,
}

impl<'a> UpdateOperation<'a> {
    pub fn new(
        paths: &'a WorkPaths,
        config: &'a Config,
        remote: &'a dyn RemoteSource,
        tool: &'a MergeTool,
        options: UpdateOptions,
    ) -> Self {
        Self {
            paths,
            config,
            remote,
            tool,
            options,
        }
    }

    pub fn execute(&self, progress: &mut dyn ProgressReporter) -> Result<RunReport> {
        let mut records = RecordStore::load(&self.paths.record_file)?;

        let detection = detect::detect(&self.config.repos, &records, self.remote);
        let mut report = RunReport {
            checked: self.config.repos.len(),
            updated: detection.updated.iter().map(|s| s.name.clone()).collect(),
            unknown: detection.unknown.clone(),
            ..RunReport::default()
        };

        if !detection.any_update() {
            tracing::info!("No updated cache files found");
            return Ok(report);
        }

        let staged = fetch::fetch_updated(
            &detection.updated,
            &self.paths.cache_files_dir,
            self.remote,
            progress,
        );
        report.staged = staged.len();
        if staged.is_empty() {
            tracing::warn!("No cache file could be downloaded, merging the installed cache alone");
        }

        // Sizes are recorded even for sources whose download failed.
        for source in &detection.updated {
            records.update(&source.name, source.size);
        }

        let installed = self.paths.installed_artifact(&self.config.game_dir);
        report.install = Some(merge::merge_and_install(
            self.paths,
            &installed,
            &staged,
            self.tool,
            self.options.on_merge_failure,
        ));

        match records.save(&self.paths.record_file) {
            Ok(()) => report.records_saved = true,
            Err(e) => tracing::error!("{e}"),
        }

        Ok(report)
    }
}
