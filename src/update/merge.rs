//! Merging staged caches into the installed one
//!
//! The merge itself is done by an external tool (dxvk-cache-tool):
//!
//! ```text
//! <tool> -o <merged output> <installed cache> <staged 1> <staged 2> ...
//! ```
//!
//! Afterwards the installed cache is copied to `<installed>.old` and replaced by
//! the merged output. With [`MergeFailurePolicy::Install`] both copies happen
//! even when the tool failed.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;

use super::fetch::StagedArtifacts;
use crate::error::{CacheMergerError, Result, fs as fs_error, merge as merge_error};
use crate::paths::{WorkPaths, backup_path};

/// Merge tool executable name looked up on `PATH`
pub const DEFAULT_TOOL: &str = "dxvk-cache-tool";

/// What to do with the backup/install steps when the merge tool fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MergeFailurePolicy {
    /// Back up and install the merge output anyway
    #[default]
    Install,
    /// Leave the installed cache and its backup untouched
    Abort,
}

/// External merge tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeTool {
    program: PathBuf,
}

impl MergeTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the tool
    ///
    /// `CACHE_MERGER_TOOL` wins, then `lib/dxvk-cache-tool` next to the
    /// executable, then `dxvk-cache-tool` on `PATH`.
    pub fn resolve() -> Self {
        if let Some(program) = std::env::var_os("CACHE_MERGER_TOOL").filter(|p| !p.is_empty()) {
            return Self::new(program);
        }

        let bundled = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("lib").join(DEFAULT_TOOL)))
            .filter(|path| path.is_file());

        Self::new(bundled.unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL)))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the tool
    pub fn args(output: &Path, base: &Path, inputs: &[PathBuf]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-o".into(),
            output.as_os_str().to_owned(),
            base.as_os_str().to_owned(),
        ];
        args.extend(inputs.iter().map(|p| p.as_os_str().to_owned()));
        args
    }

    /// Run the tool, returning its combined output
    pub fn run(&self, output: &Path, base: &Path, inputs: &[PathBuf]) -> Result<String> {
        tracing::debug!(
            "Running {} with {} input file(s)",
            self.program().display(),
            inputs.len() + 1
        );

        let result = Command::new(&self.program)
            .args(Self::args(output, base, inputs))
            .output()
            .map_err(|e| merge_error::spawn_failed(self.program.display().to_string(), e))?;

        let mut text = String::from_utf8_lossy(&result.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&result.stderr));

        if result.status.success() {
            Ok(text)
        } else {
            Err(merge_error::tool_failed(result.status.to_string(), text))
        }
    }
}

/// What the merge and install step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub tool_succeeded: bool,
    pub backed_up: bool,
    pub installed: bool,
}

/// Merge `staged` into `installed` and install the result
///
/// Failures are logged, never returned.
pub fn merge_and_install(
    paths: &WorkPaths,
    installed: &Path,
    staged: &StagedArtifacts,
    tool: &MergeTool,
    policy: MergeFailurePolicy,
) -> InstallReport {
    let mut report = InstallReport::default();

    if let Err(e) = fs::create_dir_all(&paths.merge_files_dir) {
        tracing::error!("{}", fs_error::write_failed(&paths.merge_files_dir, e));
        return report;
    }

    let merged = paths.merged_file();
    match tool.run(&merged, installed, staged.paths()) {
        Ok(output) => {
            report.tool_succeeded = true;
            print_tool_output(&output);
        }
        Err(CacheMergerError::MergeToolFailed { status, output }) => {
            tracing::error!("Merge tool exited with {status}");
            print_tool_output(&output);
        }
        Err(e) => tracing::error!("{e}"),
    }

    if !report.tool_succeeded && policy == MergeFailurePolicy::Abort {
        tracing::warn!(
            "Merge failed, leaving {} untouched",
            installed.display()
        );
        return report;
    }

    let backup = backup_path(installed);
    match fs::copy(installed, &backup) {
        Ok(_) => report.backed_up = true,
        Err(e) => tracing::error!("{}", fs_error::copy_failed(installed, &backup, e)),
    }

    match replace_file(&merged, installed) {
        Ok(()) => {
            report.installed = true;
            tracing::info!("Cache files are merged and the result copied to game directory");
        }
        Err(e) => tracing::error!("{e}"),
    }

    report
}

fn print_tool_output(output: &str) {
    let output = output.trim_end();
    if !output.is_empty() {
        println!("{output}");
    }
}

/// Replace `dest` with a copy of `src` in one rename
fn replace_file(src: &Path, dest: &Path) -> Result<()> {
    let dir = dest
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut input = File::open(src).map_err(|e| fs_error::copy_failed(src, dest, e))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fs_error::copy_failed(src, dest, e))?;
    io::copy(&mut input, tmp.as_file_mut()).map_err(|e| fs_error::copy_failed(src, dest, e))?;
    tmp.persist(dest)
        .map_err(|e| fs_error::copy_failed(src, dest, e.error))?;
    Ok(())
}
