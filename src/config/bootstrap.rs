//! First-run setup and recovery from a broken configuration
//!
//! Regenerating the configuration is destructive, so it is gated by a
//! [`ConfirmPolicy`] supplied by the caller: an interactive prompt by default,
//! or [`AssumeYes`] when running with `--yes`.

use std::fs;

use inquire::Confirm;

use super::{ConfigValidation, backup, load, write_initial};
use crate::config::Config;
use crate::error::{Result, config as config_error, fs as fs_error};
use crate::paths::WorkPaths;

/// Decides whether an invalid configuration may be replaced
pub trait ConfirmPolicy {
    /// Return `true` to back up and regenerate the configuration
    fn confirm_regenerate(&self, reason: &str) -> Result<bool>;
}

/// Ask on the terminal
pub struct PromptConfirm;

impl ConfirmPolicy for PromptConfirm {
    fn confirm_regenerate(&self, reason: &str) -> Result<bool> {
        let answer = Confirm::new("Incorrect configuration file, do you want to create an initial one?")
            .with_default(false)
            .with_help_message(&format!(
                "{reason}. The current file is kept as config.toml.old"
            ))
            .prompt()?;
        Ok(answer)
    }
}

/// Always regenerate without asking
pub struct AssumeYes;

impl ConfirmPolicy for AssumeYes {
    fn confirm_regenerate(&self, _reason: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Create the work directory with an initial configuration if it does not exist
pub fn ensure_work_dir(paths: &WorkPaths) -> Result<()> {
    if paths.work_dir.exists() {
        return Ok(());
    }

    tracing::info!("Creating work folder {}", paths.work_dir.display());
    fs::create_dir_all(&paths.work_dir)
        .map_err(|e| fs_error::work_dir_create_failed(&paths.work_dir, e))?;
    create_initial_config(paths)
}

fn create_initial_config(paths: &WorkPaths) -> Result<()> {
    tracing::info!("Creating initial config..");
    write_initial(&paths.config_file)
}

/// Load the configuration, creating or regenerating it as needed
///
/// A missing file is replaced by the initial configuration without asking.
/// An invalid one is only replaced when `policy` agrees; otherwise
/// [`CacheMergerError::ConfigRejected`](crate::error::CacheMergerError::ConfigRejected)
/// is returned.
pub fn load_or_bootstrap(paths: &WorkPaths, policy: &dyn ConfirmPolicy) -> Result<Config> {
    if !paths.config_file.exists() {
        tracing::warn!("Config file is not found, creating an initial config");
        create_initial_config(paths)?;
    }

    let reason = match load(&paths.config_file)? {
        ConfigValidation::Valid(config) => return Ok(config),
        ConfigValidation::Invalid(reason) => reason,
    };

    tracing::warn!("Incorrect configuration file: {reason}");
    if !policy.confirm_regenerate(&reason)? {
        tracing::error!("Cancelled creating initial config, exiting..");
        return Err(config_error::rejected(
            paths.config_file.display().to_string(),
        ));
    }

    backup(&paths.config_file)?;
    create_initial_config(paths)?;

    match load(&paths.config_file)? {
        ConfigValidation::Valid(config) => Ok(config),
        ConfigValidation::Invalid(reason) => Err(config_error::invalid(reason)),
    }
}
