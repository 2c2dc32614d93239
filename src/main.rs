//! cache-merger - DXVK cache update automation
//!
//! Checks a set of shared DXVK pipeline caches for newer versions, downloads
//! the ones that grew and merges them into the locally installed cache with
//! dxvk-cache-tool, keeping the previous cache as `<cache>.old`.

use clap::Parser;

mod cli;
mod config;
mod error;
mod logging;
mod paths;
mod progress;
mod records;
mod remote;
#[cfg(test)]
mod test_fixtures;
mod ui;
mod update;

use cli::Cli;
use config::{AssumeYes, ConfirmPolicy, PromptConfirm};
use error::Result;
use paths::WorkPaths;
use remote::HttpRemote;
use update::{MergeTool, UpdateOperation, UpdateOptions};

/// Set up the work directory and configuration, then run one update
fn run(cli: &Cli) -> Result<()> {
    let paths = WorkPaths::from_env()?;
    config::ensure_work_dir(&paths)?;

    let policy: Box<dyn ConfirmPolicy> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm)
    };
    let config = config::load_or_bootstrap(&paths, policy.as_ref())?;

    let remote = HttpRemote::new()?;
    let tool = MergeTool::resolve();
    let mut progress = progress::for_terminal();

    let report = UpdateOperation::new(&paths, &config, &remote, &tool, UpdateOptions::from(cli))
        .execute(progress.as_mut())?;

    ui::display_summary(&report);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
