//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};

use crate::update::MergeFailurePolicy;

/// cache-merger - keep the installed DXVK cache merged with shared caches
///
/// Checks every configured source for a larger cache file, downloads the
/// updated ones and merges them into the installed cache with dxvk-cache-tool.
#[derive(Parser, Debug)]
#[command(
    name = "cache-merger",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Merge updated shared DXVK caches into the installed cache",
    long_about = "Merge updated shared DXVK caches into the installed cache.\n\n\
                  Checks every configured repo for a larger cache file, downloads the \
                  updated ones and merges them into the installed cache with \
                  dxvk-cache-tool, keeping the previous cache as <cache>.old.",
    after_help = "\x1b[1m\x1b[32mFiles:\x1b[0m\n    \
                  ~/.cache_merger/config.toml    game_dir and [repos] to check\n    \
                  ~/.cache_merger/records.toml   last seen cache size per repo\n\n\
                  \x1b[1m\x1b[32mEnvironment:\x1b[0m\n    \
                  CACHE_MERGER_DIR     work directory (default ~/.cache_merger)\n    \
                  CACHE_MERGER_TOOL    path to dxvk-cache-tool\n    \
                  RUST_LOG             log filter (default info)"
)]
pub struct Cli {
    /// Regenerate an invalid configuration without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// What to do when the merge tool fails
    #[arg(long, value_enum, default_value_t = MergeFailurePolicy::Install)]
    pub on_merge_failure: MergeFailurePolicy,
}
