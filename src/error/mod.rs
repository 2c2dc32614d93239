//! Error types and handling for cache-merger
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration and record file errors
//! - [`fs`]: File system errors
//! - [`remote`]: Size check and download errors
//! - [`merge`]: Merge tool errors

pub mod config;
pub mod fs;
pub mod merge;
pub mod remote;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for cache-merger operations
#[derive(Error, Diagnostic, Debug)]
pub enum CacheMergerError {
    // Setup errors
    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(cache_merger::setup::no_home),
        help("Set the HOME environment variable or CACHE_MERGER_DIR")
    )]
    HomeDirNotFound,

    #[error("Failed to create work directory {path}: {reason}")]
    #[diagnostic(code(cache_merger::setup::work_dir))]
    WorkDirCreateFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(cache_merger::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(cache_merger::config::invalid),
        help("The configuration must contain exactly the keys 'game_dir' and 'repos'")
    )]
    ConfigInvalid { message: String },

    #[error("Cancelled creating initial config for {path}")]
    #[diagnostic(
        code(cache_merger::config::rejected),
        help("Fix the configuration by hand or rerun with --yes to regenerate it")
    )]
    ConfigRejected { path: String },

    #[error("Failed to parse record file {path}: {reason}")]
    #[diagnostic(code(cache_merger::records::parse_failed))]
    RecordsParseFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file {path}: {reason}")]
    #[diagnostic(code(cache_merger::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file {path}: {reason}")]
    #[diagnostic(code(cache_merger::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to copy {from} to {to}: {reason}")]
    #[diagnostic(code(cache_merger::fs::copy_failed))]
    FileCopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(cache_merger::fs::io_error))]
    IoError { message: String },

    // Remote errors
    #[error("Invalid source URL: {url}")]
    #[diagnostic(
        code(cache_merger::remote::invalid_url),
        help("Source URLs must end with the cache file name, e.g. https://host/path/cache.dxvk-cache")
    )]
    InvalidSourceUrl { url: String },

    #[error("Request to {url} failed: {reason}")]
    #[diagnostic(code(cache_merger::remote::request_failed))]
    RequestFailed { url: String, reason: String },

    #[error("HTTP error {status} from {url}")]
    #[diagnostic(code(cache_merger::remote::http_status))]
    HttpStatus { url: String, status: u16 },

    #[error("No Content-Length reported by {url}")]
    #[diagnostic(code(cache_merger::remote::no_content_length))]
    MissingContentLength { url: String },

    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(code(cache_merger::remote::download_failed))]
    DownloadFailed { url: String, reason: String },

    // Merge tool errors
    #[error("Failed to run merge tool {tool}: {reason}")]
    #[diagnostic(
        code(cache_merger::merge::spawn_failed),
        help("Install dxvk-cache-tool or point CACHE_MERGER_TOOL at it")
    )]
    MergeToolSpawnFailed { tool: String, reason: String },

    #[error("Merge tool exited with {status}")]
    #[diagnostic(code(cache_merger::merge::tool_failed))]
    MergeToolFailed { status: String, output: String },

    // Interaction errors
    #[error("Failed to read confirmation: {message}")]
    #[diagnostic(code(cache_merger::prompt::failed))]
    PromptFailed { message: String },
}

impl From<toml::ser::Error> for CacheMergerError {
    fn from(err: toml::ser::Error) -> Self {
        CacheMergerError::IoError {
            message: format!("Failed to serialize TOML: {err}"),
        }
    }
}

impl From<inquire::InquireError> for CacheMergerError {
    fn from(err: inquire::InquireError) -> Self {
        CacheMergerError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CacheMergerError>;
