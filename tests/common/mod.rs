//! Common test utilities for cache-merger integration tests

#![allow(dead_code, unused_imports, clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

#[path = "../../src/test_fixtures.rs"]
mod fixtures;

pub use fixtures::{TestServer, unreachable_url};
#[cfg(unix)]
pub use fixtures::{failing_merge_tool, fake_merge_tool};

/// A fake home directory with the work directory and game directory inside
pub struct TestHome {
    /// Temporary directory
    pub temp: TempDir,
    /// Path used as $HOME
    pub path: PathBuf,
}

impl TestHome {
    /// Create a new empty home directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    pub fn work_dir(&self) -> PathBuf {
        self.path.join(".cache_merger")
    }

    pub fn game_dir(&self) -> PathBuf {
        self.path.join("game")
    }

    pub fn installed(&self) -> PathBuf {
        self.game_dir().join("Overwatch.dxvk-cache")
    }

    /// Write config.toml with `game = "game"` and the given repos
    pub fn write_config(&self, repos: &[(&str, String)]) {
        let mut content = String::from("game_dir = \"game\"\n\n[repos]\n");
        for (name, url) in repos {
            content.push_str(&format!("{name} = \"{url}\"\n"));
        }
        self.write_file(".cache_merger/config.toml", &content);
    }

    /// Install a cache file in the game directory
    pub fn install_cache(&self, content: &[u8]) {
        std::fs::create_dir_all(self.game_dir()).expect("Failed to create game directory");
        std::fs::write(self.installed(), content).expect("Failed to write installed cache");
    }

    /// Write a file relative to the home directory
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file relative to the home directory
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists relative to the home directory
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// The real binary, running against this home directory
    #[allow(deprecated)]
    pub fn cmd(&self, tool: &Path) -> Command {
        let mut cmd = Command::cargo_bin("cache-merger").unwrap();
        cmd.env("HOME", &self.path)
            .env_remove("CACHE_MERGER_DIR")
            .env_remove("RUST_LOG")
            .env("CACHE_MERGER_TOOL", tool);
        cmd
    }
}
