//! TestWorld pattern for declarative CLI integration test setup.
//!
//! Creates an isolated data directory with a pinned sample catalog and a
//! config.toml pointing at it, then runs the `motobook` binary against it.

use anyhow::{Context, Result};
use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Isolated test environment for the `motobook` binary.
///
/// # Example
/// ```no_run
/// use motobook_testing::TestWorld;
///
/// let world = TestWorld::new();
/// let result = world.run(&["catalog", "show"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    catalog_path: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a data dir seeded with the sample catalog file and a config
    /// pointing at it.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".motobook");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        let catalog_path = fixtures::write_catalog_file(temp_dir.path());
        let world = TestWorld { temp_dir, data_dir, catalog_path };
        world.write_config(&format!(
            "[catalog]\nfile = {:?}\n",
            world.catalog_path.display().to_string()
        ));
        world
    }

    /// Create an environment with no config file at all.
    pub fn unconfigured() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".motobook");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        let catalog_path = temp_dir.path().join("catalog.json");
        TestWorld { temp_dir, data_dir, catalog_path }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Overwrite config.toml with raw TOML content.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.data_dir.join("config.toml"), content).expect("write config.toml");
    }

    /// Replace the catalog file with a different wire body.
    pub fn write_catalog(&self, body: &str) {
        std::fs::write(&self.catalog_path, body).expect("write catalog.json");
    }

    /// Run the motobook binary scoped to this world's data dir.
    pub fn run(&self, args: &[&str]) -> Result<CommandResult> {
        let data_dir = self.data_dir.to_string_lossy().to_string();
        let output = Command::cargo_bin("motobook")
            .context("motobook binary not built")?
            .arg("--data-dir")
            .arg(&data_dir)
            .args(args)
            .output()
            .context("failed to execute motobook")?;

        Ok(CommandResult { output })
    }
}

/// Captured result of one binary invocation.
pub struct CommandResult {
    output: std::process::Output,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.output.status.success()
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    /// Parse stdout as JSON (for `--format json` invocations).
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.stdout())
            .with_context(|| format!("stdout is not JSON: {}", self.stdout()))
    }
}
