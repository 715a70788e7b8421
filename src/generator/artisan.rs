//! Artisan command runner
//!
//! Scaffold commands (`make:migration`, `make:model`, `migrate:fresh`) are
//! delegated to the Laravel project's own `artisan` binary. The runner is
//! trait-based so tests can substitute a fake that writes skeleton files
//! instead of spawning PHP.

use crate::error::{ModelForgeError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Runs an external command and captures its combined output.
///
/// Invocations are synchronous from the session's point of view: the caller
/// awaits completion before continuing. No timeout, no retry.
#[async_trait]
pub trait ShellRunner: Send + Sync {
    /// Run `command` through the shell and return combined stdout + stderr.
    async fn run(&self, command: &str) -> Result<String>;
}

/// [`ShellRunner`] that executes commands in the Laravel project root.
pub struct ArtisanRunner {
    project_dir: PathBuf,
}

impl ArtisanRunner {
    /// Create a runner rooted at the given project directory.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }
}

#[async_trait]
impl ShellRunner for ArtisanRunner {
    async fn run(&self, command: &str) -> Result<String> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&self.project_dir)
            .output()
            .await
            .map_err(|e| ModelForgeError::Scaffold(format!("{}: {}", command, e)))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}
