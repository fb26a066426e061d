//! Isolated Python runtime for the external processor
//!
//! The virtual environment is modelled as a scoped resource: it is only
//! "active" for the lifetime of the [`VirtualEnv`] guard, and deactivation
//! happens on drop. That guarantees a failed processing run never leaves the
//! environment active, without a separate teardown path.

use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

/// Guard over an activated Python virtual environment
#[derive(Debug)]
pub struct VirtualEnv {
    root: PathBuf,
    python: PathBuf,
}

impl VirtualEnv {
    /// Activate the virtual environment rooted at `root`
    ///
    /// Fatal if the environment does not exist; the error tells the operator
    /// how to create it.
    pub fn activate(root: &Path) -> AppResult<Self> {
        let python = root.join("bin").join("python");
        if !python.exists() {
            return Err(AppError::MissingEnvironment {
                path: root.to_path_buf(),
            });
        }
        info!("Activated Python environment at {}", root.display());
        Ok(Self {
            root: root.to_path_buf(),
            python,
        })
    }

    /// Build a command running this environment's interpreter
    ///
    /// Mirrors what `bin/activate` would do for a subshell: the venv's
    /// interpreter is invoked directly, VIRTUAL_ENV is set and the venv's
    /// bin directory is prepended to PATH for anything the script spawns.
    pub fn python_command(&self) -> Command {
        let mut command = Command::new(&self.python);
        command.env("VIRTUAL_ENV", &self.root);
        if let Some(path) = std::env::var_os("PATH") {
            let mut prefixed = self.root.join("bin").into_os_string();
            prefixed.push(":");
            prefixed.push(path);
            command.env("PATH", prefixed);
        }
        command
    }
}

impl Drop for VirtualEnv {
    fn drop(&mut self) {
        info!("Deactivated Python environment at {}", self.root.display());
    }
}

/// Invoke the external processing script inside the given environment
///
/// The script receives three positional arguments: the channel dump, the
/// forwarding-history dump and the CSV output path. Its stderr is discarded
/// so only this tool's own messages reach the operator.
pub fn run_processor(
    env: &VirtualEnv,
    script: &Path,
    channels_dump: &Path,
    history_dump: &Path,
    report_csv: &Path,
) -> AppResult<()> {
    let step = "generate report";
    let status = env
        .python_command()
        .arg(script)
        .arg(channels_dump)
        .arg(history_dump)
        .arg(report_csv)
        .stderr(Stdio::null())
        .status()
        .map_err(|source| AppError::CommandLaunch {
            step,
            program: script.display().to_string(),
            source,
        })?;

    if !status.success() {
        return Err(AppError::CommandFailed {
            step,
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
