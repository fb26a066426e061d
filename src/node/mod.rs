//! Node CLI invocation
//!
//! Shells out to an lncli-compatible binary and captures stdout into dump
//! files. The dumps are treated as opaque text: parsing them is the report
//! generator's concern, not this module's.

use crate::config::NodeCliConfig;
use crate::errors::{AppError, AppResult};
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

/// Wrapper around the lncli-compatible node CLI
pub struct NodeCli {
    bin: String,
    extra_args: Vec<String>,
}

impl NodeCli {
    pub fn new(config: &NodeCliConfig) -> Self {
        Self {
            bin: config.bin.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    /// Dump the active channel set to `out`
    pub fn dump_channels(&self, out: &Path) -> AppResult<()> {
        self.dump("fetch channel list", &["listchannels".to_string()], out)
    }

    /// Dump forwarding history to `out`, bounded by a start time (unix
    /// seconds) and a maximum event count
    pub fn dump_forwarding_history(
        &self,
        out: &Path,
        start_time: i64,
        max_events: u64,
    ) -> AppResult<()> {
        let args = vec![
            "fwdinghistory".to_string(),
            "--start_time".to_string(),
            start_time.to_string(),
            "--max_events".to_string(),
            max_events.to_string(),
        ];
        self.dump("fetch forwarding history", &args, out)
    }

    /// Run one node CLI subcommand with stdout captured to a file and
    /// stderr discarded
    fn dump(&self, step: &'static str, args: &[String], out: &Path) -> AppResult<()> {
        let stdout = File::create(out)?;
        let status = Command::new(&self.bin)
            .args(&self.extra_args)
            .args(args)
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::null())
            .status()
            .map_err(|source| AppError::CommandLaunch {
                step,
                program: self.bin.clone(),
                source,
            })?;

        if !status.success() {
            // Leave no half-written dump behind on failure
            let _ = std::fs::remove_file(out);
            return Err(AppError::CommandFailed {
                step,
                status: status.code().unwrap_or(-1),
            });
        }

        info!("{} -> {}", step, out.display());
        Ok(())
    }
}
