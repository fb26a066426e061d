use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::explorer::MempoolClient;
use crate::pipeline;
use crate::pyenv::{self, VirtualEnv};
use crate::report::generate_report;
use crate::utils::fs::resolve_beside_binary;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Generate the CSV report from dumps fetched earlier
#[derive(Args)]
#[command(author, version, about, long_about = None)]
pub struct ProcessCommand {
    /// Channel dump to read (overrides config.toml)
    #[arg(long)]
    channels: Option<PathBuf>,

    /// Forwarding-history dump to read (overrides config.toml)
    #[arg(long)]
    history: Option<PathBuf>,

    /// CSV report output path (overrides config.toml)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to the external processing script (overrides config.toml)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Generate the report in-process instead of invoking the Python script
    #[arg(long)]
    native: bool,
}

impl ProcessCommand {
    pub fn run(&self) -> AppResult<()> {
        let mut config = AppConfig::load()?;
        if let Some(path) = &self.channels {
            config.paths.channels_dump = path.clone();
        }
        if let Some(path) = &self.history {
            config.paths.history_dump = path.clone();
        }
        if let Some(path) = &self.output {
            config.paths.report_csv = path.clone();
        }
        if let Some(script) = &self.script {
            config.processor.script = script.clone();
        }

        // Dumps and the report live beside the binary, like the processor script
        let channels_dump = resolve_beside_binary(&config.paths.channels_dump);
        let history_dump = resolve_beside_binary(&config.paths.history_dump);
        let report_csv = resolve_beside_binary(&config.paths.report_csv);

        if self.native {
            pipeline::run_step("generate report", || {
                let mut funding_times = MempoolClient::new(&config.explorer)?;
                generate_report(
                    &channels_dump,
                    &history_dump,
                    &report_csv,
                    &mut funding_times,
                    Utc::now(),
                )
                .map(|_| ())
            })?;
        } else {
            let script = resolve_beside_binary(&config.processor.script);
            let venv_root = match script.parent() {
                Some(dir) => dir.join(&config.processor.venv_dir),
                None => PathBuf::from(&config.processor.venv_dir),
            };

            let env = pipeline::run_step("activate Python environment", || {
                VirtualEnv::activate(&venv_root)
            })?;
            let processed = pipeline::run_step("generate report", || {
                pyenv::run_processor(&env, &script, &channels_dump, &history_dump, &report_csv)
            });
            drop(env);
            processed?;
        }

        println!("Report written to: {}", report_csv.display());
        Ok(())
    }
}
