use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::explorer::MempoolClient;
use crate::node::NodeCli;
use crate::pipeline;
use crate::pyenv::{self, VirtualEnv};
use crate::report::{filter_report, generate_report, table};
use crate::utils::fs::{remove_files, resolve_beside_binary};
use crate::utils::time::lookback_start;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
#[command(author, version, about, long_about = None)]
pub struct ReportCommand {
    /// Node CLI binary (overrides config.toml and env vars)
    #[arg(long)]
    lncli: Option<String>,

    /// Path to the external processing script (overrides config.toml)
    #[arg(long)]
    script: Option<PathBuf>,

    /// CSV report output path (overrides config.toml)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Generate the report in-process instead of invoking the Python script
    #[arg(long)]
    native: bool,

    /// Forwarding-history lookback window in days (overrides config.toml)
    #[arg(long)]
    lookback_days: Option<u64>,

    /// Maximum forwarding events to request (overrides config.toml)
    #[arg(long)]
    max_events: Option<u64>,

    /// Minimum channel age in days for the filter (overrides config.toml)
    #[arg(long)]
    min_age_days: Option<f64>,

    /// Number of worst-performing channels to display (overrides config.toml)
    #[arg(long)]
    top: Option<usize>,
}

impl ReportCommand {
    pub fn run(&self) -> AppResult<()> {
        let mut config = AppConfig::load()?;

        // CLI arguments override config values
        if let Some(bin) = &self.lncli {
            config.node.bin = bin.clone();
        }
        if let Some(script) = &self.script {
            config.processor.script = script.clone();
        }
        if let Some(output) = &self.output {
            config.paths.report_csv = output.clone();
        }
        if let Some(days) = self.lookback_days {
            config.processor.lookback_days = days;
        }
        if let Some(max) = self.max_events {
            config.processor.max_events = max;
        }
        if let Some(age) = self.min_age_days {
            config.report.min_age_days = age;
        }
        if let Some(top) = self.top {
            config.report.table_size = top;
        }

        execute(&config, self.native)
    }
}

/// Run the full report pipeline
///
/// Fetch failures, a missing Python environment and processing failures are
/// fatal; display and cleanup failures only warn. The Python environment is
/// a drop guard, so it is deactivated even when processing fails.
pub fn execute(config: &AppConfig, native: bool) -> AppResult<()> {
    let node = NodeCli::new(&config.node);
    // Dumps and the report live beside the binary, like the processor script
    let channels_dump = resolve_beside_binary(&config.paths.channels_dump);
    let history_dump = resolve_beside_binary(&config.paths.history_dump);
    let report_csv = resolve_beside_binary(&config.paths.report_csv);
    let now = Utc::now();

    pipeline::run_step("fetch channel list", || node.dump_channels(&channels_dump))?;

    let start_time = lookback_start(now, config.processor.lookback_days);
    pipeline::run_step("fetch forwarding history", || {
        node.dump_forwarding_history(&history_dump, start_time, config.processor.max_events)
    })?;

    if native {
        pipeline::run_step("generate report", || {
            let mut funding_times = MempoolClient::new(&config.explorer)?;
            generate_report(
                &channels_dump,
                &history_dump,
                &report_csv,
                &mut funding_times,
                now,
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
        // Deactivate before a processing failure propagates
        drop(env);
        processed?;
    }

    pipeline::run_lenient("display report", || {
        let filtered = filter_report(
            &report_csv,
            config.report.min_age_days,
            config.report.table_size,
        )?;
        table::print_report(&filtered, config.report.table_size, config.report.min_age_days);
        Ok(())
    });

    pipeline::run_lenient("clean up dump files", || {
        remove_files(&[channels_dump.as_path(), history_dump.as_path()])?;
        info!("Removed transient dump files");
        Ok(())
    });

    Ok(())
}
