use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::node::NodeCli;
use crate::pipeline;
use crate::utils::fs::resolve_beside_binary;
use crate::utils::time::lookback_start;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Fetch the raw dumps without processing them, for inspection or for a
/// later `process` run
#[derive(Args)]
#[command(author, version, about, long_about = None)]
pub struct FetchCommand {
    /// Node CLI binary (overrides config.toml and env vars)
    #[arg(long)]
    lncli: Option<String>,

    /// Channel dump output path (overrides config.toml)
    #[arg(long)]
    channels_out: Option<PathBuf>,

    /// Forwarding-history dump output path (overrides config.toml)
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Forwarding-history lookback window in days (overrides config.toml)
    #[arg(long)]
    lookback_days: Option<u64>,

    /// Maximum forwarding events to request (overrides config.toml)
    #[arg(long)]
    max_events: Option<u64>,
}

impl FetchCommand {
    pub fn run(&self) -> AppResult<()> {
        let mut config = AppConfig::load()?;
        if let Some(bin) = &self.lncli {
            config.node.bin = bin.clone();
        }
        if let Some(path) = &self.channels_out {
            config.paths.channels_dump = path.clone();
        }
        if let Some(path) = &self.history_out {
            config.paths.history_dump = path.clone();
        }
        if let Some(days) = self.lookback_days {
            config.processor.lookback_days = days;
        }
        if let Some(max) = self.max_events {
            config.processor.max_events = max;
        }

        let node = NodeCli::new(&config.node);
        // Dumps land beside the binary, like the processor script
        let channels_dump = resolve_beside_binary(&config.paths.channels_dump);
        let history_dump = resolve_beside_binary(&config.paths.history_dump);

        pipeline::run_step("fetch channel list", || {
            node.dump_channels(&channels_dump)
        })?;

        let start_time = lookback_start(Utc::now(), config.processor.lookback_days);
        pipeline::run_step("fetch forwarding history", || {
            node.dump_forwarding_history(&history_dump, start_time, config.processor.max_events)
        })?;

        println!("Channel dump written to: {}", channels_dump.display());
        println!(
            "Forwarding history written to: {}",
            history_dump.display()
        );
        Ok(())
    }
}
