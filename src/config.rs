use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub node: NodeCliConfig,
    pub paths: PathsConfig,
    pub processor: ProcessorConfig,
    pub report: ReportConfig,
    pub explorer: ExplorerConfig,
}

/// How to invoke the lncli-compatible node CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCliConfig {
    /// Binary name or path (e.g. "lncli")
    pub bin: String,
    /// Arguments inserted before the subcommand (e.g. --network, --macaroonpath)
    pub extra_args: Vec<String>,
}

/// Locations of the transient dumps and the CSV report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub channels_dump: PathBuf,
    pub history_dump: PathBuf,
    pub report_csv: PathBuf,
}

/// External processor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Path to the Python processing script. A relative path is resolved
    /// against the directory containing this binary, falling back to the
    /// working directory.
    pub script: PathBuf,
    /// Virtual environment directory name, looked up beside the script
    pub venv_dir: String,
    /// Forwarding history lookback window in days
    pub lookback_days: u64,
    /// Maximum forwarding events to request from the node
    pub max_events: u64,
}

/// Report filter and display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Minimum channel age in days for a row to qualify
    pub min_age_days: f64,
    /// Number of worst-performing channels to display
    pub table_size: usize,
}

/// Blockchain explorer configuration for native report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mempool.space/api".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let explorer_defaults = ExplorerConfig::default();
        let config = Config::builder()
            // Start with default values
            .set_default("node.bin", "lncli")?
            .set_default("node.extra_args", Vec::<String>::new())?
            .set_default("paths.channels_dump", "listChannels")?
            .set_default("paths.history_dump", "fwdingHistory")?
            .set_default("paths.report_csv", "peer_activity_report.csv")?
            .set_default(
                "processor.script",
                "process_channel_and_forwarding_data.py",
            )?
            .set_default("processor.venv_dir", "venv")?
            .set_default("processor.lookback_days", 365)?
            .set_default("processor.max_events", 50_000)?
            .set_default("report.min_age_days", 30.0)?
            .set_default("report.table_size", 5)?
            .set_default("explorer.base_url", explorer_defaults.base_url)?
            .set_default(
                "explorer.timeout_seconds",
                explorer_defaults.timeout_seconds,
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables
            // e.g. CHANNEL_REPORT_NODE__BIN overrides node.bin
            .add_source(
                config::Environment::with_prefix("CHANNEL_REPORT").separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
