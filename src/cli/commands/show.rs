use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::report::{filter_report, table};
use crate::utils::fs::resolve_beside_binary;
use clap::Args;
use std::path::PathBuf;

/// Filter and display an existing CSV report
#[derive(Args)]
#[command(author, version, about, long_about = None)]
pub struct ShowCommand {
    /// CSV report to display (overrides config.toml)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Minimum channel age in days for the filter (overrides config.toml)
    #[arg(long)]
    min_age_days: Option<f64>,

    /// Number of worst-performing channels to display (overrides config.toml)
    #[arg(long)]
    top: Option<usize>,
}

impl ShowCommand {
    pub fn run(&self) -> AppResult<()> {
        let mut config = AppConfig::load()?;
        if let Some(path) = &self.csv {
            config.paths.report_csv = path.clone();
        }
        if let Some(age) = self.min_age_days {
            config.report.min_age_days = age;
        }
        if let Some(top) = self.top {
            config.report.table_size = top;
        }

        // The report lives beside the binary, like the processor script
        let report_csv = resolve_beside_binary(&config.paths.report_csv);
        let filtered = filter_report(
            &report_csv,
            config.report.min_age_days,
            config.report.table_size,
        )?;
        table::print_report(&filtered, config.report.table_size, config.report.min_age_days);
        Ok(())
    }
}
