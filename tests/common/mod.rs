//! Common Test Utilities
//!
//! Shared fixtures and helper functions used across the unit and integration
//! suites: fake node CLI binaries, stub Python environments, canned dump and
//! report files, and an offline funding-time source.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use ln_channel_report::config::{
    AppConfig, ExplorerConfig, NodeCliConfig, PathsConfig, ProcessorConfig, ReportConfig,
};
use ln_channel_report::errors::AppResult;
use ln_channel_report::explorer::FundingTimeSource;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The report header shared by the native generator and the fixtures
pub const CSV_HEADER: &str =
    "PeerAlias,LocalBalance,#Forwards,TotalFeesEarnt,Age(Days),Fees/Days,Fees/Days Sats,Open,Swap Maturity";

/// Write an executable shell script and return its path
pub fn write_script(path: &Path, body: &str) -> PathBuf {
    let mut file = File::create(path).expect("Failed to create script");
    writeln!(file, "#!/bin/sh").expect("Failed to write shebang");
    writeln!(file, "{}", body).expect("Failed to write script body");
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark script executable");
    }
    path.to_path_buf()
}

/// Fake lncli that answers both subcommands successfully with empty dumps
pub fn fake_node_cli_ok(dir: &Path) -> PathBuf {
    write_script(
        &dir.join("lncli"),
        r#"case "$1" in
  listchannels) echo '{"channels": []}' ;;
  fwdinghistory) echo '{"forwarding_events": []}' ;;
  *) exit 2 ;;
esac
exit 0"#,
    )
}

/// Fake lncli that fails every invocation
pub fn fake_node_cli_failing(dir: &Path) -> PathBuf {
    write_script(&dir.join("lncli"), "exit 1")
}

/// Fake lncli that lists channels but fails on forwarding history
pub fn fake_node_cli_history_failing(dir: &Path) -> PathBuf {
    write_script(
        &dir.join("lncli"),
        r#"case "$1" in
  listchannels) echo '{"channels": []}'; exit 0 ;;
  *) exit 1 ;;
esac"#,
    )
}

/// Create a stub virtualenv beside `script_dir` whose interpreter runs `body`
///
/// The interpreter is invoked as `python <script> <channels> <history> <out>`,
/// so `$2`/`$3`/`$4` are the dump and output paths inside `body`.
pub fn make_stub_venv(script_dir: &Path, body: &str) -> PathBuf {
    let venv_root = script_dir.join("venv");
    std::fs::create_dir_all(venv_root.join("bin")).expect("Failed to create venv dirs");
    write_script(&venv_root.join("bin").join("python"), body);
    venv_root
}

/// Interpreter body that writes a small valid report CSV to `$4`
pub fn processor_body_ok() -> String {
    format!(
        r#"printf '%s\n' '{header}' > "$4"
printf '%s\n' 'alice,100000,3,10.0000,45.0000,0.2222,0.0000022222,True,null' >> "$4"
exit 0"#,
        header = CSV_HEADER
    )
}

/// Build an AppConfig whose paths all live under `dir`
pub fn test_config(dir: &Path, node_bin: &Path, script: &Path) -> AppConfig {
    AppConfig {
        node: NodeCliConfig {
            bin: node_bin.to_string_lossy().into_owned(),
            extra_args: Vec::new(),
        },
        paths: PathsConfig {
            channels_dump: dir.join("listChannels"),
            history_dump: dir.join("fwdingHistory"),
            report_csv: dir.join("peer_activity_report.csv"),
        },
        processor: ProcessorConfig {
            script: script.to_path_buf(),
            venv_dir: "venv".to_string(),
            lookback_days: 365,
            max_events: 50_000,
        },
        report: ReportConfig {
            min_age_days: 30.0,
            table_size: 5,
        },
        explorer: ExplorerConfig {
            base_url: "http://127.0.0.1:0".to_string(),
            timeout_seconds: 1,
        },
    }
}

/// Write a report CSV with the standard header and the given data rows
pub fn write_report_csv(path: &Path, rows: &[&str]) {
    let mut file = File::create(path).expect("Failed to create report CSV");
    writeln!(file, "{}", CSV_HEADER).expect("Failed to write header");
    for row in rows {
        writeln!(file, "{}", row).expect("Failed to write row");
    }
}

/// Offline funding-time source backed by a fixed txid map
pub struct FixedFundingTimes {
    times: HashMap<String, DateTime<Utc>>,
}

impl FixedFundingTimes {
    pub fn new(times: HashMap<String, DateTime<Utc>>) -> Self {
        Self { times }
    }

    pub fn empty() -> Self {
        Self {
            times: HashMap::new(),
        }
    }
}

impl FundingTimeSource for FixedFundingTimes {
    fn confirmation_time(&mut self, txid: &str) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.times.get(txid).copied())
    }
}
