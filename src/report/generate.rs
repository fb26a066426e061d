//! Native report generation
//!
//! In-process replacement for the external Python processor: joins the
//! channel dump with the forwarding history, derives per-peer fee metrics and
//! writes the nine-column peer activity CSV. The output contract is identical
//! to the external script's, so the filter and display stages do not care
//! which backend produced the file.

use crate::errors::AppResult;
use crate::explorer::FundingTimeSource;
use crate::report::REPORT_HEADER;
use crate::types::{ChannelsDump, ForwardingDump};
use crate::utils::time::seconds_to_days;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Per-peer aggregate built up while scanning the dumps
#[derive(Debug, Default)]
struct PeerAggregate {
    /// Longest channel age in seconds across this peer's channels
    age_seconds: f64,
    forwards: u64,
    total_fee_msat: i64,
    /// Sum of local balances across this peer's channels, in sats
    local_balance: i64,
    /// Present in the channel list, as opposed to only in forwarding history
    is_open: bool,
}

/// Summary of a generation run, for logging
#[derive(Debug)]
pub struct ReportStats {
    pub channels: usize,
    pub events: usize,
    pub peers: usize,
}

/// Generate the peer activity CSV from the two raw dumps
///
/// `now` anchors age calculations; callers pass `Utc::now()` outside tests.
pub fn generate_report(
    channels_dump: &Path,
    history_dump: &Path,
    report_csv: &Path,
    funding_times: &mut dyn FundingTimeSource,
    now: DateTime<Utc>,
) -> AppResult<ReportStats> {
    let channels: ChannelsDump =
        serde_json::from_str(&std::fs::read_to_string(channels_dump)?)?;
    let history: ForwardingDump =
        serde_json::from_str(&std::fs::read_to_string(history_dump)?)?;

    let mut peers: HashMap<String, PeerAggregate> = HashMap::new();

    for channel in &channels.channels {
        let age_seconds = channel_age_seconds(channel, funding_times, now);
        let balance = channel.local_balance_sats();

        let Some(alias) = channel.peer_alias.clone() else {
            warn!("Channel missing peer_alias, skipping: {:?}", channel.channel_point);
            continue;
        };

        let aggregate = peers.entry(alias).or_default();
        aggregate.is_open = true;
        aggregate.local_balance += balance;
        // A peer with several channels keeps its oldest channel's age
        if age_seconds > aggregate.age_seconds {
            aggregate.age_seconds = age_seconds;
        }
    }

    for event in &history.forwarding_events {
        let fee_msat = event.fee_msat();
        if let Some(alias) = event.peer_alias_in.as_deref() {
            credit_forward(&mut peers, alias, fee_msat);
        }
        if let Some(alias) = event.peer_alias_out.as_deref() {
            if event.peer_alias_in.as_deref() != Some(alias) {
                credit_forward(&mut peers, alias, fee_msat);
            }
        }
    }

    let stats = ReportStats {
        channels: channels.channels.len(),
        events: history.forwarding_events.len(),
        peers: peers.len(),
    };

    write_report(report_csv, peers)?;
    info!(
        "Report generated from {} channels and {} forwarding events ({} peers) -> {}",
        stats.channels,
        stats.events,
        stats.peers,
        report_csv.display()
    );
    Ok(stats)
}

fn channel_age_seconds(
    channel: &crate::types::Channel,
    funding_times: &mut dyn FundingTimeSource,
    now: DateTime<Utc>,
) -> f64 {
    let Some(txid) = channel.funding_txid() else {
        warn!("Channel missing channel_point: {:?}", channel.peer_alias);
        return 0.0;
    };

    match funding_times.confirmation_time(txid) {
        Ok(Some(confirmed_at)) => (now - confirmed_at).num_seconds().max(0) as f64,
        Ok(None) => {
            warn!("No confirmation time for funding txid {}", txid);
            0.0
        }
        Err(e) => {
            warn!("Timestamp lookup failed for funding txid {}: {}", txid, e);
            0.0
        }
    }
}

fn credit_forward(peers: &mut HashMap<String, PeerAggregate>, alias: &str, fee_msat: i64) {
    let aggregate = peers.entry(alias.to_string()).or_default();
    aggregate.forwards += 1;
    aggregate.total_fee_msat += fee_msat;
}

fn write_report(report_csv: &Path, peers: HashMap<String, PeerAggregate>) -> AppResult<()> {
    let mut rows: Vec<(String, PeerAggregate)> = peers.into_iter().collect();

    // Best earners relative to committed capital first; alias breaks ties so
    // the output is stable across runs
    rows.sort_by(|(alias_a, a), (alias_b, b)| {
        fees_per_day_sats(b)
            .total_cmp(&fees_per_day_sats(a))
            .then_with(|| alias_a.cmp(alias_b))
    });

    let mut writer = csv::Writer::from_path(report_csv)?;
    writer.write_record(REPORT_HEADER)?;

    for (alias, aggregate) in rows {
        let age_days = seconds_to_days(aggregate.age_seconds);
        let total_fees_sats = aggregate.total_fee_msat as f64 / 1000.0;
        let fees_per_day = if age_days > 0.0 {
            total_fees_sats / age_days
        } else {
            0.0
        };
        let row: Vec<String> = vec![
            alias,
            aggregate.local_balance.to_string(),
            aggregate.forwards.to_string(),
            format!("{:.4}", total_fees_sats),
            format!("{:.4}", age_days),
            format!("{:.4}", fees_per_day),
            format!("{:.10}", fees_per_day_sats(&aggregate)),
            if aggregate.is_open { "True" } else { "False" }.to_string(),
            "null".to_string(),
        ];
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Fees per day normalised by local balance, the CSV's primary sort key
fn fees_per_day_sats(aggregate: &PeerAggregate) -> f64 {
    let age_days = seconds_to_days(aggregate.age_seconds);
    if age_days <= 0.0 || aggregate.local_balance <= 0 {
        return 0.0;
    }
    let fees_per_day = aggregate.total_fee_msat as f64 / 1000.0 / age_days;
    fees_per_day / aggregate.local_balance as f64
}
