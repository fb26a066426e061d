//! Deserialisation types for the node CLI JSON dumps
//!
//! Field coverage is deliberately minimal: only the fields the report
//! generator consumes are modelled, everything else in the dumps is ignored.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Top-level shape of the `listchannels` dump
#[derive(Debug, Deserialize)]
pub struct ChannelsDump {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// A single channel record from the `listchannels` dump
#[derive(Debug, Deserialize)]
pub struct Channel {
    pub peer_alias: Option<String>,
    /// Funding outpoint as "txid:vout"
    pub channel_point: Option<String>,
    /// lnd encodes balances as JSON strings; accept numbers too
    #[serde(default)]
    pub local_balance: Option<Value>,
}

impl Channel {
    /// Local balance in sats, defaulting to 0 when absent or unparseable
    pub fn local_balance_sats(&self) -> i64 {
        match self.local_balance.as_ref().and_then(parse_integer) {
            Some(balance) => balance,
            None => {
                if self.local_balance.is_some() {
                    warn!(
                        "Could not convert local_balance {:?} to an integer for channel_point {:?}, defaulting to 0",
                        self.local_balance, self.channel_point
                    );
                }
                0
            }
        }
    }

    /// Funding txid, i.e. the outpoint up to the first ':'
    pub fn funding_txid(&self) -> Option<&str> {
        self.channel_point
            .as_deref()
            .map(|point| point.split(':').next().unwrap_or(point))
    }
}

/// Top-level shape of the `fwdinghistory` dump
#[derive(Debug, Deserialize)]
pub struct ForwardingDump {
    #[serde(default)]
    pub forwarding_events: Vec<ForwardingEvent>,
}

/// A single routed payment from the `fwdinghistory` dump
#[derive(Debug, Deserialize)]
pub struct ForwardingEvent {
    pub peer_alias_in: Option<String>,
    pub peer_alias_out: Option<String>,
    #[serde(default)]
    pub fee_msat: Option<Value>,
}

impl ForwardingEvent {
    /// Fee earned on this forward in msat, 0 when absent or unparseable
    pub fn fee_msat(&self) -> i64 {
        self.fee_msat.as_ref().and_then(parse_integer).unwrap_or(0)
    }
}

/// Parse a JSON value that is either an integer or a stringified integer
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
