//! Blockchain explorer client for funding transaction timestamps
//!
//! Channel age is derived from the confirmation time of the channel's funding
//! transaction, fetched from a mempool.space-compatible REST API. Lookups are
//! cached per txid within a run and made exactly once; there is no retry.

use crate::config::ExplorerConfig;
use crate::errors::{AppResult, ExplorerError};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Source of funding-transaction confirmation times
///
/// Abstracted so the report generator can be tested without the network.
pub trait FundingTimeSource {
    /// Confirmation time of `txid`, or `None` when unconfirmed or unknown
    fn confirmation_time(&mut self, txid: &str) -> AppResult<Option<DateTime<Utc>>>;
}

/// Relevant subset of the explorer's `/tx/{txid}` response
#[derive(Debug, Deserialize)]
struct TxInfo {
    status: TxStatus,
}

#[derive(Debug, Deserialize)]
struct TxStatus {
    #[serde(default)]
    confirmed: bool,
    block_time: Option<i64>,
}

/// mempool.space REST client with a per-run timestamp cache
pub struct MempoolClient {
    base_url: String,
    client: reqwest::blocking::Client,
    cache: HashMap<String, Option<DateTime<Utc>>>,
}

impl MempoolClient {
    pub fn new(config: &ExplorerConfig) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ExplorerError::InvalidResponse {
                txid: String::new(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            cache: HashMap::new(),
        })
    }

    fn fetch(&self, txid: &str) -> Result<Option<DateTime<Utc>>, ExplorerError> {
        let url = format!("{}/tx/{}", self.base_url, txid);
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| ExplorerError::RequestFailed {
                txid: txid.to_string(),
                source,
            })?;

        let info: TxInfo =
            response
                .json()
                .map_err(|e| ExplorerError::InvalidResponse {
                    txid: txid.to_string(),
                    reason: e.to_string(),
                })?;

        if !info.status.confirmed {
            return Ok(None);
        }
        match info.status.block_time {
            Some(ts) => Ok(Utc.timestamp_opt(ts, 0).single()),
            None => Ok(None),
        }
    }
}

impl FundingTimeSource for MempoolClient {
    fn confirmation_time(&mut self, txid: &str) -> AppResult<Option<DateTime<Utc>>> {
        if let Some(cached) = self.cache.get(txid) {
            debug!("Timestamp cache hit for {}", txid);
            return Ok(*cached);
        }

        let timestamp = self.fetch(txid)?;
        self.cache.insert(txid.to_string(), timestamp);
        Ok(timestamp)
    }
}
