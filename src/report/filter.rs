//! Report filtering and ranking
//!
//! Selects open channels old enough and funded enough to be judged, then
//! ranks them ascending by fee income per day so the worst performers surface
//! first. Column positions are the contract with the processor; header names
//! are checked but a mismatch only warns, so the processor may evolve the
//! columns this filter does not consume.

use crate::errors::{AppError, AppResult};
use crate::report::{
    AGE_COL, FEES_PER_DAY_COL, LOCAL_BALANCE_COL, MIN_COLUMNS, OPEN_COL, REPORT_HEADER,
};
use csv::StringRecord;
use std::path::Path;
use tracing::warn;

/// Outcome of filtering a peer activity CSV
#[derive(Debug)]
pub struct FilteredReport {
    pub header: StringRecord,
    /// Total rows satisfying the predicate, before truncation
    pub qualifying: usize,
    /// Up to `table_size` qualifying rows, worst fees/day first
    pub worst: Vec<StringRecord>,
}

/// Filter the report at `path` and keep the `table_size` worst performers
pub fn filter_report(
    path: &Path,
    min_age_days: f64,
    table_size: usize,
) -> AppResult<FilteredReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let header = reader.headers()?.clone();
    if header.len() < MIN_COLUMNS {
        return Err(AppError::InvalidData(format!(
            "report header has {} columns, expected at least {}",
            header.len(),
            MIN_COLUMNS
        )));
    }
    check_header_names(&header);

    let mut qualifying: Vec<(StringRecord, f64)> = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() < MIN_COLUMNS {
            return Err(AppError::InvalidData(format!(
                "report row {} has {} columns, expected at least {}",
                index + 2,
                record.len(),
                MIN_COLUMNS
            )));
        }
        if let Some(fees_per_day) = qualify(&record, min_age_days) {
            qualifying.push((record, fees_per_day));
        }
    }

    qualifying.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    let total = qualifying.len();
    let worst = qualifying
        .into_iter()
        .take(table_size)
        .map(|(record, _)| record)
        .collect();

    Ok(FilteredReport {
        header,
        qualifying: total,
        worst,
    })
}

/// Apply the qualification predicate, returning the row's fees/day sort key
///
/// A row qualifies when its Open flag is literally "True", its age is at
/// least `min_age_days` and its local balance is strictly positive. Rows
/// whose numeric fields do not parse never qualify.
fn qualify(record: &StringRecord, min_age_days: f64) -> Option<f64> {
    if record.get(OPEN_COL)? != "True" {
        return None;
    }
    let age_days: f64 = record.get(AGE_COL)?.trim().parse().ok()?;
    let local_balance: f64 = record.get(LOCAL_BALANCE_COL)?.trim().parse().ok()?;
    if age_days < min_age_days || local_balance <= 0.0 {
        return None;
    }
    record.get(FEES_PER_DAY_COL)?.trim().parse().ok()
}

/// Warn when the consumed columns are not named what the native contract
/// names them; positional order is still honoured
fn check_header_names(header: &StringRecord) {
    for col in [LOCAL_BALANCE_COL, AGE_COL, FEES_PER_DAY_COL, OPEN_COL] {
        let found = header.get(col).unwrap_or("");
        if found != REPORT_HEADER[col] {
            warn!(
                "Report column {} is named '{}', expected '{}'; trusting positional order",
                col + 1,
                found,
                REPORT_HEADER[col]
            );
        }
    }
}
