//! Peer activity report: native generation, filtering and display

pub mod filter;
pub mod generate;
pub mod table;

pub use filter::{filter_report, FilteredReport};
pub use generate::{generate_report, ReportStats};
pub use table::{qualifying_note, render_table};

/// Column order of the peer activity CSV. The filter only consumes four of
/// these positions; the rest belong to the processor's side of the contract.
pub const REPORT_HEADER: [&str; 9] = [
    "PeerAlias",
    "LocalBalance",
    "#Forwards",
    "TotalFeesEarnt",
    "Age(Days)",
    "Fees/Days",
    "Fees/Days Sats",
    "Open",
    "Swap Maturity",
];

/// 0-based positions of the columns the filter consumes
pub const LOCAL_BALANCE_COL: usize = 1;
pub const AGE_COL: usize = 4;
pub const FEES_PER_DAY_COL: usize = 6;
pub const OPEN_COL: usize = 7;

/// Minimum column count for a well-formed report row
pub const MIN_COLUMNS: usize = 8;
