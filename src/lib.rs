//! Lightning Network channel performance reporter
//!

pub mod cli;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod node;
pub mod pipeline;
pub mod pyenv;
pub mod report;
pub mod types;
pub mod utils;
