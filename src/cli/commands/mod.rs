pub mod fetch;
pub mod process;
pub mod report;
pub mod show;
