pub mod fs;
pub mod time;
