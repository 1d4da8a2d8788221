//! CLI command handlers. Each command is in its own file.

mod checksum;
mod export;
mod stats;

pub use checksum::run_checksum;
pub use export::{run_export, ExportArgs};
pub use stats::{run_stats, StatsArgs};
