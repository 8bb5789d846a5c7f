pub mod actions;
pub mod aggregate;
pub mod analyze;
pub mod args;
pub mod extract;
pub mod filter;
pub mod source;
pub mod stats;
pub mod utils;


pub use aggregate::{count_by_hour, count_entries_by_hour, hour_key};
pub use analyze::{analyze_logs, analyze_records};
pub use args::Args;
pub use extract::{extract_log_info, LogEntry};
pub use filter::filter_logs;
pub use stats::{AnalysisResult, LogStats, TimeRange};
