use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "loghour",
    about = "Extract addresses and timestamps from access logs and count requests per hour",
    version,
    long_about = None
)]
pub struct Args {
    /// Log file to analyze (repeatable). Reads stdin when omitted and piped
    #[arg(short, long)]
    pub input: Vec<PathBuf>,

    /// Only keep entries whose address starts with this prefix
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Number of busiest hours to display
    #[arg(short, long)]
    pub top: Option<usize>,

    /// List every matching entry
    #[arg(short, long)]
    pub entries: bool,

    /// Mask the host part of addresses for privacy
    #[arg(long)]
    pub redact: bool,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,

    /// Summarize a JSON file of action records instead of analyzing logs
    #[arg(short, long)]
    pub actions: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize sample_access.log with the built-in sample records
    #[arg(long)]
    pub init: bool,
}
