use anyhow::Result;
use chrono::NaiveDateTime;
use std::io::{self, IsTerminal};
use std::time::Instant;
use tracing::{info, warn};

use crate::aggregate::count_entries_by_hour;
use crate::extract::LogEntry;
use crate::filter::filter_logs;
use crate::stats::{AnalysisResult, LogStats, TimeRange};
use crate::utils::format_number;
use crate::{source, Args};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn analyze_logs(args: &Args) -> Result<AnalysisResult> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "log_analysis",
        prefix = %args.prefix,
        "Starting log analysis"
    );

    let records = if !args.input.is_empty() {
        source::load_records(&args.input)?
    } else if !io::stdin().is_terminal() {
        info!(action = "load", component = "stdin", "Reading records from stdin");
        source::read_records(io::stdin().lock())?
    } else {
        source::sample_records()
    };

    let mut result = analyze_records(&records, &args.prefix);
    if args.redact {
        result.stats.redact_addresses();
    }

    let total_time = total_start_time.elapsed();
    info!(
        action = "complete",
        component = "log_analysis",
        records_read = result.stats.records_read,
        entries = result.stats.entries.len(),
        duration_ms = total_time.as_millis(),
        "Analysis completed successfully"
    );

    Ok(result)
}

pub fn analyze_records(records: &[Option<String>], prefix: &str) -> AnalysisResult {
    // Extract once with an empty prefix; the unparsed count falls out of the difference
    let extracted = filter_logs(records.iter().map(Option::as_deref), "");
    let records_unparsed = records.len() - extracted.len();
    if records_unparsed > 0 {
        warn!(
            action = "extract",
            component = "log_analysis",
            records_unparsed,
            "Records without an address and timestamp"
        );
    }

    let entries: Vec<LogEntry> = extracted
        .into_iter()
        .filter(|entry| entry.address.starts_with(prefix))
        .collect();
    let hour_counts = count_entries_by_hour(&entries);
    let time_range = time_range(&entries);

    AnalysisResult {
        prefix: prefix.to_string(),
        time_range,
        stats: LogStats {
            records_read: records.len(),
            records_unparsed,
            entries,
            hour_counts,
        },
    }
}

/// Earliest and latest real instants among the entries.
///
/// Timestamps that have the right shape but name no calendar instant
/// (month 13, hour 25) are left out of the range.
pub fn time_range(entries: &[LogEntry]) -> Option<TimeRange> {
    let instants: Vec<(NaiveDateTime, &str)> = entries
        .iter()
        .filter_map(|e| {
            NaiveDateTime::parse_from_str(&e.timestamp, TIMESTAMP_FORMAT)
                .ok()
                .map(|dt| (dt, e.timestamp.as_str()))
        })
        .collect();

    let earliest = instants.iter().min_by_key(|(dt, _)| *dt)?;
    let latest = instants.iter().max_by_key(|(dt, _)| *dt)?;

    Some(TimeRange {
        earliest: earliest.1.to_string(),
        latest: latest.1.to_string(),
        hours_between: (latest.0 - earliest.0).num_hours(),
    })
}

pub fn print_analysis_results(result: &AnalysisResult, args: &Args) {
    let stats = &result.stats;

    println!("\n--- Access Log Analysis ---");
    println!("Records read: {}", format_number(stats.records_read));
    println!(
        "Records skipped (no match): {}",
        format_number(stats.records_unparsed)
    );
    println!(
        "Entries matching prefix '{}': {}",
        result.prefix,
        format_number(stats.entries.len())
    );

    match &result.time_range {
        Some(range) if range.hours_between > 0 => println!(
            "Time range: {} to {} ({} hours)",
            range.earliest, range.latest, range.hours_between
        ),
        Some(range) => println!("Time range: {} to {}", range.earliest, range.latest),
        None => println!("Time range: No data available"),
    }

    if args.entries {
        println!("\nEntries:");
        for entry in &stats.entries {
            println!("- {} at {}", entry.address, entry.timestamp);
        }
    }

    let hours = match args.top {
        Some(top_count) => {
            let busiest = stats.hours_by_count();
            println!(
                "\nTop {} busiest hours:",
                std::cmp::min(top_count, busiest.len())
            );
            busiest.into_iter().take(top_count).collect::<Vec<_>>()
        }
        None => {
            println!("\nLog counts by hour:");
            stats.hours_chronological()
        }
    };

    for (hour, count) in hours {
        println!("- {}: {} logs", hour, format_number(*count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records(lines: &[Option<&str>]) -> Vec<Option<String>> {
        lines.iter().map(|l| l.map(str::to_string)).collect()
    }

    #[test]
    fn test_analyze_records_pipeline() {
        let records = records(&[
            Some("192.168.1.1 [2025-08-14 11:49:00] GET /api"),
            Some("10.0.0.1 [2025-08-14 11:50:00] POST /login"),
            Some("192.168.1.2 [2025-08-14 12:01:00] GET /data"),
            Some("invalid log entry"),
            Some("192.168.1.3 [2025-08-14 11:55:00] GET /api"),
            None,
        ]);

        let result = analyze_records(&records, "192.168");
        assert_eq!(result.stats.records_read, 6);
        assert_eq!(result.stats.records_unparsed, 2);
        assert_eq!(result.stats.entries.len(), 3);
        assert_eq!(result.stats.hour_counts.get("2025-08-14 11"), Some(&2));
        assert_eq!(result.stats.hour_counts.get("2025-08-14 12"), Some(&1));
        assert_eq!(
            result.time_range,
            Some(TimeRange {
                earliest: "2025-08-14 11:49:00".to_string(),
                latest: "2025-08-14 12:01:00".to_string(),
                hours_between: 0,
            })
        );
    }

    #[test]
    fn test_unparsed_count_ignores_prefix() {
        let records = records(&[
            Some("10.0.0.1 [2025-08-14 11:50:00]"),
            Some("172.16.0.1 [2025-08-14 11:51:00]"),
            Some("garbage"),
        ]);
        let result = analyze_records(&records, "10.");
        assert_eq!(result.stats.records_read, 3);
        assert_eq!(result.stats.records_unparsed, 1);
        assert_eq!(result.stats.entries.len(), 1);
    }

    #[test]
    fn test_analyze_no_records() {
        let result = analyze_records(&[], "10.");
        assert_eq!(result.stats.records_read, 0);
        assert!(result.stats.hour_counts.is_empty());
        assert_eq!(result.time_range, None);
    }

    #[test]
    fn test_time_range_skips_impossible_instants() {
        let entries = vec![
            LogEntry::new("1.1.1.1", "2025-13-40 11:00:00"),
            LogEntry::new("1.1.1.2", "2025-08-14 09:00:00"),
            LogEntry::new("1.1.1.3", "2025-08-15 10:30:00"),
        ];
        let range = time_range(&entries).unwrap();
        assert_eq!(range.earliest, "2025-08-14 09:00:00");
        assert_eq!(range.latest, "2025-08-15 10:30:00");
        assert_eq!(range.hours_between, 25);
    }

    #[test]
    fn test_impossible_instant_still_counted_by_hour() {
        let records = records(&[Some("1.1.1.1 [2025-13-40 11:00:00]")]);
        let result = analyze_records(&records, "");
        assert_eq!(result.stats.hour_counts.get("2025-13-40 11"), Some(&1));
        assert_eq!(result.time_range, None);
    }
}
