use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::extract::LogEntry;

const HOUR_KEY_LEN: usize = 13;

static HOUR_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}$").expect("Valid regex pattern"));

/// Truncate a timestamp to its `YYYY-MM-DD HH` prefix, if it has one.
pub fn hour_key(timestamp: Option<&str>) -> Option<&str> {
    // `get` refuses to split a multi-byte char, which could never be a valid key anyway
    let hour = timestamp?.get(..HOUR_KEY_LEN)?;
    HOUR_KEY_REGEX.is_match(hour).then_some(hour)
}

/// Count pairs per hour bucket.
///
/// Pairs whose timestamp is missing, too short or not shaped like a timestamp
/// are skipped; the address half is never looked at.
pub fn count_by_hour<'a, I>(pairs: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for (_address, timestamp) in pairs {
        match hour_key(timestamp) {
            Some(hour) => *counts.entry(hour.to_string()).or_insert(0) += 1,
            None => skipped += 1,
        }
    }

    debug!(
        action = "complete",
        component = "hour_aggregator",
        bucket_count = counts.len(),
        skipped,
        "Hour aggregation completed"
    );
    counts
}

pub fn count_entries_by_hour(entries: &[LogEntry]) -> HashMap<String, usize> {
    count_by_hour(entries.iter().map(LogEntry::as_pair))
}
