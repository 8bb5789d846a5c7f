use crate::extract::{extract_log_info, LogEntry};

/// Extract every record and keep the entries whose address starts with `prefix`.
///
/// Input order is preserved. Records that fail extraction are dropped.
pub fn filter_logs<'a, I>(records: I, prefix: &str) -> Vec<LogEntry>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    records
        .into_iter()
        .filter_map(extract_log_info)
        .filter(|entry| entry.address.starts_with(prefix))
        .collect()
}
