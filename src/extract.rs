use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

/// Dotted-quad address followed by a bracketed `YYYY-MM-DD HH:MM:SS` timestamp.
static LOG_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^((?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[0-9]?[0-9])\.){3}",
        r"(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[0-9]?[0-9]))",
        r"\s+\[([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\]",
    ))
    .expect("Valid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub address: String,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(address: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Borrow the entry as the loosely-typed pair the hour aggregator accepts.
    pub fn as_pair(&self) -> (Option<&str>, Option<&str>) {
        (Some(&self.address), Some(&self.timestamp))
    }
}

/// Pull the address and timestamp out of the start of a raw log line.
///
/// `None` input and lines that do not begin with the expected shape both
/// yield `None`; anything after the closing bracket is ignored.
pub fn extract_log_info(record: Option<&str>) -> Option<LogEntry> {
    let line = record?;
    let Some(captures) = LOG_LINE_REGEX.captures(line) else {
        trace!(action = "skip", component = "line_extractor", "Record did not match");
        return None;
    };

    let address = captures.get(1)?.as_str();
    let timestamp = captures.get(2)?.as_str();
    Some(LogEntry::new(address, timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_address_and_timestamp() {
        let entry = extract_log_info(Some("192.168.1.1 [2025-08-14 11:49:00] GET /api"));
        assert_eq!(
            entry,
            Some(LogEntry::new("192.168.1.1", "2025-08-14 11:49:00"))
        );
    }

    #[test]
    fn test_invalid_line_is_no_match() {
        assert_eq!(extract_log_info(Some("invalid log entry")), None);
        assert_eq!(extract_log_info(Some("")), None);
    }

    #[test]
    fn test_octets_above_255_rejected() {
        assert_eq!(
            extract_log_info(Some("999.999.999.999 [2025-08-14 11:49:00]")),
            None
        );
        assert_eq!(
            extract_log_info(Some("192.168.1.256 [2025-08-14 11:49:00]")),
            None
        );
        assert_eq!(
            extract_log_info(Some("300.1.1.1 [2025-08-14 11:49:00]")),
            None
        );
    }

    #[test]
    fn test_absent_record_is_no_match() {
        assert_eq!(extract_log_info(None), None);
    }

    #[test]
    fn test_octet_boundaries_accepted() {
        let entry = extract_log_info(Some("0.00.255.249 [1999-01-01 00:00:00]")).unwrap();
        assert_eq!(entry.address, "0.00.255.249");
        assert_eq!(entry.timestamp, "1999-01-01 00:00:00");
    }

    #[test]
    fn test_multiple_whitespace_between_address_and_timestamp() {
        let entry = extract_log_info(Some("10.0.0.1 \t [2025-08-14 11:50:00]")).unwrap();
        assert_eq!(entry.address, "10.0.0.1");
    }

    #[test]
    fn test_match_is_anchored_at_start() {
        assert_eq!(
            extract_log_info(Some(" 10.0.0.1 [2025-08-14 11:50:00]")),
            None
        );
        assert_eq!(
            extract_log_info(Some("GET 10.0.0.1 [2025-08-14 11:50:00]")),
            None
        );
    }

    #[test]
    fn test_malformed_timestamps_rejected() {
        for line in [
            "10.0.0.1 [2025-8-14 11:50:00]",
            "10.0.0.1 [25-08-14 11:50:00]",
            "10.0.0.1 [2025-08-14 11:50]",
            "10.0.0.1 [2025/08/14 11:50:00]",
            "10.0.0.1 [2025-08-14T11:50:00]",
            "10.0.0.1 2025-08-14 11:50:00",
            "10.0.0.1 [2025-08-14 11:50:00",
            "10.0.0.1[2025-08-14 11:50:00]",
        ] {
            assert_eq!(extract_log_info(Some(line)), None, "line: {line}");
        }
    }

    #[test]
    fn test_trailing_content_ignored() {
        let entry =
            extract_log_info(Some("8.8.8.8 [2024-12-31 23:59:59]] trailing [junk]")).unwrap();
        assert_eq!(entry.timestamp, "2024-12-31 23:59:59");
    }

    #[test]
    fn test_as_pair() {
        let entry = LogEntry::new("1.2.3.4", "2025-08-14 11:49:00");
        assert_eq!(
            entry.as_pair(),
            (Some("1.2.3.4"), Some("2025-08-14 11:49:00"))
        );
    }
}
