use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

use crate::extract::LogEntry;
use crate::utils::redact_address;

#[derive(Debug, Default, Serialize)]
pub struct LogStats {
    pub records_read: usize,
    pub records_unparsed: usize,
    pub entries: Vec<LogEntry>,
    #[serde(serialize_with = "sorted_counts")]
    pub hour_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub earliest: String,
    pub latest: String,
    pub hours_between: i64,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub prefix: String,
    pub time_range: Option<TimeRange>,
    pub stats: LogStats,
}

impl LogStats {
    /// Hour buckets in chronological order.
    pub fn hours_chronological(&self) -> Vec<(&String, &usize)> {
        let mut hours: Vec<(&String, &usize)> = self.hour_counts.iter().collect();
        hours.sort_by(|a, b| a.0.cmp(b.0));
        hours
    }

    /// Mask the host part of every entry address in place.
    pub fn redact_addresses(&mut self) {
        for entry in &mut self.entries {
            entry.address = redact_address(&entry.address);
        }
    }

    /// Hour buckets busiest first, ties in chronological order.
    pub fn hours_by_count(&self) -> Vec<(&String, &usize)> {
        let mut hours = self.hours_chronological();
        hours.sort_by(|a, b| b.1.cmp(a.1));
        hours
    }
}

fn sorted_counts<S: Serializer>(counts: &HashMap<String, usize>, serializer: S) -> Result<S::Ok, S::Error> {
    counts.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}
