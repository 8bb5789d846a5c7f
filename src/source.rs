use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

// Include the sample log at compile time
const SAMPLE_LOG_BYTES: &[u8] = include_bytes!("../sample_access.log");

pub const SAMPLE_LOG_FILE: &str = "sample_access.log";

/// Split raw bytes into records, one per line.
///
/// Lines that are not valid UTF-8 become `None` instead of failing the load.
pub fn split_records(bytes: &[u8]) -> Vec<Option<String>> {
    let bytes = bytes
        .strip_suffix(b"\r\n")
        .or_else(|| bytes.strip_suffix(b"\n"))
        .unwrap_or(bytes);
    if bytes.is_empty() {
        return Vec::new();
    }

    bytes
        .split(|b| *b == b'\n')
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            std::str::from_utf8(line).ok().map(str::to_string)
        })
        .collect()
}

pub fn read_records<R: Read>(mut reader: R) -> Result<Vec<Option<String>>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read log records")?;
    Ok(split_records(&bytes))
}

pub fn load_records(inputs: &[PathBuf]) -> Result<Vec<Option<String>>> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "record_loading",
        file_count = inputs.len(),
        "Loading log records"
    );

    let mut records = Vec::new();
    for path in inputs {
        records.extend(load_file(path)?);
    }

    let load_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "record_loading",
        record_count = records.len(),
        duration_ms = load_time.as_millis(),
        "Loaded log records"
    );
    Ok(records)
}

fn load_file(path: &Path) -> Result<Vec<Option<String>>> {
    if !path.exists() {
        anyhow::bail!("Log file not found: {:?}", path);
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let records = split_records(&bytes);

    let undecodable = records.iter().filter(|r| r.is_none()).count();
    if undecodable > 0 {
        warn!(action = "decode", component = "log_file", file_path = ?path, undecodable, "Lines with invalid UTF-8");
    }
    info!(action = "loaded", component = "log_file", file_path = ?path, record_count = records.len(), "Loaded records from file");
    Ok(records)
}

pub fn sample_records() -> Vec<Option<String>> {
    info!(
        action = "load",
        component = "embedded_sample",
        "Using embedded sample log"
    );
    split_records(SAMPLE_LOG_BYTES)
}

pub fn init_sample_log() -> Result<()> {
    init_sample_log_at(Path::new(SAMPLE_LOG_FILE))
}

pub fn init_sample_log_at(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            path.display()
        );
    }

    fs::write(path, SAMPLE_LOG_BYTES)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {} with sample log records", path.display());

    Ok(())
}
