//! Action records dispatched by shape.
//!
//! Actions arrive as loosely-typed JSON values. [`Action::classify`] checks
//! them against each known kind in order and falls through to
//! [`Action::Unrecognized`] when nothing fits.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login { user: String, time: i128 },
    Logout { user: String },
    Error { code: i128 },
    Invalid,
    Unrecognized,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Invalid action format: {0}")]
    InvalidFormat(String),
    #[error("Error processing action: {0}")]
    Unprocessable(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    pub login: u32,
    pub logout: u32,
    pub error: u32,
    pub invalid: u32,
}

impl Action {
    pub fn classify(value: &Value) -> Action {
        let kind = value.get("type").and_then(Value::as_str);
        let user = value.get("user").and_then(Value::as_str);

        match kind {
            Some("login") => {
                if let (Some(user), Some(time)) = (user, value.get("time").and_then(as_integer)) {
                    return Action::Login {
                        user: user.to_string(),
                        time,
                    };
                }
            }
            Some("logout") => {
                if let Some(user) = user {
                    return Action::Logout {
                        user: user.to_string(),
                    };
                }
            }
            Some("error") => {
                if let Some(code) = value.get("code").and_then(as_integer) {
                    return Action::Error { code };
                }
            }
            Some("invalid") => return Action::Invalid,
            _ => {}
        }

        Action::Unrecognized
    }

    /// Render the message for this action; `raw` is the value it was classified from.
    pub fn describe(&self, raw: &Value) -> Result<String, ActionError> {
        match self {
            Action::Login { user, time } => Ok(format!("User {user} logged in at timestamp {time}")),
            Action::Logout { user } => Ok(format!("User {user} logged out")),
            Action::Error { code } => Ok(format!("Error occurred with code {code}")),
            Action::Invalid => Err(ActionError::InvalidFormat(raw.to_string())),
            Action::Unrecognized => Err(ActionError::Unprocessable(raw.to_string())),
        }
    }
}

/// Any JSON integer, signed or unsigned. Floats do not count.
fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

/// Message for a single action; failures are reported as their text.
pub fn process_action(value: &Value) -> String {
    Action::classify(value)
        .describe(value)
        .unwrap_or_else(|e| e.to_string())
}

pub fn unique_users(values: &[Value]) -> BTreeSet<String> {
    values
        .iter()
        .filter_map(|v| v.get("user").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Tally actions by their `type` field alone.
pub fn summarize_actions(values: &[Value]) -> ActionSummary {
    let mut summary = ActionSummary::default();
    for value in values {
        match value.get("type").and_then(Value::as_str) {
            Some("login") => summary.login += 1,
            Some("logout") => summary.logout += 1,
            Some("error") => summary.error += 1,
            _ => summary.invalid += 1,
        }
    }
    summary
}

pub fn load_actions(path: &Path) -> Result<Vec<Value>> {
    if !path.exists() {
        anyhow::bail!("Actions file not found: {:?}", path);
    }

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let values: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse actions JSON in {:?}", path))?;

    info!(action = "loaded", component = "actions_file", file_path = ?path, action_count = values.len(), "Loaded actions");
    Ok(values)
}

pub fn print_action_report(values: &[Value]) {
    println!("Processing Actions:");
    for value in values {
        println!("{}", process_action(value));
    }

    let users: Vec<String> = unique_users(values).into_iter().collect();
    println!("\nUnique Users: {}", users.join(", "));

    let summary = summarize_actions(values);
    println!("\nAction Summary:");
    println!("Login: {}", summary.login);
    println!("Logout: {}", summary.logout);
    println!("Error: {}", summary.error);
    println!("Invalid: {}", summary.invalid);
}
