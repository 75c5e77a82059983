//! CLI subcommand implementations.

pub mod execute;
pub mod execute_async;
pub mod interact;
pub mod session;

use std::collections::HashMap;

use serde_json::Value;

/// Parses a `--param KEY=VALUE` argument. The value is taken as JSON when
/// it parses as JSON and as a plain string otherwise, so `--param n=3`
/// sends a number while `--param color=red` sends a string.
pub fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn to_parameters(params: &[(String, Value)]) -> HashMap<String, Value> {
    params.iter().cloned().collect()
}
