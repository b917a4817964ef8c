//! Uptime provider

use super::command::{command_output, QueryError};
use super::MetricProvider;
use std::process::Command;

/// Reports how long the host has been up, via `uptime`.
///
/// The duration sits in the third and fourth whitespace fields and ends at
/// the first comma, which covers the three shapes `uptime` prints:
/// `2 days`, `3:04` and `59 min`.
pub struct UptimeSource;

impl MetricProvider for UptimeSource {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn sample(&self) -> Result<String, QueryError> {
        let output = command_output("uptime", &mut Command::new("uptime"))?;
        Ok(parse_uptime(&output))
    }
}

fn parse_uptime(output: &str) -> String {
    let mut fields = output.split_whitespace().skip(2);
    let joined = match (fields.next(), fields.next()) {
        (Some(a), Some(b)) => format!("{a} {b}"),
        (Some(a), None) => a.to_string(),
        _ => String::new(),
    };
    joined.split(',').next().unwrap_or("").to_string()
}
