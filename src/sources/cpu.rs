//! CPU load provider

use super::command::{command_output, QueryError};
use super::MetricProvider;
use std::process::Command;

/// Reports overall CPU usage as an integer percent string via `vmstat`.
///
/// `vmstat 4 2` prints a second report averaged over a real four-second
/// interval; the first report only reflects counters since boot. This call
/// therefore blocks for the whole sampling window, which is what makes the
/// percentage meaningful. Usage is 100 minus the idle column.
pub struct CpuSource;

impl MetricProvider for CpuSource {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn sample(&self) -> Result<String, QueryError> {
        let output = command_output("vmstat", Command::new("vmstat").args(["4", "2"]))?;
        parse_vmstat(&output)
    }
}

fn parse_vmstat(output: &str) -> Result<String, QueryError> {
    let last = output
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    let idle: u32 = last
        .split_whitespace()
        .nth(14)
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| QueryError::Parse {
            command: "vmstat",
            detail: format!("no idle column in {last:?}"),
        })?;
    Ok(100u32.saturating_sub(idle).to_string())
}
