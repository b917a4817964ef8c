//! Root filesystem usage provider

use super::command::{command_output, QueryError};
use super::MetricProvider;
use std::process::Command;

/// Reports root filesystem usage via `df -h`.
///
/// The use-percent column already carries its `%` suffix, so the value is
/// passed through untouched. No row mounted on `/` yields an empty string.
pub struct DiskSource;

impl MetricProvider for DiskSource {
    fn name(&self) -> &'static str {
        "disk"
    }

    fn sample(&self) -> Result<String, QueryError> {
        let output = command_output("df", Command::new("df").arg("-h"))?;
        Ok(parse_df_root(&output))
    }
}

fn parse_df_root(output: &str) -> String {
    output
        .lines()
        .find(|line| line.split_whitespace().last() == Some("/"))
        .and_then(|line| line.split_whitespace().nth(4))
        .unwrap_or_default()
        .to_string()
}
