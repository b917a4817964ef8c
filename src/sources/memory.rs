//! Memory usage provider
//!
//! The memory total cannot change at runtime, so it is read from
//! `/proc/meminfo` exactly once at startup and reused for every derived
//! value. Only the used amount is re-queried each iteration.

use super::command::{command_output, read_file, QueryError};
use std::path::Path;
use std::process::Command;

const MEMINFO_PATH: &str = "/proc/meminfo";

/// Memory provider holding the cached total.
pub struct MemorySource {
    total_gb: f64,
}

impl MemorySource {
    /// Read the memory total once and keep it for the process lifetime.
    pub fn probe() -> Result<Self, QueryError> {
        let meminfo = read_file(Path::new(MEMINFO_PATH))?;
        Ok(Self {
            total_gb: parse_meminfo_total(&meminfo)?,
        })
    }

    /// Build a provider around a known total, bypassing `/proc/meminfo`.
    pub fn with_total(total_gb: f64) -> Self {
        Self { total_gb }
    }

    pub fn total_gb(&self) -> f64 {
        self.total_gb
    }

    /// Currently used memory in GB, via `free -m`.
    pub fn used_gb(&self) -> Result<f64, QueryError> {
        let output = command_output("free", Command::new("free").arg("-m"))?;
        parse_free_used(&output)
    }

    /// Used percent against the cached total, one decimal place.
    pub fn used_percent(&self, used_gb: f64) -> String {
        format!("{:.1}", used_gb * 100.0 / self.total_gb)
    }
}

fn parse_meminfo_total(meminfo: &str) -> Result<f64, QueryError> {
    let first = meminfo.lines().next().unwrap_or("");
    let kb: f64 = first
        .split_whitespace()
        .nth(1)
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| QueryError::Parse {
            command: MEMINFO_PATH,
            detail: format!("no MemTotal value in {first:?}"),
        })?;
    Ok(kb / 1_000_000.0)
}

fn parse_free_used(output: &str) -> Result<f64, QueryError> {
    let row = output.lines().nth(1).unwrap_or("");
    let mb: f64 = row
        .split_whitespace()
        .nth(2)
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| QueryError::Parse {
            command: "free",
            detail: format!("no used column in {row:?}"),
        })?;
    Ok(mb / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREE_OUTPUT: &str = "\
               total        used        free      shared  buff/cache   available
Mem:            7812        3200        3100          42        1512        4400
Swap:            100           0         100
";

    #[test]
    fn test_meminfo_total_in_gb() {
        let meminfo = "MemTotal:        8000000 kB\nMemFree:         614572 kB\n";
        assert_eq!(parse_meminfo_total(meminfo).unwrap(), 8.0);
    }

    #[test]
    fn test_meminfo_garbage_is_a_parse_error() {
        assert!(parse_meminfo_total("").is_err());
    }

    #[test]
    fn test_free_used_in_gb() {
        assert_eq!(parse_free_used(FREE_OUTPUT).unwrap(), 3.2);
    }

    #[test]
    fn test_free_missing_row_is_a_parse_error() {
        assert!(parse_free_used("header only\n").is_err());
    }

    #[test]
    fn test_used_percent_against_cached_total() {
        let memory = MemorySource::with_total(8.0);
        assert_eq!(memory.used_percent(3.2), "40.0");
    }

    #[test]
    fn test_used_percent_rounds_to_one_decimal() {
        let memory = MemorySource::with_total(7.812);
        assert_eq!(memory.used_percent(3.2), "41.0");
    }
}
