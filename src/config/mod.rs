//! Daemon configuration
//!
//! The only user-facing configuration is the daily active-hours window,
//! read once at startup from the `start` and `end` environment variables.

use log::{info, warn};
use std::env;

/// Default first hour of the active window.
pub const DEFAULT_START_HOUR: u32 = 8;
/// Default last hour of the active window.
pub const DEFAULT_END_HOUR: u32 = 23;

/// Daily hour range during which the display renders telemetry.
///
/// Both bounds are exclusive: the display is active strictly when
/// `start < hour < end`, so the boundary hours themselves are idle.
/// That matches the long-standing deployed behavior and is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    pub start: u32,
    pub end: u32,
}

impl ActiveWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Read the window from the `start`/`end` environment variables.
    ///
    /// Missing, unparseable, or out-of-range values silently fall back to
    /// the defaults; a bad value is never a startup error.
    pub fn from_env() -> Self {
        let window = Self::from_vars(
            env::var("start").ok().as_deref(),
            env::var("end").ok().as_deref(),
        );
        info!(
            "active window configured: {}..{} (both bounds exclusive)",
            window.start, window.end
        );
        if window.end <= window.start {
            warn!("end hour <= start hour, display will stay blank");
        }
        window
    }

    fn from_vars(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: parse_hour(start).unwrap_or(DEFAULT_START_HOUR),
            end: parse_hour(end).unwrap_or(DEFAULT_END_HOUR),
        }
    }

    /// Whether `hour` falls strictly inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        self.start < hour && hour < self.end
    }
}

impl Default for ActiveWindow {
    fn default() -> Self {
        Self::new(DEFAULT_START_HOUR, DEFAULT_END_HOUR)
    }
}

fn parse_hour(value: Option<&str>) -> Option<u32> {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|h| *h <= 23)
}
