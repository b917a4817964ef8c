//! Thermal zone temperature provider

use super::command::{read_file, QueryError};
use super::MetricProvider;
use std::path::{Path, PathBuf};

const THERMAL_DIR: &str = "/sys/class/thermal";

/// Reports the SoC temperature in degrees Celsius, one decimal place.
///
/// Reads the lowest-numbered `thermal_zone*/temp` entry; on the target
/// boards that is the SoC sensor and usually the only zone present.
pub struct SystemTempSource;

impl MetricProvider for SystemTempSource {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn sample(&self) -> Result<String, QueryError> {
        let zone = first_thermal_zone(Path::new(THERMAL_DIR))?;
        let raw = read_file(&zone.join("temp"))?;
        parse_millidegrees(&raw)
    }
}

fn first_thermal_zone(dir: &Path) -> Result<PathBuf, QueryError> {
    let entries = std::fs::read_dir(dir).map_err(|source| QueryError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    entries
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("thermal_zone")
        })
        .map(|entry| entry.path())
        .min()
        .ok_or_else(|| QueryError::Parse {
            command: "thermal",
            detail: format!("no thermal_zone entries under {}", dir.display()),
        })
}

fn parse_millidegrees(raw: &str) -> Result<String, QueryError> {
    let millidegrees: f64 = raw.trim().parse().map_err(|_| QueryError::Parse {
        command: "thermal",
        detail: format!("not a millidegree reading: {raw:?}"),
    })?;
    Ok(format!("{:.1}", millidegrees / 1000.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millidegrees_to_one_decimal() {
        assert_eq!(parse_millidegrees("48399\n").unwrap(), "48.4");
        assert_eq!(parse_millidegrees("50000").unwrap(), "50.0");
    }

    #[test]
    fn test_garbage_reading_is_a_parse_error() {
        assert!(parse_millidegrees("cool").is_err());
    }

    #[test]
    fn test_missing_thermal_dir_is_a_read_error() {
        let err = first_thermal_zone(Path::new("/nonexistent-thermal")).unwrap_err();
        assert!(matches!(err, QueryError::Read { .. }));
    }
}
