//! Shared plumbing for external telemetry queries

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// A telemetry query failed.
///
/// Policy: these are fatal. The daemon prefers a clean crash over quietly
/// rendering stale or partial values.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed {
        command: &'static str,
        status: ExitStatus,
    },

    #[error("unexpected `{command}` output: {detail}")]
    Parse {
        command: &'static str,
        detail: String,
    },

    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Run a command to completion and return its stdout as UTF-8 text.
///
/// A nonzero exit status is an error even if the command produced output.
pub(crate) fn command_output(
    name: &'static str,
    command: &mut Command,
) -> Result<String, QueryError> {
    let output = command.output().map_err(|source| QueryError::Spawn {
        command: name,
        source,
    })?;
    if !output.status.success() {
        return Err(QueryError::Failed {
            command: name,
            status: output.status,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub(crate) fn read_file(path: &Path) -> Result<String, QueryError> {
    std::fs::read_to_string(path).map_err(|source| QueryError::Read {
        path: path.to_path_buf(),
        source,
    })
}
