// Login attempt log: one tab-separated line per attempt, appended to a plain
// text file. The program only ever appends to or reads back the whole file.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::errors::LogError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure,
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginOutcome::Success => f.write_str("Login successful"),
            LoginOutcome::Failure => f.write_str("Login failed"),
        }
    }
}

/// One login attempt. The supplied key is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttemptRecord {
    pub timestamp: NaiveDateTime,
    pub outcome: LoginOutcome,
    pub supplied_key: String,
}

impl LoginAttemptRecord {
    /// Record stamped with the current local time.
    pub fn now(outcome: LoginOutcome, supplied_key: &str) -> Self {
        LoginAttemptRecord {
            timestamp: Local::now().naive_local(),
            outcome,
            supplied_key: supplied_key.to_string(),
        }
    }
}

/// Formats as the log line, without the trailing newline.
impl fmt::Display for LoginAttemptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.outcome,
            self.supplied_key
        )
    }
}

#[derive(Debug, Clone)]
pub struct AttemptLog {
    path: PathBuf,
}

impl AttemptLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AttemptLog { path: path.into() }
    }

    /// Stamp and append a record for this attempt.
    pub fn append(&self, outcome: LoginOutcome, key: &str) -> Result<(), LogError> {
        self.append_record(&LoginAttemptRecord::now(outcome, key))
    }

    /// Append one line, creating the file if it does not exist yet.
    pub fn append_record(&self, record: &LoginAttemptRecord) -> Result<(), LogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        writeln!(file, "{record}").map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), outcome = %record.outcome, "login attempt recorded");
        Ok(())
    }

    /// Whole file contents, or `None` when no log has been written yet.
    pub fn read_all(&self) -> Result<Option<String>, LogError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
