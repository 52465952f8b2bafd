// Error types for the three fallible surfaces: the completion endpoint, the
// login attempt log and the console.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single request to the completion endpoint.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to send HTTP request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API key cannot be used as a bearer credential")]
    InvalidCredential,

    #[error("Response status code does not indicate success: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse completion response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure to touch the login attempt log on disk.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Input is exhausted; nothing more can be read.
    #[error("console input closed")]
    Closed,

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
