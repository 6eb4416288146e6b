//! Error taxonomy for a menu run.
//!
//! Every fallible step returns one of these; the run controller turns any
//! of them into the abort menu.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("settings file not found: {}", .path.display())]
    ConfigMissing { path: PathBuf },

    #[error("invalid settings file {}: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("failed to initialize HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid instance url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("error {status} from {url}")]
    FetchFailed { url: String, status: u16 },

    #[error("unexpected issue data from {url}: {source}")]
    DataContractViolation {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, MenuError>;
