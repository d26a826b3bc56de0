use std::{io, path::PathBuf};

use thiserror::Error;

/// Every way a sync invocation can fail.
///
/// Errors propagate to `main`, which prints a single line and picks the exit
/// status. `UnrecognizedContentType` is the only variant that still exits 0.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{} not found", path.display())]
    SettingsNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid settings file: {source}", path.display())]
    SettingsInvalid {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("{file} not setup - missing {key} in [{section}]")]
    MissingConfig {
        file: String,
        section: String,
        key: String,
    },

    #[error("unable to write to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    ProviderAuth(String),

    #[error("{0}")]
    Provider(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot sign request: {0}")]
    Signing(String),

    #[error("Invalid contentType \"{0}\"")]
    UnrecognizedContentType(String),

    #[error("--{0} is required for this contentType")]
    MissingArgument(&'static str),

    #[error("Unknown argument encoding \"{0}\"")]
    UnknownEncoding(String),

    #[error("Cannot read from terminal: {0}")]
    Prompt(#[from] io::Error),

    #[error("Authentication cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, SyncError>;
