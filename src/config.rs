//! Process environment for watchsync.
//!
//! This module handles loading and accessing configuration values that come
//! from environment variables and an optional `.env` file. Account data such
//! as API keys and tokens lives in the settings file instead (see
//! [`crate::management::Settings`]); the environment only decides where that
//! file is, which API hosts are used and how invocation arguments are decoded.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

pub const TRAKT_API_URL: &str = "https://api.trakt.tv";
pub const LETTERBOXD_API_URL: &str = "https://api.letterboxd.com/api/v0";
pub const DEFAULT_ENCODING: &str = "UTF-8";
pub const SETTINGS_FILE: &str = "sync_settings.ini";

/// Returns the platform-specific data directory for watchsync.
///
/// - Linux: `~/.local/share/watchsync`
/// - macOS: `~/Library/Application Support/watchsync`
/// - Windows: `%LOCALAPPDATA%/watchsync`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("watchsync");
    path
}

/// Loads environment variables from `watchsync/.env` in the local data
/// directory.
///
/// A missing file is not an error, since Tautulli usually passes everything
/// the script needs on the command line. A file that exists but cannot be
/// parsed is reported.
pub fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the settings file path.
///
/// Uses `WATCHSYNC_SETTINGS` when set, otherwise `sync_settings.ini` inside
/// [`data_dir`].
pub fn settings_path() -> PathBuf {
    env::var_os("WATCHSYNC_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join(SETTINGS_FILE))
}

/// Base URL of the Trakt.tv API, overridable with `TRAKT_API_URL`.
pub fn trakt_api_url() -> String {
    env::var("TRAKT_API_URL").unwrap_or_else(|_| TRAKT_API_URL.to_string())
}

/// Base URL of the Letterboxd API, overridable with `LETTERBOXD_API_URL`.
pub fn letterboxd_api_url() -> String {
    env::var("LETTERBOXD_API_URL").unwrap_or_else(|_| LETTERBOXD_API_URL.to_string())
}

/// Encoding label Tautulli uses for script arguments.
///
/// Read from `TAUTULLI_ENCODING`, defaulting to UTF-8.
pub fn tautulli_encoding() -> String {
    env::var("TAUTULLI_ENCODING").unwrap_or_else(|_| DEFAULT_ENCODING.to_string())
}
