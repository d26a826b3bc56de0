use std::{
    fs,
    path::{Path, PathBuf},
};

use ini::{Ini, ParseOption};

use crate::{Result, SyncError, types::AuthSession};

pub const SECTION_PLEX: &str = "Plex";
pub const SECTION_TRAKT: &str = "Trakt";
pub const SECTION_LETTERBOXD: &str = "Letterboxd";

/// The INI settings file shared by both clients.
///
/// Loaded once per invocation and written back in full whenever a token
/// pair changes.
pub struct Settings {
    path: PathBuf,
    ini: Ini,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        // values are taken literally, surrounding quotes included
        let options = ParseOption {
            enabled_quote: false,
            ..Default::default()
        };
        let ini = Ini::load_from_file_opt(&path, options).map_err(|e| match e {
            ini::Error::Io(source) => SyncError::SettingsNotFound {
                path: path.clone(),
                source,
            },
            ini::Error::Parse(source) => SyncError::SettingsInvalid {
                path: path.clone(),
                source,
            },
        })?;
        Ok(Self { path, ini })
    }

    /// Returns a setting, treating an empty value like a missing one.
    pub fn get(&self, section: &str, key: &str) -> Result<String> {
        match self.ini.get_from(Some(section), key).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(SyncError::MissingConfig {
                file: self.file_name(),
                section: section.to_string(),
                key: key.to_string(),
            }),
        }
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Writes every section back to disk.
    ///
    /// The content goes to a sibling `.tmp` file first and is renamed over
    /// the settings file, so a failed write leaves the old file intact.
    pub fn persist(&self) -> Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        self.ini
            .write_to_file(&tmp)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|source| SyncError::Persist {
                path: self.path.clone(),
                source,
            })
    }

    /// Returns whether watched events of `user_id` should be synced.
    pub fn sync_for_user(&self, user_id: i64) -> Result<bool> {
        let user_ids = self.get(SECTION_PLEX, "user_ids")?;
        let user_id = user_id.to_string();
        Ok(user_ids.split(',').any(|id| id.trim() == user_id))
    }

    pub fn session(&self, section: &str) -> Result<AuthSession> {
        Ok(AuthSession {
            access_token: self.get(section, "access_token")?,
            refresh_token: self.get(section, "refresh_token")?,
        })
    }

    pub fn store_session(&mut self, section: &str, session: &AuthSession) {
        self.set(section, "access_token", &session.access_token);
        self.set(section, "refresh_token", &session.refresh_token);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
