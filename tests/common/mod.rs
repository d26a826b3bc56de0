#![allow(dead_code)]

use std::{collections::VecDeque, fs, io, path::PathBuf};

use tempfile::TempDir;
use watchsync::{cli::Endpoints, prompt::Prompt};

pub const SETTINGS: &str = "\
[Plex]
user_ids = 3,5,9

[Trakt]
client_id = trakt-client
client_secret = trakt-secret
access_token = trakt-access
refresh_token = trakt-refresh

[Letterboxd]
api_key = lb-key
api_secret = lb-secret
access_token = lb-access
refresh_token = lb-refresh
";

// Helper function to write a settings file into a fresh temp dir
pub fn settings_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sync_settings.ini");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

pub fn endpoints(url: &str) -> Endpoints {
    Endpoints {
        trakt: url.to_string(),
        letterboxd: url.to_string(),
    }
}

/// Prompt double that answers from a script and records what was asked.
#[derive(Default)]
pub struct ScriptedPrompt {
    pub confirms: VecDeque<bool>,
    pub inputs: VecDeque<String>,
    pub passwords: VecDeque<String>,
    pub asked: Vec<String>,
    pub opened: Vec<String>,
}

impl ScriptedPrompt {
    pub fn confirming(answers: &[bool]) -> Self {
        Self {
            confirms: answers.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn credentials(username: &str, password: &str) -> Self {
        Self {
            inputs: VecDeque::from([username.to_string()]),
            passwords: VecDeque::from([password.to_string()]),
            ..Default::default()
        }
    }
}

fn exhausted() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        self.asked.push(message.to_string());
        self.confirms.pop_front().ok_or_else(exhausted)
    }

    fn input(&mut self, label: &str) -> io::Result<String> {
        self.asked.push(label.to_string());
        self.inputs.pop_front().ok_or_else(exhausted)
    }

    fn password(&mut self, label: &str) -> io::Result<String> {
        self.asked.push(label.to_string());
        self.passwords.pop_front().ok_or_else(exhausted)
    }

    fn open_url(&mut self, url: &str) -> bool {
        self.opened.push(url.to_string());
        true
    }
}
