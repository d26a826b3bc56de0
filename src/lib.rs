//! Watched-event sync for Plex via Tautulli.
//!
//! This library forwards "watched" notifications from Tautulli to two tracking
//! services: episodes are recorded in the Trakt.tv watch history and movies are
//! logged in the Letterboxd diary. It includes modules for settings storage,
//! the two service clients, request signing and the invocation dispatcher.
//!
//! # Modules
//!
//! - `cli` - Routing of an invocation to one client operation
//! - `config` - Environment variables, `.env` loading and default paths
//! - `error` - The error taxonomy shared by every operation
//! - `letterboxd` - Letterboxd API client with HMAC request signing
//! - `management` - The persistent settings store
//! - `prompt` - Interactive prompts used by the authentication flows
//! - `trakt` - Trakt.tv API client with device-code authentication
//! - `types` - Request and response bodies for both services
//! - `utils` - Formatting and HTTP helpers
//!
//! # Example
//!
//! ```
//! use watchsync::{cli::{Dispatcher, Endpoints, Invocation}, management::Settings, prompt::TerminalPrompt};
//!
//! let mut settings = Settings::load("sync_settings.ini")?;
//! let mut prompt = TerminalPrompt;
//! let invocation = Invocation::new(-1, "trakt_authenticate");
//! Dispatcher::new(&mut settings, Endpoints::default(), &mut prompt).run(&invocation)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod letterboxd;
pub mod management;
pub mod prompt;
pub mod trakt;
pub mod types;
pub mod utils;

pub use error::{Result, SyncError};

#[doc(hidden)]
pub use colored;

/// Prints an informational message with a blue bullet point.
///
/// Used for general information and status updates such as the device
/// verification URL or the "not enrolled" notice.
///
/// # Example
///
/// ```
/// info!("Please go to {} and insert the following code: {}", url, code);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use $crate::colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Refreshed access token successfully!");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use $crate::colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only the
/// binary uses it; library code returns a [`SyncError`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load settings: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use $crate::colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, for example when the browser cannot be
/// opened and the user has to navigate to a URL manually.
///
/// # Example
///
/// ```
/// warning!("Invalid contentType {}", content_type);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use $crate::colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
