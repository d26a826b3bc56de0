//! # CLI Module
//!
//! Turns one Tautulli invocation into one client operation.
//!
//! Tautulli runs the script with the watched item's details as flags, for
//! example `--userId 5 --contentType episode --tvdbId 79168 --season 1
//! --episode 1`. The [`Dispatcher`] first checks the user against
//! `Plex.user_ids`, then [`route`]s the content type:
//!
//! | `--contentType`           | action                                  |
//! |---------------------------|-----------------------------------------|
//! | `trakt_authenticate`      | Trakt device-code authentication        |
//! | `trakt_refresh`           | Trakt token refresh                     |
//! | `episode`                 | Trakt refresh, then history sync        |
//! | `letterboxd_authenticate` | Letterboxd password sign-in             |
//! | `letterboxd_refresh`      | Letterboxd token refresh                |
//! | `movie`                   | Letterboxd refresh, then diary entry    |
//!
//! The authentication content types are meant to be run once by hand with
//! `--userId -1` ([`BYPASS_USER_ID`]), which skips the user check.

mod dispatch;

pub use dispatch::Action;
pub use dispatch::BYPASS_USER_ID;
pub use dispatch::ContentType;
pub use dispatch::Dispatcher;
pub use dispatch::Endpoints;
pub use dispatch::Invocation;
pub use dispatch::Outcome;
pub use dispatch::route;
