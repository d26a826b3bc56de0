use std::str::FromStr;

use crate::{
    Result, SyncError, config,
    letterboxd::LetterboxdClient,
    management::Settings,
    prompt::Prompt,
    trakt::TraktClient,
    types::WatchEvent,
};

/// User id that skips the `Plex.user_ids` check, for one-time authentication
/// setup from a shell.
pub const BYPASS_USER_ID: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TraktAuthenticate,
    TraktRefresh,
    Episode,
    LetterboxdAuthenticate,
    LetterboxdRefresh,
    Movie,
}

impl FromStr for ContentType {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "trakt_authenticate" => Ok(Self::TraktAuthenticate),
            "trakt_refresh" => Ok(Self::TraktRefresh),
            "episode" => Ok(Self::Episode),
            "letterboxd_authenticate" => Ok(Self::LetterboxdAuthenticate),
            "letterboxd_refresh" => Ok(Self::LetterboxdRefresh),
            "movie" => Ok(Self::Movie),
            other => Err(SyncError::UnrecognizedContentType(other.to_string())),
        }
    }
}

/// One script invocation as Tautulli passes it.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub user_id: i64,
    pub content_type: String,
    pub tvdb_id: Option<u64>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub imdb_id: Option<String>,
}

impl Invocation {
    pub fn new(user_id: i64, content_type: &str) -> Self {
        Self {
            user_id,
            content_type: content_type.to_string(),
            ..Default::default()
        }
    }
}

/// The single client operation an invocation resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    TraktAuthenticate,
    TraktRefresh,
    TraktSync(WatchEvent),
    LetterboxdAuthenticate,
    LetterboxdRefresh,
    LetterboxdSync(WatchEvent),
}

/// Resolves an invocation to its action without touching settings or the
/// network.
pub fn route(invocation: &Invocation) -> Result<Action> {
    let action = match invocation.content_type.parse::<ContentType>()? {
        ContentType::TraktAuthenticate => Action::TraktAuthenticate,
        ContentType::TraktRefresh => Action::TraktRefresh,
        ContentType::Episode => Action::TraktSync(WatchEvent::Episode {
            tvdb_id: invocation.tvdb_id.ok_or(SyncError::MissingArgument("tvdbId"))?,
            season: invocation.season.ok_or(SyncError::MissingArgument("season"))?,
            episode: invocation.episode.ok_or(SyncError::MissingArgument("episode"))?,
        }),
        ContentType::LetterboxdAuthenticate => Action::LetterboxdAuthenticate,
        ContentType::LetterboxdRefresh => Action::LetterboxdRefresh,
        ContentType::Movie => Action::LetterboxdSync(WatchEvent::Movie {
            imdb_id: invocation
                .imdb_id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .ok_or(SyncError::MissingArgument("imdbId"))?,
        }),
    };
    Ok(action)
}

/// Base URLs of the two services.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub trakt: String,
    pub letterboxd: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            trakt: config::trakt_api_url(),
            letterboxd: config::letterboxd_api_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user is not enrolled for syncing; nothing was sent.
    Skipped,
    Completed(Action),
}

pub struct Dispatcher<'a> {
    settings: &'a mut Settings,
    endpoints: Endpoints,
    prompt: &'a mut dyn Prompt,
}

impl<'a> Dispatcher<'a> {
    pub fn new(settings: &'a mut Settings, endpoints: Endpoints, prompt: &'a mut dyn Prompt) -> Self {
        Self {
            settings,
            endpoints,
            prompt,
        }
    }

    /// Gates on the user, routes the invocation and runs the resulting
    /// action.
    ///
    /// Sync actions refresh the service's access token before sending the
    /// watched item.
    pub fn run(&mut self, invocation: &Invocation) -> Result<Outcome> {
        if invocation.user_id != BYPASS_USER_ID && !self.settings.sync_for_user(invocation.user_id)? {
            log::debug!("user {} is not in Plex.user_ids", invocation.user_id);
            return Ok(Outcome::Skipped);
        }

        let action = route(invocation)?;
        log::debug!("user {} -> {:?}", invocation.user_id, action);

        let Self {
            settings,
            endpoints,
            prompt,
        } = self;

        match &action {
            Action::TraktAuthenticate => {
                TraktClient::new(settings, &endpoints.trakt)?.authenticate(&mut **prompt)?
            }
            Action::TraktRefresh => {
                TraktClient::new(settings, &endpoints.trakt)?.refresh_access_token()?
            }
            Action::TraktSync(event) => {
                let mut trakt = TraktClient::new(settings, &endpoints.trakt)?;
                trakt.refresh_access_token()?;
                trakt.sync_history(event)?;
            }
            Action::LetterboxdAuthenticate => {
                LetterboxdClient::new(settings, &endpoints.letterboxd)?.authenticate(&mut **prompt)?
            }
            Action::LetterboxdRefresh => {
                LetterboxdClient::new(settings, &endpoints.letterboxd)?.refresh_access_token()?
            }
            Action::LetterboxdSync(event) => {
                let mut letterboxd = LetterboxdClient::new(settings, &endpoints.letterboxd)?;
                letterboxd.refresh_access_token()?;
                letterboxd.log_entry(event)?;
            }
        }

        Ok(Outcome::Completed(action))
    }
}
