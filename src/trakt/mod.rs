//! # Trakt.tv Integration Module
//!
//! Client for the parts of the Trakt API that watchsync needs: the OAuth
//! device-code flow, token refresh and recording a watched episode in the
//! user's history.
//!
//! ## Authentication
//!
//! [`TraktClient::authenticate`] asks Trakt for a device code, shows the
//! verification URL and user code, and polls for the token pair each time the
//! user confirms they approved the application. Trakt answers `400` while
//! approval is still pending. The token pair is written to the `[Trakt]`
//! section of the settings file.
//!
//! ## History sync
//!
//! [`TraktClient::sync_history`] resolves the TVDB show id to a Trakt show,
//! looks up the episode by season and number, and posts it to
//! `/sync/history` with the current UTC time as `watched_at`.
//!
//! ## API Coverage
//!
//! - `POST /oauth/device/code` - Device code issuance
//! - `POST /oauth/device/token` - Device code polling
//! - `POST /oauth/token` - Token refresh
//! - `GET /search/tvdb/{id}?type=show` - Show lookup
//! - `GET /shows/{slug}/seasons/{season}/episodes/{episode}` - Episode lookup
//! - `POST /sync/history` - History submission

mod auth;
mod history;

use reqwest::{
    blocking::{Client, RequestBuilder},
    header::CONTENT_TYPE,
};

use crate::{Result, management::SECTION_TRAKT, management::Settings, utils};

pub use auth::REDIRECT_URI;

const API_VERSION: &str = "2";

pub struct TraktClient<'a> {
    settings: &'a mut Settings,
    http: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl<'a> TraktClient<'a> {
    /// Creates a client from the `[Trakt]` application credentials.
    ///
    /// Fails with `MissingConfig` when `client_id` or `client_secret` is not
    /// set up.
    pub fn new(settings: &'a mut Settings, base_url: &str) -> Result<Self> {
        let client_id = settings.get(SECTION_TRAKT, "client_id")?;
        let client_secret = settings.get(SECTION_TRAKT, "client_secret")?;

        Ok(Self {
            settings,
            http: utils::http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.api_headers(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.api_headers(self.http.post(self.url(path)))
    }

    fn api_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(CONTENT_TYPE, "application/json")
            .header("trakt-api-version", API_VERSION)
            .header("trakt-api-key", &self.client_id)
    }
}
