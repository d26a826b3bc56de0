use serde::{Deserialize, Serialize};

/// A watched item as described by the Tautulli invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Episode {
        tvdb_id: u64,
        season: u32,
        episode: u32,
    },
    Movie {
        imdb_id: String,
    },
}

/// Access/refresh token pair of one service, as kept in the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceCodeRequest<'a> {
    pub client_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceCode {
    pub device_code: String,
    pub user_code: String,
    pub verification_url: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceTokenRequest<'a> {
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'a str,
}

/// Token response shared by both services' OAuth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenResponse> for AuthSession {
    fn from(token: TokenResponse) -> Self {
        AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub show: Option<TraktShow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraktShow {
    pub title: String,
    pub ids: ShowIds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowIds {
    pub trakt: u64,
    pub slug: String,
    pub tvdb: Option<u64>,
    pub imdb: Option<String>,
    pub tmdb: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraktEpisode {
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: EpisodeIds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeIds {
    pub trakt: u64,
    pub tvdb: Option<u64>,
    pub imdb: Option<String>,
    pub tmdb: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRequest {
    pub episodes: Vec<HistoryEpisode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEpisode {
    pub watched_at: String,
    pub ids: EpisodeIds,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryResponse {
    pub added: HistoryCounts,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryCounts {
    pub movies: u64,
    pub episodes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilmsResponse {
    pub items: Vec<FilmSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryRequest {
    pub film_id: String,
    pub diary_details: DiaryDetails,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryDetails {
    pub diary_date: String,
    pub rewatch: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    pub id: String,
}
