use chrono::NaiveDate;
use reqwest::Method;

use crate::{
    Result, SyncError, success,
    types::{DiaryDetails, FilmSummary, FilmsResponse, LogEntry, LogEntryRequest, WatchEvent},
    utils,
};

use super::{LetterboxdClient, SignaturePlacement};

/// Tag attached to every diary entry created by watchsync.
pub const SOURCE_TAG: &str = "plex";

impl LetterboxdClient<'_> {
    /// Logs a watched movie in the user's Letterboxd diary, dated today.
    ///
    /// Uses the stored access token as is; callers refresh it first.
    pub fn log_entry(&self, event: &WatchEvent) -> Result<()> {
        self.log_entry_on(event, utils::today())
    }

    pub fn log_entry_on(&self, event: &WatchEvent, date: NaiveDate) -> Result<()> {
        let WatchEvent::Movie { imdb_id } = event else {
            return Err(SyncError::Provider(
                "Letterboxd diary entries need a movie".to_string(),
            ));
        };

        let access_token = self.access_token()?;

        let pb = utils::spinner("Looking up film on Letterboxd...");
        let found = self.get_film(imdb_id, &access_token);
        pb.finish_and_clear();
        let film = found?;

        let payload = LogEntryRequest {
            film_id: film.id.clone(),
            diary_details: DiaryDetails {
                diary_date: utils::format_diary_date(date),
                rewatch: false,
            },
            tags: vec![SOURCE_TAG.to_string()],
        };

        let builder = self
            .request(Method::POST, "/log-entries")
            .bearer_auth(&access_token)
            .json(&payload);
        let request = self.sign(builder, SignaturePlacement::Query)?;
        let entry: LogEntry = utils::read_json(self.execute(request)?, "Letterboxd log entry")?;

        log::debug!("created log entry {}", entry.id);
        success!(
            "Logged {} to your Letterboxd diary on {}",
            film.name,
            payload.diary_details.diary_date
        );
        Ok(())
    }

    /// Resolves an IMDb id to the Letterboxd film.
    fn get_film(&self, imdb_id: &str, access_token: &str) -> Result<FilmSummary> {
        let film_id = format!("imdb:{imdb_id}");
        let builder = self
            .request(Method::GET, "/films")
            .bearer_auth(access_token)
            .query(&[("filmId", film_id.as_str()), ("perPage", "1")]);
        let request = self.sign(builder, SignaturePlacement::Query)?;

        let films: FilmsResponse = utils::read_json(self.execute(request)?, "Letterboxd film lookup")?;
        films
            .items
            .into_iter()
            .next()
            .ok_or_else(|| SyncError::Provider(format!("No Letterboxd film found for {film_id}")))
    }
}
