use chrono::{DateTime, Utc};

use crate::{
    Result, SyncError,
    management::SECTION_TRAKT,
    success,
    types::{HistoryEpisode, HistoryRequest, HistoryResponse, SearchResult, TraktEpisode, TraktShow, WatchEvent},
    utils,
};

use super::TraktClient;

impl TraktClient<'_> {
    /// Records a watched episode in the user's Trakt history.
    ///
    /// Uses the stored access token as is; callers refresh it first. The
    /// episode is stamped with the current UTC time.
    pub fn sync_history(&self, event: &WatchEvent) -> Result<()> {
        self.sync_history_at(event, Utc::now())
    }

    /// Same as [`sync_history`](Self::sync_history) with an explicit
    /// `watched_at` instant.
    pub fn sync_history_at(&self, event: &WatchEvent, watched_at: DateTime<Utc>) -> Result<()> {
        let WatchEvent::Episode {
            tvdb_id,
            season,
            episode,
        } = event
        else {
            return Err(SyncError::Provider(
                "Trakt history sync needs an episode".to_string(),
            ));
        };

        let access_token = self.settings.get(SECTION_TRAKT, "access_token")?;

        let pb = utils::spinner("Looking up episode on Trakt.tv...");
        let found = self.get_show(*tvdb_id).and_then(|show| {
            self.get_episode(&show, *season, *episode)
                .map(|episode| (show, episode))
        });
        pb.finish_and_clear();
        let (show, episode) = found?;

        let payload = HistoryRequest {
            episodes: vec![HistoryEpisode {
                watched_at: utils::format_watched_at(watched_at),
                ids: episode.ids,
            }],
        };

        log::debug!("POST {}", self.url("/sync/history"));
        let res = self
            .post("/sync/history")
            .bearer_auth(access_token)
            .json(&payload)
            .send()?;
        let res = utils::ensure_success(res, "Trakt history sync")?;

        match res.json::<HistoryResponse>() {
            Ok(history) => success!(
                "Added {} S{:02}E{:02} to your Trakt.tv history ({} new)",
                show.title,
                episode.season,
                episode.number,
                history.added.episodes
            ),
            Err(_) => success!(
                "Added {} S{:02}E{:02} to your Trakt.tv history",
                show.title,
                episode.season,
                episode.number
            ),
        }
        Ok(())
    }

    /// Resolves a TVDB show id to the show of the first search result.
    fn get_show(&self, tvdb_id: u64) -> Result<TraktShow> {
        let path = format!("/search/tvdb/{tvdb_id}");
        log::debug!("GET {}?type=show", self.url(&path));

        let res = self.get(&path).query(&[("type", "show")]).send()?;
        let results: Vec<SearchResult> = utils::read_json(res, "Trakt show search")?;

        results
            .into_iter()
            .next()
            .and_then(|r| r.show)
            .ok_or_else(|| SyncError::Provider(format!("No Trakt show found for TVDB id {tvdb_id}")))
    }

    fn get_episode(&self, show: &TraktShow, season: u32, episode: u32) -> Result<TraktEpisode> {
        let path = format!(
            "/shows/{slug}/seasons/{season}/episodes/{episode}",
            slug = show.ids.slug
        );
        log::debug!("GET {}", self.url(&path));

        let res = self.get(&path).send()?;
        utils::read_json(res, "Trakt episode lookup")
    }
}
