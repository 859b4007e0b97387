use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    cli::types::{LeagueId, Season, TeamId},
    core::{build_client, page_cache_path, try_read_to_string, write_string},
    Result,
};

/// Base path for the ESPN fantasy football league pages.
pub const FFL_BASE_URL: &str = "http://games.espn.go.com/ffl";

/// Pause between uncached page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

pub fn projections_url(league_id: LeagueId) -> String {
    format!("{FFL_BASE_URL}/tools/projections?leagueId={}", league_id)
}

pub fn schedule_url(league_id: LeagueId) -> String {
    format!("{FFL_BASE_URL}/schedule?leagueId={}", league_id)
}

pub fn boxscore_url(
    league_id: LeagueId,
    team_id: TeamId,
    scoring_period_id: u8,
    season: Season,
) -> String {
    format!(
        "{FFL_BASE_URL}/boxscorequick?leagueId={}&teamId={}&scoringPeriodId={}&seasonId={}&view=scoringperiod&version=quick",
        league_id, team_id, scoring_period_id, season
    )
}

/// Resolve a pagination link against the page it was found on.
pub fn resolve_link(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}

/// Fetches pages, reading through the on-disk page cache unless refreshing.
pub struct PageFetcher {
    client: Client,
    refresh: bool,
    delay: Duration,
}

impl PageFetcher {
    pub fn new(refresh: bool) -> Result<Self> {
        Ok(Self {
            client: build_client(30)?,
            refresh,
            delay: DEFAULT_PAGE_DELAY,
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Return the page body for `url`.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let path = page_cache_path(url);

        if !self.refresh {
            if let Some(body) = try_read_to_string(&path) {
                debug!("page cache hit for {}", url);
                return Ok(body);
            }
        }

        info!("fetching {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if let Err(e) = write_string(&path, &body) {
            warn!("could not cache {}: {}", path.display(), e);
        }

        tokio::time::sleep(self.delay).await;
        Ok(body)
    }
}
