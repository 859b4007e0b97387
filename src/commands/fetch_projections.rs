//! Projections scraping command

use std::path::{Path, PathBuf};

use crate::{
    espn::{
        http::PageFetcher,
        projections::{clean_projection_rows, fetch_projection_rows},
    },
    storage::{default_projections_path, write_projections},
    FflError, LeagueId, Result,
};

use super::resolve_league_id;

/// Scrape every projections page and write the cleaned players to `out`
/// (today's `ffl_data_YYYYMMDD.csv` when not given).
pub async fn handle_fetch_projections(
    league_id: Option<LeagueId>,
    refresh: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let fetcher = PageFetcher::new(refresh)?;

    println!("Fetching projections for league {}...", league_id);
    // tarpaulin::skip - HTTP call
    let rows = fetch_projection_rows(&fetcher, league_id).await?;

    let players = clean_projection_rows(rows);
    if players.is_empty() {
        return Err(FflError::NoData);
    }

    let path = out.unwrap_or_else(|| default_projections_path(Path::new(".")));
    write_projections(&path, &players)?;
    println!("✓ Saved {} players to {}", players.len(), path.display());

    Ok(())
}
