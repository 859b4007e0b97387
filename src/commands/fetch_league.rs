//! League schedule and box score scraping command

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::{
    cli::types::{Period, LEAGUE_SLOTS},
    espn::{
        boxscore::parse_slot_points,
        http::{boxscore_url, schedule_url, PageFetcher},
        schedule::parse_schedule,
    },
    league::LeagueTable,
    storage::{read_teams, write_league},
    FflError, LeagueId, Result, Season, TeamId,
};

use super::resolve_league_id;

/// Inputs for building the league file
#[derive(Debug, Clone)]
pub struct FetchLeagueParams {
    pub league_id: Option<LeagueId>,
    pub season: Season,
    pub refresh: bool,
    pub teams: Option<PathBuf>,
    pub out: PathBuf,
    pub skip_boxscores: bool,
    pub weeks: u8,
    pub rounds: u8,
}

pub async fn handle_fetch_league(params: FetchLeagueParams) -> Result<()> {
    let league_id = resolve_league_id(params.league_id)?;
    let fetcher = PageFetcher::new(params.refresh)?;

    let teams = match &params.teams {
        Some(path) => read_teams(path)?,
        None => Vec::new(),
    };

    println!("Fetching schedule for league {}...", league_id);
    // tarpaulin::skip - HTTP call
    let body = fetcher.fetch(&schedule_url(league_id)).await?;
    let matchups = parse_schedule(&body)?;
    if matchups.is_empty() {
        return Err(FflError::NoData);
    }
    info!("{} matchups on the schedule", matchups.len());

    let mut table = LeagueTable::new(
        Period::season(params.weeks, params.rounds),
        LEAGUE_SLOTS.to_vec(),
    );
    table.add_results(&teams, &matchups);

    if params.skip_boxscores {
        debug!("skipping box scores");
    } else if teams.is_empty() {
        warn!("no teams file given; box scores need team ids, skipping them");
    } else {
        let fetched = fetch_box_scores(&fetcher, &mut table, league_id, &params).await?;
        println!("✓ Read {} box scores", fetched);
    }

    write_league(&params.out, &table)?;
    println!(
        "✓ Saved {} teams over {} periods to {}",
        table.teams().len(),
        table.periods().len(),
        params.out.display()
    );

    Ok(())
}

/// Fill the slot columns from each played game's box score. Pages that fail
/// to load or parse are logged and left blank.
async fn fetch_box_scores(
    fetcher: &PageFetcher,
    table: &mut LeagueTable,
    league_id: LeagueId,
    params: &FetchLeagueParams,
) -> Result<usize> {
    let wanted = box_score_requests(table);
    let mut fetched = 0;

    for (name, team_id, period) in wanted {
        let url = boxscore_url(
            league_id,
            team_id,
            period.scoring_period_id(params.weeks),
            params.season,
        );
        // tarpaulin::skip - HTTP call
        let body = match fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("box score for {} {}: {}", name, period, e);
                continue;
            }
        };

        match parse_slot_points(&body) {
            Ok(points) => {
                table.set_slot_points(&name, period, points)?;
                fetched += 1;
            }
            Err(FflError::NoData) => debug!("no box score for {} {}", name, period),
            Err(e) => warn!("box score for {} {}: {}", name, period, e),
        }
    }

    Ok(fetched)
}

/// Every (team, id, period) in the table's layout where the team played.
pub fn box_score_requests(table: &LeagueTable) -> Vec<(String, TeamId, Period)> {
    table
        .teams()
        .iter()
        .filter_map(|t| t.team_id.map(|id| (t, id)))
        .flat_map(|(team, id)| {
            table
                .periods()
                .iter()
                .filter(|p| team.games.contains_key(p))
                .map(move |&p| (team.name.clone(), id, p))
        })
        .collect()
}
