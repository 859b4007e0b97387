//! League team and draft pick files.

use std::path::Path;

use super::models::{DraftPick, LeagueTeam};
use crate::Result;

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?)
}

/// Load `team_id, abbrev, name, owner` rows, sorted by team id.
pub fn read_teams(path: &Path) -> Result<Vec<LeagueTeam>> {
    let mut teams = reader(path)?
        .deserialize()
        .collect::<std::result::Result<Vec<LeagueTeam>, _>>()?;
    teams.sort_by_key(|t| t.team_id);
    Ok(teams)
}

pub fn write_teams(path: &Path, teams: &[LeagueTeam]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for team in teams {
        writer.serialize(team)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a recorded draft in pick order.
pub fn read_picks(path: &Path) -> Result<Vec<DraftPick>> {
    let picks = reader(path)?
        .deserialize()
        .collect::<std::result::Result<Vec<DraftPick>, _>>()?;
    Ok(picks)
}
