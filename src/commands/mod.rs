//! Command implementations for the draft assistant

pub mod draft;
pub mod fetch_league;
pub mod fetch_projections;
pub mod league_stats;


use std::path::PathBuf;

use crate::{core::charts_dir, FflError, LeagueId, Result, LEAGUE_ID_ENV_VAR};

/// Resolve league ID from option or environment variable
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    league_id
        .or_else(|| {
            std::env::var(LEAGUE_ID_ENV_VAR)
                .ok()
                .and_then(|s| s.parse::<LeagueId>().ok())
        })
        .ok_or_else(|| FflError::MissingLeagueId {
            env_var: LEAGUE_ID_ENV_VAR.to_string(),
        })
}

/// Chart directory from `--out-dir` or the cache, created if missing.
pub fn resolve_charts_dir(out_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = out_dir.unwrap_or_else(charts_dir);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
