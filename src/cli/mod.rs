//! CLI argument definitions and parsing.

pub mod types;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{LeagueId, Season, PLAYOFF_ROUNDS, REGULAR_SEASON_WEEKS};

use crate::draft::DEFAULT_TOP_N;

/// Default league file written by `fetch-league` and read by `league-stats`.
pub const DEFAULT_LEAGUE_FILE: &str = "ffldata.csv";

/// League selection shared by the fetching commands
#[derive(Debug, Args)]
pub struct LeagueArgs {
    /// League ID (or set `FFL_LEAGUE_ID` env var).
    #[clap(long, short)]
    pub league_id: Option<LeagueId>,

    /// Season year (e.g. 2014).
    #[clap(long, short, default_value_t = Season::default())]
    pub season: Season,

    /// Fetch pages again even when cached copies exist.
    #[clap(long)]
    pub refresh: bool,
}

/// Where charts go
#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Render PNG charts.
    #[clap(long)]
    pub charts: bool,

    /// Chart directory (defaults to the cache's `charts/` folder).
    #[clap(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[clap(name = "ffl-draft", about = "Fantasy football draft assistant")]
pub struct Ffl {
    /// More logging: `-v` for info, `-vv` for debug.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scrape season projections for every player into a CSV file.
    FetchProjections {
        #[clap(flatten)]
        league: LeagueArgs,

        /// Output file (defaults to `ffl_data_YYYYMMDD.csv`).
        #[clap(long, short)]
        out: Option<PathBuf>,
    },

    /// Run a live draft against a projections file.
    ///
    /// After every pick the replacement values are recomputed and the best
    /// available players and the state of the draft are shown.
    Draft {
        /// Projections CSV written by `fetch-projections`.
        projections: PathBuf,

        /// League teams CSV (`team_id, abbrev, name, owner`).
        #[clap(long)]
        teams: Option<PathBuf>,

        /// Replay a recorded draft (`playerpos, team`) before going interactive.
        #[clap(long)]
        picks: Option<PathBuf>,

        /// Wait for Enter after each replayed pick.
        #[clap(long)]
        slow: bool,

        /// How many players per position to show.
        #[clap(long, short = 'n', default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// File written by the `w` menu choice.
        #[clap(long)]
        save: Option<PathBuf>,

        #[clap(flatten)]
        charts: ChartArgs,
    },

    /// Scrape the league schedule and box scores into the league CSV.
    FetchLeague {
        #[clap(flatten)]
        league: LeagueArgs,

        /// League teams CSV; needed to map box scores to teams.
        #[clap(long)]
        teams: Option<PathBuf>,

        /// Output file.
        #[clap(long, short, default_value = DEFAULT_LEAGUE_FILE)]
        out: PathBuf,

        /// Only fetch the schedule, not per-slot box scores.
        #[clap(long)]
        skip_boxscores: bool,

        /// Regular season weeks.
        #[clap(long, default_value_t = REGULAR_SEASON_WEEKS)]
        weeks: u8,

        /// Playoff rounds.
        #[clap(long, default_value_t = PLAYOFF_ROUNDS)]
        rounds: u8,
    },

    /// Team scoring, records against the field and win factor correlations.
    LeagueStats {
        /// League CSV written by `fetch-league`.
        #[clap(default_value = DEFAULT_LEAGUE_FILE)]
        input: PathBuf,

        /// Output results as JSON instead of text tables.
        #[clap(long)]
        json: bool,

        /// Team whose points-by-slot treemap to draw (with `--charts`).
        #[clap(long)]
        team: Option<String>,

        #[clap(flatten)]
        charts: ChartArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_draft_command() {
        let app = Ffl::parse_from([
            "ffl-draft",
            "-vv",
            "draft",
            "ffl_data_20140901.csv",
            "--teams",
            "teams.csv",
            "-n",
            "10",
            "--charts",
        ]);
        assert_eq!(app.verbose, 2);
        match app.command {
            Commands::Draft {
                projections,
                teams,
                picks,
                top_n,
                charts,
                ..
            } => {
                assert_eq!(projections, PathBuf::from("ffl_data_20140901.csv"));
                assert_eq!(teams, Some(PathBuf::from("teams.csv")));
                assert!(picks.is_none());
                assert_eq!(top_n, 10);
                assert!(charts.charts);
                assert!(charts.out_dir.is_none());
            }
            other => panic!("Expected Draft, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fetch_league_defaults() {
        let app = Ffl::parse_from(["ffl-draft", "fetch-league", "-l", "209006"]);
        assert_eq!(app.verbose, 0);
        match app.command {
            Commands::FetchLeague {
                league,
                out,
                weeks,
                rounds,
                skip_boxscores,
                ..
            } => {
                assert_eq!(league.league_id, Some(LeagueId::new(209006)));
                assert_eq!(league.season, Season::new(2014));
                assert!(!league.refresh);
                assert_eq!(out, PathBuf::from(DEFAULT_LEAGUE_FILE));
                assert_eq!(weeks, 14);
                assert_eq!(rounds, 3);
                assert!(!skip_boxscores);
            }
            other => panic!("Expected FetchLeague, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_league_stats() {
        let app = Ffl::parse_from(["ffl-draft", "league-stats", "--json", "-v"]);
        assert_eq!(app.verbose, 1);
        match app.command {
            Commands::LeagueStats { input, json, .. } => {
                assert_eq!(input, PathBuf::from(DEFAULT_LEAGUE_FILE));
                assert!(json);
            }
            other => panic!("Expected LeagueStats, got {:?}", other),
        }
    }
}
