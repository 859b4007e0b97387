//! Fantasy Football Draft Assistant Library
//!
//! Scrapes an ESPN league's projections, schedule and box scores into CSV
//! files, runs a live draft ranked by replacement value, and summarizes the
//! season: scoring, records against the field, and what correlates with
//! winning.
//!
//! ## Features
//!
//! - **Projections**: Every player's projected season points, one CSV per day
//! - **Live Draft**: Replacement values recomputed after each pick, with
//!   best-available and state-of-draft reports
//! - **League Data**: Weekly results and per-slot starter points per team
//! - **League Stats**: Win factors, regressions and treemaps of slot scoring
//! - **Charts**: PNG renderings of the draft and league reports
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ffl_draft::commands::league_stats::*;
//! use std::path::PathBuf;
//!
//! # fn example() -> ffl_draft::Result<()> {
//! handle_league_stats(LeagueStatsParams {
//!     input: PathBuf::from("ffldata.csv"),
//!     json: false,
//!     team: None,
//!     charts: false,
//!     out_dir: None,
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your ESPN league ID to avoid passing it in every command:
//! ```bash
//! export FFL_LEAGUE_ID=209006
//! ```

pub mod charts;
pub mod cli;
pub mod commands;
pub mod core;
pub mod draft;
pub mod error;
pub mod espn;
pub mod league;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{LeagueId, Owner, Period, Position, Season, Slot, TeamId};
pub use error::{FflError, Result};

pub const LEAGUE_ID_ENV_VAR: &str = "FFL_LEAGUE_ID";
