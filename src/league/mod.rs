//! Season statistics for a fantasy league.
//!
//! - `table`: per team results, the in-memory form of the league file
//! - `scoring`: points for and against, period means and spreads
//! - `stats`: records against the field and win factor correlations
//! - `treemap`: layout for the points-by-slot chart

pub mod scoring;
pub mod stats;
pub mod table;
pub mod treemap;

pub use scoring::{team_scoring, PeriodScoring, ScoringSummary, TeamScoring};
pub use stats::{
    against_the_field, clutch_performance, win_correlations, win_factors, win_percentages,
    win_regressions, FactorCorrelation, FactorRegression, FieldRecord, WinFactor,
};
pub use table::{GameResult, LeagueTable, Standings, TeamSeason};
pub use treemap::{layout, rect_divide, Rect, TreeNode, TreeRect};
