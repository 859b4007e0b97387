//! Points for and against per team, and how each period's scores spread.

use serde::Serialize;
use std::collections::BTreeMap;

use super::LeagueTable;
use crate::{
    cli::types::Period,
    core::stats::{mean, std_dev},
};

/// League-wide scores in one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodScoring {
    pub period: Period,
    /// Every team's score that period.
    pub scores: Vec<f64>,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamScoring {
    pub team: String,
    pub points_for: Vec<f64>,
    pub points_against: Vec<f64>,
    pub avg_for: f64,
    pub avg_against: f64,
    pub std_for: f64,
    pub std_against: f64,
    /// Points for minus the period mean: how a team fared against the week.
    pub diff_for: Vec<f64>,
    /// Opponent points minus the period mean: schedule luck.
    pub diff_against: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringSummary {
    pub periods: Vec<PeriodScoring>,
    pub teams: Vec<TeamScoring>,
}

/// Averages and spreads of every final score in the table. Periods without
/// games are left out; empty lists average to 0.
pub fn team_scoring(table: &LeagueTable) -> ScoringSummary {
    let periods: Vec<PeriodScoring> = table
        .periods()
        .iter()
        .filter_map(|&period| {
            let scores: Vec<f64> = table
                .teams()
                .iter()
                .filter_map(|t| t.points_for(period))
                .collect();
            if scores.is_empty() {
                return None;
            }
            Some(PeriodScoring {
                period,
                mean: mean(&scores).unwrap_or(0.0),
                std: std_dev(&scores).unwrap_or(0.0),
                scores,
            })
        })
        .collect();

    let period_means: BTreeMap<Period, f64> = periods.iter().map(|p| (p.period, p.mean)).collect();

    let teams = table
        .teams()
        .iter()
        .map(|t| {
            let points_for = t.points_for_by_period();
            let points_against = t.points_against_by_period();
            let diff = |value: fn(&super::GameResult) -> f64| -> Vec<f64> {
                t.games
                    .iter()
                    .filter_map(|(period, game)| period_means.get(period).map(|m| value(game) - m))
                    .collect()
            };

            TeamScoring {
                team: t.name.clone(),
                avg_for: mean(&points_for).unwrap_or(0.0),
                avg_against: mean(&points_against).unwrap_or(0.0),
                std_for: std_dev(&points_for).unwrap_or(0.0),
                std_against: std_dev(&points_against).unwrap_or(0.0),
                diff_for: diff(|g| g.points_for),
                diff_against: diff(|g| g.points_against),
                points_for,
                points_against,
            }
        })
        .collect();

    ScoringSummary { periods, teams }
}
