//! League statistics command

use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

use crate::{
    charts,
    league::{
        against_the_field, clutch_performance, team_scoring, win_correlations, win_percentages,
        win_regressions, FactorCorrelation, FactorRegression, FieldRecord, LeagueTable,
        ScoringSummary,
    },
    storage::read_league,
    FflError, Result,
};

use super::resolve_charts_dir;

/// Inputs for the stats report
#[derive(Debug, Clone)]
pub struct LeagueStatsParams {
    pub input: PathBuf,
    pub json: bool,
    pub team: Option<String>,
    pub charts: bool,
    pub out_dir: Option<PathBuf>,
}

/// Everything computed from one league file.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueReport {
    pub scoring: ScoringSummary,
    pub win_percentages: Vec<(String, f64)>,
    pub against_the_field: Vec<FieldRecord>,
    pub clutch: Vec<FieldRecord>,
    pub correlations: Vec<FactorCorrelation>,
    pub regressions: Vec<FactorRegression>,
}

pub fn build_report(table: &LeagueTable) -> LeagueReport {
    LeagueReport {
        scoring: team_scoring(table),
        win_percentages: win_percentages(table),
        against_the_field: against_the_field(table),
        clutch: clutch_performance(table),
        correlations: win_correlations(table),
        regressions: win_regressions(table),
    }
}

pub fn handle_league_stats(params: LeagueStatsParams) -> Result<()> {
    let table = read_league(&params.input)?;
    if table.is_empty() {
        return Err(FflError::NoData);
    }
    info!(
        "read {} teams from {}",
        table.teams().len(),
        params.input.display()
    );

    let report = build_report(&table);
    if params.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    if params.charts {
        // tarpaulin::skip - PNG rendering
        let dir = resolve_charts_dir(params.out_dir.clone())?;
        charts::league::against_the_field(&report.against_the_field, &dir.join("against_the_field.png"))?;
        charts::league::against_the_field(&report.clutch, &dir.join("clutch.png"))?;
        charts::league::regression_strength(&report.regressions, &dir.join("regression_strength.png"))?;

        if let Some(name) = &params.team {
            let team = table.team(name).ok_or_else(|| FflError::InvalidTeam {
                team: name.clone(),
            })?;
            let file = format!("treemap_{}.png", chart_file_stem(name));
            charts::league::slot_treemap(team, table.slots(), &dir.join(file))?;
        }
        println!("✓ Charts written to {}", dir.display());
    }

    Ok(())
}

/// Team name reduced to something safe in a file name.
pub fn chart_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

/// Plain text tables for the terminal.
pub fn render_report(report: &LeagueReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "TEAM SCORING");
    let _ = writeln!(
        out,
        "{:<25} {:>6} {:>9} {:>9} {:>9} {:>9}",
        "TEAM", "WIN %", "AVG FOR", "STD FOR", "AVG AGN", "STD AGN"
    );
    for team in &report.scoring.teams {
        let win = report
            .win_percentages
            .iter()
            .find(|(name, _)| *name == team.team)
            .map_or(0.0, |(_, w)| *w);
        let _ = writeln!(
            out,
            "{:<25} {:>6.3} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            team.team, win, team.avg_for, team.std_for, team.avg_against, team.std_against
        );
    }

    let _ = writeln!(out, "\nPERIOD SCORING");
    let _ = writeln!(out, "{:<8} {:>9} {:>9}", "PERIOD", "MEAN", "STD");
    for period in &report.scoring.periods {
        let _ = writeln!(
            out,
            "{:<8} {:>9.2} {:>9.2}",
            period.period.to_string(),
            period.mean,
            period.std
        );
    }

    let _ = writeln!(out, "\nAGAINST THE FIELD");
    let _ = writeln!(
        out,
        "{:<25} {:>7} {:>7} {:>7} {:>9}",
        "TEAM", "WINS", "+/-", "LOSSES", "CLUTCH"
    );
    for record in &report.against_the_field {
        let clutch = report
            .clutch
            .iter()
            .find(|c| c.team == record.team)
            .map_or(0.0, |c| c.wins_mean);
        let _ = writeln!(
            out,
            "{:<25} {:>7.2} {:>7.2} {:>7.2} {:>9.2}",
            record.team,
            record.wins_mean,
            record.wins_error(),
            record.losses_mean,
            clutch
        );
    }

    let _ = writeln!(out, "\nWIN FACTORS");
    let _ = writeln!(
        out,
        "{:<12} {:>8} {:>10} {:>10} {:>9}",
        "FACTOR", "R", "SLOPE", "INTERCEPT", "STD ERR"
    );
    for fit in &report.regressions {
        let (slope, intercept, std_err) = match &fit.regression {
            Some(r) => (Some(r.slope), Some(r.intercept), r.std_err),
            None => (None, None, None),
        };
        let r = report
            .correlations
            .iter()
            .find(|c| c.factor == fit.factor)
            .and_then(|c| c.r);
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>10} {:>10} {:>9}",
            fit.factor,
            fmt_opt(r),
            fmt_opt(slope),
            fmt_opt(intercept),
            fmt_opt(std_err)
        );
    }

    out
}
