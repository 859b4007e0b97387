//! The wide league file: one row per team, then `AV` and `STD` rows.
//!
//! Columns are the team identity and standings, then for every period the
//! opponent and both scores, then for every period the points of each
//! starting slot. Empty cells mean no data.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::{
    cli::types::{Period, Slot, TeamId, LEAGUE_SLOTS},
    core::stats::{mean, std_dev},
    league::{LeagueTable, Standings, TeamSeason},
    FflError, Result,
};

pub const TEAM_NAME: &str = "TEAM NAME";
pub const TEAM_ABB: &str = "TEAM ABB";
pub const TEAM_ID: &str = "TEAM ID";
pub const OWNER: &str = "OWNER";
pub const WINS: &str = "WINS";
pub const LOSSES: &str = "LOSSES";
pub const TIES: &str = "TIES";
pub const PF: &str = "PF";
pub const PA: &str = "PA";

pub const AVERAGE_ROW: &str = "AV";
pub const STD_ROW: &str = "STD";

const OPPONENT: &str = "OP";
const PTS_FOR: &str = "PTS FOR";
const PTS_AGAINST: &str = "PTS AGAINST";

/// Identity columns never summarised in the AV/STD rows.
const IDENTITY_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Name,
    Abbrev,
    Id,
    Owner,
    Wins,
    Losses,
    Ties,
    PointsFor,
    PointsAgainst,
    Opponent(Period),
    PeriodFor(Period),
    PeriodAgainst(Period),
    SlotPoints(Period, Slot),
    Unknown,
}

/// Split `WEEK 3 PTS FOR` into the period and the rest of the header.
pub fn split_period_column(header: &str) -> Option<(Period, &str)> {
    let end = if header.starts_with("ROUND ") {
        header.find("PLAYOFFS")? + "PLAYOFFS".len()
    } else if let Some(rest) = header.strip_prefix("WEEK ") {
        5 + rest.find(' ').unwrap_or(rest.len())
    } else {
        return None;
    };
    let (label, rest) = header.split_at(end);
    Some((label.parse().ok()?, rest.trim()))
}

fn classify(header: &str) -> Column {
    match header {
        TEAM_NAME => return Column::Name,
        TEAM_ABB => return Column::Abbrev,
        TEAM_ID => return Column::Id,
        OWNER => return Column::Owner,
        WINS => return Column::Wins,
        LOSSES => return Column::Losses,
        TIES => return Column::Ties,
        PF => return Column::PointsFor,
        PA => return Column::PointsAgainst,
        _ => {}
    }

    let Some((period, rest)) = split_period_column(header) else {
        return Column::Unknown;
    };
    match rest {
        OPPONENT => Column::Opponent(period),
        PTS_FOR => Column::PeriodFor(period),
        PTS_AGAINST => Column::PeriodAgainst(period),
        slot => slot
            .parse()
            .map(|s| Column::SlotPoints(period, s))
            .unwrap_or(Column::Unknown),
    }
}

/// Header row for the given periods and slots.
pub fn league_headers(periods: &[Period], slots: &[Slot]) -> Vec<String> {
    let mut headers: Vec<String> = [TEAM_NAME, TEAM_ABB, TEAM_ID, OWNER, WINS, LOSSES, TIES, PF, PA]
        .iter()
        .map(|h| h.to_string())
        .collect();
    for period in periods {
        for suffix in [OPPONENT, PTS_FOR, PTS_AGAINST] {
            headers.push(format!("{} {}", period, suffix));
        }
    }
    for period in periods {
        for slot in slots {
            headers.push(format!("{} {}", period, slot));
        }
    }
    headers
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn team_record(team: &TeamSeason, columns: &[Column]) -> Vec<String> {
    columns
        .iter()
        .map(|column| match *column {
            Column::Name => team.name.clone(),
            Column::Abbrev => team.abbrev.clone(),
            Column::Id => team.team_id.map(|id| id.to_string()).unwrap_or_default(),
            Column::Owner => team.owner.clone(),
            Column::Wins => team.standings.wins.to_string(),
            Column::Losses => team.standings.losses.to_string(),
            Column::Ties => team.standings.ties.to_string(),
            Column::PointsFor => team.standings.points_for.to_string(),
            Column::PointsAgainst => team.standings.points_against.to_string(),
            Column::Opponent(p) => team
                .games
                .get(&p)
                .map(|g| g.opponent.clone())
                .unwrap_or_default(),
            Column::PeriodFor(p) => number(team.points_for(p)),
            Column::PeriodAgainst(p) => number(team.points_against(p)),
            Column::SlotPoints(p, s) => number(team.slot_points(p, s)),
            Column::Unknown => String::new(),
        })
        .collect()
}

/// Mean and population std per column, blank unless every team has a number.
fn summary_records(rows: &[Vec<String>], width: usize) -> (Vec<String>, Vec<String>) {
    let mut average = vec![String::new(); width];
    let mut spread = vec![String::new(); width];
    if let Some(first) = average.first_mut() {
        *first = AVERAGE_ROW.to_string();
    }
    if let Some(first) = spread.first_mut() {
        *first = STD_ROW.to_string();
    }

    for col in IDENTITY_COLUMNS..width {
        let values: Option<Vec<f64>> = rows
            .iter()
            .map(|row| row.get(col).and_then(|c| c.trim().parse::<f64>().ok()))
            .collect();
        if let Some(values) = values {
            average[col] = number(mean(&values));
            spread[col] = number(std_dev(&values));
        }
    }
    (average, spread)
}

pub fn write_league(path: &Path, table: &LeagueTable) -> Result<()> {
    info!("writing {} teams to {}", table.teams().len(), path.display());

    let headers = league_headers(table.periods(), table.slots());
    let columns: Vec<Column> = headers.iter().map(|h| classify(h)).collect();

    let rows: Vec<Vec<String>> = table
        .teams()
        .iter()
        .map(|t| team_record(t, &columns))
        .collect();
    let (average, spread) = summary_records(&rows, headers.len());

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&headers)?;
    for row in rows.iter().chain([&average, &spread]) {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_cell<T: std::str::FromStr>(cell: &str) -> Option<T> {
    let cell = cell.trim();
    if cell.is_empty() {
        None
    } else {
        cell.parse().ok()
    }
}

/// Load the league file. The `AV` and `STD` rows are skipped; summaries are
/// recomputed from the teams when needed.
pub fn read_league(path: &Path) -> Result<LeagueTable> {
    info!("loading league data from {}", path.display());

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns: Vec<Column> = headers.iter().map(|h| classify(h)).collect();

    if !columns.contains(&Column::Name) {
        return Err(FflError::MissingColumn {
            column: TEAM_NAME.to_string(),
            file: path.display().to_string(),
        });
    }

    let mut periods: Vec<Period> = Vec::new();
    let mut slots: Vec<Slot> = Vec::new();
    for (header, column) in headers.iter().zip(&columns) {
        match *column {
            Column::Opponent(p) | Column::PeriodFor(p) | Column::PeriodAgainst(p) => {
                if !periods.contains(&p) {
                    periods.push(p);
                }
            }
            Column::SlotPoints(p, s) => {
                if !periods.contains(&p) {
                    periods.push(p);
                }
                if !slots.contains(&s) {
                    slots.push(s);
                }
            }
            Column::Unknown => debug!("ignoring league column '{}'", header),
            _ => {}
        }
    }
    periods.sort();
    if slots.is_empty() {
        slots = LEAGUE_SLOTS.to_vec();
    }

    let mut table = LeagueTable::new(periods, slots);

    for record in reader.records() {
        let record = record?;
        let mut team = TeamSeason::default();
        let mut standings = Standings::default();
        let mut opponents: BTreeMap<Period, String> = BTreeMap::new();
        let mut scored: BTreeMap<Period, f64> = BTreeMap::new();
        let mut allowed: BTreeMap<Period, f64> = BTreeMap::new();

        for (cell, column) in record.iter().zip(&columns) {
            match *column {
                Column::Name => team.name = cell.trim().to_string(),
                Column::Abbrev => team.abbrev = cell.trim().to_string(),
                Column::Id => team.team_id = parse_cell::<u32>(cell).map(TeamId::new),
                Column::Owner => team.owner = cell.trim().to_string(),
                Column::Wins => standings.wins = parse_cell(cell).unwrap_or(0),
                Column::Losses => standings.losses = parse_cell(cell).unwrap_or(0),
                Column::Ties => standings.ties = parse_cell(cell).unwrap_or(0),
                Column::PointsFor => standings.points_for = parse_cell(cell).unwrap_or(0.0),
                Column::PointsAgainst => standings.points_against = parse_cell(cell).unwrap_or(0.0),
                Column::Opponent(p) => {
                    if !cell.trim().is_empty() {
                        opponents.insert(p, cell.trim().to_string());
                    }
                }
                Column::PeriodFor(p) => {
                    if let Some(v) = parse_cell(cell) {
                        scored.insert(p, v);
                    }
                }
                Column::PeriodAgainst(p) => {
                    if let Some(v) = parse_cell(cell) {
                        allowed.insert(p, v);
                    }
                }
                Column::SlotPoints(p, s) => {
                    if let Some(v) = parse_cell(cell) {
                        team.slot_points.entry(p).or_default().insert(s, v);
                    }
                }
                Column::Unknown => {}
            }
        }

        if team.name.is_empty() || team.name == AVERAGE_ROW || team.name == STD_ROW {
            continue;
        }

        for (period, points_for) in scored {
            if let Some(&points_against) = allowed.get(&period) {
                let opponent = opponents.get(&period).map_or("", String::as_str);
                team.record_game(period, opponent, points_for, points_against);
            }
        }
        team.standings = standings;
        table.insert_team(team);
    }

    info!("loaded {} teams", table.teams().len());
    Ok(table)
}
