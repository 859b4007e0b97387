//! The projections file read and written by the draft tools.
//!
//! Columns are `RNK, FIRST, LAST, TEAM, POS, F TEAM, PTS` followed by any
//! further stat columns in the order they were scraped. Older files list the
//! player as `Player` (`First Last`) and `Team Pos` (`Den QB`) instead.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{
    cli::types::{Owner, Position},
    draft::DraftPlayer,
    espn::projections::split_name,
    FflError, Result,
};

pub const RANK: &str = "RNK";
pub const FIRST: &str = "FIRST";
pub const LAST: &str = "LAST";
pub const TEAM: &str = "TEAM";
pub const POS: &str = "POS";
pub const OWNER: &str = "F TEAM";
pub const POINTS: &str = "PTS";

const LEGACY_PLAYER: &str = "Player";
const LEGACY_TEAM_POS: &str = "Team Pos";

const FIXED_COLUMNS: [&str; 7] = [RANK, FIRST, LAST, TEAM, POS, OWNER, POINTS];

/// `ffl_data_20140901.csv`
pub fn projections_file_name(date: NaiveDate) -> String {
    date.format("ffl_data_%Y%m%d.csv").to_string()
}

/// Today's projections file inside `dir`.
pub fn default_projections_path(dir: &Path) -> PathBuf {
    dir.join(projections_file_name(chrono::Local::now().date_naive()))
}

/// Stat column names across all players, first-seen order.
fn stat_columns(players: &[DraftPlayer]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for (header, _) in players.iter().flat_map(|p| &p.stats) {
        if !columns.contains(header) && !FIXED_COLUMNS.contains(&header.as_str()) {
            columns.push(header.clone());
        }
    }
    columns
}

pub fn write_projections(path: &Path, players: &[DraftPlayer]) -> Result<()> {
    info!("writing {} players to {}", players.len(), path.display());

    let extra = stat_columns(players);
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = FIXED_COLUMNS.to_vec();
    header.extend(extra.iter().map(String::as_str));
    writer.write_record(&header)?;

    for p in players {
        let mut record = vec![
            p.rank.to_string(),
            p.first.clone(),
            p.last.clone(),
            p.team.clone(),
            p.position.to_string(),
            p.owner.to_string(),
            p.points.to_string(),
        ];
        record.extend(extra.iter().map(|col| {
            p.stats
                .iter()
                .find(|(h, _)| h == col)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        }));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Trimmed cell with the site's `--` placeholder read as zero.
fn clean_cell(raw: &str) -> String {
    raw.trim().replace("--", "0")
}

struct Columns {
    headers: Vec<String>,
    file: String,
}

impl Columns {
    fn index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    fn require(&self, column: &str) -> Result<usize> {
        self.index(column).ok_or_else(|| FflError::MissingColumn {
            column: column.to_string(),
            file: self.file.clone(),
        })
    }
}

/// Load a projections file in either the current or the legacy layout.
pub fn read_projections(path: &Path) -> Result<Vec<DraftPlayer>> {
    info!("loading projections from {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let columns = Columns {
        headers: reader.headers()?.iter().map(str::to_string).collect(),
        file: path.display().to_string(),
    };
    let legacy = columns.index(LEGACY_PLAYER).is_some();
    debug!("projections file columns: {:?} (legacy: {})", columns.headers, legacy);

    let rank_idx = columns.require(RANK)?;
    let owner_idx = columns.require(OWNER)?;
    let points_idx = columns.require(POINTS)?;
    let (name_idx, team_idx) = if legacy {
        (
            (columns.require(LEGACY_PLAYER)?, None),
            (columns.require(LEGACY_TEAM_POS)?, None),
        )
    } else {
        (
            (columns.require(FIRST)?, Some(columns.require(LAST)?)),
            (columns.require(TEAM)?, Some(columns.require(POS)?)),
        )
    };

    let consumed: Vec<usize> = [rank_idx, owner_idx, points_idx, name_idx.0, team_idx.0]
        .into_iter()
        .chain(name_idx.1)
        .chain(team_idx.1)
        .collect();

    let mut players = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let cell = |idx: usize| clean_cell(record.get(idx).unwrap_or_default());

        let (first, last) = match name_idx.1 {
            Some(last_idx) => (cell(name_idx.0), cell(last_idx)),
            None => split_name(&cell(name_idx.0)),
        };
        let (team, position) = match team_idx.1 {
            Some(pos_idx) => (cell(team_idx.0), cell(pos_idx)),
            None => {
                let team_pos = cell(team_idx.0);
                match team_pos.split_once(' ') {
                    Some((t, p)) => (t.to_string(), p.trim().to_string()),
                    None => {
                        warn!("line {}: no position in '{}', skipping", line + 2, team_pos);
                        continue;
                    }
                }
            }
        };

        let position = match position.parse::<Position>() {
            Ok(p) => p,
            Err(e) => {
                warn!("line {}: {}, skipping", line + 2, e);
                continue;
            }
        };

        let stats = columns
            .headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !consumed.contains(i))
            .map(|(i, h)| (h.clone(), cell(i)))
            .collect();

        players.push(DraftPlayer {
            rank: cell(rank_idx).parse()?,
            first,
            last,
            team,
            position,
            owner: cell(owner_idx).parse::<Owner>().unwrap_or_default(),
            points: cell(points_idx).parse()?,
            replacement_value: 0.0,
            stats,
        });
    }

    info!("loaded {} projection rows", players.len());
    Ok(players)
}
