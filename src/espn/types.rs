//! Rows and matchups as they come off the league website.

use crate::cli::types::Period;
use serde::Serialize;


/// One projections table row: header text paired with cell text, in
/// column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionRow {
    pub cells: Vec<(String, String)>,
}

impl ProjectionRow {
    pub fn new(headers: &[String], values: Vec<String>) -> Self {
        Self {
            cells: headers.iter().cloned().zip(values).collect(),
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a column, returning its value.
    pub fn take(&mut self, header: &str) -> Option<String> {
        let idx = self.cells.iter().position(|(h, _)| h == header)?;
        Some(self.cells.remove(idx).1)
    }
}

/// Result column of a schedule matchup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ScoreOutcome {
    Final { away: f64, home: f64 },
    /// Game under way; the page links to a live box score instead.
    InProgress,
}

/// A single schedule line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matchup {
    pub period: Period,
    pub home: String,
    pub away: String,
    pub outcome: ScoreOutcome,
}

impl Matchup {
    /// `(home points, away points)` when the game is final.
    pub fn final_score(&self) -> Option<(f64, f64)> {
        match self.outcome {
            ScoreOutcome::Final { away, home } => Some((home, away)),
            ScoreOutcome::InProgress => None,
        }
    }
}

/// NFL team abbreviation for a defense listed by mascot (`Bears D/ST`).
pub fn mascot_team(mascot: &str) -> Option<&'static str> {
    let team = match mascot {
        "49ers" => "SF",
        "Bears" => "Chi",
        "Bengals" => "Cin",
        "Bills" => "Buf",
        "Broncos" => "Den",
        "Browns" => "Cle",
        "Buccaneers" => "TB",
        "Cardinals" => "Ari",
        "Chargers" => "SD",
        "Chiefs" => "KC",
        "Colts" => "Ind",
        "Cowboys" => "Dal",
        "Dolphins" => "Mia",
        "Eagles" => "Phi",
        "Falcons" => "Atl",
        "Giants" => "NYG",
        "Jaguars" => "Jax",
        "Jets" => "NYJ",
        "Lions" => "Det",
        "Packers" => "GB",
        "Panthers" => "Car",
        "Patriots" => "NE",
        "Raiders" => "Oak",
        "Rams" => "StL",
        "Ravens" => "Bal",
        "Redskins" => "Was",
        "Saints" => "NO",
        "Seahawks" => "Sea",
        "Steelers" => "Pit",
        "Texans" => "Hou",
        "Titans" => "Ten",
        "Vikings" => "Min",
        _ => return None,
    };
    Some(team)
}
