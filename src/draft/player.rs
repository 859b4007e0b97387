//! A draftable player and its projection.

use serde::Serialize;

use crate::cli::types::{Owner, Position};

/// One row of the projections file.
///
/// A player eligible at two positions appears twice, once per position,
/// sharing the same `rank`. The rank therefore identifies the person and a
/// draft pick updates every row carrying it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftPlayer {
    pub rank: u32,
    pub first: String,
    pub last: String,
    /// NFL team abbreviation.
    pub team: String,
    pub position: Position,
    pub owner: Owner,
    /// Projected season points.
    pub points: f64,
    /// Points lost by falling back to the next player at this position.
    pub replacement_value: f64,
    /// Remaining projection columns in file order.
    #[serde(skip)]
    pub stats: Vec<(String, String)>,
}

impl DraftPlayer {
    pub fn full_name(&self) -> String {
        if self.last.is_empty() {
            self.first.clone()
        } else {
            format!("{} {}", self.first, self.last)
        }
    }

    /// Case-insensitive prefix match on first and last name.
    pub fn matches_initials(&self, first: &str, last: &str) -> bool {
        let first = first.trim().to_lowercase();
        let last = last.trim().to_lowercase();
        self.first.to_lowercase().starts_with(&first) && self.last.to_lowercase().starts_with(&last)
    }

    pub fn matches_name(&self, first: &str, last: &str) -> bool {
        self.first == first && self.last == last
    }

    /// `#    4: Jamaal Charles, KC RB`
    pub fn listing(&self) -> String {
        format!(
            "# {:>4}: {} {}, {} {}",
            self.rank, self.first, self.last, self.team, self.position
        )
    }
}
