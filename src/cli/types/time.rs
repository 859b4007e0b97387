//! Season and scoring period types.

use crate::error::{FflError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regular season weeks tracked in the league file.
pub const REGULAR_SEASON_WEEKS: u8 = 14;

/// Playoff rounds tracked in the league file.
pub const PLAYOFF_ROUNDS: u8 = 3;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2014)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A scoring period as labelled on the league schedule page.
///
/// Regular season weeks come before playoff rounds when ordered, so a sorted
/// set of periods reads in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    Week(u8),
    Playoff(u8),
}

impl Period {
    pub fn is_playoff(&self) -> bool {
        matches!(self, Period::Playoff(_))
    }

    /// ESPN scoring period id: playoff rounds follow the last regular week.
    pub fn scoring_period_id(&self, regular_weeks: u8) -> u8 {
        match *self {
            Period::Week(n) => n,
            Period::Playoff(n) => regular_weeks + n,
        }
    }

    /// All periods of a season in calendar order.
    pub fn season(weeks: u8, rounds: u8) -> Vec<Period> {
        (1..=weeks)
            .map(Period::Week)
            .chain((1..=rounds).map(Period::Playoff))
            .collect()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Week(n) => write!(f, "WEEK {}", n),
            Period::Playoff(n) => write!(f, "ROUND {} - PLAYOFFS", n),
        }
    }
}

impl FromStr for Period {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim().to_uppercase();
        let invalid = || FflError::InvalidPeriod {
            label: s.trim().to_string(),
        };

        if let Some(n) = label.strip_prefix("WEEK ") {
            return n.trim().parse().map(Period::Week).map_err(|_| invalid());
        }
        if let Some(rest) = label.strip_prefix("ROUND ") {
            let n = rest.split_whitespace().next().ok_or_else(invalid)?;
            if !rest.contains("PLAYOFF") {
                return Err(invalid());
            }
            return n.parse().map(Period::Playoff).map_err(|_| invalid());
        }
        Err(invalid())
    }
}
