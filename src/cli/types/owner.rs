//! Draft ownership of a player.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Label used in the projections file for undrafted players.
pub const FREE_AGENT: &str = "FA";

/// Who currently holds a player: nobody, or a fantasy team abbreviation.
///
/// Owners order by their label, so free agents sort between team
/// abbreviations exactly as the `F TEAM` column would sort as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Owner {
    #[default]
    FreeAgent,
    Team(String),
}

impl Owner {
    /// A team owner; a blank or `FA` abbreviation means the free agent pool.
    pub fn team(abbrev: impl Into<String>) -> Self {
        let abbrev = abbrev.into();
        let trimmed = abbrev.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(FREE_AGENT) {
            Owner::FreeAgent
        } else {
            Owner::Team(trimmed.to_string())
        }
    }

    pub fn is_free_agent(&self) -> bool {
        matches!(self, Owner::FreeAgent)
    }

    pub fn label(&self) -> &str {
        match self {
            Owner::FreeAgent => FREE_AGENT,
            Owner::Team(abbrev) => abbrev,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Owner {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Owner::team(s))
    }
}

impl Serialize for Owner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl Ord for Owner {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label()
            .cmp(other.label())
            .then_with(|| self.is_free_agent().cmp(&other.is_free_agent()).reverse())
    }
}

impl PartialOrd for Owner {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
