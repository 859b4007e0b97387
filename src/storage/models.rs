//! Row types for the flat files

use crate::cli::types::{Owner, TeamId};
use serde::{Deserialize, Serialize};

/// A fantasy team in the league.
///
/// Draft simulation files only carry `team_id, team_name`, so `abbrev` and
/// `owner` may be blank there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueTeam {
    pub team_id: TeamId,
    #[serde(default)]
    pub abbrev: String,
    #[serde(alias = "team_name")]
    pub name: String,
    #[serde(default)]
    pub owner: String,
}

impl LeagueTeam {
    pub fn new(team_id: u32, abbrev: &str, name: &str, owner: &str) -> Self {
        Self {
            team_id: TeamId::new(team_id),
            abbrev: abbrev.to_string(),
            name: name.to_string(),
            owner: owner.to_string(),
        }
    }

    /// Short label used as the owner of drafted players.
    pub fn label(&self) -> &str {
        if self.abbrev.is_empty() {
            &self.name
        } else {
            &self.abbrev
        }
    }

    pub fn as_owner(&self) -> Owner {
        Owner::team(self.label())
    }

    /// Matches either the abbreviation or the full team name.
    pub fn is_called(&self, team: &str) -> bool {
        let team = team.trim();
        (!self.abbrev.is_empty() && self.abbrev == team) || self.name == team
    }

    /// `2	HPZ , Heavy Petting Zoo      , Zach Lamberty  `
    pub fn listing(&self) -> String {
        format!(
            "{}\t{:<4}, {:<23}, {:<15}",
            self.team_id, self.abbrev, self.name, self.owner
        )
    }
}

/// One line of a recorded draft: `Jamaal Charles RB, Heavy Petting Zoo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    pub playerpos: String,
    pub team: String,
}

impl DraftPick {
    /// First and last name, with the trailing position token dropped.
    pub fn player_name(&self) -> (String, String) {
        let tokens: Vec<&str> = self.playerpos.split_whitespace().collect();
        let name = match tokens.split_last() {
            Some((_, name)) if !name.is_empty() => name,
            _ => &tokens[..],
        };
        let first = name.first().copied().unwrap_or_default().to_string();
        let last = name.iter().skip(1).copied().collect::<Vec<_>>().join(" ");
        (first, last)
    }
}
