//! Season results per fantasy team, the in-memory form of the league file.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    cli::types::{Period, Slot, TeamId, LEAGUE_SLOTS, PLAYOFF_ROUNDS, REGULAR_SEASON_WEEKS},
    core::stats::mean,
    espn::types::Matchup,
    storage::LeagueTeam,
    FflError, Result,
};

/// One side of a finished matchup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    pub opponent: String,
    pub points_for: f64,
    pub points_against: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Standings {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
}

impl Standings {
    /// Wins over decided games; 0 before any decision.
    pub fn win_percentage(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(decided)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSeason {
    pub name: String,
    pub abbrev: String,
    pub team_id: Option<TeamId>,
    pub owner: String,
    pub standings: Standings,
    pub games: BTreeMap<Period, GameResult>,
    pub slot_points: BTreeMap<Period, BTreeMap<Slot, f64>>,
}

impl TeamSeason {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_team(team: &LeagueTeam) -> Self {
        Self {
            name: team.name.clone(),
            abbrev: team.abbrev.clone(),
            team_id: Some(team.team_id),
            owner: team.owner.clone(),
            ..Self::default()
        }
    }

    pub fn record_game(&mut self, period: Period, opponent: &str, points_for: f64, points_against: f64) {
        self.games.insert(
            period,
            GameResult {
                opponent: opponent.to_string(),
                points_for,
                points_against,
            },
        );
    }

    /// Rebuild the record and point totals from regular season games.
    pub fn recompute_standings(&mut self) {
        let mut standings = Standings::default();
        for game in self
            .games
            .iter()
            .filter(|(period, _)| !period.is_playoff())
            .map(|(_, game)| game)
        {
            match game.points_for.total_cmp(&game.points_against) {
                std::cmp::Ordering::Greater => standings.wins += 1,
                std::cmp::Ordering::Less => standings.losses += 1,
                std::cmp::Ordering::Equal => standings.ties += 1,
            }
            standings.points_for += game.points_for;
            standings.points_against += game.points_against;
        }
        self.standings = standings;
    }

    pub fn opponents(&self) -> Vec<&str> {
        self.games.values().map(|g| g.opponent.as_str()).collect()
    }

    pub fn points_for(&self, period: Period) -> Option<f64> {
        self.games.get(&period).map(|g| g.points_for)
    }

    pub fn points_against(&self, period: Period) -> Option<f64> {
        self.games.get(&period).map(|g| g.points_against)
    }

    pub fn slot_points(&self, period: Period, slot: Slot) -> Option<f64> {
        self.slot_points.get(&period)?.get(&slot).copied()
    }

    /// Share of the period's points scored from one slot.
    pub fn fractional_slot_points(&self, period: Period, slot: Slot) -> Option<f64> {
        let total = self.points_for(period)?;
        let slot = self.slot_points(period, slot)?;
        (total != 0.0).then(|| slot / total)
    }

    pub fn points_for_by_period(&self) -> Vec<f64> {
        self.games.values().map(|g| g.points_for).collect()
    }

    pub fn points_against_by_period(&self) -> Vec<f64> {
        self.games.values().map(|g| g.points_against).collect()
    }

    pub fn slot_points_by_period(&self, slot: Slot) -> Vec<f64> {
        self.slot_points
            .keys()
            .filter_map(|&p| self.slot_points(p, slot))
            .collect()
    }

    pub fn fractional_slot_points_by_period(&self, slot: Slot) -> Vec<f64> {
        self.slot_points
            .keys()
            .filter_map(|&p| self.fractional_slot_points(p, slot))
            .collect()
    }

    /// Season points per slot, for the treemap.
    pub fn slot_totals(&self) -> BTreeMap<Slot, f64> {
        let mut totals = BTreeMap::new();
        for (&slot, &pts) in self.slot_points.values().flatten() {
            *totals.entry(slot).or_insert(0.0) += pts;
        }
        totals
    }
}

/// Every team's season in the league file layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueTable {
    periods: Vec<Period>,
    slots: Vec<Slot>,
    teams: Vec<TeamSeason>,
}

impl Default for LeagueTable {
    fn default() -> Self {
        Self::new(
            Period::season(REGULAR_SEASON_WEEKS, PLAYOFF_ROUNDS),
            LEAGUE_SLOTS.to_vec(),
        )
    }
}

impl LeagueTable {
    pub fn new(periods: Vec<Period>, slots: Vec<Slot>) -> Self {
        Self {
            periods,
            slots,
            teams: Vec::new(),
        }
    }

    /// Seed the table with the known teams and apply every final score.
    /// Teams that only appear on the schedule are added by name.
    pub fn from_matchups(teams: &[LeagueTeam], matchups: &[Matchup]) -> Self {
        let mut table = Self::default();
        table.add_results(teams, matchups);
        table
    }

    /// Add `teams`, record every final score, and refresh the standings.
    pub fn add_results(&mut self, teams: &[LeagueTeam], matchups: &[Matchup]) {
        for team in teams {
            self.insert_team(TeamSeason::from_team(team));
        }

        for m in matchups {
            let Some((home_pts, away_pts)) = m.final_score() else {
                debug!("{} {} vs {} not final, skipping", m.period, m.away, m.home);
                continue;
            };
            self.team_entry(&m.home)
                .record_game(m.period, &m.away, home_pts, away_pts);
            self.team_entry(&m.away)
                .record_game(m.period, &m.home, away_pts, home_pts);
        }

        self.recompute_standings();
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn teams(&self) -> &[TeamSeason] {
        &self.teams
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn team_names(&self) -> Vec<&str> {
        self.teams.iter().map(|t| t.name.as_str()).collect()
    }

    /// Add or replace a team, keeping the table sorted by name.
    pub fn insert_team(&mut self, team: TeamSeason) {
        match self.teams.binary_search_by(|t| t.name.cmp(&team.name)) {
            Ok(idx) => self.teams[idx] = team,
            Err(idx) => self.teams.insert(idx, team),
        }
    }

    fn team_entry(&mut self, name: &str) -> &mut TeamSeason {
        let idx = match self.teams.binary_search_by(|t| t.name.as_str().cmp(name)) {
            Ok(idx) => idx,
            Err(idx) => {
                debug!("adding schedule-only team {}", name);
                self.teams.insert(idx, TeamSeason::new(name));
                idx
            }
        };
        &mut self.teams[idx]
    }

    pub fn team(&self, name: &str) -> Option<&TeamSeason> {
        self.teams.iter().find(|t| t.name == name)
    }

    fn require(&self, name: &str) -> Result<&TeamSeason> {
        self.team(name).ok_or_else(|| FflError::InvalidTeam {
            team: name.to_string(),
        })
    }

    pub fn team_by_id(&self, id: TeamId) -> Option<&TeamSeason> {
        self.teams.iter().find(|t| t.team_id == Some(id))
    }

    pub fn recompute_standings(&mut self) {
        self.teams.iter_mut().for_each(TeamSeason::recompute_standings);
    }

    /// Store one team's starting lineup points for a period.
    pub fn set_slot_points(&mut self, team: &str, period: Period, points: BTreeMap<Slot, f64>) -> Result<()> {
        let season = self
            .teams
            .iter_mut()
            .find(|t| t.name == team)
            .ok_or_else(|| FflError::InvalidTeam {
                team: team.to_string(),
            })?;
        season.slot_points.insert(period, points);
        Ok(())
    }

    /// League mean of a per-team value, only when every team has one.
    pub fn column_mean(&self, value: impl Fn(&TeamSeason) -> Option<f64>) -> Option<f64> {
        let values = self.teams.iter().map(value).collect::<Option<Vec<f64>>>()?;
        mean(&values)
    }

    pub fn diff_points_for_total(&self, name: &str) -> Result<f64> {
        let team = self.require(name)?;
        let av = self.column_mean(|t| Some(t.standings.points_for)).unwrap_or(0.0);
        Ok(team.standings.points_for - av)
    }

    pub fn diff_points_against_total(&self, name: &str) -> Result<f64> {
        let team = self.require(name)?;
        let av = self
            .column_mean(|t| Some(t.standings.points_against))
            .unwrap_or(0.0);
        Ok(team.standings.points_against - av)
    }

    /// Per period differences from the league mean, over periods where both
    /// the team and every other team have a value.
    fn diff_by_period(&self, name: &str, value: impl Fn(&TeamSeason, Period) -> Option<f64>) -> Result<Vec<f64>> {
        let team = self.require(name)?;
        Ok(self
            .periods
            .iter()
            .filter_map(|&p| {
                let own = value(team, p)?;
                let av = self.column_mean(|t| value(t, p))?;
                Some(own - av)
            })
            .collect())
    }

    pub fn diff_points_for_by_period(&self, name: &str) -> Result<Vec<f64>> {
        self.diff_by_period(name, TeamSeason::points_for)
    }

    pub fn diff_points_against_by_period(&self, name: &str) -> Result<Vec<f64>> {
        self.diff_by_period(name, TeamSeason::points_against)
    }

    pub fn diff_slot_points_by_period(&self, name: &str, slot: Slot) -> Result<Vec<f64>> {
        self.diff_by_period(name, |t, p| t.slot_points(p, slot))
    }

    pub fn diff_fractional_slot_points_by_period(&self, name: &str, slot: Slot) -> Result<Vec<f64>> {
        self.diff_by_period(name, |t, p| t.fractional_slot_points(p, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::Position;
    use crate::espn::types::ScoreOutcome;

    fn matchup(period: Period, away: &str, home: &str, away_pts: f64, home_pts: f64) -> Matchup {
        Matchup {
            period,
            home: home.to_string(),
            away: away.to_string(),
            outcome: ScoreOutcome::Final {
                away: away_pts,
                home: home_pts,
            },
        }
    }

    fn table() -> LeagueTable {
        let teams = vec![
            LeagueTeam::new(1, "CL", "Captain's Log", "Dylan Thomson"),
            LeagueTeam::new(2, "HPZ", "Heavy Petting Zoo", "Zach Lamberty"),
        ];
        let matchups = vec![
            matchup(Period::Week(1), "Captain's Log", "Heavy Petting Zoo", 100.0, 120.0),
            matchup(Period::Week(2), "Heavy Petting Zoo", "Captain's Log", 90.0, 90.0),
            matchup(Period::Week(3), "Captain's Log", "Heavy Petting Zoo", 110.0, 80.0),
            matchup(Period::Playoff(1), "Captain's Log", "Heavy Petting Zoo", 70.0, 130.0),
            Matchup {
                period: Period::Week(4),
                home: "Heavy Petting Zoo".to_string(),
                away: "Captain's Log".to_string(),
                outcome: ScoreOutcome::InProgress,
            },
        ];
        LeagueTable::from_matchups(&teams, &matchups)
    }

    #[test]
    fn test_standings_from_regular_season() {
        let table = table();
        let hpz = table.team("Heavy Petting Zoo").unwrap();
        assert_eq!(hpz.abbrev, "HPZ");
        assert_eq!(hpz.team_id, Some(TeamId::new(2)));
        assert_eq!(hpz.standings.wins, 1);
        assert_eq!(hpz.standings.losses, 1);
        assert_eq!(hpz.standings.ties, 1);
        // Playoff points are not part of PF
        assert_eq!(hpz.standings.points_for, 290.0);
        assert_eq!(hpz.standings.points_against, 300.0);
        assert_eq!(hpz.standings.win_percentage(), 0.5);

        assert_eq!(hpz.games.len(), 4);
        assert_eq!(hpz.opponents(), vec!["Captain's Log"; 4]);
        assert_eq!(hpz.points_for(Period::Playoff(1)), Some(130.0));
        assert_eq!(hpz.points_for(Period::Week(4)), None);
    }

    #[test]
    fn test_schedule_only_team_is_added() {
        let matchups = vec![matchup(Period::Week(1), "Snail Trails", "Just Noise", 50.0, 60.0)];
        let table = LeagueTable::from_matchups(&[], &matchups);
        assert_eq!(table.team_names(), vec!["Just Noise", "Snail Trails"]);
        assert_eq!(table.team("Snail Trails").unwrap().team_id, None);
    }

    #[test]
    fn test_slot_points_and_fractions() {
        let mut table = table();
        let slots = BTreeMap::from([
            (Slot::Single(Position::QB), 30.0),
            (Slot::Single(Position::RB), 60.0),
        ]);
        table
            .set_slot_points("Heavy Petting Zoo", Period::Week(1), slots)
            .unwrap();

        let hpz = table.team("Heavy Petting Zoo").unwrap();
        let qb = Slot::Single(Position::QB);
        assert_eq!(hpz.slot_points_by_period(qb), vec![30.0]);
        assert_eq!(hpz.fractional_slot_points_by_period(qb), vec![0.25]);
        assert_eq!(hpz.slot_totals().get(&Slot::Single(Position::RB)), Some(&60.0));

        let err = table
            .set_slot_points("Nobody", Period::Week(1), BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, FflError::InvalidTeam { .. }));
    }

    #[test]
    fn test_differences_from_average() {
        let table = table();
        assert_eq!(table.diff_points_for_total("Heavy Petting Zoo").unwrap(), -5.0);
        assert_eq!(table.diff_points_against_total("Heavy Petting Zoo").unwrap(), 5.0);

        let diffs = table.diff_points_for_by_period("Captain's Log").unwrap();
        assert_eq!(diffs, vec![-10.0, 0.0, 15.0, -30.0]);
        assert!(table.diff_points_for_by_period("Nobody").is_err());
    }
}
