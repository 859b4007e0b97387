//! Replacement value bookkeeping for a live draft.
//!
//! The board keeps every projected player sorted by (owner, position,
//! points descending). A player's replacement value is the gap to the next
//! player in that ordering when both share owner and position, so for free
//! agents it is the points given up by letting this player go and settling
//! for the next-best one. After each pick the board is re-sorted and the gaps
//! recomputed.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use super::DraftPlayer;
use crate::cli::types::{Owner, Position};

/// Leaderboard depth used when none is given.
pub const DEFAULT_TOP_N: usize = 25;

/// Which players a leaderboard query considers.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerFilter<'a> {
    pub position: Option<Position>,
    pub free_agent: Option<bool>,
    pub owner: Option<&'a Owner>,
}

impl<'a> PlayerFilter<'a> {
    pub fn available(position: Position) -> Self {
        Self {
            position: Some(position),
            free_agent: Some(true),
            owner: None,
        }
    }

    pub fn drafted(position: Position) -> Self {
        Self {
            position: Some(position),
            free_agent: Some(false),
            owner: None,
        }
    }

    pub fn on_team(owner: &'a Owner) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    fn accepts(&self, player: &DraftPlayer) -> bool {
        self.position.map_or(true, |p| player.position == p)
            && self
                .free_agent
                .map_or(true, |fa| player.owner.is_free_agent() == fa)
            && self.owner.map_or(true, |o| &player.owner == o)
    }
}

/// A leaderboard line with the running total of replacement values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplacementEntry {
    pub rank: u32,
    pub name: String,
    pub team: String,
    pub position: Position,
    pub points: f64,
    pub replacement_value: f64,
    /// Running sum of replacement values from the top of the list. Best
    /// available includes this player (points lost once they are taken);
    /// state of position stops just above them (points already lost by the
    /// time they are the best left).
    pub cumulative: f64,
}

/// Whether a running sum counts the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunningSum {
    Inclusive,
    Exclusive,
}

fn with_cumulative(players: &[&DraftPlayer], sum: RunningSum) -> Vec<ReplacementEntry> {
    let mut running = 0.0;
    players
        .iter()
        .map(|p| {
            let before = running;
            running += p.replacement_value;
            ReplacementEntry {
                rank: p.rank,
                name: p.full_name(),
                team: p.team.clone(),
                position: p.position,
                points: p.points,
                replacement_value: p.replacement_value,
                cumulative: match sum {
                    RunningSum::Inclusive => running,
                    RunningSum::Exclusive => before,
                },
            }
        })
        .collect()
}

fn by_points_desc(a: &DraftPlayer, b: &DraftPlayer) -> Ordering {
    b.points.total_cmp(&a.points)
}

#[derive(Debug, Clone, Default)]
pub struct DraftBoard {
    players: Vec<DraftPlayer>,
}

impl DraftBoard {
    pub fn new(players: Vec<DraftPlayer>) -> Self {
        let mut board = Self { players };
        board.update_replacement_values();
        board
    }

    pub fn players(&self) -> &[DraftPlayer] {
        &self.players
    }

    pub fn into_players(self) -> Vec<DraftPlayer> {
        self.players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Order by owner, then position, then projected points descending.
    pub fn sort(&mut self) {
        self.players.sort_by(|a, b| {
            a.owner
                .cmp(&b.owner)
                .then(a.position.cmp(&b.position))
                .then_with(|| by_points_desc(a, b))
        });
    }

    /// Re-sort and recompute each player's gap to the next player with the
    /// same owner and position. The last player of each group gets 0.
    pub fn update_replacement_values(&mut self) {
        self.sort();

        let next_points: Vec<Option<f64>> = self
            .players
            .windows(2)
            .map(|pair| {
                let (now, next) = (&pair[0], &pair[1]);
                (now.owner == next.owner && now.position == next.position).then_some(next.points)
            })
            .chain(std::iter::once(None))
            .collect();

        for (player, next) in self.players.iter_mut().zip(next_points) {
            player.replacement_value = next.map_or(0.0, |pts| pts - player.points);
        }
    }

    /// Positions present anywhere on the board.
    pub fn positions(&self) -> BTreeSet<Position> {
        self.players.iter().map(|p| p.position).collect()
    }

    /// Fantasy teams that have drafted at least one player.
    pub fn drafting_teams(&self) -> BTreeSet<Owner> {
        self.players
            .iter()
            .filter(|p| !p.owner.is_free_agent())
            .map(|p| p.owner.clone())
            .collect()
    }

    /// The best `n` players (all when `None`) passing `filter`, by points.
    pub fn top_n(&self, n: Option<usize>, filter: PlayerFilter<'_>) -> Vec<&DraftPlayer> {
        let mut matching: Vec<&DraftPlayer> =
            self.players.iter().filter(|p| filter.accepts(p)).collect();
        matching.sort_by(|a, b| by_points_desc(a, b));
        matching.truncate(n.unwrap_or(usize::MAX));
        matching
    }

    /// For every position on the board, the best `n` free agents with
    /// cumulative replacement values. Positions with nobody left are omitted.
    pub fn best_replacement_available(&self, n: usize) -> BTreeMap<Position, Vec<ReplacementEntry>> {
        info!("calculating the top {} available at each position", n);
        self.positions()
            .into_iter()
            .filter_map(|pos| {
                let top = self.top_n(Some(n), PlayerFilter::available(pos));
                (!top.is_empty()).then(|| (pos, with_cumulative(&top, RunningSum::Inclusive)))
            })
            .collect()
    }

    /// The best `n` free agents at one position. The first entry's running
    /// sum is 0: nothing is lost while the best player is still there.
    pub fn state_of_position(&self, position: Position, n: usize) -> Vec<ReplacementEntry> {
        info!("calculating the top {} available {}s", n, position);
        with_cumulative(
            &self.top_n(Some(n), PlayerFilter::available(position)),
            RunningSum::Exclusive,
        )
    }

    /// Players whose names start with the given prefixes, by rank. Drafted
    /// players are included only when `include_drafted` is set.
    pub fn find_by_initials(
        &self,
        first: &str,
        last: &str,
        include_drafted: bool,
    ) -> Vec<&DraftPlayer> {
        let mut matches: Vec<&DraftPlayer> = self
            .players
            .iter()
            .filter(|p| p.matches_initials(first, last))
            .filter(|p| include_drafted || p.owner.is_free_agent())
            .collect();
        matches.sort_by_key(|p| p.rank);
        matches
    }

    /// Players with exactly this first and last name.
    pub fn find_by_name(&self, first: &str, last: &str) -> Vec<&DraftPlayer> {
        self.players
            .iter()
            .filter(|p| p.matches_name(first, last))
            .collect()
    }

    pub fn by_rank(&self, rank: u32) -> Option<&DraftPlayer> {
        self.players.iter().find(|p| p.rank == rank)
    }

    /// Hand every row of the player ranked `rank` to `owner` and refresh
    /// replacement values. Returns how many rows changed hands; passing
    /// [`Owner::FreeAgent`] undoes a pick.
    pub fn record_pick(&mut self, rank: u32, owner: &Owner) -> usize {
        let mut updated = 0;
        for player in self.players.iter_mut().filter(|p| p.rank == rank) {
            player.owner = owner.clone();
            updated += 1;
        }

        if let Some(p) = self.by_rank(rank) {
            info!("{} has been drafted by {}", p.full_name(), owner);
        }

        self.update_replacement_values();
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::player::fixtures::player;

    fn board() -> DraftBoard {
        DraftBoard::new(vec![
            player(1, "Peyton Manning", Position::QB, "FA", 320.0),
            player(2, "Drew Brees", Position::QB, "FA", 300.0),
            player(5, "Aaron Rodgers", Position::QB, "HPZ", 310.0),
            player(3, "Jamaal Charles", Position::RB, "FA", 260.0),
            player(4, "LeSean McCoy", Position::RB, "FA", 250.0),
            player(6, "Matt Forte", Position::RB, "FA", 210.0),
            player(7, "Andrew Luck", Position::QB, "FA", 290.0),
            player(8, "Darren Sproles", Position::RB, "FA", 150.0),
            player(8, "Darren Sproles", Position::WR, "FA", 150.0),
        ])
    }

    #[test]
    fn test_sort_groups_owner_then_position() {
        let board = board();
        let order: Vec<(String, Position, f64)> = board
            .players()
            .iter()
            .map(|p| (p.owner.to_string(), p.position, p.points))
            .collect();

        assert_eq!(order[0], ("FA".to_string(), Position::QB, 320.0));
        assert_eq!(order[2], ("FA".to_string(), Position::QB, 290.0));
        assert_eq!(order[3], ("FA".to_string(), Position::RB, 260.0));
        assert_eq!(order[7], ("FA".to_string(), Position::WR, 150.0));
        assert_eq!(order[8], ("HPZ".to_string(), Position::QB, 310.0));
    }

    #[test]
    fn test_replacement_values_stop_at_group_boundaries() {
        let board = board();
        let value = |name: &str, pos: Position| {
            board
                .players()
                .iter()
                .find(|p| p.full_name() == name && p.position == pos)
                .unwrap()
                .replacement_value
        };

        assert_eq!(value("Peyton Manning", Position::QB), -20.0);
        assert_eq!(value("Drew Brees", Position::QB), -10.0);
        // Last free agent QB: next row is a RB
        assert_eq!(value("Andrew Luck", Position::QB), 0.0);
        assert_eq!(value("Jamaal Charles", Position::RB), -10.0);
        assert_eq!(value("Matt Forte", Position::RB), -60.0);
        // Lone WR row is followed by the HPZ QB
        assert_eq!(value("Darren Sproles", Position::WR), 0.0);
        assert_eq!(value("Aaron Rodgers", Position::QB), 0.0);
    }

    #[test]
    fn test_top_n_filters() {
        let board = board();

        let qbs = board.top_n(None, PlayerFilter::available(Position::QB));
        let names: Vec<String> = qbs.iter().map(|p| p.full_name()).collect();
        assert_eq!(names, vec!["Peyton Manning", "Drew Brees", "Andrew Luck"]);

        let two = board.top_n(Some(2), PlayerFilter::default());
        assert_eq!(two[0].points, 320.0);
        assert_eq!(two[1].points, 310.0);

        let hpz = Owner::team("HPZ");
        let on_team = board.top_n(None, PlayerFilter::on_team(&hpz));
        assert_eq!(on_team.len(), 1);
        assert_eq!(on_team[0].last, "Rodgers");

        let gone = board.top_n(None, PlayerFilter::drafted(Position::QB));
        assert_eq!(gone.len(), 1);
    }

    #[test]
    fn test_best_replacement_available_cumulative() {
        let board = board();
        let best = board.best_replacement_available(DEFAULT_TOP_N);

        let qbs = &best[&Position::QB];
        assert_eq!(qbs.len(), 3);
        assert_eq!(qbs[0].name, "Peyton Manning");
        let cumulative: Vec<f64> = qbs.iter().map(|e| e.cumulative).collect();
        assert_eq!(cumulative, vec![-20.0, -30.0, -30.0]);

        let rbs = &best[&Position::RB];
        assert_eq!(rbs.len(), 4);
        assert_eq!(rbs[3].cumulative, -110.0);

        assert_eq!(best[&Position::WR].len(), 1);
    }

    #[test]
    fn test_best_replacement_available_respects_depth() {
        let board = board();
        let best = board.best_replacement_available(2);
        assert!(best.values().all(|entries| entries.len() <= 2));
    }

    #[test]
    fn test_record_pick_moves_all_rows_and_recomputes() {
        let mut board = board();

        let moved = board.record_pick(8, &Owner::team("JNZ"));
        assert_eq!(moved, 2);
        assert!(board
            .players()
            .iter()
            .filter(|p| p.rank == 8)
            .all(|p| p.owner == Owner::team("JNZ")));

        board.record_pick(1, &Owner::team("HPZ"));
        let qbs = board.state_of_position(Position::QB, 10);
        assert_eq!(qbs[0].name, "Drew Brees");
        assert_eq!(qbs[0].replacement_value, -10.0);
        assert_eq!(qbs[0].cumulative, 0.0);
        assert_eq!(qbs[1].cumulative, -10.0);

        // HPZ now has two QBs, Manning above Rodgers
        let manning = board.by_rank(1).unwrap();
        assert_eq!(manning.replacement_value, -10.0);

        assert_eq!(
            board.drafting_teams().into_iter().collect::<Vec<_>>(),
            vec![Owner::team("HPZ"), Owner::team("JNZ")]
        );
    }

    #[test]
    fn test_undo_pick_returns_player_to_pool() {
        let mut board = board();
        board.record_pick(1, &Owner::team("HPZ"));
        board.record_pick(1, &Owner::FreeAgent);

        let qbs = board.state_of_position(Position::QB, 10);
        assert_eq!(qbs[0].name, "Peyton Manning");
        assert_eq!(qbs.len(), 3);
        let cumulative: Vec<f64> = qbs.iter().map(|e| e.cumulative).collect();
        assert_eq!(cumulative, vec![0.0, -20.0, -30.0]);
    }

    #[test]
    fn test_state_of_position_counts_players_above() {
        let board = board();
        let qbs = board.state_of_position(Position::QB, DEFAULT_TOP_N);
        let cumulative: Vec<f64> = qbs.iter().map(|e| e.cumulative).collect();
        assert_eq!(cumulative, vec![0.0, -20.0, -30.0]);

        // Best available keeps the running sum through each player
        let best = board.best_replacement_available(DEFAULT_TOP_N);
        assert_eq!(best[&Position::QB][0].cumulative, -20.0);
    }

    #[test]
    fn test_pick_by_free_agent_label_stays_in_pool() {
        let mut board = board();
        board.record_pick(2, &Owner::team("FA"));

        assert!(board.by_rank(2).unwrap().owner.is_free_agent());
        let qbs = board.state_of_position(Position::QB, DEFAULT_TOP_N);
        assert_eq!(qbs.len(), 3);
        assert_eq!(board.by_rank(1).unwrap().replacement_value, -20.0);
        assert!(board.drafting_teams().iter().all(|o| o.label() != "FA"));
    }

    #[test]
    fn test_find_players() {
        let mut board = board();
        let matches = board.find_by_initials("d", "", false);
        let ranks: Vec<u32> = matches.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![2, 8, 8]);

        board.record_pick(2, &Owner::team("HPZ"));
        assert_eq!(board.find_by_initials("d", "b", false).len(), 0);
        assert_eq!(board.find_by_initials("d", "b", true).len(), 1);

        assert_eq!(board.find_by_name("Darren", "Sproles").len(), 2);
        assert!(board.find_by_name("Darren", "Sproles Jr.").is_empty());
    }

    #[test]
    fn test_empty_board() {
        let board = DraftBoard::new(Vec::new());
        assert!(board.is_empty());
        assert!(board.best_replacement_available(DEFAULT_TOP_N).is_empty());
        assert!(board.state_of_position(Position::K, 5).is_empty());
    }
}
