//! Roster bucketing and league-relative standing of each drafting team.

use serde::Serialize;

use super::{DraftBoard, DraftPlayer};
use crate::{
    cli::types::{Owner, Slot},
    core::stats::mean,
};

/// A team's drafted roster spread across lineup slots.
#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub owner: Owner,
    /// Best player per slot, in slot order; `None` for an empty slot.
    pub starters: Vec<(String, Option<DraftPlayer>)>,
    /// Everyone else, best first.
    pub flex: Vec<DraftPlayer>,
}

impl TeamSummary {
    pub fn starter_points(&self) -> Vec<Option<f64>> {
        self.starters
            .iter()
            .map(|(_, p)| p.as_ref().map(|p| p.points))
            .collect()
    }

    /// Points of the filled starting slots; flex players do not count.
    pub fn total(&self) -> f64 {
        self.starter_points().into_iter().flatten().sum()
    }
}

fn take_best(pool: &mut Vec<DraftPlayer>, slot: Slot) -> Option<DraftPlayer> {
    let idx = pool
        .iter()
        .enumerate()
        .filter(|(_, p)| slot.accepts(p.position))
        .max_by(|(_, a), (_, b)| a.points.total_cmp(&b.points))
        .map(|(i, _)| i)?;
    Some(pool.remove(idx))
}

/// Bucket each team's drafted players: single-position slots take their best
/// player first, then combo slots take the best remaining eligible player,
/// and leftovers become flex entries sorted by points.
pub fn team_draft_summary(board: &DraftBoard, slots: &[Slot], teams: &[Owner]) -> Vec<TeamSummary> {
    let (combo, single): (Vec<Slot>, Vec<Slot>) = slots.iter().partition(|s| s.is_combo());

    teams
        .iter()
        .map(|owner| {
            let mut pool: Vec<DraftPlayer> = board
                .players()
                .iter()
                .filter(|p| &p.owner == owner)
                .cloned()
                .collect();

            let mut filled: Vec<(Slot, Option<DraftPlayer>)> = Vec::with_capacity(slots.len());
            for slot in single.iter().chain(combo.iter()) {
                filled.push((*slot, take_best(&mut pool, *slot)));
            }

            // Report in the caller's slot order
            let starters = slots
                .iter()
                .map(|slot| {
                    let idx = filled.iter().position(|(s, _)| s == slot);
                    let player = idx.and_then(|i| filled[i].1.take());
                    (slot.to_string(), player)
                })
                .collect();

            pool.sort_by(|a, b| b.points.total_cmp(&a.points));

            TeamSummary {
                owner: owner.clone(),
                starters,
                flex: pool,
            }
        })
        .collect()
}

/// One team's points relative to the league mean, slot by slot.
#[derive(Debug, Clone, Serialize)]
pub struct TeamStanding {
    pub owner: Owner,
    pub slot_deltas: Vec<f64>,
    pub flex_deltas: Vec<f64>,
    pub total: f64,
    pub total_delta: f64,
}

/// How every drafting team compares with the league at each slot.
#[derive(Debug, Clone, Serialize)]
pub struct DraftState {
    pub slots: Vec<String>,
    pub slot_means: Vec<f64>,
    pub flex_means: Vec<f64>,
    pub total_mean: f64,
    pub teams: Vec<TeamStanding>,
}

impl DraftState {
    /// Smallest and largest delta over starters and totals, for chart axes.
    pub fn delta_range(&self) -> (f64, f64) {
        self.teams
            .iter()
            .flat_map(|t| t.slot_deltas.iter().copied().chain(std::iter::once(t.total_delta)))
            .fold((0.0, 0.0), |(lo, hi), v| (f64::min(lo, v), f64::max(hi, v)))
    }
}

/// Mean over the teams that have a value; 0 when nobody does.
fn mean_of_present(values: impl Iterator<Item = Option<f64>>) -> f64 {
    let present: Vec<f64> = values.flatten().collect();
    mean(&present).unwrap_or(0.0)
}

/// Compare every drafting team with the league mean at each slot, each flex
/// depth and in total. A team with an empty slot counts 0 points there.
pub fn state_of_draft(board: &DraftBoard, slots: &[Slot]) -> DraftState {
    let teams: Vec<Owner> = board.drafting_teams().into_iter().collect();
    let summaries = team_draft_summary(board, slots, &teams);

    let slot_means: Vec<f64> = (0..slots.len())
        .map(|i| mean_of_present(summaries.iter().map(|s| s.starter_points()[i])))
        .collect();

    let flex_depth = summaries.iter().map(|s| s.flex.len()).max().unwrap_or(0);
    let flex_means: Vec<f64> = (0..flex_depth)
        .map(|i| mean_of_present(summaries.iter().map(|s| s.flex.get(i).map(|p| p.points))))
        .collect();

    let totals: Vec<f64> = summaries.iter().map(TeamSummary::total).collect();
    let total_mean = mean(&totals).unwrap_or(0.0);

    let standings = summaries
        .iter()
        .zip(&totals)
        .map(|(summary, &total)| TeamStanding {
            owner: summary.owner.clone(),
            slot_deltas: summary
                .starter_points()
                .into_iter()
                .zip(&slot_means)
                .map(|(pts, m)| pts.unwrap_or(0.0) - m)
                .collect(),
            flex_deltas: flex_means
                .iter()
                .enumerate()
                .map(|(i, m)| summary.flex.get(i).map_or(0.0, |p| p.points) - m)
                .collect(),
            total,
            total_delta: total - total_mean,
        })
        .collect();

    DraftState {
        slots: slots.iter().map(|s| s.to_string()).collect(),
        slot_means,
        flex_means,
        total_mean,
        teams: standings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{Position, DRAFT_SLOTS};
    use crate::draft::player::fixtures::player;

    fn board() -> DraftBoard {
        DraftBoard::new(vec![
            player(1, "Qb One", Position::QB, "AAA", 300.0),
            player(2, "Rb One", Position::RB, "AAA", 250.0),
            player(3, "Rb Two", Position::RB, "AAA", 200.0),
            player(4, "Wr One", Position::WR, "AAA", 180.0),
            player(5, "Wr Two", Position::WR, "AAA", 150.0),
            player(6, "Wr Three", Position::WR, "AAA", 120.0),
            player(7, "Te One", Position::TE, "AAA", 90.0),
            player(8, "Qb Two", Position::QB, "AAA", 280.0),
            player(9, "Qb Three", Position::QB, "BBB", 260.0),
            player(10, "Rb Three", Position::RB, "BBB", 230.0),
            player(11, "Kicker", Position::K, "FA", 130.0),
        ])
    }

    #[test]
    fn test_team_draft_summary_buckets() {
        let board = board();
        let teams = vec![Owner::team("AAA"), Owner::team("BBB")];
        let summary = team_draft_summary(&board, &DRAFT_SLOTS, &teams);

        let aaa = &summary[0];
        let labels: Vec<&str> = aaa.starters.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(labels, vec!["QB", "RB", "RB/WR", "WR", "WR/TE", "TE", "D/ST", "K"]);

        let names: Vec<Option<String>> = aaa
            .starters
            .iter()
            .map(|(_, p)| p.as_ref().map(|p| p.full_name()))
            .collect();
        assert_eq!(names[0].as_deref(), Some("Qb One"));
        assert_eq!(names[1].as_deref(), Some("Rb One"));
        // Combo slots fill after the singles: best leftover RB or WR
        assert_eq!(names[2].as_deref(), Some("Rb Two"));
        assert_eq!(names[3].as_deref(), Some("Wr One"));
        assert_eq!(names[4].as_deref(), Some("Wr Two"));
        assert_eq!(names[5].as_deref(), Some("Te One"));
        assert_eq!(names[6], None);

        let flex: Vec<String> = aaa.flex.iter().map(|p| p.full_name()).collect();
        assert_eq!(flex, vec!["Qb Two", "Wr Three"]);

        assert_eq!(aaa.total(), 300.0 + 250.0 + 200.0 + 180.0 + 150.0 + 90.0);
    }

    #[test]
    fn test_state_of_draft_deltas() {
        let board = board();
        let state = state_of_draft(&board, &DRAFT_SLOTS);

        assert_eq!(state.teams.len(), 2);
        // QB mean over both teams, RB/WR only AAA has one
        assert_eq!(state.slot_means[0], 280.0);
        assert_eq!(state.slot_means[2], 200.0);
        assert_eq!(state.slot_means[7], 0.0);

        let aaa = &state.teams[0];
        let bbb = &state.teams[1];
        assert_eq!(aaa.slot_deltas[0], 20.0);
        assert_eq!(bbb.slot_deltas[0], -20.0);
        assert_eq!(bbb.slot_deltas[2], -200.0);

        // Only AAA has flex players
        assert_eq!(state.flex_means, vec![280.0, 120.0]);
        assert_eq!(bbb.flex_deltas, vec![-280.0, -120.0]);

        assert_eq!(aaa.total, 1170.0);
        assert_eq!(bbb.total, 490.0);
        assert_eq!(state.total_mean, 830.0);
        assert_eq!(aaa.total_delta, 340.0);

        let (lo, hi) = state.delta_range();
        assert_eq!(lo, -340.0);
        assert_eq!(hi, 340.0);
    }

    #[test]
    fn test_state_of_draft_before_any_pick() {
        let board = DraftBoard::new(vec![player(1, "Qb One", Position::QB, "FA", 300.0)]);
        let state = state_of_draft(&board, &DRAFT_SLOTS);
        assert!(state.teams.is_empty());
        assert_eq!(state.total_mean, 0.0);
        assert_eq!(state.delta_range(), (0.0, 0.0));
    }
}
