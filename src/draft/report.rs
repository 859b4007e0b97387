//! Plain text tables printed during a draft.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::{DraftState, ReplacementEntry};
use crate::cli::types::Position;

/// Pick counts at which the best-available table shows the points lost.
pub const LOOKAHEAD: [usize; 3] = [1, 5, 10];

fn signed(value: f64) -> String {
    format!("{:+.1}", value)
}

/// Points lost at each position if `k` of the best free agents go first.
pub fn best_available_report(best: &BTreeMap<Position, Vec<ReplacementEntry>>) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<5} {:<28} {:>7}", "POS", "BEST AVAILABLE", "PTS");
    for k in LOOKAHEAD {
        let _ = write!(out, " {:>8}", format!("+{}", k));
    }
    out.push('\n');

    for (pos, entries) in best {
        let Some(top) = entries.first() else {
            continue;
        };
        let _ = write!(
            out,
            "{:<5} {:<28} {:>7.1}",
            pos.label(),
            format!("{}, {}", top.name, top.team),
            top.points
        );
        for k in LOOKAHEAD {
            let cell = entries
                .get(k - 1)
                .map(|e| signed(e.cumulative))
                .unwrap_or_default();
            let _ = write!(out, " {:>8}", cell);
        }
        out.push('\n');
    }
    out
}

/// Each team's points relative to the league at every slot.
pub fn draft_state_report(state: &DraftState) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<6}", "TEAM");
    for slot in &state.slots {
        let _ = write!(out, " {:>7}", slot);
    }
    let _ = writeln!(out, " {:>8}", "TOTAL");

    let _ = write!(out, "{:<6}", "MEAN");
    for m in &state.slot_means {
        let _ = write!(out, " {:>7.1}", m);
    }
    let _ = writeln!(out, " {:>8.1}", state.total_mean);

    for team in &state.teams {
        let _ = write!(out, "{:<6}", team.owner.label());
        for d in &team.slot_deltas {
            let _ = write!(out, " {:>7}", signed(*d));
        }
        let _ = writeln!(out, " {:>8}", signed(team.total_delta));
    }
    out
}

/// The best free agents at one position with the points lost before each.
pub fn position_report(position: Position, entries: &[ReplacementEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Top {} {}", entries.len(), position);
    for (i, e) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<28} {:>7.1} {:>8}",
            i + 1,
            format!("{}, {}", e.name, e.team),
            e.points,
            signed(e.cumulative)
        );
    }
    out
}
