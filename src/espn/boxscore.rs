//! Quick box score scraping: points scored by each starting lineup slot.

use scraper::Html;
use std::collections::BTreeMap;
use tracing::warn;

use super::html::{parse_points, selector, text_of};
use crate::{cli::types::Slot, error::FflError, Result};

const X_TEAM_TABLE: &str = "table.playerTableTable";
const X_PLAYER_ROWS: &str = "tr.pncPlayerRow";
const X_SLOT: &str = "td.playerSlot";
const X_POINTS: &str = "td.appliedPoints";

/// Slot labels that are not part of the starting lineup.
const RESERVE_SLOTS: [&str; 3] = ["BENCH", "BE", "IR"];

/// Sum starter points per slot for the team whose box score this is (the
/// first lineup table on the page). Two starters in the same slot add up.
pub fn parse_slot_points(body: &str) -> Result<BTreeMap<Slot, f64>> {
    let doc = Html::parse_document(body);
    let table = doc
        .select(&selector(X_TEAM_TABLE)?)
        .next()
        .ok_or(FflError::NoData)?;

    let slot_sel = selector(X_SLOT)?;
    let points_sel = selector(X_POINTS)?;

    let mut points = BTreeMap::new();
    for row in table.select(&selector(X_PLAYER_ROWS)?) {
        let Some(slot_text) = row.select(&slot_sel).next().map(|c| text_of(&c)) else {
            continue;
        };
        if RESERVE_SLOTS.contains(&slot_text.to_uppercase().as_str()) {
            continue;
        }

        let slot: Slot = match slot_text.parse() {
            Ok(slot) => slot,
            Err(e) => {
                warn!("ignoring lineup slot: {}", e);
                continue;
            }
        };

        let applied = row
            .select(&points_sel)
            .next()
            .map(|c| text_of(&c))
            .and_then(|t| parse_points(&t))
            .unwrap_or(0.0);

        *points.entry(slot).or_insert(0.0) += applied;
    }

    Ok(points)
}
