//! League schedule page scraping.
//!
//! The schedule is one long table: a `tableHead` row names each period
//! (`WEEK 3`, `ROUND 1 - PLAYOFFS`), a `tableSubHead` row labels the columns,
//! and plain rows hold one matchup each. The upcoming-matchups section after
//! the schedule is not parsed.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::{
    html::{has_class, selector, text_of},
    types::{Matchup, ScoreOutcome},
};
use crate::{cli::types::Period, error::FflError, Result};

const X_SCHEDULE_ROWS: &str = "div.games-fullcol table tr";

const AWAY_CELL: usize = 0;
const HOME_CELL: usize = 3;
const SCORE_CELL: usize = 5;

/// Parse all played or in-progress matchups. Unplayed `Preview` games are
/// dropped.
pub fn parse_schedule(body: &str) -> Result<Vec<Matchup>> {
    let doc = Html::parse_document(body);
    let td = selector("td")?;

    let mut matchups = Vec::new();
    let mut current: Option<Period> = None;

    for tr in doc.select(&selector(X_SCHEDULE_ROWS)?) {
        if has_class(&tr, "tableHead") {
            let label = tr.select(&td).next().map(|c| text_of(&c)).unwrap_or_default();
            current = match label.parse::<Period>() {
                Ok(period) => Some(period),
                Err(e) => {
                    warn!("unrecognised schedule header: {}", e);
                    None
                }
            };
            continue;
        }
        if has_class(&tr, "tableSubHead") {
            continue;
        }

        let text = text_of(&tr);
        if text.chars().count() <= 1 {
            continue;
        }
        if text.contains("Matchups") {
            break;
        }

        let Some(period) = current else {
            debug!("matchup row before any period header");
            continue;
        };

        let cells: Vec<ElementRef<'_>> = tr.select(&td).collect();
        match parse_matchup(period, &cells) {
            Ok(Some(m)) => matchups.push(m),
            Ok(None) => {}
            Err(e) => warn!("skipping schedule row in {}: {}", period, e),
        }
    }

    Ok(matchups)
}

fn parse_matchup(period: Period, cells: &[ElementRef<'_>]) -> Result<Option<Matchup>> {
    let cell = |i: usize| {
        cells
            .get(i)
            .map(text_of)
            .ok_or_else(|| FflError::malformed(format!("expected at least {} cells", i + 1)))
    };

    let away = strip_record(&cell(AWAY_CELL)?);
    let home = strip_record(&cell(HOME_CELL)?);
    let score = cell(SCORE_CELL)?;

    let outcome = match parse_score(&score) {
        Some((away_pts, home_pts)) => ScoreOutcome::Final {
            away: away_pts,
            home: home_pts,
        },
        None if score.contains("Preview") => return Ok(None),
        None if score.contains("Box") => ScoreOutcome::InProgress,
        None => return Err(FflError::malformed(format!("unreadable score '{}'", score))),
    };

    Ok(Some(Matchup {
        period,
        home,
        away,
        outcome,
    }))
}

/// `"Heavy Petting Zoo (5-2)"` -> `"Heavy Petting Zoo"`.
pub fn strip_record(cell: &str) -> String {
    match cell.find('(') {
        Some(idx) => cell[..idx].trim().to_string(),
        None => cell.trim().to_string(),
    }
}

/// `"101.5-88"` -> `(101.5, 88.0)`, away score first.
pub fn parse_score(cell: &str) -> Option<(f64, f64)> {
    let (a, b) = cell.trim().split_once('-')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE: &str = r#"
<html><body><div class="games-fullcol games-fullcol-extramargin">
<table class="tableBody">
  <tr class="tableHead"><td colspan="6">WEEK 1</td></tr>
  <tr class="tableSubHead"><td>AWAY TEAM</td><td>OWNER(S)</td><td></td><td>HOME TEAM</td><td>OWNER(S)</td><td>RESULT</td></tr>
  <tr><td>Just Noise (1-0)</td><td>Ben Koch</td><td>at</td><td>Heavy Petting Zoo (0-1)</td><td>Zach Lamberty</td><td>110.5-98</td></tr>
  <tr><td>Snail Trails (0-1)</td><td>Michael Lubke</td><td>at</td><td>BATH SALTZ (1-0)</td><td>Matt Hibberd</td><td>77-77</td></tr>
  <tr><td colspan="6"> </td></tr>
  <tr class="tableHead"><td colspan="6">WEEK 2</td></tr>
  <tr><td>Heavy Petting Zoo (0-1)</td><td>Zach</td><td>at</td><td>Snail Trails (0-1)</td><td>Mike</td><td>Box</td></tr>
  <tr><td>BATH SALTZ (1-0)</td><td>Matt</td><td>at</td><td>Just Noise (1-0)</td><td>Ben</td><td>Preview</td></tr>
  <tr class="tableHead"><td colspan="6">ROUND 1 - PLAYOFFS</td></tr>
  <tr><td>Just Noise</td><td>Ben</td><td>at</td><td>Snail Trails</td><td>Mike</td><td>90-91.25</td></tr>
  <tr><td>broken row</td></tr>
  <tr><td>Upcoming Matchups</td></tr>
  <tr><td>Late (0-0)</td><td>x</td><td>at</td><td>Later (0-0)</td><td>y</td><td>1-2</td></tr>
</table></div></body></html>"#;

    #[test]
    fn test_parse_schedule() {
        let games = parse_schedule(SCHEDULE).unwrap();
        assert_eq!(games.len(), 4);

        assert_eq!(games[0].period, Period::Week(1));
        assert_eq!(games[0].away, "Just Noise");
        assert_eq!(games[0].home, "Heavy Petting Zoo");
        assert_eq!(games[0].final_score(), Some((98.0, 110.5)));

        assert_eq!(games[1].final_score(), Some((77.0, 77.0)));

        assert_eq!(games[2].period, Period::Week(2));
        assert_eq!(games[2].outcome, ScoreOutcome::InProgress);

        assert_eq!(games[3].period, Period::Playoff(1));
        assert_eq!(games[3].final_score(), Some((91.25, 90.0)));
    }

    #[test]
    fn test_strip_record() {
        assert_eq!(strip_record("Just Noise (3-4)"), "Just Noise");
        assert_eq!(strip_record("Just Noise"), "Just Noise");
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("101.5-88"), Some((101.5, 88.0)));
        assert_eq!(parse_score("Box"), None);
        assert_eq!(parse_score("12-abc"), None);
    }
}
