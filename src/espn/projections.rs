//! Season projections table scraping.
//!
//! The projections tool pages a table of ~40 players at a time. Each page has
//! a sub-header row naming the columns, player rows, and a pagination bar
//! whose `NEXT` link leads to the following page.

use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::{
    html::{parse_points, selector, text_of},
    http::{projections_url, resolve_link, PageFetcher},
    types::{mascot_team, ProjectionRow},
};
use crate::{
    cli::types::{LeagueId, Owner, Position},
    draft::DraftPlayer,
    error::FflError,
    Result,
};

const X_HEADER: &str = "table#playertable_0 tr.playerTableBgRowSubhead td";
const X_ROWS: &str = "table#playertable_0 tr.pncPlayerRow";
const X_PAGE_NAV: &str = "div.paginationNav a";

/// Column holding `Name, TEAM<nbsp>POS`.
pub const PLAYER_COLUMN: &str = "PLAYER, TEAM POS";
/// Column holding the fantasy owner (`FA` or a team abbreviation).
pub const OWNER_COLUMN: &str = "TYPE";
pub const RANK_COLUMN: &str = "RNK";
pub const POINTS_COLUMN: &str = "PTS";

/// One parsed page of the projections table.
#[derive(Debug, Default)]
pub struct ProjectionPage {
    pub headers: Vec<String>,
    pub rows: Vec<ProjectionRow>,
    pub next: Option<String>,
}

impl ProjectionPage {
    /// A page without the sub-header row carries no projections.
    pub fn has_data(&self) -> bool {
        !self.headers.is_empty()
    }
}

/// Parse a projections page into header-keyed rows plus the `NEXT` link.
pub fn parse_projection_page(body: &str) -> Result<ProjectionPage> {
    let doc = Html::parse_document(body);

    let headers: Vec<String> = doc.select(&selector(X_HEADER)?).map(|td| text_of(&td)).collect();
    if headers.is_empty() {
        return Ok(ProjectionPage::default());
    }

    let td = selector("td")?;
    let rows = doc
        .select(&selector(X_ROWS)?)
        .map(|tr| {
            let values = tr.select(&td).map(|cell| text_of(&cell)).collect();
            ProjectionRow::new(&headers, values)
        })
        .collect();

    let next = doc
        .select(&selector(X_PAGE_NAV)?)
        .find(|a| text_of(a).to_uppercase().contains("NEXT"))
        .and_then(|a| a.value().attr("href").map(str::to_string));

    Ok(ProjectionPage {
        headers,
        rows,
        next,
    })
}

/// Walk every projections page for the league and collect the raw rows.
pub async fn fetch_projection_rows(
    fetcher: &PageFetcher,
    league_id: LeagueId,
) -> Result<Vec<ProjectionRow>> {
    let mut url = Some(projections_url(league_id));
    let mut visited = HashSet::new();
    let mut rows = Vec::new();

    while let Some(current) = url.take() {
        if !visited.insert(current.clone()) {
            warn!("pagination revisited {}, stopping", current);
            break;
        }

        let body = fetcher.fetch(&current).await?;
        let page = parse_projection_page(&body)?;
        if !page.has_data() {
            debug!("no projections table on {}", current);
            break;
        }

        info!("parsed {} projection rows from {}", page.rows.len(), current);
        rows.extend(page.rows);
        url = page.next.and_then(|href| resolve_link(&current, &href));
    }

    if rows.is_empty() {
        return Err(FflError::NoData);
    }
    Ok(rows)
}

/// Turn raw rows into draft players.
///
/// Players listed at several positions appear once per position; the extra
/// entries follow all primary entries. Rows that cannot be understood are
/// logged and skipped.
pub fn clean_projection_rows(rows: Vec<ProjectionRow>) -> Vec<DraftPlayer> {
    let mut primary = Vec::with_capacity(rows.len());
    let mut extra = Vec::new();

    for row in rows {
        match clean_row(row) {
            Ok(mut players) => {
                let rest = players.split_off(1);
                primary.extend(players);
                extra.extend(rest);
            }
            Err(e) => warn!("skipping projection row: {}", e),
        }
    }

    primary.extend(extra);
    primary
}

fn clean_row(mut row: ProjectionRow) -> Result<Vec<DraftPlayer>> {
    let player_cell = row
        .take(PLAYER_COLUMN)
        .ok_or_else(|| FflError::malformed(format!("missing {PLAYER_COLUMN} cell")))?;

    let mut parts = player_cell.split('\u{a0}');
    let name_team = parts.next().unwrap_or_default().trim();
    let pos_text = parts
        .next()
        .ok_or_else(|| FflError::malformed(format!("no position in '{}'", player_cell)))?;

    let (name, team) = if name_team.contains("D/ST") {
        let mascot = name_team.split(' ').next().unwrap_or_default();
        let team = mascot_team(mascot).unwrap_or(mascot);
        (name_team, team.to_string())
    } else {
        let (name, team) = name_team
            .split_once(", ")
            .ok_or_else(|| FflError::malformed(format!("no team in '{}'", name_team)))?;
        (name, team.trim().to_string())
    };

    let (first, last) = split_name(name);

    let positions = pos_text
        .split(',')
        .filter_map(|p| p.split_whitespace().next())
        .map(str::parse::<Position>)
        .collect::<Result<Vec<_>>>()?;
    if positions.is_empty() {
        return Err(FflError::malformed(format!("no position in '{}'", player_cell)));
    }

    let owner: Owner = row
        .take(OWNER_COLUMN)
        .unwrap_or_default()
        .parse()
        .unwrap_or_default();

    let rank = row
        .take(RANK_COLUMN)
        .ok_or_else(|| FflError::malformed(format!("missing {RANK_COLUMN} for {}", name)))?
        .trim()
        .parse::<u32>()?;

    let points = row
        .take(POINTS_COLUMN)
        .as_deref()
        .and_then(parse_points)
        .ok_or_else(|| FflError::malformed(format!("bad {POINTS_COLUMN} for {}", name)))?;

    let base = DraftPlayer {
        rank,
        first,
        last,
        team,
        position: positions[0],
        owner,
        points,
        replacement_value: 0.0,
        stats: row.cells,
    };

    Ok(positions
        .into_iter()
        .map(|position| DraftPlayer {
            position,
            ..base.clone()
        })
        .collect())
}

/// First token is the first name; everything after is the last name.
pub fn split_name(name: &str) -> (String, String) {
    let mut tokens = name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let last = tokens.collect::<Vec<_>>().join(" ");
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<table id="playertable_0">
  <tr class="playerTableBgRowHead tableHead"><th>SORTED BY PROJECTED POINTS</th></tr>
  <tr class="playerTableBgRowSubhead tableSubHead">
    <td>RNK</td><td>PLAYER, TEAM POS</td><td>TYPE</td><td>C/A</td><td>YDS</td><td>PTS</td>
  </tr>
  <tr class="pncPlayerRow playerTableBgRow0">
    <td>1</td><td>Peyton Manning, Den&nbsp;QB</td><td>FA</td><td>410/600</td><td>4800</td><td>321.5</td>
  </tr>
  <tr class="pncPlayerRow playerTableBgRow1">
    <td>2</td><td>Broncos D/ST&nbsp;D/ST</td><td>HPZ</td><td>--</td><td>--</td><td>140</td>
  </tr>
  <tr class="pncPlayerRow playerTableBgRow0">
    <td>3</td><td>Darren Sproles, Phi&nbsp;RB, WR</td><td>FA</td><td>--</td><td>700</td><td>--</td>
  </tr>
  <tr class="pncPlayerRow playerTableBgRow1">
    <td>4</td><td>Nobody Special</td><td>FA</td><td>--</td><td>--</td><td>1</td>
  </tr>
</table>
<div class="paginationNav"><a href="projections?leagueId=1&amp;startIndex=0">PREVIOUS</a> | <a href="projections?leagueId=1&amp;startIndex=40">NEXT&raquo;</a></div>
</body></html>"#;

    #[test]
    fn test_parse_projection_page() {
        let page = parse_projection_page(PAGE).unwrap();
        assert!(page.has_data());
        assert_eq!(page.headers.len(), 6);
        assert_eq!(page.rows.len(), 4);
        assert_eq!(page.rows[0].get("YDS"), Some("4800"));
        assert_eq!(
            page.next.as_deref(),
            Some("projections?leagueId=1&startIndex=40")
        );
    }

    #[test]
    fn test_page_without_table_has_no_data() {
        let page = parse_projection_page("<html><body><p>Maintenance</p></body></html>").unwrap();
        assert!(!page.has_data());
        assert!(page.rows.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_clean_projection_rows() {
        let page = parse_projection_page(PAGE).unwrap();
        let players = clean_projection_rows(page.rows);

        // Malformed row dropped, multi-position player duplicated at the end
        assert_eq!(players.len(), 4);

        let manning = &players[0];
        assert_eq!(manning.first, "Peyton");
        assert_eq!(manning.last, "Manning");
        assert_eq!(manning.team, "Den");
        assert_eq!(manning.position, Position::QB);
        assert!(manning.owner.is_free_agent());
        assert_eq!(manning.points, 321.5);
        assert_eq!(manning.stats.len(), 2);

        let broncos = &players[1];
        assert_eq!(broncos.first, "Broncos");
        assert_eq!(broncos.last, "D/ST");
        assert_eq!(broncos.team, "Den");
        assert_eq!(broncos.position, Position::DST);
        assert_eq!(broncos.owner, Owner::team("HPZ"));

        assert_eq!(players[2].last, "Sproles");
        assert_eq!(players[2].position, Position::RB);
        assert_eq!(players[2].points, 0.0);
        assert_eq!(players[3].last, "Sproles");
        assert_eq!(players[3].position, Position::WR);
    }

    #[test]
    fn test_split_name() {
        assert_eq!(
            split_name("Odell Beckham Jr."),
            ("Odell".to_string(), "Beckham Jr.".to_string())
        );
        assert_eq!(split_name("Cher"), ("Cher".to_string(), String::new()));
    }
}
