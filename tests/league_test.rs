//! End to end league file and statistics tests

use ffl_draft::{
    espn::types::{Matchup, ScoreOutcome},
    league::{against_the_field, team_scoring, win_regressions, LeagueTable},
    storage::{read_league, write_league, LeagueTeam},
    Period, Position, Slot, TeamId,
};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn game(week: u8, home: &str, home_pts: f64, away: &str, away_pts: f64) -> Matchup {
    Matchup {
        period: Period::Week(week),
        home: home.to_string(),
        away: away.to_string(),
        outcome: ScoreOutcome::Final {
            away: away_pts,
            home: home_pts,
        },
    }
}

fn season() -> LeagueTable {
    let teams = vec![
        LeagueTeam::new(1, "ALP", "Alpha", "Ann"),
        LeagueTeam::new(2, "BRV", "Bravo", "Bo"),
        LeagueTeam::new(3, "CHA", "Charlie", "Cy"),
        LeagueTeam::new(4, "DEL", "Delta", "Di"),
    ];
    let matchups = vec![
        game(1, "Alpha", 100.0, "Bravo", 80.0),
        game(1, "Charlie", 90.0, "Delta", 70.0),
        game(2, "Charlie", 110.0, "Alpha", 60.0),
        game(2, "Bravo", 95.0, "Delta", 85.0),
        Matchup {
            period: Period::Week(3),
            home: "Alpha".to_string(),
            away: "Delta".to_string(),
            outcome: ScoreOutcome::InProgress,
        },
    ];
    LeagueTable::from_matchups(&teams, &matchups)
}

#[test]
fn test_league_file_round_trip() {
    let mut table = season();
    let mut lineup = BTreeMap::new();
    lineup.insert(Slot::Single(Position::QB), 20.5);
    lineup.insert(Slot::Combo(Position::RB, Position::WR), 12.0);
    table
        .set_slot_points("Alpha", Period::Week(1), lineup)
        .unwrap();

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ffldata.csv");
    write_league(&path, &table).unwrap();
    let loaded = read_league(&path).unwrap();

    assert_eq!(loaded.team_names(), vec!["Alpha", "Bravo", "Charlie", "Delta"]);
    let alpha = loaded.team("Alpha").unwrap();
    assert_eq!(alpha.team_id, Some(TeamId::new(1)));
    assert_eq!(alpha.abbrev, "ALP");
    assert_eq!((alpha.standings.wins, alpha.standings.losses), (1, 1));
    assert_eq!(alpha.standings.points_for, 160.0);
    assert_eq!(alpha.points_against(Period::Week(2)), Some(110.0));
    assert_eq!(alpha.points_for(Period::Week(3)), None);
    assert_eq!(
        alpha.slot_points(Period::Week(1), Slot::Single(Position::QB)),
        Some(20.5)
    );

    let charlie = loaded.team("Charlie").unwrap();
    assert_eq!((charlie.standings.wins, charlie.standings.losses), (2, 0));
}

#[test]
fn test_season_statistics() {
    let table = season();

    let field = against_the_field(&table);
    let wins: Vec<(&str, f64)> = field
        .iter()
        .map(|r| (r.team.as_str(), r.wins_mean))
        .collect();
    assert_eq!(
        wins,
        vec![("Alpha", 1.5), ("Bravo", 1.5), ("Charlie", 2.5), ("Delta", 0.5)]
    );
    assert!(field.iter().all(|r| r.periods == 2));
    assert_eq!(field[0].losses_mean, 1.5);

    let scoring = team_scoring(&table);
    assert_eq!(scoring.periods.len(), 2);
    assert_eq!(scoring.periods[0].mean, 85.0);
    let charlie = scoring.teams.iter().find(|t| t.team == "Charlie").unwrap();
    assert_eq!(charlie.avg_for, 100.0);

    let fits = win_regressions(&table);
    assert_eq!(fits[0].factor, "op pts");
    assert!(fits.iter().all(|f| f.abs_r() <= 1.0 + 1e-9));
}
