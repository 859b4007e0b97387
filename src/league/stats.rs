//! Records against the whole league and what drives winning.

use serde::Serialize;

use super::{LeagueTable, TeamSeason};
use crate::{
    cli::types::Period,
    core::stats::{linear_regression, mean, pearson, std_dev, Regression},
};

/// Win percentage of every team, in table order.
pub fn win_percentages(table: &LeagueTable) -> Vec<(String, f64)> {
    table
        .teams()
        .iter()
        .map(|t| (t.name.clone(), t.standings.win_percentage()))
        .collect()
}

/// How a team would have fared playing every other team each period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRecord {
    pub team: String,
    pub wins_mean: f64,
    pub wins_std: f64,
    pub losses_mean: f64,
    pub losses_std: f64,
    /// Number of periods the team played.
    pub periods: usize,
}

impl FieldRecord {
    /// Standard error of the mean wins.
    pub fn wins_error(&self) -> f64 {
        if self.periods == 0 {
            0.0
        } else {
            self.wins_std / (self.periods as f64).sqrt()
        }
    }
}

fn field_record(table: &LeagueTable, team: &TeamSeason, periods: &[Period]) -> FieldRecord {
    let mut wins = Vec::new();
    let mut losses = Vec::new();

    for &period in periods {
        let Some(own) = team.points_for(period) else {
            continue;
        };
        let others: Vec<f64> = table
            .teams()
            .iter()
            .filter(|t| t.name != team.name)
            .filter_map(|t| t.points_for(period))
            .collect();

        let won: f64 = others
            .iter()
            .map(|&other| {
                if own > other {
                    1.0
                } else if own == other {
                    0.5
                } else {
                    0.0
                }
            })
            .sum();
        wins.push(won);
        losses.push(others.len() as f64 - won);
    }

    FieldRecord {
        team: team.name.clone(),
        wins_mean: mean(&wins).unwrap_or(0.0),
        wins_std: std_dev(&wins).unwrap_or(0.0),
        losses_mean: mean(&losses).unwrap_or(0.0),
        losses_std: std_dev(&losses).unwrap_or(0.0),
        periods: wins.len(),
    }
}

/// Each period a team "plays" every other team that scored that period: a
/// higher score is a win, an equal score half a win, and whatever is left of
/// the field counts as losses.
pub fn against_the_field(table: &LeagueTable) -> Vec<FieldRecord> {
    table
        .teams()
        .iter()
        .map(|t| field_record(table, t, table.periods()))
        .collect()
}

/// [`against_the_field`] over playoff rounds only.
pub fn clutch_performance(table: &LeagueTable) -> Vec<FieldRecord> {
    let playoffs: Vec<Period> = table
        .periods()
        .iter()
        .copied()
        .filter(Period::is_playoff)
        .collect();
    table
        .teams()
        .iter()
        .map(|t| field_record(table, t, &playoffs))
        .collect()
}

/// One candidate explanation of winning: a value per team, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinFactor {
    pub name: String,
    pub values: Vec<f64>,
}

fn factor(table: &LeagueTable, name: String, value: impl Fn(&TeamSeason) -> f64) -> WinFactor {
    WinFactor {
        name,
        values: table.teams().iter().map(value).collect(),
    }
}

fn mean_or_zero(values: &[f64]) -> f64 {
    mean(values).unwrap_or(0.0)
}

fn std_or_zero(values: &[f64]) -> f64 {
    std_dev(values).unwrap_or(0.0)
}

/// Opponent points (negated, so higher is better), mean points per slot,
/// mean share of points per slot, scoring spread, and spread per slot.
pub fn win_factors(table: &LeagueTable) -> Vec<WinFactor> {
    let mut factors = vec![factor(table, "op pts".to_string(), |t| {
        -t.standings.points_against
    })];

    for &slot in table.slots() {
        factors.push(factor(table, slot.to_string(), |t| {
            mean_or_zero(&t.slot_points_by_period(slot))
        }));
    }
    for &slot in table.slots() {
        factors.push(factor(table, format!("{} frac", slot), |t| {
            mean_or_zero(&t.fractional_slot_points_by_period(slot))
        }));
    }

    factors.push(factor(table, "pts std".to_string(), |t| {
        std_or_zero(&t.points_for_by_period())
    }));
    for &slot in table.slots() {
        factors.push(factor(table, format!("{} std", slot), |t| {
            std_or_zero(&t.slot_points_by_period(slot))
        }));
    }

    factors
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorCorrelation {
    pub factor: String,
    /// `None` when either series is constant.
    pub r: Option<f64>,
}

/// Pearson correlation of win percentage with every win factor. The old
/// league sheet reported `sum(w * x) / sum(x)` instead, which is not bounded
/// by 1 and is not comparable across factors.
pub fn win_correlations(table: &LeagueTable) -> Vec<FactorCorrelation> {
    let wins: Vec<f64> = win_percentages(table).into_iter().map(|(_, w)| w).collect();
    win_factors(table)
        .into_iter()
        .map(|f| FactorCorrelation {
            r: pearson(&wins, &f.values),
            factor: f.name,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorRegression {
    pub factor: String,
    pub regression: Option<Regression>,
}

impl FactorRegression {
    /// Strength of the fit, 0 when there is none.
    pub fn abs_r(&self) -> f64 {
        self.regression
            .as_ref()
            .and_then(|r| r.r_value)
            .map_or(0.0, f64::abs)
    }
}

/// Least squares fit of each win factor against win percentage.
pub fn win_regressions(table: &LeagueTable) -> Vec<FactorRegression> {
    let wins: Vec<f64> = win_percentages(table).into_iter().map(|(_, w)| w).collect();
    win_factors(table)
        .into_iter()
        .map(|f| FactorRegression {
            regression: linear_regression(&wins, &f.values),
            factor: f.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{Position, Slot};
    use std::collections::BTreeMap;

    fn season(name: &str, scores: &[(Period, &str, f64, f64)]) -> TeamSeason {
        let mut t = TeamSeason::new(name);
        for &(period, opponent, pf, pa) in scores {
            t.record_game(period, opponent, pf, pa);
        }
        t.recompute_standings();
        t
    }

    fn table() -> LeagueTable {
        let w1 = Period::Week(1);
        let w2 = Period::Week(2);
        let p1 = Period::Playoff(1);

        let mut a = season("A", &[(w1, "B", 100.0, 90.0), (w2, "C", 80.0, 80.0), (p1, "B", 120.0, 70.0)]);
        a.slot_points.insert(w1, BTreeMap::from([(Slot::Single(Position::QB), 25.0)]));
        a.slot_points.insert(w2, BTreeMap::from([(Slot::Single(Position::QB), 15.0)]));
        let mut b = season("B", &[(w1, "A", 90.0, 100.0), (w2, "D", 120.0, 60.0), (p1, "A", 70.0, 120.0)]);
        b.slot_points.insert(w1, BTreeMap::from([(Slot::Single(Position::QB), 30.0)]));
        let c = season("C", &[(w1, "D", 50.0, 40.0), (w2, "A", 80.0, 80.0)]);
        let d = season("D", &[(w1, "C", 40.0, 50.0), (w2, "B", 60.0, 120.0)]);

        let mut table = LeagueTable::default();
        for t in [a, b, c, d] {
            table.insert_team(t);
        }
        table
    }

    #[test]
    fn test_win_percentages() {
        let wp = win_percentages(&table());
        assert_eq!(
            wp,
            vec![
                ("A".to_string(), 1.0),
                ("B".to_string(), 0.5),
                ("C".to_string(), 1.0),
                ("D".to_string(), 0.0),
            ]
        );
    }

    #[test]
    fn test_against_the_field() {
        let records = against_the_field(&table());

        // Week 1: A beats all three. Week 2: A ties C, beats D, loses to B.
        // Playoff round: only B left to play.
        let a = &records[0];
        assert_eq!(a.periods, 3);
        assert_eq!(a.wins_mean, (3.0 + 1.5 + 1.0) / 3.0);
        assert_eq!(a.losses_mean, (0.0 + 1.5 + 0.0) / 3.0);

        let d = &records[3];
        assert_eq!(d.periods, 2);
        assert_eq!(d.wins_mean, 0.0);
        assert_eq!(d.losses_mean, 3.0);
        assert_eq!(d.wins_std, 0.0);
        assert_eq!(d.wins_error(), 0.0);
    }

    #[test]
    fn test_clutch_performance_uses_playoffs_only() {
        let records = clutch_performance(&table());
        assert_eq!(records[0].periods, 1);
        assert_eq!(records[0].wins_mean, 1.0);
        assert_eq!(records[1].wins_mean, 0.0);
        assert_eq!(records[1].losses_mean, 1.0);
        assert_eq!(records[2].periods, 0);
        assert_eq!(records[2].wins_mean, 0.0);
    }

    #[test]
    fn test_win_factor_names_and_values() {
        let table = table();
        let factors = win_factors(&table);
        let names: Vec<&str> = factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names.len(), 1 + 9 + 9 + 1 + 9);
        assert_eq!(names[0], "op pts");
        assert_eq!(names[1], "QB");
        assert_eq!(names[10], "QB frac");
        assert_eq!(names[19], "pts std");
        assert_eq!(names[20], "QB std");
        assert_eq!(names[27], "K std");

        assert_eq!(factors[0].values, vec![-170.0, -160.0, -120.0, -170.0]);
        assert_eq!(factors[1].values, vec![20.0, 30.0, 0.0, 0.0]);
        assert_eq!(factors[10].values[0], (0.25 + 15.0 / 80.0) / 2.0);
        assert_eq!(factors[20].values[0], 5.0);
    }

    #[test]
    fn test_correlations_and_regressions_line_up() {
        let table = table();
        let corr = win_correlations(&table);
        let regs = win_regressions(&table);
        assert_eq!(corr.len(), regs.len());

        for (c, r) in corr.iter().zip(&regs) {
            assert_eq!(c.factor, r.factor);
            let from_fit = r.regression.as_ref().and_then(|g| g.r_value);
            match (c.r, from_fit) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-12),
                (None, None) => {}
                other => panic!("mismatch for {}: {:?}", c.factor, other),
            }
        }

        // No kicker data: constant factor, no correlation
        let k = corr.iter().find(|c| c.factor == "K").unwrap();
        assert_eq!(k.r, None);
        let k = regs.iter().find(|r| r.factor == "K").unwrap();
        assert_eq!(k.abs_r(), 0.0);
    }

    #[test]
    fn test_correlations_are_bounded() {
        let corr = win_correlations(&table());
        assert!(corr.iter().filter_map(|c| c.r).all(|r| (-1.0..=1.0).contains(&r)));

        // QB points [20, 30, 0, 0] against win% [1, 0.5, 1, 0]: the sheet's
        // sum(w * x) / sum(x) gives 0.7, Pearson gives a weak positive r.
        let qb = corr.iter().find(|c| c.factor == "QB").unwrap().r.unwrap();
        assert!(qb > 0.0 && qb < 0.5);
    }
}
