//! League charts: against the field, regression strength, slot treemap.

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

use super::{lighten, plot_err, position_color, CHART_SIZE};
use crate::cli::types::Slot;
use crate::league::{layout, FactorRegression, FieldRecord, Rect, TeamSeason, TreeNode};

/// `(team, mean wins, standard error)` sorted by mean wins.
pub(crate) fn field_series(records: &[FieldRecord]) -> Vec<(String, f64, f64)> {
    let mut series: Vec<(String, f64, f64)> = records
        .iter()
        .map(|r| (r.team.clone(), r.wins_mean, r.wins_error()))
        .collect();
    series.sort_by(|a, b| a.1.total_cmp(&b.1));
    series
}

/// Mean wins against the field per team, with error bars.
pub fn against_the_field(records: &[FieldRecord], path: &Path) -> Result<()> {
    let series = field_series(records);
    let n = series.len().max(1) as f64;
    let top = series
        .iter()
        .map(|(_, w, e)| w + e)
        .fold(1.0, f64::max);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err("fill background"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Wins against the field", ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n - 0.5), -0.5..(top + 0.5))
        .map_err(plot_err("build chart"))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("mean wins per period")
        .draw()
        .map_err(plot_err("draw mesh"))?;

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, (_, w, _))| (i as f64, *w))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), BLUE.stroke_width(2)))
        .map_err(plot_err("draw line"))?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 5, BLUE.filled())))
        .map_err(plot_err("draw markers"))?;
    chart
        .draw_series(series.iter().enumerate().map(|(i, (_, w, e))| {
            let x = i as f64;
            PathElement::new(vec![(x, w - e), (x, w + e)], BLUE.stroke_width(1))
        }))
        .map_err(plot_err("draw error bars"))?;
    chart
        .draw_series(series.iter().enumerate().map(|(i, (team, w, _))| {
            Text::new(team.clone(), (i as f64 + 0.15, w - 0.25), ("sans-serif", 14))
        }))
        .map_err(plot_err("draw team names"))?;

    root.present().map_err(plot_err("write png"))?;
    Ok(())
}

/// `(factor, |r|)` sorted weakest first.
pub(crate) fn strength_series(regressions: &[FactorRegression]) -> Vec<(String, f64)> {
    let mut series: Vec<(String, f64)> = regressions
        .iter()
        .map(|r| (r.factor.clone(), r.abs_r()))
        .collect();
    series.sort_by(|a, b| a.1.total_cmp(&b.1));
    series
}

/// How strongly each win factor tracks win percentage.
pub fn regression_strength(regressions: &[FactorRegression], path: &Path) -> Result<()> {
    let series = strength_series(regressions);
    let n = series.len().max(1) as f64;

    let root = BitMapBackend::new(path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err("fill background"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Win factor |r|", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(20)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n - 0.5), 0.0..1.0)
        .map_err(plot_err("build chart"))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .draw()
        .map_err(plot_err("draw mesh"))?;

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, (_, r))| (i as f64, *r))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), BLACK.stroke_width(2)))
        .map_err(plot_err("draw line"))?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 6, BLACK.stroke_width(2))))
        .map_err(plot_err("draw markers"))?;
    chart
        .draw_series(series.iter().zip(&points).map(|((name, _), &(x, y))| {
            Text::new(
                name.clone(),
                (x, (y + 0.03).min(0.97)),
                ("sans-serif", 11).into_font().transform(FontTransform::Rotate270),
            )
        }))
        .map_err(plot_err("draw factor names"))?;

    root.present().map_err(plot_err("write png"))?;
    Ok(())
}

/// A team's season as slot -> period -> points.
pub(crate) fn slot_tree(team: &TeamSeason, slots: &[Slot]) -> Vec<(String, TreeNode)> {
    slots
        .iter()
        .map(|&slot| {
            let periods = team
                .slot_points
                .iter()
                .filter_map(|(period, pts)| {
                    pts.get(&slot)
                        .map(|&p| (period.to_string(), TreeNode::Leaf(p)))
                })
                .collect();
            (slot.to_string(), TreeNode::Branch(periods))
        })
        .collect()
}

fn slot_color(label: &str) -> RGBColor {
    label
        .parse::<Slot>()
        .ok()
        .and_then(|slot| crate::cli::types::Position::ALL.into_iter().find(|&p| slot.accepts(p)))
        .map_or(RGBColor(128, 128, 128), position_color)
}

/// Treemap of a team's season points, split by slot and then by period.
pub fn slot_treemap(team: &TeamSeason, slots: &[Slot], path: &Path) -> Result<()> {
    let rects = layout(&slot_tree(team, slots), Rect::unit());

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err("fill background"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} points by slot", team.name), ("sans-serif", 28))
        .margin(20)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(plot_err("build chart"))?;

    let max_depth = rects.iter().map(|r| r.depth()).max().unwrap_or(1);

    for r in &rects {
        let corners = [(r.rect.x_min, r.rect.y_min), (r.rect.x_max, r.rect.y_max)];
        let base = r.path.first().map_or(RGBColor(128, 128, 128), |s| slot_color(s));
        let width = (max_depth + 1 - r.depth()) as u32;

        if r.is_leaf {
            chart
                .draw_series(std::iter::once(Rectangle::new(corners, lighten(base).filled())))
                .map_err(plot_err("draw leaf"))?;
            chart
                .draw_series(std::iter::once(Text::new(
                    r.path.join(" "),
                    (r.rect.x_min + 0.02 * r.rect.width(), r.rect.y_max - 0.02 * r.rect.height()),
                    ("sans-serif", 11),
                )))
                .map_err(plot_err("draw label"))?;
        }
        chart
            .draw_series(std::iter::once(Rectangle::new(corners, BLACK.stroke_width(width))))
            .map_err(plot_err("draw outline"))?;
    }

    root.present().map_err(plot_err("write png"))?;
    Ok(())
}
