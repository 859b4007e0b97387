//! Draft charts: best available, state of the draft, one position.

use anyhow::Result;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

use super::{grid_shape, lighten, plot_err, position_color, CHART_SIZE, PANEL_CHART_SIZE};
use crate::cli::types::Position;
use crate::draft::{DraftState, ReplacementEntry};

/// Fixed axes so successive charts during a draft compare at a glance.
const BEST_Y: std::ops::Range<f64> = -200.0..0.0;
const BEST_X: std::ops::Range<f64> = -0.5..24.5;

/// Running replacement value of the best free agents at each position.
pub fn best_available(best: &BTreeMap<Position, Vec<ReplacementEntry>>, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err("fill background"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Best replacement available", ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(BEST_X, BEST_Y)
        .map_err(plot_err("build chart"))?;

    chart
        .configure_mesh()
        .x_desc("players taken")
        .y_desc("points lost")
        .draw()
        .map_err(plot_err("draw mesh"))?;

    for (&pos, entries) in best {
        let Some(top) = entries.first() else {
            continue;
        };
        let color = position_color(pos);
        let points: Vec<(f64, f64)> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i as f64, e.cumulative))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(plot_err("draw line"))?
            .label(format!("{}, {}", pos, top.name))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart
            .draw_series(points.into_iter().map(move |p| Circle::new(p, 4, color.stroke_width(2))))
            .map_err(plot_err("draw markers"))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err("draw legend"))?;

    root.present().map_err(plot_err("write png"))?;
    Ok(())
}

/// Bar heights and colours of one team's panel: starters, flex, total.
pub(crate) fn panel_bars(state: &DraftState, team: usize) -> Vec<(String, f64, RGBColor)> {
    let starter = BLUE;
    let Some(standing) = state.teams.get(team) else {
        return Vec::new();
    };

    let mut bars: Vec<(String, f64, RGBColor)> = state
        .slots
        .iter()
        .zip(&standing.slot_deltas)
        .map(|(slot, &d)| (slot.clone(), d, starter))
        .collect();
    bars.extend(
        standing
            .flex_deltas
            .iter()
            .enumerate()
            .map(|(i, &d)| (format!("flex_{}", i), d, lighten(starter))),
    );
    let total_color = if standing.total_delta > 0.0 { GREEN } else { RED };
    bars.push(("TOTAL".to_string(), standing.total_delta, total_color));
    bars
}

/// One bar panel per drafting team, every panel on the same y scale.
pub fn state_of_draft(state: &DraftState, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, PANEL_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err("fill background"))?;

    let (rows, cols) = grid_shape(state.teams.len());
    if rows == 0 {
        root.present().map_err(plot_err("write png"))?;
        return Ok(());
    }

    let (lo, hi) = state.delta_range();
    let pad = ((hi - lo) * 0.05).max(1.0);
    let y_range = (lo - pad)..(hi + pad);

    let panels = root.split_evenly((rows, cols));
    for (i, (panel, standing)) in panels.iter().zip(&state.teams).enumerate() {
        let bars = panel_bars(state, i);
        let labels: Vec<String> = bars.iter().map(|(l, _, _)| l.clone()).collect();

        let mut chart = ChartBuilder::on(panel)
            .caption(standing.owner.label(), ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(22)
            .y_label_area_size(40)
            .build_cartesian_2d(-0.5..(bars.len() as f64 - 0.5), y_range.clone())
            .map_err(plot_err("build panel"))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&|x| {
                let idx = x.round();
                if idx < 0.0 || (x - idx).abs() > 0.01 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .label_style(("sans-serif", 10))
            .draw()
            .map_err(plot_err("draw panel mesh"))?;

        chart
            .draw_series(bars.iter().enumerate().map(|(x, (_, height, color))| {
                let x = x as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *height)], color.filled())
            }))
            .map_err(plot_err("draw bars"))?;
    }

    root.present().map_err(plot_err("write png"))?;
    Ok(())
}

/// Running replacement value at one position, each point named.
pub fn state_of_position(position: Position, entries: &[ReplacementEntry], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err("fill background"))?;

    let lowest = entries.iter().map(|e| e.cumulative).fold(0.0, f64::min);
    let y_range = (lowest * 1.1 - 1.0)..(-lowest * 0.15 + 1.0);
    let x_range = -0.5..(entries.len().max(1) as f64 + 0.5);
    let color = position_color(position);

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Top {} {}", entries.len(), position), ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err("build chart"))?;

    chart
        .configure_mesh()
        .y_desc("points lost")
        .draw()
        .map_err(plot_err("draw mesh"))?;

    let points: Vec<(f64, f64)> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (i as f64, e.cumulative))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
        .map_err(plot_err("draw line"))?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))
        .map_err(plot_err("draw markers"))?;
    chart
        .draw_series(entries.iter().zip(&points).map(|(e, &(x, y))| {
            Text::new(
                format!("{}, {}", e.name, e.team),
                (x + 0.1, y),
                ("sans-serif", 12).into_font().transform(FontTransform::Rotate270),
            )
        }))
        .map_err(plot_err("draw names"))?;

    root.present().map_err(plot_err("write png"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::DRAFT_SLOTS;
    use crate::draft::player::fixtures::player;
    use crate::draft::{state_of_draft as compute_state, DraftBoard};

    #[test]
    fn test_panel_bars() {
        let board = DraftBoard::new(vec![
            player(1, "Qb One", Position::QB, "AAA", 300.0),
            player(2, "Qb Two", Position::QB, "AAA", 250.0),
            player(3, "Qb Three", Position::QB, "BBB", 200.0),
        ]);
        let state = compute_state(&board, &DRAFT_SLOTS);

        let bars = panel_bars(&state, 0);
        assert_eq!(bars.len(), DRAFT_SLOTS.len() + 1 + 1);
        assert_eq!(bars[0], ("QB".to_string(), 50.0, BLUE));
        assert_eq!(bars[8].0, "flex_0");
        assert_eq!(bars[8].2, lighten(BLUE));
        assert_eq!(bars[9], ("TOTAL".to_string(), 50.0, GREEN));

        let bars = panel_bars(&state, 1);
        assert_eq!(bars[9], ("TOTAL".to_string(), -50.0, RED));
        assert!(panel_bars(&state, 2).is_empty());
    }
}
