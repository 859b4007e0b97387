//! PNG charts for the draft and league statistics.
//!
//! Rendering uses the plotters bitmap backend at a fixed size. Errors come
//! back as [`anyhow::Error`] and become [`crate::FflError::Plot`] at the
//! command boundary.

pub mod draft;
pub mod league;

use plotters::style::RGBColor;
use std::fmt::Display;

use crate::cli::types::Position;

pub const CHART_SIZE: (u32, u32) = (1200, 800);
pub const PANEL_CHART_SIZE: (u32, u32) = (1800, 1100);

pub fn position_color(position: Position) -> RGBColor {
    match position {
        Position::K => RGBColor(255, 0, 255),
        Position::P => RGBColor(230, 200, 0),
        Position::QB => RGBColor(0, 0, 0),
        Position::WR => RGBColor(0, 0, 255),
        Position::RB => RGBColor(255, 0, 0),
        Position::TE => RGBColor(0, 160, 0),
        Position::DST => RGBColor(0, 190, 190),
    }
}

/// Blend a colour halfway towards white.
pub fn lighten(color: RGBColor) -> RGBColor {
    let mix = |c: u8| ((u16::from(c) + 255) / 2) as u8;
    RGBColor(mix(color.0), mix(color.1), mix(color.2))
}

/// Rows and columns for `n` panels: `floor(sqrt n)` columns and as many rows
/// as needed.
pub fn grid_shape(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let cols = ((n as f64).sqrt().floor() as usize).max(1);
    let rows = n.div_ceil(cols);
    (rows, cols)
}

/// Wrap a plotters error, which is generic over the backend, with context.
pub(crate) fn plot_err<E: Display>(what: &'static str) -> impl FnOnce(E) -> anyhow::Error {
    move |e| anyhow::anyhow!("{}: {}", what, e)
}
