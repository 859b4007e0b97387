//! Descriptive statistics over small samples.
//!
//! Standard deviations are population deviations (divide by `n`), matching
//! how the league sheet has always reported them.

use serde::Serialize;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Pearson correlation; `None` for mismatched lengths, fewer than two
/// points, or a constant series.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let fit = linear_regression(x, y)?;
    fit.r_value
}

/// Least squares fit of `y` against `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// Correlation coefficient; `None` when `y` is constant.
    pub r_value: Option<f64>,
    /// Standard error of the slope; needs at least three points.
    pub std_err: Option<f64>,
}

/// `None` when lengths differ, there are fewer than two points, or `x` is
/// constant.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<Regression> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let mx = mean(x)?;
    let my = mean(y)?;

    let ssxm = x.iter().map(|v| (v - mx).powi(2)).sum::<f64>() / n;
    let ssym = y.iter().map(|v| (v - my).powi(2)).sum::<f64>() / n;
    let ssxym = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mx) * (b - my))
        .sum::<f64>()
        / n;

    if ssxm == 0.0 {
        return None;
    }

    let slope = ssxym / ssxm;
    let intercept = my - slope * mx;

    let r_value = (ssym > 0.0).then(|| (ssxym / (ssxm * ssym).sqrt()).clamp(-1.0, 1.0));
    let std_err = match r_value {
        Some(r) if x.len() > 2 => {
            let df = n - 2.0;
            Some(((1.0 - r * r) * ssym / ssxm / df).sqrt())
        }
        _ => None,
    };

    Some(Regression {
        slope,
        intercept,
        r_value,
        std_err,
    })
}
