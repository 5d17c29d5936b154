//! Coarse trend classification over recent scores.

use std::fmt;

use serde::{Deserialize, Serialize};

use cogscreen_store::result::TestResult;

/// How many recent results feed the trend window.
const TREND_WINDOW: usize = 10;

/// Point difference between half-averages needed to leave `Stable`.
const TREND_THRESHOLD: f64 = 5.0;

/// Direction of recent score movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        };
        write!(f, "{s}")
    }
}

/// Classify the trend of a newest-first results slice.
///
/// Takes the most recent 10 results, orders them oldest-first, and splits
/// into halves by index. `Improving` when the newer half's average
/// percentage exceeds the older half's by more than 5 points, `Declining`
/// when more than 5 lower, else `Stable`. Fewer than 2 results is `Stable`
/// by definition.
pub fn classify_trend(results: &[TestResult]) -> Trend {
    let recent: Vec<&TestResult> = results.iter().take(TREND_WINDOW).collect();
    if recent.len() < 2 {
        return Trend::Stable;
    }

    let chronological: Vec<f64> = recent
        .iter()
        .rev()
        .map(|r| r.percentage as f64)
        .collect();
    let mid = chronological.len() / 2;
    let older = average(&chronological[..mid]);
    let newer = average(&chronological[mid..]);

    let delta = newer - older;
    if delta > TREND_THRESHOLD {
        Trend::Improving
    } else if delta < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

pub(crate) fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to one decimal place for display-facing averages.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
