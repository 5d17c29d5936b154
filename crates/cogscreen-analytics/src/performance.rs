//! Performance statistics: improvement series, per-test counts, monthly
//! averages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cogscreen_store::result::TestResult;

use crate::trend::{average, round1};

/// How many recent results the improvement series charts.
const SERIES_WINDOW: usize = 10;

/// The statistics view behind the progress screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Most recent 10 results, oldest first, ready for a trend chart.
    pub improvement_trend: Vec<TrendPoint>,
    /// Attempt count per test name.
    pub tests_breakdown: BTreeMap<String, usize>,
    /// Average percentage per "YYYY-MM" bucket, chronological.
    pub monthly_progress: Vec<MonthlyAverage>,
}

/// One charted attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub test_number: u32,
    pub test_name: String,
    pub percentage: u32,
    pub date: String,
}

/// One month's aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAverage {
    /// "YYYY-MM".
    pub month: String,
    pub average_percentage: f64,
    pub attempts: usize,
}

/// Reduce a newest-first results slice into performance statistics.
pub fn performance_stats(results: &[TestResult]) -> PerformanceStats {
    let improvement_trend: Vec<TrendPoint> = results
        .iter()
        .take(SERIES_WINDOW)
        .rev()
        .map(|r| TrendPoint {
            test_number: r.test_number,
            test_name: r.test_name.clone(),
            percentage: r.percentage,
            date: r.date.clone(),
        })
        .collect();

    let mut tests_breakdown = BTreeMap::new();
    for r in results {
        *tests_breakdown.entry(r.test_name.clone()).or_insert(0) += 1;
    }

    // BTreeMap keys sort "YYYY-MM" lexicographically == chronologically
    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for r in results {
        buckets
            .entry(r.timestamp.format("%Y-%m").to_string())
            .or_default()
            .push(r.percentage as f64);
    }
    let monthly_progress = buckets
        .into_iter()
        .map(|(month, scores)| MonthlyAverage {
            month,
            average_percentage: round1(average(&scores)),
            attempts: scores.len(),
        })
        .collect();

    PerformanceStats {
        improvement_trend,
        tests_breakdown,
        monthly_progress,
    }
}
