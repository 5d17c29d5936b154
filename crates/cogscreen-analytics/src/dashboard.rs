//! Dashboard summary aggregation.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use cogscreen_store::result::TestResult;

use crate::trend::{average, classify_trend, round1, Trend};

/// How many top-performing tests the summary carries.
const TOP_TESTS: usize = 5;

/// The at-a-glance view the dashboard screen renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// All-time attempt count.
    pub total_tests: usize,
    /// Attempts within a rolling 7-day window from "now".
    pub tests_this_week: usize,
    /// Attempts within a rolling 30-day window from "now".
    pub tests_this_month: usize,
    /// Mean percentage across all results, one decimal.
    pub average_score: f64,
    pub trend: Trend,
    /// Top 5 tests by average percentage; ties keep first-seen order.
    pub top_tests: Vec<TestAverage>,
    /// Attempt count per severity label.
    pub severity_breakdown: BTreeMap<String, usize>,
}

/// Average performance of one test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestAverage {
    pub test_name: String,
    pub average_percentage: f64,
    pub attempts: usize,
}

/// Reduce a newest-first results slice into the dashboard summary.
pub fn dashboard_summary(results: &[TestResult], now: DateTime<Utc>) -> DashboardSummary {
    let week_start = now - Duration::days(7);
    let month_start = now - Duration::days(30);

    let tests_this_week = results.iter().filter(|r| r.timestamp > week_start).count();
    let tests_this_month = results.iter().filter(|r| r.timestamp > month_start).count();

    let percentages: Vec<f64> = results.iter().map(|r| r.percentage as f64).collect();
    let average_score = round1(average(&percentages));

    let mut severity_breakdown = BTreeMap::new();
    for r in results {
        *severity_breakdown
            .entry(r.severity.label().to_string())
            .or_insert(0) += 1;
    }

    DashboardSummary {
        total_tests: results.len(),
        tests_this_week,
        tests_this_month,
        average_score,
        trend: classify_trend(results),
        top_tests: top_tests(results),
        severity_breakdown,
    }
}

/// Top tests by average percentage. Grouping follows first appearance in
/// the slice; the stable sort keeps that order on ties.
fn top_tests(results: &[TestResult]) -> Vec<TestAverage> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for r in results {
        if !grouped.contains_key(&r.test_name) {
            order.push(r.test_name.clone());
        }
        grouped
            .entry(r.test_name.clone())
            .or_default()
            .push(r.percentage as f64);
    }

    let mut averages: Vec<TestAverage> = order
        .into_iter()
        .map(|name| {
            let scores = &grouped[&name];
            TestAverage {
                average_percentage: round1(average(scores)),
                attempts: scores.len(),
                test_name: name,
            }
        })
        .collect();

    averages.sort_by(|a, b| {
        b.average_percentage
            .partial_cmp(&a.average_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    averages.truncate(TOP_TESTS);
    averages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{base_time, result_at, results_with_percentages};
    use chrono::Duration;
    use cogscreen_core::model::Severity;

    #[test]
    fn empty_collection() {
        let summary = dashboard_summary(&[], base_time());
        assert_eq!(summary.total_tests, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.trend, Trend::Stable);
        assert!(summary.top_tests.is_empty());
        assert!(summary.severity_breakdown.is_empty());
    }

    #[test]
    fn documented_improving_scenario() {
        let results = results_with_percentages(&[65, 72, 78, 82, 85]);
        let now = results[0].timestamp + Duration::hours(1);
        let summary = dashboard_summary(&results, now);

        assert_eq!(summary.total_tests, 5);
        assert_eq!(summary.trend, Trend::Improving);
        assert_eq!(summary.average_score, 76.4);
        assert_eq!(summary.tests_this_week, 5);
    }

    #[test]
    fn rolling_windows() {
        let now = base_time();
        let results = vec![
            result_at("mmse", 80, Severity::Normal, now - Duration::days(1), 3),
            result_at("mmse", 70, Severity::Normal, now - Duration::days(10), 2),
            result_at("mmse", 60, Severity::Mild, now - Duration::days(45), 1),
        ];
        let summary = dashboard_summary(&results, now);

        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.tests_this_week, 1);
        assert_eq!(summary.tests_this_month, 2);
    }

    #[test]
    fn severity_breakdown_counts_labels() {
        let now = base_time();
        let results = vec![
            result_at("mmse", 85, Severity::Normal, now, 3),
            result_at("moca", 70, Severity::Mild, now, 2),
            result_at("mmse", 90, Severity::Normal, now, 1),
        ];
        let summary = dashboard_summary(&results, now);
        assert_eq!(summary.severity_breakdown["normal"], 2);
        assert_eq!(summary.severity_breakdown["mild"], 1);
        assert!(!summary.severity_breakdown.contains_key("severe"));
    }

    #[test]
    fn top_tests_sorted_capped_and_tie_stable() {
        let now = base_time();
        let mut results = Vec::new();
        // six distinct tests; "t1" and "t2" tie on average
        for (i, (name, pct)) in [
            ("t1", 80),
            ("t2", 80),
            ("t3", 90),
            ("t4", 50),
            ("t5", 60),
            ("t6", 70),
        ]
        .iter()
        .enumerate()
        {
            results.push(result_at(name, *pct, Severity::Normal, now, i as u32 + 1));
        }
        let summary = dashboard_summary(&results, now);

        assert_eq!(summary.top_tests.len(), 5);
        assert_eq!(summary.top_tests[0].test_name, "T3");
        // tie between t1 and t2 keeps first-seen order
        assert_eq!(summary.top_tests[1].test_name, "T1");
        assert_eq!(summary.top_tests[2].test_name, "T2");
        // the weakest test fell off the list
        assert!(!summary.top_tests.iter().any(|t| t.test_name == "T4"));
    }

    #[test]
    fn per_test_average() {
        let now = base_time();
        let results = vec![
            result_at("mmse", 70, Severity::Normal, now, 2),
            result_at("mmse", 81, Severity::Normal, now, 1),
        ];
        let summary = dashboard_summary(&results, now);
        assert_eq!(summary.top_tests[0].average_percentage, 75.5);
        assert_eq!(summary.top_tests[0].attempts, 2);
    }
}
