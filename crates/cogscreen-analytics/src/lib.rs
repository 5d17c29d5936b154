//! cogscreen-analytics — Derived views over the results collection.
//!
//! Pure reductions: every function takes the results slice the store hands
//! out (newest first) plus, where windows matter, an explicit "now", and
//! returns a freshly computed view. Nothing here holds state or does I/O.

pub mod dashboard;
pub mod performance;
pub mod trend;

#[cfg(test)]
pub(crate) mod test_support;

pub use dashboard::{dashboard_summary, DashboardSummary, TestAverage};
pub use performance::{performance_stats, MonthlyAverage, PerformanceStats, TrendPoint};
pub use trend::{classify_trend, Trend};
