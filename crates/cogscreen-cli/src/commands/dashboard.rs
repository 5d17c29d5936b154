use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use comfy_table::{Cell, Table};

use cogscreen_analytics::dashboard_summary;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (_config, store) = super::open_configured_store(config_path.as_deref()).await?;

    let results = store.all();
    let summary = dashboard_summary(&results, Utc::now());

    println!("Tests taken: {} total", summary.total_tests);
    println!(
        "  this week: {}   this month: {}",
        summary.tests_this_week, summary.tests_this_month
    );
    println!("Average score: {}%", summary.average_score);
    println!("Trend: {}", summary.trend);

    if !summary.top_tests.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Test", "Average %", "Attempts"]);
        for t in &summary.top_tests {
            table.add_row(vec![
                Cell::new(&t.test_name),
                Cell::new(t.average_percentage),
                Cell::new(t.attempts),
            ]);
        }
        println!("\nTop tests:\n{table}");
    }

    if !summary.severity_breakdown.is_empty() {
        println!("\nSeverity breakdown:");
        for (label, count) in &summary.severity_breakdown {
            println!("  {label}: {count}");
        }
    }

    Ok(())
}
