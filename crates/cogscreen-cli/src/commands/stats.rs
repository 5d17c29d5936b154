use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use cogscreen_analytics::performance_stats;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (_config, store) = super::open_configured_store(config_path.as_deref()).await?;

    let results = store.all();
    if results.is_empty() {
        println!("No results yet. Take a test first.");
        return Ok(());
    }

    let stats = performance_stats(&results);

    println!("Recent attempts:");
    let mut table = Table::new();
    table.set_header(vec!["#", "Test", "%", "Date"]);
    for point in &stats.improvement_trend {
        table.add_row(vec![
            Cell::new(point.test_number),
            Cell::new(&point.test_name),
            Cell::new(point.percentage),
            Cell::new(&point.date),
        ]);
    }
    println!("{table}");

    println!("\nAttempts per test:");
    for (name, count) in &stats.tests_breakdown {
        println!("  {name}: {count}");
    }

    if !stats.monthly_progress.is_empty() {
        println!("\nMonthly averages:");
        for month in &stats.monthly_progress {
            println!(
                "  {}: {}% over {} attempt(s)",
                month.month, month.average_percentage, month.attempts
            );
        }
    }

    Ok(())
}
