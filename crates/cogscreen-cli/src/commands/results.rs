use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn execute(
    test: Option<String>,
    user: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_config, store) = super::open_configured_store(config_path.as_deref()).await?;

    let mut results = match &test {
        Some(test_id) => store.by_test(test_id),
        None => store.all(),
    };
    if let Some(user_id) = &user {
        results.retain(|r| r.user_id == *user_id);
    }

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "#", "Test", "User", "Score", "%", "Severity", "Date", "Id",
    ]);
    for r in &results {
        table.add_row(vec![
            Cell::new(r.test_number),
            Cell::new(&r.test_name),
            Cell::new(&r.user_id),
            Cell::new(format!("{}/{}", r.score, r.max_score)),
            Cell::new(r.percentage),
            Cell::new(r.severity),
            Cell::new(format!("{} {}", r.date, r.time)),
            Cell::new(r.id),
        ]);
    }
    println!("{table}");
    println!("\n{} result(s)", results.len());

    Ok(())
}
