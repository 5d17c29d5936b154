use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use comfy_table::{Cell, Table};

use cogscreen_core::model::Category;

use crate::config::load_config;

pub fn execute(category: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let catalog = super::load_catalog(&config)?;

    let tests: Vec<_> = match &category {
        Some(raw) => {
            let category = Category::from_str(raw).map_err(|e| anyhow::anyhow!(e))?;
            catalog.tests_by_category(category)
        }
        None => catalog.tests().iter().collect(),
    };

    if tests.is_empty() {
        println!("No tests found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Id",
        "Name",
        "Category",
        "Difficulty",
        "Duration",
        "Questions",
        "Max score",
    ]);
    for test in &tests {
        table.add_row(vec![
            Cell::new(&test.id),
            Cell::new(&test.name),
            Cell::new(test.category),
            Cell::new(test.difficulty),
            Cell::new(format!("{} min", test.duration_minutes)),
            Cell::new(test.questions.len()),
            Cell::new(test.scoring.total_points),
        ]);
    }
    println!("{table}");
    println!("\n{} test(s)", tests.len());

    Ok(())
}
