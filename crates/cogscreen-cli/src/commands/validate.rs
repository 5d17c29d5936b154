use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cogscreen_core::parser::{parse_test_file, validate_test};

pub fn execute(path: PathBuf) -> Result<()> {
    let files = collect_toml_files(&path)?;
    if files.is_empty() {
        anyhow::bail!("No .toml test files found at {}", path.display());
    }

    let mut failures = 0;
    for file in &files {
        match parse_test_file(file) {
            Ok(test) => {
                let warnings = validate_test(&test);
                if warnings.is_empty() {
                    println!("✓ {} ({})", file.display(), test.id);
                } else {
                    println!("⚠ {} ({})", file.display(), test.id);
                    for warning in warnings {
                        match warning.question_id {
                            Some(id) => println!("    [{}] {}", id, warning.message),
                            None => println!("    {}", warning.message),
                        }
                    }
                }
            }
            Err(e) => {
                failures += 1;
                println!("✗ {}: {e:#}", file.display());
            }
        }
    }

    println!("\n{} file(s) checked, {failures} failed", files.len());
    if failures > 0 {
        anyhow::bail!("{failures} test file(s) failed to parse");
    }
    Ok(())
}

fn collect_toml_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("No such file or directory: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)
        .with_context(|| format!("Failed to read directory: {}", path.display()))?
    {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.is_dir() {
            files.extend(collect_toml_files(&entry_path)?);
        } else if entry_path.extension().is_some_and(|ext| ext == "toml") {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}
