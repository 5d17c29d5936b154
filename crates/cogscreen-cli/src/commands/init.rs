use std::path::Path;

use anyhow::{Context, Result};

const STARTER_CONFIG: &str = r#"# cogscreen configuration

# Where completed test results are stored.
data_file = "./cogscreen-results.json"

# User id attributed to results when --user is omitted.
default_user = "default"

# Directory of custom test definitions, merged into the built-in catalog.
tests_dir = "./custom-tests"
"#;

const EXAMPLE_TEST: &str = r#"# Example custom test definition.
# Validate with: cogscreen validate --tests ./custom-tests

[test]
id = "story-recall"
name = "Story Recall"
full_name = "Short Story Recall Test"
category = "memory"
difficulty = "easy"
duration_minutes = 7

[test.scoring]
total_points = 10
direction = "higher_is_better"

[test.scoring.cutoffs]
normal = 8
mild = 5
moderate = 2
severe = 0

[test.interpretations.normal]
text = "Story memory within the expected range."
recommendations = ["Re-screen annually."]

[test.interpretations.mild]
text = "Mildly reduced story memory."
recommendations = ["Re-screen in six months."]

[test.interpretations.moderate]
text = "Moderately reduced story memory."
recommendations = ["Discuss with a clinician."]

[test.interpretations.severe]
text = "Severely reduced story memory."
recommendations = ["Seek a clinical evaluation."]

[[questions]]
id = "immediate"
kind = "recall"
prompt = "Retell the story you just heard."
points = 5

[[questions]]
id = "delayed"
kind = "recall"
prompt = "Retell the story again after the delay."
points = 5
time_limit_secs = 120
"#;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("cogscreen.toml"), STARTER_CONFIG)?;
    std::fs::create_dir_all("custom-tests").context("Failed to create custom-tests directory")?;
    write_if_absent(Path::new("custom-tests/story-recall.toml"), EXAMPLE_TEST)?;

    println!("\nNext steps:");
    println!("  cogscreen list                     # browse the catalog");
    println!("  cogscreen show --test mmse         # inspect a test");
    println!("  cogscreen take --test mmse --answers answers.json");
    Ok(())
}

fn write_if_absent(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("Skipping {} (already exists)", path.display());
        return Ok(());
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
