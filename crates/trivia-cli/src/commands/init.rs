//! The `trivia init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("trivia.toml").exists() {
        println!("trivia.toml already exists, skipping.");
    } else {
        std::fs::write("trivia.toml", SAMPLE_CONFIG)?;
        println!("Created trivia.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit trivia.toml to pick a username or category");
    println!("  2. Run: trivia play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# trivia configuration

base_url = "https://opentdb.com"
username = "${USER}"

# Open Trivia DB category id (e.g. 9 = General Knowledge); omit for any
# category = 9

amount_per_tier = 10
max_questions = 10

# Fetch retries per difficulty tier
max_attempts = 5
base_delay_ms = 2000
request_timeout_secs = 10
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_source::TriviaConfig;

    #[test]
    fn sample_config_parses() {
        let config: TriviaConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.max_questions, 10);
        assert_eq!(config.category, None);
        assert_eq!(config.username, "${USER}");
    }
}
