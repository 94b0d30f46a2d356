//! `enrollwise config`: configuration management commands.

use std::path::Path;

use enrollwise_config::EnrollConfig;

use crate::input::load_config;

pub async fn validate(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match load_config(config_path) {
        Ok(config) => {
            println!("   ✅ Config parsed and validated");

            let mut warnings = Vec::new();
            let today = config.effective_today();
            if config.catalog.schedule.is_empty() {
                warnings.push("No course schedule configured; prompts will not list start dates".to_string());
            } else if config.catalog.upcoming_courses(today).is_empty() {
                warnings.push(format!("Every scheduled course starts before {today}"));
            }
            if config.catalog.pricing.is_empty() {
                warnings.push("No pricing table configured".to_string());
            }
            if !config.use_summarizer {
                warnings.push("Summarizer disabled; older turns always use the local digest".to_string());
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   School:    {}", config.catalog.school_name);
            println!("   Campuses:  {}", config.catalog.campuses.len());
            println!("   Programs:  {}", config.catalog.programs.len());
            println!("   Window:    {} turns", config.window_size);
            println!("   Passages:  {} of top {}", config.max_passages, config.top_k);
            println!("   Today:     {today}");
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e);
        }
    }

    Ok(())
}

pub async fn show(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", config.to_toml());
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = EnrollConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
