//! `loopkit status` — show configuration and provider status.
//!
//! - Shows config path, model, loop parameters
//! - Shows API key / base URL status for each provider

use anyhow::Result;
use colored::Colorize;

use loopkit_core::config::{get_config_path, load_config};
use loopkit_endpoints::{registry::match_provider, PRESETS};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🔁 Loopkit Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Model
    println!("  {:<18} {}", "Model:".bold(), config.defaults.model);

    // Loop parameters
    println!(
        "  {:<18} {} | {} | {}",
        "Parameters:".bold(),
        format!("max_steps: {}", config.defaults.max_steps).dimmed(),
        format!("temp: {}", config.defaults.temperature).dimmed(),
        format!("max_tokens: {}", config.defaults.max_tokens).dimmed(),
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());

    for preset in PRESETS {
        let status = match config.providers.get(preset.name) {
            Some(prov) if preset.is_local && prov.api_base.is_some() => {
                format!(
                    "{} ({})",
                    "✓".green(),
                    prov.api_base.as_deref().unwrap_or_default()
                )
            }
            Some(prov) if prov.is_configured() => format!("{} (key set)", "✓".green()),
            _ => format!("{}", "· not configured".dimmed()),
        };
        println!("    {:<20} {}", preset.display_name, status);
    }

    // Active endpoint
    println!();
    match match_provider(&config.providers) {
        Some((preset, _)) => {
            println!("  {:<18} {}", "Active:".bold(), preset.display_name);
        }
        None => {
            println!(
                "  {:<18} {}",
                "Active:".bold(),
                "none — set an API key (or a local apiBase) in config".red()
            );
        }
    }

    println!();

    Ok(())
}
