//! Configuration management CLI commands
//!
//! Provides commands for managing ~/.admin-logout/config.toml

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use super::config::CliConfig;
use super::output::{self, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize configuration file with default values
    Init {
        /// Overwrite existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration
    Show {
        /// Output format (json, yaml, or table)
        #[arg(short, long, default_value = "yaml")]
        output: OutputFormat,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (base_url, cookie, timeout, or reload_path)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get configuration file path
    Path,
}

/// Handle config commands against the default config file
pub fn handle_config_command(command: ConfigCommands) -> Result<()> {
    let path = CliConfig::config_path()?;
    run_config_command(command, &path)
}

/// Handle config commands against the config file at `path`
pub fn run_config_command(command: ConfigCommands, path: &Path) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => init_config(path, force)?,
        ConfigCommands::Show { output } => show_config(path, output)?,
        ConfigCommands::Set { key, value } => set_config(path, &key, &value)?,
        ConfigCommands::Path => println!("{}", path.display()),
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at: {}\nUse --force to overwrite",
            path.display()
        );
    }

    CliConfig::default().save_to_path(path)?;

    println!("✅ Configuration file created at: {}", path.display());
    println!("\nYou can now set values using:");
    println!("  admin-logout config set base_url <panel-url>");
    println!("  admin-logout config set cookie '<name=value; ...>'");
    println!("  admin-logout config set timeout <seconds>");

    Ok(())
}

fn show_config(path: &Path, format: OutputFormat) -> Result<()> {
    if !path.exists() {
        println!("No configuration file found at: {}", path.display());
        println!("\nRun 'admin-logout config init' to create one");
        return Ok(());
    }

    let config = CliConfig::load_from_path(path)?;

    match format {
        OutputFormat::Table => print_config_table(&config, path),
        _ => println!("{}", output::render(&config, format)?),
    }

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = CliConfig::load_from_path(path).unwrap_or_default();
    config.set(key, value)?;
    config.save_to_path(path)?;

    println!("✅ {} set", key);
    println!("Configuration saved to: {}", path.display());

    Ok(())
}

fn print_config_table(config: &CliConfig, path: &Path) {
    let not_set = "<not set>";

    println!();
    println!("{:<15} {:<50}", "Key", "Value");
    output::print_separator(65);

    println!("{:<15} {}", "base_url", config.base_url.as_deref().unwrap_or(not_set));
    println!("{:<15} {}", "cookie", config.cookie.as_deref().unwrap_or(not_set));
    println!(
        "{:<15} {}",
        "timeout",
        config.timeout.map(|t| format!("{} seconds", t)).unwrap_or_else(|| not_set.to_string())
    );
    println!("{:<15} {}", "reload_path", config.reload_path.as_deref().unwrap_or(not_set));

    println!();
    println!("Config file: {}", path.display());
    println!();
}
