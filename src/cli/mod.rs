//! # Command Line Interface
//!
//! Logs out of the admin panel from a terminal, inspects the cookies the
//! logout would use, and manages the CLI configuration file.

pub mod config;
pub mod config_cmd;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::client::{AdminClient, ClientConfig};
use crate::cookie::get_cookie;
use crate::logout::LogoutAction;
use crate::ui::TerminalUi;

#[derive(Parser, Debug)]
#[command(name = "admin-logout")]
#[command(about = "Ends an admin panel session guarded by a CSRF cookie")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the admin panel
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Cookie string as the browser holds it, e.g. 'csrf_token=...; session=...'
    #[arg(long, global = true)]
    pub cookie: Option<String>,

    /// Path to a file containing the cookie string
    #[arg(long, global = true)]
    pub cookie_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Page to reload once the logout has been answered
    #[arg(long, global = true)]
    pub reload_path: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log out of the admin panel
    Logout,

    /// Print the value of a cookie from the resolved cookie string
    Cookie {
        /// Cookie name
        #[arg(default_value = crate::cookie::CSRF_COOKIE_NAME)]
        name: String,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: config_cmd::ConfigCommands,
    },
}

/// Run CLI commands from the process arguments
pub async fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse()).await
}

/// Run an already parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    initialise_logging(cli.verbose)?;

    let cli_config = config::CliConfig::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Ignoring unreadable config file");
        config::CliConfig::default()
    });

    match cli.command {
        Commands::Logout => {
            let cookies = config::resolve_cookie(cli.cookie, cli.cookie_file, &cli_config)?;
            let client_config = ClientConfig {
                base_url: config::resolve_base_url(cli.base_url, &cli_config),
                timeout: config::resolve_timeout(cli.timeout, &cli_config),
                verbose: cli.verbose,
            };
            let reload_path = config::resolve_reload_path(cli.reload_path, &cli_config);

            let client = AdminClient::with_cookies(client_config, cookies.as_deref())?;
            let ui = TerminalUi::new(client.clone(), reload_path);
            let action =
                LogoutAction::new(client.clone(), Arc::new(client.cookie_store()), Arc::new(ui));

            action.logout().await.context("Logout failed")?;
        }
        Commands::Cookie { name } => {
            let cookies = config::resolve_cookie(cli.cookie, cli.cookie_file, &cli_config)?;
            match cookies.as_deref().and_then(|cookies| get_cookie(cookies, &name)) {
                Some(value) => println!("{}", value),
                None => anyhow::bail!("Cookie '{}' not found", name),
            }
        }
        Commands::Config { command } => config_cmd::handle_config_command(command)?,
    }

    Ok(())
}

fn initialise_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_env_filter(filter).with_writer(std::io::stderr).finish(),
    )
    .is_err()
    {
        // Subscriber already set elsewhere (e.g. integration tests); ignore.
    }
    Ok(())
}
