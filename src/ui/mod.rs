//! # Panel UI Effects
//!
//! The two things the admin page does once a logout has been answered: show
//! the server's message and reload itself. [`PanelUi`] keeps both behind a
//! seam so the logout flow can run against a terminal or a test recorder.

use async_trait::async_trait;
use owo_colors::OwoColorize;
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::client::AdminClient;
use crate::errors::Result;

/// User-facing side effects of the logout flow
#[async_trait]
pub trait PanelUi: Send + Sync {
    /// Show a message to the operator and wait until it has been shown
    fn alert(&self, message: &str);

    /// Load the current page anew, discarding client-side state
    async fn reload(&self) -> Result<StatusCode>;
}

/// Prints alerts to stdout and reloads by fetching the page again
#[derive(Debug, Clone)]
pub struct TerminalUi {
    client: AdminClient,
    page: String,
}

impl TerminalUi {
    pub fn new<S: Into<String>>(client: AdminClient, page: S) -> Self {
        Self { client, page: page.into() }
    }

    /// Path fetched on reload
    pub fn page(&self) -> &str {
        &self.page
    }
}

#[async_trait]
impl PanelUi for TerminalUi {
    fn alert(&self, message: &str) {
        println!("{}", message.bright_yellow());
    }

    async fn reload(&self) -> Result<StatusCode> {
        let status = self.client.fetch_status(&self.page).await?;

        if status.is_success() {
            info!(page = %self.page, %status, "Page reloaded");
            println!("{} {} ({})", "Reloaded".green(), self.page, status);
        } else {
            // Once the session is gone the panel bounces admin pages elsewhere.
            warn!(page = %self.page, %status, "Page reload did not return success");
            println!("{} {} ({})", "Reloaded".yellow(), self.page, status);
        }

        Ok(status)
    }
}
