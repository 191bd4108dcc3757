//! # admin-logout
//!
//! Client side of the admin panel's logout: read the CSRF token from the
//! cookies, post it to `/admin/logout`, show the panel's reply and reload the
//! page.
//!
//! ```text
//! CookieStore ──> LogoutAction ──> AdminClient ──> POST /admin/logout
//!                      │
//!                      └──> PanelUi (alert, then reload)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use admin_logout::{AdminClient, ClientConfig, LogoutAction, Result, TerminalUi};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = AdminClient::with_cookies(
//!         ClientConfig::default(),
//!         Some("csrf_token=IjE2YjM; session=s1"),
//!     )?;
//!     let ui = TerminalUi::new(client.clone(), "/admin/index");
//!     let action = LogoutAction::new(client.clone(), Arc::new(client.cookie_store()), Arc::new(ui));
//!
//!     let outcome = action.logout().await?;
//!     println!("{}", outcome.message);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod cookie;
pub mod errors;
pub mod logout;
pub mod ui;

pub use client::{AdminClient, ClientConfig};
pub use cookie::{get_cookie, CookieStore, JarCookies, StaticCookies, CSRF_COOKIE_NAME};
pub use errors::{Error, Result};
pub use logout::{LogoutAction, LogoutOutcome, LogoutResponse, CSRF_HEADER, LOGOUT_PATH};
pub use ui::{PanelUi, TerminalUi};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
