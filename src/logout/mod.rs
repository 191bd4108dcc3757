//! # Admin Logout
//!
//! Ends the admin panel session: read the CSRF token from the cookie store,
//! post to `/admin/logout`, show the panel's `errmsg`, reload the page.
//!
//! Every successful reply takes the same alert-then-reload path, whatever the
//! message says. Transport failures, non-2xx statuses and undecodable bodies
//! come back as errors instead; in those cases nothing is shown, nothing is
//! reloaded and the request is not retried.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::AdminClient;
use crate::cookie::{CookieStore, CSRF_COOKIE_NAME};
use crate::errors::Result;
use crate::ui::PanelUi;

/// Endpoint that ends the admin session
pub const LOGOUT_PATH: &str = "/admin/logout";

/// Header the panel's CSRF protection reads the token from (`X-CSRFToken`)
pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

/// Reply body of the logout endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutResponse {
    /// Message meant for the operator
    pub errmsg: String,

    /// Status code the panel attaches to JSON replies, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errno: Option<String>,
}

/// What a completed logout produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// The message shown to the operator
    pub message: String,
    /// Status of the page reload
    pub reload_status: StatusCode,
}

/// Logout flow with its collaborators injected
#[derive(Clone)]
pub struct LogoutAction {
    client: AdminClient,
    cookies: Arc<dyn CookieStore>,
    ui: Arc<dyn PanelUi>,
}

impl LogoutAction {
    pub fn new(client: AdminClient, cookies: Arc<dyn CookieStore>, ui: Arc<dyn PanelUi>) -> Self {
        Self { client, cookies, ui }
    }

    /// Run the logout to completion
    pub async fn logout(&self) -> Result<LogoutOutcome> {
        let headers = self.csrf_headers();

        let response: LogoutResponse = self.client.post_empty_json(LOGOUT_PATH, headers).await?;
        debug!(errno = ?response.errno, "Logout answered");

        self.ui.alert(&response.errmsg);
        let reload_status = self.ui.reload().await?;

        info!(message = %response.errmsg, %reload_status, "Logout completed");
        Ok(LogoutOutcome { message: response.errmsg, reload_status })
    }

    /// Start the logout in the background and return immediately
    ///
    /// Must be called from within a tokio runtime. The handle resolves once,
    /// after the reload (or the first failure); dropping it does not cancel
    /// the request.
    pub fn trigger(&self) -> JoinHandle<Result<LogoutOutcome>> {
        let action = self.clone();
        tokio::spawn(async move { action.logout().await })
    }

    fn csrf_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        match self.cookies.get(CSRF_COOKIE_NAME) {
            Some(token) => match HeaderValue::from_str(&token) {
                Ok(value) => {
                    headers.insert(CSRF_HEADER, value);
                }
                Err(err) => warn!(
                    error = %err,
                    "CSRF token is not a valid header value; sending logout without it"
                ),
            },
            None => warn!(cookie = CSRF_COOKIE_NAME, "No CSRF token cookie; sending logout without it"),
        }

        headers
    }
}

impl std::fmt::Debug for LogoutAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoutAction").field("base_url", &self.client.base_url()).finish()
    }
}
