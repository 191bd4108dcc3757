//! Shared fixtures for logout tests: a recording UI, a mutable cookie store
//! and a mock admin panel.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use admin_logout::{AdminClient, ClientConfig, CookieStore, LogoutAction, PanelUi, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use wiremock::MockServer;

/// Something the UI was asked to do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Alert(String),
    Reload,
}

/// Records alerts and reloads instead of performing them
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl PanelUi for RecordingUi {
    fn alert(&self, message: &str) {
        self.events.lock().unwrap().push(UiEvent::Alert(message.to_string()));
    }

    async fn reload(&self) -> Result<StatusCode> {
        self.events.lock().unwrap().push(UiEvent::Reload);
        Ok(StatusCode::OK)
    }
}

/// Cookie store whose contents a test can change between logouts
#[derive(Debug, Default)]
pub struct SwappableCookies {
    cookies: Mutex<String>,
}

impl SwappableCookies {
    pub fn new(cookies: &str) -> Self {
        Self { cookies: Mutex::new(cookies.to_string()) }
    }

    pub fn set(&self, cookies: &str) {
        *self.cookies.lock().unwrap() = cookies.to_string();
    }
}

impl CookieStore for SwappableCookies {
    fn cookie_string(&self) -> Option<String> {
        let cookies = self.cookies.lock().unwrap();
        if cookies.is_empty() {
            None
        } else {
            Some(cookies.clone())
        }
    }
}

/// Client pointed at the mock panel
pub fn panel_client(server: &MockServer, timeout: u64) -> AdminClient {
    let config = ClientConfig { base_url: server.uri(), timeout, verbose: true };
    AdminClient::new(config).expect("client for mock panel")
}

/// Logout action wired to the mock panel, a cookie store and a recording UI
pub fn logout_action(
    server: &MockServer,
    cookies: Arc<dyn CookieStore>,
) -> (LogoutAction, Arc<RecordingUi>) {
    let ui = Arc::new(RecordingUi::default());
    let action = LogoutAction::new(panel_client(server, 5), cookies, ui.clone());
    (action, ui)
}
