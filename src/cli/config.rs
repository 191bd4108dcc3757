//! Configuration file handling for the admin-logout CLI
//!
//! Manages loading and saving CLI configuration from ~/.admin-logout/config.toml
//! and resolving the panel URL and cookies from multiple sources.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default admin panel address (the panel's development server)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Page reloaded after a logout: the admin home page
pub const DEFAULT_RELOAD_PATH: &str = "/admin/index";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "ADMIN_LOGOUT_BASE_URL";

/// Environment variable holding a cookie string
pub const COOKIE_ENV: &str = "ADMIN_LOGOUT_COOKIE";

/// CLI configuration stored in ~/.admin-logout/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the admin panel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Cookie string as the browser would expose it (`a=1; b=2`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Page fetched after a logout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reload_path: Option<String>,
}

impl CliConfig {
    /// Get the default configuration file path (~/.admin-logout/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Unable to determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".admin-logout");
        path.push("config.toml");

        Ok(path)
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Set a key from its string form, as `config set` receives it
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => self.base_url = Some(value.to_string()),
            "cookie" => self.cookie = Some(value.to_string()),
            "timeout" => {
                let timeout: u64 = value
                    .parse()
                    .context("Invalid timeout value. Must be a number in seconds")?;
                self.timeout = Some(timeout);
            }
            "reload_path" => self.reload_path = Some(value.to_string()),
            _ => anyhow::bail!(
                "Unknown configuration key: '{}'. Valid keys: base_url, cookie, timeout, reload_path",
                key
            ),
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the cookie string from multiple sources
///
/// Checks sources in the following priority order:
/// 1. --cookie command line flag
/// 2. --cookie-file command line flag
/// 3. config file
/// 4. ADMIN_LOGOUT_COOKIE environment variable
///
/// Having no cookies is not an error: the logout request goes out without a
/// CSRF token and the panel decides.
pub fn resolve_cookie(
    cookie_flag: Option<String>,
    cookie_file_flag: Option<PathBuf>,
    config: &CliConfig,
) -> Result<Option<String>> {
    if let Some(cookie) = cookie_flag {
        debug!("Using cookies from --cookie flag");
        return Ok(Some(cookie));
    }

    if let Some(cookie_file) = cookie_file_flag {
        debug!("Reading cookies from file: {}", cookie_file.display());
        let cookie = std::fs::read_to_string(&cookie_file)
            .with_context(|| format!("Failed to read cookie file: {}", cookie_file.display()))?
            .trim()
            .to_string();

        if cookie.is_empty() {
            anyhow::bail!("Cookie file is empty: {}", cookie_file.display());
        }

        return Ok(Some(cookie));
    }

    if let Some(cookie) = non_empty(config.cookie.clone()) {
        debug!("Using cookies from config file");
        return Ok(Some(cookie));
    }

    if let Some(cookie) = non_empty(std::env::var(COOKIE_ENV).ok()) {
        debug!("Using cookies from {} environment variable", COOKIE_ENV);
        return Ok(Some(cookie));
    }

    debug!("No cookies configured");
    Ok(None)
}

/// Resolve the base URL from multiple sources
///
/// Checks sources in the following priority order:
/// 1. --base-url command line flag
/// 2. config file
/// 3. ADMIN_LOGOUT_BASE_URL environment variable
/// 4. Default: http://127.0.0.1:5000
pub fn resolve_base_url(base_url_flag: Option<String>, config: &CliConfig) -> String {
    if let Some(url) = base_url_flag {
        debug!("Using base URL from --base-url flag: {}", url);
        return url;
    }

    if let Some(url) = non_empty(config.base_url.clone()) {
        debug!("Using base URL from config file: {}", url);
        return url;
    }

    if let Some(url) = non_empty(std::env::var(BASE_URL_ENV).ok()) {
        debug!("Using base URL from {} environment variable: {}", BASE_URL_ENV, url);
        return url;
    }

    debug!("Using default base URL: {}", DEFAULT_BASE_URL);
    DEFAULT_BASE_URL.to_string()
}

/// Resolve the timeout: --timeout flag, then config file, then 30 seconds
pub fn resolve_timeout(timeout_flag: Option<u64>, config: &CliConfig) -> u64 {
    if let Some(timeout) = timeout_flag {
        debug!("Using timeout from --timeout flag: {} seconds", timeout);
        return timeout;
    }

    if let Some(timeout) = config.timeout {
        debug!("Using timeout from config file: {} seconds", timeout);
        return timeout;
    }

    DEFAULT_TIMEOUT
}

/// Resolve the reload page: --reload-path flag, then config file, then /admin/index
pub fn resolve_reload_path(reload_path_flag: Option<String>, config: &CliConfig) -> String {
    reload_path_flag
        .or_else(|| non_empty(config.reload_path.clone()))
        .unwrap_or_else(|| DEFAULT_RELOAD_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = CliConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.cookie.is_none());
        assert!(config.timeout.is_none());
        assert!(config.reload_path.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            base_url = "http://panel.example.com"
            cookie = "csrf_token=abc123; session=s1"
            timeout = 60
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://panel.example.com"));
        assert_eq!(config.cookie.as_deref(), Some("csrf_token=abc123; session=s1"));
        assert_eq!(config.timeout, Some(60));
        assert!(config.reload_path.is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = CliConfig {
            base_url: Some("http://panel.example.com".to_string()),
            cookie: Some("csrf_token=abc123".to_string()),
            timeout: Some(5),
            reload_path: Some("/admin/".to_string()),
        };

        config.save_to_path(&config_path).unwrap();
        assert!(config_path.exists());

        let loaded = CliConfig::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.base_url, config.base_url);
        assert_eq!(loaded.cookie, config.cookie);
        assert_eq!(loaded.timeout, config.timeout);
        assert_eq!(loaded.reload_path, config.reload_path);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = CliConfig::load_from_path(&temp_dir.path().join("missing.toml")).unwrap();
        assert!(loaded.base_url.is_none());
    }

    #[test]
    fn test_config_set() {
        let mut config = CliConfig::default();
        config.set("timeout", "12").unwrap();
        config.set("cookie", "csrf_token=x").unwrap();
        assert_eq!(config.timeout, Some(12));
        assert_eq!(config.cookie.as_deref(), Some("csrf_token=x"));

        assert!(config.set("timeout", "soon").is_err());
        assert!(config.set("token", "x").is_err());
    }

    #[test]
    fn test_resolve_cookie_flag_wins() {
        let config = CliConfig { cookie: Some("csrf_token=config".to_string()), ..Default::default() };
        let cookie =
            resolve_cookie(Some("csrf_token=flag".to_string()), None, &config).unwrap();
        assert_eq!(cookie.as_deref(), Some("csrf_token=flag"));
    }

    #[test]
    fn test_resolve_cookie_file_before_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cookies.txt");
        std::fs::write(&path, "csrf_token=file\n").unwrap();

        let config = CliConfig { cookie: Some("csrf_token=config".to_string()), ..Default::default() };
        let cookie = resolve_cookie(None, Some(path), &config).unwrap();
        assert_eq!(cookie.as_deref(), Some("csrf_token=file"));
    }

    #[test]
    fn test_resolve_cookie_empty_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cookies.txt");
        std::fs::write(&path, "  \n").unwrap();

        assert!(resolve_cookie(None, Some(path), &CliConfig::default()).is_err());
    }

    #[test]
    fn test_resolve_cookie_from_config() {
        let config = CliConfig { cookie: Some("csrf_token=config".to_string()), ..Default::default() };
        let cookie = resolve_cookie(None, None, &config).unwrap();
        assert_eq!(cookie.as_deref(), Some("csrf_token=config"));
    }

    #[test]
    fn test_resolve_base_url_precedence() {
        let config =
            CliConfig { base_url: Some("http://config.example".to_string()), ..Default::default() };
        assert_eq!(
            resolve_base_url(Some("http://flag.example".to_string()), &config),
            "http://flag.example"
        );
        assert_eq!(resolve_base_url(None, &config), "http://config.example");
    }

    #[test]
    fn test_resolve_timeout_and_reload_path() {
        let config = CliConfig { timeout: Some(7), ..Default::default() };
        assert_eq!(resolve_timeout(Some(3), &config), 3);
        assert_eq!(resolve_timeout(None, &config), 7);
        assert_eq!(resolve_timeout(None, &CliConfig::default()), DEFAULT_TIMEOUT);

        assert_eq!(resolve_reload_path(None, &config), DEFAULT_RELOAD_PATH);
        assert_eq!(resolve_reload_path(Some("/admin/".to_string()), &config), "/admin/");
    }
}
