//! # Cookie Access
//!
//! Reads named values out of a cookie string and abstracts where that string
//! comes from. The logout flow never touches process-wide cookie state; it is
//! handed a [`CookieStore`] instead.

use std::sync::Arc;

use regex::Regex;
use reqwest::cookie::Jar;
use tracing::{trace, warn};
use url::Url;

/// Name of the cookie carrying the CSRF token issued by the admin panel
pub const CSRF_COOKIE_NAME: &str = "csrf_token";

/// Extract the value of the cookie `name` from a `;`-delimited cookie string.
///
/// The lookup is a `\b<name>=([^;]*)\b` pattern search returning the first
/// capture. Word boundaries are ASCII-only, as in a browser's regex engine,
/// so a value ending in non-ASCII letters is cut back like any other
/// non-word tail. `name` is interpolated as-is: regex metacharacters in it are not
/// escaped, and a name that does not compile yields `None`.
///
/// The trailing word boundary means a value ending in non-word characters is
/// cut back to its last word character.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    let pattern = format!(r"(?-u:\b){}=([^;]*)(?-u:\b)", name);
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            warn!(cookie = name, error = %err, "Cookie name does not form a valid pattern");
            return None;
        }
    };

    re.captures(cookies).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Source of the cookie string visible to the admin panel
pub trait CookieStore: Send + Sync {
    /// The full cookie string, or `None` when there are no cookies at all
    fn cookie_string(&self) -> Option<String>;

    /// Look up a single cookie by name, reading the store afresh
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookie_string()?;
        trace!(cookie = name, "Looking up cookie");
        get_cookie(&cookies, name)
    }
}

/// A fixed cookie string, e.g. copied out of a browser session
#[derive(Debug, Clone, Default)]
pub struct StaticCookies {
    cookies: String,
}

impl StaticCookies {
    pub fn new<S: Into<String>>(cookies: S) -> Self {
        Self { cookies: cookies.into() }
    }
}

impl CookieStore for StaticCookies {
    fn cookie_string(&self) -> Option<String> {
        if self.cookies.trim().is_empty() {
            None
        } else {
            Some(self.cookies.clone())
        }
    }
}

/// Cookies held by the HTTP client's jar for the admin panel URL.
///
/// The jar is shared with [`crate::client::AdminClient`], so cookies the
/// server sets on one response are visible to the next lookup.
#[derive(Debug, Clone)]
pub struct JarCookies {
    jar: Arc<Jar>,
    url: Url,
}

impl JarCookies {
    pub fn new(jar: Arc<Jar>, url: Url) -> Self {
        Self { jar, url }
    }
}

impl CookieStore for JarCookies {
    fn cookie_string(&self) -> Option<String> {
        use reqwest::cookie::CookieStore as _;

        self.jar
            .cookies(&self.url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }
}

/// Add every `name=value` pair of a cookie string to `jar` for `url`
pub fn seed_jar(jar: &Jar, cookies: &str, url: &Url) {
    for pair in cookies.split(';').map(str::trim).filter(|pair| pair.contains('=')) {
        jar.add_cookie_str(pair, url);
    }
}
