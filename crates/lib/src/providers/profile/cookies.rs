//! # Cookie Export Loading
//!
//! Restores a browser session from a JSON cookie export (the format written by
//! common "export cookies" browser extensions) into a `reqwest` cookie jar.

use crate::errors::ScoutError;
use chrono::DateTime;
use reqwest::{cookie::Jar, Url};
use serde::Deserialize;
use std::path::Path;

/// The name of the session cookie whose value doubles as the CSRF token.
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// One cookie as it appears in a browser export.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedCookie {
    pub domain: String,
    pub name: String,
    pub value: String,
    pub path: String,
    pub secure: bool,
    #[serde(default)]
    pub expiration_date: Option<f64>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub same_site: Option<String>,
    #[serde(default)]
    pub host_only: bool,
}

impl ExportedCookie {
    /// Renders the cookie as a `Set-Cookie` header value.
    pub fn to_set_cookie(&self) -> String {
        let mut header = format!("{}={}; Path={}", self.name, self.value, self.path);
        if !self.host_only {
            header.push_str(&format!("; Domain={}", self.domain.trim_start_matches('.')));
        }
        if let Some(expires) = self
            .expiration_date
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
        {
            header.push_str(&format!(
                "; Expires={}",
                expires.format("%a, %d %b %Y %H:%M:%S GMT")
            ));
        }
        if self.secure {
            header.push_str("; Secure");
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        if let Some(same_site) = self.same_site_attribute() {
            header.push_str(&format!("; SameSite={same_site}"));
        }
        header
    }

    /// Maps the export's `sameSite` value to a `SameSite` attribute.
    /// `unspecified` and unknown values render nothing.
    fn same_site_attribute(&self) -> Option<&'static str> {
        match self.same_site.as_deref()?.to_ascii_lowercase().as_str() {
            "no_restriction" | "none" => Some("None"),
            "lax" => Some("Lax"),
            "strict" => Some("Strict"),
            _ => None,
        }
    }

    /// The origin the cookie was set from, used as the jar insertion URL.
    pub fn origin(&self) -> Result<Url, ScoutError> {
        let host = self.domain.trim_start_matches('.');
        let scheme = if self.secure { "https" } else { "http" };
        Url::parse(&format!("{scheme}://{host}{}", self.path))
            .map_err(|_| ScoutError::CookieDomain(self.domain.clone()))
    }

    /// The cookie value with surrounding double quotes removed.
    pub fn unquoted_value(&self) -> &str {
        self.value.trim_matches('"')
    }
}

/// Reads and parses a cookie export file.
pub fn load_cookie_export(path: impl AsRef<Path>) -> Result<Vec<ExportedCookie>, ScoutError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ScoutError::CookieFile {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Builds a cookie jar holding every exported cookie.
pub fn build_cookie_jar(cookies: &[ExportedCookie]) -> Result<Jar, ScoutError> {
    let jar = Jar::default();
    for cookie in cookies {
        jar.add_cookie_str(&cookie.to_set_cookie(), &cookie.origin()?);
    }
    Ok(jar)
}

/// Finds the session cookie and returns its unquoted value.
pub fn session_token(cookies: &[ExportedCookie]) -> Option<String> {
    cookies
        .iter()
        .find(|c| c.name == SESSION_COOKIE)
        .map(|c| c.unquoted_value().to_string())
}
