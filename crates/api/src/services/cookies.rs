//! Session cookie helper.
//!
//! Builds and reads the single httpOnly session cookie used by the
//! browser UI. API clients may send the token as a Bearer header instead.

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};

use crate::config::CookieConfig;

/// Helper for the httpOnly session cookie.
#[derive(Debug, Clone)]
pub struct CookieHelper {
    config: CookieConfig,
    /// Session expiry in seconds (mirrors the token lifetime)
    session_expiry_secs: i64,
}

impl CookieHelper {
    /// Create a new cookie helper with configuration.
    pub fn new(config: CookieConfig, session_expiry_secs: i64) -> Self {
        Self {
            config,
            session_expiry_secs,
        }
    }

    /// Build a Set-Cookie header value for the session token.
    pub fn build_session_cookie(&self, token: &str) -> String {
        self.build_cookie(&self.config.name, token, self.session_expiry_secs)
    }

    /// Build a Set-Cookie header that clears the session cookie.
    pub fn build_clear_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.config.name
        );
        self.append_attributes(&mut cookie);
        cookie
    }

    /// Add the session cookie to a response HeaderMap.
    pub fn add_session_cookie(&self, headers: &mut HeaderMap, token: &str) {
        if let Ok(value) = HeaderValue::from_str(&self.build_session_cookie(token)) {
            headers.append(SET_COOKIE, value);
        }
    }

    /// Add the clearing cookie to a response HeaderMap (for logout).
    pub fn add_clear_cookie(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.build_clear_cookie()) {
            headers.append(SET_COOKIE, value);
        }
    }

    /// Extract the session token from request headers.
    pub fn extract_session_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get(axum::http::header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|cookie_header| {
                cookie_header
                    .split(';')
                    .map(|s| s.trim())
                    .find_map(|cookie| {
                        let (name, value) = cookie.split_once('=')?;
                        (name == self.config.name).then_some(value)
                    })
            })
    }

    /// The configured cookie name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    fn build_cookie(&self, name: &str, value: &str, max_age: i64) -> String {
        let mut cookie = format!("{}={}; Path=/; Max-Age={}", name, value, max_age);
        self.append_attributes(&mut cookie);
        cookie
    }

    fn append_attributes(&self, cookie: &mut String) {
        cookie.push_str("; HttpOnly");

        if self.config.secure {
            cookie.push_str("; Secure");
        }

        cookie.push_str(&format!("; SameSite={}", self.config.same_site));

        if !self.config.domain.is_empty() {
            cookie.push_str(&format!("; Domain={}", self.config.domain));
        }
    }
}
