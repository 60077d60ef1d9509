//! Site configuration resolved at build time.
//!
//! The WASM module has no process environment at runtime, so overrides are
//! baked in with `option_env!` when the crate is compiled. Absent overrides
//! fall back to the production defaults below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://babycare-api.onrender.com";
pub const DEFAULT_LOGIN_PAGE: &str = "login.html";
pub const DEFAULT_HOME_PAGE: &str = "/dashboard.html";
pub const DEFAULT_AVATAR: &str = "assets/img/avatar.png";
pub const DEFAULT_TOAST_HIDE_MS: u32 = 1300;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.15;
pub const SESSION_USER_KEY: &str = "currentUser";
pub const MEDICINE_KEY_PREFIX: &str = "bc_meds_child_";

/// Typed configuration shared by the guard, header, and controller.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Backend origin without a trailing slash.
    pub api_base: String,
    /// Login page, matched as a suffix of `location.pathname`.
    pub login_page: String,
    /// Destination for authenticated visitors who land on the login page.
    pub home_page: String,
    pub default_avatar: String,
    pub toast_hide_ms: u32,
    pub reveal_threshold: f64,
    /// `sessionStorage` key holding the last known user record.
    pub session_key: String,
    pub medicine_key_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            login_page: DEFAULT_LOGIN_PAGE.to_owned(),
            home_page: DEFAULT_HOME_PAGE.to_owned(),
            default_avatar: DEFAULT_AVATAR.to_owned(),
            toast_hide_ms: DEFAULT_TOAST_HIDE_MS,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            session_key: SESSION_USER_KEY.to_owned(),
            medicine_key_prefix: MEDICINE_KEY_PREFIX.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Build config from compile-time environment overrides.
    ///
    /// Optional:
    /// - `BABYCARE_API_BASE`: backend origin, `http://` or `https://`
    /// - `BABYCARE_LOGIN_PAGE`: default `login.html`
    /// - `BABYCARE_HOME_PAGE`: default `/dashboard.html`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an override is empty or the API base is
    /// not an HTTP(S) URL.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("BABYCARE_API_BASE"),
            option_env!("BABYCARE_LOGIN_PAGE"),
            option_env!("BABYCARE_HOME_PAGE"),
        )
    }

    /// Validate raw override values on top of the defaults.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_build_env`].
    pub fn from_values(
        api_base: Option<&str>,
        login_page: Option<&str>,
        home_page: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(raw) = api_base {
            cfg.api_base = parse_api_base(raw)?;
        }
        if let Some(raw) = login_page {
            cfg.login_page = non_empty(raw, "BABYCARE_LOGIN_PAGE")?;
        }
        if let Some(raw) = home_page {
            cfg.home_page = non_empty(raw, "BABYCARE_HOME_PAGE")?;
        }
        Ok(cfg)
    }

    /// `GET` target answering "who am I" for the session cookie.
    pub fn current_user_url(&self) -> String {
        format!("{}/auth/user", self.api_base)
    }

    /// Full-page navigation target that starts the Google OAuth flow.
    pub fn google_login_url(&self) -> String {
        format!("{}/auth/google", self.api_base)
    }

    pub fn medicine_key(&self, child_id: &str) -> String {
        format!("{}{child_id}", self.medicine_key_prefix)
    }

    pub fn is_login_path(&self, pathname: &str) -> bool {
        pathname.ends_with(&self.login_page)
    }
}

fn parse_api_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { var: "BABYCARE_API_BASE" });
    }
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|host| !host.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidApiBase(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn non_empty(raw: &str, var: &'static str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(trimmed.to_owned())
}
