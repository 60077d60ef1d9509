//! Page-load authentication guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once per page load, before the rest of the page is considered usable.
//! Signed-in visitors are kept off the login page; everyone else is sent to it.
//! Both redirects replace the current history entry so the back button never
//! returns to a page the visitor is not allowed to see.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::config::SiteConfig;
use crate::platform::{AuthGroup, KeyValueStore, Page, SessionApi};
use crate::state::session::{SessionCheck, SessionResolver};

/// Marker for the "sign in with Google" button.
pub const LOGIN_TRIGGER_SELECTOR: &str = "[data-action=\"login-google\"]";

/// What the guard decided for this page load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardOutcome {
    pub authenticated: bool,
    /// Location the page was replaced with, if any.
    pub redirect: Option<String>,
}

/// Resolve the session and enforce the matching page.
pub async fn ensure_authenticated<A, S, P>(
    resolver: &SessionResolver<A, S>,
    page: &P,
    config: &SiteConfig,
) -> GuardOutcome
where
    A: SessionApi + 'static,
    S: KeyValueStore + 'static,
    P: Page,
{
    let check = resolver.current().await;
    match &check {
        SessionCheck::Authenticated(user) => log::debug!("session active for {}", user.name),
        SessionCheck::Unauthenticated => log::warn!("no active session"),
        SessionCheck::Error(err) => log::warn!("{err}"),
    }
    apply_session(page, config, &check)
}

/// Toggle auth groups and redirect for an already resolved check.
pub fn apply_session<P: Page>(page: &P, config: &SiteConfig, check: &SessionCheck) -> GuardOutcome {
    let authenticated = check.is_authenticated();
    page.set_group_visible(AuthGroup::Guest, !authenticated);
    page.set_group_visible(AuthGroup::User, authenticated);

    let on_login_page = config.is_login_path(&page.pathname());
    let redirect = match (authenticated, on_login_page) {
        (true, true) => Some(config.home_page.clone()),
        (false, false) => Some(config.login_page.clone()),
        _ => None,
    };
    if let Some(target) = &redirect {
        page.replace_location(target);
    }
    GuardOutcome { authenticated, redirect }
}

/// Click behavior of the login trigger: hand the browser to the OAuth flow.
pub fn follow_login_trigger<P: Page>(page: &P, config: &SiteConfig) {
    page.assign_location(&config.google_login_url());
}
