//! Signed-in user's name and avatar in the page header.
//!
//! Read-through: the cached record renders immediately; otherwise the shared
//! session check is awaited. There is no expiry, the guard's check is what
//! refreshes or clears the cache.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use crate::config::SiteConfig;
use crate::net::types::User;
use crate::platform::{HeaderView, KeyValueStore, SessionApi};
use crate::state::session::{SessionCheck, SessionResolver};

/// Label shown when nobody is signed in.
pub const GUEST_LABEL: &str = "Visitante";

/// Where the rendered header data came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderSource {
    Cache,
    Session,
    Guest,
}

pub async fn render_user_header<A, S, H>(
    resolver: &SessionResolver<A, S>,
    view: &H,
    config: &SiteConfig,
) -> HeaderSource
where
    A: SessionApi + 'static,
    S: KeyValueStore + 'static,
    H: HeaderView,
{
    if let Some(user) = resolver.store().cached_user() {
        show_user(view, &user, config);
        return HeaderSource::Cache;
    }
    match resolver.current().await {
        SessionCheck::Authenticated(user) => {
            show_user(view, &user, config);
            HeaderSource::Session
        }
        SessionCheck::Unauthenticated | SessionCheck::Error(_) => {
            view.show_name(GUEST_LABEL);
            HeaderSource::Guest
        }
    }
}

fn show_user<H: HeaderView>(view: &H, user: &User, config: &SiteConfig) {
    view.show_name(&user.name);
    view.show_avatar(user.avatar_or(&config.default_avatar));
}
