//! REST helpers for the authentication backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, always with
//! credentials so the cross-origin session cookie is sent.
//! Native builds: the request reports `SessionError::Unavailable`.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is returned as a `SessionError` value; callers decide how to
//! degrade. Nothing here logs or retries.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::User;
use crate::config::SiteConfig;
use crate::error::SessionError;
use crate::platform::SessionApi;

/// [`SessionApi`] backed by `GET {api_base}/auth/user`.
#[derive(Clone, Debug)]
pub struct HttpSessionApi {
    url: String,
}

impl HttpSessionApi {
    pub fn new(config: &SiteConfig) -> Self {
        Self { url: config.current_user_url() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl SessionApi for HttpSessionApi {
    async fn current_user(&self) -> Result<User, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&self.url)
                .credentials(web_sys::RequestCredentials::Include)
                .send()
                .await
                .map_err(|e| SessionError::Network(e.to_string()))?;
            check_status(resp.status())?;
            let body: serde_json::Value =
                resp.json().await.map_err(|e| SessionError::MalformedBody(e.to_string()))?;
            User::from_json(body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(SessionError::Unavailable)
        }
    }
}

/// Map an HTTP status to an error unless it is a 2xx success.
///
/// # Errors
///
/// Returns [`SessionError::Status`] for every status outside `200..300`.
pub fn check_status(status: u16) -> Result<(), SessionError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SessionError::Status(status))
    }
}
