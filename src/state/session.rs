//! Session state shared by the guard and the user header.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` owns the cached user record in `sessionStorage`.
//! `SessionResolver` owns the one request per page load to the user endpoint:
//! every caller awaits the same memoised future, and only the resolver writes
//! the cache, so concurrent callers cannot race each other's writes.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::error::{SessionError, StorageError};
use crate::net::types::User;
use crate::platform::{KeyValueStore, SessionApi};

/// Outcome of one session check.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionCheck {
    Authenticated(User),
    /// The server refused the session or returned no usable user.
    Unauthenticated,
    /// The check itself failed; treated as signed out.
    Error(SessionError),
}

impl SessionCheck {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Unauthenticated | Self::Error(_) => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl From<Result<User, SessionError>> for SessionCheck {
    fn from(result: Result<User, SessionError>) -> Self {
        match result {
            Ok(user) => Self::Authenticated(user),
            Err(err) if err.is_rejection() => Self::Unauthenticated,
            Err(err) => Self::Error(err),
        }
    }
}

/// Cached user record under a fixed storage key.
pub struct SessionStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    /// The cached record, if one is stored and still usable.
    pub fn cached_user(&self) -> Option<User> {
        let raw = self.storage.get(&self.key)?;
        match User::from_json_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::debug!("ignoring cached user under {}: {err}", self.key);
                None
            }
        }
    }

    /// Overwrite the cached record.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the record cannot be encoded or written.
    pub fn remember(&self, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.storage.set(&self.key, &raw)
    }

    pub fn forget(&self) {
        self.storage.remove(&self.key);
    }

    /// Apply a check result to the cache. Write failures are logged only.
    pub fn record(&self, check: &SessionCheck) {
        match check.user() {
            Some(user) => {
                if let Err(err) = self.remember(user) {
                    log::warn!("could not cache session user: {err}");
                }
            }
            None => self.forget(),
        }
    }
}

type SharedCheck = Shared<LocalBoxFuture<'static, SessionCheck>>;

/// Single shared accessor for the current session.
pub struct SessionResolver<A, S> {
    api: Rc<A>,
    store: Rc<SessionStore<S>>,
    inflight: RefCell<Option<SharedCheck>>,
}

impl<A, S> SessionResolver<A, S>
where
    A: SessionApi + 'static,
    S: KeyValueStore + 'static,
{
    pub fn new(api: A, store: SessionStore<S>) -> Self {
        Self { api: Rc::new(api), store: Rc::new(store), inflight: RefCell::new(None) }
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Resolve the session, starting the request on first use.
    ///
    /// Later calls, including ones made while the request is still in flight,
    /// share its result. The cache is updated once, when the request settles.
    pub fn current(&self) -> SharedCheck {
        self.inflight
            .borrow_mut()
            .get_or_insert_with(|| {
                let api = Rc::clone(&self.api);
                let store = Rc::clone(&self.store);
                async move {
                    let check = SessionCheck::from(api.current_user().await);
                    store.record(&check);
                    check
                }
                .boxed_local()
                .shared()
            })
            .clone()
    }

    /// Drop the memoised result so the next [`Self::current`] asks again.
    pub fn invalidate(&self) {
        self.inflight.borrow_mut().take();
    }
}
