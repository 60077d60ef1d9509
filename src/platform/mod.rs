//! Seams between page logic and the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard, header, and controller only talk to these traits. `browser`
//! implements them over `web-sys`/`gloo` for the `hydrate` build; tests use
//! the in-memory implementations in `test_support`.

pub mod memory;

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::{SessionError, StorageError};
use crate::net::types::User;

/// Source of truth for "who is signed in".
#[async_trait(?Send)]
pub trait SessionApi {
    /// Ask the backend for the user bound to the current session cookie.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] for transport failures, non-success statuses,
    /// and bodies without a usable user record.
    async fn current_user(&self) -> Result<User, SessionError>;
}

#[async_trait(?Send)]
impl<T: SessionApi + ?Sized> SessionApi for Rc<T> {
    async fn current_user(&self) -> Result<User, SessionError> {
        (**self).current_user().await
    }
}

/// String key-value storage (`sessionStorage`, `localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Element groups toggled by login state (`data-auth="guest"` / `"user"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthGroup {
    Guest,
    User,
}

impl AuthGroup {
    pub fn selector(self) -> &'static str {
        match self {
            Self::Guest => "[data-auth=\"guest\"]",
            Self::User => "[data-auth=\"user\"]",
        }
    }
}

/// Location and visibility controls of the current page.
pub trait Page {
    /// `location.pathname`.
    fn pathname(&self) -> String;

    fn set_group_visible(&self, group: AuthGroup, visible: bool);

    /// Navigate without leaving a history entry.
    fn replace_location(&self, url: &str);

    /// Navigate and keep the current page in history.
    fn assign_location(&self, url: &str);
}

/// Minimal element-tree operations needed by the interaction controller.
///
/// Selectors follow CSS syntax; implementations must support at least class
/// (`.name`), attribute (`[attr]`, `[attr="v"]`) and tag selectors.
pub trait Dom {
    type Node: Clone;

    /// Root element to search from (`<html>`).
    fn root(&self) -> Option<Self::Node>;

    /// The node itself or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// First descendant matching `selector`.
    fn query(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// All descendants matching `selector`, in document order.
    fn query_all(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn set_text(&self, node: &Self::Node, text: &str);

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Option<Self::Node>;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Detached deep copy of `node` and its subtree.
    fn deep_clone(&self, node: &Self::Node) -> Option<Self::Node>;

    fn remove(&self, node: &Self::Node);
}

/// One-shot timers. Dropping a handle cancels its callback.
pub trait Timer {
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

impl<T: Timer + ?Sized> Timer for Rc<T> {
    type Handle = T::Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle {
        (**self).schedule(delay_ms, callback)
    }
}

/// The overlay element a [`crate::ui::toast::Toast`] writes to.
pub trait ToastSurface {
    fn set_message(&self, message: &str);
    fn set_visible(&self, visible: bool);
}

/// Sink for short user-facing notifications.
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for Rc<T> {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

/// Header slots for the signed-in user's name and avatar.
pub trait HeaderView {
    fn show_name(&self, name: &str);
    fn show_avatar(&self, url: &str);
}

/// Elements watched until they first scroll into view.
pub trait RevealSink {
    type Node;

    fn add_class(&self, node: &Self::Node, class: &str);

    /// Stop delivering entries for `node`.
    fn unobserve(&self, node: &Self::Node);
}
