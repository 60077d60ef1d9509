//! Location and auth-group visibility for the live document.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use super::js_reason;
use crate::platform::{AuthGroup, Page};

/// Class the static markup carries until a script takes over.
const NO_JS_CLASS: &str = "no-js";

#[derive(Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Drop the `no-js` marker from `<html>`.
    pub fn enable_scripting(&self) {
        if let Some(root) = self.document.document_element() {
            if let Err(err) = root.class_list().remove_1(NO_JS_CLASS) {
                log::debug!("could not remove {NO_JS_CLASS}: {}", js_reason(&err));
            }
        }
    }
}

impl Page for WebPage {
    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn set_group_visible(&self, group: AuthGroup, visible: bool) {
        let Ok(nodes) = self.document.query_selector_all(group.selector()) else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        for index in 0..nodes.length() {
            let Some(el) = nodes.item(index).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            if let Err(err) = el.style().set_property("display", display) {
                log::debug!("could not toggle {group:?} element: {}", js_reason(&err));
            }
        }
    }

    fn replace_location(&self, url: &str) {
        if let Err(err) = self.window.location().replace(url) {
            log::warn!("redirect to {url} failed: {}", js_reason(&err));
        }
    }

    fn assign_location(&self, url: &str) {
        if let Err(err) = self.window.location().assign(url) {
            log::warn!("navigation to {url} failed: {}", js_reason(&err));
        }
    }
}
