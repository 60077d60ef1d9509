//! Header slots looked up by id; absent slots are skipped.

use web_sys::{Document, Element};

use super::js_reason;
use crate::platform::HeaderView;

pub const NAME_ID: &str = "user-name-header";
pub const AVATAR_ID: &str = "user-avatar";

pub struct ElementHeader {
    name: Option<Element>,
    avatar: Option<Element>,
}

impl ElementHeader {
    pub fn find(document: &Document) -> Self {
        Self { name: document.get_element_by_id(NAME_ID), avatar: document.get_element_by_id(AVATAR_ID) }
    }
}

impl HeaderView for ElementHeader {
    fn show_name(&self, name: &str) {
        if let Some(el) = &self.name {
            el.set_text_content(Some(name));
        }
    }

    fn show_avatar(&self, url: &str) {
        if let Some(el) = &self.avatar {
            if let Err(err) = el.set_attribute("src", url) {
                log::debug!("avatar src: {}", js_reason(&err));
            }
        }
    }
}
