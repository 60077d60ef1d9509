//! `web-sys` / `gloo` implementations of the platform traits.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled only with the `hydrate` feature. Everything here is thin glue:
//! decisions live in `auth`, `state`, and `ui`, and this module only turns
//! them into DOM calls.

pub mod boot;
pub mod dom;
pub mod header;
pub mod page;
pub mod reveal;
pub mod storage;
pub mod timer;
pub mod toast;

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort readable text for a thrown JS value.
pub(crate) fn js_reason(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{value:?}"),
    }
}
