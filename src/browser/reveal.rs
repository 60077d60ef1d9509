//! `IntersectionObserver` binding for [`crate::ui::reveal`].

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::js_reason;
use crate::platform::RevealSink;
use crate::ui::reveal::{REVEAL_SELECTOR, reveal_visible};

struct ObserverSink<'a> {
    observer: &'a IntersectionObserver,
}

impl RevealSink for ObserverSink<'_> {
    type Node = Element;

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            log::debug!("reveal: {}", js_reason(&err));
        }
    }

    fn unobserve(&self, node: &Element) {
        self.observer.unobserve(node);
    }
}

/// Observe every `.reveal` element.
///
/// # Errors
///
/// Returns the thrown JS value when `IntersectionObserver` is missing or the
/// selector query fails; elements then keep their default styling.
pub fn install(document: &Document, threshold: f64) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
                .map(|entry| (entry.target(), entry.is_intersecting()));
            reveal_visible(&ObserverSink { observer: &observer }, entries);
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    // The observer keeps calling back for the page's lifetime.
    callback.forget();

    let targets = document.query_selector_all(REVEAL_SELECTOR)?;
    for index in 0..targets.length() {
        if let Some(el) = targets.item(index).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&el);
        }
    }
    Ok(())
}
