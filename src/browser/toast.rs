//! Toast overlay element and a console fallback.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use super::js_reason;
use crate::platform::{Notifier, ToastSurface};

const OVERLAY_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("inset", "auto 10px 76px auto"),
    ("background", "rgba(0,0,0,.8)"),
    ("color", "#fff"),
    ("padding", "8px 12px"),
    ("border-radius", "12px"),
    ("font-size", ".9rem"),
    ("opacity", "0"),
    ("transition", "opacity .2s ease"),
    ("pointer-events", "none"),
    ("z-index", "9999"),
];

/// Fixed-position `aria-live` region appended to `<body>`.
pub struct OverlaySurface {
    element: HtmlElement,
}

impl OverlaySurface {
    /// # Errors
    ///
    /// Returns the thrown JS value if the element cannot be created, styled,
    /// or attached.
    pub fn mount(document: &Document) -> Result<Self, JsValue> {
        let element = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)?;
        element.set_attribute("aria-live", "polite")?;
        let style = element.style();
        for (name, value) in OVERLAY_STYLE {
            style.set_property(name, value)?;
        }
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&element)?;
        Ok(Self { element })
    }
}

impl ToastSurface for OverlaySurface {
    fn set_message(&self, message: &str) {
        self.element.set_text_content(Some(message));
    }

    fn set_visible(&self, visible: bool) {
        let opacity = if visible { "1" } else { "0" };
        if let Err(err) = self.element.style().set_property("opacity", opacity) {
            log::debug!("toast opacity: {}", js_reason(&err));
        }
    }
}

/// Used when the overlay could not be mounted.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        log::info!("{message}");
    }
}
