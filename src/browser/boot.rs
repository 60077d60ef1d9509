//! Page boot sequence.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once from the wasm start hook. The guard is spawned immediately so
//! the session request goes out before the document finishes parsing; the
//! header, click delegation, reveal, and medicine restore wait for
//! `DOMContentLoaded`. The guard and header share one `SessionResolver`, so
//! the page makes a single request to the user endpoint.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. Missing elements and unavailable browser APIs are
//! logged and the affected enhancement is skipped.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, DocumentReadyState, Element, MouseEvent};

use super::dom::WebDom;
use super::header::ElementHeader;
use super::js_reason;
use super::page::WebPage;
use super::reveal;
use super::storage::{PageStore, StorageArea};
use super::timer::GlooTimer;
use super::toast::{LogNotifier, OverlaySurface};
use crate::auth::guard::{LOGIN_TRIGGER_SELECTOR, ensure_authenticated, follow_login_trigger};
use crate::config::SiteConfig;
use crate::net::api::HttpSessionApi;
use crate::platform::Notifier;
use crate::state::session::{SessionResolver, SessionStore};
use crate::ui::actions::ActionController;
use crate::ui::header::render_user_header;
use crate::ui::toast::Toast;

type PageResolver = SessionResolver<HttpSessionApi, PageStore>;

pub fn run() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("logger already installed: {err}");
    }

    let config = Rc::new(SiteConfig::from_build_env().unwrap_or_else(|err| {
        log::error!("invalid build configuration, using defaults: {err}");
        SiteConfig::default()
    }));
    let Some(page) = WebPage::current() else {
        log::error!("no window or document; page enhancements disabled");
        return;
    };
    page.enable_scripting();

    let store = SessionStore::new(PageStore::open(StorageArea::Session), config.session_key.clone());
    let resolver: Rc<PageResolver> = Rc::new(SessionResolver::new(HttpSessionApi::new(&config), store));

    {
        let resolver = Rc::clone(&resolver);
        let config = Rc::clone(&config);
        let page = page.clone();
        spawn_local(async move {
            let outcome = ensure_authenticated(&resolver, &page, &config).await;
            log::debug!("guard finished: {outcome:?}");
        });
    }

    let document = page.document().clone();
    on_dom_ready(&document, move || bind_page(&page, &resolver, &config));
}

fn on_dom_ready(document: &Document, ready: impl FnOnce() + 'static) {
    if document.ready_state() != DocumentReadyState::Loading {
        ready();
        return;
    }
    let callback = Closure::once_into_js(ready);
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref()) {
        log::error!("DOMContentLoaded listener: {}", js_reason(&err));
    }
}

fn bind_page(page: &WebPage, resolver: &Rc<PageResolver>, config: &Rc<SiteConfig>) {
    let document = page.document();

    if let Err(err) = bind_login_trigger(page, config) {
        log::warn!("login trigger not bound: {}", js_reason(&err));
    }

    let notifier: Rc<dyn Notifier> = match OverlaySurface::mount(document) {
        Ok(surface) => Rc::new(Toast::new(surface, GlooTimer, config.toast_hide_ms)),
        Err(err) => {
            log::warn!("toast overlay unavailable: {}", js_reason(&err));
            Rc::new(LogNotifier)
        }
    };
    let controller = Rc::new(ActionController::new(
        WebDom::new(document.clone()),
        PageStore::open(StorageArea::Local),
        notifier,
        SiteConfig::clone(config),
    ));
    controller.restore_medicines();
    if let Err(err) = bind_actions(document, controller) {
        log::warn!("click delegation not bound: {}", js_reason(&err));
    }

    if let Err(err) = reveal::install(document, config.reveal_threshold) {
        log::debug!("scroll reveal disabled: {}", js_reason(&err));
    }

    let resolver = Rc::clone(resolver);
    let config = Rc::clone(config);
    let view = ElementHeader::find(document);
    spawn_local(async move {
        let source = render_user_header(&resolver, &view, &config).await;
        log::debug!("header rendered from {source:?}");
    });
}

fn bind_login_trigger(page: &WebPage, config: &Rc<SiteConfig>) -> Result<(), JsValue> {
    let Some(trigger) = page.document().query_selector(LOGIN_TRIGGER_SELECTOR)? else {
        return Ok(());
    };
    let page = page.clone();
    let config = Rc::clone(config);
    let on_click = Closure::<dyn FnMut()>::new(move || follow_login_trigger(&page, &config));
    trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn bind_actions(
    document: &Document,
    controller: Rc<ActionController<WebDom, PageStore, Rc<dyn Notifier>>>,
) -> Result<(), JsValue> {
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        controller.handle_click(&target);
    });
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}
