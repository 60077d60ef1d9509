//! Click-delegated page actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! One document-level click listener hands its target to
//! [`ActionController::handle_click`]. The nearest `[data-action]` element
//! picks the [`Action`], and each action maps to one handler.
//!
//! DOM CONTRACT
//! ============
//! `.bc-child` sections hold `.bc-child__card` cards. A card has a
//! `.bc-child__name` label, a `.bc-child__pills` icon strip, and an optional
//! `data-child` id (missing means child `0`).

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use std::str::FromStr;

use crate::config::SiteConfig;
use crate::platform::{Dom, KeyValueStore, Notifier};

pub const ACTION_ATTR: &str = "data-action";
pub const ACTION_SELECTOR: &str = "[data-action]";
pub const SECTION_SELECTOR: &str = ".bc-child";
pub const CARD_SELECTOR: &str = ".bc-child__card";
pub const PILLS_SELECTOR: &str = ".bc-child__pills";
pub const NAME_SELECTOR: &str = ".bc-child__name";
pub const CHILD_ID_ATTR: &str = "data-child";

pub const PILL_ICON_SRC: &str = "img/icons/pill.svg";
pub const PILL_ICON_ALT: &str = "Remédio";
/// Icons a cloned card keeps from its source.
pub const MAX_CLONED_ICONS: usize = 2;
/// Largest persisted medicine count restored on load.
pub const MAX_RESTORED_ICONS: usize = 50;
pub const NEW_CHILD_NAME: &str = "Nova criança";

pub const MSG_MENU_OPENED: &str = "Menu aberto";
pub const MSG_MENU_CLOSED: &str = "Menu fechado";
pub const MSG_OPENING_SETTINGS: &str = "Abrindo configurações…";
pub const MSG_CARD_ADDED: &str = "Novo cartão adicionado";
pub const MSG_QUICK_ADD: &str = "Ação rápida";

/// Actions a `data-action` attribute can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    OpenDrawer,
    OpenSettings,
    AddMedicine,
    AddChild,
    QuickAdd,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenDrawer => "open-drawer",
            Self::OpenSettings => "open-settings",
            Self::AddMedicine => "add-medicine",
            Self::AddChild => "add-child",
            Self::QuickAdd => "quick-add",
        }
    }

    fn handler<D, K, N>(self) -> Handler<D, K, N>
    where
        D: Dom,
        K: KeyValueStore,
        N: Notifier,
    {
        match self {
            Self::OpenDrawer => ActionController::<D, K, N>::open_drawer,
            Self::OpenSettings => ActionController::<D, K, N>::open_settings,
            Self::AddMedicine => ActionController::<D, K, N>::add_medicine,
            Self::AddChild => ActionController::<D, K, N>::add_child,
            Self::QuickAdd => ActionController::<D, K, N>::quick_add,
        }
    }
}

/// A `data-action` value this module does not handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "open-drawer" => Ok(Self::OpenDrawer),
            "open-settings" => Ok(Self::OpenSettings),
            "add-medicine" => Ok(Self::AddMedicine),
            "add-child" => Ok(Self::AddChild),
            "quick-add" => Ok(Self::QuickAdd),
            other => Err(UnknownAction(other.to_owned())),
        }
    }
}

type Handler<D, K, N> = fn(&ActionController<D, K, N>, &<D as Dom>::Node);

/// Owns the page handles every action handler needs.
pub struct ActionController<D, K, N> {
    dom: D,
    storage: K,
    notifier: N,
    config: SiteConfig,
}

impl<D, K, N> ActionController<D, K, N>
where
    D: Dom,
    K: KeyValueStore,
    N: Notifier,
{
    pub fn new(dom: D, storage: K, notifier: N, config: SiteConfig) -> Self {
        Self { dom, storage, notifier, config }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Dispatch a click on `target`. Returns the action that ran, if any.
    pub fn handle_click(&self, target: &D::Node) -> Option<Action> {
        let trigger = self.dom.closest(target, ACTION_SELECTOR)?;
        let action: Action = self.dom.attribute(&trigger, ACTION_ATTR)?.parse().ok()?;
        log::debug!("action {}", action.as_str());
        let handler: Handler<D, K, N> = action.handler();
        handler(self, &trigger);
        Some(action)
    }

    fn open_drawer(&self, trigger: &D::Node) {
        let expanded = self.dom.attribute(trigger, "aria-expanded").as_deref() == Some("true");
        self.dom
            .set_attribute(trigger, "aria-expanded", if expanded { "false" } else { "true" });
        self.notifier
            .notify(if expanded { MSG_MENU_CLOSED } else { MSG_MENU_OPENED });
    }

    fn open_settings(&self, _trigger: &D::Node) {
        self.notifier.notify(MSG_OPENING_SETTINGS);
    }

    fn quick_add(&self, _trigger: &D::Node) {
        self.notifier.notify(MSG_QUICK_ADD);
    }

    fn add_medicine(&self, trigger: &D::Node) {
        let Some(card) = self.dom.closest(trigger, CARD_SELECTOR) else {
            return;
        };
        let Some(pills) = self.dom.query(&card, PILLS_SELECTOR) else {
            return;
        };
        self.append_pill(&pills);

        let count = self.dom.query_all(&pills, "img").len();
        let key = self.config.medicine_key(&self.child_id(&card));
        if let Err(err) = self.storage.set(&key, &count.to_string()) {
            log::warn!("could not persist medicine count: {err}");
        }
    }

    fn add_child(&self, trigger: &D::Node) {
        let Some(card) = self.dom.closest(trigger, CARD_SELECTOR) else {
            return;
        };
        let Some(container) = self
            .dom
            .closest(&card, SECTION_SELECTOR)
            .or_else(|| self.dom.parent(&card))
        else {
            return;
        };
        let Some(clone) = self.dom.deep_clone(&card) else {
            return;
        };

        if let Some(pills) = self.dom.query(&clone, PILLS_SELECTOR) {
            for extra in self.dom.query_all(&pills, "img").iter().skip(MAX_CLONED_ICONS) {
                self.dom.remove(extra);
            }
        }
        if let Some(name) = self.dom.query(&clone, NAME_SELECTOR) {
            self.dom.set_text(&name, NEW_CHILD_NAME);
        }
        let scope = self.dom.root().unwrap_or_else(|| container.clone());
        let cards = self.dom.query_all(&scope, CARD_SELECTOR);
        let next_id = next_child_id(cards.iter().map(|c| self.child_id(c)));
        self.dom.set_attribute(&clone, CHILD_ID_ATTR, &next_id.to_string());

        let Some(wrapper) = self.dom.create_element("div") else {
            return;
        };
        self.dom.append_child(&container, &wrapper);
        self.dom.append_child(&wrapper, &clone);
        self.notifier.notify(MSG_CARD_ADDED);
    }

    /// Bring every card's icon strip up to its persisted medicine count.
    pub fn restore_medicines(&self) {
        let Some(root) = self.dom.root() else {
            return;
        };
        for card in self.dom.query_all(&root, CARD_SELECTOR) {
            let Some(pills) = self.dom.query(&card, PILLS_SELECTOR) else {
                continue;
            };
            let key = self.config.medicine_key(&self.child_id(&card));
            let Some(stored) = self.storage.get(&key).and_then(|raw| raw.trim().parse::<usize>().ok()) else {
                continue;
            };
            if stored > MAX_RESTORED_ICONS {
                log::debug!("ignoring {key}={stored}, above {MAX_RESTORED_ICONS}");
                continue;
            }
            let current = self.dom.query_all(&pills, "img").len();
            for _ in current..stored {
                self.append_pill(&pills);
            }
        }
    }

    fn append_pill(&self, pills: &D::Node) {
        let Some(img) = self.dom.create_element("img") else {
            return;
        };
        self.dom.set_attribute(&img, "alt", PILL_ICON_ALT);
        self.dom.set_attribute(&img, "src", PILL_ICON_SRC);
        self.dom.append_child(pills, &img);
    }

    fn child_id(&self, card: &D::Node) -> String {
        self.dom
            .attribute(card, CHILD_ID_ATTR)
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| "0".to_owned())
    }
}

/// One past the highest numeric child id; non-numeric ids are skipped.
pub fn next_child_id(ids: impl IntoIterator<Item = String>) -> u32 {
    ids.into_iter()
        .filter_map(|id| id.parse::<u32>().ok())
        .max()
        .map_or(0, |max| max.saturating_add(1))
}
