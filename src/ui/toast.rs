//! Single reusable toast notification.
//!
//! One overlay element per page, announced to screen readers. A new message
//! replaces the visible one and restarts the hide timer; toasts never stack.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::{Notifier, Timer, ToastSurface};

pub struct Toast<S, T: Timer> {
    surface: Rc<S>,
    timer: T,
    hide_after_ms: u32,
    pending_hide: RefCell<Option<T::Handle>>,
}

impl<S, T> Toast<S, T>
where
    S: ToastSurface + 'static,
    T: Timer,
{
    pub fn new(surface: S, timer: T, hide_after_ms: u32) -> Self {
        surface.set_visible(false);
        Self { surface: Rc::new(surface), timer, hide_after_ms, pending_hide: RefCell::new(None) }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show `message` and (re)arm the hide timer.
    pub fn show(&self, message: &str) {
        self.surface.set_message(message);
        self.surface.set_visible(true);

        let surface = Rc::clone(&self.surface);
        let handle = self
            .timer
            .schedule(self.hide_after_ms, Box::new(move || surface.set_visible(false)));
        // Replacing the handle drops, and so cancels, the previous hide.
        *self.pending_hide.borrow_mut() = Some(handle);
    }
}

impl<S, T> Notifier for Toast<S, T>
where
    S: ToastSurface + 'static,
    T: Timer,
{
    fn notify(&self, message: &str) {
        self.show(message);
    }
}
