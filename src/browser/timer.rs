//! [`Timer`] over `gloo_timers::callback::Timeout`, which cancels on drop.

use gloo_timers::callback::Timeout;

use crate::platform::Timer;

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}
