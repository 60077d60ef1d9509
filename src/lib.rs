//! # babycare-web
//!
//! WASM enhancement layer for the BabyCare static pages.
//!
//! Every page loads the same module. It enforces the login guard, shows the
//! signed-in user in the header, and handles the `data-action` buttons on the
//! children cards. Page logic is written against the traits in `platform`;
//! the `browser` module binds them to `web-sys` when built with `hydrate`.

pub mod auth;
#[cfg(feature = "hydrate")]
pub mod browser;
pub mod config;
pub mod error;
pub mod net;
pub mod platform;
pub mod state;
pub mod ui;

#[cfg(test)]
mod test_support;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    browser::boot::run();
}
