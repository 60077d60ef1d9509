//! Networking for the authentication backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the credentialed "who am I" request, `types` validates the
//! user document it returns.

pub mod api;
pub mod types;
