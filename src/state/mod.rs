//! Shared client-side state.
//!
//! DESIGN
//! ======
//! State that several units touch (the cached user, the in-flight session
//! check) lives behind owned accessors here instead of ambient globals.

pub mod session;
