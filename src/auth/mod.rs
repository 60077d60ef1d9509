//! Authentication gate for every page that loads this module.

pub mod guard;
