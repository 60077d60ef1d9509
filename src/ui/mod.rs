//! Page interaction layer: click actions, toast, scroll reveal, and the user
//! header.

pub mod actions;
pub mod header;
pub mod reveal;
pub mod toast;
