//! One-shot scroll reveal for `.reveal` elements.
//!
//! An element gets the `in` class the first time it intersects the viewport
//! and is then unobserved, so scrolling away never hides it again.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::platform::RevealSink;

pub const REVEAL_SELECTOR: &str = ".reveal";
pub const REVEALED_CLASS: &str = "in";

/// Apply one observer callback's `(element, intersecting)` entries. Returns
/// how many elements were revealed.
pub fn reveal_visible<R: RevealSink>(sink: &R, entries: impl IntoIterator<Item = (R::Node, bool)>) -> usize {
    let mut revealed = 0;
    for (node, intersecting) in entries {
        if !intersecting {
            continue;
        }
        sink.add_class(&node, REVEALED_CLASS);
        sink.unobserve(&node);
        revealed += 1;
    }
    revealed
}
