//! Deterministic visibility and interactivity classifiers.

mod interactive;
mod visible;

pub use interactive::{
    INTERACTIVE_ARIA_ROLES, INTERACTIVE_CURSORS, INTERACTIVE_TAGS, NON_INTERACTIVE_CURSORS,
    element_is_interactive, is_interactive,
};
pub use visible::{element_is_visible, is_visible};

use crate::model::DomTree;

/// Assign both flags to every enriched element. Elements that received no
/// snapshot data keep their flags unset.
pub fn classify_tree(tree: &mut DomTree) {
    for id in tree.element_ids() {
        if let Some(element) = tree.element_mut(id) {
            if !element.enriched {
                continue;
            }
            element.is_visible = Some(element_is_visible(element));
            element.is_interactive = Some(element_is_interactive(element));
        }
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
