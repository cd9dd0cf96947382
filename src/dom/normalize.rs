//! Idempotent markup normalization.
//!
//! Pages in the wild disagree about nav markup: some carry the canonical
//! ids and buttons, some only a bare `<ul>` inside `<nav>`, some nothing
//! at all. Normalization guarantees that after `attach` each canonical
//! element exists at most once, synthesizing only what is missing and
//! never duplicating what is already there.

use std::collections::HashMap;

use crate::config::Settings;
use crate::dom::{locate, DomNode, DomTree, NodePath};

/// Canonical identities shared by the controllers.
pub const MENU_ID: &str = "nav-menu";
pub const MENU_CLASS: &str = "nav-menu";
pub const TOGGLE_ID: &str = "hamburger";
pub const TOGGLE_CLASS: &str = "hamburger";
pub const BACK_TO_TOP_ID: &str = "backToTopBtn";

/// Helper class stamped on gallery images.
pub const RESPONSIVE_IMG_CLASS: &str = "responsive-img";

/// Containers whose images get the responsive helper class.
const GALLERY_SELECTORS: &[&str] = &[".product-images", ".main-image", ".product-details-section"];

/// Guarantee the back-to-top button exists exactly once, hidden.
///
/// Safe to call repeatedly and from independent enhancer instances on
/// the same page; an existing button is returned to untouched.
pub fn ensure_back_to_top(tree: &mut DomTree, settings: &Settings) {
    if tree.find_by_id(BACK_TO_TOP_ID).is_some() {
        return;
    }
    if !settings.synthesize_back_to_top {
        return;
    }

    let Some(body) = tree.body_path() else {
        // Nothing to append to; the page keeps working without the button.
        log::warn!("back-to-top: page has no <body>, skipping synthesis");
        return;
    };

    let mut button = DomNode::element("button", HashMap::new(), vec![DomNode::text("↑")]);
    button.set_attr("id", BACK_TO_TOP_ID);
    button.set_attr("type", "button");
    button.set_attr("title", "Go to top");
    button.set_attr("aria-label", "Back to top");
    button.set_style_prop("display", "none");
    button.set_style_prop("opacity", "0");

    if let Some(body_node) = tree.node_at_mut(&body) {
        body_node.push_child(button);
    }
}

/// Guarantee canonical navigation structure on pages that have a nav.
///
/// Pages without a navigation container, or without any menu candidate
/// inside it, are left completely untouched.
pub fn ensure_navigation_structure(tree: &mut DomTree, settings: &Settings) {
    let Some(container) = locate::navigation_container(tree) else {
        return;
    };
    let Some(menu) = locate::menu_list(tree, &container) else {
        return;
    };

    if let Some(menu_node) = tree.node_at_mut(&menu) {
        // An author-assigned id is never clobbered; the marker class then
        // carries the canonical identity instead.
        if menu_node.id().is_none() {
            menu_node.set_attr("id", MENU_ID);
        }
        menu_node.add_class(MENU_CLASS);
    }

    match tree.find_by_id(TOGGLE_ID) {
        Some(toggle) => {
            // Pre-existing toggles start out announced as collapsed.
            if let Some(node) = tree.node_at_mut(&toggle) {
                if node.attr("aria-expanded").is_none() {
                    node.set_attr("aria-expanded", "false");
                }
            }
        }
        None if settings.synthesize_toggle => {
            let (parent, index) = toggle_insertion_point(tree, &container, &menu);
            if let Some(parent_node) = tree.node_at_mut(&parent) {
                parent_node.insert_child(index, build_toggle());
            }
        }
        None => {}
    }
}

/// Where a synthesized toggle goes: before the call-to-action when the
/// secondary probe finds one, else before the menu when it is a direct
/// child of the container, else as the container's first child.
fn toggle_insertion_point(
    tree: &DomTree,
    container: &NodePath,
    menu: &NodePath,
) -> (NodePath, usize) {
    if let Some(cta) = locate::call_to_action(tree, container) {
        if let (Some(parent), Some(index)) = (cta.parent(), cta.last_index()) {
            return (parent, index);
        }
    }
    if menu.parent().as_ref() == Some(container) {
        if let Some(index) = menu.last_index() {
            return (container.clone(), index);
        }
    }
    (container.clone(), 0)
}

fn build_toggle() -> DomNode {
    let bars = (0..3)
        .map(|_| {
            let mut bar = DomNode::element("span", HashMap::new(), Vec::new());
            bar.add_class("bar");
            bar
        })
        .collect();

    let mut toggle = DomNode::element("button", HashMap::new(), bars);
    toggle.set_attr("id", TOGGLE_ID);
    toggle.set_attr("type", "button");
    toggle.set_attr("aria-label", "Toggle navigation");
    toggle.set_attr("aria-expanded", "false");
    toggle.add_class(TOGGLE_CLASS);
    toggle
}

/// Stamp the responsive helper class on every gallery image.
pub fn tag_responsive_images(tree: &mut DomTree) {
    for selector in GALLERY_SELECTORS {
        for path in locate::all_matches(tree, selector) {
            if let Some(node) = tree.node_at_mut(&path) {
                tag_images(node);
            }
        }
    }
}

fn tag_images(node: &mut DomNode) {
    if node.tag == "img" {
        node.add_class(RESPONSIVE_IMG_CLASS);
    }
    for child in &mut node.children {
        tag_images(child);
    }
}
