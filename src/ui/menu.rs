//! Mobile navigation menu state machine.
//!
//! Two states, Open and Closed, over the canonical toggle/menu pair.
//! Every transition keeps the `active` CSS marker and the toggle's
//! `aria-expanded` attribute in lockstep, and every transition resolves
//! the pair from the live tree — handles are never cached, so elements
//! moved or re-tagged after initialization still reconcile correctly.

use crate::dom::{locate, normalize, DomTree, NodePath};

/// CSS marker toggled on both the menu and its toggle button.
pub const ACTIVE_CLASS: &str = "active";

/// The canonical element trio backing the menu, re-resolved per event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGeometry {
    pub container: NodePath,
    pub toggle: NodePath,
    pub menu: NodePath,
}

/// Resolve the container/toggle/menu trio from the current tree.
///
/// `None` when any of the three is missing; the controller is inert on
/// such pages.
pub fn geometry(tree: &DomTree) -> Option<MenuGeometry> {
    let container = locate::navigation_container(tree)?;
    let toggle = tree.find_by_id(normalize::TOGGLE_ID)?;
    let menu = resolve_menu(tree, &container)?;
    Some(MenuGeometry {
        container,
        toggle,
        menu,
    })
}

/// Canonical menu lookup: id first, then the marker class scoped to the
/// container — the same scoping the locator applies, so a stray marker
/// class elsewhere in the document can never shadow the real menu of a
/// list whose author id was preserved during normalization.
fn resolve_menu(tree: &DomTree, container: &NodePath) -> Option<NodePath> {
    tree.find_by_id(normalize::MENU_ID)
        .or_else(|| tree.find_path_within(container, |n| n.has_class(normalize::MENU_CLASS)))
}

#[derive(Debug, Default)]
pub struct MenuController {
    open: bool,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle-button click: flip between Open and Closed.
    pub fn toggle(&mut self, tree: &mut DomTree) {
        if geometry(tree).is_none() {
            return;
        }
        self.open = !self.open;
        self.apply(tree);
    }

    /// Link-click / outside-click transition. No-op when already Closed.
    pub fn close(&mut self, tree: &mut DomTree) {
        if !self.open {
            return;
        }
        self.open = false;
        self.apply(tree);
    }

    /// Reconciliation: force Closed and reset markers regardless of the
    /// tracked state.
    pub fn force_closed(&mut self, tree: &mut DomTree) {
        self.open = false;
        self.apply(tree);
    }

    /// Write the current state to the DOM: `active` markers plus the
    /// toggle's `aria-expanded`, always together.
    fn apply(&self, tree: &mut DomTree) {
        let Some(geo) = geometry(tree) else {
            return;
        };
        let expanded = if self.open { "true" } else { "false" };

        if let Some(toggle) = tree.node_at_mut(&geo.toggle) {
            if self.open {
                toggle.add_class(ACTIVE_CLASS);
            } else {
                toggle.remove_class(ACTIVE_CLASS);
            }
            toggle.set_attr("aria-expanded", expanded);
        }
        if let Some(menu) = tree.node_at_mut(&geo.menu) {
            if self.open {
                menu.add_class(ACTIVE_CLASS);
            } else {
                menu.remove_class(ACTIVE_CLASS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::dom::normalize::{ensure_navigation_structure, MENU_CLASS, TOGGLE_ID};
    use crate::dom::parser::parse_html;

    fn nav_page() -> DomTree {
        let mut tree = parse_html(
            r#"<html><body>
                <nav><ul class="nav-links"><li><a href="/shop">Shop</a></li></ul></nav>
            </body></html>"#,
            "test://",
        );
        ensure_navigation_structure(&mut tree, &Settings::default());
        tree
    }

    fn marker_state(tree: &DomTree) -> (bool, bool, String) {
        let geo = geometry(tree).unwrap();
        let toggle = tree.node_at(&geo.toggle).unwrap();
        let menu = tree.node_at(&geo.menu).unwrap();
        (
            toggle.has_class(ACTIVE_CLASS),
            menu.has_class(ACTIVE_CLASS),
            toggle.attr("aria-expanded").unwrap_or("").to_string(),
        )
    }

    #[test]
    fn double_toggle_returns_to_closed() {
        let mut tree = nav_page();
        let mut menu = MenuController::new();

        let toggle_node = tree.find_by_id(TOGGLE_ID).unwrap();
        assert_eq!(
            tree.node_at(&toggle_node).unwrap().attr("aria-expanded"),
            Some("false")
        );

        menu.toggle(&mut tree);
        assert!(menu.is_open());
        assert_eq!(marker_state(&tree), (true, true, "true".to_string()));

        menu.toggle(&mut tree);
        assert!(!menu.is_open());
        assert_eq!(marker_state(&tree), (false, false, "false".to_string()));
    }

    #[test]
    fn close_when_closed_is_a_no_op() {
        let mut tree = nav_page();
        let mut menu = MenuController::new();
        let before = tree.to_html();

        menu.close(&mut tree);
        assert!(!menu.is_open());
        assert_eq!(tree.to_html(), before);
    }

    #[test]
    fn attribute_tracks_class_after_every_transition() {
        let mut tree = nav_page();
        let mut menu = MenuController::new();

        for _ in 0..3 {
            menu.toggle(&mut tree);
            let (toggle_active, menu_active, expanded) = marker_state(&tree);
            assert_eq!(toggle_active, menu.is_open());
            assert_eq!(menu_active, menu.is_open());
            assert_eq!(expanded == "true", menu.is_open());
        }
    }

    #[test]
    fn inert_without_canonical_elements() {
        let mut tree = parse_html("<html><body><p>plain page</p></body></html>", "test://");
        let mut menu = MenuController::new();

        menu.toggle(&mut tree);
        assert!(!menu.is_open());
    }

    #[test]
    fn geometry_follows_marker_class_when_author_id_won() {
        let mut tree = parse_html(
            r#"<html><body><nav><ul id="main-list" class="nav-links"></ul></nav></body></html>"#,
            "test://",
        );
        ensure_navigation_structure(&mut tree, &Settings::default());

        let geo = geometry(&tree).unwrap();
        let menu_node = tree.node_at(&geo.menu).unwrap();
        assert_eq!(menu_node.id(), Some("main-list"));
        assert!(menu_node.has_class(MENU_CLASS));
    }

    #[test]
    fn stray_marker_class_outside_the_container_is_ignored() {
        // A .nav-menu earlier in document order, outside <nav>, must not
        // shadow the real menu when the author id was preserved.
        let mut tree = parse_html(
            r#"<html><body>
                <ul class="nav-menu" id="stray"></ul>
                <nav><ul id="main-list" class="nav-links"></ul></nav>
            </body></html>"#,
            "test://",
        );
        ensure_navigation_structure(&mut tree, &Settings::default());

        let geo = geometry(&tree).unwrap();
        assert_eq!(tree.node_at(&geo.menu).unwrap().id(), Some("main-list"));

        let mut menu = MenuController::new();
        menu.toggle(&mut tree);
        let stray = tree.find_by_id("stray").unwrap();
        assert!(!tree.node_at(&stray).unwrap().has_class(ACTIVE_CLASS));
        assert!(tree.node_at(&geo.menu).unwrap().has_class(ACTIVE_CLASS));
    }
}
