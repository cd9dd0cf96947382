//! Viewport reconciliation.
//!
//! Above the mobile breakpoint the hamburger layout no longer exists, so
//! an open menu must snap back to the canonical desktop state. Below the
//! breakpoint nothing is imposed. Runs against the live tree on every
//! resize, never a snapshot from page load.

use crate::config::Settings;
use crate::dom::DomTree;
use crate::ui::menu::MenuController;

#[derive(Debug)]
pub struct ViewportReconciler {
    breakpoint: f32,
}

impl ViewportReconciler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            breakpoint: settings.mobile_breakpoint,
        }
    }

    pub fn on_resize(&self, tree: &mut DomTree, width: f32, menu: &mut MenuController) {
        if width > self.breakpoint {
            menu.force_closed(tree);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::normalize::ensure_navigation_structure;
    use crate::dom::parser::parse_html;
    use crate::ui::menu::{geometry, ACTIVE_CLASS};

    fn open_menu_page() -> (DomTree, MenuController) {
        let mut tree = parse_html(
            r#"<html><body><nav><ul class="nav-links"><li><a href="/">Home</a></li></ul></nav></body></html>"#,
            "test://",
        );
        ensure_navigation_structure(&mut tree, &Settings::default());
        let mut menu = MenuController::new();
        menu.toggle(&mut tree);
        assert!(menu.is_open());
        (tree, menu)
    }

    #[test]
    fn resize_above_breakpoint_forces_closed() {
        let (mut tree, mut menu) = open_menu_page();
        let settings = Settings::default();
        let reconciler = ViewportReconciler::new(&settings);

        reconciler.on_resize(&mut tree, settings.mobile_breakpoint + 1.0, &mut menu);
        assert!(!menu.is_open());

        let geo = geometry(&tree).unwrap();
        let toggle = tree.node_at(&geo.toggle).unwrap();
        assert!(!toggle.has_class(ACTIVE_CLASS));
        assert_eq!(toggle.attr("aria-expanded"), Some("false"));
        assert!(!tree.node_at(&geo.menu).unwrap().has_class(ACTIVE_CLASS));
    }

    #[test]
    fn resize_below_breakpoint_imposes_nothing() {
        let (mut tree, mut menu) = open_menu_page();
        let settings = Settings::default();
        let reconciler = ViewportReconciler::new(&settings);

        reconciler.on_resize(&mut tree, settings.mobile_breakpoint - 100.0, &mut menu);
        assert!(menu.is_open());

        // Exactly at the breakpoint still counts as mobile.
        reconciler.on_resize(&mut tree, settings.mobile_breakpoint, &mut menu);
        assert!(menu.is_open());
    }

    #[test]
    fn honors_a_custom_breakpoint() {
        let (mut tree, mut menu) = open_menu_page();
        let settings = Settings::default().with_mobile_breakpoint(700.0);
        let reconciler = ViewportReconciler::new(&settings);

        reconciler.on_resize(&mut tree, 720.0, &mut menu);
        assert!(!menu.is_open());
    }
}
