//! Selector probing for pages with inconsistent navigation markup.
//!
//! Each lookup is an ordered list of selector candidates, most specific
//! first, resolved against the live tree and stopping at the first
//! structural match. Lookups never mutate; a miss means the page simply
//! does not have that structure.

use crate::dom::{DomNode, DomTree, NodePath, NodeType};

/// Navigation container candidates.
const CONTAINER_SELECTORS: &[&str] = &["nav", ".navbar"];

/// Menu list candidates, probed inside the container.
const MENU_SELECTORS: &[&str] = &[".nav-menu", ".nav-links", "ul.nav-menu", "ul.nav-links", "ul"];

/// Call-to-action candidates; a synthesized toggle is placed before one.
const CTA_SELECTORS: &[&str] = &[".nav-cta", ".cta"];

/// Match a node against a single selector candidate.
///
/// Supported forms: `tag`, `.class`, `#id`, `tag.class`.
fn matches(node: &DomNode, selector: &str) -> bool {
    if node.node_type != NodeType::Element {
        return false;
    }
    if let Some(id) = selector.strip_prefix('#') {
        return node.id() == Some(id);
    }
    match selector.split_once('.') {
        Some(("", class)) => node.has_class(class),
        Some((tag, class)) => node.tag == tag && node.has_class(class),
        None => node.tag == selector,
    }
}

/// First document-order match for any of `selectors`, tried in order.
pub fn first_match(tree: &DomTree, selectors: &[&str]) -> Option<NodePath> {
    selectors
        .iter()
        .find_map(|sel| tree.find_path(|n| matches(n, sel)))
}

/// First match among the descendants of `scope` (the scope element
/// itself is never a candidate).
pub fn first_match_within(
    tree: &DomTree,
    scope: &NodePath,
    selectors: &[&str],
) -> Option<NodePath> {
    selectors
        .iter()
        .find_map(|sel| tree.find_path_within(scope, |n| matches(n, sel)))
}

/// Every document-order match for a single selector.
pub fn all_matches(tree: &DomTree, selector: &str) -> Vec<NodePath> {
    fn walk(node: &DomNode, path: &mut Vec<usize>, selector: &str, out: &mut Vec<NodePath>) {
        if matches(node, selector) {
            out.push(NodePath(path.clone()));
        }
        for (i, child) in node.children.iter().enumerate() {
            path.push(i);
            walk(child, path, selector, out);
            path.pop();
        }
    }
    let mut out = Vec::new();
    walk(&tree.root, &mut Vec::new(), selector, &mut out);
    out
}

/// Resolve the outermost navigation element, if the page has one.
pub fn navigation_container(tree: &DomTree) -> Option<NodePath> {
    first_match(tree, CONTAINER_SELECTORS)
}

/// Resolve the link list inside a navigation container.
pub fn menu_list(tree: &DomTree, container: &NodePath) -> Option<NodePath> {
    first_match_within(tree, container, MENU_SELECTORS)
}

/// Secondary probe: a call-to-action element inside the container.
pub fn call_to_action(tree: &DomTree, container: &NodePath) -> Option<NodePath> {
    first_match_within(tree, container, CTA_SELECTORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    #[test]
    fn prefers_nav_tag_over_navbar_class() {
        let tree = parse_html(
            r#"<html><body>
                <div class="navbar"><ul></ul></div>
                <nav><ul></ul></nav>
            </body></html>"#,
            "test://",
        );
        let container = navigation_container(&tree).unwrap();
        assert_eq!(tree.node_at(&container).unwrap().tag, "nav");
    }

    #[test]
    fn falls_back_to_navbar_class() {
        let tree = parse_html(
            r#"<html><body><div class="navbar"><ul class="nav-links"></ul></div></body></html>"#,
            "test://",
        );
        let container = navigation_container(&tree).unwrap();
        assert!(tree.node_at(&container).unwrap().has_class("navbar"));
    }

    #[test]
    fn menu_candidates_are_ordered() {
        // A bare <ul> before a .nav-links list: the classed list wins.
        let tree = parse_html(
            r#"<html><body><nav>
                <ul class="crumbs"></ul>
                <ul class="nav-links"></ul>
            </nav></body></html>"#,
            "test://",
        );
        let container = navigation_container(&tree).unwrap();
        let menu = menu_list(&tree, &container).unwrap();
        assert!(tree.node_at(&menu).unwrap().has_class("nav-links"));
    }

    #[test]
    fn bare_ul_is_the_last_resort() {
        let tree = parse_html(
            r#"<html><body><nav><div><ul><li>Home</li></ul></div></nav></body></html>"#,
            "test://",
        );
        let container = navigation_container(&tree).unwrap();
        let menu = menu_list(&tree, &container).unwrap();
        assert_eq!(tree.node_at(&menu).unwrap().tag, "ul");
        assert!(menu.is_within(&container));
    }

    #[test]
    fn menu_probe_is_scoped_to_the_container() {
        // The .nav-menu outside <nav> must not be picked up.
        let tree = parse_html(
            r#"<html><body>
                <ul class="nav-menu" id="stray"></ul>
                <nav></nav>
            </body></html>"#,
            "test://",
        );
        let container = navigation_container(&tree).unwrap();
        assert_eq!(menu_list(&tree, &container), None);
    }

    #[test]
    fn absence_is_not_an_error() {
        let tree = parse_html("<html><body><p>No nav here.</p></body></html>", "test://");
        assert_eq!(navigation_container(&tree), None);
    }

    #[test]
    fn locates_call_to_action() {
        let tree = parse_html(
            r#"<html><body><nav>
                <ul class="nav-links"></ul>
                <a class="cta" href="/book">Book now</a>
            </nav></body></html>"#,
            "test://",
        );
        let container = navigation_container(&tree).unwrap();
        let cta = call_to_action(&tree, &container).unwrap();
        assert_eq!(tree.node_at(&cta).unwrap().attr("href"), Some("/book"));
    }
}
