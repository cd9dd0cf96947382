//! Same-page anchor link interception.
//!
//! Clicks on `<a href="#target">` are turned into smooth-scroll requests
//! instead of default navigation. Bare `#` and `#!` hrefs and targets
//! that match nothing are left to the platform untouched.

use crate::dom::{DomTree, NodePath};

/// Resolve a click into a same-page scroll target id.
///
/// The click may land on a child of the anchor (an icon, a span); the
/// nearest enclosing `<a>` decides.
pub fn intercept(tree: &DomTree, clicked: &NodePath) -> Option<String> {
    let anchor = tree.ancestor_matching(clicked, |n| n.is_element() && n.tag == "a")?;
    let href = tree.node_at(&anchor)?.attr("href")?;

    let target = href.strip_prefix('#')?;
    if target.is_empty() || target == "!" {
        return None;
    }
    if tree.find_by_id(target).is_none() {
        log::debug!("anchor: no element matches #{}", target);
        return None;
    }
    Some(target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    fn page() -> DomTree {
        parse_html(
            r##"<html><body>
                <a id="plain" href="/about">About</a>
                <a id="bare" href="#">Top</a>
                <a id="bang" href="#!">Noop</a>
                <a id="missing" href="#nowhere">Gone</a>
                <a id="good" href="#contact"><span>Contact us</span></a>
                <section id="contact">Contact</section>
            </body></html>"##,
            "test://",
        )
    }

    #[test]
    fn resolves_matching_target() {
        let tree = page();
        let link = tree.find_by_id("good").unwrap();
        assert_eq!(intercept(&tree, &link).as_deref(), Some("contact"));
    }

    #[test]
    fn click_inside_the_anchor_still_resolves() {
        let tree = page();
        let span = tree.find_path(|n| n.tag == "span").unwrap();
        assert_eq!(intercept(&tree, &span).as_deref(), Some("contact"));
    }

    #[test]
    fn bare_and_bang_hrefs_are_ignored() {
        let tree = page();
        let bare = tree.find_by_id("bare").unwrap();
        let bang = tree.find_by_id("bang").unwrap();
        assert_eq!(intercept(&tree, &bare), None);
        assert_eq!(intercept(&tree, &bang), None);
    }

    #[test]
    fn unmatched_target_is_ignored() {
        let tree = page();
        let missing = tree.find_by_id("missing").unwrap();
        assert_eq!(intercept(&tree, &missing), None);
    }

    #[test]
    fn external_links_are_ignored() {
        let tree = page();
        let plain = tree.find_by_id("plain").unwrap();
        assert_eq!(intercept(&tree, &plain), None);
    }
}
