pub mod locate;
pub mod normalize;
pub mod parser;
pub mod style;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
}

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Owned DOM node. The enhancement layer mutates this tree directly;
/// the scraper arena is only used at parse time.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

/// Address of a node as child indices from the root element.
///
/// Paths are recomputed from the live tree per event and never cached
/// across mutations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut p = self.0.clone();
        p.push(index);
        NodePath(p)
    }

    pub fn parent(&self) -> Option<NodePath> {
        if self.0.is_empty() {
            return None;
        }
        Some(NodePath(self.0[..self.0.len() - 1].to_vec()))
    }

    /// True when `ancestor` is this path or one of its prefixes.
    pub fn is_within(&self, ancestor: &NodePath) -> bool {
        self.0.starts_with(&ancestor.0)
    }

    pub fn join(&self, relative: &[usize]) -> NodePath {
        let mut p = self.0.clone();
        p.extend_from_slice(relative);
        NodePath(p)
    }

    /// Index of this node among its parent's children.
    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

impl DomNode {
    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// The element id, treating an empty attribute as absent.
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|v| !v.is_empty())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|v| v == class))
            .unwrap_or(false)
    }

    /// Append a class, preserving whatever classes the author put there.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let updated = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr("class", updated);
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(existing) = self.attr("class") {
            let remaining: Vec<&str> = existing
                .split_whitespace()
                .filter(|v| *v != class)
                .collect();
            self.set_attr("class", remaining.join(" "));
        }
    }

    /// Read one declaration out of the inline `style` attribute.
    pub fn style_prop(&self, prop: &str) -> Option<String> {
        self.attr("style").and_then(|s| style::style_value(s, prop))
    }

    /// Patch one declaration in the inline `style` attribute, leaving the
    /// rest untouched.
    pub fn set_style_prop(&mut self, prop: &str, value: &str) {
        let updated = style::set_style_value(self.attr("style").unwrap_or(""), prop, value);
        self.set_attr("style", updated);
    }

    pub fn push_child(&mut self, child: DomNode) {
        self.children.push(child);
    }

    /// Insert a child at `index`, clamped to the current child count.
    pub fn insert_child(&mut self, index: usize, child: DomNode) {
        let at = index.min(self.children.len());
        self.children.insert(at, child);
    }

    /// Recursively count all nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Collect all text content recursively
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        if !self.text.is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(self.text.trim());
        }
        for child in &self.children {
            child.collect_text_inner(buf);
        }
    }

    /// Serialize this subtree back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => out.push_str(&escape_text(&self.text)),
            NodeType::Element => {
                out.push('<');
                out.push_str(&self.tag);
                // Deterministic attribute order
                let mut names: Vec<&String> = self.attributes.keys().collect();
                names.sort();
                for name in names {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(&self.attributes[name]));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&self.tag.as_str()) {
                    return;
                }
                // Script/style text is emitted raw; escaping would corrupt it.
                let raw_text = matches!(self.tag.as_str(), "script" | "style");
                for child in &self.children {
                    if raw_text && child.node_type == NodeType::Text {
                        out.push_str(&child.text);
                    } else {
                        child.write_html(out);
                    }
                }
                out.push_str("</");
                out.push_str(&self.tag);
                out.push('>');
            }
        }
    }
}

fn preorder_walk<F>(node: &DomNode, path: &mut Vec<usize>, pred: &F) -> Option<NodePath>
where
    F: Fn(&DomNode) -> bool,
{
    if pred(node) {
        return Some(NodePath(path.clone()));
    }
    for (i, child) in node.children.iter().enumerate() {
        path.push(i);
        if let Some(found) = preorder_walk(child, path, pred) {
            return Some(found);
        }
        path.pop();
    }
    None
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Parsed page with metadata. The root is the `<html>` element.
#[derive(Debug, Clone)]
pub struct DomTree {
    pub root: DomNode,
    pub url: String,
    pub title: String,
}

impl DomTree {
    pub fn node_at(&self, path: &NodePath) -> Option<&DomNode> {
        let mut node = &self.root;
        for &idx in &path.0 {
            node = node.children.get(idx)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut DomNode> {
        let mut node = &mut self.root;
        for &idx in &path.0 {
            node = node.children.get_mut(idx)?;
        }
        Some(node)
    }

    /// Preorder search for the first node satisfying `pred`.
    pub fn find_path<F>(&self, pred: F) -> Option<NodePath>
    where
        F: Fn(&DomNode) -> bool,
    {
        preorder_walk(&self.root, &mut Vec::new(), &pred)
    }

    /// Preorder search among the descendants of `scope` (the scope
    /// element itself is never a candidate).
    pub fn find_path_within<F>(&self, scope: &NodePath, pred: F) -> Option<NodePath>
    where
        F: Fn(&DomNode) -> bool,
    {
        let scope_node = self.node_at(scope)?;
        let mut path = Vec::new();
        for (i, child) in scope_node.children.iter().enumerate() {
            path.push(i);
            if let Some(found) = preorder_walk(child, &mut path, &pred) {
                return Some(scope.join(&found.0));
            }
            path.pop();
        }
        None
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodePath> {
        self.find_path(|n| n.id() == Some(id))
    }

    pub fn body_path(&self) -> Option<NodePath> {
        self.find_path(|n| n.is_element() && n.tag == "body")
    }

    /// Nearest ancestor-or-self of `path` satisfying `pred`.
    pub fn ancestor_matching<F>(&self, path: &NodePath, pred: F) -> Option<NodePath>
    where
        F: Fn(&DomNode) -> bool,
    {
        let mut current = path.clone();
        loop {
            if let Some(node) = self.node_at(&current) {
                if pred(node) {
                    return Some(current);
                }
            }
            current = current.parent()?;
        }
    }

    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.root.to_html())
    }
}
