//! Inline `style=""` attribute editing.
//!
//! The visibility machinery drives `display` and `opacity` through the
//! style attribute, so edits must preserve unrelated declarations the
//! page author already wrote.

/// Read the value of one declaration from an inline style string.
pub fn style_value(style: &str, prop: &str) -> Option<String> {
    for decl in style.split(';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case(prop) {
            return Some(value.trim().to_string());
        }
    }
    None
}

/// Replace (or append) one declaration, keeping the others in order.
pub fn set_style_value(style: &str, prop: &str, value: &str) -> String {
    let mut decls: Vec<(String, String)> = Vec::new();
    for decl in style.split(';') {
        let Some((name, val)) = decl.split_once(':') else {
            continue;
        };
        let (name, val) = (name.trim(), val.trim());
        if name.is_empty() || val.is_empty() {
            continue;
        }
        decls.push((name.to_string(), val.to_string()));
    }

    let mut replaced = false;
    for (name, val) in &mut decls {
        if name.eq_ignore_ascii_case(prop) {
            *val = value.to_string();
            replaced = true;
        }
    }
    if !replaced {
        decls.push((prop.to_string(), value.to_string()));
    }

    decls
        .iter()
        .map(|(name, val)| format!("{}: {}", name, val))
        .collect::<Vec<_>>()
        .join("; ")
}
