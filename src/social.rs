//! Social platform link directory.
//!
//! The legacy markup wires share icons to a handler by platform name.
//! The table behind that handler is plain configuration here: injected
//! at initialization, looked up purely, and an unknown name yields a
//! diagnostic instead of a navigation.

use std::collections::HashMap;

use url::Url;

const DEFAULT_LINKS: &[(&str, &str)] = &[
    ("Facebook", "https://www.facebook.com"),
    ("Instagram", "https://www.instagram.com"),
    ("X", "https://twitter.com"),
    ("LinkedIn", "https://www.linkedin.com"),
];

#[derive(Debug, Clone)]
pub struct SocialDirectory {
    links: HashMap<String, String>,
}

impl Default for SocialDirectory {
    fn default() -> Self {
        let links = DEFAULT_LINKS
            .iter()
            .map(|(name, url)| (name.to_string(), url.to_string()))
            .collect();
        Self { links }
    }
}

impl SocialDirectory {
    /// An empty directory, for deployments that configure every entry.
    pub fn empty() -> Self {
        Self {
            links: HashMap::new(),
        }
    }

    pub fn insert(&mut self, platform: impl Into<String>, url: impl Into<String>) {
        self.links.insert(platform.into(), url.into());
    }

    /// Resolve a platform name to its destination.
    ///
    /// Unknown names and malformed configured URLs log a warning and
    /// resolve to nothing; neither interrupts the caller.
    pub fn resolve(&self, platform: &str) -> Option<Url> {
        let raw = match self.links.get(platform) {
            Some(raw) => raw,
            None => {
                log::warn!("social: no URL defined for {}", platform);
                return None;
            }
        };
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("social: configured URL for {} is invalid: {}", platform, e);
                None
            }
        }
    }
}
