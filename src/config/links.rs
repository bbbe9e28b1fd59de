//! External web links shown by the settings screen.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;
use url::Url;

/// Key of the Q&A page.
pub const QA: &str = "QA";
/// Key of the contact form.
pub const CONTACT: &str = "Contact";

/// Raw `[links]` table: key to URL string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Links(HashMap<String, String>);

impl Links {
    /// Resolves `key` to a parsed URL. Unknown keys and malformed URLs yield `None`; the latter
    /// are logged.
    #[must_use]
    pub fn resolve_link(&self, key: &str) -> Option<Url> {
        let raw = self.0.get(key)?;
        Url::parse(raw)
            .inspect_err(|e| warn!("Ignoring malformed link {} = {:?}: {}", key, raw, e))
            .ok()
    }

    /// Keys that are configured, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl FromIterator<(String, String)> for Links {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
