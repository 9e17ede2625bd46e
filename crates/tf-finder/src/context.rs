//! Render context construction.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::path::UrlPath;

/// Ordered template context. Inserting an existing key overwrites its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(IndexMap<String, Value>);

impl RenderContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default context for `path`: `level_1..level_N`, one per segment.
    ///
    /// The root path yields `level_1 = ""`.
    #[must_use]
    pub fn for_path(path: &UrlPath) -> Self {
        let mut context = Self::new();
        for (i, segment) in path.segments().enumerate() {
            context.insert(format!("level_{}", i + 1), segment);
        }
        context
    }

    /// Set `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Overlay `entries` onto this context. Later entries win.
    pub fn merge<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.0.extend(entries);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
