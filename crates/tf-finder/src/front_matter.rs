//! Front matter extraction for markdown pages.
//!
//! A page may start with a YAML block fenced by lines of three or more dashes:
//!
//! ```text
//! ---
//! wrapper_template: base.html
//! context:
//!   title: Install guide
//! markdown_includes:
//!   sidebar: docs/_sidebar.md
//! ---
//! # Install guide
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::path::TemplateRef;

/// Page metadata declared in front matter.
///
/// Mappings keep declaration order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    /// Template the rendered markdown is injected into. Required for rendering.
    #[serde(default)]
    pub wrapper_template: Option<TemplateRef>,

    /// Extra render context, overriding the per-path defaults.
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: IndexMap<String, Value>,

    /// Context keys filled with other markdown templates, rendered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub markdown_includes: IndexMap<String, TemplateRef>,

    /// Any other keys.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A markdown document split into metadata and body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontMatterDocument {
    /// Parsed front matter (default when the document has none).
    pub metadata: FrontMatter,
    /// Markdown source following the front matter, not yet variable-substituted.
    pub body: String,
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The front matter block is not valid YAML or has the wrong shape.
    #[error("Invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split `raw` into front matter and body.
///
/// Without an opening fence (or with one that is never closed) the metadata
/// is empty and the body is the full input.
///
/// # Errors
///
/// Returns an error if the fenced block is not valid YAML, or is a mapping
/// whose recognised keys have the wrong shape. YAML that is not a mapping
/// (a bare string, a list) carries no metadata.
pub fn parse(raw: &str) -> Result<FrontMatterDocument, FrontMatterError> {
    let Some((yaml, body)) = split(raw) else {
        return Ok(FrontMatterDocument {
            metadata: FrontMatter::default(),
            body: raw.to_owned(),
        });
    };

    let value: serde_yaml::Value = if yaml.trim().is_empty() {
        serde_yaml::Value::Null
    } else {
        serde_yaml::from_str(yaml)?
    };
    let metadata = if value.is_mapping() {
        serde_yaml::from_value(value)?
    } else {
        FrontMatter::default()
    };

    Ok(FrontMatterDocument {
        metadata,
        body: body.to_owned(),
    })
}

/// Locate the fenced block, returning `(yaml, body)`.
fn split(raw: &str) -> Option<(&str, &str)> {
    let text = raw.trim_start_matches('\u{feff}').trim();
    let mut lines = text.split_inclusive('\n');

    let first = lines.next()?;
    if !is_fence(first) {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if is_fence(line) {
            return Some((&text[start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn is_fence(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.bytes().all(|b| b == b'-')
}

/// Treat an explicit YAML `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_wrapper_and_body() {
        let doc = parse("---\nwrapper_template: base.html\n---\n# Heading\n").unwrap();

        assert_eq!(
            doc.metadata.wrapper_template,
            Some(TemplateRef::new("base.html"))
        );
        assert_eq!(doc.body, "# Heading");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let raw = "# Just markdown\n\nText.\n";
        let doc = parse(raw).unwrap();

        assert_eq!(doc.metadata, FrontMatter::default());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn test_parse_unclosed_fence_is_body() {
        let raw = "---\ntitle: never closed\n# Heading";
        let doc = parse(raw).unwrap();

        assert_eq!(doc.metadata, FrontMatter::default());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn test_parse_empty_block() {
        let doc = parse("---\n---\nBody").unwrap();

        assert_eq!(doc.metadata, FrontMatter::default());
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_parse_context_keeps_order_and_nesting() {
        let raw = "---\ncontext:\n  zeta: 1\n  alpha:\n    nested: [a, b]\n---\nBody";
        let doc = parse(raw).unwrap();

        let keys: Vec<_> = doc.metadata.context.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(doc.metadata.context["alpha"], json!({"nested": ["a", "b"]}));
    }

    #[test]
    fn test_parse_markdown_includes() {
        let raw = "---\nwrapper_template: base.html\nmarkdown_includes:\n  sidebar: _sidebar.md\n  footer: _footer.md\n---\n";
        let doc = parse(raw).unwrap();

        let includes: Vec<_> = doc
            .metadata
            .markdown_includes
            .iter()
            .map(|(k, v)| (k.as_str(), v.name()))
            .collect();
        assert_eq!(
            includes,
            vec![("sidebar", "_sidebar.md"), ("footer", "_footer.md")]
        );
        assert_eq!(doc.body, "");
    }

    #[test]
    fn test_parse_null_sections() {
        let doc = parse("---\ncontext:\nmarkdown_includes:\n---\nBody").unwrap();

        assert!(doc.metadata.context.is_empty());
        assert!(doc.metadata.markdown_includes.is_empty());
        assert!(doc.metadata.wrapper_template.is_none());
    }

    #[test]
    fn test_parse_extra_keys() {
        let doc = parse("---\ntitle: Guide\nwrapper_template: base.html\n---\n").unwrap();

        assert_eq!(doc.metadata.extra.get("title"), Some(&json!("Guide")));
        assert!(!doc.metadata.extra.contains_key("wrapper_template"));
    }

    #[test]
    fn test_parse_longer_fences_and_trailing_space() {
        let doc = parse("-----  \nwrapper_template: base.html\n----\nBody").unwrap();

        assert!(doc.metadata.wrapper_template.is_some());
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse("---\nwrapper_template: [unclosed\n---\nBody");

        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));
    }

    #[test]
    fn test_parse_wrong_shape() {
        assert!(parse("---\ncontext: [1, 2]\n---\nBody").is_err());
        assert!(parse("---\nwrapper_template: {name: base.html}\n---\nBody").is_err());
    }

    #[test]
    fn test_parse_non_mapping_yaml_has_no_metadata() {
        for raw in ["---\njust a note\n---\nBody", "---\n- a\n- b\n---\nBody"] {
            let doc = parse(raw).unwrap();

            assert_eq!(doc.metadata, FrontMatter::default());
            assert_eq!(doc.body, "Body");
        }
    }
}
