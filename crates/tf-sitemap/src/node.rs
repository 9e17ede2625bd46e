//! Sitemap tree nodes.

use serde::Serialize;

use crate::lines::ScrapedTags;

/// A page or directory in the sitemap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SitemapNode {
    /// Page path without `.html`, or the directory name.
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub children: Vec<SitemapNode>,
}

impl SitemapNode {
    /// Empty node for the directory `name`.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Leaf node for a page.
    #[must_use]
    pub fn page(name: impl Into<String>, tags: ScrapedTags) -> Self {
        Self {
            name: name.into(),
            title: tags.title,
            description: tags.description,
            link: tags.link,
            children: Vec::new(),
        }
    }

    /// Take over the metadata of a directory's index page.
    ///
    /// Only values the page actually declares replace existing ones.
    pub fn absorb(&mut self, page: Self) {
        self.name = page.name;
        if page.title.is_some() {
            self.title = page.title;
        }
        if page.description.is_some() {
            self.description = page.description;
        }
        if page.link.is_some() {
            self.link = page.link;
        }
    }

    /// Whether a parent should keep this directory node.
    #[must_use]
    pub fn is_worth_listing(&self) -> bool {
        self.title.is_some() || !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_absorb_keeps_missing_values() {
        let mut node = SitemapNode::directory("docs");
        node.link = Some("existing".to_owned());

        node.absorb(SitemapNode::page(
            "templates/docs",
            ScrapedTags {
                title: Some("Docs".to_owned()),
                ..ScrapedTags::default()
            },
        ));

        assert_eq!(node.name, "templates/docs");
        assert_eq!(node.title.as_deref(), Some("Docs"));
        assert_eq!(node.link.as_deref(), Some("existing"));
    }

    #[test]
    fn test_is_worth_listing() {
        let mut node = SitemapNode::directory("empty");
        assert!(!node.is_worth_listing());

        node.children.push(SitemapNode::directory("child"));
        assert!(node.is_worth_listing());
    }

    #[test]
    fn test_serialize() {
        let node = SitemapNode::page(
            "templates/about",
            ScrapedTags {
                title: Some("About".to_owned()),
                ..ScrapedTags::default()
            },
        );

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "name": "templates/about",
                "title": "About",
                "description": null,
                "link": null,
                "children": [],
            })
        );
    }
}
