//! Line-based template introspection.
//!
//! Pages are recognised by scanning their source line by line for
//! `{% extends %}` and a few well-known `{% block %}` tags. Nothing here
//! touches the filesystem.

use std::sync::LazyLock;

use regex::Regex;

static EXTENDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{%-?\s*extends\s+(?:"([^"]*)"|'([^']*)')\s*-?%\}"#).unwrap()
});
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| block_re("title"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| block_re("meta_description"));
static COPYDOC_RE: LazyLock<Regex> = LazyLock::new(|| block_re("meta_copydoc"));
static LEADING_TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s*\{%.*?%\})+").unwrap());
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[{%#]").unwrap());

/// File name prefixes of layout templates, which are never pages.
pub const TEMPLATE_PREFIXES: [&str; 2] = ["base", "_base"];

fn block_re(name: &str) -> Regex {
    Regex::new(&format!(
        r"\{{%-?\s*block\s+{name}\s*-?%\}}(.*?)\{{%-?\s*endblock"
    ))
    .unwrap()
}

/// Page metadata scraped from block tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedTags {
    /// `{% block title %}`
    pub title: Option<String>,
    /// `{% block meta_description %}`
    pub description: Option<String>,
    /// `{% block meta_copydoc %}`
    pub link: Option<String>,
}

impl ScrapedTags {
    fn is_complete(&self) -> bool {
        self.title.is_some() && self.description.is_some() && self.link.is_some()
    }
}

/// Whether `file_name` names a layout template rather than a page.
#[must_use]
pub fn is_template(file_name: &str) -> bool {
    TEMPLATE_PREFIXES
        .iter()
        .any(|prefix| file_name.starts_with(prefix))
}

/// Every `{% extends %}` target in `lines`, in order.
pub fn extends_targets<'a, I>(lines: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(|line| {
        let caps = EXTENDS_RE.captures(line)?;
        caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
    })
}

/// The first `{% extends %}` target in `lines`.
pub fn extended_path<'a, I>(lines: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    extends_targets(lines).next()
}

/// Scrape the title, description and link blocks.
///
/// The first occurrence of each tag wins; scanning stops once all three are
/// known.
pub fn scrape_tags<'a, I>(lines: I) -> ScrapedTags
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tags = ScrapedTags::default();
    for line in lines {
        for (re, slot) in [
            (&*TITLE_RE, &mut tags.title),
            (&*DESCRIPTION_RE, &mut tags.description),
            (&*COPYDOC_RE, &mut tags.link),
        ] {
            if slot.is_none()
                && let Some(caps) = re.captures(line)
            {
                *slot = Some(clean_tag(&caps[1]));
            }
        }
        if tags.is_complete() {
            break;
        }
    }
    tags
}

/// Strip Jinja markup embedded in a scraped tag value.
///
/// Leading statement tags are dropped and the value is cut at the next
/// markup. A value that is nothing but markup is returned trimmed.
///
/// ```
/// use tf_sitemap::clean_tag;
///
/// assert_eq!(
///     clean_tag("Search results{% if query %} for '{{ query }}'{% endif %}"),
///     "Search results"
/// );
/// assert_eq!(
///     clean_tag("{% if user_info %}Ubuntu Pro Dashboard{% else %}Ubuntu Pro{% endif %}"),
///     "Ubuntu Pro Dashboard"
/// );
/// ```
#[must_use]
pub fn clean_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    let rest = LEADING_TAGS_RE.replace(trimmed, "");
    let cut = match MARKUP_RE.find(&rest) {
        Some(m) => &rest[..m.start()],
        None => &rest[..],
    };
    let cleaned = cut.trim();
    if cleaned.is_empty() {
        trimmed.to_owned()
    } else {
        cleaned.to_owned()
    }
}
