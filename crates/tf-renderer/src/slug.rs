//! Heading anchor slugs.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<]+?>").unwrap());
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&\w+;").unwrap());
static NON_SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w-]").unwrap());

/// Convert rendered heading HTML to an anchor slug.
///
/// Spaces become dashes and the result is lowercased, then HTML tags,
/// HTML entities, and any remaining character that is not a word character
/// or `-` are removed. Repeated or trailing dashes are kept as they are.
///
/// # Examples
///
/// ```
/// use tf_renderer::slugify;
///
/// assert_eq!(slugify("This is a heading"), "this-is-a-heading");
/// assert_eq!(
///     slugify("<code>&lt;h1&gt;</code> with 'special' chars"),
///     "h1-with-special-chars"
/// );
/// ```
#[must_use]
pub fn slugify(html: &str) -> String {
    let dashed = html.replace(' ', "-").to_lowercase();
    let without_tags = TAG_RE.replace_all(&dashed, "");
    let without_entities = ENTITY_RE.replace_all(&without_tags, "");
    NON_SLUG_RE.replace_all(&without_entities, "").into_owned()
}
