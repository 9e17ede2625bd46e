//! Block rule table for list item content.

/// A block-level markdown construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRule {
    /// Blank lines.
    Newline,
    /// Indented code block.
    BlockCode,
    /// Fenced code block.
    Fences,
    /// ATX heading (`# Title`).
    Heading,
    /// Setext heading (`Title` underlined with `=` or `-`).
    LHeading,
    /// Horizontal rule.
    HRule,
    /// Pipe table with leading pipes.
    Table,
    /// Pipe table without leading pipes.
    NpTable,
    /// Block quote.
    BlockQuote,
    /// Nested list.
    ListBlock,
    /// Raw HTML block.
    BlockHtml,
    /// Plain text run.
    Text,
}

/// Block rules recognised inside list items, listed in precedence order.
///
/// `pulldown-cmark` applies its own precedence, so the renderer only reads
/// which rules are present. ATX headings are absent: a `# line` inside a
/// list item stays literal text. Tables are present, so pipe tables nest
/// inside list items.
pub const LIST_BLOCK_RULES: [BlockRule; 11] = [
    BlockRule::Newline,
    BlockRule::BlockCode,
    BlockRule::Fences,
    BlockRule::LHeading,
    BlockRule::HRule,
    BlockRule::Table,
    BlockRule::NpTable,
    BlockRule::BlockQuote,
    BlockRule::ListBlock,
    BlockRule::BlockHtml,
    BlockRule::Text,
];

/// Whether `rule` is recognised by the given rule table.
pub(crate) fn allows(rules: &[BlockRule], rule: BlockRule) -> bool {
    rules.contains(&rule)
}
