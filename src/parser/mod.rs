//! Obsidian-flavored Markdown parser
//!
//! The parser is a total function: every input produces a [`ParseResult`],
//! unmatched syntax degrades to plain text instead of failing.
//!
//! Parsing runs in three stages:
//! 1. [`frontmatter::extract`] splits the `---` preamble from the body
//! 2. [`block`] splits the body into block tokens, recursing into quotes, callouts and list items
//! 3. [`inline::parse_inline`] scans the text of leaf blocks into inline tokens
//!
//! # Example
//! ```
//! use obsidian_markdown::prelude::*;
//!
//! let result = parse("---\ntitle: Test\n---\n\nThis is **bold** text");
//!
//! assert_eq!(result.frontmatter["title"], "Test");
//! assert_eq!(result.tokens.len(), 1);
//! ```

pub mod block;
pub mod frontmatter;
pub mod inline;

use crate::ast::ParseResult;

/// Default value of [`ParseOptions::max_depth`]
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for [`parse_with_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of recursive constructs
    ///
    /// Blockquotes, callouts, list items, emphasis and link text each add one level.
    /// Content nested deeper than this is kept as plain text.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Set [`ParseOptions::max_depth`]
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse a Markdown document with default [`ParseOptions`]
///
/// # Example
/// ```
/// use obsidian_markdown::prelude::*;
///
/// let result = parse("Link to [[Another Page|custom text]]");
/// let BlockToken::Paragraph { children } = &result.tokens[0] else { panic!() };
///
/// assert_eq!(
///     children[1],
///     InlineToken::WikiLink(WikiLink {
///         target: "Another Page".to_string(),
///         display: Some("custom text".to_string()),
///     })
/// );
/// ```
#[must_use]
pub fn parse(markdown: &str) -> ParseResult {
    parse_with_options(markdown, &ParseOptions::default())
}

/// Parse a Markdown document
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(len = markdown.len())))]
#[must_use]
pub fn parse_with_options(markdown: &str, options: &ParseOptions) -> ParseResult {
    #[cfg(feature = "tracing")]
    tracing::trace!("Parse markdown");

    let normalized;
    let markdown = if markdown.contains('\r') {
        normalized = markdown.replace("\r\n", "\n");
        normalized.as_str()
    } else {
        markdown
    };

    let (frontmatter, body) = frontmatter::extract(markdown);
    let lines: Vec<&str> = body.split('\n').collect();
    let tokens = block::BlockParser::new(options).parse(&lines);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Parsed {} frontmatter keys and {} blocks",
        frontmatter.len(),
        tokens.len()
    );

    ParseResult {
        frontmatter,
        tokens,
    }
}
