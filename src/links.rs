//! Link extraction
//!
//! Collects the targets a link-graph consumer needs from a parsed document.

use crate::ast::{InlineToken, ParseResult};
use std::collections::HashSet;

fn collect_unique<'t>(
    result: &'t ParseResult,
    select: impl Fn(&'t InlineToken) -> Option<&'t str>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    result.visit_inline(|token| {
        if let Some(target) = select(token) {
            if seen.insert(target) {
                targets.push(target.to_string());
            }
        }
    });

    targets
}

/// Unique wikilink targets in first-occurrence order
///
/// Targets are returned verbatim, anchors included.
/// Use [`WikiLink::note_name`](crate::ast::WikiLink::note_name) to strip them.
///
/// # Example
/// ```
/// use obsidian_markdown::prelude::*;
///
/// let result = parse("[[B]] and [[A|alias]]\n\n> [!note]\n> [[B]] again, [[C#Part]]");
///
/// assert_eq!(collect_wikilinks(&result), vec!["B", "A", "C#Part"]);
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, ret))]
#[must_use]
pub fn collect_wikilinks(result: &ParseResult) -> Vec<String> {
    collect_unique(result, |token| match token {
        InlineToken::WikiLink(link) => Some(link.target.as_str()),
        _ => None,
    })
}

/// Unique embed targets in first-occurrence order
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, ret))]
#[must_use]
pub fn collect_embeds(result: &ParseResult) -> Vec<String> {
    collect_unique(result, |token| match token {
        InlineToken::Embed { target } => Some(target.as_str()),
        _ => None,
    })
}
