//! Tag extraction

use crate::ast::{FrontMatterValue, InlineToken, ParseResult};
use unic_emoji_char::is_emoji;

const TAGS_KEY: &str = "tags";

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || (is_emoji(c) && c != '#') || matches!(c, '_' | '-' | '/')
}

fn frontmatter_tags(value: &FrontMatterValue) -> Vec<String> {
    let strip = |tag: &str| tag.trim().trim_start_matches('#').to_string();

    match value {
        FrontMatterValue::List(items) => items
            .iter()
            .map(|item| strip(item))
            .filter(|tag| !tag.is_empty())
            .collect(),
        FrontMatterValue::String(text) => text
            .split([',', ' '])
            .map(strip)
            .filter(|tag| !tag.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Tags written as `#tag` words in `text`
///
/// `##heading` is not a tag and purely numeric words like `#123` are skipped.
/// The tag ends at the first character that cannot be part of it.
fn text_tags(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .filter_map(|word| word.strip_prefix('#'))
        .filter(|rest| !rest.starts_with('#'))
        .filter_map(|rest| {
            let end = rest.find(|c| !is_tag_char(c)).unwrap_or(rest.len());
            let tag = &rest[..end];

            (!tag.is_empty() && !tag.chars().all(|c| c.is_ascii_digit())).then(|| tag.to_string())
        })
}

/// Tags of a document
///
/// Frontmatter `tags` (list or comma separated string) come first,
/// followed by inline `#tag` words in document order. Code is never searched.
///
/// # Example
/// ```
/// use obsidian_markdown::prelude::*;
///
/// let result = parse("---\ntags:\n- my_tag\n---\nSameData #super_tag ##no_tag and #warning_tag! #😭");
///
/// assert_eq!(collect_tags(&result), vec!["my_tag", "super_tag", "warning_tag", "😭"]);
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, ret))]
#[must_use]
pub fn collect_tags(result: &ParseResult) -> Vec<String> {
    let mut tags = result
        .frontmatter
        .get(TAGS_KEY)
        .map(frontmatter_tags)
        .unwrap_or_default();

    result.visit_inline(|token| {
        if let InlineToken::Text { content } = token {
            tags.extend(text_tags(content));
        }
    });

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const TEST_STR_DATA: &str = "---\ntags:\n- my_tag\n---\nSameData #super_tag ##no_tag and #warning_tag! #two-tag #kek;d #dfds# #all, #татар #d😭";
    const TEST_ARRAY_DATA: &[&str] = &[
        "my_tag",
        "super_tag",
        "warning_tag",
        "two-tag",
        "kek",
        "dfds",
        "all",
        "татар",
        "d😭",
    ];

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn tags() {
        assert_eq!(collect_tags(&parse(TEST_STR_DATA)), TEST_ARRAY_DATA);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn frontmatter_forms() {
        assert_eq!(
            collect_tags(&parse("---\ntags: [a, \"#b\"]\n---\n")),
            vec!["a", "b"]
        );
        assert_eq!(
            collect_tags(&parse("---\ntags: one, two three\n---\n")),
            vec!["one", "two", "three"]
        );
        assert!(collect_tags(&parse("---\ntags: 5\n---\n")).is_empty());
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn nested_and_numeric() {
        assert_eq!(
            collect_tags(&parse("#parent/child issue #123 #1st")),
            vec!["parent/child", "1st"]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn ignores_code_and_headings() {
        let result = parse("# Heading\n\n`#inline`\n\n```\n#fenced\n```\n\n- item **#bold**");
        assert_eq!(collect_tags(&result), vec!["bold"]);
    }
}
