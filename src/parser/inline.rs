//! Inline scanner
//!
//! A single left-to-right pass. At every position the rules below are tried in
//! order and the first one that finds a complete, closed construct wins;
//! otherwise the character goes into the pending text run.
//!
//! 1. Escape `\*`, only before ASCII punctuation so `C:\path` keeps its `\`
//! 2. Hard line break (two trailing spaces or `\` before a newline)
//! 3. Embed `![[target]]`
//! 4. Wikilink `[[target]]` / `[[target|display]]`
//! 5. Image `![alt](src "title")`
//! 6. Link `[text](href "title")`
//! 7. Autolink `<https://...>`
//! 8. Highlight `==text==`
//! 9. Strikethrough `~~text~~`
//! 10. Bold-italic `***text***` / `___text___`
//! 11. Bold `**text**` / `__text__`
//! 12. Italic `*text*` / `_text_`
//! 13. Code `` `code` `` / ``` ``code`` ```

use crate::ast::{Image, InlineToken, Link, WikiLink};
use regex::Regex;
use std::sync::LazyLock;

static AUTOLINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used, reason = "Static pattern")]
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]{1,31}:[^\s<>]+$").unwrap()
});

/// Scan `text` into inline tokens with default nesting depth
///
/// # Example
/// ```
/// use obsidian_markdown::ast::InlineToken;
/// use obsidian_markdown::parser::inline::parse_inline;
///
/// let tokens = parse_inline("This is **bold** text");
///
/// assert_eq!(
///     tokens,
///     vec![
///         InlineToken::text("This is "),
///         InlineToken::Bold { children: vec![InlineToken::text("bold")] },
///         InlineToken::text(" text"),
///     ]
/// );
/// ```
#[must_use]
pub fn parse_inline(text: &str) -> Vec<InlineToken> {
    parse_inline_with_depth(text, 0, crate::parser::DEFAULT_MAX_DEPTH)
}

pub(crate) fn parse_inline_with_depth(text: &str, depth: usize, max_depth: usize) -> Vec<InlineToken> {
    InlineScanner::new(text, depth, max_depth).scan()
}

/// Emphasis-like delimiters, longest first within a family
#[derive(Debug, Clone, Copy)]
enum Emphasis {
    Highlight,
    Strikethrough,
    BoldItalic,
    Bold,
    Italic,
}

impl Emphasis {
    fn wrap(self, children: Vec<InlineToken>) -> InlineToken {
        match self {
            Self::Highlight => InlineToken::Highlight { children },
            Self::Strikethrough => InlineToken::Strikethrough { children },
            Self::BoldItalic => InlineToken::BoldItalic { children },
            Self::Bold => InlineToken::Bold { children },
            Self::Italic => InlineToken::Italic { children },
        }
    }
}

struct InlineScanner<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
    pending: String,
    tokens: Vec<InlineToken>,
}

impl<'a> InlineScanner<'a> {
    const fn new(text: &'a str, depth: usize, max_depth: usize) -> Self {
        Self {
            text,
            pos: 0,
            depth,
            max_depth,
            pending: String::new(),
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<InlineToken> {
        while let Some(c) = self.text[self.pos..].chars().next() {
            if !self.try_rules(c) {
                self.pending.push(c);
                self.pos += c.len_utf8();
            }
        }

        self.flush();
        merge_text(self.tokens)
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let content = std::mem::take(&mut self.pending);
            self.tokens.push(InlineToken::Text { content });
        }
    }

    fn emit(&mut self, token: InlineToken, next: usize) {
        self.flush();
        self.tokens.push(token);
        self.pos = next;
    }

    /// Returns `true` if a rule consumed input
    fn try_rules(&mut self, c: char) -> bool {
        match c {
            '\\' => self.escape() || self.hard_break(),
            ' ' => self.hard_break(),
            '!' => self.embed() || self.image(),
            '[' => self.wikilink() || self.link(),
            '<' => self.autolink(),
            '=' => self.emphasis("==", Emphasis::Highlight),
            '~' => self.emphasis("~~", Emphasis::Strikethrough),
            '*' => {
                self.emphasis("***", Emphasis::BoldItalic)
                    || self.emphasis("**", Emphasis::Bold)
                    || self.emphasis("*", Emphasis::Italic)
            }
            '_' => {
                self.emphasis("___", Emphasis::BoldItalic)
                    || self.emphasis("__", Emphasis::Bold)
                    || self.emphasis("_", Emphasis::Italic)
            }
            '`' => self.code(),
            _ => false,
        }
    }

    fn escape(&mut self) -> bool {
        let Some(next) = self.rest()[1..].chars().next() else {
            return false;
        };

        if !next.is_ascii_punctuation() {
            return false;
        }

        self.pending.push(next);
        self.pos += 1 + next.len_utf8();
        true
    }

    fn hard_break(&mut self) -> bool {
        let rest = self.rest();

        if rest.starts_with("\\\n") {
            self.emit(InlineToken::LineBreak, self.pos + 2);
            return true;
        }

        let spaces = rest.bytes().take_while(|b| *b == b' ').count();
        if spaces >= 2 && rest[spaces..].starts_with('\n') {
            self.emit(InlineToken::LineBreak, self.pos + spaces + 1);
            return true;
        }

        false
    }

    fn embed(&mut self) -> bool {
        let rest = self.rest();
        let Some(inner) = rest.strip_prefix("![[") else {
            return false;
        };

        let Some(end) = inner.find("]]") else {
            return false;
        };

        let target = inner[..end].trim();
        if target.is_empty() {
            return false;
        }

        let token = InlineToken::Embed {
            target: target.to_string(),
        };
        self.emit(token, self.pos + 3 + end + 2);
        true
    }

    fn wikilink(&mut self) -> bool {
        let rest = self.rest();
        let Some(inner) = rest.strip_prefix("[[") else {
            return false;
        };

        let Some(end) = inner.find("]]") else {
            return false;
        };

        let inner = &inner[..end];
        let (target, display) = match inner.split_once('|') {
            // `\|` separates target and display inside table cells
            Some((target, display)) => (
                target.trim_end_matches('\\').trim(),
                Some(display.trim()),
            ),
            None => (inner.trim(), None),
        };

        if target.is_empty() || target.contains('\n') {
            return false;
        }

        let token = InlineToken::WikiLink(WikiLink {
            target: target.to_string(),
            display: display.filter(|d| !d.is_empty()).map(ToString::to_string),
        });
        self.emit(token, self.pos + 2 + end + 2);
        true
    }

    fn image(&mut self) -> bool {
        let rest = self.rest();
        if !rest.starts_with("![") {
            return false;
        }

        let Some((label_end, dest_end)) = link_parts(rest, 1) else {
            return false;
        };

        let alt = &rest[2..label_end];
        let (src, title) = split_destination(&rest[label_end + 2..dest_end]);

        let token = InlineToken::Image(Image {
            src: src.to_string(),
            alt: alt.to_string(),
            title: title.map(ToString::to_string),
        });
        self.emit(token, self.pos + dest_end + 1);
        true
    }

    fn link(&mut self) -> bool {
        let rest = self.rest();
        let Some((label_end, dest_end)) = link_parts(rest, 0) else {
            return false;
        };

        let (href, title) = split_destination(&rest[label_end + 2..dest_end]);
        let children = self.nested(&rest[1..label_end]);

        let token = InlineToken::Link(Link {
            href: href.to_string(),
            title: title.map(ToString::to_string),
            children,
        });
        self.emit(token, self.pos + dest_end + 1);
        true
    }

    fn autolink(&mut self) -> bool {
        let rest = self.rest();
        let Some(end) = rest.find('>') else {
            return false;
        };

        let url = &rest[1..end];
        if !AUTOLINK_REGEX.is_match(url) {
            return false;
        }

        let token = InlineToken::Link(Link {
            href: url.to_string(),
            title: None,
            children: vec![InlineToken::text(url)],
        });
        self.emit(token, self.pos + end + 1);
        true
    }

    fn emphasis(&mut self, delimiter: &str, kind: Emphasis) -> bool {
        let rest = self.rest();
        if !rest.starts_with(delimiter) {
            return false;
        }

        let after = &rest[delimiter.len()..];
        if after.is_empty() || after.starts_with(char::is_whitespace) {
            return false;
        }

        let single = delimiter.len() == 1;
        if single && after.starts_with(delimiter) {
            return false;
        }

        // intraword `_` is not emphasis
        if delimiter.starts_with('_') && self.text[..self.pos].ends_with(char::is_alphanumeric) {
            return false;
        }

        let Some(close) = find_closing(after, delimiter, single) else {
            return false;
        };

        let content = &after[..close];
        if content.is_empty() {
            return false;
        }

        let children = self.nested(content);
        let next = self.pos + delimiter.len() + close + delimiter.len();
        self.emit(kind.wrap(children), next);
        true
    }

    fn code(&mut self) -> bool {
        let rest = self.rest();

        for delimiter in ["``", "`"] {
            if !rest.starts_with(delimiter) {
                continue;
            }

            let after = &rest[delimiter.len()..];
            let Some(close) = find_unescaped(after, delimiter, 0) else {
                continue;
            };

            let content = &after[..close];
            if content.is_empty() {
                continue;
            }

            let content = if delimiter.len() == 2 {
                content
                    .strip_prefix(' ')
                    .and_then(|c| c.strip_suffix(' '))
                    .unwrap_or(content)
            } else {
                content
            };

            let token = InlineToken::Code {
                content: content.to_string(),
            };
            self.emit(token, self.pos + delimiter.len() + close + delimiter.len());
            return true;
        }

        false
    }

    /// Scan nested content one level deeper, or keep it as text past the limit
    fn nested(&self, content: &str) -> Vec<InlineToken> {
        if self.depth >= self.max_depth {
            #[cfg(feature = "tracing")]
            tracing::trace!("Inline nesting limit reached, keep as text");

            return vec![InlineToken::text(content)];
        }

        parse_inline_with_depth(content, self.depth + 1, self.max_depth)
    }
}

/// Returns `true` if the byte at `index` is preceded by an odd number of `\`
fn is_escaped(text: &str, index: usize) -> bool {
    text.as_bytes()[..index]
        .iter()
        .rev()
        .take_while(|b| **b == b'\\')
        .count()
        % 2
        == 1
}

/// Find `delimiter` at or after `from`, skipping escaped occurrences
///
/// An escaped hit advances the search by one byte, a closer may overlap it
/// as in `a\***`.
fn find_unescaped(text: &str, delimiter: &str, mut from: usize) -> Option<usize> {
    while let Some(offset) = text.get(from..)?.find(delimiter) {
        let index = from + offset;
        if !is_escaped(text, index) {
            return Some(index);
        }

        from = index + 1;
    }

    None
}

/// Find the closing delimiter of an emphasis run
///
/// A single-character delimiter only closes when it is not part of a longer
/// run and is not preceded by whitespace.
fn find_closing(text: &str, delimiter: &str, single: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let delimiter_byte = delimiter.as_bytes()[0];
    let mut from = 0;

    while let Some(index) = find_unescaped(text, delimiter, from) {
        from = index + 1;

        if !single {
            return Some(index);
        }

        let before = text[..index].chars().next_back();
        let run_before = index > 0 && bytes[index - 1] == delimiter_byte;
        let run_after = bytes.get(index + 1) == Some(&delimiter_byte);

        if run_before || run_after {
            from = index + bytes[index..].iter().take_while(|b| **b == delimiter_byte).count();
            continue;
        }

        if before.is_some_and(char::is_whitespace) {
            continue;
        }

        if delimiter == "_" && text[index + 1..].starts_with(char::is_alphanumeric) {
            continue;
        }

        return Some(index);
    }

    None
}

/// Locate `]` and `)` of `[label](destination)` starting at `offset`
///
/// Brackets in the label nest, parentheses in the destination nest.
fn link_parts(text: &str, offset: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let label_end = matching(bytes, offset, b'[', b']')?;

    if bytes.get(label_end + 1) != Some(&b'(') {
        return None;
    }

    let dest_end = matching(bytes, label_end + 1, b'(', b')')?;
    Some((label_end, dest_end))
}

fn matching(bytes: &[u8], open_index: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut index = open_index;

    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 1,
            b'\n' if open == b'(' => return None,
            byte if byte == open => depth += 1,
            byte if byte == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }

        index += 1;
    }

    None
}

/// Split `href "title"` into its parts
fn split_destination(destination: &str) -> (&str, Option<&str>) {
    let destination = destination.trim();

    if let Some(quoted) = destination.strip_suffix('"') {
        if let Some((href, title)) = quoted.split_once(" \"") {
            return (href.trim(), Some(title));
        }
    }

    let href = destination
        .strip_prefix('<')
        .and_then(|d| d.strip_suffix('>'))
        .unwrap_or(destination);

    (href, None)
}

/// Merge adjacent [`InlineToken::Text`] tokens
fn merge_text(tokens: Vec<InlineToken>) -> Vec<InlineToken> {
    let mut merged: Vec<InlineToken> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match (merged.last_mut(), token) {
            (Some(InlineToken::Text { content }), InlineToken::Text { content: next }) => {
                content.push_str(&next);
            }
            (_, token) => merged.push(token),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> InlineToken {
        InlineToken::text(content)
    }

    fn wikilink(target: &str, display: Option<&str>) -> InlineToken {
        InlineToken::WikiLink(WikiLink {
            target: target.to_string(),
            display: display.map(ToString::to_string),
        })
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn plain_text() {
        assert_eq!(parse_inline("just text"), vec![text("just text")]);
        assert_eq!(parse_inline(""), Vec::new());
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn emphasis_family() {
        assert_eq!(
            parse_inline("**b** *i* ***bi*** ~~s~~ ==h=="),
            vec![
                InlineToken::Bold { children: vec![text("b")] },
                text(" "),
                InlineToken::Italic { children: vec![text("i")] },
                text(" "),
                InlineToken::BoldItalic { children: vec![text("bi")] },
                text(" "),
                InlineToken::Strikethrough { children: vec![text("s")] },
                text(" "),
                InlineToken::Highlight { children: vec![text("h")] },
            ]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn underscore_emphasis() {
        assert_eq!(
            parse_inline("__b__ _i_"),
            vec![
                InlineToken::Bold { children: vec![text("b")] },
                text(" "),
                InlineToken::Italic { children: vec![text("i")] },
            ]
        );
        assert_eq!(parse_inline("snake_case_name"), vec![text("snake_case_name")]);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn nested_emphasis() {
        assert_eq!(
            parse_inline("**bold with *italic* inside**"),
            vec![InlineToken::Bold {
                children: vec![
                    text("bold with "),
                    InlineToken::Italic { children: vec![text("italic")] },
                    text(" inside"),
                ]
            }]
        );

        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![InlineToken::Italic {
                children: vec![
                    text("a "),
                    InlineToken::Bold { children: vec![text("b")] },
                    text(" c"),
                ]
            }]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn space_after_delimiter_is_text() {
        assert_eq!(parse_inline("** not bold**"), vec![text("** not bold**")]);
        assert_eq!(parse_inline("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
        assert_eq!(parse_inline("*a *"), vec![text("*a *")]);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn unterminated_is_text() {
        for input in ["**open", "~~open", "==open", "`open", "[[open", "![[open", "[x](open"] {
            assert_eq!(parse_inline(input), vec![text(input)], "{input}");
        }
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn escapes() {
        assert_eq!(parse_inline(r"\*not italic\*"), vec![text("*not italic*")]);
        assert_eq!(parse_inline(r"C:\path"), vec![text(r"C:\path")]);
        assert_eq!(
            parse_inline(r"**a\*\*b**"),
            vec![InlineToken::Bold { children: vec![text("a**b")] }]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn line_breaks() {
        assert_eq!(
            parse_inline("one  \ntwo\\\nthree\nfour"),
            vec![
                text("one"),
                InlineToken::LineBreak,
                text("two"),
                InlineToken::LineBreak,
                text("three\nfour"),
            ]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn wikilinks_and_embeds() {
        assert_eq!(
            parse_inline("Link to [[Another Page|custom text]]"),
            vec![text("Link to "), wikilink("Another Page", Some("custom text"))]
        );
        assert_eq!(
            parse_inline("[[Note#Heading]] ![[image.png]]"),
            vec![
                wikilink("Note#Heading", None),
                text(" "),
                InlineToken::Embed { target: "image.png".to_string() },
            ]
        );
        assert_eq!(parse_inline("[[]]"), vec![text("[[]]")]);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn links_and_images() {
        assert_eq!(
            parse_inline(r#"[**site** [x]](https://a.b/c_(d) "Title") ![alt](img.png "t")"#),
            vec![
                InlineToken::Link(Link {
                    href: "https://a.b/c_(d)".to_string(),
                    title: Some("Title".to_string()),
                    children: vec![
                        InlineToken::Bold { children: vec![text("site")] },
                        text(" [x]"),
                    ],
                }),
                text(" "),
                InlineToken::Image(Image {
                    src: "img.png".to_string(),
                    alt: "alt".to_string(),
                    title: Some("t".to_string()),
                }),
            ]
        );
        assert_eq!(parse_inline("[not a link] (x)"), vec![text("[not a link] (x)")]);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn lone_quote_in_destination() {
        assert_eq!(
            parse_inline("[a](x \")"),
            vec![InlineToken::Link(Link {
                href: "x \"".to_string(),
                title: None,
                children: vec![text("a")],
            })]
        );
        assert_eq!(
            parse_inline("![a](x \")"),
            vec![InlineToken::Image(Image {
                src: "x \"".to_string(),
                alt: "a".to_string(),
                title: None,
            })]
        );

        for input in ["[a](\")", "[a]( \")", "[a](\"\")", "![a](x \"\")", "[a](x \"t\" \")", "![](\" \")"] {
            let _ = parse_inline(input);
        }
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn escaped_delimiter_before_closer() {
        assert_eq!(
            parse_inline(r"**a\***"),
            vec![InlineToken::Bold { children: vec![text("a*")] }]
        );
        assert_eq!(
            parse_inline(r"~~a\~~~"),
            vec![InlineToken::Strikethrough { children: vec![text("a~")] }]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn autolinks() {
        assert_eq!(
            parse_inline("<https://example.com/x>"),
            vec![InlineToken::Link(Link {
                href: "https://example.com/x".to_string(),
                title: None,
                children: vec![text("https://example.com/x")],
            })]
        );
        assert_eq!(parse_inline("<span>"), vec![text("<span>")]);
        assert_eq!(parse_inline("a < b > c"), vec![text("a < b > c")]);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn code_spans() {
        assert_eq!(
            parse_inline("`**raw**` and ``a ` b``"),
            vec![
                InlineToken::Code { content: "**raw**".to_string() },
                text(" and "),
                InlineToken::Code { content: "a ` b".to_string() },
            ]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn unicode_text() {
        assert_eq!(
            parse_inline("привет **мир** 💩"),
            vec![
                text("привет "),
                InlineToken::Bold { children: vec![text("мир")] },
                text(" 💩"),
            ]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn depth_limit() {
        assert_eq!(
            parse_inline_with_depth("**a *b* c**", 0, 0),
            vec![InlineToken::Bold { children: vec![text("a *b* c")] }]
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn idempotent() {
        let input = "a **b** [[c|d]] `e` ==f==";
        assert_eq!(parse_inline(input), parse_inline(input));
    }
}
