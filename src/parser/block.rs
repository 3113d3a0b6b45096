//! Block parser
//!
//! Walks the document line by line with a single cursor. Each construct
//! consumes as many lines as it owns; blank lines between blocks are skipped.
//! Blockquote, callout and list item bodies are parsed by the same
//! [`BlockParser::parse`] one level deeper.

use super::{ParseOptions, inline::parse_inline_with_depth};
use crate::ast::{
    Alignment, BlockToken, Callout, CodeBlock, Heading, InlineToken, List, ListItem, Table,
    TableCell,
};
use regex::Regex;
use std::sync::LazyLock;

macro_rules! static_regex {
    ($name:ident, $pattern:literal) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used, reason = "Static pattern")]
            Regex::new($pattern).unwrap()
        });
    };
}

static_regex!(ATX_HEADING_REGEX, r"^ {0,3}(#{1,6})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$");
static_regex!(FENCE_REGEX, r"^ {0,3}(`{3,}|~{3,})(.*)$");
static_regex!(CALLOUT_REGEX, r"^\[!([A-Za-z0-9_-]+)\]([+-])?(?:[ \t]+(.*?))?[ \t]*$");
static_regex!(TABLE_DELIMITER_REGEX, r"^:?-+:?$");
static_regex!(TASK_REGEX, r"^\[([ xX])\](?:[ \t]+|$)");
static_regex!(HTML_TAG_REGEX, r"^ {0,3}</?([A-Za-z][A-Za-z0-9-]*)(?:[\s/>]|$)");

const HTML_BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "canvas", "center", "details", "dialog",
    "dd", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "iframe", "li", "main", "nav", "ol", "p",
    "pre", "script", "section", "style", "summary", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul", "video",
];

/// Recursive block parser
#[derive(Debug, Clone, Copy)]
pub struct BlockParser<'o> {
    options: &'o ParseOptions,
    depth: usize,
}

impl<'o> BlockParser<'o> {
    /// Create top-level [`BlockParser`]
    #[must_use]
    pub const fn new(options: &'o ParseOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Parse physical lines into blocks
    #[must_use]
    pub fn parse(&self, lines: &[&str]) -> Vec<BlockToken> {
        let mut tokens = Vec::new();
        let mut cursor = 0;

        while cursor < lines.len() {
            if lines[cursor].trim().is_empty() {
                cursor += 1;
                continue;
            }

            let (token, next) = self.parse_block(lines, cursor);
            debug_assert!(next > cursor);

            tokens.push(token);
            cursor = next;
        }

        tokens
    }

    /// Parser for a nested body, [`None`] past [`ParseOptions::max_depth`]
    const fn nested(&self) -> Option<Self> {
        if self.depth >= self.options.max_depth {
            return None;
        }

        Some(Self {
            options: self.options,
            depth: self.depth + 1,
        })
    }

    fn inline(&self, text: &str) -> Vec<InlineToken> {
        parse_inline_with_depth(text, 0, self.options.max_depth)
    }

    fn parse_block(&self, lines: &[&str], start: usize) -> (BlockToken, usize) {
        let line = lines[start];

        if is_horizontal_rule(line) {
            return (BlockToken::HorizontalRule, start + 1);
        }

        if let Some(heading) = self.atx_heading(line) {
            return (heading, start + 1);
        }

        if FENCE_REGEX.is_match(line) {
            if let Some(result) = Self::fenced_code(lines, start) {
                return result;
            }
        }

        if quote_content(line).is_some() {
            return self.quote(lines, start);
        }

        if let Some(result) = self.table(lines, start) {
            return result;
        }

        if let Some(marker) = ListMarker::parse(line) {
            return self.list(lines, start, &marker);
        }

        if is_html_block_start(line) {
            return html_block(lines, start);
        }

        self.paragraph(lines, start)
    }

    fn atx_heading(&self, line: &str) -> Option<BlockToken> {
        let captures = ATX_HEADING_REGEX.captures(line)?;
        let level = u8::try_from(captures[1].len()).ok()?;

        Some(BlockToken::Heading(Heading {
            level,
            children: self.inline(captures[2].trim()),
        }))
    }

    fn fenced_code(lines: &[&str], start: usize) -> Option<(BlockToken, usize)> {
        let captures = FENCE_REGEX.captures(lines[start])?;
        let fence = &captures[1];
        let info = captures[2].trim();

        // ```a``` on one line is a code span
        if fence.starts_with('`') && info.contains('`') {
            return None;
        }

        let closing = &fence[..3];
        let mut end = start + 1;
        let mut closed = false;

        while end < lines.len() {
            if lines[end].trim_start().starts_with(closing) {
                closed = true;
                break;
            }

            end += 1;
        }

        let token = BlockToken::CodeBlock(CodeBlock {
            language: (!info.is_empty()).then(|| info.to_string()),
            content: lines[start + 1..end].join("\n"),
        });

        let next = if closed { end + 1 } else { end };
        Some((token, next))
    }

    fn quote(&self, lines: &[&str], start: usize) -> (BlockToken, usize) {
        let inner: Vec<&str> = lines[start..]
            .iter()
            .map_while(|line| quote_content(line))
            .collect();
        let end = start + inner.len();

        let Some(nested) = self.nested() else {
            return (plain(&lines[start..end]), end);
        };

        let Some(captures) = CALLOUT_REGEX.captures(inner[0]) else {
            let children = nested.parse(&inner);
            return (BlockToken::Blockquote { children }, end);
        };

        let fold = captures.get(2).map(|m| m.as_str());
        let title = captures
            .get(3)
            .map(|m| m.as_str().trim())
            .filter(|title| !title.is_empty());

        let callout = Callout {
            kind: captures[1].to_lowercase(),
            title: title.map(ToString::to_string),
            foldable: fold.is_some(),
            collapsed: fold == Some("-"),
            children: nested.parse(&inner[1..]),
        };

        (BlockToken::Callout(callout), end)
    }

    fn table(&self, lines: &[&str], start: usize) -> Option<(BlockToken, usize)> {
        let alignments = table_alignments(lines, start)?;
        let columns = alignments.len();

        let cells = |line: &str| -> Vec<TableCell> {
            let mut row = split_row(line);
            row.resize(columns, "");

            row.into_iter()
                .zip(&alignments)
                .map(|(cell, align)| TableCell {
                    align: *align,
                    children: self.inline(cell),
                })
                .collect()
        };

        let header = cells(lines[start]);
        let mut rows = Vec::new();
        let mut end = start + 2;

        while end < lines.len() && lines[end].contains('|') && !lines[end].trim().is_empty() {
            rows.push(cells(lines[end]));
            end += 1;
        }

        Some((BlockToken::Table(Table { header, rows }), end))
    }

    fn list(&self, lines: &[&str], start: usize, first: &ListMarker<'_>) -> (BlockToken, usize) {
        let mut items = Vec::new();
        let mut cursor = start;

        while let Some(marker) = ListMarker::parse(lines[cursor]) {
            let mut item_lines = vec![marker.content];
            cursor += 1;

            while cursor < lines.len() {
                let line = lines[cursor];

                if line.trim().is_empty() {
                    let next = (cursor..lines.len()).find(|i| !lines[*i].trim().is_empty());

                    match next {
                        Some(next) if indent_width(lines[next]) >= marker.content_col => {
                            item_lines.extend(std::iter::repeat_n("", next - cursor));
                            cursor = next;
                            continue;
                        }
                        _ => break,
                    }
                }

                if indent_width(line) >= marker.content_col {
                    item_lines.push(strip_indent(line, marker.content_col));
                    cursor += 1;
                    continue;
                }

                if ListMarker::parse(line).is_some() || starts_block(lines, cursor) {
                    break;
                }

                // lazy continuation
                item_lines.push(line.trim_start());
                cursor += 1;
            }

            items.push(self.list_item(&item_lines));

            let next = (cursor..lines.len()).find(|i| !lines[*i].trim().is_empty());
            let sibling = next
                .and_then(|next| ListMarker::parse(lines[next]).map(|marker| (next, marker)))
                .filter(|(_, next)| next.ordered == first.ordered && next.indent >= first.indent);

            match sibling {
                Some((next, _)) => cursor = next,
                None => break,
            }
        }

        let list = List {
            ordered: first.ordered,
            start: first.number,
            items,
        };

        (BlockToken::List(list), cursor)
    }

    fn list_item(&self, item_lines: &[&str]) -> ListItem {
        let mut item_lines = item_lines.to_vec();
        let mut checked = None;

        let first = item_lines[0];
        if let Some(captures) = TASK_REGEX.captures(first) {
            checked = Some(&captures[1] != " ");
            item_lines[0] = &first[captures[0].len()..];
        }

        let children = match self.nested() {
            Some(nested) => nested.parse(&item_lines),
            None => vec![plain(&item_lines)],
        };

        ListItem { checked, children }
    }

    fn paragraph(&self, lines: &[&str], start: usize) -> (BlockToken, usize) {
        let mut text_lines = vec![lines[start].trim_start()];
        let mut setext_level = None;
        let mut end = start + 1;

        while end < lines.len() {
            let line = lines[end];
            if line.trim().is_empty() {
                break;
            }

            if let Some(level) = setext_underline(line) {
                setext_level = Some(level);
                end += 1;
                break;
            }

            if starts_block(lines, end) {
                break;
            }

            text_lines.push(line.trim_start());
            end += 1;
        }

        let text = text_lines.join("\n");

        let token = match setext_level {
            Some(level) => BlockToken::Heading(Heading {
                level,
                children: self.inline(text.trim()),
            }),
            None => BlockToken::Paragraph {
                children: self.inline(text.trim_end()),
            },
        };

        (token, end)
    }
}

fn html_block(lines: &[&str], start: usize) -> (BlockToken, usize) {
    let end = (start..lines.len())
        .find(|i| lines[*i].trim().is_empty())
        .unwrap_or(lines.len());

    let token = BlockToken::Html {
        content: lines[start..end].join("\n"),
    };

    (token, end)
}

/// Fallback for bodies nested deeper than allowed
fn plain(lines: &[&str]) -> BlockToken {
    BlockToken::Paragraph {
        children: vec![InlineToken::text(lines.join("\n"))],
    }
}

/// Returns `true` if the line at `index` opens a block other than a paragraph
fn starts_block(lines: &[&str], index: usize) -> bool {
    let line = lines[index];

    is_horizontal_rule(line)
        || ATX_HEADING_REGEX.is_match(line)
        || FENCE_REGEX.is_match(line)
        || quote_content(line).is_some()
        || ListMarker::parse(line).is_some()
        || is_html_block_start(line)
        || table_alignments(lines, index).is_some()
}

fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();

    match chars.next() {
        Some(first @ ('-' | '*' | '_')) => trimmed.len() >= 3 && chars.all(|c| c == first),
        _ => false,
    }
}

fn setext_underline(line: &str) -> Option<u8> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        None
    } else if trimmed.bytes().all(|b| b == b'=') {
        Some(1)
    } else if trimmed.bytes().all(|b| b == b'-') {
        Some(2)
    } else {
        None
    }
}

/// Strip the `>` prefix and one following space
fn quote_content(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix([' ', '\t']).unwrap_or(rest))
}

fn is_html_block_start(line: &str) -> bool {
    if line.trim_start().starts_with("<!--") {
        return true;
    }

    HTML_TAG_REGEX.captures(line).is_some_and(|captures| {
        let tag = captures[1].to_ascii_lowercase();
        HTML_BLOCK_TAGS.contains(&tag.as_str())
    })
}

/// Column alignments if `lines[start]` is a table header followed by a delimiter row
fn table_alignments(lines: &[&str], start: usize) -> Option<Vec<Option<Alignment>>> {
    let header = lines[start];
    let delimiter = lines.get(start + 1)?;

    if !header.contains('|') || !delimiter.contains('|') {
        return None;
    }

    let header_cells = split_row(header);
    let delimiter_cells = split_row(delimiter);

    if header_cells.len() != delimiter_cells.len()
        || !delimiter_cells
            .iter()
            .all(|cell| TABLE_DELIMITER_REGEX.is_match(cell))
    {
        return None;
    }

    let alignments = delimiter_cells
        .iter()
        .map(|cell| match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Some(Alignment::Center),
            (true, false) => Some(Alignment::Left),
            (false, true) => Some(Alignment::Right),
            (false, false) => None,
        })
        .collect();

    Some(alignments)
}

/// Split a table row on unescaped `|`, outer pipes optional
fn split_row(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = match trimmed.strip_suffix('|') {
        Some(inner) if !inner.ends_with('\\') => inner,
        _ => trimmed,
    };

    let mut cells = Vec::new();
    let mut cell_start = 0;
    let mut escaped = false;

    for (index, byte) in trimmed.bytes().enumerate() {
        match byte {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'|' => {
                cells.push(trimmed[cell_start..index].trim());
                cell_start = index + 1;
            }
            _ => {}
        }
    }

    cells.push(trimmed[cell_start..].trim());
    cells
}

/// Width of leading whitespace, tabs stop at multiples of 4
fn indent_width(line: &str) -> usize {
    let mut width = 0;

    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => break,
        }
    }

    width
}

/// Remove up to `width` columns of leading whitespace
fn strip_indent(line: &str, width: usize) -> &str {
    let mut column = 0;

    for (index, c) in line.char_indices() {
        if column >= width {
            return &line[index..];
        }

        match c {
            ' ' => column += 1,
            '\t' => column += 4 - column % 4,
            _ => return &line[index..],
        }
    }

    ""
}

/// Bullet `-`/`*`/`+` or ordered `1.` marker
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListMarker<'a> {
    indent: usize,
    ordered: bool,
    number: Option<u64>,

    /// Column where the item content starts
    content_col: usize,
    content: &'a str,
}

impl<'a> ListMarker<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let indent = indent_width(line);
        let trimmed = line.trim_start_matches([' ', '\t']);

        let (ordered, number, marker_len) = match trimmed.as_bytes().first()? {
            b'-' | b'*' | b'+' => (false, None, 1),
            b'0'..=b'9' => {
                let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
                if digits > 9 || trimmed.as_bytes().get(digits) != Some(&b'.') {
                    return None;
                }

                (true, trimmed[..digits].parse().ok(), digits + 1)
            }
            _ => return None,
        };

        let rest = &trimmed[marker_len..];
        if rest.trim().is_empty() {
            return Some(Self {
                indent,
                ordered,
                number,
                content_col: indent + marker_len + 1,
                content: "",
            });
        }

        let spaces = rest.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count();
        if spaces == 0 {
            return None;
        }

        // content indented 5+ columns keeps all but one space
        let (width, content) = if spaces > 4 {
            (1, &rest[1..])
        } else {
            (spaces, &rest[spaces..])
        };

        Some(Self {
            indent,
            ordered,
            number,
            content_col: indent + marker_len + width,
            content,
        })
    }
}
