//! Built-in plain text renderer
//!
//! Keeps leaf text in reading order and drops every syntax marker.
//! Each block ends with a blank line; use [`to_plain_text`] for a trimmed result.

use super::{RenderContext, Renderer, join_fn, render, render_fn};
use crate::ast::{
    BlockToken, Callout, CodeBlock, Heading, Image, InlineToken, Link, List, ParseResult, Table,
    TableCell, WikiLink,
};

type Ctx<'r> = RenderContext<'r, String>;

const BLOCK_SEPARATOR: &str = "\n\n";

fn block(text: &str) -> String {
    format!("{}{BLOCK_SEPARATOR}", text.trim_end())
}

fn cells(cells: &[TableCell], ctx: &Ctx<'_>) -> String {
    cells
        .iter()
        .map(|cell| ctx.inline(&cell.children))
        .collect::<Vec<_>>()
        .join("\t")
}

/// Create the plain text [`Renderer`]
#[must_use]
pub fn renderer() -> Renderer<'static, String> {
    let inline = || render_fn(|children: &[InlineToken], ctx: &Ctx<'_>| ctx.inline(children));

    Renderer {
        text: render_fn(|content: &str, _| content.to_string()),
        bold: inline(),
        italic: inline(),
        bold_italic: inline(),
        strikethrough: inline(),
        highlight: inline(),
        code: render_fn(|content: &str, _| content.to_string()),
        link: render_fn(|link: &Link, ctx: &Ctx<'_>| ctx.inline(&link.children)),
        image: render_fn(|image: &Image, _| image.alt.clone()),
        wikilink: render_fn(|link: &WikiLink, _| link.label().to_string()),
        embed: render_fn(|target: &str, _| target.to_string()),
        line_break: render_fn(|_: &(), _| "\n".to_string()),

        paragraph: render_fn(|children: &[InlineToken], ctx: &Ctx<'_>| block(&ctx.inline(children))),
        heading: render_fn(|heading: &Heading, ctx: &Ctx<'_>| block(&ctx.inline(&heading.children))),
        code_block: render_fn(|code_block: &CodeBlock, _| block(&code_block.content)),
        blockquote: render_fn(|children: &[BlockToken], ctx: &Ctx<'_>| block(&ctx.blocks(children))),
        callout: render_fn(|callout: &Callout, ctx: &Ctx<'_>| {
            let body = ctx.blocks(&callout.children);
            match &callout.title {
                Some(title) => block(&format!("{title}{BLOCK_SEPARATOR}{body}")),
                None => block(&body),
            }
        }),
        list: render_fn(|list: &List, ctx: &Ctx<'_>| {
            let items: Vec<String> = list
                .items
                .iter()
                .map(|item| ctx.blocks(&item.children).trim_end().to_string())
                .collect();

            block(&items.join("\n"))
        }),
        table: render_fn(|table: &Table, ctx: &Ctx<'_>| {
            let rows: Vec<String> = std::iter::once(&table.header)
                .chain(&table.rows)
                .map(|row| cells(row, ctx))
                .collect();

            block(&rows.join("\n"))
        }),
        horizontal_rule: render_fn(|_: &(), _| String::new()),
        html: render_fn(|content: &str, _| block(content)),

        join: join_fn(|outputs: Vec<String>| outputs.concat()),
    }
}

/// Render `result` to plain text without the trailing separator
///
/// # Example
/// ```
/// use obsidian_markdown::prelude::*;
///
/// let result = parse("# Title\n\nSome **bold** and [[Note|a link]]");
///
/// assert_eq!(
///     render::plain_text::to_plain_text(&result),
///     "Title\n\nSome bold and a link"
/// );
/// ```
#[must_use]
pub fn to_plain_text(result: &ParseResult) -> String {
    let mut text = render(result, &renderer());
    text.truncate(text.trim_end().len());

    text
}
