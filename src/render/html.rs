//! Built-in HTML renderer
//!
//! Text, attributes and code are escaped. Raw `html` blocks are written verbatim.

use super::{RenderContext, Renderer, join_fn, render_fn};
use crate::ast::{
    Alignment, BlockToken, Callout, CodeBlock, Heading, Image, InlineToken, Link, List, ListItem,
    Table, TableCell, WikiLink,
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

type Ctx<'r> = RenderContext<'r, String>;

/// Options for [`renderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Prefix for wikilink `href`s
    pub wikilink_base: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            wikilink_base: "/".to_string(),
        }
    }
}

impl HtmlOptions {
    /// Set [`HtmlOptions::wikilink_base`]
    #[must_use]
    pub fn wikilink_base(mut self, wikilink_base: impl Into<String>) -> Self {
        self.wikilink_base = wikilink_base.into();
        self
    }
}

/// `href` for a wikilink: base + URL-encoded target
#[must_use]
pub fn wikilink_href(base: &str, link: &WikiLink) -> String {
    let (note, anchor) = match link.target.find(['#', '^']) {
        Some(index) => link.target.split_at(index),
        None => (link.target.as_str(), ""),
    };

    let mut href = format!("{base}{}", urlencoding::encode(note.trim()));
    if let Some(heading) = anchor.strip_prefix('#') {
        let _ = write!(href, "#{}", urlencoding::encode(heading));
    } else if let Some(block) = anchor.strip_prefix('^') {
        let _ = write!(href, "#^{}", urlencoding::encode(block));
    }

    href
}

fn wrap(tag: &str, inner: &str) -> String {
    format!("<{tag}>{inner}</{tag}>")
}

fn attribute(name: &str, value: &str) -> String {
    format!(" {name}=\"{}\"", encode_double_quoted_attribute(value))
}

fn align_style(align: Option<Alignment>) -> &'static str {
    match align {
        Some(Alignment::Left) => " style=\"text-align: left\"",
        Some(Alignment::Center) => " style=\"text-align: center\"",
        Some(Alignment::Right) => " style=\"text-align: right\"",
        None => "",
    }
}

fn table_row(tag: &str, cells: &[TableCell], ctx: &Ctx<'_>) -> String {
    let mut row = String::from("<tr>");
    for cell in cells {
        let _ = write!(
            row,
            "<{tag}{}>{}</{tag}>",
            align_style(cell.align),
            ctx.inline(&cell.children)
        );
    }

    row.push_str("</tr>\n");
    row
}

fn list_item(item: &ListItem, ctx: &Ctx<'_>) -> String {
    let checkbox = match item.checked {
        Some(true) => "<input type=\"checkbox\" disabled checked> ",
        Some(false) => "<input type=\"checkbox\" disabled> ",
        None => "",
    };

    // a single paragraph renders without `<p>`
    let body = match item.children.as_slice() {
        [BlockToken::Paragraph { children }] => ctx.inline(children),
        [] => String::new(),
        children => format!("\n{}", ctx.blocks(children)),
    };

    format!("<li>{checkbox}{body}</li>\n")
}

fn callout(callout: &Callout, ctx: &Ctx<'_>) -> String {
    let mut html = String::from("<div class=\"callout\"");
    html.push_str(&attribute("data-callout", &callout.kind));
    if callout.foldable {
        html.push_str(" data-foldable");
    }
    if callout.collapsed {
        html.push_str(" data-collapsed");
    }

    let title = callout.title.as_deref().unwrap_or(&callout.kind);
    let _ = write!(
        html,
        ">\n<div class=\"callout-title\">{}</div>\n<div class=\"callout-content\">\n{}</div>\n</div>\n",
        encode_text(title),
        ctx.blocks(&callout.children)
    );

    html
}

/// Create the HTML [`Renderer`]
///
/// # Example
/// ```
/// use obsidian_markdown::prelude::*;
///
/// let renderer = render::html::renderer(HtmlOptions::default().wikilink_base("/notes/"));
/// let html = render(&parse("See [[My Note]]"), &renderer);
///
/// assert_eq!(html, "<p>See <a class=\"wikilink\" href=\"/notes/My%20Note\">My Note</a></p>\n");
/// ```
#[must_use]
pub fn renderer(options: HtmlOptions) -> Renderer<'static, String> {
    let HtmlOptions { wikilink_base } = options;

    Renderer {
        text: render_fn(|content: &str, _| encode_text(content).into_owned()),
        bold: render_fn(|children: &[InlineToken], ctx: &Ctx<'_>| wrap("strong", &ctx.inline(children))),
        italic: render_fn(|children: &[InlineToken], ctx: &Ctx<'_>| wrap("em", &ctx.inline(children))),
        bold_italic: render_fn(|children: &[InlineToken], ctx: &Ctx<'_>| {
            wrap("strong", &wrap("em", &ctx.inline(children)))
        }),
        strikethrough: render_fn(|children: &[InlineToken], ctx: &Ctx<'_>| wrap("del", &ctx.inline(children))),
        highlight: render_fn(|children: &[InlineToken], ctx: &Ctx<'_>| wrap("mark", &ctx.inline(children))),
        code: render_fn(|content: &str, _| wrap("code", &encode_text(content))),
        link: render_fn(|link: &Link, ctx: &Ctx<'_>| {
            let title = link
                .title
                .as_deref()
                .map(|title| attribute("title", title))
                .unwrap_or_default();

            format!(
                "<a{}{title}>{}</a>",
                attribute("href", &link.href),
                ctx.inline(&link.children)
            )
        }),
        image: render_fn(|image: &Image, _| {
            let title = image
                .title
                .as_deref()
                .map(|title| attribute("title", title))
                .unwrap_or_default();

            format!(
                "<img{}{}{title}>",
                attribute("src", &image.src),
                attribute("alt", &image.alt)
            )
        }),
        wikilink: render_fn(move |link: &WikiLink, _| {
            format!(
                "<a class=\"wikilink\"{}>{}</a>",
                attribute("href", &wikilink_href(&wikilink_base, link)),
                encode_text(link.label())
            )
        }),
        embed: render_fn(|target: &str, _| {
            format!("<span class=\"embed\"{}></span>", attribute("data-target", target))
        }),
        line_break: render_fn(|_: &(), _| "<br>\n".to_string()),

        paragraph: render_fn(|children: &[InlineToken], ctx: &Ctx<'_>| {
            format!("<p>{}</p>\n", ctx.inline(children))
        }),
        heading: render_fn(|heading: &Heading, ctx: &Ctx<'_>| {
            let level = heading.level;
            format!("<h{level}>{}</h{level}>\n", ctx.inline(&heading.children))
        }),
        code_block: render_fn(|code_block: &CodeBlock, _| {
            let class = code_block
                .language
                .as_deref()
                .map(|language| attribute("class", &format!("language-{language}")))
                .unwrap_or_default();

            format!(
                "<pre><code{class}>{}</code></pre>\n",
                encode_text(&code_block.content)
            )
        }),
        blockquote: render_fn(|children: &[BlockToken], ctx: &Ctx<'_>| {
            format!("<blockquote>\n{}</blockquote>\n", ctx.blocks(children))
        }),
        callout: render_fn(callout),
        list: render_fn(|list: &List, ctx: &Ctx<'_>| {
            let items: String = list.items.iter().map(|item| list_item(item, ctx)).collect();

            if !list.ordered {
                return format!("<ul>\n{items}</ul>\n");
            }

            let start = match list.start {
                Some(start) if start != 1 => format!(" start=\"{start}\""),
                _ => String::new(),
            };

            format!("<ol{start}>\n{items}</ol>\n")
        }),
        table: render_fn(|table: &Table, ctx: &Ctx<'_>| {
            let mut html = String::from("<table>\n<thead>\n");
            html.push_str(&table_row("th", &table.header, ctx));
            html.push_str("</thead>\n<tbody>\n");
            for row in &table.rows {
                html.push_str(&table_row("td", row, ctx));
            }
            html.push_str("</tbody>\n</table>\n");

            html
        }),
        horizontal_rule: render_fn(|_: &(), _| "<hr>\n".to_string()),
        html: render_fn(|content: &str, _| format!("{content}\n")),

        join: join_fn(|outputs: Vec<String>| outputs.concat()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::parse, render::render};

    fn to_html(text: &str) -> String {
        render(&parse(text), &renderer(HtmlOptions::default()))
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn inline_formatting() {
        assert_eq!(
            to_html("**b** *i* ***bi*** ~~s~~ ==h== `c<d>`"),
            "<p><strong>b</strong> <em>i</em> <strong><em>bi</em></strong> \
             <del>s</del> <mark>h</mark> <code>c&lt;d&gt;</code></p>\n"
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn escapes_text() {
        assert_eq!(to_html("a < b & c"), "<p>a &lt; b &amp; c</p>\n");
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn links_and_images() {
        assert_eq!(
            to_html(r#"[x](https://a.b/?q="1" "T") ![alt](i.png)"#),
            "<p><a href=\"https://a.b/?q=&quot;1&quot;\" title=\"T\">x</a> \
             <img src=\"i.png\" alt=\"alt\"></p>\n"
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn wikilinks_and_embeds() {
        assert_eq!(
            to_html("[[Page One#Part 2|see]] ![[pic.png]]"),
            "<p><a class=\"wikilink\" href=\"/Page%20One#Part%202\">see</a> \
             <span class=\"embed\" data-target=\"pic.png\"></span></p>\n"
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn wikilink_base() {
        let renderer = renderer(HtmlOptions::default().wikilink_base("/wiki/"));
        let html = render(&parse("[[a^block]]"), &renderer);

        assert_eq!(html, "<p><a class=\"wikilink\" href=\"/wiki/a#^block\">a^block</a></p>\n");
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn blocks() {
        assert_eq!(
            to_html("# T\n\n```rust\nfn a() {}\n```\n\n> q\n\n---\n\n<div>raw</div>"),
            "<h1>T</h1>\n\
             <pre><code class=\"language-rust\">fn a() {}</code></pre>\n\
             <blockquote>\n<p>q</p>\n</blockquote>\n\
             <hr>\n\
             <div>raw</div>\n"
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn callout() {
        assert_eq!(
            to_html("> [!warning]- Careful\n> body"),
            "<div class=\"callout\" data-callout=\"warning\" data-foldable data-collapsed>\n\
             <div class=\"callout-title\">Careful</div>\n\
             <div class=\"callout-content\">\n<p>body</p>\n</div>\n</div>\n"
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn lists() {
        assert_eq!(
            to_html("- [x] done\n- [ ] todo\n\n3. three\n4. four"),
            "<ul>\n\
             <li><input type=\"checkbox\" disabled checked> done</li>\n\
             <li><input type=\"checkbox\" disabled> todo</li>\n\
             </ul>\n\
             <ol start=\"3\">\n<li>three</li>\n<li>four</li>\n</ol>\n"
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn table() {
        assert_eq!(
            to_html("| a | b |\n|:--|:-:|\n| 1 | 2 |"),
            "<table>\n<thead>\n\
             <tr><th style=\"text-align: left\">a</th><th style=\"text-align: center\">b</th></tr>\n\
             </thead>\n<tbody>\n\
             <tr><td style=\"text-align: left\">1</td><td style=\"text-align: center\">2</td></tr>\n\
             </tbody>\n</table>\n"
        );
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn deterministic() {
        let text = "# A\n\n> [!tip] T\n> - **b** [[c]]\n\n| x |\n|---|\n| y |";
        assert_eq!(to_html(text), to_html(text));
    }
}
