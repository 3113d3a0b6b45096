//! Generic renderer over [`ParseResult`]
//!
//! A [`Renderer`] is a table with exactly one render function per
//! [`InlineToken`] and [`BlockToken`] variant plus a `join` that combines
//! sibling outputs. Every field is required, so an incomplete table does not compile.
//!
//! Render functions that own nested content call back into
//! [`RenderContext::inline`] or [`RenderContext::blocks`]; the dispatch itself
//! knows nothing about what a node means.
//!
//! # Example
//! ```
//! use obsidian_markdown::prelude::*;
//!
//! let result = parse("Go to [[Home|home page]]");
//!
//! let renderer = render::html::renderer(HtmlOptions::default()).with_wikilink(|link, _| {
//!     format!("<a href=\"/wiki/{}\">{}</a>", link.target, link.label())
//! });
//!
//! assert_eq!(
//!     render(&result, &renderer),
//!     "<p>Go to <a href=\"/wiki/Home\">home page</a></p>\n"
//! );
//! ```

pub mod html;
pub mod plain_text;

use crate::ast::{
    BlockToken, Callout, CodeBlock, Heading, Image, InlineToken, Link, List, ParseResult, Table,
    WikiLink,
};

/// Render function for one node kind with payload `N`
pub type RenderFn<'a, N, T> = Box<dyn Fn(&N, &RenderContext<'_, T>) -> T + Send + Sync + 'a>;

/// Combines sibling outputs into one
pub type JoinFn<'a, T> = Box<dyn Fn(Vec<T>) -> T + Send + Sync + 'a>;

/// Box a closure as a [`RenderFn`]
pub fn render_fn<'a, N, T>(
    f: impl Fn(&N, &RenderContext<'_, T>) -> T + Send + Sync + 'a,
) -> RenderFn<'a, N, T>
where
    N: ?Sized,
{
    Box::new(f)
}

/// Box a closure as a [`JoinFn`]
pub fn join_fn<'a, T>(f: impl Fn(Vec<T>) -> T + Send + Sync + 'a) -> JoinFn<'a, T> {
    Box::new(f)
}

/// Handle passed to every render function
pub struct RenderContext<'r, T> {
    renderer: &'r Renderer<'r, T>,
}

impl<'r, T> RenderContext<'r, T> {
    /// Render an inline sequence with the same [`Renderer`]
    pub fn inline(&self, tokens: &[InlineToken]) -> T {
        self.renderer.render_inline(tokens)
    }

    /// Render a block sequence with the same [`Renderer`]
    pub fn blocks(&self, tokens: &[BlockToken]) -> T {
        self.renderer.render_blocks(tokens)
    }

    /// The [`Renderer`] driving this pass
    #[must_use]
    pub const fn renderer(&self) -> &'r Renderer<'r, T> {
        self.renderer
    }
}

/// Per-variant render table producing `T`
///
/// Built-in tables: [`html::renderer`] and [`plain_text::renderer`].
/// Start from one of them and replace entries with the `with_*` methods,
/// or fill every field for a completely custom output type.
pub struct Renderer<'a, T> {
    pub text: RenderFn<'a, str, T>,
    pub bold: RenderFn<'a, [InlineToken], T>,
    pub italic: RenderFn<'a, [InlineToken], T>,
    pub bold_italic: RenderFn<'a, [InlineToken], T>,
    pub strikethrough: RenderFn<'a, [InlineToken], T>,
    pub highlight: RenderFn<'a, [InlineToken], T>,
    pub code: RenderFn<'a, str, T>,
    pub link: RenderFn<'a, Link, T>,
    pub image: RenderFn<'a, Image, T>,
    pub wikilink: RenderFn<'a, WikiLink, T>,

    /// Receives the embed target
    pub embed: RenderFn<'a, str, T>,
    pub line_break: RenderFn<'a, (), T>,

    pub paragraph: RenderFn<'a, [InlineToken], T>,
    pub heading: RenderFn<'a, Heading, T>,
    pub code_block: RenderFn<'a, CodeBlock, T>,
    pub blockquote: RenderFn<'a, [BlockToken], T>,
    pub callout: RenderFn<'a, Callout, T>,
    pub list: RenderFn<'a, List, T>,
    pub table: RenderFn<'a, Table, T>,
    pub horizontal_rule: RenderFn<'a, (), T>,

    /// Receives raw HTML, unsanitized
    pub html: RenderFn<'a, str, T>,

    pub join: JoinFn<'a, T>,
}

impl<T> std::fmt::Debug for Renderer<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

macro_rules! impl_overlay {
    ($($name:ident => $field:ident: $payload:ty),* $(,)?) => {
        $(
            #[doc = concat!("Replace the `", stringify!($field), "` render function")]
            #[must_use]
            pub fn $name(
                mut self,
                f: impl Fn(&$payload, &RenderContext<'_, T>) -> T + Send + Sync + 'a,
            ) -> Self {
                self.$field = Box::new(f);
                self
            }
        )*
    };
}

impl<'a, T> Renderer<'a, T> {
    impl_overlay!(
        with_text => text: str,
        with_bold => bold: [InlineToken],
        with_italic => italic: [InlineToken],
        with_bold_italic => bold_italic: [InlineToken],
        with_strikethrough => strikethrough: [InlineToken],
        with_highlight => highlight: [InlineToken],
        with_code => code: str,
        with_link => link: Link,
        with_image => image: Image,
        with_wikilink => wikilink: WikiLink,
        with_embed => embed: str,
        with_line_break => line_break: (),
        with_paragraph => paragraph: [InlineToken],
        with_heading => heading: Heading,
        with_code_block => code_block: CodeBlock,
        with_blockquote => blockquote: [BlockToken],
        with_callout => callout: Callout,
        with_list => list: List,
        with_table => table: Table,
        with_horizontal_rule => horizontal_rule: (),
        with_html => html: str,
    );

    /// Replace the `join` function
    #[must_use]
    pub fn with_join(mut self, f: impl Fn(Vec<T>) -> T + Send + Sync + 'a) -> Self {
        self.join = Box::new(f);
        self
    }

    /// Render an inline sequence, joining sibling outputs
    pub fn render_inline(&self, tokens: &[InlineToken]) -> T {
        let ctx = RenderContext { renderer: self };
        let outputs = tokens
            .iter()
            .map(|token| self.render_inline_token(token, &ctx))
            .collect();

        (self.join)(outputs)
    }

    /// Render a block sequence, joining sibling outputs
    pub fn render_blocks(&self, tokens: &[BlockToken]) -> T {
        let ctx = RenderContext { renderer: self };
        let outputs = tokens
            .iter()
            .map(|token| self.render_block_token(token, &ctx))
            .collect();

        (self.join)(outputs)
    }

    fn render_inline_token(&self, token: &InlineToken, ctx: &RenderContext<'_, T>) -> T {
        match token {
            InlineToken::Text { content } => (self.text)(content, ctx),
            InlineToken::Bold { children } => (self.bold)(children, ctx),
            InlineToken::Italic { children } => (self.italic)(children, ctx),
            InlineToken::BoldItalic { children } => (self.bold_italic)(children, ctx),
            InlineToken::Strikethrough { children } => (self.strikethrough)(children, ctx),
            InlineToken::Highlight { children } => (self.highlight)(children, ctx),
            InlineToken::Code { content } => (self.code)(content, ctx),
            InlineToken::Link(link) => (self.link)(link, ctx),
            InlineToken::Image(image) => (self.image)(image, ctx),
            InlineToken::WikiLink(wikilink) => (self.wikilink)(wikilink, ctx),
            InlineToken::Embed { target } => (self.embed)(target, ctx),
            InlineToken::LineBreak => (self.line_break)(&(), ctx),
        }
    }

    fn render_block_token(&self, token: &BlockToken, ctx: &RenderContext<'_, T>) -> T {
        match token {
            BlockToken::Paragraph { children } => (self.paragraph)(children, ctx),
            BlockToken::Heading(heading) => (self.heading)(heading, ctx),
            BlockToken::CodeBlock(code_block) => (self.code_block)(code_block, ctx),
            BlockToken::Blockquote { children } => (self.blockquote)(children, ctx),
            BlockToken::Callout(callout) => (self.callout)(callout, ctx),
            BlockToken::List(list) => (self.list)(list, ctx),
            BlockToken::Table(table) => (self.table)(table, ctx),
            BlockToken::HorizontalRule => (self.horizontal_rule)(&(), ctx),
            BlockToken::Html { content } => (self.html)(content, ctx),
        }
    }
}

/// Render a whole document
///
/// Walks the top-level blocks in order and combines them with [`Renderer::join`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(blocks = result.tokens.len())))]
pub fn render<T>(result: &ParseResult, renderer: &Renderer<'_, T>) -> T {
    #[cfg(feature = "tracing")]
    tracing::trace!("Render document");

    renderer.render_blocks(&result.tokens)
}
