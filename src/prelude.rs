//! All prelude

pub use crate::ast::{
    Alignment, BlockToken, Callout, CodeBlock, FrontMatter, FrontMatterValue, Heading, Image,
    InlineToken, Link, List, ListItem, ParseResult, Table, TableCell, WikiLink,
};
pub use crate::error::Error;
pub use crate::graph::LinkGraph;
pub use crate::links::{collect_embeds, collect_wikilinks};
pub use crate::note::Note;
pub use crate::parser::{ParseOptions, parse, parse_with_options};
pub use crate::render::{self, RenderContext, Renderer, html::HtmlOptions, render};
pub use crate::tags::collect_tags;
pub use crate::vault::Vault;
pub use crate::vault::vault_open::{IteratorVaultBuilder, VaultBuilder, VaultOptions};

#[cfg(feature = "rayon")]
pub use crate::vault::vault_open::ParallelIteratorVaultBuilder;
