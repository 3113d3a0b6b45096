//! `obsidian-markdown` - Parser and renderer for [Obsidian](https://obsidian.md) flavored Markdown
//!
//! Provides idiomatic APIs for:
//! - Parsing notes into a typed AST: frontmatter, blocks and inline tokens
//! - Rendering that AST through a table of user supplied functions (HTML and plain text built in)
//! - Extracting wikilinks, embeds and tags
//! - Loading whole vaults and analyzing them as link graphs
//!
//! ## Key Features
//! * 🧩 **Obsidian syntax**: wikilinks with headings, block refs and aliases, embeds, callouts, highlights
//! * 🛡 **Never fails**: malformed input degrades to plain text, nesting is depth limited
//! * 🎨 **Generic rendering**: any output type, override a single node kind without touching the rest
//! * 🕸 **Link graphs**: backlinks and siblings, [`petgraph`](https://docs.rs/petgraph/latest/petgraph) export
//!
//! ## Usage
//! Add to `Cargo.toml`:
//! ```toml
//! [dependencies]
//! obsidian-markdown = { version = "0.1", features = ["petgraph", "rayon"] }
//! ```
//!
//! ## Examples
//!
//! ### Parse and render
//! ```
//! use obsidian_markdown::prelude::*;
//!
//! let result = parse("---\ntopic: life\n---\n# Title\n\n> [!tip] Remember\n> Link to [[Other note]]");
//!
//! assert_eq!(result.frontmatter["topic"], "life");
//! assert_eq!(collect_wikilinks(&result), vec!["Other note"]);
//!
//! let html = render(&result, &render::html::renderer(HtmlOptions::default()));
//! assert!(html.starts_with("<h1>Title</h1>\n"));
//! ```
//!
//! ### Custom output type
//! ```
//! use obsidian_markdown::prelude::*;
//!
//! // Count wikilinks by overriding a single render function of the plain text renderer
//! let result = parse("[[a]] and [[b]]");
//! let renderer = render::plain_text::renderer().with_wikilink(|_, _| "@".to_string());
//!
//! assert_eq!(render(&result, &renderer).trim_end(), "@ and @");
//! ```
//!
//! ### Vault Analysis
//! ```no_run
//! use obsidian_markdown::prelude::*;
//!
//! let vault = Vault::open(&VaultOptions::new("/path/to/vault")).unwrap();
//!
//! if vault.have_duplicates_by_name() {
//!     eprintln!("Duplicate note names detected!");
//! }
//!
//! let graph = vault.link_graph();
//! for note in vault.notes() {
//!     if let Some(name) = note.name() {
//!         println!("{name}: {:?} -> {:?}", graph.backlinks(&name), graph.outgoing(&name));
//!     }
//! }
//! ```
//!
//! ### Graph Analysis (requires [`petgraph`](https://docs.rs/petgraph/latest/petgraph) feature)
//! ```no_run
//! #[cfg(feature = "petgraph")]
//! {
//!     use obsidian_markdown::prelude::*;
//!     use petgraph::dot::{Dot, Config};
//!
//!     let vault = Vault::open(&VaultOptions::new("/path/to/vault")).unwrap();
//!     let graph = vault.link_graph().to_digraph();
//!
//!     // Export to Graphviz format
//!     println!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]));
//!
//!     // Find most connected note
//!     let most_connected = graph.node_indices()
//!         .max_by_key(|n| graph.edges(*n).count())
//!         .unwrap();
//!     println!("Knowledge hub: {}", graph[most_connected]);
//! }
//! ```
//!
//! Parallel vault loading via Rayon (enable `rayon` feature)

//#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::panic)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::as_conversions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod ast;
pub mod error;
pub mod graph;
pub mod links;
pub mod note;
pub mod parser;
pub mod prelude;
pub mod render;
pub mod tags;
pub mod vault;
