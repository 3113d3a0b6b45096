//! Link graph over parsed documents
//!
//! Nodes are note names. An edge `A -> B` exists when `A` contains a wikilink
//! whose [`note_name`](crate::ast::WikiLink::note_name) resolves to `B`.
//! Links to unknown notes and self-links are ignored.
//!
//! Resolution: an exact name wins, otherwise the last `/` segment of a path-like
//! target (`[[folder/Note]]`) is tried.
//!
//! # Example
//! ```
//! use obsidian_markdown::prelude::*;
//!
//! let a = parse("[[B]] and [[C#Part]]");
//! let b = parse("back to [[A]]");
//! let c = parse("nothing");
//!
//! let graph = LinkGraph::build([("A", &a), ("B", &b), ("C", &c)]);
//!
//! assert_eq!(graph.outgoing("A"), vec!["B", "C"]);
//! assert_eq!(graph.backlinks("A"), vec!["B"]);
//! assert_eq!(graph.siblings("B"), vec!["C"]);
//! ```

#[cfg(feature = "petgraph")]
pub mod graph_export;

use crate::ast::{InlineToken, ParseResult};
use std::collections::{BTreeMap, BTreeSet};

type Edges = BTreeMap<String, BTreeSet<String>>;

/// Directed wikilink graph with backlink lookups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    outgoing: Edges,
    backlinks: Edges,
}

/// Note names linked from `result`, anchors stripped, in document order
fn link_targets(result: &ParseResult) -> Vec<&str> {
    let mut targets = Vec::new();

    result.visit_inline(|token| {
        if let InlineToken::WikiLink(link) = token {
            targets.push(link.note_name());
        }
    });

    targets
}

impl LinkGraph {
    /// Build the graph from `(name, parse result)` pairs
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn build<'a>(notes: impl IntoIterator<Item = (&'a str, &'a ParseResult)>) -> Self {
        let links: Vec<_> = notes
            .into_iter()
            .map(|(name, result)| (name, link_targets(result)))
            .collect();

        Self::from_links(links)
    }

    /// Parallel [`LinkGraph::build`]
    #[cfg(feature = "rayon")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    #[must_use]
    pub fn par_build(notes: &[(&str, &ParseResult)]) -> Self {
        use rayon::prelude::*;

        let links: Vec<_> = notes
            .par_iter()
            .map(|(name, result)| (*name, link_targets(result)))
            .collect();

        Self::from_links(links)
    }

    fn from_links(links: Vec<(&str, Vec<&str>)>) -> Self {
        let mut graph = Self::default();

        for (name, _) in &links {
            graph.outgoing.entry((*name).to_string()).or_default();
            graph.backlinks.entry((*name).to_string()).or_default();
        }

        for (source, targets) in links {
            for target in targets {
                let Some(target) = graph.resolve(target) else {
                    continue;
                };

                if target == source {
                    continue;
                }

                let target = target.to_string();
                graph
                    .backlinks
                    .entry(target.clone())
                    .or_default()
                    .insert(source.to_string());
                graph.outgoing.entry(source.to_string()).or_default().insert(target);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Link graph built: {} notes, {} edges",
            graph.outgoing.len(),
            graph.edge_count()
        );

        graph
    }

    fn resolve<'s>(&'s self, target: &str) -> Option<&'s str> {
        if let Some((name, _)) = self.outgoing.get_key_value(target) {
            return Some(name);
        }

        let (_, file_name) = target.rsplit_once('/')?;
        self.outgoing
            .get_key_value(file_name)
            .map(|(name, _)| name.as_str())
    }

    fn neighbours<'s>(edges: &'s Edges, name: &str) -> Vec<&'s str> {
        edges
            .get(name)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All note names, sorted
    #[must_use]
    pub fn notes(&self) -> Vec<&str> {
        self.outgoing.keys().map(String::as_str).collect()
    }

    /// Number of distinct edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(BTreeSet::len).sum()
    }

    /// Notes `name` links to, sorted and unique
    #[must_use]
    pub fn outgoing(&self, name: &str) -> Vec<&str> {
        Self::neighbours(&self.outgoing, name)
    }

    /// Notes linking to `name`, sorted and unique
    #[must_use]
    pub fn backlinks(&self, name: &str) -> Vec<&str> {
        Self::neighbours(&self.backlinks, name)
    }

    /// Notes sharing at least one backlink source with `name`
    ///
    /// Sorted and unique, `name` itself excluded.
    #[must_use]
    pub fn siblings(&self, name: &str) -> Vec<&str> {
        let siblings: BTreeSet<&str> = self
            .backlinks(name)
            .into_iter()
            .flat_map(|source| self.outgoing(source))
            .filter(|sibling| *sibling != name)
            .collect();

        siblings.into_iter().collect()
    }
}
