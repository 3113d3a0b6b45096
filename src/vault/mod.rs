//! Obsidian vault: every note of a directory tree
//!
//! # Examples
//! ## Basic vault analysis
//! ```no_run
//! use obsidian_markdown::prelude::*;
//!
//! let vault = Vault::open(&VaultOptions::new("/path/to/vault")).unwrap();
//!
//! if vault.have_duplicates_by_name() {
//!     println!("Duplicate note names found!");
//! }
//!
//! let graph = vault.link_graph();
//! for note in graph.notes() {
//!     println!("{note}: {} backlinks", graph.backlinks(note).len());
//! }
//! ```
//!
//! ## Building knowledge graphs (requires petgraph feature)
//! ```no_run
//! #[cfg(feature = "petgraph")]
//! {
//!     use obsidian_markdown::prelude::*;
//!     use petgraph::dot::{Dot, Config};
//!
//!     let vault = Vault::open(&VaultOptions::new("/path/to/vault")).unwrap();
//!     let graph = vault.link_graph().to_digraph();
//!
//!     println!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]));
//!     println!("Found {} connected components", petgraph::algo::connected_components(&graph));
//! }
//! ```

pub mod vault_duplicates;
pub mod vault_open;


use crate::{graph::LinkGraph, note::Note};
use std::path::{Path, PathBuf};

/// Notes of a vault and its root directory
///
/// Notes keep the walk order: sorted by file name, depth first.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Vault {
    notes: Vec<Note>,
    path: PathBuf,
}

impl Vault {
    /// All notes
    #[inline]
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Vault root directory
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of notes
    #[inline]
    #[must_use]
    pub const fn count_notes(&self) -> usize {
        self.notes.len()
    }

    /// Note by name, the first one in walk order if names repeat
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Note> {
        self.notes
            .iter()
            .find(|note| note.name().is_some_and(|note_name| note_name == name))
    }

    fn named(&self) -> Vec<(String, &Note)> {
        self.notes
            .iter()
            .filter_map(|note| note.name().map(|name| (name, note)))
            .collect()
    }

    /// Wikilink graph of the vault, nodes are note names
    ///
    /// Notes sharing a name collapse into one node, see
    /// [`duplicates_by_name`](Vault::duplicates_by_name).
    #[must_use]
    pub fn link_graph(&self) -> LinkGraph {
        let named = self.named();

        LinkGraph::build(
            named
                .iter()
                .map(|(name, note)| (name.as_str(), note.parsed())),
        )
    }

    /// Parallel [`link_graph`](Vault::link_graph)
    #[cfg(feature = "rayon")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    #[must_use]
    pub fn par_link_graph(&self) -> LinkGraph {
        let named = self.named();
        let pairs: Vec<_> = named
            .iter()
            .map(|(name, note)| (name.as_str(), note.parsed()))
            .collect();

        LinkGraph::par_build(&pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::vault_test::create_test_vault;

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn accessors() {
        let (vault, path) = create_test_vault().unwrap();

        assert_eq!(vault.path(), path.path());
        assert_eq!(vault.count_notes(), 3);
        assert_eq!(vault.notes().len(), 3);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn get() {
        let (vault, path) = create_test_vault().unwrap();

        let main = vault.get("main").unwrap();
        assert_eq!(main.path(), Some(path.path().join("data").join("main.md").as_path()));
        assert_eq!(vault.get("link").unwrap().frontmatter()["topic"], "link");
        assert!(vault.get("missing").is_none());
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn link_graph() {
        let (vault, _path) = create_test_vault().unwrap();

        let graph = vault.link_graph();

        assert_eq!(graph.notes(), vec!["link", "main"]);
        assert_eq!(graph.outgoing("link"), vec!["main"]);
        assert_eq!(graph.backlinks("link"), vec!["main"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    #[cfg(feature = "rayon")]
    fn par_link_graph() {
        let (vault, _path) = create_test_vault().unwrap();

        assert_eq!(vault.par_link_graph(), vault.link_graph());
    }
}
