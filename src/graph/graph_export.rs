//! Export of a [`LinkGraph`] to [`petgraph`](https://docs.rs/petgraph/latest/petgraph)
//!
//! Node weights are note names. Nodes are added in sorted name order, so
//! `NodeIndex::new(i)` is the `i`-th entry of [`LinkGraph::notes`].
//!
//! # Example
//! ```
//! use obsidian_markdown::prelude::*;
//! use petgraph::algo;
//!
//! let a = parse("[[b]]");
//! let b = parse("[[a]]");
//! let c = parse("alone");
//!
//! let graph = LinkGraph::build([("a", &a), ("b", &b), ("c", &c)]);
//!
//! assert_eq!(graph.to_digraph().edge_count(), 2);
//! assert_eq!(graph.to_ungraph().edge_count(), 1);
//! assert_eq!(algo::connected_components(&graph.to_ungraph()), 2);
//! ```

use super::LinkGraph;
use petgraph::{
    Directed, EdgeType, Graph, Undirected,
    graph::{DiGraph, NodeIndex, UnGraph},
};
use std::collections::HashMap;

impl LinkGraph {
    fn to_graph<Ty>(&self, mut graph: Graph<String, (), Ty>) -> Graph<String, (), Ty>
    where
        Ty: EdgeType,
    {
        let index: HashMap<&str, NodeIndex> = self
            .notes()
            .into_iter()
            .map(|name| (name, graph.add_node(name.to_string())))
            .collect();

        for (source, targets) in &self.outgoing {
            let from = index[source.as_str()];

            for target in targets {
                let to = index[target.as_str()];

                if !graph.is_directed() && graph.contains_edge(from, to) {
                    continue;
                }

                graph.add_edge(from, to, ());
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Graph exported. Nodes: {}, edges: {}",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    /// Directed graph: an edge `A -> B` for every link from `A` to `B`
    #[cfg_attr(docsrs, doc(cfg(feature = "petgraph")))]
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    #[must_use]
    pub fn to_digraph(&self) -> DiGraph<String, ()> {
        self.to_graph(Graph::<String, (), Directed>::new())
    }

    /// Undirected graph: one edge per linked pair, whatever the direction
    #[cfg_attr(docsrs, doc(cfg(feature = "petgraph")))]
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    #[must_use]
    pub fn to_ungraph(&self) -> UnGraph<String, ()> {
        self.to_graph(Graph::<String, (), Undirected>::new_undirected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use petgraph::{Direction, visit::EdgeRef};

    fn graph() -> LinkGraph {
        let main = parse("Main data. Other [[link]]");
        let link = parse("[[main]] [[data/main#Top]]");
        let data = parse("[[link]]");

        LinkGraph::build([("main", &main), ("link", &link), ("data", &data)])
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn digraph() {
        let graph = graph().to_digraph();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let link = graph
            .node_indices()
            .find(|index| graph[*index] == "link")
            .unwrap();

        let mut sources: Vec<_> = graph
            .edges_directed(link, Direction::Incoming)
            .map(|edge| graph[edge.source()].as_str())
            .collect();
        sources.sort_unstable();

        assert_eq!(sources, vec!["data", "main"]);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn ungraph() {
        let graph = graph().to_ungraph();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn node_order() {
        let graph = graph().to_digraph();
        let names: Vec<_> = graph.node_weights().map(String::as_str).collect();

        assert_eq!(names, vec!["data", "link", "main"]);
    }
}
