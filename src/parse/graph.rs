//! Execution graph: dense-index adjacency over the plugin graph.
//!
//! Node ids are resolved to arena indices once; generation then walks
//! indices only. Built once per compile call and never mutated afterwards.

use std::collections::HashMap;

use petgraph::graph::DiGraph;

use super::types::{PluginEdge, PluginNode};

/// One adjacency entry: neighbor index plus the handle tag of the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub node: usize,
    pub handle: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GraphEntry<'a> {
    pub node: &'a PluginNode,
    /// Outgoing edges in input order, tagged with the source handle.
    pub next: Vec<Link>,
    /// Incoming edges in input order, tagged with the target handle.
    pub previous: Vec<Link>,
}

pub struct ExecutionGraph<'a> {
    entries: Vec<GraphEntry<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> ExecutionGraph<'a> {
    /// Edges whose endpoints are unknown are ignored. When ids repeat, the
    /// first node with that id wins.
    pub fn build(nodes: &'a [PluginNode], edges: &'a [PluginEdge]) -> Self {
        let mut entries = Vec::with_capacity(nodes.len());
        let mut index = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id().as_str();
            if index.contains_key(id) {
                continue;
            }
            index.insert(id, entries.len());
            entries.push(GraphEntry {
                node,
                next: Vec::new(),
                previous: Vec::new(),
            });
        }

        for edge in edges {
            let (Some(&s), Some(&t)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            entries[s].next.push(Link {
                node: t,
                handle: edge.source_handle.clone(),
            });
            entries[t].previous.push(Link {
                node: s,
                handle: edge.target_handle.clone(),
            });
        }

        ExecutionGraph { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn entry(&self, idx: usize) -> &GraphEntry<'a> {
        &self.entries[idx]
    }

    pub fn get(&self, id: &str) -> Option<&GraphEntry<'a>> {
        self.index_of(id).map(|idx| &self.entries[idx])
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, &GraphEntry<'a>)> {
        self.entries.iter().enumerate()
    }

    pub fn trigger(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.node.is_trigger())
    }

    pub fn triggers(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.node.is_trigger())
            .map(|(i, _)| i)
    }

    /// Successors reached through edges tagged `handle`.
    pub fn next_with_handle(&self, idx: usize, handle: &str) -> impl Iterator<Item = usize> + '_ {
        let handle = handle.to_string();
        self.entries[idx]
            .next
            .iter()
            .filter(move |l| l.handle.as_deref() == Some(handle.as_str()))
            .map(|l| l.node)
    }

    pub fn outgoing_count(&self, id: &str) -> usize {
        self.get(id).map_or(0, |e| e.next.len())
    }

    pub fn incoming_count(&self, id: &str) -> usize {
        self.get(id).map_or(0, |e| e.previous.len())
    }

    /// The routing graph as a petgraph `DiGraph`, node weights are arena
    /// indices. Used by the complexity checks.
    pub fn routing_graph(&self) -> DiGraph<usize, ()> {
        let mut graph = DiGraph::with_capacity(self.entries.len(), 0);
        let nodes: Vec<_> = (0..self.entries.len()).map(|i| graph.add_node(i)).collect();
        for (i, entry) in self.entries.iter().enumerate() {
            for link in &entry.next {
                graph.add_edge(nodes[i], nodes[link.node], ());
            }
        }
        graph
    }
}
