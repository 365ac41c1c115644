//! Include graph model.
//!
//! An `IncludeGraph` is an insertion-ordered arena of [`Node`]s plus a
//! name→index table keyed by file basename. The root file always sits at
//! index 0 with depth 0. Build one with [`resolver::Resolver`] and hand it to
//! [`crate::visualization::DotGenerator`].
use crate::errors::InclusionError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub mod resolver;

pub type NodeIndex = usize;

pub const ROOT: NodeIndex = 0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub is_system: bool,
    pub depth: usize,
    /// Resolved path for local nodes, the text between the angle brackets for system nodes.
    pub path: String,
    /// Direct includees, in the order they appear in the source.
    pub targets: Vec<NodeIndex>,
}

impl Node {
    #[must_use]
    pub fn local(path: impl Into<String>, depth: usize) -> Self {
        Self { is_system: false, depth, path: path.into(), targets: Vec::new() }
    }

    #[must_use]
    pub fn system(spec: impl Into<String>, depth: usize) -> Self {
        Self { is_system: true, depth, path: spec.into(), targets: Vec::new() }
    }

    /// Dedup key: the last path component, or the whole path when it has none.
    #[must_use]
    pub fn name(&self) -> &str {
        basename(&self.path)
    }

    /// Text shown in diagrams and listings.
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_system {
            format!("<{}>", self.path)
        } else {
            self.name().to_string()
        }
    }
}

#[must_use]
pub fn basename(path: &str) -> &str {
    Path::new(path).file_name().and_then(|s| s.to_str()).unwrap_or(path)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IncludeGraph {
    pub nodes: Vec<Node>,
    // Basename -> index; doubles as the visited set during resolution
    pub names: HashMap<String, NodeIndex>,
}

impl IncludeGraph {
    /// A graph holding only the root node.
    #[must_use]
    pub fn with_root(path: impl Into<String>) -> Self {
        let mut g = Self::default();
        g.insert(Node::local(path, 0));
        g
    }

    /// Append `node` and register its name. The caller checks for an existing
    /// entry first; a colliding name is not re-pointed.
    pub fn insert(&mut self, node: Node) -> NodeIndex {
        let idx = self.nodes.len();
        self.names.entry(node.name().to_string()).or_insert(idx);
        self.nodes.push(node);
        idx
    }

    /// Record `from -> to` once.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if let Some(node) = self.nodes.get_mut(from) {
            if !node.targets.contains(&to) {
                node.targets.push(to);
            }
        }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }

    #[must_use]
    pub fn get(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx)
    }

    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// Number of recorded edges, system targets included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.targets.len()).sum()
    }

    /// Node indices grouped by depth, ascending; indices inside a bucket keep graph order.
    #[must_use]
    pub fn depth_buckets(&self) -> BTreeMap<usize, Vec<NodeIndex>> {
        let mut buckets: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
        for (idx, node) in self.iter() {
            buckets.entry(node.depth).or_default().push(idx);
        }
        buckets
    }

    /// Save the graph as pretty JSON.
    ///
    /// # Errors
    /// Returns `InclusionError` if serialization or writing fails.
    pub fn save_json(&self, path: &Path) -> Result<(), InclusionError> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).map_err(|e| InclusionError::io(path, e))
    }

    /// Load a graph previously written by [`IncludeGraph::save_json`].
    ///
    /// # Errors
    /// Returns `InclusionError` if reading or deserialization fails.
    pub fn load_json(path: &Path) -> Result<Self, InclusionError> {
        let data = std::fs::read_to_string(path).map_err(|e| InclusionError::io(path, e))?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_name_and_label() {
        let local = Node::local("/src/mgl/meta/glutil.hpp", 2);
        assert_eq!(local.name(), "glutil.hpp");
        assert_eq!(local.label(), "glutil.hpp");

        let sys = Node::system("SFML/Graphics.hpp", 1);
        assert_eq!(sys.name(), "Graphics.hpp");
        assert_eq!(sys.label(), "<SFML/Graphics.hpp>");
        assert_eq!(Node::system("vector", 1).name(), "vector");
    }

    #[test]
    fn test_insert_registers_first_name_only() {
        let mut g = IncludeGraph::with_root("main.cpp");
        let a = g.insert(Node::local("x/util.h", 1));
        let b = g.insert(Node::local("y/util.h", 1));
        assert_eq!((a, b), (1, 2));
        assert_eq!(g.lookup("util.h"), Some(1));
        assert_eq!(g.lookup("main.cpp"), Some(ROOT));
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn test_add_edge_is_idempotent() {
        let mut g = IncludeGraph::with_root("main.cpp");
        let a = g.insert(Node::local("a.h", 1));
        g.add_edge(ROOT, a);
        g.add_edge(ROOT, a);
        g.add_edge(42, a);
        assert_eq!(g.nodes[ROOT].targets, vec![a]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_depth_buckets_are_ordered() {
        let mut g = IncludeGraph::with_root("main.cpp");
        g.insert(Node::local("a.h", 1));
        g.insert(Node::local("c.h", 2));
        g.insert(Node::system("vector", 1));
        let buckets: Vec<(usize, Vec<NodeIndex>)> = g.depth_buckets().into_iter().collect();
        assert_eq!(buckets, vec![(0, vec![0]), (1, vec![1, 3]), (2, vec![2])]);
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let mut g = IncludeGraph::with_root("main.cpp");
        let a = g.insert(Node::local("a.h", 1));
        g.add_edge(ROOT, a);
        g.save_json(&path).unwrap();
        assert_eq!(IncludeGraph::load_json(&path).unwrap(), g);
        assert!(IncludeGraph::load_json(&dir.path().join("missing.json")).is_err());
    }
}
