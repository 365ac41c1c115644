use crate::graph::{IncludeGraph, Node, NodeIndex, ROOT};
use std::fmt::Write as _;

pub mod image;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotTheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDir {
    TB,
    LR,
}

#[derive(Debug, Clone, Copy)]
pub struct DotOptions {
    pub show_system: bool,
    pub rankdir: RankDir,
    pub theme: DotTheme,
    pub fontsize: u32,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self { show_system: false, rankdir: RankDir::TB, theme: DotTheme::Light, fontsize: 10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeRole {
    Root,
    Local,
    System,
}

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Render `graph` as a Graphviz digraph.
    ///
    /// The root is labelled `root_label`; every other node is labelled with its
    /// basename, or `<spec>` for system includes. With `show_system` off, system
    /// nodes lose their node statement, the edges into them and their rank entry.
    #[must_use]
    pub fn generate_dot(&self, root_label: &str, graph: &IncludeGraph, opts: DotOptions) -> String {
        let mut s = String::new();
        s.push_str("digraph inclusion {\n");
        if opts.rankdir == RankDir::LR {
            s.push_str("  rankdir=LR;\n");
        }

        let visible = |idx: NodeIndex| -> bool {
            idx == ROOT || graph.get(idx).is_some_and(|n| opts.show_system || !n.is_system)
        };

        for (idx, node) in graph.iter() {
            // System nodes never have targets, so skipping them loses no edges
            if !visible(idx) {
                continue;
            }
            let (role, label) = if idx == ROOT {
                (NodeRole::Root, root_label.to_string())
            } else if node.is_system {
                (NodeRole::System, node.label())
            } else {
                (NodeRole::Local, node.label())
            };
            write_node(&mut s, idx, &label, role, opts);
            for &target in &node.targets {
                if visible(target) {
                    let _ = writeln!(s, "  {} -> {};", node_id(idx), node_id(target));
                }
            }
        }

        for ids in graph.depth_buckets().into_values() {
            let shown: Vec<String> = ids.into_iter().filter(|&i| visible(i)).map(node_id).collect();
            if !shown.is_empty() {
                let _ = writeln!(s, "  {{rank = same; {}}}", shown.join(" "));
            }
        }

        s.push_str("}\n");
        s
    }

    /// Render using the root node's own basename as its label.
    #[must_use]
    pub fn generate_dot_default_label(&self, graph: &IncludeGraph, opts: DotOptions) -> String {
        let label = graph.root().map(Node::label).unwrap_or_default();
        self.generate_dot(&label, graph, opts)
    }
}

fn write_node(out: &mut String, idx: NodeIndex, label: &str, role: NodeRole, opts: DotOptions) {
    let (style, fill, color, fontcolor) = style_for_role(role, opts.theme);
    let _ = writeln!(
        out,
        "  {} [shape=box fontsize={} label=\"{}\" style=\"{style}\" fillcolor=\"{fill}\" fontcolor=\"{fontcolor}\" color=\"{color}\"];",
        node_id(idx),
        opts.fontsize,
        escape_label(label)
    );
}

fn node_id(idx: NodeIndex) -> String {
    if idx == ROOT {
        "root".to_string()
    } else {
        format!("n{idx}")
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

// (style, fillcolor, color, fontcolor)
fn style_for_role(role: NodeRole, theme: DotTheme) -> (&'static str, &'static str, &'static str, &'static str) {
    match (theme, role) {
        (DotTheme::Light, NodeRole::Root) => ("filled,bold", "#ffe8a3", "#b8860b", "#000000"),
        (DotTheme::Light, NodeRole::Local) => ("filled", "#e0f3ff", "#1f77b4", "#000000"),
        (DotTheme::Light, NodeRole::System) => ("filled,dashed", "#f2f2f2", "#7f7f7f", "#404040"),

        (DotTheme::Dark, NodeRole::Root) => ("filled,bold", "#7a4c00", "#f0c05a", "#ffffff"),
        (DotTheme::Dark, NodeRole::Local) => ("filled", "#124559", "#8ecae6", "#ffffff"),
        (DotTheme::Dark, NodeRole::System) => ("filled,dashed", "#3a3a3a", "#a0a0a0", "#d0d0d0"),
    }
}
