use std::path::{Path, PathBuf};

use crate::errors::InclusionError;
use crate::graph::{IncludeGraph, Node, NodeIndex, ROOT};
use crate::parser::{Directive, IncludeParser, LineKind, DEFAULT_INCLUDE_GUARD};

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Literal text introducing a directive.
    pub include_guard: String,
    /// Local nodes found at this depth are kept as leaves.
    pub max_depth: Option<usize>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { include_guard: DEFAULT_INCLUDE_GUARD.to_string(), max_depth: None }
    }
}

// One open file on the traversal stack
struct Frame {
    node: NodeIndex,
    dir: PathBuf,
    lines: std::vec::IntoIter<String>,
}

/// Depth-first include resolver.
///
/// Indices are handed out in pre-order: a newly discovered local file is
/// registered and fully scanned before the including file's next line.
#[derive(Debug, Default)]
pub struct Resolver {
    opts: ResolveOptions,
    parser: IncludeParser,
}

impl Resolver {
    #[must_use]
    pub fn new(opts: ResolveOptions) -> Self {
        let parser = IncludeParser::new(&opts.include_guard);
        Self { opts, parser }
    }

    /// Resolve every file reachable from `root`.
    ///
    /// Every edge is recorded, system targets included; filtering for display
    /// is left to the renderer.
    ///
    /// # Errors
    /// Returns `InclusionError::Io` for the first file that cannot be read. No
    /// partial graph is returned.
    pub fn resolve(&self, root: &Path) -> Result<IncludeGraph, InclusionError> {
        let mut graph = IncludeGraph::with_root(root.to_string_lossy());
        let mut stack = vec![open_frame(ROOT, root)?];

        while let Some(frame) = stack.last_mut() {
            let Some(line) = frame.lines.next() else {
                stack.pop();
                continue;
            };
            let directive = match self.parser.scan_line(&line) {
                LineKind::Plain => continue,
                LineKind::Malformed(spec) => {
                    tracing::warn!("skipping unrecognised include '{}' in {}", spec, graph.nodes[frame.node].path);
                    continue;
                }
                LineKind::Directive(d) => d,
            };

            let from = frame.node;
            let depth = graph.nodes[from].depth + 1;
            let (node, file) = match directive {
                Directive::System(spec) => (Node::system(spec, depth), None),
                Directive::Local(spec) => {
                    let file = local_path(&frame.dir, &spec);
                    (Node::local(file.to_string_lossy(), depth), Some(file))
                }
            };

            if let Some(existing) = graph.lookup(node.name()) {
                graph.add_edge(from, existing);
                continue;
            }
            let idx = graph.insert(node);
            graph.add_edge(from, idx);

            let Some(file) = file else { continue };
            if self.opts.max_depth.is_some_and(|max| depth >= max) {
                tracing::debug!("depth limit reached, not scanning {}", file.display());
                continue;
            }
            // Registered above, so a cycle back to this file resolves to `idx`
            stack.push(open_frame(idx, &file)?);
        }

        tracing::info!(
            "resolved {} nodes and {} edges from {}",
            graph.len(),
            graph.edge_count(),
            root.display()
        );
        Ok(graph)
    }
}

/// Resolve `root` with the given guard text and no depth limit.
///
/// # Errors
/// See [`Resolver::resolve`].
pub fn resolve(root: &Path, include_guard: &str) -> Result<IncludeGraph, InclusionError> {
    Resolver::new(ResolveOptions { include_guard: include_guard.to_string(), max_depth: None })
        .resolve(root)
}

fn open_frame(node: NodeIndex, file: &Path) -> Result<Frame, InclusionError> {
    tracing::debug!("scanning {}", file.display());
    // Read whole; the handle is closed before any line is looked at
    let bytes = std::fs::read(file).map_err(|e| InclusionError::io(file, e))?;
    let lines: Vec<String> = String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect();
    let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(Frame { node, dir, lines: lines.into_iter() })
}

/// Quoted specs are always anchored at the including file's directory, even
/// when they start with a separator.
fn local_path(dir: &Path, spec: &str) -> PathBuf {
    dir.join(spec.trim_start_matches(std::path::is_separator))
}
