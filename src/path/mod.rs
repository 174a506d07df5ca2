//! Path highlighting over a loaded topology.
//!
//! A path arrives as an ordered list of node ids, the same shape the PCE
//! returns from a computation request. Highlighting resolves every
//! consecutive pair to a directed edge before touching the renderer, so a
//! bad path never leaves a partial highlight behind.

use std::collections::HashSet;

use crate::render::{RenderError, Renderer};
use crate::topology::Topology;

/// The set of node and edge ids currently highlighted.
///
/// Membership lives here, not on the graph elements. Renderers consult the
/// set when styling; swapping the set and restyling is the whole update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    nodes: HashSet<String>,
    edges: HashSet<String>,
}

impl HighlightSet {
    pub fn insert_node(&mut self, id: impl Into<String>) {
        self.nodes.insert(id.into());
    }

    pub fn insert_edge(&mut self, id: impl Into<String>) {
        self.edges.insert(id.into());
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node ids in sorted order, for stable display and assertions.
    pub fn sorted_nodes(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Edge ids in sorted order.
    pub fn sorted_edges(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.edges.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Errors raised while highlighting a path.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The path names a node the topology does not contain.
    #[error("unknown node '{node}' in requested path")]
    UnknownNode { node: String },

    /// Two consecutive path nodes have no directed link between them.
    #[error("no link connects '{source}' to '{target}'")]
    DisconnectedPath { r#source: String, target: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Highlights `path` on `renderer`, returning the applied set.
///
/// Any existing highlight is cleared first, unconditionally. The path is
/// then validated in full: every node must exist and every consecutive
/// pair must be joined by a directed edge. Only a fully resolved path
/// reaches the renderer, so on error the surface is left cleared rather
/// than partially styled. An empty path is not an error; it just clears.
pub fn highlight_path(
    topology: &Topology,
    renderer: &mut dyn Renderer,
    path: &[String],
) -> Result<HighlightSet, HighlightError> {
    renderer.clear_highlight()?;

    if path.is_empty() {
        return Ok(HighlightSet::default());
    }

    for node in path {
        if !topology.contains_node(node) {
            return Err(HighlightError::UnknownNode { node: node.clone() });
        }
    }

    let mut highlight = HighlightSet::default();
    for node in path {
        highlight.insert_node(node.as_str());
    }
    for pair in path.windows(2) {
        let edge = topology.edge_between(&pair[0], &pair[1]).ok_or_else(|| {
            HighlightError::DisconnectedPath {
                source: pair[0].clone(),
                target: pair[1].clone(),
            }
        })?;
        highlight.insert_edge(edge.id.as_str());
    }

    renderer.set_highlight(&highlight)?;
    Ok(highlight)
}
