//! Scene geometry for the topology map.
//!
//! Layout here is a pure fit transform: node positions come declared with the
//! records, and the scene scales that coordinate box onto the grid while
//! preserving relative placement. Building the scene is the layout step;
//! painting applies highlight styles without moving anything.

use crate::path::HighlightSet;
use crate::topology::Topology;

use super::grid::RenderGrid;
use super::theme::Theme;

const MARGIN_X: usize = 1;
const MARGIN_Y: usize = 1;

/// Bounding box of declared node coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeclaredBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl DeclaredBounds {
    /// Bounds over all nodes; `None` for an empty topology.
    pub fn of(topology: &Topology) -> Option<Self> {
        let mut nodes = topology.nodes();
        let first = nodes.next()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for node in nodes {
            bounds.min_x = bounds.min_x.min(node.x);
            bounds.min_y = bounds.min_y.min(node.y);
            bounds.max_x = bounds.max_x.max(node.x);
            bounds.max_y = bounds.max_y.max(node.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A node mapped onto a grid cell.
#[derive(Debug, Clone)]
pub struct PlacedNode {
    pub id: String,
    pub x: usize,
    pub y: usize,
    pub marker: char,
    pub label: String,
}

/// One undirected link mapped onto the grid. Both directed identifiers are
/// kept so either direction of a highlighted hop lights the same line.
#[derive(Debug, Clone)]
pub struct PlacedLink {
    pub forward_id: String,
    pub reverse_id: String,
    pub from: (usize, usize),
    pub to: (usize, usize),
}

/// Laid-out topology geometry for one grid size.
#[derive(Debug, Clone)]
pub struct Scene {
    width: usize,
    height: usize,
    nodes: Vec<PlacedNode>,
    links: Vec<PlacedLink>,
}

impl Scene {
    /// Lays the topology out for a `width` x `height` grid.
    pub fn build(topology: &Topology, width: usize, height: usize) -> Self {
        let mut scene = Self {
            width,
            height,
            nodes: Vec::new(),
            links: Vec::new(),
        };

        let Some(bounds) = DeclaredBounds::of(topology) else {
            return scene;
        };

        let span_x = width.saturating_sub(1 + 2 * MARGIN_X) as f64;
        let span_y = height.saturating_sub(1 + 2 * MARGIN_Y) as f64;

        let place = |x: f64, y: f64| -> (usize, usize) {
            let fx = if bounds.width() == 0.0 {
                0.5
            } else {
                (x - bounds.min_x) / bounds.width()
            };
            let fy = if bounds.height() == 0.0 {
                0.5
            } else {
                (y - bounds.min_y) / bounds.height()
            };
            let gx = MARGIN_X + (fx * span_x).round() as usize;
            let gy = MARGIN_Y + (fy * span_y).round() as usize;
            (gx.min(width.saturating_sub(1)), gy.min(height.saturating_sub(1)))
        };

        for node in topology.sorted_nodes() {
            let (x, y) = place(node.x, node.y);
            let marker = node
                .icon
                .as_deref()
                .filter(|icon| icon.chars().count() == 1)
                .and_then(|icon| icon.chars().next())
                .unwrap_or(Theme::NODE_GLYPH);
            scene.nodes.push(PlacedNode {
                id: node.id.clone(),
                x,
                y,
                marker,
                label: node.label.clone(),
            });
        }

        for edge in topology.undirected_edges() {
            let from = scene.grid_position(&edge.source);
            let to = scene.grid_position(&edge.target);
            if let (Some(from), Some(to)) = (from, to) {
                scene.links.push(PlacedLink {
                    forward_id: edge.id.clone(),
                    reverse_id: Topology::edge_id(&edge.target, &edge.source),
                    from,
                    to,
                });
            }
        }

        scene
    }

    /// Paints the scene with the given highlight applied.
    ///
    /// A fresh grid is returned every call, so repainting never leaks cells
    /// from a previous paint. Links draw first and nodes over them.
    pub fn paint(&self, highlight: &HighlightSet) -> RenderGrid {
        let mut grid = RenderGrid::new(self.width, self.height);

        for link in &self.links {
            let on_path = highlight.contains_edge(&link.forward_id)
                || highlight.contains_edge(&link.reverse_id);
            let style = if on_path {
                Theme::edge_highlight()
            } else {
                Theme::edge()
            };
            grid.draw_line(link.from.0, link.from.1, link.to.0, link.to.1, style);
        }

        for node in &self.nodes {
            let on_path = highlight.contains_node(&node.id);
            let marker_style = if on_path {
                Theme::node_highlight()
            } else {
                Theme::node()
            };
            grid.set(node.x, node.y, node.marker, marker_style);

            let label_style = if on_path {
                Theme::node_highlight()
            } else {
                Theme::node_label()
            };
            // Labels sit right of the marker, or flip left when they would
            // run off the grid.
            let label_len = node.label.chars().count();
            if node.x + 2 + label_len <= self.width {
                grid.set_str(node.x + 2, node.y, &node.label, label_style);
            } else if node.x >= label_len + 2 {
                grid.set_str(node.x - label_len - 1, node.y, &node.label, label_style);
            } else {
                grid.set_str(node.x + 2, node.y, &node.label, label_style);
            }
        }

        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[PlacedLink] {
        &self.links
    }

    fn grid_position(&self, node_id: &str) -> Option<(usize, usize)> {
        self.nodes
            .iter()
            .find(|n| n.id == node_id)
            .map(|n| (n.x, n.y))
    }
}
