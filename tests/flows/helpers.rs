//! Shared fixtures for console flow tests

use std::path::{Path, PathBuf};

use pcec::render::{GridRenderer, RenderGrid, Theme};
use pcec::session::Session;
use pcec::topology::{LinkRecord, NodeRecord};

/// Sectioned topology text for a three node chain: vienna - graz - linz.
pub const CHAIN_TOPOLOGY: &str = "\
NODES (
  vienna ( 16.37 48.21 )
  graz ( 15.44 47.07 )
  linz ( 14.29 48.31 )
)
LINKS (
  L1 ( vienna graz ) 1.00 40.00
  L2 ( graz linz ) 1.00 40.00
)
";

/// Test helper: Write a topology fixture file under `dir`
pub fn write_topology(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write topology fixture");
    path
}

/// Test helper: Records for a three node chain a - b - c
pub fn chain_records() -> (Vec<NodeRecord>, Vec<LinkRecord>) {
    let nodes = vec![
        NodeRecord::new("a", 0.0, 0.0),
        NodeRecord::new("b", 5.0, 0.0),
        NodeRecord::new("c", 10.0, 0.0),
    ];
    let links = vec![LinkRecord::new("a", "b"), LinkRecord::new("b", "c")];
    (nodes, links)
}

/// Test helper: Session over the production grid renderer with the chain
/// topology loaded and drawn
pub fn loaded_session() -> Session<GridRenderer> {
    let mut session = Session::new(GridRenderer::new(60, 16));
    let (nodes, links) = chain_records();
    session
        .load(&nodes, &links)
        .expect("Failed to load chain topology");
    session
}

/// Test helper: Owned strings for a node id path
pub fn path_of(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Test helper: Count node glyphs painted with the highlight style
pub fn highlighted_glyphs(grid: &RenderGrid) -> usize {
    (0..grid.height())
        .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            grid.get(x, y).is_some_and(|cell| {
                cell.ch == Theme::NODE_GLYPH && cell.style == Theme::node_highlight()
            })
        })
        .count()
}
