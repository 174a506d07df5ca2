//! Flow tests for topology import
//!
//! These tests take sectioned topology files through `parse_file` and a
//! session load, the same route the `show` command uses.

use tempfile::TempDir;

use pcec::render::GridRenderer;
use pcec::session::{Session, SessionError, SessionState};
use pcec::topology::{import, LinkRecord, NodeRecord};

use super::helpers::*;

/// Test: A topology file renders into a labeled map
#[test]
fn test_file_import_renders_map() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_topology(temp_dir.path(), "austria.txt", CHAIN_TOPOLOGY);

    let (nodes, links) = import::parse_file(&path).expect("Failed to parse fixture");
    let mut session = Session::new(GridRenderer::new(60, 16));
    session.load(&nodes, &links).expect("Failed to load fixture");

    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.topology().node_count(), 3);
    // Two undirected links, two directed edges each.
    assert_eq!(session.topology().edge_count(), 4);

    let text = session.renderer().display();
    assert!(text.contains("vienna"));
    assert!(text.contains("graz"));
    assert!(text.contains("linz"));
}

/// Test: Both directed edges of each file link are resolvable
#[test]
fn test_file_links_resolve_in_both_directions() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_topology(temp_dir.path(), "austria.txt", CHAIN_TOPOLOGY);

    let (nodes, links) = import::parse_file(&path).expect("Failed to parse fixture");
    let mut session = Session::new(GridRenderer::new(60, 16));
    session.load(&nodes, &links).expect("Failed to load fixture");

    let topology = session.topology();
    assert!(topology.edge_between("vienna", "graz").is_some());
    assert!(topology.edge_between("graz", "vienna").is_some());
    assert!(topology.edge_between("vienna", "linz").is_none());
}

/// Test: A link naming a missing node fails the load and leaves the
/// session untouched
#[test]
fn test_unknown_link_endpoint_rejected() {
    let nodes = vec![NodeRecord::new("a", 0.0, 0.0)];
    let links = vec![LinkRecord::new("a", "ghost")];

    let mut session = Session::new(GridRenderer::new(60, 16));
    let err = session.load(&nodes, &links).unwrap_err();

    assert!(matches!(err, SessionError::Topology(_)));
    assert!(err.to_string().contains("ghost"));
    assert_eq!(session.state(), SessionState::Unloaded);
    assert!(session.renderer().grid().is_none());
}

/// Test: Parse failures name the offending file
#[test]
fn test_malformed_file_names_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_topology(
        temp_dir.path(),
        "broken.txt",
        "NODES (\n  vienna ( 16.37 )\n)\nLINKS (\n)\n",
    );

    let err = import::parse_file(&path).unwrap_err();
    let chain = format!("{err:#}");

    assert!(chain.contains("Failed to parse topology file"));
    assert!(chain.contains("broken.txt"));
}

/// Test: The same file loads again after a teardown
#[test]
fn test_reload_after_teardown() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_topology(temp_dir.path(), "austria.txt", CHAIN_TOPOLOGY);

    let (nodes, links) = import::parse_file(&path).expect("Failed to parse fixture");
    let mut session = Session::new(GridRenderer::new(60, 16));
    session.load(&nodes, &links).expect("Failed to load fixture");

    session.teardown();
    assert_eq!(session.state(), SessionState::Unloaded);
    assert!(session.topology().is_empty());

    session.load(&nodes, &links).expect("Failed to reload fixture");
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.topology().node_count(), 3);
}
