//! Flow tests for path highlighting
//!
//! These tests run requested paths against the production grid renderer
//! and check both the reported highlight set and the painted cells.

use pcec::path::HighlightError;
use pcec::session::{SessionError, SessionState};

use super::helpers::*;

/// Test: A chain path highlights every hop and both connecting links
#[test]
fn test_chain_path_highlights_hops_and_links() {
    let mut session = loaded_session();

    let set = session.highlight_path(&path_of(&["a", "b", "c"])).unwrap().clone();

    assert_eq!(set.sorted_nodes(), vec!["a", "b", "c"]);
    assert_eq!(set.sorted_edges(), vec!["a:b", "b:c"]);
    assert_eq!(session.state(), SessionState::Highlighted);

    let grid = session.renderer().grid().expect("grid after highlight");
    assert_eq!(highlighted_glyphs(grid), 3);
}

/// Test: A reversed path resolves the opposite directed edges
#[test]
fn test_reversed_path_uses_directed_edges() {
    let mut session = loaded_session();

    let set = session.highlight_path(&path_of(&["c", "b", "a"])).unwrap();

    assert_eq!(set.sorted_edges(), vec!["b:a", "c:b"]);
}

/// Test: Adjacent path nodes without a link fail and leave no highlight
#[test]
fn test_disconnected_path_leaves_no_highlight() {
    let mut session = loaded_session();
    session.highlight_path(&path_of(&["a", "b"])).unwrap();

    let err = session.highlight_path(&path_of(&["a", "c"])).unwrap_err();

    match err {
        SessionError::Highlight(HighlightError::DisconnectedPath { source, target }) => {
            assert_eq!(source, "a");
            assert_eq!(target, "c");
        }
        other => panic!("expected a disconnected path error, got {other}"),
    }
    assert_eq!(session.state(), SessionState::Loaded);
    assert!(session.highlight().is_empty());

    // The previous highlight was cleared before validation failed.
    let grid = session.renderer().grid().expect("grid after failed highlight");
    assert_eq!(highlighted_glyphs(grid), 0);
}

/// Test: One unknown node rejects the whole path
#[test]
fn test_unknown_node_rejects_whole_path() {
    let mut session = loaded_session();

    let err = session
        .highlight_path(&path_of(&["a", "ghost", "c"]))
        .unwrap_err();

    match err {
        SessionError::Highlight(HighlightError::UnknownNode { node }) => {
            assert_eq!(node, "ghost");
        }
        other => panic!("expected an unknown node error, got {other}"),
    }
    assert!(session.highlight().is_empty());
    let grid = session.renderer().grid().expect("grid after failed highlight");
    assert_eq!(highlighted_glyphs(grid), 0);
}

/// Test: An empty path clears the highlight without an error
#[test]
fn test_empty_path_clears_highlight() {
    let mut session = loaded_session();
    session.highlight_path(&path_of(&["a", "b"])).unwrap();

    let set = session.highlight_path(&[]).unwrap();

    assert!(set.is_empty());
    assert_eq!(session.state(), SessionState::Loaded);
    let grid = session.renderer().grid().expect("grid after empty path");
    assert_eq!(highlighted_glyphs(grid), 0);
}

/// Test: A single node path highlights the node and no links
#[test]
fn test_single_node_path_highlights_node_only() {
    let mut session = loaded_session();

    let set = session.highlight_path(&path_of(&["b"])).unwrap().clone();

    assert_eq!(set.sorted_nodes(), vec!["b"]);
    assert_eq!(set.edge_count(), 0);
    assert_eq!(session.state(), SessionState::Highlighted);

    let grid = session.renderer().grid().expect("grid after highlight");
    assert_eq!(highlighted_glyphs(grid), 1);
}

/// Test: Repeating a request reproduces the same highlight set
#[test]
fn test_repeated_request_reproduces_set() {
    let mut session = loaded_session();
    let path = path_of(&["a", "b", "c"]);

    let first = session.highlight_path(&path).unwrap().clone();
    let second = session.highlight_path(&path).unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(session.state(), SessionState::Highlighted);
}

/// Test: Teardown and reload reproduce the same highlight set
#[test]
fn test_teardown_reload_reproduces_set() {
    let mut session = loaded_session();
    let path = path_of(&["a", "b", "c"]);
    let before = session.highlight_path(&path).unwrap().clone();

    session.teardown();
    let (nodes, links) = chain_records();
    session.load(&nodes, &links).expect("Failed to reload");
    let after = session.highlight_path(&path).unwrap().clone();

    assert_eq!(before, after);
}
