//! Flow tests for the session lifecycle
//!
//! These tests walk sessions through load, highlight, clear, and teardown
//! over the production grid renderer, including renderer failures.

use pcec::render::{GridRenderer, RenderError};
use pcec::session::{Session, SessionError, SessionState};

use super::helpers::*;

/// Test: The full lifecycle walks unloaded, loaded, highlighted, loaded,
/// unloaded
#[test]
fn test_full_lifecycle() {
    let mut session = Session::new(GridRenderer::new(60, 16));
    assert_eq!(session.state(), SessionState::Unloaded);

    let (nodes, links) = chain_records();
    session.load(&nodes, &links).expect("Failed to load");
    assert_eq!(session.state(), SessionState::Loaded);

    session
        .highlight_path(&path_of(&["a", "b"]))
        .expect("Failed to highlight");
    assert_eq!(session.state(), SessionState::Highlighted);

    session.clear_highlight().expect("Failed to clear");
    assert_eq!(session.state(), SessionState::Loaded);

    session.teardown();
    assert_eq!(session.state(), SessionState::Unloaded);
}

/// Test: Highlighting without a loaded topology fails
#[test]
fn test_highlight_requires_loaded_topology() {
    let mut session = Session::new(GridRenderer::new(60, 16));

    let err = session.highlight_path(&path_of(&["a"])).unwrap_err();

    assert!(matches!(err, SessionError::NotLoaded));
    assert_eq!(session.state(), SessionState::Unloaded);
}

/// Test: A replacement highlight drops the previous set entirely
#[test]
fn test_replacement_highlight_drops_previous_set() {
    let mut session = loaded_session();
    session.highlight_path(&path_of(&["a", "b", "c"])).unwrap();

    let set = session.highlight_path(&path_of(&["b", "c"])).unwrap();

    assert_eq!(set.sorted_nodes(), vec!["b", "c"]);
    assert_eq!(set.sorted_edges(), vec!["b:c"]);
    assert!(!set.contains_node("a"));
    assert!(!set.contains_edge("a:b"));
}

/// Test: An undersized surface fails the draw and tears the session down
#[test]
fn test_undersized_surface_tears_down() {
    let mut session = Session::new(GridRenderer::new(4, 4));
    let (nodes, links) = chain_records();

    let err = session.load(&nodes, &links).unwrap_err();

    assert!(matches!(
        err,
        SessionError::Render(RenderError::SurfaceUnavailable { .. })
    ));
    assert_eq!(session.state(), SessionState::Unloaded);
    assert!(session.topology().is_empty());
}

/// Test: Teardown succeeds from every state and repeats harmlessly
#[test]
fn test_teardown_from_any_state() {
    let mut session = Session::new(GridRenderer::new(60, 16));
    session.teardown();
    assert_eq!(session.state(), SessionState::Unloaded);

    let (nodes, links) = chain_records();
    session.load(&nodes, &links).expect("Failed to load");
    session.teardown();
    assert_eq!(session.state(), SessionState::Unloaded);

    session.load(&nodes, &links).expect("Failed to reload");
    session
        .highlight_path(&path_of(&["a", "b"]))
        .expect("Failed to highlight");
    session.teardown();
    session.teardown();
    assert_eq!(session.state(), SessionState::Unloaded);
    assert!(session.highlight().is_empty());
}

/// Test: Clearing with no highlight applied keeps the session loaded
#[test]
fn test_clear_without_highlight_stays_loaded() {
    let mut session = loaded_session();

    session.clear_highlight().expect("Failed to clear");

    assert_eq!(session.state(), SessionState::Loaded);
    assert!(session.highlight().is_empty());
}

/// Test: The session id survives the whole lifecycle
#[test]
fn test_session_id_is_stable() {
    let mut session = loaded_session();
    let id = session.id();

    session.highlight_path(&path_of(&["a", "b"])).unwrap();
    session.teardown();

    assert_eq!(session.id(), id);
}
