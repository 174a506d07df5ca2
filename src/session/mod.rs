//! A console session: one topology, one renderer, one highlight.
//!
//! The session is the single writer for everything on screen. Commands and
//! the interactive console funnel every load, highlight, and teardown
//! through it, which is what keeps highlight changes serialized and the
//! lifecycle honest.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::path::{self, HighlightError, HighlightSet};
use crate::render::{RenderError, Renderer};
use crate::topology::{LinkRecord, NodeRecord, Topology, TopologyError};

pub mod state;

pub use state::SessionState;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid session transition from {from} to {to}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },

    #[error("no topology loaded")]
    NotLoaded,

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Highlight(#[from] HighlightError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub struct Session<R: Renderer> {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: SessionState,
    topology: Topology,
    highlight: HighlightSet,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: SessionState::Unloaded,
            topology: Topology::default(),
            highlight: HighlightSet::default(),
            renderer,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Builds a topology from `nodes` and `links` and draws it.
    ///
    /// Validation runs before anything is replaced, so a malformed record
    /// set leaves the previous topology on screen untouched. A renderer
    /// failure tears the session down instead; a half-drawn surface must
    /// not masquerade as loaded.
    pub fn load(&mut self, nodes: &[NodeRecord], links: &[LinkRecord]) -> Result<(), SessionError> {
        let topology = Topology::load(nodes, links)?;
        self.transition(SessionState::Loaded)?;

        self.highlight = HighlightSet::default();
        if let Err(err) = self.renderer.draw(&topology) {
            self.teardown();
            return Err(err.into());
        }
        self.topology = topology;
        Ok(())
    }

    /// Highlights `path` on the drawn topology, replacing any prior
    /// highlight. An empty path clears and stays in `Loaded`.
    pub fn highlight_path(&mut self, path: &[String]) -> Result<&HighlightSet, SessionError> {
        if self.state == SessionState::Unloaded {
            return Err(SessionError::NotLoaded);
        }

        // A replacement highlight steps through Loaded first; the old set
        // is gone before the new one is resolved.
        self.transition(SessionState::Loaded)?;
        self.highlight = HighlightSet::default();

        let set = path::highlight_path(&self.topology, &mut self.renderer, path)?;
        if !set.is_empty() {
            self.transition(SessionState::Highlighted)?;
        }
        self.highlight = set;
        Ok(&self.highlight)
    }

    /// Removes any highlight, returning the session to `Loaded`.
    pub fn clear_highlight(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Unloaded {
            return Err(SessionError::NotLoaded);
        }
        self.renderer.clear_highlight()?;
        self.highlight = HighlightSet::default();
        self.transition(SessionState::Loaded)?;
        Ok(())
    }

    /// Releases the topology and returns to `Unloaded`. Idempotent, and
    /// deliberately does not touch the renderer; teardown must succeed
    /// even after the surface is gone.
    pub fn teardown(&mut self) {
        self.highlight = HighlightSet::default();
        self.topology.teardown();
        self.state = SessionState::Unloaded;
    }

    fn transition(&mut self, next: SessionState) -> Result<(), SessionError> {
        if !self.state.can_transition_to(next) {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct StubRenderer {
        draws: usize,
        clears: usize,
        applied: Vec<HighlightSet>,
        fail_draw: bool,
    }

    impl Renderer for StubRenderer {
        fn draw(&mut self, _topology: &Topology) -> Result<(), RenderError> {
            if self.fail_draw {
                return Err(RenderError::SurfaceUnavailable {
                    reason: "surface torn down".to_string(),
                });
            }
            self.draws += 1;
            Ok(())
        }

        fn set_highlight(&mut self, highlight: &HighlightSet) -> Result<(), RenderError> {
            self.applied.push(highlight.clone());
            Ok(())
        }

        fn clear_highlight(&mut self) -> Result<(), RenderError> {
            self.clears += 1;
            Ok(())
        }
    }

    fn chain_records() -> (Vec<NodeRecord>, Vec<LinkRecord>) {
        let nodes = vec![
            NodeRecord::new("a", 0.0, 0.0),
            NodeRecord::new("b", 1.0, 0.0),
            NodeRecord::new("c", 2.0, 0.0),
        ];
        let links = vec![LinkRecord::new("a", "b"), LinkRecord::new("b", "c")];
        (nodes, links)
    }

    fn loaded_session() -> Session<StubRenderer> {
        let mut session = Session::new(StubRenderer::default());
        let (nodes, links) = chain_records();
        session.load(&nodes, &links).unwrap();
        session
    }

    fn path_of(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_new_session_starts_unloaded() {
        let session = Session::new(StubRenderer::default());
        assert_eq!(session.state(), SessionState::Unloaded);
        assert!(session.topology().is_empty());
        assert!(session.highlight().is_empty());
        assert!(!session.id().is_nil());
    }

    #[test]
    fn test_load_draws_and_enters_loaded() {
        let session = loaded_session();
        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.topology().node_count(), 3);
        assert_eq!(session.topology().edge_count(), 4);
        assert_eq!(session.renderer().draws, 1);
    }

    #[test]
    fn test_reload_replaces_topology() {
        let mut session = loaded_session();
        let nodes = vec![
            NodeRecord::new("x", 0.0, 0.0),
            NodeRecord::new("y", 1.0, 1.0),
        ];
        let links = vec![LinkRecord::new("x", "y")];

        session.load(&nodes, &links).unwrap();

        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.topology().node_count(), 2);
        assert!(session.topology().contains_node("x"));
        assert!(!session.topology().contains_node("a"));
        assert_eq!(session.renderer().draws, 2);
    }

    #[test]
    fn test_failed_load_keeps_previous_topology() {
        let mut session = loaded_session();
        let nodes = vec![
            NodeRecord::new("dup", 0.0, 0.0),
            NodeRecord::new("dup", 1.0, 1.0),
        ];

        let err = session.load(&nodes, &[]).unwrap_err();

        assert!(matches!(err, SessionError::Topology(_)));
        assert_eq!(session.state(), SessionState::Loaded);
        assert!(session.topology().contains_node("a"));
        assert_eq!(session.renderer().draws, 1);
    }

    #[test]
    fn test_renderer_failure_tears_down() {
        let mut session = Session::new(StubRenderer {
            fail_draw: true,
            ..StubRenderer::default()
        });
        let (nodes, links) = chain_records();

        let err = session.load(&nodes, &links).unwrap_err();

        assert!(matches!(err, SessionError::Render(_)));
        assert_eq!(session.state(), SessionState::Unloaded);
        assert!(session.topology().is_empty());
    }

    #[test]
    fn test_highlight_path_enters_highlighted() {
        let mut session = loaded_session();

        session.highlight_path(&path_of(&["a", "b", "c"])).unwrap();

        assert_eq!(session.state(), SessionState::Highlighted);
        assert_eq!(session.highlight().node_count(), 3);
        assert_eq!(session.highlight().edge_count(), 2);
    }

    #[test]
    fn test_highlight_requires_load() {
        let mut session = Session::new(StubRenderer::default());
        let err = session.highlight_path(&path_of(&["a"])).unwrap_err();
        assert!(matches!(err, SessionError::NotLoaded));
    }

    #[test]
    fn test_rehighlight_replaces_previous_set() {
        let mut session = loaded_session();
        session.highlight_path(&path_of(&["a", "b", "c"])).unwrap();

        session.highlight_path(&path_of(&["c", "b"])).unwrap();

        assert_eq!(session.state(), SessionState::Highlighted);
        assert_eq!(session.highlight().sorted_nodes(), vec!["b", "c"]);
        assert_eq!(session.highlight().sorted_edges(), vec!["c:b"]);
        // Each apply was preceded by an unconditional clear.
        assert_eq!(session.renderer().clears, 2);
        assert_eq!(session.renderer().applied.len(), 2);
    }

    #[test]
    fn test_failed_highlight_leaves_cleared_loaded_state() {
        let mut session = loaded_session();
        session.highlight_path(&path_of(&["a", "b"])).unwrap();

        let err = session.highlight_path(&path_of(&["a", "ghost"])).unwrap_err();

        assert!(matches!(
            err,
            SessionError::Highlight(HighlightError::UnknownNode { .. })
        ));
        assert_eq!(session.state(), SessionState::Loaded);
        assert!(session.highlight().is_empty());
    }

    #[test]
    fn test_empty_path_clears_and_stays_loaded() {
        let mut session = loaded_session();
        session.highlight_path(&path_of(&["a", "b"])).unwrap();

        let set = session.highlight_path(&[]).unwrap();

        assert!(set.is_empty());
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_clear_highlight_returns_to_loaded() {
        let mut session = loaded_session();
        session.highlight_path(&path_of(&["a", "b"])).unwrap();

        session.clear_highlight().unwrap();

        assert_eq!(session.state(), SessionState::Loaded);
        assert!(session.highlight().is_empty());

        // Clearing again is harmless.
        session.clear_highlight().unwrap();
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_clear_highlight_requires_load() {
        let mut session = Session::new(StubRenderer::default());
        let err = session.clear_highlight().unwrap_err();
        assert!(matches!(err, SessionError::NotLoaded));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut session = loaded_session();
        session.highlight_path(&path_of(&["a", "b"])).unwrap();

        session.teardown();
        assert_eq!(session.state(), SessionState::Unloaded);
        assert!(session.topology().is_empty());
        assert!(session.highlight().is_empty());

        session.teardown();
        assert_eq!(session.state(), SessionState::Unloaded);
    }

    #[test]
    fn test_load_after_teardown() {
        let mut session = loaded_session();
        session.teardown();

        let (nodes, links) = chain_records();
        session.load(&nodes, &links).unwrap();

        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.topology().node_count(), 3);
    }
}
