//! Session lifecycle states and the legal transitions between them.

use std::fmt;

/// Where a console session is in its lifecycle.
///
/// `Highlighted` never transitions directly to `Highlighted`; replacing a
/// highlight steps through `Loaded` so that every change is a full
/// clear-then-apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No topology loaded; only `load` is meaningful.
    Unloaded,
    /// A topology is drawn with no highlight applied.
    Loaded,
    /// A topology is drawn with a path highlight applied.
    Highlighted,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Unloaded => "unloaded",
            SessionState::Loaded => "loaded",
            SessionState::Highlighted => "highlighted",
        };
        write!(f, "{label}")
    }
}

impl SessionState {
    pub fn can_transition_to(self, next: SessionState) -> bool {
        matches!(
            (self, next),
            (SessionState::Unloaded, SessionState::Loaded)
                | (SessionState::Loaded, SessionState::Loaded)
                | (SessionState::Loaded, SessionState::Highlighted)
                | (SessionState::Highlighted, SessionState::Loaded)
                | (_, SessionState::Unloaded)
        )
    }

    pub fn valid_transitions(self) -> Vec<SessionState> {
        [
            SessionState::Unloaded,
            SessionState::Loaded,
            SessionState::Highlighted,
        ]
        .into_iter()
        .filter(|next| self.can_transition_to(*next))
        .collect()
    }
}
