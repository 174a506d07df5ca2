//! Console flow tests
//!
//! These tests drive whole sessions through the production grid renderer,
//! covering topology import, path highlighting, and the session lifecycle
//! end to end.

pub mod helpers;
pub mod highlight_flow;
pub mod lifecycle_flow;
pub mod topology_flow;
