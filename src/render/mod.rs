//! Rendering: the seam between the graph model and the visual surface.
//!
//! [`Renderer`] is the contract the path highlighter drives. The production
//! implementation is [`GridRenderer`], which paints into an off-screen
//! character grid; the grid is printed to stdout by the one-shot commands
//! and blitted into the terminal by the console's map widget.

use crate::path::HighlightSet;
use crate::topology::Topology;

pub mod grid;
pub mod printer;
pub mod scene;
pub mod theme;
pub mod widget;

pub use grid::{RenderGrid, StyledCell};
pub use printer::GridRenderer;
pub use scene::Scene;
pub use theme::Theme;
pub use widget::{topology_map, TopologyWidget, Viewport};

/// Errors raised by renderer implementations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The visual surface is missing, destroyed, or too small to paint.
    /// Not recoverable; the caller must reinitialize the renderer.
    #[error("render surface unavailable: {reason}")]
    SurfaceUnavailable { reason: String },
}

/// A visual surface for one topology.
///
/// Implementations must support repeated `draw` calls without leaking
/// elements from a prior draw, and must apply highlight changes as style
/// deltas without recomputing layout.
pub trait Renderer {
    /// Lays out and paints the full topology with no highlight applied.
    fn draw(&mut self, topology: &Topology) -> Result<(), RenderError>;

    /// Replaces the current highlight with `highlight` and restyles the
    /// affected elements.
    fn set_highlight(&mut self, highlight: &HighlightSet) -> Result<(), RenderError>;

    /// Resets every element to its default style.
    fn clear_highlight(&mut self) -> Result<(), RenderError>;
}
