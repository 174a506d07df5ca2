//! The grid-backed production renderer.
//!
//! [`GridRenderer`] lays a topology out into a [`Scene`] once per draw and
//! repaints the scene into a fresh [`RenderGrid`] whenever the highlight
//! changes. Layout never runs for a highlight change. The grid doubles as
//! the data source for both stdout printing and the console map widget.

use colored::{Color, Colorize};
use ratatui::style::{Color as StyleColor, Modifier, Style};

use crate::path::HighlightSet;
use crate::render::scene::Scene;
use crate::render::{RenderError, RenderGrid, Renderer};
use crate::topology::Topology;

/// Smallest surface a topology map can be painted on.
pub const MIN_WIDTH: usize = 16;
pub const MIN_HEIGHT: usize = 8;

/// Default map size for commands that do not take explicit dimensions.
pub const DEFAULT_MAP_WIDTH: usize = 72;
pub const DEFAULT_MAP_HEIGHT: usize = 24;

pub struct GridRenderer {
    width: usize,
    height: usize,
    scene: Option<Scene>,
    highlight: HighlightSet,
    grid: Option<RenderGrid>,
}

impl GridRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            scene: None,
            highlight: HighlightSet::default(),
            grid: None,
        }
    }

    /// The most recently painted grid, if a draw has happened.
    pub fn grid(&self) -> Option<&RenderGrid> {
        self.grid.as_ref()
    }

    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    /// Renders the current grid as ANSI-colored text for stdout.
    ///
    /// Returns an empty string before the first draw.
    pub fn display(&self) -> String {
        let Some(grid) = &self.grid else {
            return String::new();
        };

        let mut out = String::new();
        for y in 0..grid.height() {
            let row_end = (0..grid.width())
                .rev()
                .find(|&x| grid.get(x, y).is_some_and(|cell| cell.ch != ' '))
                .map(|x| x + 1)
                .unwrap_or(0);

            let mut x = 0;
            while x < row_end {
                let Some(cell) = grid.get(x, y) else {
                    break;
                };
                let style = cell.style;
                let mut span = String::new();
                while x < row_end {
                    match grid.get(x, y) {
                        Some(next) if next.style == style => {
                            span.push(next.ch);
                            x += 1;
                        }
                        _ => break,
                    }
                }
                out.push_str(&paint_span(&span, style));
            }
            out.push('\n');
        }
        out
    }

    fn repaint(&mut self) {
        if let Some(scene) = &self.scene {
            self.grid = Some(scene.paint(&self.highlight));
        }
    }
}

impl Renderer for GridRenderer {
    fn draw(&mut self, topology: &Topology) -> Result<(), RenderError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(RenderError::SurfaceUnavailable {
                reason: format!(
                    "surface {}x{} is smaller than the minimum {}x{}",
                    self.width, self.height, MIN_WIDTH, MIN_HEIGHT
                ),
            });
        }

        // A redraw starts from a clean highlight; nothing from the previous
        // topology may survive into the new surface.
        self.highlight = HighlightSet::default();
        let scene = Scene::build(topology, self.width, self.height);
        self.grid = Some(scene.paint(&self.highlight));
        self.scene = Some(scene);
        Ok(())
    }

    fn set_highlight(&mut self, highlight: &HighlightSet) -> Result<(), RenderError> {
        self.highlight = highlight.clone();
        self.repaint();
        Ok(())
    }

    fn clear_highlight(&mut self) -> Result<(), RenderError> {
        if self.highlight.is_empty() {
            return Ok(());
        }
        self.highlight = HighlightSet::default();
        self.repaint();
        Ok(())
    }
}

fn paint_span(text: &str, style: Style) -> String {
    let mut painted = match style.fg.and_then(terminal_color) {
        Some(color) => text.color(color),
        None => text.normal(),
    };
    if style.add_modifier.contains(Modifier::BOLD) {
        painted = painted.bold();
    }
    painted.to_string()
}

fn terminal_color(color: StyleColor) -> Option<Color> {
    match color {
        StyleColor::Black => Some(Color::Black),
        StyleColor::Red => Some(Color::Red),
        StyleColor::Green => Some(Color::Green),
        StyleColor::Yellow => Some(Color::Yellow),
        StyleColor::Blue => Some(Color::Blue),
        StyleColor::Magenta => Some(Color::Magenta),
        StyleColor::Cyan => Some(Color::Cyan),
        StyleColor::White | StyleColor::Gray => Some(Color::White),
        StyleColor::DarkGray => Some(Color::BrightBlack),
        _ => None,
    }
}
