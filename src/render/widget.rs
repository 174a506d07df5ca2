//! Ratatui widget that blits a painted topology grid into the console.
//!
//! The widget owns no layout logic. It copies the visible window of a
//! [`RenderGrid`] into the frame buffer, offset by a [`Viewport`], and
//! leaves everything else to the renderer that painted the grid.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Widget};

use crate::render::theme::Theme;
use crate::render::RenderGrid;

const EMPTY_MESSAGE: &str = "(no topology loaded)";

/// Scroll offset into a grid larger than the visible pane.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_x: i32,
    pub scroll_y: i32,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the viewport by `(dx, dy)`, clamped so the visible window
    /// never scrolls past the grid edges.
    pub fn pan(&mut self, dx: i32, dy: i32, grid: Option<&RenderGrid>, view: Rect) {
        let (total_w, total_h) = match grid {
            Some(grid) => (grid.width() as i32, grid.height() as i32),
            None => (0, 0),
        };
        let max_x = (total_w - view.width as i32).max(0);
        let max_y = (total_h - view.height as i32).max(0);
        self.scroll_x = (self.scroll_x + dx).clamp(0, max_x);
        self.scroll_y = (self.scroll_y + dy).clamp(0, max_y);
    }
}

/// What a map render covered, for scroll hints in the status line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MapRenderResult {
    pub total_width: u16,
    pub total_height: u16,
    /// True when the grid extends beyond the visible pane.
    pub clipped: bool,
}

pub struct TopologyWidget<'a> {
    grid: Option<&'a RenderGrid>,
    block: Option<Block<'a>>,
    viewport: Viewport,
}

impl<'a> TopologyWidget<'a> {
    pub fn new(grid: Option<&'a RenderGrid>) -> Self {
        Self {
            grid,
            block: None,
            viewport: Viewport::default(),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Copies the visible window of the grid into `buf`.
    pub fn render_map(&self, area: Rect, buf: &mut Buffer) -> MapRenderResult {
        if area.width == 0 || area.height == 0 {
            return MapRenderResult::default();
        }

        let Some(grid) = self.grid else {
            let msg_x = area.x + area.width.saturating_sub(EMPTY_MESSAGE.len() as u16) / 2;
            let msg_y = area.y + area.height / 2;
            buf.set_stringn(msg_x, msg_y, EMPTY_MESSAGE, area.width as usize, Theme::dimmed());
            return MapRenderResult::default();
        };

        for y in 0..area.height {
            let src_y = y as i32 + self.viewport.scroll_y;
            if src_y < 0 || src_y >= grid.height() as i32 {
                continue;
            }
            for x in 0..area.width {
                let src_x = x as i32 + self.viewport.scroll_x;
                if src_x < 0 || src_x >= grid.width() as i32 {
                    continue;
                }
                if let Some(cell) = grid.get(src_x as usize, src_y as usize) {
                    buf[(area.x + x, area.y + y)]
                        .set_char(cell.ch)
                        .set_style(cell.style);
                }
            }
        }

        MapRenderResult {
            total_width: grid.width() as u16,
            total_height: grid.height() as u16,
            clipped: grid.width() > area.width as usize
                || grid.height() > area.height as usize
                || self.viewport.scroll_x > 0
                || self.viewport.scroll_y > 0,
        }
    }
}

impl Widget for TopologyWidget<'_> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        self.render_map(inner, buf);
    }
}

/// The standard bordered map pane used by the interactive console.
pub fn topology_map(grid: Option<&RenderGrid>) -> TopologyWidget<'_> {
    TopologyWidget::new(grid).block(
        Block::bordered()
            .title(" Topology ")
            .border_style(Theme::border()),
    )
}
