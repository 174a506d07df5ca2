//! Character grid the topology map is painted into.
//!
//! The grid is an off-screen surface of styled cells. Link lines are drawn
//! with box-drawing and slash characters chosen by segment direction, and
//! crossings merge into junction characters instead of overwriting.

use ratatui::style::Style;

/// Drawing characters for map rendering
pub mod map_chars {
    pub const HORIZONTAL: char = '─';
    pub const VERTICAL: char = '│';
    pub const DIAG_DOWN: char = '╲';
    pub const DIAG_UP: char = '╱';
    pub const CROSS: char = '┼';
    pub const DIAG_CROSS: char = '╳';
}

/// A character cell with style
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    pub ch: char,
    pub style: Style,
}

impl Default for StyledCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// An off-screen grid of styled cells
#[derive(Debug, Clone)]
pub struct RenderGrid {
    cells: Vec<Vec<StyledCell>>,
    width: usize,
    height: usize,
}

impl RenderGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![StyledCell::default(); width]; height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sets a cell; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: usize, y: usize, ch: char, style: Style) {
        if x < self.width && y < self.height {
            self.cells[y][x] = StyledCell { ch, style };
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&StyledCell> {
        self.cells.get(y).and_then(|row| row.get(x))
    }

    pub fn set_str(&mut self, x: usize, y: usize, s: &str, style: Style) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i, y, ch, style);
        }
    }

    /// Draws a straight line between two cells, merging at crossings.
    ///
    /// The character is chosen by the dominant direction of the whole
    /// segment; cells are walked with an integer line step so endpoints are
    /// always covered.
    pub fn draw_line(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, style: Style) {
        let ch = segment_char(x1 as i64, y1 as i64, x2 as i64, y2 as i64);

        let dx = (x2 as i64 - x1 as i64).abs();
        let dy = (y2 as i64 - y1 as i64).abs();
        let steps = dx.max(dy);

        if steps == 0 {
            self.merge(x1, y1, ch, style);
            return;
        }

        for i in 0..=steps {
            let x = x1 as i64 + (x2 as i64 - x1 as i64) * i / steps;
            let y = y1 as i64 + (y2 as i64 - y1 as i64) * i / steps;
            if x >= 0 && y >= 0 {
                self.merge(x as usize, y as usize, ch, style);
            }
        }
    }

    fn merge(&mut self, x: usize, y: usize, ch: char, style: Style) {
        let existing = self.get(x, y).map(|c| c.ch).unwrap_or(' ');
        self.set(x, y, merge_line_char(existing, ch), style);
    }

    /// Plain-text rows, one string per line. Styles are dropped.
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.ch).collect())
            .collect()
    }
}

/// Picks the line character for a segment by its dominant direction.
fn segment_char(x1: i64, y1: i64, x2: i64, y2: i64) -> char {
    let dx = x2 - x1;
    let dy = y2 - y1;

    if dy == 0 {
        map_chars::HORIZONTAL
    } else if dx == 0 {
        map_chars::VERTICAL
    } else if dx.abs() >= dy.abs() * 3 {
        // Shallow slopes read better as horizontal runs.
        map_chars::HORIZONTAL
    } else if dy.abs() >= dx.abs() * 3 {
        map_chars::VERTICAL
    } else if (dx > 0) == (dy > 0) {
        map_chars::DIAG_DOWN
    } else {
        map_chars::DIAG_UP
    }
}

/// Merge line characters at intersections
fn merge_line_char(existing: char, new_char: char) -> char {
    match (existing, new_char) {
        (' ', c) => c,
        (c, ' ') => c,
        (map_chars::HORIZONTAL, map_chars::VERTICAL) => map_chars::CROSS,
        (map_chars::VERTICAL, map_chars::HORIZONTAL) => map_chars::CROSS,
        (map_chars::DIAG_DOWN, map_chars::DIAG_UP) => map_chars::DIAG_CROSS,
        (map_chars::DIAG_UP, map_chars::DIAG_DOWN) => map_chars::DIAG_CROSS,
        (map_chars::CROSS, _) => map_chars::CROSS,
        (map_chars::DIAG_CROSS, _) => map_chars::DIAG_CROSS,
        // Default: prefer the new character
        (_, c) => c,
    }
}
