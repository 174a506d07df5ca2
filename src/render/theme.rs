use ratatui::style::{Color, Modifier, Style};

/// Color scheme for the topology map
pub struct MapColors;

impl MapColors {
    // Topology elements
    pub const NODE: Color = Color::Cyan;
    pub const NODE_LABEL: Color = Color::White;
    pub const EDGE: Color = Color::DarkGray;

    // Highlighted path elements
    pub const PATH: Color = Color::Red;

    // UI chrome
    pub const HEADER: Color = Color::White;
    pub const DIMMED: Color = Color::DarkGray;
    pub const BORDER: Color = Color::Gray;

    // Log levels
    pub const LOG_INFO: Color = Color::Green;
    pub const LOG_WARN: Color = Color::Yellow;
    pub const LOG_ERROR: Color = Color::Red;
}

/// Theme provides pre-built styles
pub struct Theme;

impl Theme {
    /// Default marker glyph for a node without an icon override.
    pub const NODE_GLYPH: char = '●';

    pub fn header() -> Style {
        Style::default().fg(MapColors::HEADER).add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(MapColors::DIMMED)
    }

    pub fn border() -> Style {
        Style::default().fg(MapColors::BORDER)
    }

    pub fn node() -> Style {
        Style::default().fg(MapColors::NODE)
    }

    pub fn node_highlight() -> Style {
        Style::default().fg(MapColors::PATH).add_modifier(Modifier::BOLD)
    }

    pub fn node_label() -> Style {
        Style::default().fg(MapColors::NODE_LABEL)
    }

    pub fn edge() -> Style {
        Style::default().fg(MapColors::EDGE)
    }

    pub fn edge_highlight() -> Style {
        Style::default().fg(MapColors::PATH).add_modifier(Modifier::BOLD)
    }

    pub fn log_level(level: &str) -> Style {
        let color = match level.to_ascii_uppercase().as_str() {
            "WARN" | "WARNING" => MapColors::LOG_WARN,
            "ERROR" | "SEVERE" | "FATAL" => MapColors::LOG_ERROR,
            _ => MapColors::LOG_INFO,
        };
        Style::default().fg(color)
    }
}
