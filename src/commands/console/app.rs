//! Ratatui application for the interactive console.
//!
//! The console keeps one [`Session`] alive for its whole run: the map pane
//! shows the session renderer's grid, path requests typed into the input
//! line drive the session's highlight, and the log pane polls the
//! controller every two seconds.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};

use crate::client::{client_for, LogRecord, PceClient};
use crate::render::printer::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use crate::render::theme::Theme;
use crate::render::{topology_map, GridRenderer, RenderGrid, Viewport};
use crate::session::{Session, SessionState};
use crate::topology::import;
use crate::validation::validate_node_id;

/// Poll timeout for the event loop (100ms for responsive UI).
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// How often the log pane asks the controller for new records.
const LOG_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Log records kept in the pane's scrollback.
const LOG_HISTORY: usize = 200;

/// Map cells one arrow key press scrolls horizontally.
const PAN_STEP: i32 = 2;

/// Where the console got its topology, for the `r` reload key.
enum TopologySource {
    File(PathBuf),
    Controller,
}

/// Entry point for the interactive console.
pub fn execute(url: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let client = client_for(url)?;
    let mut session = Session::new(GridRenderer::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT));

    // Load before the terminal goes raw so failures print normally.
    let (source, connected) = match file {
        Some(path) => {
            let (nodes, links) = import::parse_file(&path)?;
            session.load(&nodes, &links)?;
            (TopologySource::File(path), false)
        }
        None => {
            client.connect().context("Failed to connect to the PCE")?;
            let (nodes, links) = client.fetch_topology()?;
            session.load(&nodes, &links)?;
            (TopologySource::Controller, true)
        }
    };

    let mut app = ConsoleApp::new(client, session, source, connected)?;
    app.run()
}

struct ConsoleApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    running: Arc<AtomicBool>,
    client: PceClient,
    session: Session<GridRenderer>,
    source: TopologySource,
    connected: bool,
    viewport: Viewport,
    /// Inner area of the map pane from the last render, for pan clamping.
    map_view: Rect,
    input: String,
    input_active: bool,
    show_logs: bool,
    logs: Vec<LogRecord>,
    last_log_poll: Option<Instant>,
    last_info: Option<String>,
    last_error: Option<String>,
}

impl ConsoleApp {
    fn new(
        client: PceClient,
        session: Session<GridRenderer>,
        source: TopologySource,
        connected: bool,
    ) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
            .context("Failed to set Ctrl-C handler")?;

        Ok(Self {
            terminal,
            running,
            client,
            session,
            source,
            connected,
            viewport: Viewport::new(),
            map_view: Rect::default(),
            input: String::new(),
            input_active: false,
            show_logs: true,
            logs: Vec::new(),
            last_log_poll: None,
            last_info: None,
            last_error: None,
        })
    }

    fn run(&mut self) -> Result<()> {
        while self.running.load(Ordering::SeqCst) {
            self.poll_logs();

            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.render()?;
        }

        // Cleanup: give the controller its client slot back and release
        // the topology before the terminal is restored.
        if self.connected {
            let _ = self.client.disconnect();
        }
        self.session.teardown();
        Ok(())
    }

    fn poll_logs(&mut self) {
        if !self.connected {
            return;
        }
        let due = self
            .last_log_poll
            .map(|at| at.elapsed() >= LOG_POLL_INTERVAL)
            .unwrap_or(true);
        if !due {
            return;
        }
        self.last_log_poll = Some(Instant::now());

        match self.client.fetch_logs() {
            Ok(records) => {
                self.logs.extend(records);
                if self.logs.len() > LOG_HISTORY {
                    let excess = self.logs.len() - LOG_HISTORY;
                    self.logs.drain(..excess);
                }
            }
            Err(err) => self.last_error = Some(format!("Log poll failed: {err:#}")),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running.store(false, Ordering::SeqCst);
            return;
        }

        if self.input_active {
            match key.code {
                KeyCode::Enter => self.submit_request(),
                KeyCode::Esc => {
                    self.input.clear();
                    self.input_active = false;
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running.store(false, Ordering::SeqCst),
            KeyCode::Char('p') => {
                self.input_active = true;
                self.last_info = None;
                self.last_error = None;
            }
            KeyCode::Char('c') => self.clear_highlight(),
            KeyCode::Char('l') => self.show_logs = !self.show_logs,
            KeyCode::Char('r') => self.reload_topology(),
            KeyCode::Left => self.pan(-PAN_STEP, 0),
            KeyCode::Right => self.pan(PAN_STEP, 0),
            KeyCode::Up => self.pan(0, -1),
            KeyCode::Down => self.pan(0, 1),
            _ => {}
        }
    }

    fn submit_request(&mut self) {
        let input = std::mem::take(&mut self.input);
        self.input_active = false;

        match parse_endpoints(&input) {
            Ok((source, target)) => match self.request_path(&source, &target) {
                Ok(message) => {
                    self.last_error = None;
                    self.last_info = Some(message);
                }
                Err(err) => self.last_error = Some(format!("{err:#}")),
            },
            Err(err) => self.last_error = Some(format!("{err:#}")),
        }
    }

    fn request_path(&mut self, source: &str, target: &str) -> Result<String> {
        self.ensure_connected()?;

        let path = self.client.request_path(source, target)?;
        if path.is_empty() {
            self.session.highlight_path(&[])?;
            return Ok(format!("No path from '{source}' to '{target}'"));
        }

        self.session.highlight_path(&path)?;
        Ok(format!("Path: {}", path.join(" → ")))
    }

    fn ensure_connected(&mut self) -> Result<()> {
        if self.connected {
            return Ok(());
        }
        self.client.connect().context("Failed to connect to the PCE")?;
        self.connected = true;
        Ok(())
    }

    fn clear_highlight(&mut self) {
        match self.session.clear_highlight() {
            Ok(()) => {
                self.last_error = None;
                self.last_info = Some("Highlight cleared".to_string());
            }
            Err(err) => self.last_error = Some(format!("{err:#}")),
        }
    }

    fn reload_topology(&mut self) {
        let records = match &self.source {
            TopologySource::File(path) => import::parse_file(path),
            TopologySource::Controller => {
                let fetched = self
                    .ensure_connected()
                    .and_then(|()| self.client.fetch_topology());
                if fetched.is_err() {
                    // A stale topology must not outlive a failed fetch.
                    self.session.teardown();
                    self.viewport = Viewport::new();
                }
                fetched
            }
        };

        let loaded = records.and_then(|(nodes, links)| {
            self.session
                .load(&nodes, &links)
                .map_err(anyhow::Error::from)
        });

        match loaded {
            Ok(()) => {
                self.viewport = Viewport::new();
                self.last_error = None;
                self.last_info = Some(format!(
                    "Topology reloaded: {} nodes",
                    self.session.topology().node_count()
                ));
            }
            Err(err) => self.last_error = Some(format!("{err:#}")),
        }
    }

    fn pan(&mut self, dx: i32, dy: i32) {
        let map_view = self.map_view;
        self.viewport
            .pan(dx, dy, self.session.renderer().grid(), map_view);
    }

    fn render(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(8),    // Map + logs
                Constraint::Length(3), // Input line
                Constraint::Length(2), // Footer
            ])
            .split(area);

        let (map_area, log_area) = if self.show_logs {
            let content = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(chunks[1]);
            (content[0], Some(content[1]))
        } else {
            (chunks[1], None)
        };
        self.map_view = Block::bordered().inner(map_area);

        // Extract all data we need before entering the closure
        let header = self.header_line();
        // A torn-down session keeps its renderer; the map pane must not.
        let grid = match self.session.state() {
            SessionState::Unloaded => None,
            _ => self.session.renderer().grid().cloned(),
        };
        let viewport = self.viewport;
        let input = self.input.clone();
        let input_active = self.input_active;
        let logs = self.logs.clone();
        let last_info = self.last_info.clone();
        let last_error = self.last_error.clone();

        self.terminal.draw(|frame| {
            render_header(frame, chunks[0], &header);
            render_map(frame, map_area, grid.as_ref(), viewport);
            if let Some(log_area) = log_area {
                render_logs(frame, log_area, &logs);
            }
            render_input(frame, chunks[2], &input, input_active);
            render_footer(frame, chunks[3], last_error.as_deref(), last_info.as_deref());
        })?;

        Ok(())
    }

    fn header_line(&self) -> String {
        let connection = if self.connected {
            self.client.base_url().to_string()
        } else {
            "offline".to_string()
        };
        format!(
            "pcec console  {}  session {}  [{}]",
            connection,
            self.session.id(),
            self.session.state()
        )
    }
}

impl Drop for ConsoleApp {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Splits the input line into validated source and target ids.
fn parse_endpoints(input: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        bail!("Expected '<source> <target>', got '{}'", input.trim());
    }
    validate_node_id(parts[0]).context("Invalid source node id")?;
    validate_node_id(parts[1]).context("Invalid target node id")?;
    Ok((parts[0].to_string(), parts[1].to_string()))
}

fn render_header(frame: &mut Frame, area: Rect, header: &str) {
    let widget = Paragraph::new(header.to_string())
        .style(Theme::header())
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Theme::border()),
        );
    frame.render_widget(widget, area);
}

fn render_map(frame: &mut Frame, area: Rect, grid: Option<&RenderGrid>, viewport: Viewport) {
    frame.render_widget(topology_map(grid).viewport(viewport), area);
}

fn render_logs(frame: &mut Frame, area: Rect, logs: &[LogRecord]) {
    let block = Block::bordered()
        .title(" Logs ")
        .border_style(Theme::border());

    if logs.is_empty() {
        let empty = Paragraph::new("No log records yet")
            .style(Theme::dimmed())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|record| {
            let time = record
                .timestamp()
                .map(|t| {
                    t.with_timezone(&chrono::Local)
                        .format("%H:%M:%S")
                        .to_string()
                })
                .unwrap_or_else(|| "--:--:--".to_string());
            ListItem::new(Line::from(vec![
                Span::styled(time, Theme::dimmed()),
                Span::raw(" "),
                Span::styled(record.level.clone(), Theme::log_level(&record.level)),
                Span::raw(" "),
                Span::raw(record.message.clone()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_input(frame: &mut Frame, area: Rect, input: &str, active: bool) {
    let (title, title_style) = if active {
        (" Path request (<source> <target>) ", Theme::header())
    } else {
        (" Path request: press p ", Theme::dimmed())
    };

    let text = if active {
        format!("> {input}█")
    } else {
        String::new()
    };

    let widget = Paragraph::new(text).block(
        Block::bordered()
            .title(title)
            .title_style(title_style)
            .border_style(Theme::border()),
    );
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, area: Rect, error: Option<&str>, info: Option<&str>) {
    let line = if let Some(error) = error {
        Line::from(Span::styled(
            format!("Error: {error}"),
            Theme::log_level("ERROR"),
        ))
    } else if let Some(info) = info {
        Line::from(Span::styled(info.to_string(), Theme::log_level("INFO")))
    } else {
        Line::from(vec![
            Span::styled("q", Theme::header()),
            Span::raw(" quit  "),
            Span::styled("p", Theme::header()),
            Span::raw(" path  "),
            Span::styled("c", Theme::header()),
            Span::raw(" clear  "),
            Span::styled("l", Theme::header()),
            Span::raw(" logs  "),
            Span::styled("r", Theme::header()),
            Span::raw(" reload  "),
            Span::styled("arrows", Theme::header()),
            Span::raw(" scroll"),
        ])
    };

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    frame.render_widget(footer, area);
}
