//! Terminal host for the sort/filter engine.
//!
//! The header row is the set of sortable column headers. Wide terminals
//! show the desktop search field above the table, narrow ones the mobile
//! field below it; both stay mirrored.

use crate::config::config::Config;
use crate::controller::TableController;
use crate::data::table::Table;
use crate::input::surfaces::Surface;
use crate::logging::LogRingBuffer;
use crate::ui::search_input::{SearchInput, SearchInputAction};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table as TableWidget},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const LOG_PANE_HEIGHT: u16 = 10;

pub struct App {
    controller: TableController,
    desktop_input: SearchInput,
    mobile_input: SearchInput,
    selected_column: usize,
    scroll: usize,
    narrow_width: u16,
    narrow: bool,
    show_logs: bool,
    log_buffer: Option<LogRingBuffer>,
    should_quit: bool,
}

impl App {
    pub fn new(table: Table, config: &Config, log_buffer: Option<LogRingBuffer>) -> Self {
        Self {
            controller: TableController::new(table, config),
            desktop_input: SearchInput::new(Surface::Desktop),
            mobile_input: SearchInput::new(Surface::Mobile),
            selected_column: 0,
            scroll: 0,
            narrow_width: config.display.narrow_width,
            narrow: false,
            show_logs: false,
            log_buffer,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &TableController {
        &self.controller
    }

    /// Activate a column by index or header label, e.g. from the command line
    pub fn activate_named_column(&mut self, name_or_index: &str) -> Result<()> {
        let column = self
            .controller
            .table()
            .column_index(name_or_index)
            .ok_or_else(|| anyhow::anyhow!("Unknown column: {}", name_or_index))?;
        self.selected_column = column;
        self.controller.activate_column(column);
        Ok(())
    }

    /// Take over the terminal and run until the user quits
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(e) => {
                let _ = disable_raw_mode();
                return Err(anyhow::anyhow!("Failed to create terminal: {}", e));
            }
        };

        let res = self.run_app(&mut terminal);

        // Always restore terminal, even on error
        let _ = disable_raw_mode();
        let _ = execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = terminal.show_cursor();

        res
    }

    fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!(target: "system", "Starting table view with {} rows", self.controller.table().row_count());

        while !self.should_quit {
            let now = Instant::now();
            self.controller.tick(now);
            self.sync_inputs();
            terminal.draw(|f| self.ui(f))?;

            // Wake up in time for a pending debounced filter pass
            let timeout = self
                .controller
                .surfaces()
                .time_until_settled(now)
                .map_or(POLL_INTERVAL, |remaining| remaining.min(POLL_INTERVAL));

            if event::poll(timeout)? {
                match event::read()? {
                    // On Windows, filter out key release events - only handle key press
                    Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                        self.handle_key(key, Instant::now());
                    }
                    Event::Paste(text) => self.handle_paste(&text, Instant::now()),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn input_mut(&mut self, surface: Surface) -> &mut SearchInput {
        match surface {
            Surface::Desktop => &mut self.desktop_input,
            Surface::Mobile => &mut self.mobile_input,
        }
    }

    /// The search field the current layout shows
    fn visible_input(&self) -> &SearchInput {
        if self.narrow {
            &self.mobile_input
        } else {
            &self.desktop_input
        }
    }

    /// Track the terminal width. Crossing the narrow threshold moves search
    /// focus to the field that is now on screen.
    fn set_width(&mut self, width: u16) {
        let narrow = width < self.narrow_width;
        if narrow == self.narrow {
            return;
        }
        self.narrow = narrow;

        let shown = self.visible_input().surface();
        if let Some(focused) = self.controller.focused() {
            if focused != shown {
                debug!(target: "input", "Layout changed, focus moves {:?} -> {:?}", focused, shown);
                self.controller.focus(Some(shown));
            }
        }
    }

    /// Copy the controller's field values into the widgets (mirroring,
    /// paste stripping and truncation all happen in the controller)
    fn sync_inputs(&mut self) {
        let surfaces = self.controller.surfaces();
        if let Some(value) = surfaces.value(Surface::Desktop) {
            self.desktop_input.set_value(value);
        }
        if let Some(value) = surfaces.value(Surface::Mobile) {
            self.mobile_input.set_value(value);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match self.controller.focused() {
            Some(surface) => self.handle_search_key(surface, key, now),
            None => self.handle_table_key(key),
        }
    }

    fn handle_search_key(&mut self, surface: Surface, key: KeyEvent, now: Instant) {
        if let KeyCode::Char(c) = key.code {
            if !key.modifiers.contains(KeyModifiers::CONTROL) && !self.controller.keystroke(c, now)
            {
                return;
            }
        }

        match self.input_mut(surface).handle_key(key) {
            SearchInputAction::Edited(value) => {
                self.controller.edited(surface, &value, now);
                self.scroll = 0;
            }
            SearchInputAction::Confirm => {
                self.controller.confirm(now);
                self.controller.focus(None);
            }
            SearchInputAction::Cancel => self.controller.focus(None),
            SearchInputAction::PassThrough => self.should_quit = true,
            SearchInputAction::Continue => {}
        }
        self.sync_inputs();
    }

    fn handle_paste(&mut self, text: &str, now: Instant) {
        let Some(surface) = self.controller.focused() else {
            return;
        };
        let value = self.input_mut(surface).value_with_inserted(text);
        debug!(target: "input", "Paste into {:?}", surface);
        self.controller.pasted(surface, &value, now);
        self.sync_inputs();
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let columns = self.controller.table().column_count();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.clear();
                self.sync_inputs();
            }
            KeyCode::Esc => self.controller.dismiss_warning(),
            KeyCode::Char('/') => {
                if self.narrow {
                    self.controller.focus(Some(Surface::Mobile));
                } else {
                    self.controller.open_search_dropdown();
                }
            }
            KeyCode::Left => self.selected_column = self.selected_column.saturating_sub(1),
            KeyCode::Right if self.selected_column + 1 < columns => self.selected_column += 1,
            KeyCode::Enter | KeyCode::Char('s') => {
                self.controller.activate_column(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < columns {
                    self.selected_column = column;
                    self.controller.activate_column(column);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll += 1,
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(20),
            KeyCode::PageDown => self.scroll += 20,
            KeyCode::F(12) => self.show_logs = !self.show_logs,
            _ => {}
        }
    }

    fn ui(&mut self, f: &mut Frame) {
        let now = Instant::now();
        let area = f.area();
        self.set_width(area.width);

        let warning_height = u16::from(self.controller.warning(now).is_some());
        let log_height = if self.show_logs { LOG_PANE_HEIGHT } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(if self.narrow { 0 } else { 3 }),
            Constraint::Length(warning_height),
            Constraint::Min(3),
            Constraint::Length(if self.narrow { 3 } else { 0 }),
            Constraint::Length(1),
            Constraint::Length(log_height),
        ])
        .split(area);

        let input = self.visible_input();
        let focused = self.controller.focused() == Some(input.surface());
        let pending = self.controller.surfaces().is_pending();
        let input_area = if self.narrow { chunks[3] } else { chunks[0] };
        input.render(f, input_area, focused, pending);

        self.render_warning(f, chunks[1], now);
        self.render_table(f, chunks[2]);
        self.render_status(f, chunks[4]);
        if self.show_logs {
            self.render_logs(f, chunks[5]);
        }
    }

    fn render_warning(&self, f: &mut Frame, area: Rect, now: Instant) {
        if let Some(warning) = self.controller.warning(now) {
            // Message is a plain span, never interpreted
            let line = Line::from(vec![
                Span::styled(" ! ", Style::default().fg(Color::Black).bg(Color::Yellow)),
                Span::styled(
                    format!(" {} ", warning.message()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("[Esc]", Style::default().fg(Color::DarkGray)),
            ]);
            f.render_widget(Paragraph::new(line), area);
        }
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect) {
        let table = self.controller.table();
        let header_cells = table.header_labels().into_iter().enumerate().map(|(idx, label)| {
            let style = if idx == self.selected_column {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Cell::from(label).style(style)
        });
        let header = Row::new(header_cells);

        let visible = table.visible_count();
        let body_height = area.height.saturating_sub(3) as usize;
        self.scroll = self.scroll.min(visible.saturating_sub(body_height.max(1)));

        let rows = table
            .visible_rows()
            .skip(self.scroll)
            .take(body_height)
            .map(|r| Row::new(r.cells().iter().map(|c| Cell::from(c.as_str()))));

        let widths = vec![Constraint::Fill(1); table.column_count().max(1)];
        let widget = TableWidget::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let table = self.controller.table();
        let sort = match table.sort_state().attributes() {
            Some([(col_key, col), (dir_key, dir)]) => format!("{}={} {}={}", col_key, col, dir_key, dir),
            None => "unsorted".to_string(),
        };
        let status = format!(
            " {}/{} rows | {} | ←/→ column  Enter sort  / search  Ctrl+L clear  F12 logs  q quit",
            table.visible_count(),
            table.row_count(),
            sort
        );
        f.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    fn render_logs(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .log_buffer
            .as_ref()
            .map(|buffer| buffer.tail(area.height.saturating_sub(2) as usize))
            .unwrap_or_default()
            .iter()
            .map(|entry| Line::from(entry.to_string()))
            .collect();
        let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Log"));
        f.render_widget(widget, area);
    }
}
