//! Text field widget for one search surface.
//!
//! Wraps `tui_input` for editing and cursor handling. Validation,
//! mirroring and debouncing live in the controller; this widget only
//! reports what the field holds after each key.

use crate::input::surfaces::Surface;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// Result of handling a key in the search field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInputAction {
    /// Key was consumed without changing the value
    Continue,
    /// Value changed
    Edited(String),
    /// User pressed Enter to apply right away
    Confirm,
    /// User pressed Esc to leave the field
    Cancel,
    /// Pass the key through to parent handler
    PassThrough,
}

pub struct SearchInput {
    input: Input,
    surface: Surface,
    title: String,
}

impl SearchInput {
    pub fn new(surface: Surface) -> Self {
        let title = match surface {
            Surface::Desktop => "Search",
            Surface::Mobile => "Search (mobile)",
        };
        Self {
            input: Input::default(),
            surface,
            title: title.to_string(),
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Replace the value, keeping the cursor at the end
    pub fn set_value(&mut self, value: &str) {
        if self.input.value() != value {
            self.input = Input::default().with_value(value.to_string());
        }
    }

    /// Value after inserting `text` at the cursor, as a paste would leave it
    pub fn value_with_inserted(&self, text: &str) -> String {
        let cursor = self.input.cursor();
        let value = self.input.value();
        let byte_idx = value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(value.len());
        let mut result = String::with_capacity(value.len() + text.len());
        result.push_str(&value[..byte_idx]);
        result.push_str(text);
        result.push_str(&value[byte_idx..]);
        result
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SearchInputAction {
        match key.code {
            KeyCode::Esc => SearchInputAction::Cancel,
            KeyCode::Enter => SearchInputAction::Confirm,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                SearchInputAction::PassThrough
            }
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() != before {
                    SearchInputAction::Edited(self.input.value().to_string())
                } else {
                    SearchInputAction::Continue
                }
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool, pending: bool) {
        let title = if pending {
            format!("{} (typing...)", self.title)
        } else {
            self.title.clone()
        };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let width = area.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(width);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(style);
        let widget = Paragraph::new(self.input.value())
            .scroll((0, scroll as u16))
            .block(block);
        f.render_widget(widget, area);

        if focused {
            let x = (self.input.visual_cursor().max(scroll) - scroll) as u16;
            f.set_cursor_position((area.x + x + 1, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_edits() {
        let mut input = SearchInput::new(Surface::Desktop);
        assert_eq!(
            input.handle_key(key(KeyCode::Char('c'))),
            SearchInputAction::Edited("c".to_string())
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Char('o'))),
            SearchInputAction::Edited("co".to_string())
        );
        assert_eq!(input.handle_key(key(KeyCode::Left)), SearchInputAction::Continue);
        assert_eq!(input.handle_key(key(KeyCode::Esc)), SearchInputAction::Cancel);
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut input = SearchInput::new(Surface::Mobile);
        input.set_value("CO");
        assert_eq!(input.value_with_inserted("2"), "CO2");
        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.value_with_inserted("ä"), "äCO");
    }
}
