use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Component, EventResult};
use crate::state::{AppState, ScreenId};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn get_help_text(state: &AppState) -> &'static str {
        match state.active {
            ScreenId::Dashboard => "1-9/Tab: switch screens | r: refresh | q: quit",
            ScreenId::Resource(kind) if kind.is_read_only() => {
                "j/k: nav | n/p: page | /: search | f: filter | s/o: sort | c: reset | r: retry | q: quit"
            }
            ScreenId::Resource(_) => {
                "j/k: nav | n/p: page | /: search | f: filter | s/o: sort | a: add | e: edit | d: delete | space: mark | D: delete marked | q: quit"
            }
            ScreenId::Directory => "q: quit",
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = if let Some(error) = &state.error_message {
            vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::raw(error.clone()),
            ]
        } else {
            vec![Span::styled(
                Self::get_help_text(state),
                Style::default().fg(Color::DarkGray),
            )]
        };

        if state.in_flight > 0 {
            spans.push(Span::styled(
                format!("  [{} request(s) pending]", state.in_flight),
                Style::default().fg(Color::Cyan),
            ));
        }

        let paragraph =
            Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
