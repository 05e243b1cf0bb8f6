use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

use super::{Component, EventResult};
use crate::state::{AppState, ScreenId};

/// Top row listing every screen.
///
/// Digits jump straight to the first nine tabs; Tab and Shift+Tab cycle
/// through all of them.
pub struct TabBar;

impl TabBar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TabBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TabBar {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                match ScreenId::from_tab_index(idx) {
                    Some(screen) => {
                        state.switch_screen(screen);
                        EventResult::Handled
                    }
                    None => EventResult::NotHandled,
                }
            }
            KeyCode::Tab => {
                state.next_screen();
                EventResult::Handled
            }
            KeyCode::BackTab => {
                state.prev_screen();
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let titles: Vec<Line> = ScreenId::TABS
            .iter()
            .enumerate()
            .map(|(idx, screen)| {
                // Only the first nine have a digit shortcut
                let content = if idx < 9 {
                    format!("[{}] {}", idx + 1, screen.title())
                } else {
                    screen.title().to_string()
                };

                if *screen == state.active {
                    Line::from(Span::styled(
                        content,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(content, Style::default().fg(Color::Gray)))
                }
            })
            .collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .select(state.active.tab_index().unwrap_or(0))
            .style(Style::default())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(tabs, area);
    }
}
