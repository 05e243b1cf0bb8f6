//! Rendering pieces shared by the modals.

use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;

// ========== Cursor Rendering ==========

/// A line of text with the cursor drawn as an inverted cell at `cursor_pos`
/// (a character offset).
pub fn render_cursor_line(display_value: &str, cursor_pos: usize) -> Line<'static> {
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
    let chars: Vec<char> = display_value.chars().collect();

    let mut spans = Vec::with_capacity(3);
    let before: String = chars.iter().take(cursor_pos).collect();
    if !before.is_empty() {
        spans.push(Span::raw(before));
    }
    match chars.get(cursor_pos) {
        Some(c) => {
            spans.push(Span::styled(c.to_string(), cursor_style));
            let after: String = chars.iter().skip(cursor_pos + 1).collect();
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        }
        None => spans.push(Span::styled(" ", cursor_style)),
    }
    Line::from(spans)
}

// ========== Horizontal Scroll ==========

/// Visible slice of a text input wider than its box
pub struct ScrolledView {
    pub display_value: String,
    pub cursor_pos: usize,
}

/// Window `value` to `width` characters, keeping the cursor near the middle.
pub fn calculate_scroll(value: &str, cursor_pos: usize, width: usize) -> ScrolledView {
    let chars: Vec<char> = value.chars().collect();
    // One cell is reserved for the cursor past the end
    let visible = width.saturating_sub(1).max(1);

    if chars.len() < visible {
        return ScrolledView {
            display_value: value.to_string(),
            cursor_pos,
        };
    }

    let start = cursor_pos.saturating_sub(visible / 2);
    let end = (start + visible).min(chars.len());
    let start = end.saturating_sub(visible);

    ScrolledView {
        display_value: chars[start..end].iter().collect(),
        cursor_pos: cursor_pos - start,
    }
}

// ========== Modal Frame ==========

pub struct ModalFrame {
    pub chunks: Rc<[Rect]>,
}

/// Clear a centered area, draw a titled border and split the inside
/// vertically by `constraints`.
pub fn render_modal_frame(
    frame: &mut Frame,
    title: &str,
    width: u16,
    height: u16,
    border_color: Color,
    constraints: &[Constraint],
) -> ModalFrame {
    let modal_area = centered_rect(width, height, frame.area());
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    ModalFrame { chunks }
}

// ========== Help Text Builder ==========

/// Key hints such as `[Enter] Confirm  [Esc] Cancel`.
///
/// ```ignore
/// let help = HelpText::new()
///     .key("[y]", Color::Red, "Delete")
///     .key("[n/Esc]", Color::Green, "Keep")
///     .build();
/// ```
#[derive(Default)]
pub struct HelpText {
    items: Vec<(String, Color, String)>,
}

impl HelpText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: &str, color: Color, desc: &str) -> Self {
        self.items.push((key.to_string(), color, desc.to_string()));
        self
    }

    pub fn line(self) -> Line<'static> {
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, color, desc)) in self.items.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key, Style::default().fg(color)));
            spans.push(Span::raw(format!(" {}", desc)));
        }
        Line::from(spans)
    }

    pub fn build(self) -> Paragraph<'static> {
        Paragraph::new(self.line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_scroll_short_text() {
        let result = calculate_scroll("hello", 3, 20);
        assert_eq!(result.display_value, "hello");
        assert_eq!(result.cursor_pos, 3);
    }

    #[test]
    fn test_calculate_scroll_keeps_cursor_visible() {
        let value = "Reservoir intake at the northern pumping station";
        let result = calculate_scroll(value, 40, 15);
        assert_eq!(result.display_value.chars().count(), 14);
        assert!(result.cursor_pos <= 14);
        assert_eq!(
            result.display_value.chars().nth(result.cursor_pos),
            value.chars().nth(40)
        );
    }

    #[test]
    fn test_calculate_scroll_handles_multibyte() {
        let value = "Ñuñoa pumping station, sector Ñ";
        let result = calculate_scroll(value, 2, 8);
        assert!(result.display_value.starts_with("Ñuñ"));
    }

    #[test]
    fn test_render_cursor_line_middle() {
        let line = render_cursor_line("hello", 2);
        let texts: Vec<_> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["he", "l", "lo"]);
    }

    #[test]
    fn test_render_cursor_line_end() {
        let line = render_cursor_line("hi", 2);
        let texts: Vec<_> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["hi", " "]);
    }
}
