use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use aquadesk_core::form::{Draft, FieldKind, FieldSpec, FormErrors, RuleSet};

use super::ModalResult;
use super::helpers::{HelpText, calculate_scroll, render_cursor_line, render_modal_frame};
use crate::state::FormCursor;

const MODAL_WIDTH: u16 = 70;
/// Label line plus a bordered one-line input
const FIELD_HEIGHT: u16 = 4;

/// Everything the form overlay draws
pub struct FormView<'a> {
    pub title: String,
    pub draft: &'a Draft,
    pub rules: &'a RuleSet,
    pub errors: &'a FormErrors,
    pub warning: Option<&'a str>,
    pub hint: Option<String>,
    pub submitting: bool,
    pub cursor: FormCursor,
}

impl FormView<'_> {
    /// Status lines above the fields: server error, blocking warning, hint
    fn banner_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if self.submitting {
            lines.push(Line::from(Span::styled(
                "Saving...",
                Style::default().fg(Color::Cyan),
            )));
        }
        if let Some(api) = self.errors.api() {
            lines.push(Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::raw(api.to_string()),
            ]));
        }
        if let Some(warning) = self.warning {
            lines.push(Line::from(Span::styled(
                warning.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(hint) = &self.hint {
            lines.push(Line::from(Span::styled(
                hint.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

/// Render the add/edit form
pub fn render_form_modal(frame: &mut Frame, view: &FormView<'_>) {
    let fields = view.rules.fields();
    let banner = view.banner_lines();
    let banner_height = banner.len() as u16;

    // Fields beyond the screen height scroll with the focused one
    let available = frame
        .area()
        .height
        .saturating_sub(2 + banner_height + 1 + 2 + 2);
    let fit = ((available / FIELD_HEIGHT) as usize).clamp(1, fields.len().max(1));
    let first = view.cursor.field.saturating_sub(fit - 1).min(fields.len().saturating_sub(fit));
    let shown = &fields[first..(first + fit).min(fields.len())];

    let modal_height = 2 + banner_height + 1 + shown.len() as u16 * FIELD_HEIGHT + 1 + 2;

    let mut constraints = vec![Constraint::Length(banner_height), Constraint::Length(1)];
    constraints.extend(shown.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(2));

    let border = if view.errors.api().is_some() {
        Color::Red
    } else {
        Color::Cyan
    };
    let mf = render_modal_frame(
        frame,
        &view.title,
        MODAL_WIDTH,
        modal_height,
        border,
        &constraints,
    );

    frame.render_widget(Paragraph::new(banner), mf.chunks[0]);

    for (offset, spec) in shown.iter().enumerate() {
        let idx = first + offset;
        render_field(frame, mf.chunks[offset + 2], view, spec, idx == view.cursor.field);
    }

    let help = if view.cursor.editing {
        vec![
            HelpText::new()
                .key("EDITING:", Color::Cyan, "Type to enter text")
                .key("[F10/Ctrl+S]", Color::Cyan, "Submit")
                .line(),
            HelpText::new()
                .key("[Enter]", Color::Green, "Done field")
                .key("[Esc]", Color::Yellow, "Stop editing")
                .line(),
        ]
    } else {
        vec![
            HelpText::new()
                .key("[j/k/Tab]", Color::DarkGray, "Navigate")
                .key("[Enter]", Color::Green, "Edit field")
                .key("[h/l]", Color::DarkGray, "Change option")
                .line(),
            HelpText::new()
                .key("[F10/Ctrl+S]", Color::Cyan, "Submit")
                .key("[Esc]", Color::Yellow, "Cancel")
                .line(),
        ]
    };
    let last = mf.chunks.len() - 1;
    frame.render_widget(Paragraph::new(help), mf.chunks[last]);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    view: &FormView<'_>,
    spec: &FieldSpec,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut label = vec![Span::styled(spec.label, label_style)];
    if spec.rule.required {
        label.push(Span::styled(" *", Style::default().fg(Color::DarkGray)));
    }
    if let Some(error) = view.errors.get(spec.name) {
        label.push(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(label)), chunks[0]);

    let editing = focused && view.cursor.editing;
    let border_color = match () {
        _ if view.errors.get(spec.name).is_some() => Color::Red,
        _ if editing => Color::Cyan,
        _ if focused => Color::Yellow,
        _ => Color::DarkGray,
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let input_inner = input_block.inner(chunks[1]);
    frame.render_widget(input_block, chunks[1]);

    let value = view.draft.get(spec.name);
    if editing {
        let scrolled = calculate_scroll(value, view.cursor.cursor, input_inner.width as usize);
        let line = render_cursor_line(&scrolled.display_value, scrolled.cursor_pos);
        frame.render_widget(Paragraph::new(line), input_inner);
    } else {
        let display = match spec.kind {
            FieldKind::Select if focused => format!("< {value} >"),
            _ => value.to_string(),
        };
        frame.render_widget(Paragraph::new(display), input_inner);
    }
}

fn is_submit(key: &KeyEvent) -> bool {
    matches!(
        (key.code, key.modifiers.contains(KeyModifiers::CONTROL)),
        (KeyCode::Enter, true) | (KeyCode::Char('s'), true)
    ) || key.code == KeyCode::F(10)
}

/// Handle key events for the form.
///
/// Values are never written here; an edit comes back as
/// [`ModalResult::Edited`] for the owner to apply to its draft.
pub fn handle_form_key(
    key: KeyEvent,
    cursor: &mut FormCursor,
    draft: &Draft,
    rules: &RuleSet,
) -> ModalResult {
    if is_submit(&key) {
        cursor.editing = false;
        return ModalResult::Confirmed;
    }
    let Some(spec) = rules.fields().get(cursor.field) else {
        return match key.code {
            KeyCode::Esc => ModalResult::Cancelled,
            _ => ModalResult::Continue,
        };
    };

    if cursor.editing {
        handle_editing_key(key, cursor, draft.get(spec.name), spec)
    } else {
        handle_navigation_key(key, cursor, draft.get(spec.name), spec, rules.len())
    }
}

fn accepts(kind: FieldKind, c: char) -> bool {
    match kind {
        FieldKind::Integer => c.is_ascii_digit() || c == '-',
        FieldKind::Number => c.is_ascii_digit() || c == '.' || c == '-',
        FieldKind::Text => !c.is_control(),
        FieldKind::Select => false,
    }
}

fn handle_editing_key(
    key: KeyEvent,
    cursor: &mut FormCursor,
    value: &str,
    spec: &FieldSpec,
) -> ModalResult {
    let mut chars: Vec<char> = value.chars().collect();
    cursor.cursor = cursor.cursor.min(chars.len());

    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            cursor.editing = false;
            ModalResult::Continue
        }
        KeyCode::Backspace if cursor.cursor > 0 => {
            cursor.cursor -= 1;
            chars.remove(cursor.cursor);
            edited(spec, chars)
        }
        KeyCode::Delete if cursor.cursor < chars.len() => {
            chars.remove(cursor.cursor);
            edited(spec, chars)
        }
        KeyCode::Left => {
            cursor.cursor = cursor.cursor.saturating_sub(1);
            ModalResult::Continue
        }
        KeyCode::Right => {
            cursor.cursor = (cursor.cursor + 1).min(chars.len());
            ModalResult::Continue
        }
        KeyCode::Home => {
            cursor.cursor = 0;
            ModalResult::Continue
        }
        KeyCode::End => {
            cursor.cursor = chars.len();
            ModalResult::Continue
        }
        KeyCode::Char(c) if accepts(spec.kind, c) => {
            chars.insert(cursor.cursor, c);
            cursor.cursor += 1;
            edited(spec, chars)
        }
        _ => ModalResult::Continue,
    }
}

fn edited(spec: &FieldSpec, chars: Vec<char>) -> ModalResult {
    ModalResult::Edited {
        field: spec.name,
        value: chars.into_iter().collect(),
    }
}

fn handle_navigation_key(
    key: KeyEvent,
    cursor: &mut FormCursor,
    value: &str,
    spec: &FieldSpec,
    field_count: usize,
) -> ModalResult {
    match key.code {
        KeyCode::Esc => ModalResult::Cancelled,
        KeyCode::Tab | KeyCode::Char('j') | KeyCode::Down => {
            cursor.field = (cursor.field + 1) % field_count;
            ModalResult::Continue
        }
        KeyCode::BackTab | KeyCode::Char('k') | KeyCode::Up => {
            cursor.field = (cursor.field + field_count - 1) % field_count;
            ModalResult::Continue
        }
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char(' ') | KeyCode::Char('l')
        | KeyCode::Right
            if spec.kind == FieldKind::Select =>
        {
            cycle_option(spec, value, 1)
        }
        KeyCode::Char('h') | KeyCode::Left if spec.kind == FieldKind::Select => {
            cycle_option(spec, value, -1)
        }
        KeyCode::Enter | KeyCode::Char('e') if spec.kind != FieldKind::Select => {
            cursor.editing = true;
            cursor.cursor = value.chars().count();
            ModalResult::Continue
        }
        _ => ModalResult::Continue,
    }
}

/// Step through a select's options, wrapping. An unknown value starts over
/// from the first option.
fn cycle_option(spec: &FieldSpec, value: &str, step: isize) -> ModalResult {
    if spec.options.is_empty() {
        return ModalResult::Continue;
    }
    let len = spec.options.len() as isize;
    let next = match spec.options.iter().position(|o| *o == value) {
        Some(idx) => (idx as isize + step).rem_euclid(len) as usize,
        None => 0,
    };
    ModalResult::Edited {
        field: spec.name,
        value: spec.options[next].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use aquadesk_core::form::FieldRule;

    use super::*;

    fn rules() -> RuleSet {
        RuleSet::new()
            .text("Name", "Name", FieldRule::required())
            .integer("Age", "Age", FieldRule::optional())
            .select("Status", "Status", &["Open", "Closed"], FieldRule::required())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_new_value() {
        let draft = Draft::from_pairs(&[("Name", "Al")]);
        let mut cursor = FormCursor::default();

        handle_form_key(press(KeyCode::Enter), &mut cursor, &draft, &rules());
        assert!(cursor.editing);
        assert_eq!(cursor.cursor, 2);

        let result = handle_form_key(press(KeyCode::Char('i')), &mut cursor, &draft, &rules());
        assert_eq!(
            result,
            ModalResult::Edited {
                field: "Name",
                value: "Ali".to_string()
            }
        );
        assert_eq!(cursor.cursor, 3);
    }

    #[test]
    fn test_integer_field_rejects_letters() {
        let draft = Draft::new();
        let mut cursor = FormCursor {
            field: 1,
            cursor: 0,
            editing: true,
        };
        let result = handle_form_key(press(KeyCode::Char('x')), &mut cursor, &draft, &rules());
        assert_eq!(result, ModalResult::Continue);
        let result = handle_form_key(press(KeyCode::Char('7')), &mut cursor, &draft, &rules());
        assert_eq!(
            result,
            ModalResult::Edited {
                field: "Age",
                value: "7".to_string()
            }
        );
    }

    #[test]
    fn test_select_cycles_and_wraps() {
        let draft = Draft::from_pairs(&[("Status", "Closed")]);
        let mut cursor = FormCursor {
            field: 2,
            ..FormCursor::default()
        };
        let result = handle_form_key(press(KeyCode::Char('l')), &mut cursor, &draft, &rules());
        assert_eq!(
            result,
            ModalResult::Edited {
                field: "Status",
                value: "Open".to_string()
            }
        );
        assert!(!cursor.editing);
    }

    #[test]
    fn test_navigation_wraps_and_esc_cancels() {
        let draft = Draft::new();
        let mut cursor = FormCursor::default();
        handle_form_key(press(KeyCode::BackTab), &mut cursor, &draft, &rules());
        assert_eq!(cursor.field, 2);
        handle_form_key(press(KeyCode::Tab), &mut cursor, &draft, &rules());
        assert_eq!(cursor.field, 0);
        assert_eq!(
            handle_form_key(press(KeyCode::Esc), &mut cursor, &draft, &rules()),
            ModalResult::Cancelled
        );
    }

    #[test]
    fn test_submit_from_edit_mode() {
        let draft = Draft::new();
        let mut cursor = FormCursor {
            editing: true,
            ..FormCursor::default()
        };
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_form_key(ctrl_s, &mut cursor, &draft, &rules()),
            ModalResult::Confirmed
        );
        assert!(!cursor.editing);
    }
}
