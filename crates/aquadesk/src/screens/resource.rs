//! Generic list screen shared by every resource tab.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use aquadesk_core::Record;
use aquadesk_core::form::FormMode;

use super::Screen;
use crate::api::ApiOutcome;
use crate::components::{Component, EventResult};
use crate::modals::{
    FormView, ModalResult, handle_confirm_key, handle_form_key, render_confirm_modal,
    render_form_modal,
};
use crate::state::{
    AppState, DataSource, Focus, LoadStatus, ResourceModal, ResourceState, ScreenId,
    ScreenResource,
};

const CHECKBOX_WIDTH: u16 = 3;

pub struct ResourceScreen<R: ScreenResource> {
    resource: ResourceState<R>,
    table: TableState,
}

impl<R: ScreenResource> ResourceScreen<R> {
    pub fn new(source: DataSource, page_size: Option<usize>) -> Self {
        Self {
            resource: ResourceState::new(source, page_size),
            table: TableState::default(),
        }
    }

    pub fn resource(&self) -> &ResourceState<R> {
        &self.resource
    }

    // ========== Input ==========

    fn handle_modal_key(&mut self, key: KeyEvent, state: &mut AppState) {
        if self.resource.form().is_submitting() {
            // Nothing to do until the server answers
            return;
        }

        let result = if let Some((cursor, draft, rules)) = self.resource.form_parts() {
            handle_form_key(key, cursor, draft, rules)
        } else {
            handle_confirm_key(key)
        };

        let is_form = matches!(self.resource.modal(), Some(ResourceModal::Form(_)));
        match result {
            ModalResult::Confirmed if is_form => self.resource.submit(state),
            ModalResult::Confirmed => self.resource.confirm_delete(state),
            ModalResult::Cancelled => self.resource.dismiss_modal(),
            ModalResult::Edited { field, value } => self.resource.set_field(field, value),
            ModalResult::Continue => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Down => self.resource.focus_table(),
            KeyCode::Backspace => self.resource.pop_search_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.resource.push_search_char(c)
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.resource.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.resource.move_cursor(-1),
            KeyCode::Char('n') | KeyCode::PageDown => self.resource.next_page(),
            KeyCode::Char('p') | KeyCode::PageUp => self.resource.prev_page(),
            KeyCode::Char('/') => self.resource.focus_search(),
            KeyCode::Char('f') => self.resource.cycle_category(),
            KeyCode::Char('s') => self.resource.cycle_sort_key(),
            KeyCode::Char('o') => self.resource.toggle_sort_direction(),
            KeyCode::Char('c') => self.resource.reset_view(),
            KeyCode::Char(' ') => self.resource.toggle_current_selection(),
            KeyCode::Char('x') => self.resource.toggle_page_selection(),
            KeyCode::Char('a') => self.resource.open_add(),
            KeyCode::Char('e') | KeyCode::Enter => self.resource.open_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.resource.request_delete_current(),
            KeyCode::Char('D') => self.resource.request_delete_selected(),
            KeyCode::Char('r') => self.resource.reload(state),
            KeyCode::Esc if self.resource.notice().is_some() => self.resource.clear_notice(),
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    // ========== Rendering ==========

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let list = self.resource.list();
        let searching = self.resource.focus() == Focus::Search;
        let label = Style::default().fg(Color::DarkGray);

        let search_style = if searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::styled("Search: ", label),
            Span::styled(
                format!("{}{}", list.search(), if searching { "_" } else { "" }),
                search_style,
            ),
        ];

        if list.config().filter_field.is_some() {
            spans.push(Span::styled("   Filter: ", label));
            spans.push(Span::raw(list.category().label().to_string()));
        }

        let sort_label = list
            .config()
            .find_sort_key(list.sort_key())
            .map_or(list.sort_key(), |k| k.label);
        spans.push(Span::styled("   Sort: ", label));
        spans.push(Span::raw(format!(
            "{} {}",
            sort_label,
            list.sort_direction().arrow()
        )));

        if list.selection_len() > 0 {
            spans.push(Span::styled(
                format!("   {} marked", list.selection_len()),
                Style::default().fg(Color::Cyan),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect) {
        let line = match (self.resource.load_status(), self.resource.notice()) {
            (LoadStatus::Failed(message), _) => Line::from(vec![
                Span::styled(message.clone(), Style::default().fg(Color::Red)),
                Span::styled("  [r] Retry", Style::default().fg(Color::DarkGray)),
            ]),
            (LoadStatus::Loading, _) => Line::from(Span::styled(
                format!("Loading {}...", R::KIND.title().to_lowercase()),
                Style::default().fg(Color::Cyan),
            )),
            (_, Some(notice)) => {
                let color = if notice.is_error {
                    Color::Red
                } else {
                    Color::Green
                };
                Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
            }
            _ => Line::default(),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let list = self.resource.list();
        let view = list.view();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ({}) ", R::KIND.title(), view.total_filtered));

        if view.is_empty() {
            let message = match self.resource.load_status() {
                LoadStatus::Loading => String::new(),
                _ if list.is_empty() => format!("No {} yet", R::KIND.title().to_lowercase()),
                _ => "Nothing matches the current search and filter".to_string(),
            };
            let paragraph = Paragraph::new(Span::styled(
                message,
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let columns = R::columns();
        let mut widths = vec![Constraint::Length(CHECKBOX_WIDTH)];
        widths.extend(columns.iter().map(|c| Constraint::Length(c.width)));

        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(columns.iter().map(|c| Cell::from(c.header)))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = view
            .page_items
            .iter()
            .map(|record| {
                let mark = if list.is_selected(&record.id()) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let cells = std::iter::once(Cell::from(mark))
                    .chain(columns.iter().map(|c| Cell::from((c.cell)(record))));
                Row::new(cells.collect::<Vec<_>>())
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::REVERSED),
            );

        self.table.select(Some(self.resource.cursor()));
        frame.render_stateful_widget(table, area, &mut self.table);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let view = self.resource.list().view();
        let mut spans = vec![Span::raw(format!(
            "Page {} of {}",
            view.page,
            view.display_pages()
        ))];
        if self.resource.is_local() {
            spans.push(Span::styled(
                "   stored on this device",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if R::READ_ONLY {
            spans.push(Span::styled("   read-only", Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_modal(&self, frame: &mut Frame, state: &AppState) {
        match self.resource.modal() {
            Some(ResourceModal::Form(cursor)) => {
                let form = self.resource.form();
                let noun = R::KIND.noun();
                let title = match form.mode() {
                    FormMode::Add => format!("Add {noun}"),
                    FormMode::Edit(id) => format!("Edit {noun} {id}"),
                };
                let view = FormView {
                    title,
                    draft: form.draft(),
                    rules: self.resource.rules(),
                    errors: form.errors(),
                    warning: form.warning(),
                    hint: self.resource.form_hint(&state.directory),
                    submitting: form.is_submitting(),
                    cursor: *cursor,
                };
                render_form_modal(frame, &view);
            }
            Some(ResourceModal::ConfirmDelete(_)) => {
                if let Some(prompt) = self.resource.delete_prompt() {
                    render_confirm_modal(frame, "Confirm Delete", &prompt);
                }
            }
            None => {}
        }
    }
}

impl<R: ScreenResource> Component for ResourceScreen<R> {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        if self.resource.modal().is_some() {
            self.handle_modal_key(key, state);
            return EventResult::Handled;
        }
        if self.resource.focus() == Focus::Search {
            self.handle_search_key(key);
            return EventResult::Handled;
        }
        self.handle_table_key(key, state)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Search, filter, sort
                Constraint::Length(1), // Load status and notices
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Pagination
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_banner(frame, chunks[1]);
        self.render_table(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);
        self.render_modal(frame, state);
    }
}

impl<R: ScreenResource> Screen for ResourceScreen<R> {
    fn id(&self) -> ScreenId {
        ResourceState::<R>::screen()
    }

    fn on_mount(&mut self, state: &mut AppState) {
        self.resource.mount(state);
    }

    fn on_unmount(&mut self, state: &mut AppState) {
        self.resource.unmount(state);
    }

    fn on_response(&mut self, outcome: ApiOutcome, state: &mut AppState) {
        self.resource.handle_response(outcome, state);
    }

    fn captures_input(&self) -> bool {
        self.resource.modal().is_some() || self.resource.focus() == Focus::Search
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use aquadesk_core::ResourceKind;
    use aquadesk_core::resources::{AuditLog, Bill};
    use serde_json::json;

    use super::*;
    use crate::api::ApiCall;
    use crate::config::AppConfig;
    use crate::platform::{MemoryStorage, Storage};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mounted_bills() -> (ResourceScreen<Bill>, AppState) {
        let mut state =
            AppState::new(AppConfig::default(), ScreenId::Resource(ResourceKind::Bills));
        let mut screen = ResourceScreen::<Bill>::new(DataSource::Remote, Some(2));
        screen.on_mount(&mut state);
        state.take_outbox();
        let bills = (1..=3)
            .map(|id| json!({"BillID": id, "Amount": 10.0 * id as f64, "Status": "Unpaid"}))
            .collect();
        screen.on_response(ApiOutcome::Listed(Ok(bills)), &mut state);
        (screen, state)
    }

    #[test]
    fn test_search_captures_letters() {
        let (mut screen, mut state) = mounted_bills();
        assert!(!screen.captures_input());

        screen.handle_key(press(KeyCode::Char('/')), &mut state);
        assert!(screen.captures_input());
        screen.handle_key(press(KeyCode::Char('q')), &mut state);
        assert_eq!(screen.resource().list().search(), "q");
        assert!(!state.exit);

        screen.handle_key(press(KeyCode::Esc), &mut state);
        assert!(!screen.captures_input());
    }

    #[test]
    fn test_unknown_keys_fall_through() {
        let (mut screen, mut state) = mounted_bills();
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('3')), &mut state),
            EventResult::NotHandled
        );
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('n')), &mut state),
            EventResult::Handled
        );
        assert_eq!(screen.resource().list().page(), 2);
    }

    #[test]
    fn test_delete_key_asks_before_requesting() {
        let (mut screen, mut state) = mounted_bills();
        screen.handle_key(press(KeyCode::Char('d')), &mut state);
        assert!(state.take_outbox().is_empty());
        assert!(screen.resource().delete_prompt().is_some());

        screen.handle_key(press(KeyCode::Char('y')), &mut state);
        let outbox = state.take_outbox();
        assert_eq!(outbox.len(), 1);
        assert!(matches!(outbox[0].call, ApiCall::Delete { .. }));
        assert!(screen.resource().modal().is_none());
    }

    #[test]
    fn test_read_only_screen_refuses_add() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let mut state =
            AppState::new(AppConfig::default(), ScreenId::Resource(ResourceKind::AuditLogs));
        let mut screen = ResourceScreen::<AuditLog>::new(
            DataSource::for_kind(ResourceKind::AuditLogs, &storage),
            None,
        );
        screen.on_mount(&mut state);
        screen.handle_key(press(KeyCode::Char('a')), &mut state);
        assert!(screen.resource().modal().is_none());
        assert_eq!(
            screen.resource().notice().map(|n| n.text.as_str()),
            Some("Audit Log is read-only")
        );
    }
}
