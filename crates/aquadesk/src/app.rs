use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use serde_json::Value;

use aquadesk_core::ResourceKind;
use aquadesk_core::resources::{
    Alert, AuditLog, Bill, Complaint, Connection, Customer, Employee, QualityRecord, Reading, User,
    WaterSource,
};

use crate::api::{ApiCall, ApiOutcome, ApiResponse, Backend};
use crate::components::{Component, EventResult, status_bar::StatusBar, tab_bar::TabBar};
use crate::config::AppConfig;
use crate::platform::Storage;
use crate::screens::{Screen, dashboard::DashboardScreen, resource::ResourceScreen};
use crate::state::{AppState, DataSource, ScreenId, ScreenResource};
use crate::worker::ApiWorker;

/// How long to wait for a key before checking the worker again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    state: AppState,
    tab_bar: TabBar,
    status_bar: StatusBar,
    screens: Vec<Box<dyn Screen>>,
    worker: ApiWorker,
}

fn resource_screen<R: ScreenResource>(
    storage: &Rc<dyn Storage>,
    page_size: Option<usize>,
) -> Box<dyn Screen> {
    Box::new(ResourceScreen::<R>::new(
        DataSource::for_kind(R::KIND, storage),
        page_size,
    ))
}

impl App {
    pub fn new(
        config: AppConfig,
        backend: Arc<dyn Backend>,
        storage: Rc<dyn Storage>,
        start: ScreenId,
    ) -> Self {
        let page_size = config.page_size;
        let screens: Vec<Box<dyn Screen>> = vec![
            Box::new(DashboardScreen::new()),
            resource_screen::<User>(&storage, page_size),
            resource_screen::<Connection>(&storage, page_size),
            resource_screen::<Bill>(&storage, page_size),
            resource_screen::<Reading>(&storage, page_size),
            resource_screen::<WaterSource>(&storage, page_size),
            resource_screen::<Employee>(&storage, page_size),
            resource_screen::<Complaint>(&storage, page_size),
            resource_screen::<Alert>(&storage, page_size),
            resource_screen::<AuditLog>(&storage, page_size),
            resource_screen::<Customer>(&storage, page_size),
            resource_screen::<QualityRecord>(&storage, page_size),
        ];

        let mut state = AppState::new(config, ScreenId::Dashboard);
        state.switch_screen(start);

        Self {
            state,
            tab_bar: TabBar::new(),
            status_bar: StatusBar::new(),
            screens,
            worker: ApiWorker::new(backend),
        }
    }

    /// Mount the starting screen and ask for the users lookup
    fn start(&mut self) {
        let token = self.state.mounts.mount(ScreenId::Directory);
        self.state.request(token, ResourceKind::Users, ApiCall::List);

        let active = self.state.active;
        if let Some(idx) = self.screen_index(active) {
            self.screens[idx].on_mount(&mut self.state);
        }
        tracing::info!(screen = active.title(), "Console started");
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.start();
        while !self.state.exit {
            self.pump();
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        tracing::info!(pending = self.worker.in_flight(), "Leaving main loop");
        Ok(())
    }

    fn screen_index(&self, id: ScreenId) -> Option<usize> {
        self.screens.iter().position(|s| s.id() == id)
    }

    // ========== Worker traffic ==========

    /// Send queued requests and apply every response that has arrived
    fn pump(&mut self) {
        for request in self.state.take_outbox() {
            let kind = request.kind;
            if !self.worker.send(request) {
                tracing::error!(resource = %kind, "API worker is gone");
                self.state.set_error("Background worker stopped; restart the console");
            }
        }
        while let Some(response) = self.worker.try_recv() {
            self.route_response(response);
        }
        // Responses may have queued follow-up requests (reload after save)
        for request in self.state.take_outbox() {
            if !self.worker.send(request) {
                self.state.set_error("Background worker stopped; restart the console");
            }
        }
        self.state.in_flight = self.worker.in_flight();
    }

    fn route_response(&mut self, response: ApiResponse) {
        let ApiResponse {
            token,
            kind,
            outcome,
        } = response;
        if !self.state.mounts.is_current(&token) {
            tracing::debug!(
                screen = token.screen.title(),
                resource = %kind,
                "Dropping response for a screen that was left"
            );
            return;
        }

        match token.screen {
            ScreenId::Directory => self.apply_directory(outcome),
            screen => {
                if let Some(idx) = self.screen_index(screen) {
                    self.screens[idx].on_response(outcome, &mut self.state);
                }
            }
        }
    }

    fn apply_directory(&mut self, outcome: ApiOutcome) {
        match outcome {
            ApiOutcome::Listed(Ok(values)) => {
                let users: Vec<User> = values
                    .into_iter()
                    .filter_map(|v: Value| serde_json::from_value(v).ok())
                    .collect();
                self.state.directory.replace_users(&users);
                tracing::debug!(users = users.len(), "User directory loaded");
            }
            ApiOutcome::Listed(Err(e)) => {
                tracing::warn!(error = %e, "User directory unavailable");
            }
            other => tracing::debug!(?other, "Unexpected directory response"),
        }
    }

    // ========== Rendering ==========

    fn draw(&mut self, frame: &mut Frame) {
        // Create main layout: tab bar, content, status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.tab_bar.render(frame, chunks[0], &self.state);

        let active = self.state.active;
        if let Some(idx) = self.screen_index(active) {
            self.screens[idx].render(frame, chunks[1], &self.state);
        }

        self.status_bar.render(frame, chunks[2], &self.state);
    }

    // ========== Input ==========

    fn handle_events(&mut self) -> color_eyre::Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }
        if let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            self.handle_key_event(key_event);
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.state.exit = true;
            return;
        }

        let previous = self.state.active;
        let result = self.dispatch_key(key_event);
        if result == EventResult::Exit {
            self.state.exit = true;
        }

        if self.state.active != previous {
            self.switch_mount(previous);
        }
    }

    fn dispatch_key(&mut self, key_event: KeyEvent) -> EventResult {
        let active = self.state.active;
        let Some(idx) = self.screen_index(active) else {
            return EventResult::NotHandled;
        };

        // A screen taking text gets every key
        if self.screens[idx].captures_input() {
            return self.screens[idx].handle_key(key_event, &mut self.state);
        }

        match key_event.code {
            KeyCode::Char('q') if key_event.modifiers.is_empty() => return EventResult::Exit,
            KeyCode::Esc if self.state.error_message.is_some() => {
                self.state.clear_error();
                return EventResult::Handled;
            }
            _ => {}
        }

        let result = self.tab_bar.handle_key(key_event, &mut self.state);
        if result != EventResult::NotHandled {
            return result;
        }

        self.screens[idx].handle_key(key_event, &mut self.state)
    }

    /// Unmount the screen the user left and mount the new one
    fn switch_mount(&mut self, previous: ScreenId) {
        if let Some(idx) = self.screen_index(previous) {
            self.screens[idx].on_unmount(&mut self.state);
        }
        let active = self.state.active;
        if let Some(idx) = self.screen_index(active) {
            self.screens[idx].on_mount(&mut self.state);
        }
        tracing::debug!(from = previous.title(), to = active.title(), "Switched screen");
    }
}
