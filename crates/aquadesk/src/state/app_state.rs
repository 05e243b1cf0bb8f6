use aquadesk_core::ResourceKind;

use super::directory::Directory;
use super::mounts::{MountRegistry, ScreenId, ScreenToken};
use crate::api::{ApiCall, ApiRequest};
use crate::config::AppConfig;

/// State shared by every screen and component
#[derive(Debug)]
pub struct AppState {
    pub active: ScreenId,
    pub exit: bool,
    /// Global error shown in the status bar until Esc
    pub error_message: Option<String>,
    pub config: AppConfig,
    pub directory: Directory,
    pub mounts: MountRegistry,
    /// Calls still waiting on the worker, for the status bar
    pub in_flight: usize,
    outbox: Vec<ApiRequest>,
}

impl AppState {
    pub fn new(config: AppConfig, active: ScreenId) -> Self {
        Self {
            active,
            exit: false,
            error_message: None,
            config,
            directory: Directory::new(),
            mounts: MountRegistry::new(),
            in_flight: 0,
            outbox: Vec::new(),
        }
    }

    pub fn switch_screen(&mut self, screen: ScreenId) {
        if screen.tab_index().is_some() {
            self.active = screen;
        }
    }

    pub fn next_screen(&mut self) {
        let idx = self.active.tab_index().unwrap_or(0);
        let next = (idx + 1) % ScreenId::TABS.len();
        self.active = ScreenId::TABS[next];
    }

    pub fn prev_screen(&mut self) {
        let idx = self.active.tab_index().unwrap_or(0);
        let prev = (idx + ScreenId::TABS.len() - 1) % ScreenId::TABS.len();
        self.active = ScreenId::TABS[prev];
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Queue a call for the worker
    pub fn request(&mut self, token: ScreenToken, kind: ResourceKind, call: ApiCall) {
        self.outbox.push(ApiRequest { token, kind, call });
    }

    pub fn take_outbox(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.outbox)
    }
}
