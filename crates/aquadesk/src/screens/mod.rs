pub mod dashboard;
pub mod resource;

use crate::api::ApiOutcome;
use crate::components::Component;
use crate::state::{AppState, ScreenId};

/// Trait for full screen views.
///
/// The app mounts a screen when it becomes active and unmounts it when the
/// user leaves, so only the visible screen ever has requests in flight.
pub trait Screen: Component {
    fn id(&self) -> ScreenId;

    fn title(&self) -> &str {
        self.id().title()
    }

    fn on_mount(&mut self, state: &mut AppState);

    fn on_unmount(&mut self, state: &mut AppState);

    /// A worker response addressed to this screen's current mount
    fn on_response(&mut self, _outcome: ApiOutcome, _state: &mut AppState) {}

    /// True while typing into a text box, so digits and letters are not
    /// taken as global shortcuts
    fn captures_input(&self) -> bool {
        false
    }
}
