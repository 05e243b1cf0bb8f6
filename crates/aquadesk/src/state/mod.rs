//! UI-independent application state.

mod app_state;
mod directory;
mod modal_session;
mod mounts;
mod resource_state;

pub use app_state::AppState;
pub use directory::Directory;
pub use modal_session::{Focus, FocusCell, ModalSession};
pub use mounts::{MountRegistry, ScreenId, ScreenToken};
pub use resource_state::{
    DataSource, FormCursor, LoadStatus, Notice, ResourceModal, ResourceState, ScreenResource,
    count_noun,
};
