//! Overlays drawn on top of a resource screen: the add/edit form and the
//! delete confirmation.

pub mod confirm;
pub mod form;
pub mod helpers;

use ratatui::layout::Rect;

pub use confirm::{handle_confirm_key, render_confirm_modal};
pub use form::{FormView, handle_form_key, render_form_modal};

/// Result of handling a modal key event
#[derive(Debug, PartialEq, Eq)]
pub enum ModalResult {
    /// Submit the form or accept the prompt
    Confirmed,
    /// Modal was cancelled
    Cancelled,
    /// A form field has a new value for the owner to apply
    Edited { field: &'static str, value: String },
    /// Key was handled, modal still active
    Continue,
}

/// Create a centered rectangle within the given area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
