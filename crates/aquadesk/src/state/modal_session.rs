//! Scoped modal sessions.
//!
//! Opening a modal moves keyboard focus into it and remembers where focus
//! was. The session restores that focus when it is dropped, so every way a
//! modal can end (submit, cancel, Escape, screen switch) hands focus back.

use std::cell::Cell;
use std::rc::Rc;

/// Which control on a list screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Search,
    Modal,
}

/// Focus shared between a screen and the modal sessions it opens
pub type FocusCell = Rc<Cell<Focus>>;

#[derive(Debug)]
pub struct ModalSession<T> {
    focus: FocusCell,
    restore_to: Focus,
    pub content: T,
}

impl<T> ModalSession<T> {
    pub fn open(focus: &FocusCell, content: T) -> Self {
        let restore_to = match focus.replace(Focus::Modal) {
            // A session replacing another keeps the original return point
            Focus::Modal => Focus::Table,
            previous => previous,
        };
        Self {
            focus: Rc::clone(focus),
            restore_to,
            content,
        }
    }

    pub fn restore_to(&self) -> Focus {
        self.restore_to
    }
}

impl<T> Drop for ModalSession<T> {
    fn drop(&mut self) {
        self.focus.set(self.restore_to);
    }
}
