//! Narrow capabilities the components hand to each other at construction time.
//!
//! Phase navigation only needs to reset stage focus, stage focus only needs to
//! clear the card preview, and the card preview only needs to know whether the
//! collapsed focus mode is active. None of them see each other's internals.

use std::cell::Cell;
use std::rc::Rc;

use crate::focus::FocusMode;
use crate::ids::CardId;

/// Something that can be forced back to its resting state.
pub trait Resettable {
    /// Returns `true` when the call changed anything.
    fn reset(&self) -> bool;
}

/// Something holding a transient selection that can be dropped on request.
pub trait Clearable {
    /// Returns the item that was cleared, if any.
    fn clear(&self) -> Option<CardId>;
}

/// Read-only view of the stage focus mode.
pub trait FocusProbe {
    fn is_collapsed(&self) -> bool;
}

/// Shared cell through which the focus machine publishes its current mode.
#[derive(Debug, Clone, Default)]
pub struct ModeWatch(Rc<Cell<FocusMode>>);

impl ModeWatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self) -> FocusMode {
        self.0.get()
    }

    pub(crate) fn publish(&self, mode: FocusMode) {
        self.0.set(mode);
    }
}

impl FocusProbe for ModeWatch {
    fn is_collapsed(&self) -> bool {
        self.get() == FocusMode::Collapsed
    }
}
