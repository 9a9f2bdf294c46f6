//! Card preview accordion.
//!
//! While stage focus is collapsed, the first click on a card expands it in
//! place instead of following its link. A second click on the same card lets
//! the navigation through. Outside collapsed mode every click passes through.

use std::cell::RefCell;

use crate::hooks::{Clearable, FocusProbe};
use crate::ids::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewEvent {
    CardClicked(CardId),
    /// The collapse control inside a previewed card.
    CollapseClicked,
}

/// What the binding layer should do with the originating click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Let the browser follow the link.
    PassThrough,
    /// Cancel the default action.
    Suppress,
}

pub trait PreviewSurface {
    fn mark(&self, card: CardId, previewed: bool);
}

pub struct CardPreview {
    current: Option<CardId>,
    probe: Box<dyn FocusProbe>,
    surface: Box<dyn PreviewSurface>,
}

impl CardPreview {
    #[must_use]
    pub fn new(probe: Box<dyn FocusProbe>, surface: Box<dyn PreviewSurface>) -> Self {
        Self {
            current: None,
            probe,
            surface,
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<CardId> {
        self.current
    }

    pub fn handle(&mut self, event: PreviewEvent) -> ClickOutcome {
        match event {
            PreviewEvent::CollapseClicked => {
                self.clear();
                ClickOutcome::Suppress
            }
            PreviewEvent::CardClicked(card) => {
                if !self.probe.is_collapsed() {
                    return ClickOutcome::PassThrough;
                }
                if self.current == Some(card) {
                    // Second click confirms the navigation.
                    self.clear();
                    return ClickOutcome::PassThrough;
                }
                self.clear();
                self.current = Some(card);
                self.surface.mark(card, true);
                ClickOutcome::Suppress
            }
        }
    }

    /// Drop the previewed card, if any.
    pub fn clear(&mut self) -> Option<CardId> {
        let card = self.current.take()?;
        self.surface.mark(card, false);
        Some(card)
    }
}

impl Clearable for RefCell<CardPreview> {
    fn clear(&self) -> Option<CardId> {
        let Ok(mut preview) = self.try_borrow_mut() else {
            log::warn!("card preview clear requested while a card click is in progress; ignored");
            return None;
        };
        preview.clear()
    }
}
