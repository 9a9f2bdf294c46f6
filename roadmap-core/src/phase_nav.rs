//! Phase navigation: jump buttons plus the visible-stage highlight.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::hooks::Resettable;
use crate::ids::StageId;

/// One intersection notification for a stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibility {
    pub stage: StageId,
    /// Fraction of the stage's box inside the scroller, `0.0..=1.0`.
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavHighlight {
    pub button: usize,
    pub active: bool,
}

/// A scroll the binding layer should perform once layout has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: StageId,
    /// Whether stage focus was reset first, forcing a relayout.
    pub focus_reset: bool,
}

impl ScrollRequest {
    /// Horizontal distance that aligns the target's leading edge with the
    /// scroller's leading edge. Both edges come from bounding rects.
    #[must_use]
    pub fn delta(&self, target_left: f64, container_left: f64) -> f64 {
        target_left - container_left
    }
}

pub struct PhaseNav {
    buttons: Vec<Option<StageId>>,
    visible: BTreeSet<StageId>,
    threshold: f64,
    focus: Option<Rc<dyn Resettable>>,
}

impl PhaseNav {
    /// `buttons` holds each nav button's target in document order; buttons
    /// without a target never light up.
    #[must_use]
    pub fn new(
        buttons: Vec<Option<StageId>>,
        threshold: f64,
        focus: Option<Rc<dyn Resettable>>,
    ) -> Self {
        Self {
            buttons,
            visible: BTreeSet::new(),
            threshold,
            focus,
        }
    }

    #[must_use]
    pub fn button_target(&self, button: usize) -> Option<&StageId> {
        self.buttons.get(button).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_visible(&self, stage: &StageId) -> bool {
        self.visible.contains(stage)
    }

    /// Begin navigating to `target`: exits focus mode before anything is
    /// measured.
    pub fn navigate(&self, target: StageId) -> ScrollRequest {
        let focus_reset = self.focus.as_ref().is_some_and(|focus| focus.reset());
        if focus_reset {
            log::debug!("focus reset before navigating to {target}");
        }
        ScrollRequest {
            target,
            focus_reset,
        }
    }

    /// Fold a batch of intersection entries into the visible set and return
    /// the resulting flag for every button.
    ///
    /// Entries only ever set membership, so repeats and reordering within a
    /// stage's own history converge on its latest ratio.
    pub fn observe(&mut self, entries: &[Visibility]) -> Vec<NavHighlight> {
        for entry in entries {
            if entry.ratio >= self.threshold {
                self.visible.insert(entry.stage.clone());
            } else {
                self.visible.remove(&entry.stage);
            }
        }
        self.highlights()
    }

    #[must_use]
    pub fn highlights(&self) -> Vec<NavHighlight> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(button, target)| NavHighlight {
                button,
                active: target.as_ref().is_some_and(|t| self.visible.contains(t)),
            })
            .collect()
    }
}
