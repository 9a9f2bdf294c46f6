//! Stage focus: clicking a stage header cycles that stage through three views.
//!
//! `Normal` shows every stage. `Collapsed` isolates the focused stage in a dense
//! four-column grid with title-only cards. `Expanded` keeps the isolation but
//! renders full cards. Repeated clicks on the same header walk
//! `Normal -> Collapsed -> Expanded -> Normal`; a click on a different header
//! always lands in `Collapsed` for the new stage.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::hooks::{Clearable, ModeWatch, Resettable};
use crate::ids::StageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    #[default]
    Normal,
    Collapsed,
    Expanded,
}

impl FocusMode {
    /// Numeric form used in the page's data attributes (`0`, `1`, `2`).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Collapsed => 1,
            Self::Expanded => 2,
        }
    }

    #[must_use]
    pub const fn is_focused(self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Mode reached by clicking the header of the already focused stage.
    const fn advance(self) -> Self {
        match self {
            Self::Normal => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusEvent {
    HeaderClicked(StageId),
    Reset,
}

/// Result of one transition, handed to the surface before the layout signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusChange {
    /// Stage that lost its focus marker in this transition.
    pub released: Option<StageId>,
    pub target: Option<StageId>,
    pub mode: FocusMode,
}

/// Render side of the focus machine.
pub trait FocusSurface {
    fn apply(&self, change: &FocusChange);
    /// Tell dependent layout code to re-measure.
    fn announce_layout(&self);
}

pub struct StageFocus {
    target: Option<StageId>,
    mode: FocusMode,
    watch: ModeWatch,
    preview: Option<Rc<dyn Clearable>>,
    surface: Box<dyn FocusSurface>,
}

impl StageFocus {
    #[must_use]
    pub fn new(
        surface: Box<dyn FocusSurface>,
        watch: ModeWatch,
        preview: Option<Rc<dyn Clearable>>,
    ) -> Self {
        watch.publish(FocusMode::Normal);
        Self {
            target: None,
            mode: FocusMode::Normal,
            watch,
            preview,
            surface,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> FocusMode {
        self.mode
    }

    #[must_use]
    pub const fn target(&self) -> Option<&StageId> {
        self.target.as_ref()
    }

    /// Apply one event. Returns `None` when the event changes nothing, which
    /// only happens for a reset while already in `Normal`.
    pub fn handle(&mut self, event: FocusEvent) -> Option<FocusChange> {
        let (target, mode) = match event {
            FocusEvent::HeaderClicked(stage) => {
                if self.target.as_ref() == Some(&stage) {
                    let mode = self.mode.advance();
                    let target = mode.is_focused().then_some(stage);
                    (target, mode)
                } else {
                    (Some(stage), FocusMode::Collapsed)
                }
            }
            FocusEvent::Reset => {
                if self.mode == FocusMode::Normal {
                    return None;
                }
                (None, FocusMode::Normal)
            }
        };

        if mode != FocusMode::Collapsed
            && let Some(preview) = &self.preview
            && let Some(card) = preview.clear()
        {
            log::debug!("stage focus left collapsed mode; cleared preview of {card}");
        }

        let previous = self.target.take();
        let released = previous.filter(|prev| target.as_ref() != Some(prev));
        self.target = target.clone();
        self.mode = mode;
        self.watch.publish(mode);

        let change = FocusChange {
            released,
            target,
            mode,
        };
        self.surface.apply(&change);
        self.surface.announce_layout();
        Some(change)
    }
}

impl Resettable for RefCell<StageFocus> {
    fn reset(&self) -> bool {
        let Ok(mut focus) = self.try_borrow_mut() else {
            log::warn!("stage focus reset requested during a focus transition; ignored");
            return false;
        };
        focus.handle(FocusEvent::Reset).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::FocusProbe;
    use crate::ids::CardId;
    use std::cell::Cell;

    #[derive(Default)]
    struct Log {
        changes: RefCell<Vec<FocusChange>>,
        layout_signals: Cell<usize>,
    }

    struct Recorder(Rc<Log>);

    impl FocusSurface for Recorder {
        fn apply(&self, change: &FocusChange) {
            self.0.changes.borrow_mut().push(change.clone());
        }

        fn announce_layout(&self) {
            self.0.layout_signals.set(self.0.layout_signals.get() + 1);
        }
    }

    #[derive(Default)]
    struct CountingClear(Cell<usize>);

    impl Clearable for CountingClear {
        fn clear(&self) -> Option<CardId> {
            self.0.set(self.0.get() + 1);
            None
        }
    }

    fn machine(clear: Option<Rc<dyn Clearable>>) -> (StageFocus, Rc<Log>, ModeWatch) {
        let log = Rc::new(Log::default());
        let watch = ModeWatch::new();
        let focus = StageFocus::new(Box::new(Recorder(log.clone())), watch.clone(), clear);
        (focus, log, watch)
    }

    fn click(stage: &str) -> FocusEvent {
        FocusEvent::HeaderClicked(StageId::from(stage))
    }

    #[test]
    fn same_header_cycles_through_all_three_modes() {
        let (mut focus, _, _) = machine(None);
        let modes: Vec<FocusMode> = (0..4)
            .map(|_| focus.handle(click("a")).expect("header click").mode)
            .collect();
        assert_eq!(
            modes,
            vec![
                FocusMode::Collapsed,
                FocusMode::Expanded,
                FocusMode::Normal,
                FocusMode::Collapsed
            ]
        );
    }

    #[test]
    fn entering_normal_clears_the_target() {
        let (mut focus, _, _) = machine(None);
        focus.handle(click("a"));
        focus.handle(click("a"));
        let change = focus.handle(click("a")).expect("third click");
        assert_eq!(change.released, Some(StageId::from("a")));
        assert_eq!(change.target, None);
        assert!(focus.target().is_none());
    }

    #[test]
    fn different_header_from_expanded_goes_to_collapsed() {
        let (mut focus, _, _) = machine(None);
        focus.handle(click("a"));
        focus.handle(click("a"));
        assert_eq!(focus.mode(), FocusMode::Expanded);

        let change = focus.handle(click("b")).expect("switch stage");
        assert_eq!(change.mode, FocusMode::Collapsed);
        assert_eq!(change.released, Some(StageId::from("a")));
        assert_eq!(change.target, Some(StageId::from("b")));
    }

    #[test]
    fn advancing_within_a_stage_releases_nothing() {
        let (mut focus, _, _) = machine(None);
        focus.handle(click("a"));
        let change = focus.handle(click("a")).expect("second click");
        assert_eq!(change.released, None);
        assert_eq!(change.target, Some(StageId::from("a")));
    }

    #[test]
    fn preview_is_cleared_whenever_mode_is_not_collapsed() {
        let clear = Rc::new(CountingClear::default());
        let (mut focus, _, _) = machine(Some(clear.clone()));

        focus.handle(click("a"));
        assert_eq!(clear.0.get(), 0, "entering collapsed keeps the preview");
        focus.handle(click("a"));
        assert_eq!(clear.0.get(), 1, "expanded clears");
        focus.handle(click("a"));
        assert_eq!(clear.0.get(), 2, "normal clears");
        focus.handle(click("b"));
        assert_eq!(clear.0.get(), 2);
    }

    #[test]
    fn reset_in_normal_is_silent() {
        let (mut focus, log, _) = machine(None);
        assert!(focus.handle(FocusEvent::Reset).is_none());
        assert_eq!(log.layout_signals.get(), 0);
        assert!(log.changes.borrow().is_empty());
    }

    #[test]
    fn every_transition_announces_layout_once() {
        let (mut focus, log, _) = machine(None);
        focus.handle(click("a"));
        focus.handle(click("b"));
        focus.handle(FocusEvent::Reset);
        focus.handle(FocusEvent::Reset);
        assert_eq!(log.layout_signals.get(), 3);
        assert_eq!(log.changes.borrow().len(), 3);
    }

    #[test]
    fn watch_tracks_current_mode() {
        let (mut focus, _, watch) = machine(None);
        focus.handle(click("a"));
        assert!(watch.is_collapsed());
        focus.handle(click("a"));
        assert_eq!(watch.get(), FocusMode::Expanded);
        assert!(!watch.is_collapsed());
    }

    #[test]
    fn resettable_wrapper_reports_whether_anything_changed() {
        let (focus, log, _) = machine(None);
        let focus = RefCell::new(focus);
        assert!(!focus.reset());

        focus.borrow_mut().handle(click("a"));
        assert!(focus.reset());
        assert_eq!(focus.borrow().mode(), FocusMode::Normal);
        assert!(!focus.reset());
        assert_eq!(log.layout_signals.get(), 2);
    }

    #[test]
    fn mode_index_matches_page_encoding() {
        assert_eq!(FocusMode::Normal.index(), 0);
        assert_eq!(FocusMode::Collapsed.index(), 1);
        assert_eq!(FocusMode::Expanded.index(), 2);
    }
}
