//! In-memory page the scenarios drive the core components against.
//!
//! Each surface writes into a shared [`PageState`] instead of the DOM, so a
//! scenario can assert on what a visitor would see after a sequence of clicks.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use roadmap_core::{
    CardId, CardPreview, CardRecord, Clearable, Drawer, DrawerSurface, FilterEngine,
    FilterSurface, FocusChange, FocusMode, FocusSurface, ModeWatch, PhaseNav, PreviewSurface,
    Resettable, ScrollLock, ScrollMirror, ScrollRegion, Side, StageFocus, StageId,
};

#[derive(Debug, Default)]
pub struct PageState {
    pub hidden_cards: BTreeSet<CardId>,
    pub empty_stages: BTreeSet<usize>,
    pub focused_stage: Option<StageId>,
    pub focus_mode: FocusMode,
    pub layout_signals: usize,
    pub previewed: BTreeSet<CardId>,
    pub open_drawers: BTreeSet<String>,
    pub scroll_locked: bool,
}

pub type Page = Rc<RefCell<PageState>>;

/// Stages of the sample roadmap, in document order.
pub const STAGES: [&str; 3] = ["foundations", "data", "later"];

/// Cards of the sample roadmap. The last stage has none.
#[must_use]
pub fn sample_cards() -> Vec<CardRecord> {
    vec![
        CardRecord::new(Some(0), "frontend", "React", "UI library"),
        CardRecord::new(Some(0), "frontend", "Vue", "Progressive framework"),
        CardRecord::new(Some(0), "backend", "Postgres", "Relational database"),
        CardRecord::new(Some(1), "data", "Kafka", "Distributed event log"),
        CardRecord::new(Some(1), "data", "Spark", "Batch processing"),
        CardRecord::new(Some(1), "data", "Flink", "Stream processing"),
    ]
}

#[must_use]
pub fn sample_engine() -> FilterEngine {
    FilterEngine::new(STAGES.len(), sample_cards())
}

struct PageFilter(Page);

impl FilterSurface for PageFilter {
    fn set_card_hidden(&self, card: CardId, hidden: bool) {
        let mut page = self.0.borrow_mut();
        if hidden {
            page.hidden_cards.insert(card);
        } else {
            page.hidden_cards.remove(&card);
        }
    }

    fn set_stage_empty(&self, stage: usize, empty: bool) {
        let mut page = self.0.borrow_mut();
        if empty {
            page.empty_stages.insert(stage);
        } else {
            page.empty_stages.remove(&stage);
        }
    }
}

#[must_use]
pub fn filter_surface(page: &Page) -> impl FilterSurface {
    PageFilter(page.clone())
}

struct PageFocus(Page);

impl FocusSurface for PageFocus {
    fn apply(&self, change: &FocusChange) {
        let mut page = self.0.borrow_mut();
        page.focused_stage = change.target.clone();
        page.focus_mode = change.mode;
    }

    fn announce_layout(&self) {
        self.0.borrow_mut().layout_signals += 1;
    }
}

struct PagePreview(Page);

impl PreviewSurface for PagePreview {
    fn mark(&self, card: CardId, previewed: bool) {
        let mut page = self.0.borrow_mut();
        if previewed {
            page.previewed.insert(card);
        } else {
            page.previewed.remove(&card);
        }
    }
}

struct PageDrawer {
    page: Page,
    name: String,
}

impl DrawerSurface for PageDrawer {
    fn render(&self, open: bool) {
        let mut page = self.page.borrow_mut();
        if open {
            page.open_drawers.insert(self.name.clone());
        } else {
            page.open_drawers.remove(&self.name);
        }
    }

    fn lock_page_scroll(&self, locked: bool) {
        self.page.borrow_mut().scroll_locked = locked;
    }
}

/// Focus, preview and navigation wired together the way the page wires them.
pub struct Rig {
    pub page: Page,
    pub focus: Rc<RefCell<StageFocus>>,
    pub preview: Rc<RefCell<CardPreview>>,
    pub nav: PhaseNav,
}

impl Rig {
    #[must_use]
    pub fn new(nav_threshold: f64) -> Self {
        let page = Page::default();
        let watch = ModeWatch::new();
        let preview = Rc::new(RefCell::new(CardPreview::new(
            Box::new(watch.clone()),
            Box::new(PagePreview(page.clone())),
        )));
        let clear: Rc<dyn Clearable> = preview.clone();
        let focus = Rc::new(RefCell::new(StageFocus::new(
            Box::new(PageFocus(page.clone())),
            watch,
            Some(clear),
        )));
        let reset: Rc<dyn Resettable> = focus.clone();
        let buttons = STAGES.iter().map(|s| Some(StageId::from(*s))).collect();
        let nav = PhaseNav::new(buttons, nav_threshold, Some(reset));
        Self {
            page,
            focus,
            preview,
            nav,
        }
    }
}

#[must_use]
pub fn drawer(page: &Page, name: &str, lock: ScrollLock) -> Drawer {
    Drawer::new(
        name,
        lock,
        Box::new(PageDrawer {
            page: page.clone(),
            name: name.to_string(),
        }),
    )
}

/// Scroll region that queues a scroll event whenever its offset changes, the
/// way a browser does for programmatic scrolls.
pub struct Pane {
    side: Side,
    left: Cell<f64>,
    width: f64,
    strip: Cell<f64>,
    queue: Rc<RefCell<VecDeque<Side>>>,
}

impl Pane {
    #[must_use]
    pub fn left(&self) -> f64 {
        self.left.get()
    }

    #[must_use]
    pub fn strip_width(&self) -> f64 {
        self.strip.get()
    }
}

impl ScrollRegion for Pane {
    fn scroll_left(&self) -> f64 {
        self.left.get()
    }

    fn set_scroll_left(&self, offset: f64) {
        if (self.left.get() - offset).abs() > f64::EPSILON {
            self.left.set(offset);
            self.queue.borrow_mut().push_back(self.side);
        }
    }

    fn scroll_width(&self) -> f64 {
        self.width
    }

    fn set_content_width(&self, width: f64) {
        self.strip.set(width);
    }
}

pub struct MirrorRig {
    pub bar: Rc<Pane>,
    pub content: Rc<Pane>,
    pub mirror: ScrollMirror,
    queue: Rc<RefCell<VecDeque<Side>>>,
}

/// Scroll events delivered per region while settling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivered {
    pub bar: usize,
    pub content: usize,
}

impl MirrorRig {
    #[must_use]
    pub fn new(content_width: f64) -> Self {
        let queue = Rc::new(RefCell::new(VecDeque::new()));
        let pane = |side, width| {
            Rc::new(Pane {
                side,
                left: Cell::new(0.0),
                width,
                strip: Cell::new(0.0),
                queue: queue.clone(),
            })
        };
        let bar = pane(Side::Bar, 0.0);
        let content = pane(Side::Content, content_width);
        let mirror = ScrollMirror::new(bar.clone(), content.clone());
        Self {
            bar,
            content,
            mirror,
            queue,
        }
    }

    /// Deliver queued scroll events until none remain. Gives up after
    /// `budget` events so a feedback loop is reported instead of hanging.
    pub fn settle(&self, budget: usize) -> Option<Delivered> {
        let mut delivered = Delivered::default();
        for _ in 0..budget {
            let Some(side) = self.queue.borrow_mut().pop_front() else {
                return Some(delivered);
            };
            match side {
                Side::Bar => delivered.bar += 1,
                Side::Content => delivered.content += 1,
            }
            self.mirror.on_scroll(side);
        }
        self.queue.borrow().is_empty().then_some(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::{Category, FocusEvent, SearchTerm};

    #[test]
    fn filter_surface_tracks_hidden_cards() {
        let page = Page::default();
        let mut engine = sample_engine();
        engine.select_category(Category::parse("data"));
        engine.apply(&filter_surface(&page));
        assert_eq!(page.borrow().hidden_cards.len(), 3);

        engine.select_category(Category::All);
        engine.set_term(SearchTerm::new(""));
        engine.apply(&filter_surface(&page));
        assert!(page.borrow().hidden_cards.is_empty());
    }

    #[test]
    fn rig_records_focus_on_the_page() {
        let rig = Rig::new(0.5);
        rig.focus
            .borrow_mut()
            .handle(FocusEvent::HeaderClicked(StageId::from("data")));
        let page = rig.page.borrow();
        assert_eq!(page.focused_stage, Some(StageId::from("data")));
        assert_eq!(page.focus_mode, FocusMode::Collapsed);
        assert_eq!(page.layout_signals, 1);
    }

    #[test]
    fn settle_reports_empty_queue() {
        let rig = MirrorRig::new(1800.0);
        assert_eq!(rig.settle(4), Some(Delivered::default()));
    }
}
