//! QA scenario catalog.
//!
//! Every scenario wires real core components to the in-memory page from
//! [`crate::harness`] and checks one behavior a visitor depends on.

use anyhow::{Context, Result, bail, ensure};
use roadmap_core::{
    CardId, Category, ClickOutcome, DrawerEvent, FocusEvent, FocusMode, PreviewEvent,
    RoadmapConfig, Resettable, ScrollLock, ScrollRegion, SearchTerm, StageId, Visibility,
};

use crate::harness::{self, Delivered, MirrorRig, Page, Rig};

pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    check: fn() -> Result<()>,
}

impl Scenario {
    const fn new(key: &'static str, description: &'static str, check: fn() -> Result<()>) -> Self {
        Self {
            key,
            description,
            check,
        }
    }

    /// # Errors
    ///
    /// Returns the first expectation the scenario found violated.
    pub fn run(&self) -> Result<()> {
        (self.check)()
    }
}

#[must_use]
pub fn catalog() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "filter-idempotence",
            "Re-applying any category/term pair leaves the visible set unchanged",
            filter_idempotence,
        ),
        Scenario::new(
            "filter-predicate",
            "Cards show only when they pass both the category and the search term",
            filter_predicate,
        ),
        Scenario::new(
            "empty-indicator",
            "Stages emptied by filtering are flagged; stages without cards never are",
            empty_indicator,
        ),
        Scenario::new(
            "focus-cycle",
            "Header clicks walk collapsed, expanded, normal and switch stages",
            focus_cycle,
        ),
        Scenario::new(
            "focus-reset",
            "External reset returns to normal once and is silent afterwards",
            focus_reset,
        ),
        Scenario::new(
            "card-preview",
            "Collapsed-mode card clicks preview first and navigate second",
            card_preview,
        ),
        Scenario::new(
            "phase-nav",
            "Navigation exits focus and highlights stages past the threshold",
            phase_nav,
        ),
        Scenario::new(
            "scroll-mirror",
            "Top scrollbar and content follow each other without a feedback loop",
            scroll_mirror,
        ),
        Scenario::new(
            "drawer-dismiss",
            "Drawers close on escape or overlay and share the page scroll lock",
            drawer_dismiss,
        ),
        Scenario::new(
            "config-defaults",
            "Built-in configuration validates and survives a JSON round trip",
            config_defaults,
        ),
    ]
}

#[must_use]
pub fn find(key: &str) -> Option<Scenario> {
    catalog().into_iter().find(|scenario| scenario.key == key)
}

#[must_use]
pub fn list() -> Vec<(&'static str, &'static str)> {
    catalog()
        .iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

fn filter_idempotence() -> Result<()> {
    let categories = ["all", "frontend", "backend", "data", "ops"];
    let terms = ["", "re", "  EVENT ", "processing", "zzz"];
    for category in categories {
        for term in terms {
            let page = Page::default();
            let mut engine = harness::sample_engine();
            engine.select_category(Category::parse(category));
            engine.set_term(SearchTerm::new(term));

            let first = engine.apply(&harness::filter_surface(&page));
            let hidden = page.borrow().hidden_cards.clone();
            let second = engine.apply(&harness::filter_surface(&page));

            ensure!(
                first == second && hidden == page.borrow().hidden_cards,
                "category {category:?} term {term:?} changed on re-apply"
            );
        }
    }
    Ok(())
}

fn filter_predicate() -> Result<()> {
    let page = Page::default();
    let mut engine = harness::sample_engine();
    let react = CardId(0);

    engine.select_category(Category::parse("frontend"));
    engine.apply(&harness::filter_surface(&page));
    ensure!(
        !page.borrow().hidden_cards.contains(&react),
        "React hidden under frontend"
    );

    engine.select_category(Category::parse("backend"));
    engine.apply(&harness::filter_surface(&page));
    ensure!(
        page.borrow().hidden_cards.contains(&react),
        "React shown under backend"
    );

    engine.select_category(Category::All);
    engine.set_term(SearchTerm::new("STREAM"));
    let summary = engine.apply(&harness::filter_surface(&page));
    ensure!(
        summary.visible == 1 && !page.borrow().hidden_cards.contains(&CardId(5)),
        "description search should match only Flink, got {summary:?}"
    );

    engine.select_category(Category::parse("frontend"));
    let summary = engine.apply(&harness::filter_surface(&page));
    ensure!(
        summary.visible == 0,
        "frontend and \"stream\" share no card, got {summary:?}"
    );
    Ok(())
}

fn empty_indicator() -> Result<()> {
    let page = Page::default();
    let mut engine = harness::sample_engine();

    engine.select_category(Category::parse("frontend"));
    let summary = engine.apply(&harness::filter_surface(&page));
    ensure!(
        summary.empty_stages == vec![1],
        "only the data stage should be empty, got {:?}",
        summary.empty_stages
    );

    engine.set_term(SearchTerm::new("nothing matches this"));
    engine.apply(&harness::filter_surface(&page));
    ensure!(
        !page.borrow().empty_stages.contains(&2),
        "a stage without cards was flagged empty"
    );

    engine.select_category(Category::All);
    engine.set_term(SearchTerm::new(""));
    engine.apply(&harness::filter_surface(&page));
    ensure!(
        page.borrow().empty_stages.is_empty(),
        "clearing the filters left stages flagged"
    );
    Ok(())
}

fn click_header(rig: &Rig, stage: &str) -> Result<FocusMode> {
    rig.focus
        .borrow_mut()
        .handle(FocusEvent::HeaderClicked(StageId::from(stage)))
        .map(|change| change.mode)
        .with_context(|| format!("header click on {stage} changed nothing"))
}

fn focus_cycle() -> Result<()> {
    let rig = Rig::new(0.5);
    let mut modes = Vec::new();
    for stage in ["foundations", "foundations", "foundations", "data"] {
        modes.push(click_header(&rig, stage)?);
    }
    ensure!(
        modes
            == [
                FocusMode::Collapsed,
                FocusMode::Expanded,
                FocusMode::Normal,
                FocusMode::Collapsed
            ],
        "unexpected mode sequence {modes:?}"
    );

    let page = rig.page.borrow();
    ensure!(
        page.focused_stage == Some(StageId::from("data")),
        "data stage should hold focus, found {:?}",
        page.focused_stage
    );
    ensure!(
        page.layout_signals == 4,
        "each transition should announce layout once, saw {}",
        page.layout_signals
    );
    Ok(())
}

fn focus_reset() -> Result<()> {
    let rig = Rig::new(0.5);
    click_header(&rig, "foundations")?;
    click_header(&rig, "foundations")?;

    ensure!(rig.focus.reset(), "reset from expanded changed nothing");
    let signals = {
        let page = rig.page.borrow();
        ensure!(
            page.focus_mode == FocusMode::Normal && page.focused_stage.is_none(),
            "reset left {:?} on {:?}",
            page.focus_mode,
            page.focused_stage
        );
        page.layout_signals
    };

    ensure!(!rig.focus.reset(), "second reset reported a change");
    ensure!(
        rig.page.borrow().layout_signals == signals,
        "second reset announced layout again"
    );
    Ok(())
}

fn click_card(rig: &Rig, card: usize) -> ClickOutcome {
    rig.preview
        .borrow_mut()
        .handle(PreviewEvent::CardClicked(CardId(card)))
}

fn card_preview() -> Result<()> {
    let rig = Rig::new(0.5);
    ensure!(
        click_card(&rig, 0) == ClickOutcome::PassThrough,
        "normal mode intercepted a card click"
    );

    click_header(&rig, "foundations")?;
    ensure!(
        click_card(&rig, 0) == ClickOutcome::Suppress,
        "first collapsed click navigated"
    );
    ensure!(
        click_card(&rig, 1) == ClickOutcome::Suppress,
        "switching cards navigated"
    );
    let previewed: Vec<CardId> = rig.page.borrow().previewed.iter().copied().collect();
    ensure!(
        previewed == [CardId(1)],
        "switching should leave only the second card open, got {previewed:?}"
    );
    ensure!(
        click_card(&rig, 1) == ClickOutcome::PassThrough,
        "second click on the previewed card was suppressed"
    );

    click_card(&rig, 2);
    rig.preview.borrow_mut().handle(PreviewEvent::CollapseClicked);
    ensure!(
        rig.preview.borrow().current().is_none(),
        "collapse control left a preview"
    );

    click_card(&rig, 2);
    click_header(&rig, "foundations")?;
    ensure!(
        rig.page.borrow().previewed.is_empty(),
        "leaving collapsed mode kept a preview"
    );
    Ok(())
}

fn phase_nav() -> Result<()> {
    let mut rig = Rig::new(0.5);
    click_header(&rig, "data")?;
    let request = rig.nav.navigate(StageId::from("later"));
    ensure!(request.focus_reset, "navigation did not exit focus");
    ensure!(
        rig.page.borrow().focus_mode == FocusMode::Normal,
        "focus still active after navigation"
    );
    ensure!(
        !rig.nav.navigate(StageId::from("later")).focus_reset,
        "second navigation reported a reset"
    );

    let flags = rig.nav.observe(&[
        Visibility {
            stage: StageId::from("foundations"),
            ratio: 0.8,
        },
        Visibility {
            stage: StageId::from("data"),
            ratio: 0.3,
        },
    ]);
    let active: Vec<usize> = flags.iter().filter(|f| f.active).map(|f| f.button).collect();
    ensure!(active == [0], "expected only the first button lit, got {active:?}");

    let flags = rig.nav.observe(&[Visibility {
        stage: StageId::from("foundations"),
        ratio: 0.1,
    }]);
    ensure!(
        flags.iter().all(|f| !f.active),
        "stage scrolled away but stayed lit"
    );
    Ok(())
}

fn scroll_mirror() -> Result<()> {
    let rig = MirrorRig::new(2400.0);
    rig.mirror.sync_width();
    ensure!(
        (rig.bar.strip_width() - 2400.0).abs() < f64::EPSILON,
        "bar strip not sized to the content"
    );

    for (source, target, offset) in [
        (&rig.content, &rig.bar, 640.0),
        (&rig.bar, &rig.content, 90.0),
    ] {
        source.set_scroll_left(offset);
        let Some(delivered) = rig.settle(16) else {
            bail!("scroll events kept firing after moving to {offset}");
        };
        ensure!(
            delivered == Delivered { bar: 1, content: 1 },
            "each region should see one scroll event, saw {delivered:?}"
        );
        ensure!(
            (target.left() - offset).abs() < f64::EPSILON,
            "mirror landed at {} instead of {offset}",
            target.left()
        );
    }
    Ok(())
}

fn drawer_dismiss() -> Result<()> {
    let page = Page::default();
    let lock = ScrollLock::new();
    let mut about = harness::drawer(&page, "about", lock.clone());
    let mut poc = harness::drawer(&page, "poc", lock.clone());

    ensure!(
        !about.handle(DrawerEvent::EscapePressed),
        "escape on a closed drawer changed state"
    );

    about.handle(DrawerEvent::OpenClicked);
    ensure!(page.borrow().scroll_locked, "opening did not lock the page");
    about.handle(DrawerEvent::EscapePressed);
    ensure!(!about.is_open(), "escape left the drawer open");

    about.handle(DrawerEvent::OpenClicked);
    about.handle(DrawerEvent::OverlayClicked);
    ensure!(!about.is_open(), "overlay click left the drawer open");
    ensure!(!page.borrow().scroll_locked, "page stayed locked");

    about.handle(DrawerEvent::OpenClicked);
    poc.handle(DrawerEvent::OpenClicked);
    about.handle(DrawerEvent::CloseClicked);
    ensure!(
        page.borrow().scroll_locked,
        "closing one of two drawers unlocked the page"
    );
    poc.handle(DrawerEvent::EscapePressed);
    ensure!(
        !page.borrow().scroll_locked && page.borrow().open_drawers.is_empty(),
        "page not restored after both drawers closed"
    );
    Ok(())
}

fn config_defaults() -> Result<()> {
    let config = RoadmapConfig::default();
    config.validate().context("default configuration rejected")?;
    let text = serde_json::to_string(&config)?;
    let parsed = RoadmapConfig::from_json(&text)?;
    ensure!(parsed == config, "configuration changed across a round trip");
    ensure!(
        RoadmapConfig::from_json(r#"{"nav_threshold": 0}"#).is_err(),
        "zero threshold accepted"
    );
    Ok(())
}
