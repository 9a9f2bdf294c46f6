//! Binding the core components to the page markup.
//!
//! Each binder checks for the elements it needs and quietly skips itself when
//! they are missing, so a partial page still gets whatever behavior its
//! markup supports.

mod card_preview;
mod drawers;
mod filters;
mod phase_nav;
mod scroll_mirror;
mod stage_focus;

use std::rc::Rc;

use roadmap_core::{ModeWatch, RoadmapConfig, StageId};
use serde::Serialize;
use web_sys::{Document, Element};

use crate::dom;

/// Which components found enough markup to wire themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bound {
    pub chips: bool,
    pub search: bool,
    pub scroll_mirror: bool,
    pub drawers: Vec<String>,
    pub stage_focus: bool,
    pub card_preview: bool,
    pub phase_nav: bool,
}

/// Stages and cards scanned once at load; card indices are the `CardId`s.
pub(crate) struct Layout {
    pub stages: Vec<(StageId, Element)>,
    pub cards: Rc<Vec<Element>>,
    pub card_stage: Vec<Option<usize>>,
}

impl Layout {
    fn scan(root: &Element, config: &RoadmapConfig) -> Self {
        let selectors = &config.selectors;
        let stage_elements = dom::query_all(root, &selectors.stage);
        let stages: Vec<(StageId, Element)> = stage_elements
            .iter()
            .enumerate()
            .map(|(idx, el)| {
                let id = el.id();
                // Unnamed stages still focus; they just cannot be navigated to.
                let id = if id.is_empty() {
                    format!("__stage-{idx}")
                } else {
                    id
                };
                (StageId::new(id), el.clone())
            })
            .collect();

        let cards = dom::query_all(root, &selectors.card);
        let card_stage = cards
            .iter()
            .map(|card| {
                let stage = card.closest(&selectors.stage).ok().flatten()?;
                stage_elements.iter().position(|el| *el == stage)
            })
            .collect();

        Self {
            stages,
            cards: Rc::new(cards),
            card_stage,
        }
    }
}

/// Wire every component the page supports.
pub fn wire(doc: &Document, config: &RoadmapConfig) -> Bound {
    let Some(root) = doc.document_element() else {
        return Bound::default();
    };
    let layout = Layout::scan(&root, config);
    log::debug!(
        "roadmap markup: {} stages, {} cards",
        layout.stages.len(),
        layout.cards.len()
    );

    let (chips, search) = filters::bind(doc, &root, config, &layout);
    let scroll_mirror = scroll_mirror::bind(doc, config);
    let drawers = drawers::bind(doc, config);

    let watch = ModeWatch::new();
    let preview = card_preview::bind(config, &layout, watch.clone());
    let focus = stage_focus::bind(doc, config, &layout, watch, preview.clone());
    let phase_nav = phase_nav::bind(doc, &root, config, &layout, focus.clone());

    let bound = Bound {
        chips,
        search,
        scroll_mirror,
        drawers,
        stage_focus: focus.is_some(),
        card_preview: preview.is_some(),
        phase_nav,
    };
    log::info!("roadmap interactions wired: {bound:?}");
    bound
}
