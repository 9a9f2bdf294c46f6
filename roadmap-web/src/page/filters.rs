use std::cell::RefCell;
use std::rc::Rc;

use roadmap_core::{
    CardId, CardRecord, Category, FilterEngine, FilterSurface, RoadmapConfig, SearchTerm,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use super::Layout;
use crate::dom;

struct DomFilterSurface {
    cards: Rc<Vec<Element>>,
    /// The "filtered out" indicator of each stage, when the stage has one.
    empties: Vec<Option<Element>>,
    hidden_class: String,
}

impl FilterSurface for DomFilterSurface {
    fn set_card_hidden(&self, card: CardId, hidden: bool) {
        if let Some(el) = self.cards.get(card.0) {
            dom::toggle_class(el, &self.hidden_class, hidden);
        }
    }

    fn set_stage_empty(&self, stage: usize, empty: bool) {
        let Some(Some(indicator)) = self.empties.get(stage) else {
            return;
        };
        dom::set_style(indicator, "display", Some(if empty { "flex" } else { "none" }));
        dom::set_aria_hidden(indicator, !empty);
    }
}

fn attr(el: &Element, name: &str) -> String {
    el.get_attribute(name).unwrap_or_default()
}

/// Wire the category chips and the search box. Returns which of the two
/// were found.
pub(super) fn bind(
    doc: &Document,
    root: &Element,
    config: &RoadmapConfig,
    layout: &Layout,
) -> (bool, bool) {
    let chips = dom::query_all(root, &config.selectors.chip);
    let search = doc
        .get_element_by_id(&config.selectors.search_input)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    if chips.is_empty() && search.is_none() {
        log::debug!("no chips or search box; filtering disabled");
        return (false, false);
    }

    let records = layout
        .cards
        .iter()
        .zip(&layout.card_stage)
        .map(|(card, stage)| {
            CardRecord::new(
                *stage,
                &attr(card, "data-category"),
                &attr(card, "data-name"),
                &attr(card, "data-desc"),
            )
        })
        .collect();
    let mut engine = FilterEngine::new(layout.stages.len(), records);

    // Seed the explicit state from whatever the markup starts with.
    let active_class = config.classes.chip_active.clone();
    if let Some(chip) = chips
        .iter()
        .find(|chip| chip.class_list().contains(&active_class))
    {
        engine.select_category(Category::parse(&attr(chip, "data-category")));
    }
    if let Some(input) = &search {
        engine.set_term(SearchTerm::new(&input.value()));
    }

    let engine = Rc::new(RefCell::new(engine));
    let surface = Rc::new(DomFilterSurface {
        cards: layout.cards.clone(),
        empties: layout
            .stages
            .iter()
            .map(|(_, stage)| {
                stage
                    .query_selector(&config.selectors.stage_empty)
                    .ok()
                    .flatten()
            })
            .collect(),
        hidden_class: config.classes.card_hidden.clone(),
    });

    let all_chips = Rc::new(chips);
    for chip in all_chips.iter() {
        let engine = engine.clone();
        let surface = surface.clone();
        let all_chips = all_chips.clone();
        let active_class = active_class.clone();
        let this_chip = chip.clone();
        let result = dom::listen(chip, "click", move |_: Event| {
            for other in all_chips.iter() {
                dom::toggle_class(other, &active_class, false);
            }
            dom::toggle_class(&this_chip, &active_class, true);
            let mut engine = engine.borrow_mut();
            engine.select_category(Category::parse(&attr(&this_chip, "data-category")));
            engine.apply(&*surface);
        });
        if let Err(err) = result {
            dom::console_error(&format!("chip listener: {}", dom::js_error_message(&err)));
        }
    }

    let has_search = search.is_some();
    if let Some(input) = search {
        let target = input.clone();
        let result = dom::listen(&input, "input", move |_: Event| {
            let mut engine = engine.borrow_mut();
            engine.set_term(SearchTerm::new(&target.value()));
            engine.apply(&*surface);
        });
        if let Err(err) = result {
            dom::console_error(&format!("search listener: {}", dom::js_error_message(&err)));
        }
    }

    (!all_chips.is_empty(), has_search)
}
