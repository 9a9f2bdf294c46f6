use std::cell::RefCell;
use std::rc::Rc;

use roadmap_core::{
    CardId, CardPreview, Clearable, ClickOutcome, ModeWatch, PreviewEvent, PreviewSurface,
    RoadmapConfig,
};
use web_sys::{Element, MouseEvent};

use super::Layout;
use crate::dom;

struct DomPreviewSurface {
    cards: Rc<Vec<Element>>,
    class: String,
}

impl PreviewSurface for DomPreviewSurface {
    fn mark(&self, card: CardId, previewed: bool) {
        if let Some(el) = self.cards.get(card.0) {
            dom::toggle_class(el, &self.class, previewed);
        }
    }
}

/// Wire card clicks and collapse controls. Returns the clear capability for
/// stage focus.
pub(super) fn bind(
    config: &RoadmapConfig,
    layout: &Layout,
    watch: ModeWatch,
) -> Option<Rc<dyn Clearable>> {
    if layout.cards.is_empty() {
        return None;
    }

    let preview = Rc::new(RefCell::new(CardPreview::new(
        Box::new(watch),
        Box::new(DomPreviewSurface {
            cards: layout.cards.clone(),
            class: config.classes.card_preview.clone(),
        }),
    )));

    for (idx, card) in layout.cards.iter().enumerate() {
        for button in dom::query_all(card, &config.selectors.collapse_button) {
            let preview = preview.clone();
            let result = dom::listen(&button, "click", move |e: MouseEvent| {
                e.prevent_default();
                e.stop_propagation();
                preview.borrow_mut().handle(PreviewEvent::CollapseClicked);
            });
            if let Err(err) = result {
                dom::console_error(&format!("collapse listener: {}", dom::js_error_message(&err)));
            }
        }

        let on_click = preview.clone();
        let result = dom::listen(card, "click", move |e: MouseEvent| {
            let outcome = on_click
                .borrow_mut()
                .handle(PreviewEvent::CardClicked(CardId(idx)));
            if outcome == ClickOutcome::Suppress {
                e.prevent_default();
            }
        });
        if let Err(err) = result {
            dom::console_error(&format!("card listener: {}", dom::js_error_message(&err)));
        }
    }

    Some(preview)
}
