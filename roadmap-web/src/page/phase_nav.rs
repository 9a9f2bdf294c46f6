use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use roadmap_core::{
    PhaseNav, Resettable, RoadmapConfig, ScrollRequest, StageFocus, StageId, Visibility,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};

use super::Layout;
use crate::dom;

/// Smooth-scroll `scroll` so `target` sits at its leading edge, measured one
/// frame after the request so a focus reset has been laid out.
async fn scroll_after_layout(request: ScrollRequest, target: Element, scroll: Element) {
    if let Err(err) = dom::next_frame().await {
        log::warn!(
            "frame deferral failed, measuring immediately: {}",
            dom::js_error_message(&err)
        );
    }
    let delta = request.delta(
        target.get_bounding_client_rect().left(),
        scroll.get_bounding_client_rect().left(),
    );
    let options = ScrollToOptions::new();
    options.set_left(delta);
    options.set_behavior(ScrollBehavior::Smooth);
    scroll.scroll_by_with_scroll_to_options(&options);
    log::debug!("scrolled {delta}px to {}", request.target);
}

fn observe_stages(
    stages: &[(StageId, Element)],
    scroll: &Element,
    config: &RoadmapConfig,
    nav: Rc<RefCell<PhaseNav>>,
    buttons: Rc<Vec<Element>>,
) -> Result<(), JsValue> {
    let active_class = config.classes.nav_active.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let batch: Vec<Visibility> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| Visibility {
                    stage: StageId::new(entry.target().id()),
                    ratio: entry.intersection_ratio(),
                })
                .collect();
            for flag in nav.borrow_mut().observe(&batch) {
                if let Some(button) = buttons.get(flag.button) {
                    dom::toggle_class(button, &active_class, flag.active);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_root(Some(scroll.as_ref()));
    init.set_threshold(&JsValue::from_f64(config.nav_threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    // Synthetic ids never match an intersection target's id, so only stages
    // named in the markup are watched.
    for (_, stage) in stages.iter().filter(|(_, el)| !el.id().is_empty()) {
        observer.observe(stage);
    }
    Ok(())
}

/// Wire nav button clicks and the visible-stage highlight.
pub(super) fn bind(
    doc: &Document,
    root: &Element,
    config: &RoadmapConfig,
    layout: &Layout,
    focus: Option<Rc<RefCell<StageFocus>>>,
) -> bool {
    let buttons = dom::query_all(root, &config.selectors.nav_button);
    let scroll = dom::query(doc, &config.selectors.scroll);
    if buttons.is_empty() && scroll.is_none() {
        return false;
    }

    let targets = buttons
        .iter()
        .map(|btn| {
            btn.get_attribute("data-target")
                .filter(|t| !t.is_empty())
                .map(StageId::new)
        })
        .collect();
    let focus: Option<Rc<dyn Resettable>> = focus.map(|f| f as Rc<dyn Resettable>);
    let nav = Rc::new(RefCell::new(PhaseNav::new(
        targets,
        config.nav_threshold,
        focus,
    )));
    let buttons = Rc::new(buttons);

    for (idx, button) in buttons.iter().enumerate() {
        let nav = nav.clone();
        let doc = doc.clone();
        let scroll = scroll.clone();
        let result = dom::listen(button, "click", move |_: Event| {
            let Some(target_id) = nav.borrow().button_target(idx).cloned() else {
                return;
            };
            let (Some(target), Some(scroll)) =
                (doc.get_element_by_id(target_id.as_str()), scroll.clone())
            else {
                return;
            };
            let request = nav.borrow().navigate(target_id);
            wasm_bindgen_futures::spawn_local(scroll_after_layout(request, target, scroll));
        });
        if let Err(err) = result {
            dom::console_error(&format!("nav listener: {}", dom::js_error_message(&err)));
        }
    }

    if let Some(scroll) = &scroll
        && layout.stages.iter().any(|(_, stage)| !stage.id().is_empty())
        && let Err(err) = observe_stages(&layout.stages, scroll, config, nav, buttons)
    {
        dom::console_error(&format!(
            "stage visibility observer: {}",
            dom::js_error_message(&err)
        ));
    }
    true
}
