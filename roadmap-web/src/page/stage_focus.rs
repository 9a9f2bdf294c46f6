use std::cell::RefCell;
use std::rc::Rc;

use roadmap_core::{
    Classes, Clearable, FocusChange, FocusEvent, FocusMode, FocusSurface, ModeWatch,
    RoadmapConfig, StageFocus, StageId,
};
use web_sys::{Document, Element, Event};

use super::Layout;
use crate::dom;

struct DomFocusSurface {
    stages: Vec<(StageId, Element)>,
    scroll: Element,
    roadmap: Element,
    classes: Classes,
}

impl DomFocusSurface {
    fn stage(&self, id: &StageId) -> Option<&Element> {
        self.stages
            .iter()
            .find(|(stage, _)| stage == id)
            .map(|(_, el)| el)
    }
}

impl FocusSurface for DomFocusSurface {
    fn apply(&self, change: &FocusChange) {
        let classes = &self.classes;
        if let Some(el) = change.released.as_ref().and_then(|id| self.stage(id)) {
            dom::toggle_class(el, &classes.stage_active, false);
        }
        if let Some(el) = change.target.as_ref().and_then(|id| self.stage(id)) {
            dom::toggle_class(el, &classes.stage_active, true);
        }

        let focused = change.mode.is_focused();
        dom::toggle_class(&self.scroll, &classes.stage_focused, focused);
        dom::toggle_class(&self.roadmap, &classes.stage_focused, focused);
        dom::toggle_class(
            &self.scroll,
            &classes.stage_collapsed,
            change.mode == FocusMode::Collapsed,
        );
        let _ = self
            .scroll
            .set_attribute("data-focus-mode", &change.mode.index().to_string());
    }

    fn announce_layout(&self) {
        dom::dispatch_resize();
    }
}

/// Wire stage header clicks. Returns the machine so phase navigation can
/// reset it.
pub(super) fn bind(
    doc: &Document,
    config: &RoadmapConfig,
    layout: &Layout,
    watch: ModeWatch,
    preview: Option<Rc<dyn Clearable>>,
) -> Option<Rc<RefCell<StageFocus>>> {
    let (Some(scroll), Some(roadmap)) = (
        dom::query(doc, &config.selectors.scroll),
        dom::query(doc, &config.selectors.roadmap),
    ) else {
        log::debug!("roadmap containers missing; stage focus disabled");
        return None;
    };

    let surface = DomFocusSurface {
        stages: layout.stages.clone(),
        scroll,
        roadmap,
        classes: config.classes.clone(),
    };
    let focus = Rc::new(RefCell::new(StageFocus::new(
        Box::new(surface),
        watch,
        preview,
    )));

    for (id, stage) in &layout.stages {
        for header in dom::query_all(stage, &config.selectors.stage_header) {
            let focus = focus.clone();
            let target = id.clone();
            let result = dom::listen(&header, "click", move |_: Event| {
                focus
                    .borrow_mut()
                    .handle(FocusEvent::HeaderClicked(target.clone()));
            });
            if let Err(err) = result {
                dom::console_error(&format!(
                    "stage header listener for {id}: {}",
                    dom::js_error_message(&err)
                ));
            }
        }
    }
    Some(focus)
}
