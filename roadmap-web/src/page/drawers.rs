use std::cell::RefCell;
use std::rc::Rc;

use roadmap_core::{Drawer, DrawerConfig, DrawerEvent, DrawerSurface, RoadmapConfig, ScrollLock};
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::dom;

struct DomDrawer {
    panel: Element,
    overlay: Option<Element>,
    body: Option<Element>,
    active_class: String,
}

impl DrawerSurface for DomDrawer {
    fn render(&self, open: bool) {
        for el in std::iter::once(&self.panel).chain(self.overlay.as_ref()) {
            dom::toggle_class(el, &self.active_class, open);
            dom::set_aria_hidden(el, !open);
        }
    }

    fn lock_page_scroll(&self, locked: bool) {
        if let Some(body) = &self.body {
            dom::set_style(body, "overflow", locked.then_some("hidden"));
        }
    }
}

fn bind_one(doc: &Document, cfg: &DrawerConfig, lock: &ScrollLock, active_class: &str) -> bool {
    let (Some(open_button), Some(panel)) = (
        doc.get_element_by_id(&cfg.open_button),
        doc.get_element_by_id(&cfg.panel),
    ) else {
        log::debug!("drawer {} not on this page", cfg.name);
        return false;
    };
    let overlay = doc.get_element_by_id(&cfg.overlay);
    let close_button = doc.get_element_by_id(&cfg.close_button);

    let surface = DomDrawer {
        panel,
        overlay: overlay.clone(),
        body: doc.body().map(Element::from),
        active_class: active_class.to_string(),
    };
    let drawer = Rc::new(RefCell::new(Drawer::new(
        cfg.name.clone(),
        lock.clone(),
        Box::new(surface),
    )));

    let send = |event: DrawerEvent| {
        let drawer = drawer.clone();
        move |_: Event| {
            drawer.borrow_mut().handle(event);
        }
    };

    let mut results = vec![dom::listen(&open_button, "click", send(DrawerEvent::OpenClicked))];
    if let Some(close) = &close_button {
        results.push(dom::listen(close, "click", send(DrawerEvent::CloseClicked)));
    }
    if let Some(overlay) = &overlay {
        results.push(dom::listen(overlay, "click", send(DrawerEvent::OverlayClicked)));
    }
    let on_key = drawer.clone();
    results.push(dom::listen(doc, "keydown", move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            on_key.borrow_mut().handle(DrawerEvent::EscapePressed);
        }
    }));

    for err in results.into_iter().filter_map(Result::err) {
        dom::console_error(&format!(
            "drawer {} listener: {}",
            cfg.name,
            dom::js_error_message(&err)
        ));
    }
    true
}

/// Wire every configured drawer present on the page; returns their names.
pub(super) fn bind(doc: &Document, config: &RoadmapConfig) -> Vec<String> {
    let lock = ScrollLock::new();
    config
        .drawers
        .iter()
        .filter(|cfg| bind_one(doc, cfg, &lock, &config.classes.drawer_active))
        .map(|cfg| cfg.name.clone())
        .collect()
}
