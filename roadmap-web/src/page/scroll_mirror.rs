use std::rc::Rc;

use roadmap_core::{RoadmapConfig, ScrollMirror, ScrollRegion, Side};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event};

use crate::dom;

struct DomRegion {
    el: Element,
    /// Strip whose width gives the decorative bar its scroll range.
    inner: Option<Element>,
}

impl ScrollRegion for DomRegion {
    fn scroll_left(&self) -> f64 {
        f64::from(self.el.scroll_left())
    }

    fn set_scroll_left(&self, offset: f64) {
        // Goes through the property so fractional offsets survive.
        if let Err(err) = js_sys::Reflect::set(
            &self.el,
            &JsValue::from_str("scrollLeft"),
            &JsValue::from_f64(offset),
        ) {
            log::warn!("scrollLeft update failed: {}", dom::js_error_message(&err));
        }
    }

    fn scroll_width(&self) -> f64 {
        f64::from(self.el.scroll_width())
    }

    fn set_content_width(&self, width: f64) {
        if let Some(inner) = &self.inner {
            dom::set_style(inner, "width", Some(&format!("{width}px")));
        }
    }
}

pub(super) fn bind(doc: &Document, config: &RoadmapConfig) -> bool {
    let selectors = &config.selectors;
    let (Some(wrapper), Some(inner), Some(scroll)) = (
        dom::query(doc, &selectors.top_bar_wrapper),
        dom::query(doc, &selectors.top_bar_inner),
        dom::query(doc, &selectors.scroll),
    ) else {
        log::debug!("top scrollbar markup missing; mirror disabled");
        return false;
    };

    let bar = Rc::new(DomRegion {
        el: wrapper.clone(),
        inner: Some(inner),
    });
    let content = Rc::new(DomRegion {
        el: scroll.clone(),
        inner: None,
    });
    let mirror = Rc::new(ScrollMirror::new(bar, content));
    mirror.sync_width();

    let wiring = [
        dom::window().map_or(Ok(()), |win| {
            let mirror = mirror.clone();
            dom::listen(&win, "resize", move |_: Event| mirror.sync_width())
        }),
        {
            let mirror = mirror.clone();
            dom::listen(&wrapper, "scroll", move |_: Event| {
                mirror.on_scroll(Side::Bar);
            })
        },
        dom::listen(&scroll, "scroll", move |_: Event| {
            mirror.on_scroll(Side::Content);
        }),
    ];
    for err in wiring.into_iter().filter_map(Result::err) {
        dom::console_error(&format!("scroll mirror listener: {}", dom::js_error_message(&err)));
    }
    true
}
