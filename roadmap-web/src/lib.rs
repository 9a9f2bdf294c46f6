#![forbid(unsafe_code)]
//! Technology roadmap page interactions, compiled to wasm.
//!
//! The module wires itself on load. Pages that want to pass their own
//! configuration set `data-roadmap-manual` on `<html>` and call
//! `startWithConfig(config)` instead.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod config;
pub mod console_log;
pub mod dom;
pub mod page;

use std::cell::Cell;

use wasm_bindgen::JsValue;

/// Attribute on the root element that suppresses wiring at load.
pub const MANUAL_START_ATTR: &str = "data-roadmap-manual";

thread_local! {
    static WIRED: Cell<bool> = const { Cell::new(false) };
}

/// Resolve the config and wire the page once. Later calls are ignored.
pub fn boot(explicit: Option<JsValue>) -> Option<page::Bound> {
    if WIRED.with(|wired| wired.replace(true)) {
        log::warn!("roadmap interactions already wired; ignoring repeated start");
        return None;
    }
    let doc = dom::document()?;
    let config = config::resolve(explicit, &doc);
    console_log::init(config.level_filter());
    Some(page::wire(&doc, &config))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let Some(doc) = dom::document() else {
        return;
    };
    if doc
        .document_element()
        .is_some_and(|root| root.has_attribute(MANUAL_START_ATTR))
    {
        return;
    }
    if doc.ready_state() == "loading" {
        let result = dom::listen(&doc, "DOMContentLoaded", |_: web_sys::Event| {
            boot(None);
        });
        if let Err(err) = result {
            dom::console_error(&format!(
                "could not defer roadmap start: {}",
                dom::js_error_message(&err)
            ));
        }
    } else {
        boot(None);
    }
}

/// Wire the page with an explicit configuration object. Returns which
/// components were bound, or `undefined` if the page was already wired.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config: JsValue) -> JsValue {
    boot(Some(config))
        .and_then(|bound| serde_wasm_bindgen::to_value(&bound).ok())
        .unwrap_or(JsValue::UNDEFINED)
}
