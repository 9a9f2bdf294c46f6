use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the page document, if running in a browser.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Every element under `root` matching `selector`, in document order.
///
/// An invalid selector yields an empty list.
#[must_use]
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        log::warn!("invalid selector {selector:?}");
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|idx| nodes.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First element in the document matching `selector`.
#[must_use]
pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

/// Add or remove a class, ignoring DOM exceptions.
pub fn toggle_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        log::warn!("class toggle {class:?} failed: {}", js_error_message(&err));
    }
}

pub fn set_aria_hidden(el: &Element, hidden: bool) {
    let _ = el.set_attribute("aria-hidden", if hidden { "true" } else { "false" });
}

/// Set or clear an inline style property on an element.
pub fn set_style(el: &Element, property: &str, value: Option<&str>) {
    let Some(html) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    let _ = match value {
        Some(value) => style.set_property(property, value),
        None => style.remove_property(property).map(|_| ()),
    };
}

/// Attach a listener that lives for the rest of the page.
///
/// # Errors
/// Returns the DOM exception if the listener cannot be registered.
pub fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Resolve after the browser's next animation frame, once pending style and
/// layout work has been flushed.
///
/// # Errors
/// Returns an error if no window is available or the frame cannot be requested.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn next_frame() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move |_timestamp: f64| {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    win.request_animation_frame(closure.as_ref().unchecked_ref())?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// Fire a synthetic `resize` on the window so layout listeners re-measure.
pub fn dispatch_resize() {
    let Some(win) = window() else {
        return;
    };
    match web_sys::Event::new("resize") {
        Ok(event) => {
            let _ = win.dispatch_event(&event);
        }
        Err(err) => log::warn!("could not create resize event: {}", js_error_message(&err)),
    }
}
