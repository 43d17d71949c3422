//! Small DOM helpers shared by the browser adapters

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

#[derive(Debug, Clone, thiserror::Error)]
pub enum DomError {
    #[error("window is not available")]
    WindowUnavailable,
    #[error("document is not available")]
    DocumentUnavailable,
    #[error("element not found: {0}")]
    ElementMissing(String),
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl DomError {
    pub fn js(value: wasm_bindgen::JsValue) -> Self {
        DomError::Js(format!("{value:?}"))
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::WindowUnavailable)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::DocumentUnavailable)
}

pub fn element_by_id(id: &str) -> Result<Element, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::ElementMissing(format!("#{id}")))
}

/// Register `handler` for `event` on `target` for the page's lifetime.
pub fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), DomError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(DomError::js)?;
    closure.forget();
    Ok(())
}

/// Every element matching `selector` under `root`, in document order.
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => collect_elements(&list),
        Err(_) => Vec::new(),
    }
}

/// Every element matching `selector` in the document, in document order.
pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(document) = document() else {
        return Vec::new();
    };
    match document.query_selector_all(selector) {
        Ok(list) => collect_elements(&list),
        Err(_) => Vec::new(),
    }
}

fn collect_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Set inline style properties, ignoring elements that are not HTML.
pub fn set_styles(element: &Element, properties: &[(&str, &str)]) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let style = element.style();
        for (name, value) in properties {
            let _ = style.set_property(name, value);
        }
    }
}

/// Remove inline style properties so stylesheet rules apply again.
pub fn clear_styles(element: &Element, properties: &[&str]) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let style = element.style();
        for name in properties {
            let _ = style.remove_property(name);
        }
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

/// Monotonic milliseconds for throttling, from `performance.now()`.
pub fn now_ms() -> f64 {
    window()
        .ok()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Viewport size in CSS pixels.
pub fn viewport_size() -> (f64, f64) {
    let Ok(window) = window() else {
        return (0.0, 0.0);
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// Inject a `<style>` block into the head once, keyed by its element id.
pub fn ensure_stylesheet(id: &str, css: &str) -> Result<(), DomError> {
    let document = document()?;
    if document.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let style = document.create_element("style").map_err(DomError::js)?;
    style.set_id(id);
    style.set_text_content(Some(css));
    let head = document
        .head()
        .ok_or_else(|| DomError::ElementMissing("head".into()))?;
    head.append_child(&style).map_err(DomError::js)?;
    Ok(())
}
