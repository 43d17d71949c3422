//! Scroll-triggered reveal through `IntersectionObserver`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::core::reveal::{RevealConfig, RevealTracker};
use crate::ui::dom::{self, DomError, set_styles};

const INDEX_ATTR: &str = "data-reveal-index";
const REVEAL_TRANSITION: &str = "all 0.6s ease-out";

/// Hide every matching element and reveal each on first intersection.
/// Returns the number of observed elements.
pub fn bind(config: &RevealConfig) -> Result<usize, DomError> {
    let elements = dom::query_all(&config.selector);
    if elements.is_empty() {
        return Ok(0);
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::new()));
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = target
                    .get_attribute(INDEX_ATTR)
                    .and_then(|value| value.parse::<usize>().ok())
                else {
                    continue;
                };
                if tracker
                    .borrow_mut()
                    .on_intersection(index, entry.is_intersecting())
                {
                    set_styles(&target, &[("opacity", "1"), ("transform", "translateY(0)")]);
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(DomError::js)?;
    callback.forget();

    let offset = format!("translateY({}px)", config.start_offset_px);
    for (index, element) in elements.iter().enumerate() {
        let _ = element.set_attribute(INDEX_ATTR, &index.to_string());
        set_styles(
            element,
            &[
                ("opacity", "0"),
                ("transform", offset.as_str()),
                ("transition", REVEAL_TRANSITION),
            ],
        );
        observer.observe(element);
    }
    Ok(elements.len())
}
