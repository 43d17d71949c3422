//! Browser [`Scheduler`] backed by `setTimeout` and `requestAnimationFrame`

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::core::scheduler::{Scheduler, Task, request_or_fallback};

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Task) {
        Timeout::new(delay_ms, task).forget();
    }

    fn request_animation_frame(&self, task: Task) {
        let Some(window) = web_sys::window() else {
            Timeout::new(0, task).forget();
            return;
        };
        request_or_fallback(
            task,
            |frame| {
                let callback = Closure::once_into_js(move |_timestamp: f64| frame());
                window
                    .request_animation_frame(callback.unchecked_ref())
                    .is_ok()
            },
            |task| {
                tracing::warn!("requestAnimationFrame failed, falling back to a timeout");
                Timeout::new(0, task).forget();
            },
        );
    }
}
