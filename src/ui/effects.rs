//! Sparkles, click ripples and floating accents

use std::rc::Rc;

use gloo_timers::callback::Interval;
use web_sys::{Element, Event, MouseEvent};

use crate::core::effects::{
    Point, RandomSource, Rect, Ripple, ScrollSparkles, SparkleConfig, ambient_spawn, click_burst,
    is_floating_accent, random_point,
};
use crate::core::scheduler::Scheduler;
use crate::ui::dom::{self, DomError, listen, set_class, set_styles};

pub const SPARKLE_CONTAINER_ID: &str = "sparkle-container";
const CLICK_SELECTOR: &str = ".btn, button, [data-nav-target], [data-message]";
const ACCENT_SELECTOR: &str = ".hero-badge, .stat-item";

const RIPPLE_STYLESHEET_ID: &str = "ripple-styles";
const RIPPLE_KEYFRAMES: &str = "@keyframes ripple { to { transform: scale(2); opacity: 0; } }";

/// `Math.random()`
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Sparkle and ripple factory bound to the page's sparkle container.
#[derive(Clone)]
pub struct Effects {
    container: Element,
    scheduler: Rc<dyn Scheduler>,
    config: SparkleConfig,
}

impl Effects {
    /// Create `#sparkle-container` on `<body>`, reusing an existing one.
    pub fn new(scheduler: Rc<dyn Scheduler>, config: SparkleConfig) -> Result<Self, DomError> {
        let container = match dom::element_by_id(SPARKLE_CONTAINER_ID) {
            Ok(existing) => existing,
            Err(_) => {
                let document = dom::document()?;
                let container = document.create_element("div").map_err(DomError::js)?;
                container.set_id(SPARKLE_CONTAINER_ID);
                document
                    .body()
                    .ok_or_else(|| DomError::ElementMissing("body".into()))?
                    .append_child(&container)
                    .map_err(DomError::js)?;
                container
            }
        };
        Ok(Self {
            container,
            scheduler,
            config,
        })
    }

    fn spawn_sparkle(&self, at: Point) {
        let Ok(sparkle) = dom::document().and_then(|d| d.create_element("div").map_err(DomError::js))
        else {
            return;
        };
        sparkle.set_class_name("sparkle");
        let (left, top) = (format!("{}px", at.x), format!("{}px", at.y));
        set_styles(&sparkle, &[("left", left.as_str()), ("top", top.as_str())]);
        if self.container.append_child(&sparkle).is_err() {
            return;
        }
        remove_later(&*self.scheduler, sparkle, self.config.lifetime_ms);
    }

    /// One sparkle somewhere in the viewport.
    pub fn random_sparkle(&self) {
        let (width, height) = dom::viewport_size();
        let at = random_point(&mut MathRandom, width, height);
        self.spawn_sparkle(at);
    }

    pub fn click_sparkles(&self, origin: Point) {
        let points = click_burst(&mut MathRandom, origin, &self.config);
        for at in points {
            self.spawn_sparkle(at);
        }
    }

    pub fn ripple(&self, element: &Element, click: Point) -> Result<(), DomError> {
        dom::ensure_stylesheet(RIPPLE_STYLESHEET_ID, RIPPLE_KEYFRAMES)?;
        let bounds = element.get_bounding_client_rect();
        let rect = Rect {
            left: bounds.left(),
            top: bounds.top(),
            width: bounds.width(),
            height: bounds.height(),
        };
        let ripple = Ripple::at(click, rect);

        let span = dom::document()?
            .create_element("span")
            .map_err(DomError::js)?;
        let size = format!("{}px", ripple.size);
        let left = format!("{}px", ripple.left);
        let top = format!("{}px", ripple.top);
        set_styles(
            &span,
            &[
                ("position", "absolute"),
                ("width", size.as_str()),
                ("height", size.as_str()),
                ("left", left.as_str()),
                ("top", top.as_str()),
                ("background", "rgba(56, 217, 169, 0.3)"),
                ("border-radius", "50%"),
                ("pointer-events", "none"),
                ("transform", "scale(0)"),
                ("animation", "ripple 0.6s ease-out"),
                ("z-index", "1"),
            ],
        );
        set_styles(element, &[("position", "relative"), ("overflow", "hidden")]);
        element.append_child(&span).map_err(DomError::js)?;
        remove_later(&*self.scheduler, span, self.config.ripple_ms);
        Ok(())
    }
}

fn remove_later(scheduler: &dyn Scheduler, element: Element, delay_ms: u32) {
    scheduler.set_timeout(delay_ms, Box::new(move || element.remove()));
}

/// Scroll and ambient sparkles.
pub fn bind_sparkles(effects: &Effects) -> Result<(), DomError> {
    let window = dom::window()?;
    let initial_y = window.scroll_y().unwrap_or(0.0);
    let mut gate = ScrollSparkles::new(initial_y, &effects.config);
    {
        let effects = effects.clone();
        let window_ref = window.clone();
        listen(&window, "scroll", move |_: Event| {
            let y = window_ref.scroll_y().unwrap_or(0.0);
            if gate.on_scroll(dom::now_ms(), y) {
                effects.random_sparkle();
            }
        })?;
    }

    let ambient = effects.clone();
    let probability = effects.config.ambient_probability;
    Interval::new(effects.config.ambient_interval_ms, move || {
        if ambient_spawn(&mut MathRandom, probability) {
            ambient.random_sparkle();
        }
    })
    .forget();
    Ok(())
}

/// Ripple and sparkle burst on every clickable element.
pub fn bind_clicks(effects: &Effects) -> Result<usize, DomError> {
    let targets = dom::query_all(CLICK_SELECTOR);
    for element in &targets {
        let effects = effects.clone();
        let target = element.clone();
        listen(element, "click", move |event: MouseEvent| {
            let click = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            if let Err(err) = effects.ripple(&target, click) {
                tracing::warn!("ripple failed: {err}");
            }
            effects.click_sparkles(click);
        })?;
    }
    Ok(targets.len())
}

/// Mark every other hero badge and statistic as floating.
pub fn mark_floating_accents() -> usize {
    let accents = dom::query_all(ACCENT_SELECTOR);
    let mut floating = 0;
    for (index, element) in accents.iter().enumerate() {
        if is_floating_accent(index) {
            set_class(element, "floating-element", true);
            floating += 1;
        }
    }
    floating
}
