//! Landing entrance over the hero elements and their statistic counters

use std::rc::Rc;

use web_sys::Element;

use crate::core::counter::{self, CounterAnimation, CounterConfig};
use crate::core::entrance::{EntrancePhase, EntranceView};
use crate::core::scheduler::Scheduler;
use crate::ui::dom::{self, set_styles};

const COUNTER_SELECTOR: &str = ".stat-number";
const REVEAL_TRANSITION: &str = "all 0.8s ease-out";

pub struct DomHero {
    landing_id: String,
    scheduler: Rc<dyn Scheduler>,
    counter: CounterConfig,
}

impl DomHero {
    pub fn new(landing_id: impl Into<String>, scheduler: Rc<dyn Scheduler>, counter: CounterConfig) -> Self {
        Self {
            landing_id: landing_id.into(),
            scheduler,
            counter,
        }
    }

    /// Elements of `phase` inside the landing panel, or the whole document
    /// when the panel is missing.
    fn elements(&self, phase: EntrancePhase) -> Vec<Element> {
        match dom::element_by_id(&self.landing_id) {
            Ok(landing) => dom::query_all_in(&landing, phase.selector()),
            Err(_) => dom::query_all(phase.selector()),
        }
    }
}

impl EntranceView for DomHero {
    fn element_count(&self, phase: EntrancePhase) -> usize {
        self.elements(phase).len()
    }

    fn reset(&self, phase: EntrancePhase) {
        let offset = format!("translateY({}px)", phase.start_offset_px());
        for element in self.elements(phase) {
            set_styles(
                &element,
                &[
                    ("opacity", "0"),
                    ("transform", offset.as_str()),
                    ("transition", REVEAL_TRANSITION),
                ],
            );
        }
    }

    fn reveal(&self, phase: EntrancePhase, index: usize) {
        if let Some(element) = self.elements(phase).get(index) {
            set_styles(element, &[("opacity", "1"), ("transform", "translateY(0)")]);
        }
    }

    fn start_counters(&self, index: usize) {
        let Some(block) = self.elements(EntrancePhase::Statistics).into_iter().nth(index) else {
            return;
        };
        for number in dom::query_all_in(&block, COUNTER_SELECTOR) {
            let text = number.text_content().unwrap_or_default();
            let Some(animation) = CounterAnimation::with_steps(&text, self.counter.steps) else {
                tracing::debug!(%text, "statistic has no number to count");
                continue;
            };
            let display: Rc<dyn Fn(&str)> = Rc::new(move |frame: &str| {
                number.set_text_content(Some(frame));
            });
            counter::animate(
                self.scheduler.clone(),
                animation,
                self.counter.tick_ms,
                display,
            );
        }
    }
}
