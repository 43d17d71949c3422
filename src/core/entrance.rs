//! Staggered entrance sequence of the landing section

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use super::scheduler::Scheduler;

/// Element groups revealed by the entrance, in reveal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntrancePhase {
    /// `.animate-text`
    Headline,
    /// `.animate-fade-up`
    FadeUp,
    /// `.animate-stats`, each containing `.stat-number` counters
    Statistics,
}

impl EntrancePhase {
    pub const ALL: [EntrancePhase; 3] = [
        EntrancePhase::Headline,
        EntrancePhase::FadeUp,
        EntrancePhase::Statistics,
    ];

    pub fn selector(&self) -> &'static str {
        match self {
            EntrancePhase::Headline => ".animate-text",
            EntrancePhase::FadeUp => ".animate-fade-up",
            EntrancePhase::Statistics => ".animate-stats",
        }
    }

    /// Vertical offset, in pixels, elements start from
    pub fn start_offset_px(&self) -> u32 {
        match self {
            EntrancePhase::Headline => 50,
            EntrancePhase::FadeUp | EntrancePhase::Statistics => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntranceTimings {
    pub headline_step_ms: u32,
    pub fade_up_start_ms: u32,
    pub fade_up_step_ms: u32,
    pub statistics_start_ms: u32,
    pub statistics_step_ms: u32,
}

impl Default for EntranceTimings {
    fn default() -> Self {
        Self {
            headline_step_ms: 200,
            fade_up_start_ms: 800,
            fade_up_step_ms: 100,
            statistics_start_ms: 1200,
            statistics_step_ms: 150,
        }
    }
}

impl EntranceTimings {
    /// Delay from the start of the sequence until element `index` of `phase`
    /// is revealed.
    pub fn reveal_delay(&self, phase: EntrancePhase, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        match phase {
            EntrancePhase::Headline => {
                index.saturating_add(1).saturating_mul(self.headline_step_ms)
            }
            EntrancePhase::FadeUp => self
                .fade_up_start_ms
                .saturating_add(index.saturating_mul(self.fade_up_step_ms)),
            EntrancePhase::Statistics => self
                .statistics_start_ms
                .saturating_add(index.saturating_mul(self.statistics_step_ms)),
        }
    }
}

/// DOM operations the entrance needs from the landing section.
pub trait EntranceView {
    fn element_count(&self, phase: EntrancePhase) -> usize;
    /// Put every element of `phase` back at its hidden start position.
    fn reset(&self, phase: EntrancePhase);
    fn reveal(&self, phase: EntrancePhase, index: usize);
    /// Start the count-up of every counter inside statistic block `index`.
    fn start_counters(&self, index: usize);
}

/// Statistics whose counters already ran during this page load
#[derive(Debug, Default)]
pub struct CounterGate {
    started: RefCell<HashSet<usize>>,
}

impl CounterGate {
    /// Returns `true` the first time it is called for `index`.
    pub fn claim(&self, index: usize) -> bool {
        self.started.borrow_mut().insert(index)
    }

    #[cfg(test)]
    fn has_started(&self, index: usize) -> bool {
        self.started.borrow().contains(&index)
    }
}

struct EntranceInner {
    view: Rc<dyn EntranceView>,
    scheduler: Rc<dyn Scheduler>,
    timings: EntranceTimings,
    counters: CounterGate,
}

#[derive(Clone)]
pub struct LandingEntrance {
    inner: Rc<EntranceInner>,
}

impl LandingEntrance {
    pub fn new(
        view: Rc<dyn EntranceView>,
        scheduler: Rc<dyn Scheduler>,
        timings: EntranceTimings,
    ) -> Self {
        Self {
            inner: Rc::new(EntranceInner {
                view,
                scheduler,
                timings,
                counters: CounterGate::default(),
            }),
        }
    }

    /// Reset every animated element and schedule the staggered reveal.
    ///
    /// Counters start only the first time their statistic block is revealed.
    pub fn run(&self) {
        debug!("running landing entrance");
        let inner = &self.inner;
        for phase in EntrancePhase::ALL {
            inner.view.reset(phase);
        }

        for phase in EntrancePhase::ALL {
            for index in 0..inner.view.element_count(phase) {
                let delay = inner.timings.reveal_delay(phase, index);
                let this = self.clone();
                inner.scheduler.set_timeout(
                    delay,
                    Box::new(move || this.reveal(phase, index)),
                );
            }
        }
    }

    fn reveal(&self, phase: EntrancePhase, index: usize) {
        let inner = &self.inner;
        inner.view.reveal(phase, index);
        if phase == EntrancePhase::Statistics && inner.counters.claim(index) {
            inner.view.start_counters(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::testing::ManualScheduler;

    #[derive(Default)]
    struct RecordingEntrance {
        counts: [usize; 3],
        resets: RefCell<Vec<EntrancePhase>>,
        reveals: RefCell<Vec<(EntrancePhase, usize, u64)>>,
        counters: RefCell<Vec<usize>>,
        clock: RefCell<Option<Rc<ManualScheduler>>>,
    }

    impl EntranceView for RecordingEntrance {
        fn element_count(&self, phase: EntrancePhase) -> usize {
            match phase {
                EntrancePhase::Headline => self.counts[0],
                EntrancePhase::FadeUp => self.counts[1],
                EntrancePhase::Statistics => self.counts[2],
            }
        }
        fn reset(&self, phase: EntrancePhase) {
            self.resets.borrow_mut().push(phase);
        }
        fn reveal(&self, phase: EntrancePhase, index: usize) {
            let now = self.clock.borrow().as_ref().map_or(0, |c| c.now());
            self.reveals.borrow_mut().push((phase, index, now));
        }
        fn start_counters(&self, index: usize) {
            self.counters.borrow_mut().push(index);
        }
    }

    fn setup() -> (LandingEntrance, Rc<RecordingEntrance>, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let view = Rc::new(RecordingEntrance {
            counts: [2, 3, 3],
            ..Default::default()
        });
        *view.clock.borrow_mut() = Some(scheduler.clone());
        let entrance =
            LandingEntrance::new(view.clone(), scheduler.clone(), EntranceTimings::default());
        (entrance, view, scheduler)
    }

    #[test]
    fn test_reveal_delays() {
        let t = EntranceTimings::default();
        assert_eq!(t.reveal_delay(EntrancePhase::Headline, 0), 200);
        assert_eq!(t.reveal_delay(EntrancePhase::Headline, 2), 600);
        assert_eq!(t.reveal_delay(EntrancePhase::FadeUp, 0), 800);
        assert_eq!(t.reveal_delay(EntrancePhase::FadeUp, 3), 1100);
        assert_eq!(t.reveal_delay(EntrancePhase::Statistics, 0), 1200);
        assert_eq!(t.reveal_delay(EntrancePhase::Statistics, 2), 1500);
    }

    #[test]
    fn test_run_resets_then_staggers() {
        let (entrance, view, scheduler) = setup();
        entrance.run();

        assert_eq!(*view.resets.borrow(), EntrancePhase::ALL.to_vec());
        assert!(view.reveals.borrow().is_empty());

        scheduler.run_until_idle();
        let reveals = view.reveals.borrow();
        assert_eq!(reveals.len(), 8);
        assert_eq!(reveals[0], (EntrancePhase::Headline, 0, 200));
        assert_eq!(reveals[2], (EntrancePhase::FadeUp, 0, 800));
        assert_eq!(reveals[7], (EntrancePhase::Statistics, 2, 1500));
        assert!(reveals.windows(2).all(|w| w[0].2 <= w[1].2));
    }

    #[test]
    fn test_counters_start_once_per_page_load() {
        let (entrance, view, scheduler) = setup();

        entrance.run();
        scheduler.run_until_idle();
        assert_eq!(*view.counters.borrow(), vec![0, 1, 2]);

        // revisiting the landing section replays the reveal only
        entrance.run();
        scheduler.run_until_idle();
        assert_eq!(*view.counters.borrow(), vec![0, 1, 2]);
        assert_eq!(view.reveals.borrow().len(), 16);
    }

    #[test]
    fn test_counter_gate() {
        let gate = CounterGate::default();
        assert!(!gate.has_started(1));
        assert!(gate.claim(1));
        assert!(!gate.claim(1));
        assert!(gate.has_started(1));
    }
}
