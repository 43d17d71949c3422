//! Count-up animation for statistic numbers
//!
//! A statistic like `250+` counts up from zero in a fixed number of ticks,
//! whatever the magnitude, and always finishes on the exact source text.

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::scheduler::Scheduler;

/// Ticks per animation
pub const DEFAULT_COUNTER_STEPS: u32 = 50;

/// Milliseconds between ticks
pub const DEFAULT_COUNTER_TICK_MS: u32 = 30;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub steps: u32,
    pub tick_ms: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_COUNTER_STEPS,
            tick_ms: DEFAULT_COUNTER_TICK_MS,
        }
    }
}

/// What to display after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterFrame {
    Running(String),
    Finished(String),
}

impl CounterFrame {
    pub fn text(&self) -> &str {
        match self {
            CounterFrame::Running(text) | CounterFrame::Finished(text) => text,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, CounterFrame::Finished(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    original: String,
    prefix: String,
    suffix: String,
    target: u64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    /// Parse a statistic with the default step count.
    ///
    /// Returns `None` when the text has no digits or the number does not
    /// fit in a `u64`.
    pub fn parse(text: &str) -> Option<Self> {
        Self::with_steps(text, DEFAULT_COUNTER_STEPS)
    }

    pub fn with_steps(text: &str, steps: u32) -> Option<Self> {
        let found = NUMBER.find(text)?;
        let target: u64 = found.as_str().parse().ok()?;
        let steps = steps.max(1);
        Some(Self {
            original: text.to_string(),
            prefix: text[..found.start()].to_string(),
            suffix: text[found.end()..].to_string(),
            target,
            increment: target as f64 / f64::from(steps),
            current: 0.0,
            finished: false,
        })
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> CounterFrame {
        if self.finished {
            return CounterFrame::Finished(self.original.clone());
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.finished = true;
            CounterFrame::Finished(self.original.clone())
        } else {
            let shown = self.current.floor() as u64;
            CounterFrame::Running(format!("{}{}{}", self.prefix, shown, self.suffix))
        }
    }
}

/// Drive `animation` to completion, writing every frame to `display`.
pub fn animate(
    scheduler: Rc<dyn Scheduler>,
    animation: CounterAnimation,
    tick_ms: u32,
    display: Rc<dyn Fn(&str)>,
) {
    schedule_tick(scheduler, animation, tick_ms, display);
}

fn schedule_tick(
    scheduler: Rc<dyn Scheduler>,
    mut animation: CounterAnimation,
    tick_ms: u32,
    display: Rc<dyn Fn(&str)>,
) {
    let next = scheduler.clone();
    scheduler.set_timeout(
        tick_ms,
        Box::new(move || {
            let frame = animation.tick();
            display(frame.text());
            if !frame.is_finished() {
                schedule_tick(next, animation, tick_ms, display);
            }
        }),
    );
}
