//! Section navigation state machine
//!
//! Exactly one section panel is shown at a time. A navigation request walks
//! the transition through four phases:
//!
//! - **Idle**: nothing has been navigated yet since load
//! - **Exiting**: the current panel is animating out
//! - **Entering**: the target panel is visible and animating in
//! - **Settled**: the last transition finished
//!
//! Requests arriving while a transition is `Exiting` or `Entering` are
//! dropped, not queued. All DOM work goes through [`SectionView`] and every
//! delay through [`Scheduler`], so the whole sequence can be stepped with a
//! virtual clock.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use tracing::{debug, error, info};

use super::entrance::LandingEntrance;
use super::menu::MobileMenu;
use super::scheduler::Scheduler;
use super::section::{SectionId, SectionRegistry};

/// Transition durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransitionTimings {
    /// Exit animation of the current panel
    pub exit_ms: u32,
    /// Entrance animation of the target panel
    pub enter_ms: u32,
    /// Delay between settling on the landing section and replaying its entrance
    pub landing_replay_ms: u32,
    /// Delay before the landing entrance on first load
    pub initial_entrance_ms: u32,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            exit_ms: 300,
            enter_ms: 400,
            landing_replay_ms: 300,
            initial_entrance_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Exiting,
    Entering,
    Settled,
}

impl TransitionPhase {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, TransitionPhase::Exiting | TransitionPhase::Entering)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub current: SectionId,
    pub phase: TransitionPhase,
}

impl NavigationState {
    pub fn transition_in_progress(&self) -> bool {
        self.phase.is_in_progress()
    }
}

/// Why a navigation request was not acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownSection,
    AlreadyActive,
    TransitionInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Started,
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("section panel not found: {0}")]
    PanelMissing(SectionId),
}

/// DOM operations the navigator needs from the page.
pub trait SectionView {
    fn has_panel(&self, id: &SectionId) -> bool;
    /// Mark the link for `id` active and clear every other link.
    fn mark_active_link(&self, id: &SectionId);
    /// Hide every panel without animation.
    fn hide_all(&self);
    /// Show a panel and mark it active without animation.
    fn show_immediately(&self, id: &SectionId);
    fn begin_exit(&self, id: &SectionId);
    /// Hide an exited panel, clear its active mark and inline overrides.
    fn hide(&self, id: &SectionId);
    /// Make the panel visible at its offset start position.
    fn prepare_enter(&self, id: &SectionId);
    /// Mark the panel active and move it to its resting position.
    fn activate(&self, id: &SectionId);
    /// Clear inline overrides once the entrance finished.
    fn settle(&self, id: &SectionId);
    fn push_fragment(&self, id: &SectionId);
    fn scroll_to_top(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryWrite {
    Push,
    Skip,
}

struct NavigatorInner {
    registry: SectionRegistry,
    timings: TransitionTimings,
    view: Rc<dyn SectionView>,
    scheduler: Rc<dyn Scheduler>,
    state: RefCell<NavigationState>,
    menu: RefCell<Option<MobileMenu>>,
    entrance: RefCell<Option<LandingEntrance>>,
}

/// Handle to the navigation controller. Clones share state.
#[derive(Clone)]
pub struct Navigator {
    inner: Rc<NavigatorInner>,
}

impl Navigator {
    pub fn new(
        registry: SectionRegistry,
        timings: TransitionTimings,
        view: Rc<dyn SectionView>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        let state = NavigationState {
            current: registry.landing().clone(),
            phase: TransitionPhase::Idle,
        };
        Self {
            inner: Rc::new(NavigatorInner {
                registry,
                timings,
                view,
                scheduler,
                state: RefCell::new(state),
                menu: RefCell::new(None),
                entrance: RefCell::new(None),
            }),
        }
    }

    /// Close this menu whenever a navigation switches panels.
    pub fn attach_menu(&self, menu: MobileMenu) {
        *self.inner.menu.borrow_mut() = Some(menu);
    }

    /// Run this entrance whenever the landing section is shown.
    pub fn attach_entrance(&self, entrance: LandingEntrance) {
        *self.inner.entrance.borrow_mut() = Some(entrance);
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.inner.registry
    }

    pub fn current(&self) -> SectionId {
        self.inner.state.borrow().current.clone()
    }

    pub fn state(&self) -> NavigationState {
        self.inner.state.borrow().clone()
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.state.borrow().transition_in_progress()
    }

    /// Show the section named by the load-time fragment, or the landing
    /// section, without animation.
    pub fn initialize(&self, fragment: Option<&str>) -> SectionId {
        let inner = &self.inner;
        let initial = fragment
            .and_then(|key| inner.registry.get(key))
            .filter(|id| inner.view.has_panel(id))
            .cloned()
            .unwrap_or_else(|| inner.registry.landing().clone());

        inner.view.hide_all();
        inner.view.show_immediately(&initial);
        inner.view.mark_active_link(&initial);
        {
            let mut state = inner.state.borrow_mut();
            state.current = initial.clone();
            state.phase = TransitionPhase::Idle;
        }
        info!(section = %initial, "initial section shown");

        if inner.registry.is_landing(&initial) {
            self.schedule_entrance(inner.timings.initial_entrance_ms);
        }
        initial
    }

    /// Navigate to `id`, pushing its fragment onto the history stack.
    pub fn navigate_to(&self, id: &str) -> Result<NavigationOutcome, NavigationError> {
        self.navigate(id, HistoryWrite::Push)
    }

    /// React to a back/forward history event.
    ///
    /// An empty fragment means the landing section. Nothing happens if the
    /// target is already current.
    pub fn restore_from_history(
        &self,
        fragment: Option<&str>,
    ) -> Result<NavigationOutcome, NavigationError> {
        let landing = self.inner.registry.landing().clone();
        let target = fragment.unwrap_or(landing.as_str());
        if self.current() == target {
            return Ok(NavigationOutcome::Ignored(IgnoreReason::AlreadyActive));
        }
        self.navigate(target, HistoryWrite::Skip)
    }

    fn navigate(
        &self,
        id: &str,
        history: HistoryWrite,
    ) -> Result<NavigationOutcome, NavigationError> {
        let inner = &self.inner;
        let Some(target) = inner.registry.get(id).cloned() else {
            debug!(section = id, "ignoring navigation to unknown section");
            return Ok(NavigationOutcome::Ignored(IgnoreReason::UnknownSection));
        };

        let (from, previous_phase) = {
            let mut state = inner.state.borrow_mut();
            if state.transition_in_progress() {
                debug!(section = %target, "navigation dropped, transition in progress");
                return Ok(NavigationOutcome::Ignored(IgnoreReason::TransitionInProgress));
            }
            if state.current == target {
                return Ok(NavigationOutcome::Ignored(IgnoreReason::AlreadyActive));
            }
            let previous = state.phase;
            state.phase = TransitionPhase::Exiting;
            (state.current.clone(), previous)
        };

        if !inner.view.has_panel(&target) {
            error!(section = %target, "section not found");
            inner.state.borrow_mut().phase = previous_phase;
            return Err(NavigationError::PanelMissing(target));
        }

        debug!(from = %from, to = %target, "navigating");
        inner.view.mark_active_link(&target);

        let exiting = inner.view.has_panel(&from);
        if exiting {
            inner.view.begin_exit(&from);
        }
        let delay = if exiting { inner.timings.exit_ms } else { 0 };

        let this = self.clone();
        inner.scheduler.set_timeout(
            delay,
            Box::new(move || this.enter(exiting.then_some(from), target, history)),
        );
        Ok(NavigationOutcome::Started)
    }

    fn enter(&self, from: Option<SectionId>, target: SectionId, history: HistoryWrite) {
        let inner = &self.inner;
        if let Some(from) = &from {
            inner.view.hide(from);
        }
        inner.view.prepare_enter(&target);
        {
            let mut state = inner.state.borrow_mut();
            state.current = target.clone();
            state.phase = TransitionPhase::Entering;
        }

        if history == HistoryWrite::Push {
            inner.view.push_fragment(&target);
        }
        if let Some(menu) = inner.menu.borrow().as_ref() {
            menu.close();
        }
        inner.view.scroll_to_top();

        let this = self.clone();
        inner.scheduler.request_animation_frame(Box::new(move || {
            this.inner.view.activate(&target);
            let settle = this.clone();
            this.inner.scheduler.set_timeout(
                this.inner.timings.enter_ms,
                Box::new(move || settle.settle(target)),
            );
        }));
    }

    fn settle(&self, target: SectionId) {
        let inner = &self.inner;
        inner.view.settle(&target);
        inner.state.borrow_mut().phase = TransitionPhase::Settled;
        debug!(section = %target, "transition settled");

        if inner.registry.is_landing(&target) {
            self.schedule_entrance(inner.timings.landing_replay_ms);
        }
    }

    fn schedule_entrance(&self, delay_ms: u32) {
        let Some(entrance) = self.inner.entrance.borrow().clone() else {
            return;
        };
        let this = self.clone();
        self.inner.scheduler.set_timeout(
            delay_ms,
            Box::new(move || {
                let current = this.current();
                if this.inner.registry.is_landing(&current) {
                    entrance.run();
                } else {
                    debug!(section = %current, "left landing section, skipping entrance");
                }
            }),
        );
    }
}
