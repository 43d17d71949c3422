//! Mobile menu open/closed state

use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use super::scheduler::Scheduler;

/// Key that closes the menu from anywhere on the page
pub const CLOSE_KEY: &str = "Escape";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Delay before closing after a link inside the menu is clicked,
    /// so the link's own navigation handler runs first
    pub link_close_delay_ms: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            link_close_delay_ms: 100,
        }
    }
}

/// Applies the menu state to the page: active marks on the toggle and the
/// panel, and the body scroll lock.
pub trait MenuView {
    fn apply(&self, open: bool);
}

/// Where a document-level click landed relative to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    Toggle,
    Panel,
    Outside,
}

struct MenuInner {
    is_open: Cell<bool>,
    view: Rc<dyn MenuView>,
    scheduler: Rc<dyn Scheduler>,
    config: MenuConfig,
}

/// Handle to the mobile menu controller. Clones share state.
#[derive(Clone)]
pub struct MobileMenu {
    inner: Rc<MenuInner>,
}

impl MobileMenu {
    pub fn new(view: Rc<dyn MenuView>, scheduler: Rc<dyn Scheduler>, config: MenuConfig) -> Self {
        Self {
            inner: Rc::new(MenuInner {
                is_open: Cell::new(false),
                view,
                scheduler,
                config,
            }),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open.get()
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&self) {
        debug!("opening mobile menu");
        self.inner.is_open.set(true);
        self.inner.view.apply(true);
    }

    /// Close the menu. Safe to call when already closed.
    pub fn close(&self) {
        if self.is_open() {
            debug!("closing mobile menu");
        }
        self.inner.is_open.set(false);
        self.inner.view.apply(false);
    }

    pub fn on_document_click(&self, origin: ClickOrigin) {
        if origin == ClickOrigin::Outside && self.is_open() {
            self.close();
        }
    }

    pub fn on_key(&self, key: &str) {
        if key == CLOSE_KEY {
            self.close();
        }
    }

    /// Schedule a close after a navigation link inside the panel was clicked.
    pub fn on_link_click(&self) {
        let menu = self.clone();
        self.inner.scheduler.set_timeout(
            self.inner.config.link_close_delay_ms,
            Box::new(move || menu.close()),
        );
    }
}
