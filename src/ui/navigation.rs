//! Section panels, navigation links and history wiring

use wasm_bindgen::JsValue;
use web_sys::{Element, MouseEvent, PopStateEvent, ScrollBehavior, ScrollToOptions};

use crate::core::navigation::{NavigationOutcome, Navigator, SectionView};
use crate::core::section::{SectionId, SectionRegistry, fragment_section};
use crate::ui::dom::{self, DomError, clear_styles, listen, set_class, set_styles};

/// Navigation links, each declaring its section with this attribute
pub const NAV_TARGET_ATTR: &str = "data-nav-target";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const BRAND_SELECTOR: &str = ".nav-brand";

const ACTIVE: &str = "active";
const SECTION_TRANSITION: &str = "all 0.4s ease-in-out";

/// [`SectionView`] over the page's `.section` panels and `.nav-link` links.
pub struct DomSections {
    selector: String,
}

impl DomSections {
    pub fn new(section_selector: impl Into<String>) -> Self {
        Self {
            selector: section_selector.into(),
        }
    }

    /// Collect the section registry from panel ids.
    pub fn registry(&self, landing: &str) -> SectionRegistry {
        let ids: Vec<String> = dom::query_all(&self.selector)
            .iter()
            .map(Element::id)
            .filter(|id| !id.is_empty())
            .collect();
        SectionRegistry::new(ids, landing)
    }

    /// Give every panel its base transition.
    pub fn install_transitions(&self) {
        for panel in dom::query_all(&self.selector) {
            set_styles(&panel, &[("transition", SECTION_TRANSITION)]);
        }
    }

    fn panel(&self, id: &SectionId) -> Option<Element> {
        dom::document().ok()?.get_element_by_id(id.as_str())
    }
}

impl SectionView for DomSections {
    fn has_panel(&self, id: &SectionId) -> bool {
        self.panel(id).is_some()
    }

    fn mark_active_link(&self, id: &SectionId) {
        for link in dom::query_all(NAV_LINK_SELECTOR) {
            let matches = link.get_attribute(NAV_TARGET_ATTR).as_deref() == Some(id.as_str());
            set_class(&link, ACTIVE, matches);
        }
    }

    fn hide_all(&self) {
        for panel in dom::query_all(&self.selector) {
            set_class(&panel, ACTIVE, false);
            set_styles(&panel, &[("display", "none")]);
        }
    }

    fn show_immediately(&self, id: &SectionId) {
        if let Some(panel) = self.panel(id) {
            set_styles(&panel, &[("display", "block")]);
            set_class(&panel, ACTIVE, true);
        }
    }

    fn begin_exit(&self, id: &SectionId) {
        if let Some(panel) = self.panel(id) {
            set_styles(&panel, &[("transform", "translateY(-20px)"), ("opacity", "0")]);
        }
    }

    fn hide(&self, id: &SectionId) {
        if let Some(panel) = self.panel(id) {
            set_class(&panel, ACTIVE, false);
            set_styles(&panel, &[("display", "none")]);
            clear_styles(&panel, &["transform", "opacity"]);
        }
    }

    fn prepare_enter(&self, id: &SectionId) {
        if let Some(panel) = self.panel(id) {
            set_styles(
                &panel,
                &[
                    ("opacity", "0"),
                    ("transform", "translateY(20px)"),
                    ("display", "block"),
                ],
            );
        }
    }

    fn activate(&self, id: &SectionId) {
        if let Some(panel) = self.panel(id) {
            set_class(&panel, ACTIVE, true);
            set_styles(&panel, &[("opacity", "1"), ("transform", "translateY(0)")]);
        }
    }

    fn settle(&self, id: &SectionId) {
        if let Some(panel) = self.panel(id) {
            clear_styles(&panel, &["opacity", "transform"]);
        }
    }

    fn push_fragment(&self, id: &SectionId) {
        let Ok(window) = dom::window() else {
            return;
        };
        let pushed = window.history().and_then(|history| {
            history.push_state_with_url(&JsValue::NULL, "", Some(&format!("#{id}")))
        });
        if pushed.is_err() {
            tracing::warn!(section = %id, "failed to push history state");
        }
    }

    fn scroll_to_top(&self) {
        let Ok(window) = dom::window() else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Current `location.hash` as a section key, if any.
pub fn current_fragment() -> Option<String> {
    let hash = dom::window().ok()?.location().hash().ok()?;
    fragment_section(&hash).map(str::to_string)
}

fn log_outcome(result: Result<NavigationOutcome, crate::core::NavigationError>) {
    match result {
        Ok(NavigationOutcome::Started) => {}
        Ok(NavigationOutcome::Ignored(reason)) => {
            tracing::debug!(?reason, "navigation ignored");
        }
        Err(err) => tracing::error!("{err}"),
    }
}

/// Attach click handlers to every element declaring a navigation target,
/// the brand element, and the `popstate` listener.
pub fn bind(navigator: &Navigator) -> Result<(), DomError> {
    let targets = dom::query_all(&format!("[{NAV_TARGET_ATTR}]"));
    for element in &targets {
        let Some(section) = element.get_attribute(NAV_TARGET_ATTR) else {
            continue;
        };
        let navigator = navigator.clone();
        listen(element, "click", move |event: MouseEvent| {
            event.prevent_default();
            log_outcome(navigator.navigate_to(&section));
        })?;
    }
    tracing::info!(count = targets.len(), "navigation targets bound");

    if let Some(brand) = dom::query_all(BRAND_SELECTOR).into_iter().next() {
        let navigator = navigator.clone();
        listen(&brand, "click", move |_: MouseEvent| {
            let landing = navigator.registry().landing().clone();
            log_outcome(navigator.navigate_to(landing.as_str()));
        })?;
    }

    let window = dom::window()?;
    let navigator = navigator.clone();
    listen(&window, "popstate", move |_: PopStateEvent| {
        let fragment = current_fragment();
        log_outcome(navigator.restore_from_history(fragment.as_deref()));
    })
}

/// Show the section named by the fragment at load.
pub fn initialize(navigator: &Navigator) -> SectionId {
    let fragment = current_fragment();
    navigator.initialize(fragment.as_deref())
}
