//! Mobile menu binding: `#navToggle` opens and closes `#navMenu`

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent, MouseEvent, Node};

use crate::core::menu::{ClickOrigin, MenuConfig, MenuView, MobileMenu};
use crate::core::scheduler::Scheduler;
use crate::ui::dom::{self, DomError, listen, set_class, set_styles};
use crate::ui::navigation::NAV_LINK_SELECTOR;

pub const TOGGLE_ID: &str = "navToggle";
pub const MENU_ID: &str = "navMenu";

struct DomMenu {
    toggle: Element,
    panel: Element,
}

impl MenuView for DomMenu {
    fn apply(&self, open: bool) {
        set_class(&self.toggle, "active", open);
        set_class(&self.panel, "active", open);
        if let Some(body) = dom::document().ok().and_then(|document| document.body()) {
            set_styles(&body, &[("overflow", if open { "hidden" } else { "" })]);
        }
    }
}

fn contains(element: &Element, target: Option<&Node>) -> bool {
    let node: &Node = element;
    node.contains(target)
}

/// Wire the menu. Returns `Ok(None)` when the page has no mobile menu.
pub fn bind(
    scheduler: Rc<dyn Scheduler>,
    config: MenuConfig,
) -> Result<Option<MobileMenu>, DomError> {
    let (Ok(toggle), Ok(panel)) = (dom::element_by_id(TOGGLE_ID), dom::element_by_id(MENU_ID))
    else {
        tracing::debug!("no mobile menu on this page");
        return Ok(None);
    };

    let view = Rc::new(DomMenu {
        toggle: toggle.clone(),
        panel: panel.clone(),
    });
    let menu = MobileMenu::new(view, scheduler, config);

    {
        let menu = menu.clone();
        listen(&toggle, "click", move |event: MouseEvent| {
            event.stop_propagation();
            menu.toggle();
        })?;
    }

    {
        let menu = menu.clone();
        let (toggle, panel) = (toggle.clone(), panel.clone());
        let document = dom::document()?;
        listen(&document, "click", move |event: MouseEvent| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let origin = if contains(&toggle, target.as_ref()) {
                ClickOrigin::Toggle
            } else if contains(&panel, target.as_ref()) {
                ClickOrigin::Panel
            } else {
                ClickOrigin::Outside
            };
            menu.on_document_click(origin);
        })?;
    }

    for link in dom::query_all_in(&panel, NAV_LINK_SELECTOR) {
        let menu = menu.clone();
        listen(&link, "click", move |_: MouseEvent| menu.on_link_click())?;
    }

    {
        let menu = menu.clone();
        let document = dom::document()?;
        listen(&document, "keydown", move |event: KeyboardEvent| {
            menu.on_key(&event.key());
        })?;
    }

    Ok(Some(menu))
}
