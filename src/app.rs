//! Page boot: read config, build the controllers, bind the DOM

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::config::{CONFIG_ELEMENT_ID, SiteConfig};
use crate::core::entrance::LandingEntrance;
use crate::core::messaging::MessagingLink;
use crate::core::navigation::{IgnoreReason, NavigationError, NavigationOutcome, Navigator};
use crate::core::scheduler::Scheduler;
use crate::ui::dom::{self, DomError};
use crate::ui::effects::{self, Effects};
use crate::ui::entrance::DomHero;
use crate::ui::navigation::{self, DomSections};
use crate::ui::notifications::NotificationManager;
use crate::ui::{BrowserScheduler, form, menu, messaging, reveal};

/// Controllers reachable from the exported JavaScript functions
#[derive(Clone)]
pub struct Site {
    pub navigator: Navigator,
    pub messaging: Rc<MessagingLink>,
    pub notifications: NotificationManager,
}

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// The booted site, if [`boot`] has run.
pub fn site() -> Option<Site> {
    SITE.with(|site| site.borrow().clone())
}

/// Read the optional `#site-config` block. Any problem falls back to the
/// defaults.
pub fn load_config() -> SiteConfig {
    let Ok(element) = dom::element_by_id(CONFIG_ELEMENT_ID) else {
        return SiteConfig::default();
    };
    let json = element.text_content().unwrap_or_default();
    match SiteConfig::from_json(&json) {
        Ok(config) => {
            tracing::info!("site config loaded");
            config
        }
        Err(err) => {
            tracing::error!("{err}; using defaults");
            SiteConfig::default()
        }
    }
}

/// Wire every behavior onto the current document.
pub fn boot() -> Result<Site, DomError> {
    let config = load_config();
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);

    let sections = DomSections::new(config.section_selector());
    let registry = sections.registry(&config.landing_section);
    tracing::info!(sections = registry.iter().count(), landing = %registry.landing(), "sections discovered");
    sections.install_transitions();

    let navigator = Navigator::new(
        registry,
        config.navigation,
        Rc::new(sections),
        scheduler.clone(),
    );

    match menu::bind(scheduler.clone(), config.menu) {
        Ok(Some(mobile_menu)) => navigator.attach_menu(mobile_menu),
        Ok(None) => {}
        Err(err) => tracing::warn!("mobile menu disabled: {err}"),
    }

    let hero = DomHero::new(
        config.landing_section.clone(),
        scheduler.clone(),
        config.counter,
    );
    navigator.attach_entrance(LandingEntrance::new(
        Rc::new(hero),
        scheduler.clone(),
        config.entrance,
    ));

    navigation::bind(&navigator)?;

    let notifications = NotificationManager::new().mount();
    let link = Rc::new(config.messaging.clone());
    if let Err(err) = form::bind(link.clone(), notifications, config.notification_dismiss_ms) {
        tracing::warn!("contact form disabled: {err}");
    }
    match messaging::bind(link.clone()) {
        Ok(count) => tracing::debug!(count, "message buttons bound"),
        Err(err) => tracing::warn!("message buttons disabled: {err}"),
    }

    bind_effects(scheduler, &config);

    let initial = navigation::initialize(&navigator);
    tracing::info!(section = %initial, "site ready");

    let site = Site {
        navigator,
        messaging: link,
        notifications,
    };
    SITE.with(|slot| *slot.borrow_mut() = Some(site.clone()));
    Ok(site)
}

fn bind_effects(scheduler: Rc<dyn Scheduler>, config: &SiteConfig) {
    match Effects::new(scheduler, config.sparkles) {
        Ok(fx) => {
            if let Err(err) = effects::bind_sparkles(&fx) {
                tracing::warn!("sparkles disabled: {err}");
            }
            match effects::bind_clicks(&fx) {
                Ok(count) => tracing::debug!(count, "click effects bound"),
                Err(err) => tracing::warn!("click effects disabled: {err}"),
            }
        }
        Err(err) => tracing::warn!("sparkle container unavailable: {err}"),
    }
    let floating = effects::mark_floating_accents();
    tracing::debug!(floating, "floating accents marked");

    match reveal::bind(&config.reveal) {
        Ok(count) => tracing::debug!(count, "scroll reveal observing"),
        Err(err) => tracing::warn!("scroll reveal disabled: {err}"),
    }
}

/// Navigate from outside the crate, e.g. an inline `onclick`.
pub fn show_section(id: &str) -> Result<NavigationOutcome, NavigationError> {
    match site() {
        Some(site) => site.navigator.navigate_to(id),
        None => {
            tracing::warn!(section = id, "navigation requested before boot");
            Ok(NavigationOutcome::Ignored(IgnoreReason::UnknownSection))
        }
    }
}
