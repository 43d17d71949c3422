//! Browser adapters for the `core` controllers

pub mod dom;
pub mod effects;
pub mod entrance;
pub mod form;
pub mod menu;
pub mod messaging;
pub mod navigation;
pub mod notifications;
pub mod reveal;
pub mod scheduler;

pub use dom::DomError;
pub use notifications::{NotificationManager, NotificationsContainer};
pub use scheduler::BrowserScheduler;
