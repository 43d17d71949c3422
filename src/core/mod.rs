//! Target-independent behavior: state machines, rules and geometry
//!
//! Nothing here touches the DOM. Browser adapters in `ui` implement the
//! view traits and the [`Scheduler`].

pub mod config;
pub mod counter;
pub mod effects;
pub mod entrance;
pub mod form;
pub mod menu;
pub mod messaging;
pub mod navigation;
pub mod notification;
pub mod reveal;
pub mod scheduler;
pub mod section;

pub use config::{ConfigError, SiteConfig};
pub use counter::{CounterAnimation, CounterFrame};
pub use effects::{Point, RandomSource, Rect, Ripple, ScrollSparkles, Throttle};
pub use entrance::{EntrancePhase, EntranceView, LandingEntrance};
pub use form::{ContactSubmission, FieldError, FieldKind, FormErrors, validate_field};
pub use menu::{ClickOrigin, MenuView, MobileMenu};
pub use messaging::MessagingLink;
pub use navigation::{
    NavigationError, NavigationOutcome, NavigationState, Navigator, SectionView, TransitionPhase,
};
pub use notification::{Notification, NotificationKind};
pub use reveal::RevealTracker;
pub use scheduler::{Scheduler, Task};
pub use section::{SectionId, SectionRegistry};
