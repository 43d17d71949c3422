//! Toast notifications rendered with Leptos
//!
//! The container is mounted once on `<body>`; everything else pushes
//! [`Notification`]s through a [`NotificationManager`].

use std::collections::VecDeque;

use leptos::prelude::*;

use crate::core::notification::{EXIT_ANIMATION_MS, Notification, NotificationKind};
use crate::ui::dom;

/// Maximum number of notifications to show at once
const MAX_NOTIFICATIONS: usize = 5;

const STYLESHEET_ID: &str = "notification-styles";
const STYLESHEET: &str = r#"
.notifications-container {
    position: fixed;
    top: 100px;
    right: 20px;
    z-index: 10000;
    display: flex;
    flex-direction: column;
    gap: 10px;
}
.notification {
    padding: 1rem 1.5rem;
    border-radius: 8px;
    color: white;
    font-weight: 500;
    max-width: 400px;
    box-shadow: 0 10px 25px rgba(0, 0, 0, 0.15);
    animation: slideInRight 0.3s ease-out;
    transition: all 0.3s ease-out;
}
.notification-success { background: var(--color-success, #10b981); }
.notification-error { background: var(--color-danger, #ef4444); }
.notification-info { background: var(--color-primary, #3b82f6); }
@keyframes slideInRight {
    from { opacity: 0; transform: translateX(100%); }
    to { opacity: 1; transform: translateX(0); }
}
"#;

#[derive(Clone, Debug)]
pub struct NotificationItem {
    pub id: u64,
    pub notification: Notification,
}

#[component]
pub fn NotificationsContainer(
    notifications: RwSignal<VecDeque<NotificationItem>>,
) -> impl IntoView {
    view! {
        <div class="notifications-container">
            <For
                each=move || notifications.get()
                key=|item| item.id
                children=move |item| {
                    view! {
                        <NotificationToast
                            notification=item.notification
                            id=item.id
                            notifications=notifications
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
fn NotificationToast(
    notification: Notification,
    id: u64,
    notifications: RwSignal<VecDeque<NotificationItem>>,
) -> impl IntoView {
    let (is_exiting, set_is_exiting) = signal(false);

    if let Some(ms) = notification.auto_dismiss_ms {
        use gloo_timers::future::TimeoutFuture;
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            TimeoutFuture::new(ms).await;
            set_is_exiting.set(true);
            TimeoutFuture::new(EXIT_ANIMATION_MS).await;
            notifications.update(|n| n.retain(|i| i.id != id));
        });
    }

    let class = format!("notification {}", notification.kind.css_class());
    let role = match notification.kind {
        NotificationKind::Error => "alert",
        NotificationKind::Success | NotificationKind::Info => "status",
    };

    view! {
        <div
            class=class
            role=role
            style=move || {
                if is_exiting.get() {
                    "opacity: 0; transform: translateX(100%);"
                } else {
                    "opacity: 1; transform: translateX(0);"
                }
            }
        >
            {notification.message}
        </div>
    }
}

/// Handle for pushing notifications. Copies share the same queue.
#[derive(Clone, Copy)]
pub struct NotificationManager {
    notifications: RwSignal<VecDeque<NotificationItem>>,
    next_id: RwSignal<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(VecDeque::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Inject the toast styles and mount the container on `<body>`.
    pub fn mount(self) -> Self {
        if let Err(err) = dom::ensure_stylesheet(STYLESHEET_ID, STYLESHEET) {
            tracing::warn!("notification styles not injected: {err}");
        }
        let notifications = self.notifications;
        leptos::mount::mount_to_body(move || {
            view! { <NotificationsContainer notifications=notifications /> }
        });
        self
    }

    pub fn notify(&self, notification: Notification) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.notifications.update(|n| {
            n.push_back(NotificationItem { id, notification });
            while n.len() > MAX_NOTIFICATIONS {
                n.pop_front();
            }
        });
    }

    pub fn success(&self, message: impl Into<String>, dismiss_ms: u32) {
        self.notify(Notification::success(message).with_dismiss(Some(dismiss_ms)));
    }

    pub fn error(&self, message: impl Into<String>, dismiss_ms: u32) {
        self.notify(Notification::error(message).with_dismiss(Some(dismiss_ms)));
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
