//! Transient toast notifications

/// Default time a toast stays on screen
pub const DEFAULT_DISMISS_MS: u32 = 3000;

/// Exit animation length before a dismissed toast is removed
pub const EXIT_ANIMATION_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// CSS modifier class, e.g. `notification-success`
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification-success",
            NotificationKind::Error => "notification-error",
            NotificationKind::Info => "notification-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub auto_dismiss_ms: Option<u32>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            auto_dismiss_ms: Some(DEFAULT_DISMISS_MS),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn with_dismiss(mut self, auto_dismiss_ms: Option<u32>) -> Self {
        self.auto_dismiss_ms = auto_dismiss_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dismiss() {
        let notification = Notification::success("Sent");
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.auto_dismiss_ms, Some(DEFAULT_DISMISS_MS));
    }

    #[test]
    fn test_sticky_notification() {
        let notification = Notification::error("Failed").with_dismiss(None);
        assert_eq!(notification.auto_dismiss_ms, None);
        assert_eq!(notification.kind.css_class(), "notification-error");
    }

    #[test]
    fn test_kind_classes_are_distinct() {
        let classes = [
            NotificationKind::Success.css_class(),
            NotificationKind::Error.css_class(),
            NotificationKind::Info.css_class(),
        ];
        assert_eq!(classes, ["notification-success", "notification-error", "notification-info"]);
    }
}
