//! External messaging deep links
//!
//! Form content is handed off to a chat app instead of a server:
//! `https://{host}/{recipient}?text={encoded}`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MESSAGING_HOST: &str = "wa.me";
pub const DEFAULT_RECIPIENT: &str = "919324090425";

/// Name of the document event dispatched after a link is opened
pub const OPENED_EVENT: &str = "externalmessageopened";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessagingLink {
    pub host: String,
    pub default_recipient: String,
}

impl Default for MessagingLink {
    fn default() -> Self {
        Self {
            host: DEFAULT_MESSAGING_HOST.to_string(),
            default_recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

impl MessagingLink {
    /// Build the deep link for `text`. `None` uses the default recipient.
    pub fn url(&self, text: &str, recipient: Option<&str>) -> String {
        let recipient = recipient.unwrap_or(&self.default_recipient);
        format!(
            "https://{}/{}?text={}",
            self.host,
            recipient,
            urlencoding::encode(text)
        )
    }
}

/// Detail payload of the [`OPENED_EVENT`] event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenedMessage {
    pub message: String,
    pub phone: String,
}
