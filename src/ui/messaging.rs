//! Open external messaging links and announce them to the page

use std::rc::Rc;

use web_sys::{CustomEvent, CustomEventInit, MouseEvent};

use crate::core::messaging::{MessagingLink, OPENED_EVENT, OpenedMessage};
use crate::ui::dom::{self, DomError, listen};

/// Open the messaging deep link for `text` in a new tab and dispatch
/// [`OPENED_EVENT`] on the document.
pub fn open_external_message(
    link: &MessagingLink,
    text: &str,
    recipient: Option<&str>,
) -> Result<(), DomError> {
    let url = link.url(text, recipient);
    let window = dom::window()?;
    window
        .open_with_url_and_target(&url, "_blank")
        .map_err(DomError::js)?;
    let phone = recipient.unwrap_or(&link.default_recipient);
    tracing::info!(%phone, "opened messaging link");

    let detail = OpenedMessage {
        message: text.to_string(),
        phone: phone.to_string(),
    };
    dispatch_opened(&detail)
}

fn dispatch_opened(detail: &OpenedMessage) -> Result<(), DomError> {
    let json = serde_json::to_string(detail).map_err(|err| DomError::Js(err.to_string()))?;
    let detail = js_sys::JSON::parse(&json).map_err(DomError::js)?;

    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event =
        CustomEvent::new_with_event_init_dict(OPENED_EVENT, &init).map_err(DomError::js)?;
    dom::document()?
        .dispatch_event(&event)
        .map_err(DomError::js)?;
    Ok(())
}

/// Elements that open a prefilled message on click
pub const MESSAGE_ATTR: &str = "data-message";

/// Wire every `[data-message]` element. Returns how many were bound.
pub fn bind(link: Rc<MessagingLink>) -> Result<usize, DomError> {
    let buttons = dom::query_all(&format!("[{MESSAGE_ATTR}]"));
    for button in &buttons {
        let Some(text) = button.get_attribute(MESSAGE_ATTR) else {
            continue;
        };
        let link = link.clone();
        listen(button, "click", move |event: MouseEvent| {
            event.prevent_default();
            if let Err(err) = open_external_message(&link, &text, None) {
                tracing::error!("failed to open messaging link: {err}");
            }
        })?;
    }
    Ok(buttons.len())
}
