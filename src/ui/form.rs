//! Contact form binding: inline validation and hand-off to messaging

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, FocusEvent, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use crate::core::form::{
    ContactSubmission, FieldKind, FormErrors, SUBMITTED_MESSAGE, validate_field,
};
use crate::core::messaging::MessagingLink;
use crate::ui::dom::{self, DomError, clear_styles, listen, set_styles};
use crate::ui::messaging::open_external_message;
use crate::ui::notifications::NotificationManager;

pub const FORM_ID: &str = "contactForm";
const FIELD_SELECTOR: &str = ".form-input, .form-select, .form-textarea";
const ERROR_CLASS: &str = "form-error";
const ERROR_BORDER: &str = "var(--color-danger)";

/// Current value of an input, select or textarea.
fn field_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    element
        .dyn_ref::<HtmlTextAreaElement>()
        .map(HtmlTextAreaElement::value)
}

fn field_kind(element: &Element) -> FieldKind {
    element
        .dyn_ref::<HtmlInputElement>()
        .map(|input| FieldKind::from_input_type(&input.type_()))
        .unwrap_or(FieldKind::Text)
}

/// Key used for error bookkeeping: the `name`, else the `id`.
fn field_key(element: &Element) -> String {
    element
        .get_attribute("name")
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| element.id())
}

fn clear_error(field: &Element) {
    clear_styles(field, &["border-color"]);
    if let Some(parent) = field.parent_element() {
        for error in dom::query_all_in(&parent, &format!(".{ERROR_CLASS}")) {
            error.remove();
        }
    }
}

fn show_error(field: &Element, message: &str) -> Result<(), DomError> {
    set_styles(field, &[("border-color", ERROR_BORDER)]);
    let Some(parent) = field.parent_element() else {
        return Ok(());
    };
    let error = dom::document()?
        .create_element("div")
        .map_err(DomError::js)?;
    error.set_class_name(ERROR_CLASS);
    error.set_text_content(Some(message));
    set_styles(
        &error,
        &[
            ("color", ERROR_BORDER),
            ("font-size", "0.875rem"),
            ("margin-top", "0.25rem"),
        ],
    );
    parent.append_child(&error).map_err(DomError::js)?;
    Ok(())
}

fn validate(field: &Element, errors: &RefCell<FormErrors>) {
    let value = field_value(field).unwrap_or_default();
    let result = validate_field(&value, field_kind(field), field.has_attribute("required"));
    clear_error(field);
    if let Err(error) = &result {
        if let Err(err) = show_error(field, &error.to_string()) {
            tracing::warn!("could not render field error: {err}");
        }
    }
    errors.borrow_mut().record(&field_key(field), result);
}

/// Read the named fields out of `form`.
fn read_submission(form: &HtmlFormElement) -> ContactSubmission {
    ContactSubmission::from_fields(|name| {
        form.query_selector(&format!("[name=\"{name}\"]"))
            .ok()
            .flatten()
            .and_then(|element| field_value(&element))
    })
}

/// Wire the contact form. Returns `Ok(false)` when the page has none.
pub fn bind(
    link: Rc<MessagingLink>,
    notifications: NotificationManager,
    dismiss_ms: u32,
) -> Result<bool, DomError> {
    let Ok(form) = dom::element_by_id(FORM_ID) else {
        tracing::debug!("no contact form on this page");
        return Ok(false);
    };
    let form: HtmlFormElement = form
        .dyn_into()
        .map_err(|_| DomError::ElementMissing(format!("#{FORM_ID} is not a form")))?;

    let errors = Rc::new(RefCell::new(FormErrors::new()));
    for field in dom::query_all_in(&form, FIELD_SELECTOR) {
        {
            let errors = errors.clone();
            let target = field.clone();
            listen(&field, "blur", move |_: FocusEvent| validate(&target, &errors))?;
        }
        {
            let errors = errors.clone();
            let target = field.clone();
            listen(&field, "input", move |_: Event| {
                clear_error(&target);
                errors.borrow_mut().clear(&field_key(&target));
            })?;
        }
    }

    let target = form.clone();
    listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        let submission = read_submission(&target);
        let message = submission.compose_message();
        match open_external_message(&link, &message, None) {
            Ok(()) => {
                notifications.success(SUBMITTED_MESSAGE, dismiss_ms);
                target.reset();
                let cleared = errors.borrow_mut().reset();
                for field in dom::query_all_in(&target, FIELD_SELECTOR) {
                    clear_error(&field);
                }
                tracing::debug!(cleared = cleared.len(), "contact form reset");
            }
            Err(err) => {
                tracing::error!("contact form hand-off failed: {err}");
                notifications.error("Could not open WhatsApp. Please try again.", dismiss_ms);
            }
        }
    })?;
    tracing::info!("contact form bound");
    Ok(true)
}
