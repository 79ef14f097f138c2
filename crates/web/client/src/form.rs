//! Contact form: inline validation and a single POST on submit.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement};

use crate::dom;
use crate::error::{PageError, Result};
use crate::validation::{FieldError, FormField};

const FIELD_NORMAL_CLASSES: &[&str] = &[
    "border-kemet-charcoal",
    "focus:ring-kemet-gold",
    "dark:border-dark-border",
    "dark:focus:ring-dark-accent",
];
const FIELD_ERROR_CLASSES: &[&str] = &["border-red-500", "focus:ring-red-500"];
const FIELD_ERROR_MESSAGE_CLASS: &str = "text-red-600 text-sm mt-1 font-medium";

/// Status line shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Invalid,
    Sending,
    Sent,
    Failed,
}

impl FormStatus {
    pub fn message(self) -> &'static str {
        match self {
            FormStatus::Invalid => "Please correct the errors above and try again.",
            FormStatus::Sending => "Sending your message...",
            FormStatus::Sent => "Thank you for your message! I'll get back to you soon.",
            FormStatus::Failed => {
                "Sorry, there was a problem sending your message. Please try again later."
            }
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            FormStatus::Invalid | FormStatus::Failed => "text-center mt-4 text-red-600 font-medium",
            FormStatus::Sending => "text-center mt-4 text-kemet-blue font-medium",
            FormStatus::Sent => "text-center mt-4 text-kemet-green font-medium",
        }
    }
}

/// Named field values captured from the form at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSubmission {
    fields: Vec<(String, String)>,
}

impl ContactSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Run every field rule; all fields are checked so every error can be shown.
    pub fn validate(&self) -> Vec<(FormField, std::result::Result<(), FieldError>)> {
        FormField::ALL
            .into_iter()
            .map(|field| (field, field.validate(self.value(field.name()).unwrap_or(""))))
            .collect()
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(&self.fields)?)
    }
}

/// Sends the encoded form. `Ok` only for an HTTP-OK response.
#[allow(async_fn_in_trait)]
pub trait FormTransport {
    async fn post_form(&self, endpoint: &str, body: String) -> Result<()>;
}

/// What the submission flow shows to the user.
pub trait FormView {
    fn show_status(&self, status: FormStatus);
    fn show_field_error(&self, field: FormField, error: FieldError);
    fn clear_field_error(&self, field: FormField);
    fn reset(&self);
}

/// Validate, then make exactly one POST if everything passed.
///
/// Returns the final status shown.
pub async fn submit_contact_form<T, V>(
    transport: &T,
    view: &V,
    endpoint: &str,
    submission: &ContactSubmission,
) -> FormStatus
where
    T: FormTransport,
    V: FormView,
{
    let mut valid = true;
    for (field, outcome) in submission.validate() {
        view.clear_field_error(field);
        if let Err(error) = outcome {
            view.show_field_error(field, error);
            valid = false;
        }
    }
    if !valid {
        view.show_status(FormStatus::Invalid);
        return FormStatus::Invalid;
    }

    view.show_status(FormStatus::Sending);

    let sent = match submission.encode() {
        Ok(body) => transport.post_form(endpoint, body).await,
        Err(e) => Err(e),
    };

    match sent {
        Ok(()) => {
            tracing::info!("contact form sent");
            view.show_status(FormStatus::Sent);
            view.reset();
            for field in FormField::ALL {
                view.clear_field_error(field);
            }
            FormStatus::Sent
        }
        Err(e) => {
            tracing::warn!("contact form submission failed: {e}");
            view.show_status(FormStatus::Failed);
            FormStatus::Failed
        }
    }
}

/// `fetch` POST with form-encoded body and a JSON `Accept` header.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl FormTransport for FetchTransport {
    async fn post_form(&self, endpoint: &str, body: String) -> Result<()> {
        let headers = web_sys::Headers::new()?;
        headers.set("Accept", "application/json")?;
        headers.set("Content-Type", "application/x-www-form-urlencoded")?;

        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&body.into());

        let request = web_sys::Request::new_with_str_and_init(endpoint, &init)?;
        let response = JsFuture::from(dom::window()?.fetch_with_request(&request)).await?;
        let response: web_sys::Response = response.dyn_into()?;
        if !response.ok() {
            return Err(PageError::Http(response.status()));
        }
        Ok(())
    }
}

/// Renders form state into the page.
#[derive(Clone)]
pub struct DomFormView {
    document: Document,
    form: HtmlFormElement,
    status: Option<Element>,
}

impl DomFormView {
    pub fn new(document: &Document, form: HtmlFormElement) -> Self {
        Self {
            document: document.clone(),
            status: document.get_element_by_id("form-status"),
            form,
        }
    }

    fn field_element(&self, field: FormField) -> Option<Element> {
        self.document.get_element_by_id(field.name())
    }

    /// The form's entry list, as `new FormData(form)` builds it: buttons,
    /// unchecked boxes and disabled controls are left out. File entries are
    /// skipped.
    pub fn capture(&self) -> Result<ContactSubmission> {
        let data = web_sys::FormData::new_with_form(&self.form)?;
        let mut submission = ContactSubmission::new();
        let Some(entries) = js_sys::try_iter(&data)? else {
            return Ok(submission);
        };
        for entry in entries {
            let pair: js_sys::Array = entry?.dyn_into()?;
            let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string())
            else {
                continue;
            };
            submission = submission.with_field(name, value);
        }
        Ok(submission)
    }
}

impl FormView for DomFormView {
    fn show_status(&self, status: FormStatus) {
        if let Some(el) = &self.status {
            el.set_text_content(Some(status.message()));
            el.set_class_name(status.class_name());
        }
    }

    fn show_field_error(&self, field: FormField, error: FieldError) {
        if let Some(el) = self.field_element(field) {
            if let Err(e) = show_field_error(&self.document, &el, &error.to_string()) {
                tracing::warn!("failed to show error for {}: {e}", field.name());
            }
        }
    }

    fn clear_field_error(&self, field: FormField) {
        if let Some(el) = self.field_element(field) {
            if let Err(e) = clear_field_error(&self.document, &el) {
                tracing::warn!("failed to clear error for {}: {e}", field.name());
            }
        }
    }

    fn reset(&self) {
        self.form.reset();
    }
}

fn error_id(field: &Element) -> String {
    format!("error-{}", field.id())
}

/// Mark `field` invalid and add its message below it (at most once).
pub fn show_field_error(document: &Document, field: &Element, message: &str) -> Result<()> {
    dom::add_classes(field, FIELD_ERROR_CLASSES)?;
    dom::remove_classes(field, FIELD_NORMAL_CLASSES)?;

    let Some(container) = field.parent_element() else {
        return Ok(());
    };
    let id = error_id(field);
    if container.query_selector(&format!("#{id}"))?.is_some() {
        return Ok(());
    }
    let error_div = document.create_element("div")?;
    error_div.set_class_name(FIELD_ERROR_MESSAGE_CLASS);
    error_div.set_text_content(Some(message));
    error_div.set_id(&id);
    container.append_child(&error_div)?;
    Ok(())
}

pub fn clear_field_error(document: &Document, field: &Element) -> Result<()> {
    dom::remove_classes(field, FIELD_ERROR_CLASSES)?;
    dom::add_classes(field, FIELD_NORMAL_CLASSES)?;
    if let Some(error_div) = document.get_element_by_id(&error_id(field)) {
        error_div.remove();
    }
    Ok(())
}

/// Validate one field in place, showing or clearing its inline error.
pub fn validate_element(document: &Document, field: &Element) -> Result<bool> {
    clear_field_error(document, field)?;
    let name = field.get_attribute("name").unwrap_or_default();
    match crate::validation::validate_field(&name, &dom::control_value(field)) {
        Ok(()) => Ok(true),
        Err(error) => {
            show_field_error(document, field, &error.to_string())?;
            Ok(false)
        }
    }
}

/// Wire `#contact-form`: blur validates, input clears, submit posts.
pub fn setup_contact_form(document: &Document) -> Result<()> {
    let Some(form) = document
        .get_element_by_id("contact-form")
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };

    for field in FormField::ALL {
        let Some(el) = dom::html_by_id(document, field.name()) else {
            continue;
        };
        let blur_doc = document.clone();
        let blur_el = el.clone();
        dom::on(&el, "blur", move |_| {
            if let Err(e) = validate_element(&blur_doc, &blur_el) {
                tracing::warn!("field validation failed: {e}");
            }
        })?;
        let input_doc = document.clone();
        let input_el: HtmlElement = el.clone();
        dom::on(&el, "input", move |_| {
            if let Err(e) = clear_field_error(&input_doc, &input_el) {
                tracing::warn!("clearing field error failed: {e}");
            }
        })?;
    }

    let view = DomFormView::new(document, form.clone());
    dom::on(&form, "submit", move |event| {
        event.prevent_default();
        let submission = match view.capture() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("could not read contact form: {e}");
                view.show_status(FormStatus::Failed);
                return;
            }
        };
        let view = view.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let endpoint = view.form.action();
            submit_contact_form(&FetchTransport, &view, &endpoint, &submission).await;
        });
    })
}
