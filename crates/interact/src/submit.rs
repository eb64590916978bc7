//! Contact form submission: one POST, one notification, and a submit button
//! that is always handed back in the state it was found.

use std::rc::Rc;

use askama::Template;
use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    Document, FormPayload, INQUIRY_TYPE_ID, Notifier, Selector, Settings, Variant,
    render_fields_for, sync_phone_field,
};

pub const CONTACT_FORM_ID: &str = "contactForm";

const BUSY_LABEL: &str = "Sending...";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Page(#[from] crate::Error),
}

/// Body returned by the email endpoint, whatever the status code.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SendEmailResponse {
    /// The server message on success, [`SubmitError::Rejected`] otherwise.
    pub fn parse(body: &str) -> Result<String, SubmitError> {
        let response: SendEmailResponse = serde_json::from_str(body)?;
        if response.success {
            return Ok(response.message.unwrap_or_default());
        }
        Err(SubmitError::Rejected(
            response
                .message
                .unwrap_or_else(|| "Failed to send message".to_owned()),
        ))
    }
}

#[async_trait(?Send)]
pub trait Transport: 'static {
    /// Posts `payload` as multipart form data and yields the raw response body.
    async fn post_form(&self, endpoint: &str, payload: FormPayload) -> Result<String, SubmitError>;
}

#[derive(Template)]
#[template(path = "busy.html")]
struct BusyTemplate<'a> {
    label: &'a str,
}

/// Disables a button and swaps in the busy indicator until dropped.
struct BusyButton<D: Document> {
    doc: Rc<D>,
    button: D::Element,
    original: String,
}

impl<D: Document> BusyButton<D> {
    fn begin(doc: Rc<D>, button: D::Element) -> crate::Result<Self> {
        let busy = BusyTemplate { label: BUSY_LABEL }.render()?;
        let original = doc.inner_html(&button);
        doc.set_disabled(&button, true);
        doc.set_inner_html(&button, &busy);

        Ok(Self {
            doc,
            button,
            original,
        })
    }
}

impl<D: Document> Drop for BusyButton<D> {
    fn drop(&mut self) {
        self.doc.set_disabled(&self.button, false);
        self.doc.set_inner_html(&self.button, &self.original);
    }
}

pub struct SubmissionController<D: Document, T: Transport> {
    doc: Rc<D>,
    transport: Rc<T>,
    notifier: Notifier<D>,
    settings: Rc<Settings>,
}

impl<D: Document, T: Transport> Clone for SubmissionController<D, T> {
    fn clone(&self) -> Self {
        Self {
            doc: self.doc.clone(),
            transport: self.transport.clone(),
            notifier: self.notifier.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<D: Document, T: Transport> SubmissionController<D, T> {
    pub fn new(doc: Rc<D>, transport: Rc<T>, notifier: Notifier<D>, settings: Rc<Settings>) -> Self {
        Self {
            doc,
            transport,
            notifier,
            settings,
        }
    }

    /// Submit listener body: stops the navigation and runs [`Self::submit`]
    /// in the background.
    pub fn handle_submit(&self, event: D::Event) {
        self.doc.prevent_default(&event);

        let Some(form) = self
            .doc
            .current_target(&event)
            .or_else(|| self.doc.element_by_id(CONTACT_FORM_ID))
        else {
            return;
        };

        if self
            .submit_button(&form)
            .is_some_and(|button| self.doc.is_disabled(&button))
        {
            tracing::debug!("submission already in flight");
            return;
        }

        let controller = self.clone();
        self.doc.spawn_local(Box::pin(async move {
            // the outcome has already been shown to the visitor
            let _ = controller.submit(form).await;
        }));
    }

    /// Sends the form and reports the outcome with a notification.
    ///
    /// Returns the server message on success. Every failure, including a
    /// declared `success: false`, ends in the same error notification.
    pub async fn submit(&self, form: D::Element) -> Result<String, SubmitError> {
        let busy = match self.submit_button(&form) {
            Some(button) => Some(BusyButton::begin(self.doc.clone(), button)?),
            None => None,
        };

        let outcome = self.send(&form).await;

        match &outcome {
            Ok(message) => self.on_success(&form, message),
            Err(err) => self.on_failure(err),
        }

        drop(busy);

        outcome
    }

    fn submit_button(&self, form: &D::Element) -> Option<D::Element> {
        self.doc.query_within(
            form,
            &Selector::tag("button").and(Selector::attr_eq("type", "submit")),
        )
    }

    async fn send(&self, form: &D::Element) -> Result<String, SubmitError> {
        let payload = self.doc.form_payload(form);
        tracing::debug!(fields = payload.len(), endpoint = %self.settings.endpoint, "submitting contact form");

        let body = self
            .transport
            .post_form(&self.settings.endpoint, payload)
            .await?;

        SendEmailResponse::parse(&body)
    }

    fn on_success(&self, form: &D::Element, message: &str) {
        let text = if message.is_empty() {
            "Success! Your message has been sent.".to_owned()
        } else {
            format!("Success! {message}")
        };

        if let Err(err) = self.notifier.present(&text, Variant::Success) {
            tracing::error!("unable to present notification: {err}");
        }
        self.doc.reset_form(form);
        if let Err(err) = self.sync_after_reset() {
            tracing::error!("unable to refresh form after reset: {err}");
        }
        self.doc.scroll_to_top();

        tracing::info!("contact form sent");
    }

    /// A reset changes the inquiry type and response method without firing
    /// `change`, so the fields derived from them are rebuilt here.
    fn sync_after_reset(&self) -> crate::Result<()> {
        let inquiry_type = self
            .doc
            .element_by_id(INQUIRY_TYPE_ID)
            .map(|select| self.doc.value(&select))
            .unwrap_or_default();
        render_fields_for(self.doc.as_ref(), &inquiry_type)?;
        sync_phone_field(self.doc.as_ref())?;
        Ok(())
    }

    fn on_failure(&self, err: &SubmitError) {
        tracing::error!("contact form submission failed: {err}");

        let text = format!(
            "Oops! Failed to send message. Please try again or email directly at {}",
            self.settings.fallback_email
        );
        if let Err(err) = self.notifier.present(&text, Variant::Error) {
            tracing::error!("unable to present notification: {err}");
        }
    }
}
