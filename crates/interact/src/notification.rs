use std::{rc::Rc, time::Duration};

use askama::Template;
use strum::{AsRefStr, Display};

use crate::{Document, EventKind, Result, Selector, Settings};

pub const NOTIFICATION_CLASS: &str = "notification-popup";
pub const DISMISS_ATTRIBUTE: &str = "data-dismiss";

const ENTER_ANIMATION: &str = "slideDown 0.5s ease-out";
const EXIT_ANIMATION: &str = "slideDown 0.5s ease-out reverse";

#[derive(AsRefStr, Display, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    Success,
    Error,
    Info,
}

impl Variant {
    pub fn title(self) -> &'static str {
        match self {
            Variant::Success => "Message Sent!",
            Variant::Error => "Error",
            Variant::Info => "Heads up",
        }
    }

    fn palette(self) -> &'static str {
        match self {
            Variant::Success => "bg-green-500 text-white",
            Variant::Error => "bg-red-500 text-white",
            Variant::Info => "bg-blue-500 text-white",
        }
    }
}

#[derive(Template)]
#[template(path = "notification.html")]
struct NotificationTemplate<'a> {
    variant: Variant,
    title: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "close-button.html")]
struct CloseButtonTemplate;

/// Single-slot toast display: presenting a notification replaces any other.
pub struct Notifier<D: Document> {
    doc: Rc<D>,
    timeout: Duration,
    exit: Duration,
}

impl<D: Document> Clone for Notifier<D> {
    fn clone(&self) -> Self {
        Self {
            doc: self.doc.clone(),
            timeout: self.timeout,
            exit: self.exit,
        }
    }
}

impl<D: Document> Notifier<D> {
    pub fn new(doc: Rc<D>, settings: &Settings) -> Self {
        Self {
            doc,
            timeout: settings.notification_timeout(),
            exit: settings.exit_animation(),
        }
    }

    pub fn present(&self, message: &str, variant: Variant) -> Result<D::Element> {
        let doc = &self.doc;
        for existing in doc.query_all(&Selector::class(NOTIFICATION_CLASS)) {
            doc.remove(&existing);
        }

        let body = doc
            .body()
            .ok_or_else(|| crate::Error::MissingElement("body".to_owned()))?;

        let notification = doc.create_element("div")?;
        doc.set_class_name(
            &notification,
            &format!(
                "{NOTIFICATION_CLASS} fixed top-20 left-1/2 transform -translate-x-1/2 z-50 p-6 rounded-lg shadow-2xl max-w-md w-full mx-4 {}",
                variant.palette()
            ),
        );
        doc.set_attribute(&notification, "role", "status")?;
        doc.set_attribute(&notification, "data-variant", variant.as_ref())?;
        doc.set_style(&notification, "animation", ENTER_ANIMATION)?;
        doc.set_inner_html(
            &notification,
            &NotificationTemplate {
                variant,
                title: variant.title(),
                message,
            }
            .render()?,
        );

        let close = doc.create_element("button")?;
        doc.set_attribute(&close, "type", "button")?;
        doc.set_attribute(&close, "aria-label", "Close")?;
        doc.set_attribute(&close, DISMISS_ATTRIBUTE, "notification")?;
        doc.set_class_name(&close, "absolute top-4 right-4 text-white hover:text-gray-200");
        doc.set_inner_html(&close, &CloseButtonTemplate.render()?);
        doc.append_child(&notification, &close)?;

        let dismiss_doc = self.doc.clone();
        let dismiss_target = notification.clone();
        doc.add_listener(
            &close,
            EventKind::Click,
            Box::new(move |_| dismiss_doc.remove(&dismiss_target)),
        )?;

        doc.append_child(&body, &notification)?;
        self.schedule_expiry(&notification)?;

        tracing::debug!(variant = %variant, "notification presented");

        Ok(notification)
    }

    /// Runs the exit animation after the display timeout, then detaches.
    /// Both steps are harmless on a notification that was already dismissed.
    fn schedule_expiry(&self, notification: &D::Element) -> Result<()> {
        let doc = self.doc.clone();
        let notification = notification.clone();
        let exit = self.exit;

        self.doc.set_timeout(
            self.timeout,
            Box::new(move || {
                if let Err(err) = doc.set_style(&notification, "animation", EXIT_ANIMATION) {
                    tracing::warn!("unable to start exit animation: {err}");
                }

                let remove_doc = doc.clone();
                let result = doc.set_timeout(
                    exit,
                    Box::new(move || remove_doc.remove(&notification)),
                );
                if let Err(err) = result {
                    tracing::warn!("unable to schedule notification removal: {err}");
                }
            }),
        )
    }
}
