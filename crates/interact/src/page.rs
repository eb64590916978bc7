use std::rc::Rc;

use crate::{
    CONTACT_FORM_ID, Document, EventKind, FILTER_ATTRIBUTE, FILTER_BUTTON_CLASS,
    INQUIRY_TYPE_ID, Notifier, Result, SEARCH_INPUT_ID, Selector, Settings,
    SubmissionController, Transport, Variant, error::log_failure, fields, filter, ui,
};

pub const PUBLICATION_FILTER_CLASS: &str = "publication-filter";

const LOAD_MORE_MESSAGE: &str = "More publications will appear here as they are published.";

fn action(name: &str) -> Selector {
    Selector::attr_eq("data-action", name)
}

/// The interaction layer bound to one page.
///
/// [`Page::init`] registers every listener once; afterwards only user
/// events drive it.
pub struct Page<D: Document, T: Transport> {
    doc: Rc<D>,
    settings: Rc<Settings>,
    notifier: Notifier<D>,
    submission: SubmissionController<D, T>,
}

impl<D: Document, T: Transport> Page<D, T> {
    pub fn new(doc: Rc<D>, transport: Rc<T>, settings: Settings) -> Self {
        let settings = Rc::new(settings);
        let notifier = Notifier::new(doc.clone(), &settings);
        let submission =
            SubmissionController::new(doc.clone(), transport, notifier.clone(), settings.clone());

        Self {
            doc,
            settings,
            notifier,
            submission,
        }
    }

    pub fn notifier(&self) -> &Notifier<D> {
        &self.notifier
    }

    pub fn submission(&self) -> &SubmissionController<D, T> {
        &self.submission
    }

    /// Wires every section present on the page. Sections whose elements are
    /// missing are skipped.
    pub fn init(&self) -> Result<()> {
        self.wire_contact_form()?;
        self.wire_inquiry_type()?;
        self.wire_response_method()?;
        self.wire_filters()?;
        self.wire_search()?;
        self.wire_mobile_menu()?;
        self.wire_anchor_links()?;
        self.wire_loading_buttons()?;
        self.wire_courses()?;
        self.wire_load_more()?;

        tracing::info!("Academic portfolio initialized");

        Ok(())
    }

    fn listen(
        &self,
        element: &D::Element,
        kind: EventKind,
        handler: impl Fn(D::Event) + 'static,
    ) -> Result<()> {
        self.doc.add_listener(element, kind, Box::new(handler))
    }

    fn wire_contact_form(&self) -> Result<()> {
        let Some(form) = self.doc.element_by_id(CONTACT_FORM_ID) else {
            return Ok(());
        };
        let submission = self.submission.clone();
        self.listen(&form, EventKind::Submit, move |event| {
            submission.handle_submit(event)
        })
    }

    fn wire_inquiry_type(&self) -> Result<()> {
        let Some(select) = self.doc.element_by_id(INQUIRY_TYPE_ID) else {
            return Ok(());
        };
        let doc = self.doc.clone();
        self.listen(&select, EventKind::Change, move |event| {
            let Some(select) = doc.current_target(&event) else {
                return;
            };
            let value = doc.value(&select);
            log_failure(
                "render dynamic fields",
                fields::render_fields_for(doc.as_ref(), &value).map(|_| ()),
            );
        })
    }

    fn wire_response_method(&self) -> Result<()> {
        for radio in self.doc.query_all(&fields::response_method_selector()) {
            let doc = self.doc.clone();
            self.listen(&radio, EventKind::Change, move |_| {
                log_failure(
                    "toggle phone field",
                    fields::sync_phone_field(doc.as_ref()).map(|_| ()),
                );
            })?;
        }
        Ok(())
    }

    fn wire_filters(&self) -> Result<()> {
        for button in self.doc.query_all(&Selector::class(FILTER_BUTTON_CLASS)) {
            let doc = self.doc.clone();
            self.listen(&button, EventKind::Click, move |event| {
                let Some(button) = doc.current_target(&event) else {
                    return;
                };
                let Some(filter) = doc.attribute(&button, FILTER_ATTRIBUTE) else {
                    return;
                };
                let result = if doc.has_class(&button, PUBLICATION_FILTER_CLASS) {
                    filter::filter_by_type(doc.as_ref(), &filter)
                } else {
                    filter::filter_by_category(doc.as_ref(), &filter)
                };
                log_failure("filter list", result.map(|_| ()));
            })?;
        }

        for reset in self.doc.query_all(&action("reset-filters")) {
            let doc = self.doc.clone();
            self.listen(&reset, EventKind::Click, move |_| {
                log_failure("reset filters", filter::reset_filters(doc.as_ref()));
            })?;
        }

        Ok(())
    }

    fn wire_search(&self) -> Result<()> {
        let Some(input) = self.doc.element_by_id(SEARCH_INPUT_ID) else {
            return Ok(());
        };
        let doc = self.doc.clone();
        self.listen(&input, EventKind::Input, move |event| {
            let Some(input) = doc.current_target(&event) else {
                return;
            };
            let term = doc.value(&input);
            log_failure(
                "search projects",
                filter::search_by_text(doc.as_ref(), &term).map(|_| ()),
            );
        })
    }

    fn wire_mobile_menu(&self) -> Result<()> {
        for toggle in self.doc.query_all(&action("toggle-mobile-menu")) {
            let doc = self.doc.clone();
            self.listen(&toggle, EventKind::Click, move |_| {
                log_failure(
                    "toggle mobile menu",
                    ui::toggle_mobile_menu(doc.as_ref()).map(|_| ()),
                );
            })?;
        }
        Ok(())
    }

    fn wire_anchor_links(&self) -> Result<()> {
        let anchors = Selector::tag("a").and(Selector::attr_prefix("href", "#"));
        for link in self.doc.query_all(&anchors) {
            let doc = self.doc.clone();
            self.listen(&link, EventKind::Click, move |event| {
                doc.prevent_default(&event);
                let href = doc
                    .current_target(&event)
                    .and_then(|link| doc.attribute(&link, "href"))
                    .unwrap_or_default();
                ui::scroll_to_anchor(doc.as_ref(), &href);
            })?;
        }
        Ok(())
    }

    fn wire_loading_buttons(&self) -> Result<()> {
        for button in self.doc.query_all(&ui::loading_buttons_selector()) {
            if !ui::wants_loading_state(&self.doc.text_content(&button)) {
                continue;
            }
            let doc = self.doc.clone();
            let duration = self.settings.loading_state();
            self.listen(&button, EventKind::Click, move |event| {
                let Some(button) = doc.current_target(&event) else {
                    return;
                };
                log_failure(
                    "loading state",
                    ui::begin_loading_state(&doc, &button, duration),
                );
            })?;
        }
        Ok(())
    }

    fn wire_courses(&self) -> Result<()> {
        for course in self.doc.query_all(&Selector::attr("data-course")) {
            let doc = self.doc.clone();
            self.listen(&course, EventKind::Click, move |event| {
                let course_id = doc
                    .current_target(&event)
                    .and_then(|course| doc.attribute(&course, "data-course"))
                    .unwrap_or_default();
                ui::expand_course(doc.as_ref(), &course_id);
            })?;
        }
        Ok(())
    }

    fn wire_load_more(&self) -> Result<()> {
        for button in self.doc.query_all(&action("load-more-publications")) {
            let notifier = self.notifier.clone();
            self.listen(&button, EventKind::Click, move |_| {
                tracing::info!("loading more publications");
                log_failure(
                    "load more publications",
                    notifier.present(LOAD_MORE_MESSAGE, Variant::Info).map(|_| ()),
                );
            })?;
        }
        Ok(())
    }
}
