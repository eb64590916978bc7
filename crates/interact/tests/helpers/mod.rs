#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use async_trait::async_trait;
use futures::channel::oneshot;
use scholarfolio_interact::{
    Document, FormPayload, MemoryDocument, NOTIFICATION_CLASS, Page, Selector, Settings, SubmitError,
    Transport, memory::NodeRef,
};

type Reply = Result<String, SubmitError>;

/// Transport whose responses are handed out by the test, one per request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<oneshot::Receiver<Reply>>>,
    requests: RefCell<Vec<(String, FormPayload)>>,
}

impl ScriptedTransport {
    /// Queues a pending response; the request completes once the sender fires.
    pub fn expect(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(rx);
        tx
    }

    pub fn respond_with(&self, reply: Reply) {
        let _ = self.expect().send(reply);
    }

    pub fn requests(&self) -> Vec<(String, FormPayload)> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn post_form(&self, endpoint: &str, payload: FormPayload) -> Reply {
        self.requests
            .borrow_mut()
            .push((endpoint.to_owned(), payload));

        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(reply) => reply
                .await
                .unwrap_or_else(|_| Err(SubmitError::Transport("connection reset".to_owned()))),
            None => Err(SubmitError::Transport("no response scripted".to_owned())),
        }
    }
}

pub struct Fixture {
    pub doc: Rc<MemoryDocument>,
    pub transport: Rc<ScriptedTransport>,
    pub page: Page<MemoryDocument, ScriptedTransport>,
    pub form: NodeRef,
    pub name: NodeRef,
    pub email: NodeRef,
    pub subject: NodeRef,
    pub message: NodeRef,
    pub submit: NodeRef,
    pub inquiry_type: NodeRef,
    pub dynamic_fields: NodeRef,
    pub phone_field: NodeRef,
    pub by_email: NodeRef,
    pub by_phone: NodeRef,
    pub projects: Vec<NodeRef>,
    pub publications: Vec<NodeRef>,
    pub search: NodeRef,
    pub mobile_menu: NodeRef,
    pub menu_toggle: NodeRef,
}

impl Fixture {
    pub fn button(&self, filter: &str) -> NodeRef {
        self.doc
            .query_all(&Selector::attr_eq("data-filter", filter))
            .into_iter()
            .next()
            .expect("filter button")
    }

    pub fn notifications(&self) -> Vec<NodeRef> {
        self.doc.query_all(&Selector::class(NOTIFICATION_CLASS))
    }

    /// Appends a control under `#dynamicFields`, standing in for the node a
    /// browser builds from the rendered markup.
    pub fn add_dynamic_control(&self, tag: &str, name: &str, value: &str) -> NodeRef {
        let control = self
            .doc
            .element(tag)
            .attr("name", name)
            .append_to(&self.dynamic_fields);
        self.doc.set_value(&control, value);
        control
    }

    pub fn notification_html(&self) -> String {
        self.notifications()
            .first()
            .map(|node| self.doc.inner_html(node))
            .unwrap_or_default()
    }
}

fn project(doc: &MemoryDocument, parent: &NodeRef, category: &str, title: &str, body: &str) -> NodeRef {
    let item = doc
        .element("article")
        .class("research-project")
        .class(category)
        .append_to(parent);
    doc.element("h3").text(title).append_to(&item);
    doc.element("p").text(body).append_to(&item);
    item
}

fn publication(doc: &MemoryDocument, parent: &NodeRef, kind: &str, title: &str) -> NodeRef {
    doc.element("div")
        .class("publication-item")
        .attr("data-type", kind)
        .text(title)
        .append_to(parent)
}

/// A single page carrying every interactive section.
pub fn setup_page() -> anyhow::Result<Fixture> {
    setup_page_with(Settings::default())
}

pub fn setup_page_with(settings: Settings) -> anyhow::Result<Fixture> {
    let doc = Rc::new(MemoryDocument::new());
    let body = doc.body_node();

    let nav = doc.element("nav").append_to(&body);
    let menu_toggle = doc
        .element("button")
        .attr("data-action", "toggle-mobile-menu")
        .text("Menu")
        .append_to(&nav);
    let mobile_menu = doc
        .element("div")
        .id("mobile-menu")
        .class("hidden md:hidden")
        .append_to(&nav);
    doc.element("a")
        .attr("href", "#about")
        .text("About")
        .append_to(&nav);
    doc.element("section").id("about").append_to(&body);

    let hero = doc.element("section").append_to(&body);
    doc.element("a")
        .class("btn-primary")
        .attr("href", "/static/cv.pdf")
        .text("Download CV")
        .append_to(&hero);
    doc.element("a")
        .class("btn-secondary")
        .attr("href", "/contact")
        .text("Get in touch")
        .append_to(&hero);

    let research = doc.element("section").id("research").append_to(&body);
    let search = doc
        .element("input")
        .id("projectSearch")
        .attr("type", "text")
        .append_to(&research);
    for (filter, label) in [("all", "All"), ("ml", "Machine Learning"), ("data", "Data")] {
        doc.element("button")
            .class("filter-btn")
            .attr("data-filter", filter)
            .text(label)
            .append_to(&research);
    }
    doc.element("button")
        .attr("data-action", "reset-filters")
        .text("Reset")
        .append_to(&research);
    let projects = vec![
        project(&doc, &research, "ml", "Adaptive Tutors", "Reinforcement learning for feedback"),
        project(&doc, &research, "data", "Dropout Signals", "Mining LMS activity logs"),
        project(&doc, &research, "ml data", "Peer Review at Scale", "Calibrating student graders"),
    ];

    let publications_section = doc.element("section").id("publications").append_to(&body);
    for (filter, label) in [("journal", "Journals"), ("conference", "Conferences")] {
        doc.element("button")
            .class("filter-btn publication-filter")
            .attr("data-filter", filter)
            .text(label)
            .append_to(&publications_section);
    }
    let publications = vec![
        publication(&doc, &publications_section, "journal", "Learning Analytics Review"),
        publication(&doc, &publications_section, "conference", "EDM Proceedings"),
        publication(&doc, &publications_section, "journal", "Computers & Education"),
    ];
    doc.element("button")
        .class("btn-accent")
        .attr("data-action", "load-more-publications")
        .text("Load More Publications")
        .append_to(&publications_section);

    let courses = doc.element("section").id("courses").append_to(&body);
    doc.element("div")
        .attr("data-course", "cs101")
        .text("Intro to Programming")
        .append_to(&courses);

    let form = doc.element("form").id("contactForm").append_to(&body);
    let name = doc
        .element("input")
        .attr("name", "name")
        .value("")
        .append_to(&form);
    let email = doc
        .element("input")
        .attr("type", "email")
        .attr("name", "email")
        .value("")
        .append_to(&form);
    let subject = doc
        .element("input")
        .attr("name", "subject")
        .value("")
        .append_to(&form);
    let inquiry_type = doc
        .element("select")
        .id("inquiryType")
        .attr("name", "inquiryType")
        .value("")
        .append_to(&form);
    let dynamic_fields = doc.element("div").id("dynamicFields").append_to(&form);
    let by_email = doc
        .element("input")
        .attr("type", "radio")
        .attr("name", "responseMethod")
        .value("email")
        .checked(true)
        .append_to(&form);
    let by_phone = doc
        .element("input")
        .attr("type", "radio")
        .attr("name", "responseMethod")
        .value("phone")
        .append_to(&form);
    let phone_field = doc
        .element("div")
        .id("phoneField")
        .class("hidden")
        .append_to(&form);
    doc.element("input")
        .attr("type", "tel")
        .attr("name", "phone")
        .value("")
        .append_to(&phone_field);
    let message = doc
        .element("textarea")
        .attr("name", "message")
        .append_to(&form);
    let submit = doc
        .element("button")
        .attr("type", "submit")
        .html("Send Message")
        .append_to(&form);

    let transport = Rc::new(ScriptedTransport::default());
    let page = Page::new(doc.clone(), transport.clone(), settings);
    page.init()?;

    Ok(Fixture {
        doc,
        transport,
        page,
        form,
        name,
        email,
        subject,
        message,
        submit,
        inquiry_type,
        dynamic_fields,
        phone_field,
        by_email,
        by_phone,
        projects,
        publications,
        search,
        mobile_menu,
        menu_toggle,
    })
}
