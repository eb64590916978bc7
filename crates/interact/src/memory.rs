//! In-memory [`Document`] used by the test suites.
//!
//! It models just enough of the DOM for the page layer: a node tree with
//! classes, attributes, inline styles and form state, listeners that bubble,
//! a virtual clock for timers and a local executor for spawned futures.
//! `inner_html` is stored verbatim and never parsed into child nodes.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

use futures::{
    executor::{LocalPool, LocalSpawner},
    task::LocalSpawnExt,
};

use crate::{
    AttrMatch, Callback, Document, EventKind, FormPayload, Listener, LocalFuture, Result,
    Selector,
};

type SharedListener = Rc<dyn Fn(MemoryEvent)>;

#[derive(Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    inner_html: String,
    text: String,
    value: String,
    default_value: String,
    checked: bool,
    default_checked: bool,
    disabled: bool,
    times_disabled: usize,
    children: Vec<NodeRef>,
    parent: Weak<RefCell<Node>>,
    listeners: Vec<(EventKind, SharedListener)>,
}

#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        write!(f, "<{}", node.tag)?;
        if let Some(id) = node.attributes.get("id") {
            write!(f, " id=\"{id}\"")?;
        }
        if !node.classes.is_empty() {
            write!(f, " class=\"{}\"", node.classes.join(" "))?;
        }
        write!(f, ">")
    }
}

impl NodeRef {
    fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        })))
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().style.get(property).cloned()
    }

    /// False once the page layer has hidden the element with `display: none`.
    pub fn is_shown(&self) -> bool {
        self.style("display").as_deref() != Some("none")
    }

    /// How many times the element went from enabled to disabled.
    pub fn times_disabled(&self) -> usize {
        self.0.borrow().times_disabled
    }

    pub fn children(&self) -> Vec<NodeRef> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.0.borrow().parent.upgrade().map(NodeRef)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let node = self.0.borrow();
        match name {
            "class" if !node.classes.is_empty() => Some(node.classes.join(" ")),
            _ => node.attributes.get(name).cloned(),
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        match name {
            "class" => node.classes = value.split_whitespace().map(str::to_owned).collect(),
            "value" => {
                node.value = value.to_owned();
                node.default_value = value.to_owned();
            }
            "checked" => {
                node.checked = true;
                node.default_checked = true;
            }
            "disabled" => node.disabled = true,
            _ => {
                node.attributes.insert(name.to_owned(), value.to_owned());
            }
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.attribute("id").as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.0.borrow().classes.iter().any(|c| c == class),
            Selector::Tag(tag) => self.0.borrow().tag.eq_ignore_ascii_case(tag),
            Selector::Attr(name, rule) => match (self.attribute(name), rule) {
                (Some(_), AttrMatch::Exists) => true,
                (Some(value), AttrMatch::Equals(expected)) => &value == expected,
                (Some(value), AttrMatch::StartsWith(prefix)) => value.starts_with(prefix.as_str()),
                (None, _) => false,
            },
            Selector::All(parts) => parts.iter().all(|part| self.matches(part)),
            Selector::Any(options) => options.iter().any(|option| self.matches(option)),
        }
    }

    /// Pre-order, document order, excluding `self`.
    fn descendants(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef> = self.0.borrow().children.iter().rev().cloned().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.0.borrow().children.iter().rev().cloned());
            out.push(node);
        }
        out
    }

    fn text_content(&self) -> String {
        let node = self.0.borrow();
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&child.text_content());
        }
        text
    }

    fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent.0.borrow_mut().children.retain(|child| child != self);
        self.0.borrow_mut().parent = Weak::new();
    }

    fn attach(parent: &NodeRef, child: &NodeRef) {
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&parent.0);
        parent.0.borrow_mut().children.push(child.clone());
    }

    fn clear_children(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }

    fn is_form_control(&self) -> bool {
        matches!(self.0.borrow().tag.as_str(), "input" | "select" | "textarea")
    }

    fn input_type(&self) -> String {
        self.attribute("type").unwrap_or_default().to_ascii_lowercase()
    }
}

/// Fluent construction of fixture nodes.
pub struct ElementBuilder(NodeRef);

impl ElementBuilder {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.0
            .0
            .borrow_mut()
            .classes
            .extend(class.split_whitespace().map(str::to_owned));
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.0.set_attribute(name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        {
            let mut node = self.0.0.borrow_mut();
            node.text = text.to_owned();
            node.inner_html = text.to_owned();
        }
        self
    }

    pub fn html(self, html: &str) -> Self {
        self.0.0.borrow_mut().inner_html = html.to_owned();
        self
    }

    pub fn value(self, value: &str) -> Self {
        self.attr("value", value)
    }

    pub fn checked(self, checked: bool) -> Self {
        {
            let mut node = self.0.0.borrow_mut();
            node.checked = checked;
            node.default_checked = checked;
        }
        self
    }

    pub fn child(self, child: NodeRef) -> Self {
        NodeRef::attach(&self.0, &child);
        self
    }

    pub fn build(self) -> NodeRef {
        self.0
    }

    pub fn append_to(self, parent: &NodeRef) -> NodeRef {
        NodeRef::attach(parent, &self.0);
        self.0
    }
}

#[derive(Clone)]
pub struct MemoryEvent {
    target: NodeRef,
    current_target: NodeRef,
    default_prevented: Rc<Cell<bool>>,
}

impl MemoryEvent {
    pub fn target(&self) -> &NodeRef {
        &self.target
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

struct Timer {
    due: Duration,
    seq: u64,
    callback: Callback,
}

pub struct MemoryDocument {
    root: NodeRef,
    body: NodeRef,
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    scroll_to_top_calls: Cell<usize>,
    scrolled_into_view: RefCell<Vec<NodeRef>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let root = NodeRef::new("html");
        let body = NodeRef::new("body");
        NodeRef::attach(&root, &body);
        let pool = LocalPool::new();
        let spawner = pool.spawner();

        Self {
            root,
            body,
            now: Cell::new(Duration::ZERO),
            next_seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            pool: RefCell::new(pool),
            spawner,
            scroll_to_top_calls: Cell::new(0),
            scrolled_into_view: RefCell::new(Vec::new()),
        }
    }

    pub fn element(&self, tag: &str) -> ElementBuilder {
        ElementBuilder(NodeRef::new(tag))
    }

    pub fn body_node(&self) -> NodeRef {
        self.body.clone()
    }

    pub fn is_connected(&self, node: &NodeRef) -> bool {
        let mut current = node.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current == self.root
    }

    /// Fires `kind` at `target` and bubbles it up the ancestors.
    /// Returns whether a listener prevented the default action.
    pub fn dispatch(&self, target: &NodeRef, kind: EventKind) -> bool {
        let prevented = Rc::new(Cell::new(false));
        let mut current = Some(target.clone());
        while let Some(node) = current {
            let listeners: Vec<SharedListener> = node
                .0
                .borrow()
                .listeners
                .iter()
                .filter(|(registered, _)| *registered == kind)
                .map(|(_, listener)| listener.clone())
                .collect();
            for listener in listeners {
                listener(MemoryEvent {
                    target: target.clone(),
                    current_target: node.clone(),
                    default_prevented: prevented.clone(),
                });
            }
            current = node.parent();
        }
        prevented.get()
    }

    pub fn click(&self, target: &NodeRef) -> bool {
        self.dispatch(target, EventKind::Click)
    }

    pub fn submit(&self, form: &NodeRef) -> bool {
        self.dispatch(form, EventKind::Submit)
    }

    /// Sets the control value the way typing would, then fires `change`.
    pub fn change_value(&self, control: &NodeRef, value: &str) {
        control.0.borrow_mut().value = value.to_owned();
        self.dispatch(control, EventKind::Change);
    }

    /// Sets the control value the way typing would, then fires `input`.
    pub fn type_text(&self, control: &NodeRef, value: &str) {
        control.0.borrow_mut().value = value.to_owned();
        self.dispatch(control, EventKind::Input);
    }

    /// Checks a radio, unchecking the rest of its group, then fires `change`.
    pub fn check(&self, radio: &NodeRef) {
        if let Some(name) = radio.attribute("name") {
            for other in self.query_all(&Selector::tag("input").and(Selector::attr_eq("name", name))) {
                other.0.borrow_mut().checked = false;
            }
        }
        radio.0.borrow_mut().checked = true;
        self.dispatch(radio, EventKind::Change);
    }

    /// Polls spawned futures until none can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Moves the virtual clock forward, firing due timers in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);
                index.map(|index| timers.remove(index))
            };
            let Some(timer) = next else {
                break;
            };
            self.now.set(timer.due);
            (timer.callback)();
        }
        self.now.set(target);
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn scroll_to_top_calls(&self) -> usize {
        self.scroll_to_top_calls.get()
    }

    pub fn scrolled_into_view(&self) -> Vec<NodeRef> {
        self.scrolled_into_view.borrow().clone()
    }
}

impl Document for MemoryDocument {
    type Element = NodeRef;
    type Event = MemoryEvent;

    fn element_by_id(&self, id: &str) -> Option<NodeRef> {
        let selector = Selector::id(id);
        self.root
            .descendants()
            .into_iter()
            .find(|node| node.matches(&selector))
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeRef> {
        self.query_all_within(&self.root, selector)
    }

    fn query_within(&self, scope: &NodeRef, selector: &Selector) -> Option<NodeRef> {
        scope
            .descendants()
            .into_iter()
            .find(|node| node.matches(selector))
    }

    fn query_all_within(&self, scope: &NodeRef, selector: &Selector) -> Vec<NodeRef> {
        scope
            .descendants()
            .into_iter()
            .filter(|node| node.matches(selector))
            .collect()
    }

    fn body(&self) -> Option<NodeRef> {
        Some(self.body.clone())
    }

    fn create_element(&self, tag: &str) -> Result<NodeRef> {
        Ok(NodeRef::new(tag))
    }

    fn append_child(&self, parent: &NodeRef, child: &NodeRef) -> Result<()> {
        NodeRef::attach(parent, child);
        Ok(())
    }

    fn remove(&self, element: &NodeRef) {
        element.detach();
    }

    fn has_class(&self, element: &NodeRef, class: &str) -> bool {
        element.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, element: &NodeRef, class: &str) -> Result<()> {
        if !self.has_class(element, class) {
            element.0.borrow_mut().classes.push(class.to_owned());
        }
        Ok(())
    }

    fn remove_class(&self, element: &NodeRef, class: &str) -> Result<()> {
        element.0.borrow_mut().classes.retain(|c| c != class);
        Ok(())
    }

    fn toggle_class(&self, element: &NodeRef, class: &str) -> Result<bool> {
        if self.has_class(element, class) {
            self.remove_class(element, class)?;
            Ok(false)
        } else {
            self.add_class(element, class)?;
            Ok(true)
        }
    }

    fn set_class_name(&self, element: &NodeRef, class_name: &str) {
        element.set_attribute("class", class_name);
    }

    fn attribute(&self, element: &NodeRef, name: &str) -> Option<String> {
        element.attribute(name)
    }

    fn set_attribute(&self, element: &NodeRef, name: &str, value: &str) -> Result<()> {
        element.set_attribute(name, value);
        Ok(())
    }

    fn remove_attribute(&self, element: &NodeRef, name: &str) -> Result<()> {
        element.0.borrow_mut().attributes.remove(name);
        Ok(())
    }

    fn set_style(&self, element: &NodeRef, property: &str, value: &str) -> Result<()> {
        element
            .0
            .borrow_mut()
            .style
            .insert(property.to_owned(), value.to_owned());
        Ok(())
    }

    fn inner_html(&self, element: &NodeRef) -> String {
        element.0.borrow().inner_html.clone()
    }

    fn set_inner_html(&self, element: &NodeRef, html: &str) {
        element.clear_children();
        let mut node = element.0.borrow_mut();
        node.inner_html = html.to_owned();
        node.text.clear();
    }

    fn text_content(&self, element: &NodeRef) -> String {
        element.text_content()
    }

    fn set_text_content(&self, element: &NodeRef, text: &str) {
        element.clear_children();
        let mut node = element.0.borrow_mut();
        node.text = text.to_owned();
        node.inner_html = text.to_owned();
    }

    fn value(&self, element: &NodeRef) -> String {
        element.0.borrow().value.clone()
    }

    fn set_value(&self, element: &NodeRef, value: &str) {
        element.0.borrow_mut().value = value.to_owned();
    }

    fn is_checked(&self, element: &NodeRef) -> bool {
        element.0.borrow().checked
    }

    fn is_disabled(&self, element: &NodeRef) -> bool {
        element.0.borrow().disabled
    }

    fn set_disabled(&self, element: &NodeRef, disabled: bool) {
        let mut node = element.0.borrow_mut();
        if disabled && !node.disabled {
            node.times_disabled += 1;
        }
        node.disabled = disabled;
    }

    fn form_payload(&self, form: &NodeRef) -> FormPayload {
        let mut payload = FormPayload::new();
        for control in form.descendants() {
            if !control.is_form_control() || control.0.borrow().disabled {
                continue;
            }
            let Some(name) = control.attribute("name") else {
                continue;
            };
            let value = match control.input_type().as_str() {
                "radio" | "checkbox" if !control.0.borrow().checked => continue,
                "radio" | "checkbox" if control.0.borrow().value.is_empty() => "on".to_owned(),
                "submit" | "button" | "file" => continue,
                _ => control.0.borrow().value.clone(),
            };
            payload.push(name, value);
        }
        payload
    }

    fn reset_form(&self, form: &NodeRef) {
        for control in form.descendants() {
            if !control.is_form_control() {
                continue;
            }
            let mut node = control.0.borrow_mut();
            node.value = node.default_value.clone();
            node.checked = node.default_checked;
        }
    }

    fn scroll_to_top(&self) {
        self.scroll_to_top_calls
            .set(self.scroll_to_top_calls.get() + 1);
    }

    fn scroll_into_view(&self, element: &NodeRef) {
        self.scrolled_into_view.borrow_mut().push(element.clone());
    }

    fn add_listener(
        &self,
        element: &NodeRef,
        kind: EventKind,
        listener: Listener<MemoryEvent>,
    ) -> Result<()> {
        element
            .0
            .borrow_mut()
            .listeners
            .push((kind, Rc::from(listener)));
        Ok(())
    }

    fn prevent_default(&self, event: &MemoryEvent) {
        event.default_prevented.set(true);
    }

    fn current_target(&self, event: &MemoryEvent) -> Option<NodeRef> {
        Some(event.current_target.clone())
    }

    fn set_timeout(&self, delay: Duration, callback: Callback) -> Result<()> {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + delay,
            seq,
            callback,
        });
        Ok(())
    }

    fn spawn_local(&self, future: LocalFuture) {
        if let Err(err) = self.spawner.spawn_local(future) {
            tracing::error!("unable to spawn task: {err}");
        }
    }
}
