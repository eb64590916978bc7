use std::time::Duration;

use scholarfolio_interact::{
    Callback, Error, EventKind, FormPayload, Listener, LocalFuture, Result, SETTINGS_ELEMENT_ID,
    Selector, Settings,
};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{
    Element, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

pub(crate) fn dom_error(err: JsValue) -> Error {
    Error::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// [`scholarfolio_interact::Document`] over the browser DOM.
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    /// Runs `callback` once the document has been parsed.
    pub fn on_ready(&self, callback: impl FnOnce() + 'static) -> Result<()> {
        if !self.is_loading() {
            callback();
            return Ok(());
        }

        let closure = Closure::once_into_js(callback);
        self.document
            .add_event_listener_with_callback("DOMContentLoaded", closure.unchecked_ref())
            .map_err(dom_error)
    }

    /// Settings rendered into the page by the server, or defaults.
    pub fn settings(&self) -> Settings {
        self.document
            .get_element_by_id(SETTINGS_ELEMENT_ID)
            .and_then(|script| script.text_content())
            .map(|raw| Settings::from_json(&raw))
            .unwrap_or_default()
    }
}

impl scholarfolio_interact::Document for WebDocument {
    type Element = Element;
    type Event = Event;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &Selector) -> Vec<Element> {
        match self.document.query_selector_all(&selector.to_css()) {
            Ok(list) => elements(list),
            Err(err) => {
                tracing::warn!(%selector, "invalid selector: {err:?}");
                Vec::new()
            }
        }
    }

    fn query_within(&self, scope: &Element, selector: &Selector) -> Option<Element> {
        scope.query_selector(&selector.to_css()).ok().flatten()
    }

    fn query_all_within(&self, scope: &Element, selector: &Selector) -> Vec<Element> {
        scope
            .query_selector_all(&selector.to_css())
            .map(elements)
            .unwrap_or_default()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn create_element(&self, tag: &str) -> Result<Element> {
        self.document.create_element(tag).map_err(dom_error)
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<()> {
        parent.append_child(child).map(|_| ()).map_err(dom_error)
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) -> Result<()> {
        element.class_list().add_1(class).map_err(dom_error)
    }

    fn remove_class(&self, element: &Element, class: &str) -> Result<()> {
        element.class_list().remove_1(class).map_err(dom_error)
    }

    fn toggle_class(&self, element: &Element, class: &str) -> Result<bool> {
        element.class_list().toggle(class).map_err(dom_error)
    }

    fn set_class_name(&self, element: &Element, class_name: &str) {
        element.set_class_name(class_name);
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<()> {
        element.set_attribute(name, value).map_err(dom_error)
    }

    fn remove_attribute(&self, element: &Element, name: &str) -> Result<()> {
        element.remove_attribute(name).map_err(dom_error)
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) -> Result<()> {
        let Some(element) = element.dyn_ref::<HtmlElement>() else {
            return Err(Error::Dom(format!("cannot style <{}>", element.tag_name())));
        };
        element
            .style()
            .set_property(property, value)
            .map_err(dom_error)
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn text_content(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn value(&self, element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, element: &Element, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn is_checked(&self, element: &Element) -> bool {
        element
            .dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn is_disabled(&self, element: &Element) -> bool {
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            return button.disabled();
        }
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return input.disabled();
        }
        element.has_attribute("disabled")
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if let Err(err) = element.toggle_attribute_with_force("disabled", disabled) {
            tracing::warn!("unable to toggle disabled: {err:?}");
        }
    }

    fn form_payload(&self, form: &Element) -> FormPayload {
        let mut payload = FormPayload::new();
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return payload;
        };
        let Ok(data) = FormData::new_with_form(form) else {
            return payload;
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return payload;
        };

        for entry in entries.flatten() {
            let pair = entry.unchecked_into::<js_sys::Array>();
            // file inputs yield blobs, not strings
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                payload.push(name, value);
            }
        }

        payload
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_into_view(&self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn add_listener(&self, element: &Element, kind: EventKind, listener: Listener<Event>) -> Result<()> {
        let closure = Closure::<dyn Fn(Event)>::new(move |event: Event| listener(event));
        element
            .add_event_listener_with_callback(kind.as_ref(), closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        // listeners live as long as the page
        closure.forget();
        Ok(())
    }

    fn prevent_default(&self, event: &Event) {
        event.prevent_default();
    }

    fn current_target(&self, event: &Event) -> Option<Element> {
        event.current_target()?.dyn_into::<Element>().ok()
    }

    fn set_timeout(&self, delay: Duration, callback: Callback) -> Result<()> {
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let callback = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
            .map(|_| ())
            .map_err(dom_error)
    }

    fn spawn_local(&self, future: LocalFuture) {
        wasm_bindgen_futures::spawn_local(future);
    }
}
