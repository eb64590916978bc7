use std::{rc::Rc, time::Duration};

use crate::{Document, Result, Selector};

pub const MOBILE_MENU_ID: &str = "mobile-menu";
pub const COURSES_ID: &str = "courses";
const LOADING_LABEL: &str = "Loading...";

/// Returns whether the menu is now hidden.
pub fn toggle_mobile_menu<D: Document>(doc: &D) -> Result<bool> {
    match doc.element_by_id(MOBILE_MENU_ID) {
        Some(menu) => doc.toggle_class(&menu, crate::fields::HIDDEN_CLASS),
        None => Ok(false),
    }
}

/// Smooth-scrolls to the element an in-page `#id` link points at.
pub fn scroll_to_anchor<D: Document>(doc: &D, href: &str) -> bool {
    let Some(id) = href.strip_prefix('#') else {
        return false;
    };
    if id.is_empty() {
        return false;
    }
    match doc.element_by_id(id) {
        Some(target) => {
            doc.scroll_into_view(&target);
            true
        }
        None => false,
    }
}

pub fn expand_course<D: Document>(doc: &D, course_id: &str) {
    tracing::info!(course_id, "expanding course");
    if let Some(courses) = doc.element_by_id(COURSES_ID) {
        doc.scroll_into_view(&courses);
    }
}

/// Buttons whose label announces a download or a load get a transient
/// loading state.
pub fn wants_loading_state(label: &str) -> bool {
    label.contains("Download") || label.contains("Load")
}

pub(crate) fn loading_buttons_selector() -> Selector {
    Selector::any([
        Selector::class("btn-primary"),
        Selector::class("btn-secondary"),
        Selector::class("btn-accent"),
    ])
}

/// Marks an element whose loading state is running. Links ignore `disabled`,
/// so repeat clicks are filtered on this instead.
pub const LOADING_ATTRIBUTE: &str = "data-loading";

/// Swaps the label for "Loading..." and disables the button, restoring
/// both once `duration` has passed. Clicks during that window do nothing.
pub fn begin_loading_state<D: Document>(
    doc: &Rc<D>,
    button: &D::Element,
    duration: Duration,
) -> Result<()> {
    if doc.attribute(button, LOADING_ATTRIBUTE).is_some() {
        return Ok(());
    }

    let original = doc.text_content(button);
    doc.set_attribute(button, LOADING_ATTRIBUTE, "true")?;
    doc.set_text_content(button, LOADING_LABEL);
    doc.set_disabled(button, true);

    let restore_doc = doc.clone();
    let button = button.clone();
    doc.set_timeout(
        duration,
        Box::new(move || {
            restore_doc.set_text_content(&button, &original);
            restore_doc.set_disabled(&button, false);
            if let Err(err) = restore_doc.remove_attribute(&button, LOADING_ATTRIBUTE) {
                tracing::error!("unable to clear loading state: {err}");
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_download_and_load_labels_qualify() {
        assert!(wants_loading_state("Download CV"));
        assert!(wants_loading_state("Load More Publications"));
        assert!(!wants_loading_state("Contact Me"));
    }
}
