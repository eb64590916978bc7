//! Show/hide filtering and free-text search over the static project and
//! publication lists. The lists are re-queried on every call.

use crate::{Document, Result, Selector};

pub const PROJECT_CLASS: &str = "research-project";
pub const PUBLICATION_CLASS: &str = "publication-item";
pub const FILTER_BUTTON_CLASS: &str = "filter-btn";
pub const FILTER_ATTRIBUTE: &str = "data-filter";
pub const TYPE_ATTRIBUTE: &str = "data-type";
pub const SEARCH_INPUT_ID: &str = "projectSearch";
pub const ACTIVE_CLASS: &str = "active";
pub const ALL: &str = "all";

fn set_visible<D: Document>(doc: &D, item: &D::Element, visible: bool) -> Result<()> {
    let (display, opacity) = if visible { ("block", "1") } else { ("none", "0") };
    doc.set_style(item, "display", display)?;
    doc.set_style(item, "opacity", opacity)
}

/// Marks exactly the filter buttons whose `data-filter` equals `filter` as active.
fn mark_active<D: Document>(doc: &D, filter: &str) -> Result<()> {
    for button in doc.query_all(&Selector::class(FILTER_BUTTON_CLASS)) {
        if doc.attribute(&button, FILTER_ATTRIBUTE).as_deref() == Some(filter) {
            doc.add_class(&button, ACTIVE_CLASS)?;
        } else {
            doc.remove_class(&button, ACTIVE_CLASS)?;
        }
    }
    Ok(())
}

fn apply<D: Document>(
    doc: &D,
    items: &Selector,
    keep: impl Fn(&D::Element) -> bool,
) -> Result<usize> {
    let mut shown = 0;
    for item in doc.query_all(items) {
        let visible = keep(&item);
        set_visible(doc, &item, visible)?;
        shown += usize::from(visible);
    }
    Ok(shown)
}

/// Returns how many projects remain visible.
pub fn filter_by_category<D: Document>(doc: &D, category: &str) -> Result<usize> {
    mark_active(doc, category)?;
    let shown = apply(doc, &Selector::class(PROJECT_CLASS), |item| {
        category == ALL || doc.has_class(item, category)
    })?;

    tracing::debug!(category, shown, "projects filtered");

    Ok(shown)
}

/// Publication flavour of [`filter_by_category`], keyed on `data-type`.
pub fn filter_by_type<D: Document>(doc: &D, kind: &str) -> Result<usize> {
    mark_active(doc, kind)?;
    let shown = apply(doc, &Selector::class(PUBLICATION_CLASS), |item| {
        kind == ALL || doc.attribute(item, TYPE_ATTRIBUTE).as_deref() == Some(kind)
    })?;

    tracing::debug!(kind, shown, "publications filtered");

    Ok(shown)
}

/// Case-insensitive substring match over each project's title and description.
pub fn search_by_text<D: Document>(doc: &D, term: &str) -> Result<usize> {
    let term = term.to_lowercase();
    let heading = Selector::tag("h3");
    let paragraph = Selector::tag("p");

    let shown = apply(doc, &Selector::class(PROJECT_CLASS), |item| {
        if term.is_empty() {
            return true;
        }
        let text = |selector: &Selector| {
            doc.query_within(item, selector)
                .map(|node| doc.text_content(&node))
                .unwrap_or_default()
        };
        let haystack = format!("{}\n{}", text(&heading), text(&paragraph)).to_lowercase();
        haystack.contains(&term)
    })?;

    tracing::debug!(term = %term, shown, "projects searched");

    Ok(shown)
}

pub fn reset_filters<D: Document>(doc: &D) -> Result<()> {
    mark_active(doc, ALL)?;

    let search = doc.element_by_id(SEARCH_INPUT_ID).or_else(|| {
        doc.query_all(&Selector::tag("input").and(Selector::attr_eq("type", "text")))
            .into_iter()
            .next()
    });
    if let Some(search) = search {
        doc.set_value(&search, "");
    }

    apply(doc, &Selector::class(PROJECT_CLASS), |_| true)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryDocument, memory::NodeRef};

    fn project(doc: &MemoryDocument, classes: &str, title: &str, description: &str) -> NodeRef {
        let item = doc
            .element("article")
            .class(PROJECT_CLASS)
            .class(classes)
            .append_to(&doc.body_node());
        doc.element("h3").text(title).append_to(&item);
        doc.element("p").text(description).append_to(&item);
        item
    }

    #[test]
    fn title_and_description_are_both_searched() {
        let doc = MemoryDocument::new();
        let a = project(&doc, "ml", "Adaptive Tutors", "Reinforcement learning in class");
        let b = project(&doc, "data", "Dropout Signals", "Mining LMS logs");

        assert_eq!(search_by_text(&doc, "TUTORS").unwrap(), 1);
        assert!(a.is_shown());
        assert!(!b.is_shown());

        assert_eq!(search_by_text(&doc, "lms").unwrap(), 1);
        assert!(!a.is_shown());
        assert!(b.is_shown());
    }

    #[test]
    fn hidden_items_stay_in_the_document() {
        let doc = MemoryDocument::new();
        let item = project(&doc, "ml", "A", "B");
        filter_by_category(&doc, "data").unwrap();
        assert!(doc.is_connected(&item));
        assert_eq!(item.style("opacity").as_deref(), Some("0"));
    }
}
