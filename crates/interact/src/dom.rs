//! The page as seen by the interaction layer.
//!
//! Every behavior in this crate is written against [`Document`]. The browser
//! build implements it over `web-sys`, tests use `MemoryDocument`.

use std::{fmt, future::Future, pin::Pin, time::Duration};

use strum::{AsRefStr, Display};

use crate::{FormPayload, Result};

pub type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;
pub type Listener<E> = Box<dyn Fn(E)>;
pub type Callback = Box<dyn FnOnce()>;

#[derive(AsRefStr, Display, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Click,
    Change,
    Input,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrMatch {
    Exists,
    Equals(String),
    StartsWith(String),
}

/// A small, typed subset of CSS selectors.
///
/// Only the shapes the page layer needs are representable, which keeps the
/// in-memory document honest about what it has to match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
    Attr(String, AttrMatch),
    All(Vec<Selector>),
    Any(Vec<Selector>),
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn attr(name: impl Into<String>) -> Self {
        Self::Attr(name.into(), AttrMatch::Exists)
    }

    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attr(name.into(), AttrMatch::Equals(value.into()))
    }

    pub fn attr_prefix(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::Attr(name.into(), AttrMatch::StartsWith(prefix.into()))
    }

    /// Compound selector: every part must match the same element.
    pub fn and(self, other: Selector) -> Self {
        match self {
            Self::All(mut parts) => {
                parts.push(other);
                Self::All(parts)
            }
            first => Self::All(vec![first, other]),
        }
    }

    pub fn any(selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self::Any(selectors.into_iter().collect())
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Attr(name, AttrMatch::Exists) => write!(f, "[{name}]"),
            Self::Attr(name, AttrMatch::Equals(value)) => write!(f, "[{name}=\"{value}\"]"),
            Self::Attr(name, AttrMatch::StartsWith(value)) => write!(f, "[{name}^=\"{value}\"]"),
            Self::All(parts) => {
                // tags must lead a compound selector
                let (tags, rest): (Vec<_>, Vec<_>) =
                    parts.iter().partition(|s| matches!(s, Self::Tag(_)));
                for part in tags.into_iter().chain(rest) {
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Self::Any(options) => {
                let css = options
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&css)
            }
        }
    }
}

pub trait Document: 'static {
    type Element: Clone + 'static;
    type Event: 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    /// All matches in document order. Never cached by callers.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;
    /// First matching descendant of `scope`.
    fn query_within(&self, scope: &Self::Element, selector: &Selector) -> Option<Self::Element>;
    fn query_all_within(&self, scope: &Self::Element, selector: &Selector) -> Vec<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    fn create_element(&self, tag: &str) -> Result<Self::Element>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<()>;
    /// Detaches the element. Detaching an already detached element is a no-op.
    fn remove(&self, element: &Self::Element);

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn add_class(&self, element: &Self::Element, class: &str) -> Result<()>;
    fn remove_class(&self, element: &Self::Element, class: &str) -> Result<()>;
    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, element: &Self::Element, class: &str) -> Result<bool>;
    fn set_class_name(&self, element: &Self::Element, class_name: &str);

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> Result<()>;
    fn remove_attribute(&self, element: &Self::Element, name: &str) -> Result<()>;
    fn set_style(&self, element: &Self::Element, property: &str, value: &str) -> Result<()>;

    fn inner_html(&self, element: &Self::Element) -> String;
    fn set_inner_html(&self, element: &Self::Element, html: &str);
    fn text_content(&self, element: &Self::Element) -> String;
    fn set_text_content(&self, element: &Self::Element, text: &str);

    /// Current value of a form control, empty for anything else.
    fn value(&self, element: &Self::Element) -> String;
    fn set_value(&self, element: &Self::Element, value: &str);
    fn is_checked(&self, element: &Self::Element) -> bool;
    fn is_disabled(&self, element: &Self::Element) -> bool;
    fn set_disabled(&self, element: &Self::Element, disabled: bool);

    /// Named, enabled controls of a form. Unchecked radios and checkboxes are skipped.
    fn form_payload(&self, form: &Self::Element) -> FormPayload;
    fn reset_form(&self, form: &Self::Element);

    fn scroll_to_top(&self);
    fn scroll_into_view(&self, element: &Self::Element);

    fn add_listener(
        &self,
        element: &Self::Element,
        kind: EventKind,
        listener: Listener<Self::Event>,
    ) -> Result<()>;
    fn prevent_default(&self, event: &Self::Event);
    /// The element the listener was registered on.
    fn current_target(&self, event: &Self::Event) -> Option<Self::Element>;

    fn set_timeout(&self, delay: Duration, callback: Callback) -> Result<()>;
    fn spawn_local(&self, future: LocalFuture);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_selectors_put_the_tag_first() {
        let selector = Selector::attr_eq("type", "submit").and(Selector::tag("button"));
        assert_eq!(selector.to_css(), "button[type=\"submit\"]");
    }

    #[test]
    fn any_joins_with_commas() {
        let selector = Selector::any([
            Selector::class("btn-primary"),
            Selector::class("btn-secondary"),
        ]);
        assert_eq!(selector.to_css(), ".btn-primary, .btn-secondary");
    }

    #[test]
    fn prefix_match_renders_caret() {
        let selector = Selector::tag("a").and(Selector::attr_prefix("href", "#"));
        assert_eq!(selector.to_css(), "a[href^=\"#\"]");
    }
}
