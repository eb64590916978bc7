use std::str::FromStr;

use askama::Template;
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{Document, Result, Selector};

pub const INQUIRY_TYPE_ID: &str = "inquiryType";
pub const DYNAMIC_FIELDS_ID: &str = "dynamicFields";
pub const PHONE_FIELD_ID: &str = "phoneField";
pub const RESPONSE_METHOD_NAME: &str = "responseMethod";
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(EnumString, Display, AsRefStr, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum InquiryType {
    Research,
    Teaching,
    Speaking,
    Mentorship,
}

#[derive(Template)]
#[template(path = "fields/research.html")]
struct ResearchFields;

#[derive(Template)]
#[template(path = "fields/teaching.html")]
struct TeachingFields;

#[derive(Template)]
#[template(path = "fields/speaking.html")]
struct SpeakingFields;

#[derive(Template)]
#[template(path = "fields/mentorship.html")]
struct MentorshipFields;

impl InquiryType {
    /// `None` for empty or unknown selector values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_str(value.trim()).ok()
    }

    pub fn label(self) -> &'static str {
        match self {
            InquiryType::Research => "Research Collaboration",
            InquiryType::Teaching => "Teaching & Workshops",
            InquiryType::Speaking => "Speaking Engagement",
            InquiryType::Mentorship => "Mentorship",
        }
    }

    /// Names of the controls the type's template renders.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            InquiryType::Research => &["researchArea", "timeline"],
            InquiryType::Teaching => &["eventType", "audienceSize"],
            InquiryType::Speaking => &["eventDate", "speakingTopic"],
            InquiryType::Mentorship => &["currentLevel"],
        }
    }

    pub fn render(self) -> askama::Result<String> {
        match self {
            InquiryType::Research => ResearchFields.render(),
            InquiryType::Teaching => TeachingFields.render(),
            InquiryType::Speaking => SpeakingFields.render(),
            InquiryType::Mentorship => MentorshipFields.render(),
        }
    }
}

/// Replaces the whole dynamic-fields container with the template for
/// `inquiry_type`. Unknown or empty types leave it empty.
pub fn render_fields_for<D: Document>(doc: &D, inquiry_type: &str) -> Result<Option<InquiryType>> {
    let Some(container) = doc.element_by_id(DYNAMIC_FIELDS_ID) else {
        return Ok(None);
    };

    let kind = InquiryType::parse(inquiry_type);
    let html = match kind {
        Some(kind) => kind.render()?,
        None => String::new(),
    };
    doc.set_inner_html(&container, &html);

    tracing::debug!(inquiry_type, "dynamic fields rendered");

    Ok(kind)
}

/// Shows the phone field only while the checked response method is `phone`.
///
/// Reads the group's current state rather than the event that triggered it,
/// so the result never depends on the order options were clicked in.
pub fn sync_phone_field<D: Document>(doc: &D) -> Result<bool> {
    let Some(phone_field) = doc.element_by_id(PHONE_FIELD_ID) else {
        return Ok(false);
    };

    let wants_phone = doc
        .query_all(&response_method_selector())
        .iter()
        .find(|radio| doc.is_checked(radio))
        .is_some_and(|radio| doc.value(radio) == "phone");

    if wants_phone {
        doc.remove_class(&phone_field, HIDDEN_CLASS)?;
    } else {
        doc.add_class(&phone_field, HIDDEN_CLASS)?;
    }

    Ok(wants_phone)
}

pub(crate) fn response_method_selector() -> Selector {
    Selector::tag("input").and(Selector::attr_eq("name", RESPONSE_METHOD_NAME))
}
