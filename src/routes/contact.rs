use axum::response::IntoResponse;
use scholarfolio_interact::InquiryType;
use strum::VariantArray;

use crate::template::{Template, filters};

#[derive(askama::Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub current_path: String,
    pub inquiry_types: &'static [InquiryType],
}

/// The form posts to the configured endpoint, which this server does not host.
pub async fn page(template: Template) -> impl IntoResponse {
    template.render(ContactTemplate {
        current_path: "contact".to_owned(),
        inquiry_types: InquiryType::VARIANTS,
    })
}
