use axum::response::IntoResponse;
use strum::VariantArray;

use crate::content::{PUBLICATIONS, Publication, PublicationKind};
use crate::template::{Template, filters};

#[derive(askama::Template)]
#[template(path = "publications.html")]
pub struct PublicationsTemplate {
    pub current_path: String,
    pub kinds: &'static [PublicationKind],
    pub publications: &'static [Publication],
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(PublicationsTemplate {
        current_path: "publications".to_owned(),
        kinds: PublicationKind::VARIANTS,
        publications: PUBLICATIONS,
    })
}
