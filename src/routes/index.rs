use axum::response::IntoResponse;

use crate::content::{PROJECTS, PUBLICATIONS, Project, Publication};
use crate::template::{Template, filters};

const FEATURED_PROJECTS: usize = 2;
const RECENT_PUBLICATIONS: usize = 3;

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub current_path: String,
    pub projects: &'static [Project],
    pub publications: &'static [Publication],
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(IndexTemplate {
        current_path: "home".to_owned(),
        projects: &PROJECTS[..FEATURED_PROJECTS.min(PROJECTS.len())],
        publications: &PUBLICATIONS[..RECENT_PUBLICATIONS.min(PUBLICATIONS.len())],
    })
}
