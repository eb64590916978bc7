use axum::response::IntoResponse;

use crate::content::{CATEGORIES, Category, PROJECTS, Project};
use crate::template::{Template, filters};

#[derive(askama::Template)]
#[template(path = "research.html")]
pub struct ResearchTemplate {
    pub current_path: String,
    pub categories: &'static [Category],
    pub projects: &'static [Project],
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(ResearchTemplate {
        current_path: "research".to_owned(),
        categories: CATEGORIES,
        projects: PROJECTS,
    })
}
