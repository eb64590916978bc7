use axum::response::IntoResponse;

use crate::content::{COURSES, Course};
use crate::template::{Template, filters};

#[derive(askama::Template)]
#[template(path = "teaching.html")]
pub struct TeachingTemplate {
    pub current_path: String,
    pub courses: &'static [Course],
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(TeachingTemplate {
        current_path: "teaching".to_owned(),
        courses: COURSES,
    })
}
