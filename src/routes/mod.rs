use axum::{Router, extract::OriginalUri, http::StatusCode, response::IntoResponse, routing::get};

use crate::template::{NotFoundTemplate, Template};

mod contact;
mod health;
mod index;
mod publications;
mod research;
mod teaching;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
}

pub async fn fallback(template: Template, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "page not found");

    let mut response = template.render(NotFoundTemplate {
        current_path: uri.path().to_owned(),
    });
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/research", get(research::page))
        .route("/publications", get(publications::page))
        .route("/teaching", get(teaching::page))
        .route("/contact", get(contact::page))
        .fallback(fallback)
        .nest_service("/static", crate::assets::AssetsService::new())
        .with_state(app_state)
}
