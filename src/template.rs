use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::{collections::HashMap, convert::Infallible};

use crate::config::SiteConfig;

pub(crate) mod filters {
    use scholarfolio_interact::Settings;
    use time::OffsetDateTime;

    use crate::config::SiteConfig;

    /// Site identity field by name, e.g. `{{ "owner"|site }}`.
    #[askama::filter_fn]
    pub fn site(field: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let site = askama::get_value::<SiteConfig>(values, "site")?;

        let value = match field {
            "owner" => &site.owner,
            "title" => &site.title,
            "institution" => &site.institution,
            "email" => &site.email,
            other => {
                return Err(askama::Error::Custom(
                    format!("unknown site field `{other}`").into(),
                ));
            }
        };

        Ok(value.to_owned())
    }

    /// Interaction settings as JSON safe to inline in a `<script>` element.
    #[askama::filter_fn]
    pub fn settings_json(_value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let settings = askama::get_value::<Settings>(values, "interact")?;
        let json =
            serde_json::to_string(settings).map_err(|e| askama::Error::Custom(Box::new(e)))?;

        Ok(json.replace('<', "\\u003c"))
    }

    #[askama::filter_fn]
    pub fn year(_value: &str, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(OffsetDateTime::now_utc().year().to_string())
    }
}

pub struct Template {
    site: SiteConfig,
    interact: scholarfolio_interact::Settings,
}

impl Template {
    pub fn new(config: &crate::config::Config) -> Self {
        Self {
            site: config.site.clone(),
            interact: config.interact.clone(),
        }
    }

    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert("site", Box::new(self.site.clone()));
        values.insert("interact", Box::new(self.interact.clone()));

        #[cfg(debug_assertions)]
        {
            values.insert("is_dev", Box::new(true));
        }
        #[cfg(not(debug_assertions))]
        {
            values.insert("is_dev", Box::new(false));
        }

        template.render_with_values(&values)
    }

    pub fn to_string<T: askama::Template>(&self, template: T) -> String {
        match self.render_with_values(template) {
            Ok(html) => html,
            Err(err) => format!("Failed to render template. Error: {err}"),
        }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!("{err}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {err}"),
                )
                    .into_response()
            }
        }
    }
}

impl FromRequestParts<crate::routes::AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &crate::routes::AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Template::new(&state.config))
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub current_path: String,
}
