#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use scholarfolio::{
    Config,
    config::{ObservabilityConfig, ServerConfig, SiteConfig},
};
use scholarfolio_interact::Settings;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        site: SiteConfig {
            owner: "Dr. Test Person".to_string(),
            email: "test.person@uni.example.edu".to_string(),
            ..SiteConfig::default()
        },
        interact: Settings {
            fallback_email: "test.person@uni.example.edu".to_string(),
            ..Settings::default()
        },
        observability: ObservabilityConfig::default(),
    }
}

/// Sends a GET through the full application stack and returns the body as text.
pub async fn get(config: Config, path: &str) -> anyhow::Result<(StatusCode, String)> {
    let app = scholarfolio::create_app(config);
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty())?)
        .await?;

    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();

    Ok((status, String::from_utf8(body.to_vec())?))
}
