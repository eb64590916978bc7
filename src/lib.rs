pub mod assets;
pub mod config;
pub mod content;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod server;
pub mod template;

pub use config::Config;
pub use routes::AppState;

/// Create app router for testing
///
/// Same routes and layers as the served application, without binding a socket.
pub fn create_app(config: Config) -> axum::Router {
    server::app(AppState { config })
}
