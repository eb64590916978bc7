#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("dom: {0}")]
    Dom(String),

    #[error("{0}")]
    Template(#[from] askama::Error),

    #[error("missing element: {0}")]
    MissingElement(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Logs the failure of a listener body; listeners have nowhere to return errors to.
pub(crate) fn log_failure(action: &str, result: Result<()>) {
    if let Err(err) = result {
        tracing::error!(action, "{err}");
    }
}
