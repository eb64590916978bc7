use async_trait::async_trait;
use scholarfolio_interact::{FormPayload, SubmitError, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, RequestInit, Response, Window};

fn transport_error(err: JsValue) -> SubmitError {
    SubmitError::Transport(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Posts multipart form data with `fetch`.
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_form(&self, endpoint: &str, payload: FormPayload) -> Result<String, SubmitError> {
        let body = FormData::new().map_err(transport_error)?;
        for (name, value) in payload.iter() {
            body.append_with_str(name, value).map_err(transport_error)?;
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&body);

        let response = JsFuture::from(self.window.fetch_with_str_and_init(endpoint, &init))
            .await
            .map_err(transport_error)?;
        let response: Response = response.dyn_into().map_err(transport_error)?;

        tracing::debug!(status = response.status(), endpoint, "contact endpoint replied");

        // the body is read whatever the status, error responses carry JSON too
        let text = JsFuture::from(response.text().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;

        text.as_string()
            .ok_or_else(|| SubmitError::Transport("response body is not text".to_owned()))
    }
}
