//! Browser entry point: binds the interaction layer to the live DOM.

mod document;
mod transport;

use std::rc::Rc;

use scholarfolio_interact::Page;
use wasm_bindgen::prelude::*;

pub use document::WebDocument;
pub use transport::FetchTransport;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    tracing_wasm::set_as_global_default();

    let doc = WebDocument::new().ok_or_else(|| JsValue::from_str("no document available"))?;
    let settings = doc.settings();
    let transport = FetchTransport::new(doc.window().clone());
    let doc = Rc::new(doc);
    let page = Page::new(doc.clone(), Rc::new(transport), settings);

    doc.on_ready(move || {
        if let Err(err) = page.init() {
            tracing::error!("unable to initialize page: {err}");
        }
    })
    .map_err(|err| JsValue::from_str(&err.to_string()))
}
