//! JavaScript entry points for pages that call the API without going
//! through Rust: `apiFetch(path, init?)` and `apiBaseUrl()`.
//!
//! `init` follows `fetch`'s `RequestInit`: `method`, `headers` (a `Headers`
//! instance, an array of pairs or a plain object), `body` (string,
//! `Uint8Array` or `ArrayBuffer`), `credentials` and `mode`.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{RequestCredentials, RequestMode};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::options::RequestOptions;
use crate::transport::BrowserTransport;

thread_local! {
    static PAGE_CLIENT: Rc<ApiClient<BrowserTransport>> = Rc::new(ApiClient::with_transport(
        ClientConfig::from_document().candidates(),
        BrowserTransport,
    ));
}

#[wasm_bindgen(js_name = installApiLogger)]
pub fn install_api_logger() {
    wasm_logger::init(wasm_logger::Config::default());
}

#[wasm_bindgen(js_name = apiFetch)]
pub async fn api_fetch(path: String, init: JsValue) -> Result<web_sys::Response, JsValue> {
    let options = request_options(&init)?;
    let client = PAGE_CLIENT.with(Rc::clone);

    let response = client
        .request(&path, &options)
        .await
        .map_err(|err| to_js_error(&err))?;

    Ok(response.as_raw().clone())
}

#[wasm_bindgen(js_name = apiBaseUrl)]
pub fn api_base_url() -> String {
    PAGE_CLIENT.with(|client| client.current_base().to_string())
}

fn to_js_error(err: &ApiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn member(object: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    js_sys::Reflect::get(object, &JsValue::from_str(key))
}

fn request_options(init: &JsValue) -> Result<RequestOptions, JsValue> {
    if is_absent(init) {
        return Ok(RequestOptions::default());
    }

    let mut options = match member(init, "method")?.as_string() {
        Some(method) => RequestOptions::with_method_name(&method).map_err(|err| to_js_error(&err))?,
        None => RequestOptions::default(),
    };

    for (name, value) in header_entries(&member(init, "headers")?)? {
        options = options
            .text_header(&name, &value)
            .map_err(|err| to_js_error(&err))?;
    }

    let body = member(init, "body")?;
    if let Some(text) = body.as_string() {
        options = options.body(text);
    } else if let Some(bytes) = body.dyn_ref::<js_sys::Uint8Array>() {
        options = options.body(bytes.to_vec());
    } else if let Some(buffer) = body.dyn_ref::<js_sys::ArrayBuffer>() {
        options = options.body(js_sys::Uint8Array::new(buffer).to_vec());
    } else if !is_absent(&body) {
        return Err(JsValue::from_str("unsupported body type"));
    }

    let credentials = member(init, "credentials")?;
    if !is_absent(&credentials) {
        options.credentials = Some(
            RequestCredentials::from_js_value(&credentials)
                .ok_or_else(|| JsValue::from_str("invalid credentials"))?,
        );
    }

    let mode = member(init, "mode")?;
    if !is_absent(&mode) {
        options.mode = Some(
            RequestMode::from_js_value(&mode).ok_or_else(|| JsValue::from_str("invalid mode"))?,
        );
    }

    Ok(options)
}

fn header_entries(headers: &JsValue) -> Result<Vec<(String, String)>, JsValue> {
    if is_absent(headers) {
        return Ok(Vec::new());
    }

    // `Headers` and arrays of pairs are iterable; plain objects are not.
    let entries: Vec<JsValue> = match js_sys::try_iter(headers)? {
        Some(iter) => iter.collect::<Result<_, _>>()?,
        None => js_sys::Object::entries(headers.unchecked_ref()).iter().collect(),
    };

    entries
        .into_iter()
        .map(|entry| {
            let pair: js_sys::Array = entry.dyn_into()?;
            match (pair.get(0).as_string(), pair.get(1).as_string()) {
                (Some(name), Some(value)) => Ok((name, value)),
                _ => Err(JsValue::from_str("header entries must be string pairs")),
            }
        })
        .collect()
}
