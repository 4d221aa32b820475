use scatter_core::DataError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// GET `url` and return the body text. Network failures, non-2xx statuses and
/// unreadable bodies map onto `DataError` for the fallback path.
pub async fn fetch_text(window: &web::Window, url: &str) -> Result<String, DataError> {
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::SameOrigin);

    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| DataError::Unreachable(format!("{:?}", e)))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| DataError::Unreachable(format!("{:?}", e)))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| DataError::Unreachable(format!("{:?}", e)))?;
    if !resp.ok() {
        return Err(DataError::Http(resp.status()));
    }
    let text_promise = resp
        .text()
        .map_err(|e| DataError::Unreachable(format!("{:?}", e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| DataError::Unreachable(format!("{:?}", e)))?;
    text.as_string()
        .ok_or_else(|| DataError::Unreachable("response body is not text".into()))
}
