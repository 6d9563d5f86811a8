use listing_common::{ListingError, ListingResponse};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// 标记请求为脚本发起，服务端据此只返回片段
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

fn describe(value: JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

/// 请求列表片段
///
/// 不设超时、不可取消；过期响应由控制器根据请求序号丢弃。
pub async fn fetch_listing(url: &str) -> Result<ListingResponse, ListingError> {
    let window = web_sys::window().ok_or_else(|| ListingError::Network("没有 window 对象".to_string()))?;

    let options = RequestInit::new();
    options.set_method("GET");
    let request = Request::new_with_str_and_init(url, &options)
        .map_err(|e| ListingError::Network(describe(e)))?;
    request
        .headers()
        .set(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
        .map_err(|e| ListingError::Network(describe(e)))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ListingError::Network(describe(e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| ListingError::Network(describe(e)))?;

    if !response.ok() {
        return Err(ListingError::Status(response.status()));
    }

    let text = response.text().map_err(|e| ListingError::Body(describe(e)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| ListingError::Body(describe(e)))?
        .as_string()
        .ok_or_else(|| ListingError::Body("响应体不是文本".to_string()))?;

    ListingResponse::from_json(&body)
}
