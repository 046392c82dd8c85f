use geojson::FeatureCollection;
use nwi_core::summary::{parse_summary, parse_total_users};
use nwi_core::{choropleth, topology, DashboardError, Suggestion, SummaryCollection};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub const SUMMARY_PATH: &str = "/api/summary";
pub const TOTAL_USERS_PATH: &str = "/api/total_users";
pub const SUGGESTIONS_PATH: &str = "/api/suggestions";
pub const GEOMETRY_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Sends `request` and returns the body of a successful response.
async fn send(url: &str, opts: &RequestInit) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    let request = Request::new_with_str_and_init(url, opts).map_err(|e| js_reason(&e))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_reason(&e))?
        .dyn_into::<Response>()
        .map_err(|e| js_reason(&e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let text = response.text().map_err(|e| js_reason(&e))?;
    JsFuture::from(text)
        .await
        .map_err(|e| js_reason(&e))?
        .as_string()
        .ok_or_else(|| "response body is not text".to_string())
}

async fn get_text(url: &str, mode: RequestMode) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(mode);
    send(url, &opts).await
}

pub async fn fetch_summary() -> Result<SummaryCollection, DashboardError> {
    let body = get_text(SUMMARY_PATH, RequestMode::SameOrigin)
        .await
        .map_err(|reason| DashboardError::fetch(SUMMARY_PATH, reason))?;
    parse_summary(&body).map_err(|e| DashboardError::fetch(SUMMARY_PATH, e))
}

pub async fn fetch_total_users() -> Result<u64, DashboardError> {
    let body = get_text(TOTAL_USERS_PATH, RequestMode::SameOrigin)
        .await
        .map_err(|reason| DashboardError::fetch(TOTAL_USERS_PATH, reason))?;
    parse_total_users(&body).map_err(|e| DashboardError::fetch(TOTAL_USERS_PATH, e))
}

/// Boundary dataset, decoded and antimeridian-normalized.
pub async fn fetch_geometry() -> Result<FeatureCollection, DashboardError> {
    let body = get_text(GEOMETRY_URL, RequestMode::Cors)
        .await
        .map_err(DashboardError::geometry)?;
    let mut collection = topology::decode(&body)?;
    choropleth::normalize(&mut collection);
    Ok(collection)
}

pub async fn submit_suggestion(suggestion: &Suggestion) -> Result<(), DashboardError> {
    let body = suggestion.to_json().map_err(DashboardError::submission)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(&body));

    let headers = web_sys::Headers::new().map_err(|e| DashboardError::submission(js_reason(&e)))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| DashboardError::submission(js_reason(&e)))?;
    opts.set_headers(&headers);

    send(SUGGESTIONS_PATH, &opts)
        .await
        .map(|_| ())
        .map_err(DashboardError::submission)
}
