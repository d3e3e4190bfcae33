//! HTTP client for the quest store.
//!
//! Loads a quest as one scene list plus one position list, and saves the
//! current snapshot back as a full replacement. Requests go through the
//! browser's `fetch`; there is no retry and no conflict detection.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::store::NodeStore;
use super::types::{QuestResponse, UpdateQuestRequest};

/// Failure talking to the quest store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// The request never produced a response (offline, CORS, bad URL).
	#[error("network error: {0}")]
	Network(String),
	/// The store answered with a non-success status.
	#[error("{}", status_message(.status, .detail))]
	Status {
		/// HTTP status code.
		status: u16,
		/// `detail` from the JSON error body, when there was one.
		detail: Option<String>,
	},
	/// The store answered, but not with the expected JSON.
	#[error("malformed response: {0}")]
	Decode(#[from] serde_json::Error),
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
	match detail {
		Some(detail) => detail.clone(),
		None => format!("HTTP error! status: {status}"),
	}
}

impl From<JsValue> for StoreError {
	fn from(value: JsValue) -> Self {
		StoreError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// Error body shape used by the store. `detail` is usually a string, but
/// validation failures send a structured value.
#[derive(Deserialize)]
struct ErrorBody {
	detail: Option<Value>,
}

/// Pull a human-readable detail out of an error response body.
pub fn error_detail(body: &str) -> Option<String> {
	let parsed: ErrorBody = serde_json::from_str(body).ok()?;
	match parsed.detail? {
		Value::String(s) => Some(s),
		Value::Null => None,
		other => Some(other.to_string()),
	}
}

/// Client for one quest store base URL.
#[derive(Clone, Debug)]
pub struct QuestApi {
	base_url: String,
}

impl QuestApi {
	/// Client for `base_url`. Trailing slashes are ignored.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
		}
	}

	/// Load endpoint for `quest`, with the name percent-encoded.
	pub fn quest_url(&self, quest: &str) -> String {
		format!("{}/get_quest_data/{}", self.base_url, urlencoding::encode(quest))
	}

	/// Save endpoint.
	pub fn update_url(&self) -> String {
		format!("{}/update_quest", self.base_url)
	}

	/// Fetch a quest and join it into a node store.
	pub async fn load(&self, quest: &str) -> Result<NodeStore, StoreError> {
		let init = RequestInit::new();
		init.set_method("GET");
		init.set_mode(RequestMode::Cors);
		let request = Request::new_with_str_and_init(&self.quest_url(quest), &init)?;

		let body = send(request).await?;
		let response: QuestResponse = serde_json::from_str(&body)?;
		Ok(NodeStore::from_response(response))
	}

	/// Replace the stored quest with `payload`.
	pub async fn save(&self, payload: &UpdateQuestRequest) -> Result<(), StoreError> {
		let json = serde_json::to_string(payload)?;

		let init = RequestInit::new();
		init.set_method("PUT");
		init.set_mode(RequestMode::Cors);
		init.set_body(&JsValue::from_str(&json));
		let request = Request::new_with_str_and_init(&self.update_url(), &init)?;
		request.headers().set("Content-Type", "application/json")?;

		send(request).await?;
		Ok(())
	}
}

/// Run a request and return the body text of a successful response.
async fn send(request: Request) -> Result<String, StoreError> {
	let window = web_sys::window().ok_or_else(|| StoreError::Network("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await?
		.dyn_into()?;

	let body = JsFuture::from(response.text()?)
		.await?
		.as_string()
		.unwrap_or_default();

	if !response.ok() {
		return Err(StoreError::Status {
			status: response.status(),
			detail: error_detail(&body),
		});
	}
	Ok(body)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn urls_tolerate_trailing_slashes_and_encode_names() {
		let api = QuestApi::new("http://localhost:8000/");
		assert_eq!(
			api.quest_url("dark tower"),
			"http://localhost:8000/get_quest_data/dark%20tower"
		);
		assert_eq!(api.update_url(), "http://localhost:8000/update_quest");
	}

	#[test]
	fn status_errors_prefer_the_server_detail() {
		let with_detail = StoreError::Status {
			status: 500,
			detail: error_detail(r#"{"detail": "Failed to update quest: disk full"}"#),
		};
		assert_eq!(with_detail.to_string(), "Failed to update quest: disk full");

		let without = StoreError::Status {
			status: 502,
			detail: error_detail("<html>Bad Gateway</html>"),
		};
		assert_eq!(without.to_string(), "HTTP error! status: 502");
	}

	#[test]
	fn structured_details_are_stringified() {
		let detail = error_detail(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#);
		assert!(detail.unwrap().contains("field required"));
		assert_eq!(error_detail(r#"{"detail": null}"#), None);
	}
}
